use std::collections::BTreeMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use utoipa::ToSchema;

pub mod bank;

/// A draggable item or a drop target of a drag & drop question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: String,
    pub text: String,
}

impl Item {
    pub fn new(id: impl ToString, text: impl ToString) -> Item {
        Item {
            id: id.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Mcq {
        options: Vec<String>,
        #[serde(rename = "correctAnswerIndex")]
        correct_answer_index: usize,
    },
    TrueFalse {
        #[serde(rename = "correctAnswer")]
        correct_answer: bool,
    },
    DragDrop {
        #[serde(rename = "draggableItems")]
        draggable_items: Vec<Item>,
        #[serde(rename = "droppableTargets")]
        droppable_targets: Vec<Item>,
        /// Draggable id to target id.
        #[serde(rename = "correctMapping")]
        correct_mapping: BTreeMap<String, String>,
    },
    FillInTheBlank {
        #[serde(rename = "correctAnswer")]
        correct_answer: String,
        #[serde(
            rename = "placeholderText",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        placeholder_text: Option<String>,
    },
    TraceTheOutput {
        #[serde(rename = "codeSnippet")]
        code_snippet: String,
        #[serde(rename = "correctOutput")]
        correct_output: String,
    },
    WriteFullCode {
        #[serde(rename = "codeSnippet", default, skip_serializing_if = "Option::is_none")]
        code_snippet: Option<String>,
        /// Shown next to the user's code for manual comparison, never graded against.
        #[serde(rename = "correctCodeSolution")]
        correct_code_solution: String,
    },
}

impl QuestionKind {
    /// Wire name of the question type.
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::Mcq { .. } => "mcq",
            QuestionKind::TrueFalse { .. } => "true_false",
            QuestionKind::DragDrop { .. } => "drag_drop",
            QuestionKind::FillInTheBlank { .. } => "fill_in_the_blank",
            QuestionKind::TraceTheOutput { .. } => "trace_the_output",
            QuestionKind::WriteFullCode { .. } => "write_full_code",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            QuestionKind::FillInTheBlank { .. }
                | QuestionKind::TraceTheOutput { .. }
                | QuestionKind::WriteFullCode { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Display text, may contain math markup.
    pub question: String,
    pub explanation: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn new(id: impl ToString, question: impl ToString, kind: QuestionKind) -> Question {
        Question {
            id: id.to_string(),
            difficulty: None,
            question: question.to_string(),
            explanation: String::new(),
            kind,
        }
    }

    pub fn with_explanation(mut self, explanation: impl ToString) -> Question {
        self.explanation = explanation.to_string();
        self
    }

    /// Correct answer rendered for the results view.
    pub fn correct_answer_text(&self) -> String {
        match &self.kind {
            QuestionKind::Mcq {
                options,
                correct_answer_index,
            } => options
                .get(*correct_answer_index)
                .cloned()
                .unwrap_or_default(),
            QuestionKind::TrueFalse { correct_answer } => bool_text(*correct_answer).to_string(),
            QuestionKind::DragDrop {
                correct_mapping, ..
            } => correct_mapping
                .iter()
                .map(|(draggable, target)| self.pair_text(draggable, target))
                .collect::<Vec<_>>()
                .join(", "),
            QuestionKind::FillInTheBlank { correct_answer, .. } => correct_answer.clone(),
            QuestionKind::TraceTheOutput { correct_output, .. } => correct_output.clone(),
            QuestionKind::WriteFullCode {
                correct_code_solution,
                ..
            } => correct_code_solution.clone(),
        }
    }

    /// `draggable → target` using item texts. Unknown ids fall back to the id itself.
    pub fn pair_text(&self, draggable: &str, target: &str) -> String {
        match &self.kind {
            QuestionKind::DragDrop {
                draggable_items,
                droppable_targets,
                ..
            } => format!(
                "{} → {}",
                item_text(draggable_items, draggable),
                item_text(droppable_targets, target)
            ),
            _ => format!("{} → {}", draggable, target),
        }
    }
}

fn item_text<'a>(items: &'a [Item], id: &'a str) -> &'a str {
    items
        .iter()
        .find(|it| it.id == id)
        .map(|it| it.text.as_str())
        .unwrap_or(id)
}

#[inline]
pub fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// The full question set. Read-only once loaded and cheap to clone.
#[derive(Debug, Clone)]
pub struct QuestionPool(Arc<[Question]>);

impl Default for QuestionPool {
    fn default() -> Self {
        QuestionPool::new(Vec::new())
    }
}

impl QuestionPool {
    pub fn new(questions: Vec<Question>) -> QuestionPool {
        QuestionPool(questions.into())
    }

    pub fn questions(&self) -> &[Question] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.0.iter().find(|q| q.id == id)
    }

    /// `n` distinct questions in uniformly random order (partial Fisher-Yates).
    /// Asking for more than the pool holds yields the whole pool shuffled.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Question> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        let (picked, _) = order.partial_shuffle(rng, n.min(self.len()));
        picked.iter().map(|&i| self.0[i].clone()).collect()
    }
}

impl From<Vec<Question>> for QuestionPool {
    fn from(value: Vec<Question>) -> Self {
        QuestionPool::new(value)
    }
}
