use std::collections::BTreeMap;

use utoipa::ToSchema;

use super::answer::{Answer, DragMapping};
use super::question::{Question, QuestionKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: Question,
    #[schema(value_type = Object)]
    pub user_answer: Answer,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GradeReport {
    pub score: usize,
    pub results: Vec<QuestionResult>,
}

impl GradeReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Share of correct answers in whole percent, rounded half up.
    pub fn percent(&self) -> u32 {
        if self.results.is_empty() {
            return 0;
        }
        ((self.score as f64 / self.total() as f64) * 100.0).round() as u32
    }
}

/// Grades every question against the answer in the same position.
///
/// Questions without an answer slot count as unanswered. Always yields one
/// result per question.
pub fn grade(questions: &[Question], answers: &[Answer]) -> GradeReport {
    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let user_answer = answers.get(i).cloned().unwrap_or_default();
            QuestionResult {
                is_correct: is_correct(&question.kind, &user_answer),
                question: question.clone(),
                user_answer,
            }
        })
        .collect();

    GradeReport {
        score: results.iter().filter(|r| r.is_correct).count(),
        results,
    }
}

pub fn is_correct(kind: &QuestionKind, answer: &Answer) -> bool {
    match (kind, answer) {
        (
            QuestionKind::Mcq {
                correct_answer_index,
                ..
            },
            Answer::Choice(index),
        ) => index == correct_answer_index,
        (QuestionKind::TrueFalse { correct_answer }, Answer::Bool(value)) => value == correct_answer,
        (QuestionKind::DragDrop { correct_mapping, .. }, Answer::Mapping(mapping)) => {
            mapping_matches(correct_mapping, mapping)
        }
        (QuestionKind::FillInTheBlank { correct_answer, .. }, Answer::Text(text)) => {
            text.trim().to_lowercase() == correct_answer.trim().to_lowercase()
        }
        (QuestionKind::TraceTheOutput { correct_output, .. }, Answer::Text(text)) => {
            text.trim() == correct_output.trim()
        }
        // Presence only, the reference solution is for manual comparison.
        (QuestionKind::WriteFullCode { .. }, Answer::Text(text)) => !text.trim().is_empty(),
        _ => false,
    }
}

// Keys outside the correct mapping aren't checked beyond the count comparison.
fn mapping_matches(correct: &BTreeMap<String, String>, user: &DragMapping) -> bool {
    correct.len() == user.len()
        && correct
            .iter()
            .all(|(draggable, target)| user.target_of(draggable) == Some(target.as_str()))
}
