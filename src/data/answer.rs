use std::collections::BTreeMap;

use super::question::{bool_text, Question, QuestionKind};

/// Drag & drop answer: draggable id to target id.
///
/// Every draggable sits on at most one target and every target holds at most
/// one draggable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragMapping(BTreeMap<String, String>);

impl DragMapping {
    pub fn new() -> DragMapping {
        DragMapping::default()
    }

    /// Drops `draggable` onto `target`, evicting whatever was on the target and
    /// lifting the draggable from wherever it was before.
    pub fn assign(&mut self, draggable: impl ToString, target: impl ToString) {
        let draggable = draggable.to_string();
        let target = target.to_string();

        if let Some(previous) = self.draggable_at(&target).map(str::to_string) {
            self.0.remove(&previous);
        }
        self.0.insert(draggable, target);
    }

    /// Returns the target the draggable was removed from.
    pub fn unassign(&mut self, draggable: &str) -> Option<String> {
        self.0.remove(draggable)
    }

    pub fn target_of(&self, draggable: &str) -> Option<&str> {
        self.0.get(draggable).map(String::as_str)
    }

    pub fn draggable_at(&self, target: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, t)| t.as_str() == target)
            .map(|(d, _)| d.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(d, t)| (d.as_str(), t.as_str()))
    }
}

impl<D: ToString, T: ToString> FromIterator<(D, T)> for DragMapping {
    fn from_iter<I: IntoIterator<Item = (D, T)>>(iter: I) -> Self {
        DragMapping(
            iter.into_iter()
                .map(|(d, t)| (d.to_string(), t.to_string()))
                .collect(),
        )
    }
}

/// One answer slot. Serialized as `null`, an option index, a boolean, a
/// mapping object or a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    #[default]
    Unanswered,
    Choice(usize),
    Bool(bool),
    Mapping(DragMapping),
    Text(String),
}

impl Answer {
    /// Initial slot value for a freshly started quiz.
    pub fn empty_for(kind: &QuestionKind) -> Answer {
        match kind {
            QuestionKind::Mcq { .. } | QuestionKind::TrueFalse { .. } => Answer::Unanswered,
            QuestionKind::DragDrop { .. } => Answer::Mapping(DragMapping::new()),
            _ => Answer::Text(String::new()),
        }
    }

    pub fn mapping(&self) -> Option<&DragMapping> {
        match self {
            Answer::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Answer::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// A single user interaction with the answer widget of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Choose(usize),
    Pick(bool),
    Assign { draggable: String, target: String },
    Unassign { draggable: String },
    Text(String),
}

/// Applies `input` to `slot`, producing the new slot value.
///
/// Returns `None` when the input doesn't belong to the question type or refers
/// to an option, draggable or target the question doesn't have.
pub fn capture(kind: &QuestionKind, slot: &Answer, input: AnswerInput) -> Option<Answer> {
    match (kind, input) {
        (QuestionKind::Mcq { options, .. }, AnswerInput::Choose(index)) if index < options.len() => {
            Some(Answer::Choice(index))
        }
        (QuestionKind::TrueFalse { .. }, AnswerInput::Pick(value)) => Some(Answer::Bool(value)),
        (
            QuestionKind::DragDrop {
                draggable_items,
                droppable_targets,
                ..
            },
            AnswerInput::Assign { draggable, target },
        ) => {
            if !draggable_items.iter().any(|it| it.id == draggable)
                || !droppable_targets.iter().any(|it| it.id == target)
            {
                return None;
            }
            let mut mapping = slot.mapping().cloned().unwrap_or_default();
            mapping.assign(draggable, target);
            Some(Answer::Mapping(mapping))
        }
        (QuestionKind::DragDrop { .. }, AnswerInput::Unassign { draggable }) => {
            let mut mapping = slot.mapping().cloned().unwrap_or_default();
            mapping.unassign(&draggable);
            Some(Answer::Mapping(mapping))
        }
        (kind, AnswerInput::Text(text)) if kind.is_text() => Some(Answer::Text(text)),
        _ => None,
    }
}

/// The user's answer as shown on the results screen.
pub fn describe(question: &Question, answer: &Answer) -> String {
    match (&question.kind, answer) {
        (_, Answer::Unanswered) => "No answer provided".to_string(),
        (QuestionKind::Mcq { options, .. }, Answer::Choice(index)) => {
            options.get(*index).cloned().unwrap_or_default()
        }
        (_, Answer::Bool(value)) => bool_text(*value).to_string(),
        (_, Answer::Mapping(mapping)) if mapping.is_empty() => "No items mapped".to_string(),
        (_, Answer::Mapping(mapping)) => mapping
            .iter()
            .map(|(draggable, target)| question.pair_text(draggable, target))
            .collect::<Vec<_>>()
            .join(", "),
        (_, Answer::Choice(index)) => index.to_string(),
        (_, Answer::Text(text)) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::question::fixtures;
    use serde_json::json;

    fn assign(draggable: &str, target: &str) -> AnswerInput {
        AnswerInput::Assign {
            draggable: draggable.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn assign_replaces_occupant_of_target() {
        let mut mapping = DragMapping::new();
        mapping.assign("d1", "t1");
        mapping.assign("d2", "t1");

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.draggable_at("t1"), Some("d2"));
        assert_eq!(mapping.target_of("d1"), None);
    }

    #[test]
    fn assign_moves_draggable() {
        let mut mapping = DragMapping::new();
        mapping.assign("d1", "t1");
        mapping.assign("d1", "t2");

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.target_of("d1"), Some("t2"));
        assert_eq!(mapping.draggable_at("t1"), None);
    }

    #[test]
    fn assign_onto_occupied_target_from_another_target() {
        let mut mapping: DragMapping = [("d1", "t1"), ("d2", "t2")].into_iter().collect();
        mapping.assign("d1", "t2");

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.target_of("d1"), Some("t2"));
        assert_eq!(mapping.target_of("d2"), None);
    }

    #[test]
    fn unassign_removes_only_that_draggable() {
        let mut mapping: DragMapping = [("d1", "t1"), ("d2", "t2")].into_iter().collect();

        assert_eq!(mapping.unassign("d1").as_deref(), Some("t1"));
        assert_eq!(mapping.unassign("d1"), None);
        assert_eq!(mapping.target_of("d2"), Some("t2"));
    }

    #[test]
    fn empty_slots_match_question_type() {
        assert_eq!(Answer::empty_for(&fixtures::mcq("a").kind), Answer::Unanswered);
        assert_eq!(Answer::empty_for(&fixtures::true_false("a").kind), Answer::Unanswered);
        assert_eq!(
            Answer::empty_for(&fixtures::drag_drop("a").kind),
            Answer::Mapping(DragMapping::new())
        );
        assert_eq!(
            Answer::empty_for(&fixtures::trace("a").kind),
            Answer::Text(String::new())
        );
    }

    #[test]
    fn capture_rejects_mismatched_input() {
        let mcq = fixtures::mcq("a").kind;
        assert_eq!(capture(&mcq, &Answer::Unanswered, AnswerInput::Choose(2)), Some(Answer::Choice(2)));
        assert_eq!(capture(&mcq, &Answer::Unanswered, AnswerInput::Choose(3)), None);
        assert_eq!(capture(&mcq, &Answer::Unanswered, AnswerInput::Pick(true)), None);

        let text = fixtures::fill_in("b").kind;
        assert_eq!(
            capture(&text, &Answer::Text(String::new()), AnswerInput::Text("v".into())),
            Some(Answer::Text("v".into()))
        );
        assert_eq!(capture(&text, &Answer::Text(String::new()), AnswerInput::Choose(0)), None);
    }

    #[test]
    fn capture_drag_drop_validates_ids() {
        let kind = fixtures::drag_drop("c").kind;
        let slot = Answer::empty_for(&kind);

        let slot = capture(&kind, &slot, assign("d1", "t1")).unwrap();
        let slot = capture(&kind, &slot, assign("d2", "t2")).unwrap();
        assert_eq!(slot.mapping().map(DragMapping::len), Some(2));

        assert_eq!(capture(&kind, &slot, assign("d9", "t1")), None);
        assert_eq!(capture(&kind, &slot, assign("d1", "t9")), None);

        let slot = capture(
            &kind,
            &slot,
            AnswerInput::Unassign {
                draggable: "d2".into(),
            },
        )
        .unwrap();
        assert_eq!(slot.mapping().and_then(|m| m.target_of("d2")), None);
    }

    #[test]
    fn answers_use_plain_json_values() {
        let answers: Vec<Answer> =
            serde_json::from_value(json!([null, 1, true, {"d1": "t1"}, "42"])).unwrap();
        assert_eq!(
            answers,
            vec![
                Answer::Unanswered,
                Answer::Choice(1),
                Answer::Bool(true),
                Answer::Mapping([("d1", "t1")].into_iter().collect()),
                Answer::Text("42".into()),
            ]
        );
    }

    #[test]
    fn describe_answers() {
        let mcq = fixtures::mcq("a");
        assert_eq!(describe(&mcq, &Answer::Unanswered), "No answer provided");
        assert_eq!(describe(&mcq, &Answer::Choice(0)), "A");

        let drag = fixtures::drag_drop("b");
        assert_eq!(describe(&drag, &Answer::Mapping(DragMapping::new())), "No items mapped");
        assert_eq!(
            describe(&drag, &Answer::Mapping([("d2", "t1")].into_iter().collect())),
            "$\\mathbb{R}^3$ → 2"
        );

        assert_eq!(describe(&fixtures::true_false("c"), &Answer::Bool(false)), "False");
    }
}
