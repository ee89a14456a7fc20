use crate::data::{Action, AnswerInput, Phase, QuestionCount, QuestionKind, QuizSession};
use crate::util::unescape_newlines;

pub const HELP: &str = "\
Commands:
  :start    start the quiz with the chosen number of questions
  :next     go to the next question
  :prev     go to the previous question
  :submit   grade the quiz (on the last question)
  :retake   go back to the start screen after the results
  :help     show this help
  :quit     exit
Answers:
  multiple choice   the option number, e.g. 2
  true / false      t or f
  drag & drop       '<item> <target>' to place an item, '-<item>' to lift it
  text              the answer itself, type \\n for a line break";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Help,
    Quit,
    /// Input that doesn't fit the current screen, with a hint for the user.
    Invalid(String),
}

/// Interprets one line of user input on the screen `session` is showing.
pub fn parse(line: &str, session: &QuizSession) -> Command {
    let trimmed = line.trim();
    if let Some(name) = trimmed.strip_prefix(':') {
        return parse_command(name.trim(), session);
    }

    match session.phase() {
        Phase::NotStarted if trimmed.is_empty() => {
            Command::Act(Action::Start(session.question_count()))
        }
        Phase::NotStarted => Command::Act(Action::EditQuestionCount(QuestionCount::parse(trimmed))),
        Phase::InProgress => parse_answer(line, session),
        Phase::Results => {
            Command::Invalid("Type :retake to take another quiz or :quit to exit.".to_string())
        }
    }
}

fn parse_command(name: &str, session: &QuizSession) -> Command {
    match name {
        "start" | "s" => Command::Act(Action::Start(session.question_count())),
        "next" | "n" => Command::Act(Action::Next),
        "prev" | "previous" | "p" => Command::Act(Action::Previous),
        "submit" => Command::Act(Action::Submit),
        "retake" | "r" => Command::Act(Action::Retake),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("Unknown command ':{}', try :help.", other)),
    }
}

fn parse_answer(line: &str, session: &QuizSession) -> Command {
    let Some((question, _)) = session.current() else {
        return Command::Invalid("There is no question to answer.".to_string());
    };
    let input = line.trim();

    let answer = match &question.kind {
        QuestionKind::Mcq { options, .. } => match input.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => AnswerInput::Choose(n - 1),
            _ => {
                return Command::Invalid(format!(
                    "Pick an option between 1 and {}.",
                    options.len()
                ))
            }
        },
        QuestionKind::TrueFalse { .. } => match input.to_ascii_lowercase().as_str() {
            "t" | "true" => AnswerInput::Pick(true),
            "f" | "false" => AnswerInput::Pick(false),
            _ => return Command::Invalid("Answer with t or f.".to_string()),
        },
        QuestionKind::DragDrop {
            draggable_items,
            droppable_targets,
            ..
        } => {
            let words: Vec<&str> = input.split_whitespace().collect();
            let input = match words[..] {
                [lift] if lift.len() > 1 && lift.starts_with('-') => AnswerInput::Unassign {
                    draggable: lift[1..].to_string(),
                },
                [draggable, target] => AnswerInput::Assign {
                    draggable: draggable.to_string(),
                    target: target.to_string(),
                },
                _ => {
                    return Command::Invalid(
                        "Type '<item> <target>' to place an item or '-<item>' to lift it."
                            .to_string(),
                    )
                }
            };

            let known_item = |id: &str| draggable_items.iter().any(|it| it.id == id);
            let known_target = |id: &str| droppable_targets.iter().any(|it| it.id == id);
            let unknown = match &input {
                AnswerInput::Assign { draggable, .. } | AnswerInput::Unassign { draggable }
                    if !known_item(draggable.as_str()) =>
                {
                    Some(format!("There is no item '{}'.", draggable))
                }
                AnswerInput::Assign { target, .. } if !known_target(target.as_str()) => {
                    Some(format!("There is no target '{}'.", target))
                }
                _ => None,
            };
            if let Some(hint) = unknown {
                return Command::Invalid(hint);
            }
            input
        }
        _ => AnswerInput::Text(unescape_newlines(line.trim_end_matches(['\r', '\n']))),
    };

    Command::Act(Action::Answer(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::question::fixtures;
    use crate::data::{Question, QuestionPool};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn on_question(question: Question) -> QuizSession {
        let pool = QuestionPool::new(vec![question]);
        QuizSession::new(QuestionCount::from(1)).reduce(
            Action::Start(QuestionCount::from(1)),
            &pool,
            &mut StdRng::seed_from_u64(0),
        )
    }

    fn answer(input: AnswerInput) -> Command {
        Command::Act(Action::Answer(input))
    }

    #[test]
    fn navigation_commands() {
        let session = QuizSession::default();
        assert_eq!(
            parse(":start", &session),
            Command::Act(Action::Start(QuestionCount::from(10)))
        );
        assert_eq!(parse(" :next ", &session), Command::Act(Action::Next));
        assert_eq!(parse(":prev", &session), Command::Act(Action::Previous));
        assert_eq!(parse(":submit", &session), Command::Act(Action::Submit));
        assert_eq!(parse(":retake", &session), Command::Act(Action::Retake));
        assert_eq!(parse(":help", &session), Command::Help);
        assert_eq!(parse(":q", &session), Command::Quit);
        assert!(matches!(parse(":jump", &session), Command::Invalid(_)));
    }

    #[test]
    fn start_screen_edits_count() {
        let session = QuizSession::default();
        assert_eq!(
            parse("5", &session),
            Command::Act(Action::EditQuestionCount(QuestionCount::from(5)))
        );
        assert_eq!(
            parse("lots", &session),
            Command::Act(Action::EditQuestionCount(QuestionCount::parse("lots")))
        );
        assert_eq!(
            parse("", &session),
            Command::Act(Action::Start(QuestionCount::from(10)))
        );
    }

    #[test]
    fn mcq_options_are_numbered_from_one() {
        let session = on_question(fixtures::mcq("m"));
        assert_eq!(parse("1", &session), answer(AnswerInput::Choose(0)));
        assert_eq!(parse("3", &session), answer(AnswerInput::Choose(2)));
        assert!(matches!(parse("0", &session), Command::Invalid(_)));
        assert!(matches!(parse("4", &session), Command::Invalid(_)));
        assert!(matches!(parse("B", &session), Command::Invalid(_)));
    }

    #[test]
    fn true_false_letters() {
        let session = on_question(fixtures::true_false("t"));
        assert_eq!(parse("t", &session), answer(AnswerInput::Pick(true)));
        assert_eq!(parse("False", &session), answer(AnswerInput::Pick(false)));
        assert!(matches!(parse("yes", &session), Command::Invalid(_)));
    }

    #[test]
    fn drag_drop_place_and_lift() {
        let session = on_question(fixtures::drag_drop("d"));
        assert_eq!(
            parse("d1 t2", &session),
            answer(AnswerInput::Assign {
                draggable: "d1".into(),
                target: "t2".into()
            })
        );
        assert_eq!(
            parse("-d2", &session),
            answer(AnswerInput::Unassign {
                draggable: "d2".into()
            })
        );
        assert!(matches!(parse("d1", &session), Command::Invalid(_)));
        assert!(matches!(parse("d9 t1", &session), Command::Invalid(_)));
        assert!(matches!(parse("d1 t9", &session), Command::Invalid(_)));
        assert!(matches!(parse("-", &session), Command::Invalid(_)));
    }

    #[test]
    fn text_answers_keep_spacing_and_newlines() {
        let session = on_question(fixtures::trace("x"));
        assert_eq!(
            parse("  42\\n43\n", &session),
            answer(AnswerInput::Text("  42\n43".into()))
        );

        let session = on_question(fixtures::fill_in("y"));
        assert_eq!(parse("Vector", &session), answer(AnswerInput::Text("Vector".into())));
    }

    #[test]
    fn results_screen_only_takes_commands() {
        let pool = QuestionPool::new(vec![fixtures::mcq("m")]);
        let mut rng = StdRng::seed_from_u64(0);
        let session = on_question(fixtures::mcq("m")).reduce(Action::Submit, &pool, &mut rng);

        assert!(matches!(parse("1", &session), Command::Invalid(_)));
        assert_eq!(parse(":retake", &session), Command::Act(Action::Retake));
    }
}
