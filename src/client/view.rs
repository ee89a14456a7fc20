use std::fmt::{self, Display, Formatter, Write};

use super::App;
use crate::data::answer::describe;
use crate::data::{Answer, GradeReport, Phase, Question, QuestionKind, QuizSession};

/// Text rendering of whatever the app is showing.
pub struct Screen<'a>(pub &'a App);

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            App::Loading => writeln!(f, "Loading quiz..."),
            App::Failed(message) => writeln!(f, "{}", message),
            App::Ready { pool, session } => match session.phase() {
                Phase::NotStarted => start(f, session, pool.len()),
                Phase::InProgress => in_progress(f, session),
                Phase::Results => match session.report() {
                    Some(report) => results(f, report),
                    None => Ok(()),
                },
            },
        }
    }
}

fn start(f: &mut Formatter<'_>, session: &QuizSession, available: usize) -> fmt::Result {
    writeln!(f, "Test your knowledge on Linear Algebra concepts from the course materials!")?;
    writeln!(f)?;
    writeln!(f, "{} questions available.", available)?;
    match session.question_count().value() {
        Some(n) => writeln!(f, "Number of questions to ask: {}", n)?,
        None => writeln!(f, "Number of questions to ask: (not a number)")?,
    }
    if session.validation_error() {
        writeln!(f, "Please enter a number between 1 and {}.", available)?;
    }
    writeln!(f)?;
    writeln!(f, "Type a number to change it, press Enter or :start to begin.")
}

fn in_progress(f: &mut Formatter<'_>, session: &QuizSession) -> fmt::Result {
    let Some((question, answer)) = session.current() else {
        return Ok(());
    };

    write!(
        f,
        "Question {} of {}",
        session.current_index() + 1,
        session.questions().len()
    )?;
    if let Some(difficulty) = &question.difficulty {
        write!(f, " [{}]", difficulty)?;
    }
    writeln!(f)?;
    writeln!(f)?;
    writeln!(f, "{}", question.question)?;
    writeln!(f)?;

    answer_widget(f, question, answer)?;

    let mut commands = Vec::new();
    if session.can_go_previous() {
        commands.push(":prev");
    }
    if session.can_go_next() {
        commands.push(":next");
    }
    if session.can_submit() {
        commands.push(":submit");
    }
    commands.extend([":help", ":quit"]);

    writeln!(f)?;
    writeln!(f, "{}", commands.join("  "))
}

fn answer_widget(f: &mut Formatter<'_>, question: &Question, answer: &Answer) -> fmt::Result {
    match &question.kind {
        QuestionKind::Mcq { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                let mark = marker(*answer == Answer::Choice(i));
                writeln!(f, "  {}. {} {}", i + 1, mark, option)?;
            }
            Ok(())
        }
        QuestionKind::TrueFalse { .. } => {
            writeln!(f, "  t. {} True", marker(*answer == Answer::Bool(true)))?;
            writeln!(f, "  f. {} False", marker(*answer == Answer::Bool(false)))
        }
        QuestionKind::DragDrop {
            draggable_items,
            droppable_targets,
            ..
        } => {
            let mapping = answer.mapping();
            writeln!(f, "Items:")?;
            for item in draggable_items {
                match mapping.and_then(|m| m.target_of(&item.id)) {
                    Some(target) => writeln!(f, "  {}: {} → {}", item.id, item.text, target)?,
                    None => writeln!(f, "  {}: {}", item.id, item.text)?,
                }
            }
            writeln!(f, "Targets:")?;
            for target in droppable_targets {
                match mapping.and_then(|m| m.draggable_at(&target.id)) {
                    Some(item) => writeln!(f, "  {}: {} ← {}", target.id, target.text, item)?,
                    None => writeln!(f, "  {}: {}", target.id, target.text)?,
                }
            }
            Ok(())
        }
        QuestionKind::FillInTheBlank {
            placeholder_text, ..
        } => {
            if let Some(hint) = placeholder_text {
                writeln!(f, "({})", hint)?;
            }
            text_answer(f, "Your answer", answer)
        }
        QuestionKind::TraceTheOutput { code_snippet, .. } => {
            block(f, code_snippet)?;
            text_answer(f, "Your output", answer)
        }
        QuestionKind::WriteFullCode { code_snippet, .. } => {
            if let Some(code) = code_snippet {
                block(f, code)?;
            }
            text_answer(f, "Your code", answer)
        }
    }
}

fn results(f: &mut Formatter<'_>, report: &GradeReport) -> fmt::Result {
    writeln!(f, "Quiz Results")?;
    writeln!(f)?;
    writeln!(f, "Your Score: {} / {}", report.score, report.total())?;
    writeln!(
        f,
        "You answered {}% of questions correctly.",
        report.percent()
    )?;

    for (i, result) in report.results.iter().enumerate() {
        let question = &result.question;
        writeln!(f)?;
        writeln!(
            f,
            "{}. [{}] {}",
            i + 1,
            if result.is_correct { "correct" } else { "incorrect" },
            question.question
        )?;
        writeln!(f, "   Your answer: {}", indent(&describe(question, &result.user_answer)))?;

        if let QuestionKind::WriteFullCode { .. } = question.kind {
            writeln!(
                f,
                "   Reference solution: {}",
                indent(&question.correct_answer_text())
            )?;
        } else if !result.is_correct {
            writeln!(
                f,
                "   Correct answer: {}",
                indent(&question.correct_answer_text())
            )?;
        }

        if !question.explanation.is_empty() {
            writeln!(f, "   Explanation: {}", question.explanation)?;
        }
    }

    writeln!(f)?;
    writeln!(f, "Type :retake to take another quiz or :quit to exit.")
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "(x)"
    } else {
        "( )"
    }
}

fn block(f: &mut Formatter<'_>, code: &str) -> fmt::Result {
    for line in code.lines() {
        writeln!(f, "    {}", line)?;
    }
    writeln!(f)
}

fn text_answer(f: &mut Formatter<'_>, label: &str, answer: &Answer) -> fmt::Result {
    match answer.text() {
        Some(text) if !text.is_empty() => writeln!(f, "{}: {}", label, indent(text)),
        _ => writeln!(f, "{}: (empty)", label),
    }
}

/// Continuation lines of a multi-line value, aligned under the results labels.
fn indent(text: &str) -> String {
    let mut out = String::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            let _ = write!(out, "      {}", line);
        } else {
            out.push_str(line);
        }
    }
    out
}
