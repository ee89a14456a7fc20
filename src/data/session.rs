//! Quiz session lifecycle.
//!
//! A [`QuizSession`] moves `NotStarted → InProgress → Results → NotStarted`.
//! Every user interaction is an [`Action`] fed to [`QuizSession::reduce`],
//! which consumes the current state and returns the next one. Actions that
//! aren't available in the current state leave it unchanged.

use rand::Rng;

use super::answer::{capture, Answer, AnswerInput};
use super::grading::{grade, GradeReport};
use super::question::{Question, QuestionPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Results,
}

/// Number of questions requested by the user, as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCount(Option<i64>);

impl QuestionCount {
    /// Anything that isn't a whole number is kept as "not a number".
    pub fn parse(input: &str) -> QuestionCount {
        QuestionCount(input.trim().parse().ok())
    }

    pub fn value(&self) -> Option<i64> {
        self.0
    }

    /// The count if it is within `1..=available`.
    pub fn valid_for(&self, available: usize) -> Option<usize> {
        self.0
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| (1..=available).contains(n))
    }
}

impl From<usize> for QuestionCount {
    fn from(value: usize) -> Self {
        QuestionCount(i64::try_from(value).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditQuestionCount(QuestionCount),
    Start(QuestionCount),
    Previous,
    Next,
    Answer(AnswerInput),
    Submit,
    Retake,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: Phase,
    question_count: QuestionCount,
    validation_error: bool,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    current: usize,
    report: Option<GradeReport>,
}

impl QuizSession {
    pub fn new(question_count: QuestionCount) -> QuizSession {
        QuizSession {
            phase: Phase::NotStarted,
            question_count,
            validation_error: false,
            questions: Vec::new(),
            answers: Vec::new(),
            current: 0,
            report: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question_count(&self) -> QuestionCount {
        self.question_count
    }

    /// Set when a start was refused because of an out of range count.
    pub fn validation_error(&self) -> bool {
        self.validation_error
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question on screen together with its answer slot.
    pub fn current(&self) -> Option<(&Question, &Answer)> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.questions.get(self.current).zip(self.answers.get(self.current))
    }

    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    pub fn can_go_previous(&self) -> bool {
        self.phase == Phase::InProgress && self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.phase == Phase::InProgress && self.current + 1 < self.questions.len()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::InProgress && self.current + 1 == self.questions.len()
    }

    pub fn reduce<R: Rng + ?Sized>(
        mut self,
        action: Action,
        pool: &QuestionPool,
        rng: &mut R,
    ) -> QuizSession {
        match (self.phase, action) {
            (Phase::NotStarted, Action::EditQuestionCount(count)) => {
                self.question_count = count;
                if count.valid_for(pool.len()).is_some() {
                    self.validation_error = false;
                }
                self
            }
            (Phase::NotStarted, Action::Start(count)) => self.start(count, pool, rng),
            (Phase::InProgress, Action::Previous) if self.can_go_previous() => {
                self.current -= 1;
                self
            }
            (Phase::InProgress, Action::Next) if self.can_go_next() => {
                self.current += 1;
                self
            }
            (Phase::InProgress, Action::Answer(input)) => {
                let i = self.current;
                match capture(&self.questions[i].kind, &self.answers[i], input) {
                    Some(answer) => self.answers[i] = answer,
                    None => tracing::debug!(
                        "Ignoring answer input not fitting {} question {}.",
                        self.questions[i].kind.name(),
                        self.questions[i].id
                    ),
                }
                self
            }
            (Phase::InProgress, Action::Submit) if self.can_submit() => {
                let report = grade(&self.questions, &self.answers);
                tracing::info!("Quiz submitted: {} / {}", report.score, report.total());
                self.report = Some(report);
                self.phase = Phase::Results;
                self
            }
            (Phase::Results, Action::Retake) => QuizSession::new(self.question_count),
            (phase, action) => {
                tracing::debug!("Action {:?} isn't available in {:?}.", action, phase);
                self
            }
        }
    }

    fn start<R: Rng + ?Sized>(
        mut self,
        count: QuestionCount,
        pool: &QuestionPool,
        rng: &mut R,
    ) -> QuizSession {
        self.question_count = count;

        let Some(n) = count.valid_for(pool.len()) else {
            tracing::debug!(
                "Refusing to start with {:?} of {} questions.",
                count.value(),
                pool.len()
            );
            self.validation_error = true;
            return self;
        };

        self.questions = pool.sample(n, rng);
        self.answers = self
            .questions
            .iter()
            .map(|q| Answer::empty_for(&q.kind))
            .collect();
        self.current = 0;
        self.validation_error = false;
        self.report = None;
        self.phase = Phase::InProgress;

        tracing::debug!("Started quiz with {} questions.", n);
        self
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        QuizSession::new(QuestionCount::from(10))
    }
}
