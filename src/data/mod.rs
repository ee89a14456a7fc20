pub mod answer;
pub mod grading;
pub mod question;
pub mod session;

pub use answer::{Answer, AnswerInput, DragMapping};
pub use grading::{grade, GradeReport, QuestionResult};
pub use question::{Item, Question, QuestionKind, QuestionPool};
pub use session::{Action, Phase, QuestionCount, QuizSession};
