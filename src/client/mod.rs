//! Terminal front-end: fetches the question pool once and drives a
//! [`QuizSession`] from typed commands.

use rand::Rng;
use tracing_futures::Instrument;

use crate::data::{Action, Question, QuestionCount, QuestionPool, QuizSession};
use crate::error::FetchError;

pub mod command;
pub mod view;

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load quiz questions. Please try again later.";

#[derive(Debug, Clone)]
pub enum App {
    /// Question fetch outstanding. No quiz actions are accepted.
    Loading,
    /// Terminal for this run.
    Failed(String),
    Ready {
        pool: QuestionPool,
        session: QuizSession,
    },
}

impl App {
    pub fn loaded(result: Result<Vec<Question>, FetchError>, count: QuestionCount) -> App {
        match result {
            Ok(questions) => App::Ready {
                pool: questions.into(),
                session: QuizSession::new(count),
            },
            Err(e) => {
                tracing::error!("Could not fetch questions: {}", e);
                App::Failed(LOAD_FAILURE_MESSAGE.to_string())
            }
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match self {
            App::Ready { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn dispatch<R: Rng + ?Sized>(self, action: Action, rng: &mut R) -> App {
        match self {
            App::Ready { pool, session } => {
                let session = session.reduce(action, &pool, rng);
                App::Ready { pool, session }
            }
            other => {
                tracing::debug!("Ignoring {:?}, questions aren't available.", action);
                other
            }
        }
    }
}

/// Fetches the whole question pool from `{api_url}/api/questions`.
pub async fn fetch_questions(
    client: &reqwest::Client,
    api_url: &str,
) -> Result<Vec<Question>, FetchError> {
    let url = format!("{}/api/questions", api_url.trim_end_matches('/'));
    let span = tracing::info_span!("fetch_questions", url = %url);

    async {
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let questions: Vec<Question> = response.json().await?;
        if questions.is_empty() {
            return Err(FetchError::Empty);
        }

        tracing::info!("Fetched {} questions.", questions.len());
        Ok(questions)
    }
    .instrument(span)
    .await
}
