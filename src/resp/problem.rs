use std::fmt::{Display, Formatter};
use std::io::Cursor;

use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{response, Request, Response};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Implements [RFC7807](https://tools.ietf.org/html/rfc7807).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Problem {
    #[serde(skip)]
    pub status: Status,
    pub type_uri: String,
    pub title: String,

    pub detail: Option<String>,

    #[schema(value_type = Object)]
    pub body: Map<String, Value>,
}

impl Default for Problem {
    fn default() -> Self {
        Problem {
            status: Status::InternalServerError,
            type_uri: "about:blank".to_string(),
            title: "Problem".to_string(),
            detail: None,
            body: Map::new(),
        }
    }
}

impl Problem {
    pub fn new_untyped(status: Status, title: impl ToString) -> Problem {
        Problem {
            status,
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn detail(&mut self, value: impl ToString) -> &mut Problem {
        self.detail = Some(value.to_string());
        self
    }

    pub fn insert(&mut self, key: impl ToString, value: impl Into<Value>) -> &mut Problem {
        self.body.insert(key.to_string(), value.into());
        self
    }

    /// Full `application/problem+json` document.
    pub fn to_json(&self) -> Value {
        let mut body = self.body.clone();

        // Required by rfc7807
        body.insert("type".to_string(), Value::from(self.type_uri.as_str()));
        body.insert("title".to_string(), Value::from(self.title.as_str()));

        if let Some(detail) = &self.detail {
            body.insert("detail".to_string(), Value::from(detail.as_str()));
        }
        body.insert("status".to_string(), Value::from(self.status.code));

        Value::Object(body)
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.title)
    }
}

impl std::error::Error for Problem {}

impl<'r> Responder<'r, 'static> for Problem {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body_string = self.to_json().to_string();

        Response::build()
            .status(self.status)
            .header(ContentType::new("application", "problem+json"))
            .raw_header("Content-Language", "en")
            .sized_body(body_string.len(), Cursor::new(body_string))
            .ok()
    }
}

pub mod problems {
    use crate::resp::problem::Problem;
    use rocket::http::Status;

    #[inline]
    pub fn no_questions() -> Problem {
        Problem::new_untyped(
            Status::InternalServerError,
            "No questions loaded. Check server logs for parsing errors during startup.",
        )
    }

    #[inline]
    pub fn bad_count(count: &str) -> Problem {
        Problem::new_untyped(Status::BadRequest, "Number of questions must be positive.")
            .insert("count", count)
            .to_owned()
    }

    #[inline]
    pub fn unknown_question(id: &str) -> Problem {
        Problem::new_untyped(Status::BadRequest, "Answer refers to an unknown question.")
            .insert("questionId", id)
            .to_owned()
    }
}
