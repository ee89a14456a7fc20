use rocket::serde::json::Json;
use rocket::State;
use utoipa::ToSchema;

use crate::data::{grade, Answer, GradeReport, Question, QuestionPool};
use crate::resp::problem::{problems, Problem};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    /// `null`, option index, boolean, draggable to target object or text.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub answer: Answer,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GradeRequest {
    pub answers: Vec<SubmittedAnswer>,
}

/// List questions
///
/// Returns `count` randomly drawn questions when `count` is a whole number,
/// every question otherwise.
#[utoipa::path(
    params(
        ("count", description = "number of questions to draw")
    ),
    responses(
        (status = 200, description = "Questions in random order, or the whole pool", body = Vec<Question>),
        (status = 400, description = "Requested zero questions", body = Problem),
        (status = 500, description = "No questions were loaded", body = Problem),
    )
)]
#[get("/questions?<count>")]
#[tracing::instrument(skip(pool))]
pub async fn questions_list(
    count: Option<String>,
    pool: &State<QuestionPool>,
) -> Result<Json<Vec<Question>>, Problem> {
    if pool.is_empty() {
        return Err(problems::no_questions());
    }

    let requested = count
        .as_deref()
        .filter(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_digit()));

    match requested {
        Some(raw) => {
            // All digits, so parsing only fails on overflow.
            let n: usize = raw.parse().unwrap_or(usize::MAX);
            if n == 0 {
                return Err(problems::bad_count(raw));
            }
            Ok(Json(pool.sample(n, &mut rand::thread_rng())))
        }
        None => Ok(Json(pool.questions().to_vec())),
    }
}

/// Grade answers
///
/// Grades each submitted answer against the referenced question.
#[utoipa::path(
    request_body(content = GradeRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Score and per question results", body = GradeReport),
        (status = 400, description = "An answer refers to an unknown question", body = Problem),
    )
)]
#[post("/grade", format = "application/json", data = "<submission>")]
#[tracing::instrument(skip(pool))]
pub async fn grade_submit(
    submission: Json<GradeRequest>,
    pool: &State<QuestionPool>,
) -> Result<Json<GradeReport>, Problem> {
    let GradeRequest { answers: submitted } = submission.into_inner();

    let mut questions = Vec::with_capacity(submitted.len());
    let mut answers = Vec::with_capacity(submitted.len());
    for entry in submitted {
        let question = pool
            .find(&entry.question_id)
            .ok_or_else(|| problems::unknown_question(&entry.question_id))?;
        questions.push(question.clone());
        answers.push(entry.answer);
    }

    let report = grade(&questions, &answers);
    tracing::info!("Graded submission: {} / {}", report.score, report.total());

    Ok(Json(report))
}

#[cfg(test)]
mod question_endpoints {
    use std::collections::HashSet;

    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    use crate::config::Config;
    use crate::data::question::fixtures;
    use crate::data::QuestionPool;

    async fn client(pool: QuestionPool) -> Client {
        let rocket = crate::rocket(Config::default(), pool).expect("valid rocket");
        Client::tracked(rocket).await.expect("invalid backend")
    }

    async fn get_json(client: &Client, uri: &str) -> (Status, Value) {
        let response = client.get(uri.to_string()).dispatch().await;
        let status = response.status();
        let body = response.into_json::<Value>().await.expect("JSON body");
        (status, body)
    }

    #[rocket::async_test]
    async fn all_questions_without_count() {
        let client = client(fixtures::pool(6)).await;

        for uri in ["/api/questions", "/api/questions?count=abc", "/api/questions?count=-2"] {
            let (status, body) = get_json(&client, uri).await;
            assert_eq!(status, Status::Ok, "{}", uri);
            assert_eq!(body.as_array().map(Vec::len), Some(6), "{}", uri);
        }
    }

    #[rocket::async_test]
    async fn count_draws_distinct_questions() {
        let client = client(fixtures::pool(6)).await;

        let (status, body) = get_json(&client, "/api/questions?count=4").await;
        assert_eq!(status, Status::Ok);
        let ids: HashSet<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.len(), 4);

        let (_, body) = get_json(&client, "/api/questions?count=100").await;
        assert_eq!(body.as_array().map(Vec::len), Some(6));
    }

    #[rocket::async_test]
    async fn zero_count_is_a_bad_request() {
        let client = client(fixtures::pool(2)).await;

        let response = client.get("/api/questions?count=0").dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(
            response.content_type(),
            Some(ContentType::new("application", "problem+json"))
        );
    }

    #[rocket::async_test]
    async fn empty_pool_is_a_server_error() {
        let client = client(QuestionPool::default()).await;

        let (status, body) = get_json(&client, "/api/questions").await;
        assert_eq!(status, Status::InternalServerError);
        assert_eq!(body["status"], 500);
    }

    #[rocket::async_test]
    async fn grade_scores_submission() {
        let pool = QuestionPool::new(vec![
            fixtures::mcq("m"),
            fixtures::drag_drop("d"),
            fixtures::fill_in("f"),
        ]);
        let client = client(pool).await;

        let response = client
            .post("/api/grade")
            .header(ContentType::JSON)
            .body(
                json!({
                    "answers": [
                        {"questionId": "m", "answer": 1},
                        {"questionId": "d", "answer": {"d1": "t2", "d2": "t1"}},
                        {"questionId": "f", "answer": " vector "}
                    ]
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(body["score"], 2);
        assert_eq!(body["results"][1]["isCorrect"], false);
        assert_eq!(body["results"][2]["userAnswer"], " vector ");
    }

    #[rocket::async_test]
    async fn grade_rejects_unknown_question() {
        let client = client(fixtures::pool(2)).await;

        let response = client
            .post("/api/grade")
            .header(ContentType::JSON)
            .body(json!({"answers": [{"questionId": "nope", "answer": null}]}).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(body["questionId"], "nope");
    }
}
