use std::collections::BTreeMap;

use rocket::serde::json::Json;
use rocket::{Build, Rocket, Route};
use utoipa::OpenApi;

pub mod files;
pub mod questions;

use files::*;
use questions::*;

use crate::{
    data::{GradeReport, Item, Question, QuestionKind, QuestionResult},
    resp::problem::Problem,
};

#[derive(OpenApi)]
#[openapi(
    paths(questions_list, grade_submit),
    components(schemas(
        Question,
        QuestionKind,
        Item,
        GradeRequest,
        SubmittedAnswer,
        GradeReport,
        QuestionResult,
        Problem
    )),
    modifiers(&API_PREFIX)
)]
pub struct ApiDoc;

pub struct PathPrefix(pub &'static str);
static API_PREFIX: PathPrefix = PathPrefix("/api");

impl utoipa::Modify for PathPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut new_paths = BTreeMap::new();

        for (path, item) in std::mem::take(&mut openapi.paths.paths) {
            new_paths.insert(self.0.to_string() + path.as_ref(), item);
        }

        openapi.paths.paths = new_paths;
    }
}

#[get("/openapi.json")]
pub fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn api() -> Vec<Route> {
    routes![questions_list, grade_submit, openapi]
}

pub fn mount_api(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/api", api())
        .mount("/", routes![app, app_path])
}
