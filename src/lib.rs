#[macro_use]
extern crate rocket;
#[macro_use]
extern crate serde;

use error::BackendError;
use rocket::http::Method;
use rocket::Rocket;
use rocket_cors::{AllowedHeaders, AllowedOrigins};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::data::question::bank;
use crate::data::QuestionPool;
use crate::route::mount_api;

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod resp;
pub mod route;
pub mod util;

/// Installs the global `tracing` subscriber, writing to stderr, and forwards
/// `log` records of dependencies into it.
pub fn init_tracing(level: Level) {
    if let Err(err) = tracing_log::LogTracer::init() {
        eprintln!("Unable to forward log records: {}", err);
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global logger: {}", err);
    };
}

/// Loads the question bank. A missing or unreadable bank leaves the pool empty.
pub fn load_pool(c: &Config) -> QuestionPool {
    tracing::info!("Loading questions from '{}'...", c.questions_file.display());
    match bank::load_questions(&c.questions_file) {
        Ok(questions) => {
            tracing::info!("Loaded {} questions.", questions.len());
            questions.into()
        }
        Err(e) => {
            tracing::error!(
                "Unable to load questions from '{}': {}",
                c.questions_file.display(),
                e
            );
            QuestionPool::default()
        }
    }
}

pub fn create(log_level: Option<Level>) -> Result<Rocket<rocket::Build>, BackendError> {
    if let Some(l) = log_level {
        init_tracing(l);
    }

    tracing::info!("Reading .env file...");
    if dotenv::dotenv().is_err() {
        tracing::warn!("Unable to load .env file.");
    }

    tracing::info!("Loading configuration...");
    let c = Config::load_or_create()?;

    let pool = load_pool(&c);

    rocket(c, pool)
}

/// Server with the given configuration and question pool, routes mounted.
pub fn rocket(c: Config, pool: QuestionPool) -> Result<Rocket<rocket::Build>, BackendError> {
    tracing::info!("Starting HTTP server...");
    let mut r = rocket::build().manage(c).manage(pool);

    tracing::info!("Setting up CORS...");
    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: vec![Method::Get, Method::Post]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: AllowedHeaders::All,
        ..Default::default()
    }
    .to_cors()?;

    r = r.attach(cors);
    r = mount_api(r);

    Ok(r)
}
