use std::io::{self, BufRead, Write};

use quizdeck::client::command::{self, Command, HELP};
use quizdeck::client::view::Screen;
use quizdeck::client::{fetch_questions, App};
use quizdeck::config::Config;
use quizdeck::data::QuestionCount;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quizdeck::init_tracing(Level::WARN);

    if dotenv::dotenv().is_err() {
        tracing::debug!("No .env file loaded.");
    }

    let c = Config::load().unwrap_or_else(|e| {
        tracing::debug!("Using default configuration: {}", e);
        Config::default()
    });

    let mut out = io::stdout();
    write!(out, "{}", Screen(&App::Loading))?;
    out.flush()?;

    let http = reqwest::Client::new();
    let fetched = fetch_questions(&http, &c.api_url).await;
    let mut app = App::loaded(fetched, QuestionCount::from(c.default_question_count));
    let mut rng = rand::thread_rng();

    writeln!(out)?;
    write!(out, "{}", Screen(&app))?;
    if matches!(app, App::Failed(_)) {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let Some(session) = app.session() else {
            break;
        };
        match command::parse(&line, session) {
            Command::Act(action) => {
                app = app.dispatch(action, &mut rng);
                writeln!(out)?;
                write!(out, "{}", Screen(&app))?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
            Command::Invalid(hint) => writeln!(out, "{}", hint)?,
        }
    }

    Ok(())
}
