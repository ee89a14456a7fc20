use crate::error::ConfigurationError;
use crate::util;
use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn default_questions_file() -> PathBuf {
    PathBuf::from(env::var("QUESTIONS_FILE").unwrap_or("./questions.csv".to_string()))
}

fn default_public_content() -> PathBuf {
    PathBuf::from(env::var("PUBLIC_CONTENT_PATH").unwrap_or("./public".to_string()))
}

fn default_api_url() -> String {
    env::var("QUIZ_API_URL").unwrap_or("http://localhost:8000".to_string())
}

fn default_question_count() -> usize {
    env::var("DEFAULT_QUESTION_COUNT")
        .ok()
        .and_then(|it| it.parse().ok())
        .unwrap_or(10)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    file_path: PathBuf,

    /// CSV question bank served by the server.
    #[serde(default = "default_questions_file")]
    pub questions_file: PathBuf,
    #[serde(default = "default_public_content")]
    pub public_content: PathBuf,

    /// Base URL the terminal client fetches questions from.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_question_count")]
    pub default_question_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: config_dir().join("settings.yml"),
            questions_file: default_questions_file(),
            public_content: default_public_content(),
            api_url: default_api_url(),
            default_question_count: default_question_count(),
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or("./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        Config::load_from(config_dir())
    }

    pub fn load_from(dir: impl AsRef<Path>) -> Result<Config, ConfigurationError> {
        let config_file = util::find_first_subpath(
            dir.as_ref(),
            &["settings.yml", "settings.yaml"],
            Path::exists,
        )
        .ok_or_else(|| ConfigurationError::NotFound(dir.as_ref().to_path_buf()))?;

        let file = File::open(&config_file)?;
        let mut config: Config = serde_yaml::from_reader(BufReader::new(file))?;
        config.file_path = config_file;

        Ok(config)
    }

    /// Loads the configuration, writing out the defaults if there is none yet.
    pub fn load_or_create() -> Result<Config, ConfigurationError> {
        Config::load_or_create_in(config_dir())
    }

    pub fn load_or_create_in(dir: impl AsRef<Path>) -> Result<Config, ConfigurationError> {
        match Config::load_from(dir.as_ref()) {
            Ok(c) => {
                tracing::info!("Configuration loaded.");
                Ok(c)
            }
            Err(ConfigurationError::NotFound(dir)) => {
                tracing::info!("No configuration in '{}', using defaults.", dir.display());
                let c = Config {
                    file_path: dir.join("settings.yml"),
                    ..Default::default()
                };
                if let Err(e) = c.save() {
                    tracing::warn!("Unable to save generated configuration: {}", e);
                }
                Ok(c)
            }
            Err(other) => {
                tracing::error!("Configuration error: {}", other);
                Err(other)
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigurationError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.file_path)?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("quizdeck-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = scratch_dir("missing");
        assert!(matches!(
            Config::load_from(&dir),
            Err(ConfigurationError::NotFound(_))
        ));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = scratch_dir("partial");
        fs::write(
            dir.join("settings.yaml"),
            "questions_file: /srv/quiz/bank.csv\ndefault_question_count: 5\n",
        )
        .unwrap();

        let config = Config::load_from(&dir).expect("config should load");
        assert_eq!(config.questions_file, PathBuf::from("/srv/quiz/bank.csv"));
        assert_eq!(config.default_question_count, 5);
        assert!(!config.api_url.is_empty());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = scratch_dir("saved");
        let mut config = Config::default();
        config.file_path = dir.join("settings.yml");
        config.api_url = "http://quiz.example:9000".to_string();
        config.save().unwrap();

        let loaded = Config::load_from(&dir).unwrap();
        assert_eq!(loaded.api_url, "http://quiz.example:9000");
    }

    #[test]
    fn defaults_are_written_when_missing() {
        let dir = scratch_dir("created").join("nested");
        let _ = fs::remove_dir_all(&dir);

        let created = Config::load_or_create_in(&dir).expect("defaults");
        let written = dir.join("settings.yml");
        assert!(written.exists());

        let text = fs::read_to_string(&written).unwrap();
        assert!(text.contains("questions_file:"));
        assert!(text.contains("default_question_count:"));

        let loaded = Config::load_or_create_in(&dir).unwrap();
        assert_eq!(loaded.api_url, created.api_url);
        assert_eq!(loaded.questions_file, created.questions_file);
        assert_eq!(loaded.default_question_count, created.default_question_count);
    }
}
