//! Question bank loading from CSV.
//!
//! Columns: `id,type,difficulty,question,explanation,options,correct_answer`.
//! The meaning of `options` and `correct_answer` depends on the question type.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::{Item, Question, QuestionKind};
use crate::error::{LoadError, RowError};

pub const REQUIRED_COLUMNS: [&str; 5] = ["id", "type", "difficulty", "question", "explanation"];

#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    difficulty: String,
    question: String,
    explanation: String,
    #[serde(default)]
    options: String,
    #[serde(default)]
    correct_answer: String,
}

pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<Question>, LoadError> {
    let file = std::fs::File::open(path.as_ref())?;
    read_questions(file)
}

/// Reads every well-formed row. Malformed rows are logged and skipped.
pub fn read_questions<R: Read>(source: R) -> Result<Vec<Question>, LoadError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader.headers()?.clone();
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut questions = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(it) => it,
            Err(e) => {
                tracing::warn!("Unable to read question bank record: {}", e);
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        match parse_record(&record, &headers) {
            Ok(question) => questions.push(question),
            Err(e) => tracing::warn!(
                "Skipping question on line {} (ID: {}): {}",
                line,
                record_id(&record, &headers),
                e
            ),
        }
    }

    if questions.is_empty() {
        tracing::warn!("No questions were loaded from the question bank.");
    }

    Ok(questions)
}

fn record_id<'a>(record: &'a StringRecord, headers: &StringRecord) -> &'a str {
    headers
        .iter()
        .position(|h| h == "id")
        .and_then(|i| record.get(i))
        .unwrap_or("N/A")
}

fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<Question, RowError> {
    let row: QuestionRow = record.deserialize(Some(headers))?;
    row.try_into()
}

impl TryFrom<QuestionRow> for Question {
    type Error = RowError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let kind = match row.kind.as_str() {
            "mcq" => {
                if row.options.is_empty() {
                    return Err(RowError::Missing {
                        kind: "mcq",
                        field: "options",
                    });
                }
                let correct_answer_index = row
                    .correct_answer
                    .trim()
                    .parse()
                    .map_err(|_| RowError::BadIndex(row.correct_answer.clone()))?;
                QuestionKind::Mcq {
                    options: row.options.split('|').map(str::to_string).collect(),
                    correct_answer_index,
                }
            }
            "true_false" => match row.correct_answer.trim().to_lowercase().as_str() {
                "true" => QuestionKind::TrueFalse {
                    correct_answer: true,
                },
                "false" => QuestionKind::TrueFalse {
                    correct_answer: false,
                },
                _ => return Err(RowError::BadBool(row.correct_answer)),
            },
            "drag_drop" => parse_drag_drop(&row.options)?,
            "fill_in_the_blank" => {
                if row.correct_answer.is_empty() {
                    return Err(RowError::Missing {
                        kind: "fill_in_the_blank",
                        field: "correct_answer",
                    });
                }
                QuestionKind::FillInTheBlank {
                    correct_answer: row.correct_answer,
                    placeholder_text: non_empty(row.options),
                }
            }
            "trace_the_output" => {
                if row.options.is_empty() {
                    return Err(RowError::Missing {
                        kind: "trace_the_output",
                        field: "options",
                    });
                }
                if row.correct_answer.is_empty() {
                    return Err(RowError::Missing {
                        kind: "trace_the_output",
                        field: "correct_answer",
                    });
                }
                QuestionKind::TraceTheOutput {
                    code_snippet: row.options,
                    correct_output: row.correct_answer,
                }
            }
            "write_full_code" => {
                if row.correct_answer.is_empty() {
                    return Err(RowError::Missing {
                        kind: "write_full_code",
                        field: "correct_answer",
                    });
                }
                QuestionKind::WriteFullCode {
                    code_snippet: non_empty(row.options),
                    correct_code_solution: row.correct_answer,
                }
            }
            other => return Err(RowError::UnknownType(other.to_string())),
        };

        Ok(Question {
            id: row.id,
            difficulty: non_empty(row.difficulty),
            question: row.question,
            explanation: row.explanation,
            kind,
        })
    }
}

#[inline]
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `draggables;targets;mapping`, each a `|` separated list of `key:value` pairs.
fn parse_drag_drop(options: &str) -> Result<QuestionKind, RowError> {
    if options.is_empty() {
        return Err(RowError::Missing {
            kind: "drag_drop",
            field: "options",
        });
    }

    let parts: Vec<&str> = options.split(';').collect();
    let [draggables, targets, mapping] = parts[..] else {
        return Err(RowError::DragDropParts(parts.len()));
    };

    let draggable_items = parse_items(draggables)?;
    let droppable_targets = parse_items(targets)?;

    if mapping.is_empty() {
        return Err(RowError::Missing {
            kind: "drag_drop",
            field: "correct mapping",
        });
    }
    let mut correct_mapping = BTreeMap::new();
    for pair in mapping.split('|') {
        let (draggable, target) =
            split_pair(pair).ok_or_else(|| RowError::BadMapping(pair.to_string()))?;
        correct_mapping.insert(draggable.to_string(), target.to_string());
    }

    Ok(QuestionKind::DragDrop {
        draggable_items,
        droppable_targets,
        correct_mapping,
    })
}

fn parse_items(list: &str) -> Result<Vec<Item>, RowError> {
    if list.is_empty() {
        return Ok(Vec::new());
    }
    list.split('|')
        .map(|raw| {
            split_pair(raw)
                .map(|(id, text)| Item::new(id, text))
                .ok_or_else(|| RowError::BadItem(raw.to_string()))
        })
        .collect()
}

fn split_pair(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(':')
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
}
