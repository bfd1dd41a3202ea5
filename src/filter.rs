//! Per-case duplicate removal and id assignment.
//!
//! A question that occurs more than once inside its group is dropped
//! entirely; every remaining entry gets a dense, case-prefixed id in
//! original order. Groups never influence each other.

use std::collections::{HashMap, HashSet};

use log::{info, warn};
use serde_json::{Map, Value};

use crate::cases::Case;
use crate::errors::{FilterError, Result};
use crate::report::{DroppedQuestion, FilterReport, GroupReport};

/// The whole data file: case groups plus any extra top-level keys.
pub type Document = Map<String, Value>;

#[derive(Debug)]
pub struct GroupOutcome {
    pub entries: Vec<Value>,
    pub report: GroupReport,
}

// Short name of a JSON value's type for error messages
fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Split each item into its question text and its field map.
fn split_entries(case: Case, items: Vec<Value>) -> Result<Vec<(String, Map<String, Value>)>> {
    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let fields = match item {
            Value::Object(fields) => fields,
            other => {
                return Err(FilterError::InvalidEntry {
                    case,
                    index,
                    reason: format!("expected an object, found {}", kind(&other)),
                })
            }
        };
        let question = match fields.get("question") {
            Some(Value::String(q)) => q.clone(),
            Some(other) => {
                return Err(FilterError::InvalidEntry {
                    case,
                    index,
                    reason: format!("'question' must be a string, found {}", kind(other)),
                })
            }
            None => {
                return Err(FilterError::MissingField {
                    field: "question".into(),
                    context: format!("entry {index} of '{}'", case.key()),
                })
            }
        };
        entries.push((question, fields));
    }
    Ok(entries)
}

/// Keep only the entries whose question is unique within `items` and
/// assign them `<prefix>_<k>` ids.
pub fn filter_group(case: Case, items: Vec<Value>) -> Result<GroupOutcome> {
    let entries = split_entries(case, items)?;
    let input = entries.len();

    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(input);
    for (question, _) in &entries {
        *counts.entry(question.as_str()).or_insert(0) += 1;
    }

    let keep: Vec<bool> = entries
        .iter()
        .map(|(question, _)| counts[question.as_str()] == 1)
        .collect();

    let mut reported: HashSet<&str> = HashSet::new();
    let mut dropped_questions = Vec::new();
    for (question, _) in &entries {
        let occurrences = counts[question.as_str()];
        if occurrences > 1 && reported.insert(question.as_str()) {
            warn!("{case}: dropping {occurrences}x {question:?}");
            dropped_questions.push(DroppedQuestion {
                question: question.clone(),
                occurrences,
            });
        }
    }

    let mut kept = Vec::with_capacity(input);
    for ((_, mut fields), keep) in entries.into_iter().zip(keep) {
        if !keep {
            continue;
        }
        // an existing id keeps its position, a new one is appended
        fields.insert("id".into(), Value::String(case.entry_id(kept.len())));
        kept.push(Value::Object(fields));
    }

    let report = GroupReport {
        case,
        input,
        kept: kept.len(),
        dropped: input - kept.len(),
        dropped_questions,
    };
    info!(
        "{case}: {} entries -> {} kept, {} dropped",
        report.input, report.kept, report.dropped
    );

    Ok(GroupOutcome {
        entries: kept,
        report,
    })
}

/// Run [`filter_group`] over the four case groups of `document`.
pub fn process(document: Value) -> Result<(Document, FilterReport)> {
    let mut doc = match document {
        Value::Object(map) => map,
        other => {
            return Err(FilterError::InvalidDocument(format!(
                "top-level JSON must be an object, found {}",
                kind(&other)
            )))
        }
    };

    let mut report = FilterReport::default();
    for case in Case::ALL {
        let items = match doc.get_mut(case.key()) {
            Some(Value::Array(arr)) => std::mem::take(arr),
            Some(other) => {
                return Err(FilterError::InvalidDocument(format!(
                    "'{}' must be an array, found {}",
                    case.key(),
                    kind(other)
                )))
            }
            None => {
                return Err(FilterError::MissingField {
                    field: case.key().into(),
                    context: "document root".into(),
                })
            }
        };

        let outcome = filter_group(case, items)?;
        doc.insert(case.key().into(), Value::Array(outcome.entries));
        report.groups.push(outcome.report);
    }

    Ok((doc, report))
}
