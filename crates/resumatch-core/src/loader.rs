//! Lenient loading of annotated documents.
//!
//! Accepts either one JSON array or newline-delimited JSON records. Broken
//! lines and records are reported in [`DocumentBatch::skipped`] and never
//! abort the batch.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::models::document::{Annotation, Document};

/// A record that could not be turned into a document.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Array index, or zero-based line number for newline-delimited input.
    pub index: usize,
    pub reason: ExtractionError,
}

/// Documents loaded from one source.
#[derive(Debug, Clone, Default)]
pub struct DocumentBatch {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedRecord>,
    /// Records kept with a degraded annotation list, as `(index, message)`.
    pub warnings: Vec<(usize, String)>,
}

impl DocumentBatch {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Append another batch, keeping its indices as they are.
    pub fn extend(&mut self, other: DocumentBatch) {
        self.documents.extend(other.documents);
        self.skipped.extend(other.skipped);
        self.warnings.extend(other.warnings);
    }
}

/// Read and parse a document file. Invalid UTF-8 is replaced, not fatal.
pub fn load_documents(path: &Path) -> Result<DocumentBatch> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let batch = parse_documents(&text);

    info!(
        "Loaded {} documents from {} ({} skipped)",
        batch.documents.len(),
        path.display(),
        batch.skipped.len()
    );

    Ok(batch)
}

/// Parse a JSON array or newline-delimited JSON text into documents.
pub fn parse_documents(text: &str) -> DocumentBatch {
    let trimmed = text.trim_start();

    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(values) => return collect(values.into_iter().enumerate()),
            Err(e) => debug!("Input is not a JSON array ({}), reading line by line", e),
        }
    }

    let mut batch = DocumentBatch::default();
    let mut values = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(value) => values.push((index, value)),
            Err(e) => {
                warn!("Skipping line {}: {}", index, e);
                batch.skipped.push(SkippedRecord {
                    index,
                    reason: ExtractionError::InvalidJson(e.to_string()),
                });
            }
        }
    }

    batch.extend(collect(values));
    batch
}

fn collect(values: impl IntoIterator<Item = (usize, Value)>) -> DocumentBatch {
    let mut batch = DocumentBatch::default();

    for (index, value) in values {
        match document_from_value(value) {
            Ok((document, warning)) => {
                if let Some(message) = warning {
                    warn!("Record {}: {}", index, message);
                    batch.warnings.push((index, message));
                }
                batch.documents.push(document);
            }
            Err(reason) => {
                warn!("Skipping record {}: {}", index, reason);
                batch.skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    batch
}

/// Convert one JSON record into a document.
///
/// A record needs a string `content`. An `annotation` field that is not a
/// well-formed list of annotation objects degrades to no annotations and a
/// warning message.
pub fn document_from_value(value: Value) -> std::result::Result<(Document, Option<String>), ExtractionError> {
    let Value::Object(mut map) = value else {
        return Err(ExtractionError::NotAnObject);
    };

    let content = match map.remove("content") {
        Some(Value::String(content)) => content,
        _ => return Err(ExtractionError::MissingContent),
    };

    let (annotations, warning) = match map.remove("annotation") {
        None | Some(Value::Null) => (Vec::new(), None),
        Some(Value::Array(items)) => parse_annotations(items),
        Some(other) => (
            Vec::new(),
            Some(format!("malformed annotations ignored: expected a list, got {other}")),
        ),
    };

    Ok((Document::new(content, annotations), warning))
}

/// Keep every well-formed annotation; report the rest in one message.
fn parse_annotations(items: Vec<Value>) -> (Vec<Annotation>, Option<String>) {
    let mut annotations = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Annotation>(item) {
            Ok(annotation) => annotations.push(annotation),
            Err(e) => errors.push(format!("#{position}: {e}")),
        }
    }

    let warning = (!errors.is_empty())
        .then(|| format!("malformed annotations ignored: {}", errors.join("; ")));
    (annotations, warning)
}
