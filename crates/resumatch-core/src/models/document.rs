//! Span-annotated résumé documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A résumé with its span annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Raw résumé text.
    pub content: String,

    /// Annotations in source order.
    #[serde(rename = "annotation", default)]
    pub annotations: Vec<Annotation>,
}

impl Document {
    pub fn new(content: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            content: content.into(),
            annotations,
        }
    }

    /// Annotations whose label list is exactly `[label]`.
    pub fn annotations_for<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.annotations.iter().filter(move |a| a.is_label(label))
    }
}

/// A labeled group of spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Label tags; well-formed data carries exactly one.
    #[serde(default)]
    pub label: Vec<String>,

    /// Character spans carrying this label.
    #[serde(default)]
    pub points: Vec<SpanPoint>,
}

impl Annotation {
    /// Create a single-label annotation.
    pub fn new(label: EntityLabel, points: Vec<SpanPoint>) -> Self {
        Self {
            label: vec![label.as_str().to_string()],
            points,
        }
    }

    /// True when the label list is exactly the single element `label`.
    pub fn is_label(&self, label: &str) -> bool {
        matches!(self.label.as_slice(), [only] if only == label)
    }

    /// True when any label tag mentions `needle`.
    pub fn mentions_label(&self, needle: &str) -> bool {
        self.label.iter().any(|l| l.contains(needle))
    }
}

/// One annotated span.
///
/// `text` is authoritative. Offsets are character positions into the
/// document content (end exclusive) and are only consulted when `text`
/// is missing. Offsets that are not non-negative integers read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanPoint {
    #[serde(default, deserialize_with = "lenient_offset", skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,

    #[serde(default, deserialize_with = "lenient_offset", skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

fn lenient_offset<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_u64())
        .and_then(|n| usize::try_from(n).ok()))
}

impl SpanPoint {
    /// Span with literal text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            start: None,
            end: None,
            text: Some(text.into()),
        }
    }

    /// Span with offsets and literal text.
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            text: Some(text.into()),
        }
    }

    /// Check the `start <= end` invariant.
    pub fn is_consistent(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }

    /// Resolve the span text against `content`.
    ///
    /// Falls back to the offset slice only when no literal text is present
    /// and the offsets are consistent. Offsets past the end are clamped.
    pub fn resolve(&self, content: &str) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.clone());
        }

        let (start, end) = (self.start?, self.end?);
        if start > end {
            return None;
        }

        Some(content.chars().skip(start).take(end - start).collect())
    }
}

/// Fixed annotation label vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityLabel {
    #[serde(rename = "Name")]
    Name,
    #[serde(rename = "Skills")]
    Skills,
    #[serde(rename = "Degree")]
    Degree,
    #[serde(rename = "College Name")]
    CollegeName,
    #[serde(rename = "Location")]
    Location,
    #[serde(rename = "Companies worked at")]
    CompaniesWorkedAt,
    #[serde(rename = "Designation")]
    Designation,
}

impl EntityLabel {
    /// Every label, in vocabulary order.
    pub const ALL: [EntityLabel; 7] = [
        EntityLabel::Name,
        EntityLabel::Skills,
        EntityLabel::Degree,
        EntityLabel::CollegeName,
        EntityLabel::Location,
        EntityLabel::CompaniesWorkedAt,
        EntityLabel::Designation,
    ];

    /// Tag string as it appears in annotation data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Skills => "Skills",
            Self::Degree => "Degree",
            Self::CollegeName => "College Name",
            Self::Location => "Location",
            Self::CompaniesWorkedAt => "Companies worked at",
            Self::Designation => "Designation",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown entity label: {s}"))
    }
}
