//! Span text lookup by annotation label.

use crate::models::document::{Document, EntityLabel};

/// Collect the trimmed text of every span labeled exactly `label`.
///
/// Spans come back in annotation order, then point order. Empty spans are
/// skipped.
pub fn extract(document: &Document, label: EntityLabel) -> Vec<String> {
    extract_label(document, label.as_str())
}

/// Same as [`extract`] for a raw tag string.
pub fn extract_label(document: &Document, label: &str) -> Vec<String> {
    document
        .annotations_for(label)
        .flat_map(|annotation| annotation.points.iter())
        .filter_map(|point| point.resolve(&document.content))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// First non-blank text among the first points of annotations whose label
/// mentions "Designation".
pub fn first_designation(document: &Document) -> Option<String> {
    document
        .annotations
        .iter()
        .filter(|a| a.mentions_label(EntityLabel::Designation.as_str()))
        .find_map(|a| {
            let text = a.points.first()?.resolve(&document.content)?;
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::category::{RoleCategory, categorize_label};
    use crate::models::document::{Annotation, SpanPoint};
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        Document::new(
            "Jane Doe\nSoftware Engineer\nJava, SQL",
            vec![
                Annotation::new(EntityLabel::Skills, vec![SpanPoint::text("Java")]),
                Annotation::new(EntityLabel::Designation, vec![SpanPoint::new(9, 26, "Software Engineer")]),
                Annotation::new(
                    EntityLabel::Skills,
                    vec![SpanPoint::text("  "), SpanPoint::text(" SQL\n")],
                ),
                Annotation::new(EntityLabel::Name, vec![SpanPoint::new(0, 8, "Jane Doe")]),
            ],
        )
    }

    #[test]
    fn test_extract_preserves_order_and_skips_blank() {
        assert_eq!(extract(&sample(), EntityLabel::Skills), vec!["Java", "SQL"]);
    }

    #[test]
    fn test_extract_requires_exact_label() {
        let mut doc = sample();
        doc.annotations.push(Annotation {
            label: vec!["Skills".to_string(), "Name".to_string()],
            points: vec![SpanPoint::text("Rust")],
        });
        assert_eq!(extract_label(&doc, "Skill"), Vec::<String>::new());
        assert_eq!(extract(&doc, EntityLabel::Skills), vec!["Java", "SQL"]);
    }

    #[test]
    fn test_extract_falls_back_to_offsets() {
        let doc = Document::new(
            "Jane Doe",
            vec![Annotation::new(
                EntityLabel::Name,
                vec![SpanPoint { start: Some(0), end: Some(4), text: None }],
            )],
        );
        assert_eq!(extract(&doc, EntityLabel::Name), vec!["Jane"]);
    }

    #[test]
    fn test_extract_from_document_without_annotations() {
        let doc = Document::new("plain text", vec![]);
        assert!(extract(&doc, EntityLabel::Skills).is_empty());
    }

    #[test]
    fn test_first_designation() {
        assert_eq!(first_designation(&sample()), Some("Software Engineer".to_string()));
        assert_eq!(first_designation(&Document::default()), None);
    }

    #[test]
    fn test_first_designation_skips_blank_annotation() {
        let doc = Document::new(
            "Software Engineer",
            vec![
                Annotation::new(EntityLabel::Designation, vec![SpanPoint::text("  ")]),
                Annotation::new(EntityLabel::Designation, vec![SpanPoint::text("Software Engineer")]),
            ],
        );
        assert_eq!(first_designation(&doc), Some("Software Engineer".to_string()));
        assert_eq!(
            categorize_label(first_designation(&doc).as_deref()),
            RoleCategory::Engineer
        );
    }
}
