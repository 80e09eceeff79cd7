//! Flat rows for tabular export of extracted records.

use serde::{Deserialize, Serialize};

use crate::models::record::ExtractedRecord;

const LIST_SEPARATOR: &str = "; ";

/// One `(skill, designation)` pair of a record with the other fields joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub document: usize,
    pub skill: String,
    pub designation: String,
    pub names: String,
    pub degrees: String,
    pub colleges: String,
    pub locations: String,
    pub companies: String,
    pub experience_years: Option<f64>,
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items.into_iter().map(String::as_str).collect::<Vec<_>>().join(LIST_SEPARATOR)
}

/// Explode records into one row per skill × designation.
///
/// An empty skill or designation set still yields rows, with an empty cell,
/// so every record appears at least once.
pub fn export_rows(records: &[ExtractedRecord]) -> Vec<ExportRow> {
    let blank = [String::new()];
    let mut rows = Vec::new();

    for (document, record) in records.iter().enumerate() {
        let skills: Vec<&String> = if record.skills.is_empty() {
            blank.iter().collect()
        } else {
            record.skills.iter().collect()
        };
        let designations: Vec<&String> = if record.designations.is_empty() {
            blank.iter().collect()
        } else {
            record.designations.iter().collect()
        };

        let names = join(&record.names);
        let degrees = join(&record.degrees);
        let colleges = join(&record.colleges);
        let locations = join(&record.locations);
        let companies = join(&record.companies);

        for skill in &skills {
            for designation in &designations {
                rows.push(ExportRow {
                    document,
                    skill: (*skill).clone(),
                    designation: (*designation).clone(),
                    names: names.clone(),
                    degrees: degrees.clone(),
                    colleges: colleges.clone(),
                    locations: locations.clone(),
                    companies: companies.clone(),
                    experience_years: record.experience_years,
                });
            }
        }
    }

    rows
}
