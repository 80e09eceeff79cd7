//! Coarse role categories derived from designation strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role bucket for a résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleCategory {
    Engineer,
    Analyst,
    Consultant,
    Manager,
    Educator,
    Other,
}

/// Keyword rules, checked top to bottom.
const ROLE_RULES: &[(&[&str], RoleCategory)] = &[
    (&["engineer", "developer", "programmer"], RoleCategory::Engineer),
    (&["analyst", "scientist", "bi"], RoleCategory::Analyst),
    (&["consultant", "advisor", "specialist"], RoleCategory::Consultant),
    (&["manager", "lead", "head"], RoleCategory::Manager),
    (&["teacher", "professor", "lecturer"], RoleCategory::Educator),
];

impl RoleCategory {
    /// Every category, `Other` last.
    pub const ALL: [RoleCategory; 6] = [
        RoleCategory::Engineer,
        RoleCategory::Analyst,
        RoleCategory::Consultant,
        RoleCategory::Manager,
        RoleCategory::Educator,
        RoleCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineer => "Engineer",
            Self::Analyst => "Analyst",
            Self::Consultant => "Consultant",
            Self::Manager => "Manager",
            Self::Educator => "Educator",
            Self::Other => "Other",
        }
    }

    /// Stable class index, used as a classifier label.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(Self::ALL.len() - 1)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Self::Other)
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw designation to its role category.
///
/// Matching is a case-insensitive substring test; the first rule with any
/// hit wins. Missing, empty, or unmatched labels are `Other`.
pub fn categorize_label(label: Option<&str>) -> RoleCategory {
    let Some(label) = label.filter(|l| !l.trim().is_empty()) else {
        return RoleCategory::Other;
    };

    let label = label.to_lowercase();
    ROLE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| label.contains(kw)))
        .map(|(_, category)| *category)
        .unwrap_or(RoleCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        assert_eq!(categorize_label(Some("Software Engineer")), RoleCategory::Engineer);
        assert_eq!(categorize_label(Some("Team Lead")), RoleCategory::Manager);
        assert_eq!(categorize_label(Some("Data Scientist")), RoleCategory::Analyst);
        assert_eq!(categorize_label(Some("Senior Associate Consultant")), RoleCategory::Consultant);
        assert_eq!(categorize_label(Some("Assistant Professor")), RoleCategory::Educator);
    }

    #[test]
    fn test_missing_or_unmatched_is_other() {
        assert_eq!(categorize_label(Some("")), RoleCategory::Other);
        assert_eq!(categorize_label(Some("   ")), RoleCategory::Other);
        assert_eq!(categorize_label(None), RoleCategory::Other);
        assert_eq!(categorize_label(Some("Chef")), RoleCategory::Other);
    }

    #[test]
    fn test_engineer_rule_precedes_manager_rule() {
        // "lead" is a Manager keyword, but the Engineer rule is checked first.
        assert_eq!(categorize_label(Some("Lead Software Engineer")), RoleCategory::Engineer);
        assert_eq!(categorize_label(Some("Engineering Manager")), RoleCategory::Engineer);
    }

    #[test]
    fn test_analyst_rule_precedes_manager_rule() {
        assert_eq!(categorize_label(Some("Lead Analyst")), RoleCategory::Analyst);
    }

    #[test]
    fn test_substring_matching_is_loose() {
        // "bi" inside "mobile" hits the Analyst rule before anything else.
        assert_eq!(categorize_label(Some("Mobile Team Head")), RoleCategory::Analyst);
    }

    #[test]
    fn test_index_round_trip() {
        for category in RoleCategory::ALL {
            assert_eq!(RoleCategory::from_index(category.index()), category);
        }
    }
}
