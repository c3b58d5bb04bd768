//! Item dataset validation: structural checks on the catalog document before
//! it is trusted by the aggregator. Produces a severity-tagged report rather
//! than failing on the first problem.

use std::collections::HashSet;
use std::fmt;

use crate::data::item::{
    Item, EMPTY_ACCESSORY_ID, EMPTY_BOOTS_ID, EMPTY_CHESTPLATE_ID, EMPTY_ENCHANT_ID,
    EMPTY_GEM_ID, EMPTY_MODIFIER_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

const SENTINEL_IDS: &[(&str, &str)] = &[
    (EMPTY_ACCESSORY_ID, "empty accessory"),
    (EMPTY_CHESTPLATE_ID, "empty chestplate"),
    (EMPTY_BOOTS_ID, "empty boots"),
    (EMPTY_ENCHANT_ID, "no enchant"),
    (EMPTY_MODIFIER_ID, "no modifier"),
    (EMPTY_GEM_ID, "no gem"),
];

/// Validate a decoded item list. Errors mean the aggregator would compute
/// wrong totals; warnings are oddities worth fixing upstream.
pub fn validate_items(items: &[Item]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids: HashSet<&str> = HashSet::with_capacity(items.len());

    for item in items {
        let context = if item.id.is_empty() {
            format!("item '{}'", item.name)
        } else {
            format!("item {}", item.id)
        };

        if item.id.is_empty() {
            report.push(ValidationSeverity::Error, &context, "id must not be empty");
        } else if !seen_ids.insert(&item.id) {
            report.push(ValidationSeverity::Error, &context, "duplicate id");
        }

        if item.name.is_empty() {
            report.push(ValidationSeverity::Error, &context, "name must not be empty");
        }

        if let Some(gem_no) = item.gem_no {
            if gem_no > 3 {
                report.push(
                    ValidationSeverity::Error,
                    &context,
                    format!("gemNo {gem_no} outside 0..=3"),
                );
            }
        }

        if let Some(rows) = &item.stats_per_level {
            if rows.is_empty() {
                report.push(
                    ValidationSeverity::Warning,
                    &context,
                    "statsPerLevel present but empty",
                );
            }
            for row in rows {
                if row.level % 10 != 0 {
                    report.push(
                        ValidationSeverity::Error,
                        &context,
                        format!(
                            "statsPerLevel row level {} is not a 10-level bucket",
                            row.level
                        ),
                    );
                }
            }
            // The aggregator's fallback takes the last row as highest level.
            let sorted = rows.windows(2).all(|pair| pair[0].level < pair[1].level);
            if !sorted {
                report.push(
                    ValidationSeverity::Error,
                    &context,
                    "statsPerLevel rows are not strictly ascending by level",
                );
            }
        }
    }

    for (sentinel, label) in SENTINEL_IDS {
        if !items.iter().any(|item| item.id == *sentinel) {
            report.push(
                ValidationSeverity::Warning,
                format!("sentinel {sentinel}"),
                format!("{label} record missing from catalog"),
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_from_json(raw: &str) -> Item {
        serde_json::from_str(raw).expect("test item should deserialize")
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let items = vec![
            item_from_json(r#"{"id":"X1","name":"A","mainType":"Accessory"}"#),
            item_from_json(r#"{"id":"X1","name":"B","mainType":"Accessory"}"#),
        ];
        let report = validate_items(&items);
        assert!(report.has_errors());
        assert!(report
            .diagnostics
            .iter()
            .any(|diag| diag.message == "duplicate id"));
    }

    #[test]
    fn off_bucket_level_rows_are_errors() {
        let items = vec![item_from_json(
            r#"{"id":"X1","name":"A","mainType":"Accessory",
                "statsPerLevel":[{"level":95,"power":10}]}"#,
        )];
        let report = validate_items(&items);
        assert!(report.has_errors());
    }

    #[test]
    fn missing_sentinels_warn_but_do_not_error() {
        let items = vec![item_from_json(
            r#"{"id":"X1","name":"A","mainType":"Accessory"}"#,
        )];
        let report = validate_items(&items);
        assert!(!report.has_errors());
        assert_eq!(report.diagnostics.len(), SENTINEL_IDS.len());
    }
}
