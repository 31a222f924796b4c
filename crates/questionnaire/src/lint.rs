use std::fmt;

use serde::Serialize;

use crate::questionnaire::Questionnaire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The condition names a key no question registers.
    UnknownKey,
    /// The named key is registered at or after the question that reads it,
    /// so it cannot have been answered when the condition runs.
    NotEarlier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    pub key: String,
    pub variant: usize,
    pub referenced: String,
    pub kind: IssueKind,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::UnknownKey => write!(
                f,
                "{} (variant {}) depends on unknown key '{}'",
                self.key, self.variant, self.referenced
            ),
            IssueKind::NotEarlier => write!(
                f,
                "{} (variant {}) depends on '{}' which is not asked before it",
                self.key, self.variant, self.referenced
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub valid: bool,
    pub issues: Vec<LintIssue>,
}

/// Flags conditions that can only be evaluated against answers which are
/// not guaranteed to exist yet.
pub fn check_references(questionnaire: &Questionnaire) -> LintReport {
    let order: Vec<&str> = questionnaire.keys().collect();
    let mut issues = Vec::new();

    for (position, (key, variants)) in questionnaire.questions().enumerate() {
        for (variant, question) in variants.iter().enumerate() {
            let Some(condition) = question.condition() else {
                continue;
            };
            for referenced in condition.keys() {
                let kind = match order.iter().position(|candidate| *candidate == referenced) {
                    None => IssueKind::UnknownKey,
                    Some(found) if found >= position => IssueKind::NotEarlier,
                    Some(_) => continue,
                };
                issues.push(LintIssue {
                    key: key.to_string(),
                    variant,
                    referenced: referenced.to_string(),
                    kind,
                });
            }
        }
    }

    LintReport {
        valid: issues.is_empty(),
        issues,
    }
}
