//! Verdicts and the composed siting pipeline

mod composite;

pub use composite::{Advisory, SitingEngine, ValidationReport, VerdictSet};

use serde::{Deserialize, Serialize};

/// Separator between failing messages in an aggregated verdict
pub const VERDICT_DELIMITER: &str = "; ";

/// Uniform result of every siting check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub message: String,
}

impl ValidationVerdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// AND the verdicts together, joining failing messages in order.
    ///
    /// `success_message` is used only when every verdict passed.
    pub fn combine<'a, I>(verdicts: I, success_message: &str) -> Self
    where
        I: IntoIterator<Item = &'a ValidationVerdict>,
    {
        let failures: Vec<&str> = verdicts
            .into_iter()
            .filter(|v| !v.valid)
            .map(|v| v.message.as_str())
            .collect();

        if failures.is_empty() {
            Self::pass(success_message)
        } else {
            Self::fail(failures.join(VERDICT_DELIMITER))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_all_pass() {
        let verdicts = [ValidationVerdict::pass("a"), ValidationVerdict::pass("b")];
        let combined = ValidationVerdict::combine(&verdicts, "ok");
        assert!(combined.valid);
        assert_eq!(combined.message, "ok");
    }

    #[test]
    fn test_combine_joins_failures_in_order() {
        let verdicts = [
            ValidationVerdict::fail("first"),
            ValidationVerdict::pass("fine"),
            ValidationVerdict::fail("second"),
        ];
        let combined = ValidationVerdict::combine(&verdicts, "ok");
        assert!(!combined.valid);
        assert_eq!(combined.message, "first; second");
    }
}
