//! Per-entity validation rules.
//!
//! Each entity declares one ordered list of `(field, ok)` checks; the
//! first failing field is reported, matching the order the original
//! forms checked them in. Handlers never re-derive presence checks
//! inline.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Evaluate ordered checks; the first failure names its field.
pub fn first_failure(checks: &[(&'static str, bool)]) -> Result<(), CoreError> {
    for (field, ok) in checks {
        if !ok {
            return Err(CoreError::Validation { field });
        }
    }
    Ok(())
}

pub fn non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Digits only, at least one. Phone and TIN fields.
pub fn numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Optional field: valid when absent, checked when present.
pub fn numeric_if_present(s: Option<&str>) -> bool {
    s.map(numeric).unwrap_or(true)
}

/// The original form's email shape check: an `@` and a dot.
pub fn email_shape(s: &str) -> bool {
    s.contains('@') && s.contains('.')
}

/// Parse a `YYYY-MM-DD` date, reporting the named field on failure.
pub fn parse_date(field: &'static str, s: &str) -> Result<NaiveDate, CoreError> {
    if !non_empty(s) {
        return Err(CoreError::Validation { field });
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CoreError::Validation { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_reports_in_declaration_order() {
        let err = first_failure(&[
            ("name", true),
            ("email", false),
            ("phone", false),
        ])
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "email" }));
    }

    #[test]
    fn first_failure_passes_when_all_ok() {
        assert!(first_failure(&[("name", true), ("email", true)]).is_ok());
    }

    #[test]
    fn numeric_rejects_mixed_and_empty() {
        assert!(numeric("912345678"));
        assert!(!numeric("91a"));
        assert!(!numeric(""));
        assert!(numeric_if_present(None));
        assert!(!numeric_if_present(Some("9-1")));
    }

    #[test]
    fn email_shape_is_the_original_check() {
        assert!(email_shape("a@b.pt"));
        assert!(!email_shape("a.b"));
        assert!(!email_shape("a@b"));
    }

    #[test]
    fn parse_date_accepts_iso_and_names_field_on_failure() {
        assert_eq!(
            parse_date("date", "2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        for bad in ["", "  ", "01/01/2024", "2024-13-01"] {
            let err = parse_date("date", bad).unwrap_err();
            assert!(matches!(err, CoreError::Validation { field: "date" }));
        }
    }
}
