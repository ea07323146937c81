//! The error taxonomy every core operation reports through.
//!
//! Callers (CLI, HTTP handlers, ...) turn these into flash messages or
//! JSON; the core never formats user-facing prose beyond the structured
//! fields. Every variant except `Internal` guarantees the operation had
//! no partial effect — the transaction was rolled back before the error
//! left the core. `Internal` also rolls back, but its cause is only
//! logged server-side and shown outward as a generic phrase.

use std::fmt;

use odk_db::violation::{classify, StoreViolation};

#[derive(Debug)]
pub enum CoreError {
    /// Caller-supplied data malformed or missing; names the first
    /// offending field in rule order.
    Validation { field: &'static str },
    /// A referenced entity does not exist (customer, product, order,
    /// supplier). `value` is the missing key as supplied by the caller.
    Reference { entity: &'static str, value: String },
    /// Uniqueness or idempotency violation (duplicate key, double
    /// payment, lost order-number allocation race).
    Conflict { reason: String },
    /// Unexpected store failure. Full detail is carried for server-side
    /// logging; `Display` stays generic.
    Internal(sqlx::Error),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Validation { field } => write!(f, "{field} is required or invalid"),
            CoreError::Reference { entity, value } if value.is_empty() => {
                write!(f, "{entity} does not exist")
            }
            CoreError::Reference { entity, value } => {
                write!(f, "{entity} '{value}' does not exist")
            }
            CoreError::Conflict { reason } => write!(f, "{reason}"),
            CoreError::Internal(_) => write!(f, "an internal storage error occurred"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Internal(e) => Some(e),
            _ => None,
        }
    }
}

impl CoreError {
    /// Default translation of a store error: unique -> Conflict,
    /// foreign key -> Reference, everything else -> Internal (logged).
    ///
    /// Operations with operation-specific wording (payment idempotency,
    /// order-number races) match [`classify`] themselves before falling
    /// back here.
    pub(crate) fn from_store(err: sqlx::Error) -> CoreError {
        match classify(&err) {
            StoreViolation::Unique { field, value } if value.is_empty() => {
                CoreError::Conflict { reason: format!("{field} is already used") }
            }
            StoreViolation::Unique { field, value } => {
                CoreError::Conflict { reason: format!("{field} '{value}' is already used") }
            }
            StoreViolation::ForeignKey { field } => {
                CoreError::Reference { entity: field, value: String::new() }
            }
            StoreViolation::Other => {
                tracing::error!(error = %err, "unclassified store error");
                CoreError::Internal(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let e = CoreError::Validation { field: "date" };
        assert_eq!(e.to_string(), "date is required or invalid");
    }

    #[test]
    fn display_reference_with_and_without_value() {
        let with = CoreError::Reference { entity: "product", value: "SKU9".into() };
        assert_eq!(with.to_string(), "product 'SKU9' does not exist");

        let without = CoreError::Reference { entity: "customer", value: String::new() };
        assert_eq!(without.to_string(), "customer does not exist");
    }

    #[test]
    fn internal_display_is_generic() {
        let e = CoreError::Internal(sqlx::Error::RowNotFound);
        assert_eq!(e.to_string(), "an internal storage error occurred");
        // The cause stays reachable for server-side logging.
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn from_store_maps_non_database_errors_to_internal() {
        let e = CoreError::from_store(sqlx::Error::RowNotFound);
        assert!(matches!(e, CoreError::Internal(_)));
    }
}
