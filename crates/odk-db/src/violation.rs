//! Constraint-violation classifier.
//!
//! Turns an opaque `sqlx::Error` into a structured [`StoreViolation`] by
//! inspecting the SQLSTATE and the *constraint name* reported by the
//! driver. Classification never pattern-matches the human-readable error
//! sentence; the only free text consulted is the driver's structured
//! `detail` field, and only to recover the offending key value for
//! display.

use sqlx::postgres::PgDatabaseError;

// Postgres SQLSTATE class 23 (integrity constraint violation).
const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";
const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Structured classification of a store-level constraint failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreViolation {
    /// A unique or primary-key constraint was violated.
    /// `value` is the offending key value when the driver reports it,
    /// empty otherwise.
    Unique { field: &'static str, value: String },
    /// A foreign-key constraint was violated; `field` names the
    /// referenced entity (customer, product, order, supplier).
    ForeignKey { field: &'static str },
    /// Anything the tables below do not recognize. The raw error stays
    /// with the caller for logging; it is never shown verbatim to an
    /// end user.
    Other,
}

/// Map a unique/primary-key constraint name to the user-facing field.
fn unique_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "product_pkey" => Some("sku"),
        "product_ean_key" => Some("ean"),
        "supplier_pkey" => Some("tin"),
        "customer_pkey" => Some("cust_no"),
        "customer_email_key" => Some("email"),
        "orders_pkey" => Some("order_no"),
        "pay_pkey" => Some("order_no"),
        "contains_pkey" => Some("order_no"),
        _ => None,
    }
}

/// Map a foreign-key constraint name to the referenced entity.
fn foreign_key_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "orders_cust_no_fkey" | "pay_cust_no_fkey" => Some("customer"),
        "contains_sku_fkey" | "supplier_sku_fkey" => Some("product"),
        "pay_order_no_fkey" | "contains_order_no_fkey" | "process_order_no_fkey" => Some("order"),
        "delivery_tin_fkey" => Some("supplier"),
        _ => None,
    }
}

/// Pull the offending key value out of the driver's structured detail,
/// e.g. `Key (sku)=(ABC-1) already exists.` -> `ABC-1`.
fn key_value_from_detail(detail: &str) -> Option<String> {
    let start = detail.find(")=(")? + 3;
    let end = start + detail[start..].find(')')?;
    Some(detail[start..end].to_string())
}

/// Classification core, pure over the pieces the driver reports.
/// Split out so it unit-tests without fabricating a live driver error.
fn classify_parts(
    code: Option<&str>,
    constraint: Option<&str>,
    detail: Option<&str>,
) -> StoreViolation {
    let constraint = match constraint {
        Some(c) => c,
        None => return StoreViolation::Other,
    };

    match code {
        Some(SQLSTATE_UNIQUE_VIOLATION) => match unique_field(constraint) {
            Some(field) => StoreViolation::Unique {
                field,
                value: detail.and_then(key_value_from_detail).unwrap_or_default(),
            },
            None => StoreViolation::Other,
        },
        Some(SQLSTATE_FOREIGN_KEY_VIOLATION) => match foreign_key_field(constraint) {
            Some(field) => StoreViolation::ForeignKey { field },
            None => StoreViolation::Other,
        },
        _ => StoreViolation::Other,
    }
}

/// Classify a store error raised by sqlx.
///
/// Non-database errors (pool timeouts, decode failures, ...) are `Other`;
/// callers log them with full detail and surface a generic category.
pub fn classify(err: &sqlx::Error) -> StoreViolation {
    match err {
        sqlx::Error::Database(db_err) => classify_parts(
            db_err.code().as_deref(),
            db_err.constraint(),
            db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|pg| pg.detail()),
        ),
        _ => StoreViolation::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_sku_with_detail_value() {
        let v = classify_parts(
            Some("23505"),
            Some("product_pkey"),
            Some("Key (sku)=(ABC-1) already exists."),
        );
        assert_eq!(
            v,
            StoreViolation::Unique { field: "sku", value: "ABC-1".into() }
        );
    }

    #[test]
    fn unique_ean_and_email_and_tin() {
        for (constraint, field) in [
            ("product_ean_key", "ean"),
            ("customer_email_key", "email"),
            ("supplier_pkey", "tin"),
        ] {
            let v = classify_parts(Some("23505"), Some(constraint), None);
            assert_eq!(
                v,
                StoreViolation::Unique { field, value: String::new() }
            );
        }
    }

    #[test]
    fn pay_pkey_maps_to_order_no() {
        let v = classify_parts(
            Some("23505"),
            Some("pay_pkey"),
            Some("Key (order_no)=(7) already exists."),
        );
        assert_eq!(
            v,
            StoreViolation::Unique { field: "order_no", value: "7".into() }
        );
    }

    #[test]
    fn foreign_keys_map_to_referenced_entity() {
        for (constraint, field) in [
            ("orders_cust_no_fkey", "customer"),
            ("pay_cust_no_fkey", "customer"),
            ("contains_sku_fkey", "product"),
            ("supplier_sku_fkey", "product"),
            ("pay_order_no_fkey", "order"),
            ("process_order_no_fkey", "order"),
            ("delivery_tin_fkey", "supplier"),
        ] {
            let v = classify_parts(Some("23503"), Some(constraint), None);
            assert_eq!(v, StoreViolation::ForeignKey { field });
        }
    }

    #[test]
    fn unknown_constraint_falls_through_to_other() {
        assert_eq!(
            classify_parts(Some("23505"), Some("somebody_elses_key"), None),
            StoreViolation::Other
        );
        assert_eq!(
            classify_parts(Some("23503"), Some("mystery_fkey"), None),
            StoreViolation::Other
        );
    }

    #[test]
    fn non_constraint_sqlstate_is_other() {
        // Serialization failure: not a constraint violation even though a
        // constraint name could in principle be attached.
        assert_eq!(
            classify_parts(Some("40001"), Some("orders_pkey"), None),
            StoreViolation::Other
        );
        assert_eq!(classify_parts(None, None, None), StoreViolation::Other);
    }

    #[test]
    fn detail_without_key_shape_yields_empty_value() {
        let v = classify_parts(Some("23505"), Some("orders_pkey"), Some("no key here"));
        assert_eq!(
            v,
            StoreViolation::Unique { field: "order_no", value: String::new() }
        );
    }
}
