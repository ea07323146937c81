//! Transactional core of the business-records system.
//!
//! Owns the operations with real multi-step semantics: atomic
//! multi-line order creation, idempotent payment recording, cascade
//! deletion across the dependent tables, and validated entity
//! registration. Callers hand in already-coerced scalars and a
//! `&PgPool`; they get back a value or a structured [`CoreError`], never
//! transport-level errors or pre-formatted prose.
//!
//! Every operation runs inside a single transaction and rolls back on
//! every error path — no call can leave a partially applied multi-row
//! change.

pub mod cascade;
pub mod error;
pub mod list;
pub mod order;
pub mod payment;
pub mod register;
pub mod validate;

pub use cascade::{delete_customer, delete_product, delete_supplier};
pub use error::CoreError;
pub use list::{list_orders, OrderSummary};
pub use order::{create_order, NewOrder};
pub use payment::record_payment;
pub use register::{
    register_customer, register_product, register_supplier, NewCustomer, NewProduct, NewSupplier,
};
