//! Read-only order listing with payment status.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::CoreError;

/// One order row joined with payment presence.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_no: i64,
    pub cust_no: i64,
    pub date: NaiveDate,
    pub is_paid: bool,
}

/// Page through orders (ascending order_no), marking each as paid when
/// a pay row exists.
pub async fn list_orders(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<OrderSummary>, CoreError> {
    let rows = sqlx::query_as::<_, (i64, i64, NaiveDate, bool)>(
        r#"
        select o.order_no, o.cust_no, o.date, (p.order_no is not null) as is_paid
        from orders o
        left join pay p on o.order_no = p.order_no
        order by o.order_no
        limit $1 offset $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(CoreError::Internal)?;

    Ok(rows
        .into_iter()
        .map(|(order_no, cust_no, date, is_paid)| OrderSummary {
            order_no,
            cust_no,
            date,
            is_paid,
        })
        .collect())
}
