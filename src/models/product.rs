use rust_decimal::Decimal;
use serde::Serialize;

/// Stored product row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,           // NUMERIC(9,2)
    pub owner_id: Option<i32>,    // nulled when the owner is removed
    pub rating: Option<Decimal>,  // NUMERIC(3,2), maintained by services::rating
}

/// Product row together with the per-query aggregates used by the views.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow)]
pub struct ProductListItem {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub owner_id: Option<i32>,
    pub owner_name: Option<String>,
    pub rating: Option<Decimal>,
    pub annotated_likes: i64,
}
