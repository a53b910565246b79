use crate::models;
use rust_decimal::Decimal;
use serde::Serialize;
use std::convert::From;

#[derive(Debug, Serialize, Default, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: String, // fixed-point, two fraction digits
    pub owner: Option<i32>,
    pub owner_name: String,
    pub annotated_likes: i64,
    pub rating: Option<String>,
}

/// Renders a decimal the way the columns store it: exactly two fraction digits.
pub fn format_decimal(value: Decimal) -> String {
    format!("{:.2}", value)
}

impl From<models::ProductListItem> for Product {
    fn from(product: models::ProductListItem) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: format_decimal(product.price),
            owner: product.owner_id,
            owner_name: product.owner_name.unwrap_or_default(),
            annotated_likes: product.annotated_likes,
            rating: product.rating.map(format_decimal),
        }
    }
}
