use crate::forms::query::{like_pattern, Direction, OrderField};
use crate::models;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::Instrument;

// like count is computed per query, never stored
const SELECT_LIST_ITEM: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.owner_id,
        u.username AS owner_name,
        p.rating,
        COUNT(r.id) FILTER (WHERE r."like") AS annotated_likes
    FROM product p
    LEFT JOIN users u ON u.id = p.owner_id
    LEFT JOIN user_product_relation r ON r.product_id = p.id
"#;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch product by id.");
    sqlx::query_as::<_, models::Product>(
        r#"SELECT id, name, price, owner_id, rating FROM product WHERE id = $1 LIMIT 1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch product, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_item(pool: &PgPool, id: i32) -> Result<Option<models::ProductListItem>, String> {
    let query_span = tracing::info_span!("Fetch product with aggregates by id.");
    let mut query = QueryBuilder::<Postgres>::new(SELECT_LIST_ITEM);
    query
        .push(" WHERE p.id = ")
        .push_bind(id)
        .push(" GROUP BY p.id, u.username");

    query
        .build_query_as::<models::ProductListItem>()
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Lists products filtered by exact price and search terms.
/// Every term must occur in the name or in the two-digit formatted price.
/// Rows are always tie-broken by id ascending.
pub async fn fetch_all(
    pool: &PgPool,
    price: Option<Decimal>,
    terms: &[String],
    order: &[(OrderField, Direction)],
) -> Result<Vec<models::ProductListItem>, String> {
    let query_span = tracing::info_span!("Fetch products list.");
    let mut query = QueryBuilder::<Postgres>::new(SELECT_LIST_ITEM);
    query.push(" WHERE TRUE");

    if let Some(price) = price {
        query.push(" AND p.price = ").push_bind(price);
    }

    for term in terms {
        let pattern = like_pattern(term);
        query
            .push(" AND (p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR CAST(p.price AS TEXT) ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    query.push(" GROUP BY p.id, u.username ORDER BY ");
    for (field, direction) in order.iter().filter(|(field, _)| *field != OrderField::Id) {
        query
            .push(field.column())
            .push(" ")
            .push(direction.sql())
            .push(", ");
    }
    let id_direction = order
        .iter()
        .find(|(field, _)| *field == OrderField::Id)
        .map(|(_, direction)| *direction)
        .unwrap_or(Direction::Asc);
    query.push("p.id ").push(id_direction.sql());

    query
        .build_query_as::<models::ProductListItem>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch products, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(pool: &PgPool, mut product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Saving new product into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO product (name, price, owner_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&product.name)
    .bind(product.price)
    .bind(product.owner_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        product.id = id;
        product
    })
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Updating product");
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE product
        SET
            name=$2,
            price=$3
        WHERE id = $1
        RETURNING id, name, price, owner_id, rating
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.price)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|result| {
        tracing::info!("Product {} has been updated", result.id);
        result
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Could not update product".to_string()
    })
}

/// Stores a recomputed rating. `Ok(false)` when the product row is missing.
pub async fn update_rating(
    pool: &PgPool,
    id: i32,
    rating: Option<Decimal>,
) -> Result<bool, String> {
    let query_span = tracing::info_span!("Updating product rating");
    sqlx::query::<Postgres>("UPDATE product SET rating = $2 WHERE id = $1")
        .bind(id)
        .bind(rating)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to update rating: {:?}", err);
            "Could not update rating".to_string()
        })
}

#[tracing::instrument(name = "Delete product.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    tracing::info!("Delete product {}", id);
    sqlx::query::<Postgres>("DELETE FROM product WHERE id = $1;")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete product: {:?}", err);
            "Failed to delete product".to_string()
        })
}
