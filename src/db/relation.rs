use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

/// Finds the (user, product) relation or inserts a zero-value one.
///
/// A single statement: the unique (user_id, product_id) index makes a
/// concurrent first touch fall through to the existing row.
pub async fn get_or_create(
    pool: &PgPool,
    user_id: i32,
    product_id: i32,
) -> Result<models::UserProductRelation, String> {
    let query_span = tracing::info_span!("Get or create user product relation.");
    sqlx::query_as::<_, models::UserProductRelation>(
        r#"
        WITH inserted AS (
            INSERT INTO user_product_relation (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            RETURNING id, user_id, product_id, "like", in_bookmarks, rate
        )
        SELECT id, user_id, product_id, "like", in_bookmarks, rate FROM inserted
        UNION ALL
        SELECT id, user_id, product_id, "like", in_bookmarks, rate
        FROM user_product_relation
        WHERE user_id = $1 AND product_id = $2
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to get or create relation: {:?}", err);
        "Could not fetch relation".to_string()
    })
}

pub async fn update(
    pool: &PgPool,
    relation: models::UserProductRelation,
) -> Result<models::UserProductRelation, String> {
    let query_span = tracing::info_span!("Updating user product relation");
    sqlx::query_as::<_, models::UserProductRelation>(
        r#"
        UPDATE user_product_relation
        SET
            "like"=$2,
            in_bookmarks=$3,
            rate=$4
        WHERE id = $1
        RETURNING id, user_id, product_id, "like", in_bookmarks, rate
        "#,
    )
    .bind(relation.id)
    .bind(relation.like)
    .bind(relation.in_bookmarks)
    .bind(relation.rate)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Could not update relation".to_string()
    })
}

/// Every relation's rate for the product, absent ones included.
pub async fn fetch_rates_by_product(pool: &PgPool, product_id: i32) -> Result<Vec<Option<i16>>, String> {
    let query_span = tracing::info_span!("Fetch rates of a product.");
    sqlx::query_scalar::<_, Option<i16>>(
        r#"SELECT rate FROM user_product_relation WHERE product_id = $1"#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch rates, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
