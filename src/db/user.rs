use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_token(pool: &PgPool, key: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetching the user by auth token");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT u.id, u.username, u.is_staff
        FROM users u
        INNER JOIN auth_token t ON t.user_id = u.id
        WHERE t.key = $1
        LIMIT 1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user by token: {:?}", err);
        "Database error".to_string()
    })
}
