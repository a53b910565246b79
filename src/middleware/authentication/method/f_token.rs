use crate::db;
use crate::middleware::authentication::get_header;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use sqlx::PgPool;
use std::sync::Arc;

const SCHEME: &str = "Token ";

/// `Authorization: Token <key>`. Other schemes fall through to the next method.
#[tracing::instrument(name = "Authenticate with Token header", skip(req))]
pub async fn try_token(req: &mut ServiceRequest) -> Result<bool, String> {
    let authorization = match get_header::<String>(req, "authorization")? {
        Some(authorization) => authorization,
        None => return Ok(false),
    };

    let key = match authorization.strip_prefix(SCHEME) {
        Some(key) => key.trim(),
        None => return Ok(false),
    };
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err("Invalid token header.".to_string());
    }

    let db_pool = req
        .app_data::<web::Data<PgPool>>()
        .ok_or("Database pool not found")?
        .clone();

    let user = db::user::fetch_by_token(db_pool.get_ref(), key)
        .await?
        .ok_or("Invalid token.")?;

    tracing::debug!("Authenticated user {}", user.id);
    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(true)
}
