use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::access_policy::NOT_AUTHENTICATED;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Get own product relation.", skip(pg_pool))]
#[get("/{product_id}")]
pub async fn item(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user
        .ok_or_else(|| JsonResponse::<views::Relation>::build().unauthorized(NOT_AUTHENTICATED))?;
    let product_id = path.0;

    db::product::fetch(pg_pool.get_ref(), product_id)
        .await
        .map_err(|err| JsonResponse::<views::Relation>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::Relation>::build().not_found("Product not found"))?;

    db::relation::get_or_create(pg_pool.get_ref(), user.id, product_id)
        .await
        .map(|relation| {
            JsonResponse::build()
                .set_item(Into::<views::Relation>::into(relation))
                .ok("OK")
        })
        .map_err(|err| JsonResponse::<views::Relation>::build().internal_server_error(err))
}
