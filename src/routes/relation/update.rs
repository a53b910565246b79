use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::access_policy::NOT_AUTHENTICATED;
use crate::services::{rating, RatingError};
use crate::views;
use actix_web::{patch, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Validates, persists the caller's relation and recomputes the product
/// rating when `rate` changed.
async fn apply(
    pg_pool: &PgPool,
    user: &models::User,
    product_id: i32,
    form: forms::RelationForm,
) -> Result<web::Json<JsonResponse<views::Relation>>> {
    if let Err(errors) = form.validate() {
        tracing::debug!("Invalid relation form {:?}", errors);
        return Err(JsonResponse::<views::Relation>::build().form_error(&errors));
    }

    db::product::fetch(pg_pool, product_id)
        .await
        .map_err(|err| JsonResponse::<views::Relation>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::Relation>::build().not_found("Product not found"))?;

    let mut relation = db::relation::get_or_create(pg_pool, user.id, product_id)
        .await
        .map_err(|err| JsonResponse::<views::Relation>::build().internal_server_error(err))?;

    let rate_changed = form
        .update(&mut relation)
        .map_err(|err| JsonResponse::<views::Relation>::build().bad_request(err))?;
    let relation = db::relation::update(pg_pool, relation)
        .await
        .map_err(|err| JsonResponse::<views::Relation>::build().internal_server_error(err))?;

    if rate_changed {
        rating::set_rating(pg_pool, product_id)
            .await
            .map_err(|err| match err {
                RatingError::ProductNotFound(_) => {
                    JsonResponse::<views::Relation>::build().not_found("Product not found")
                }
                RatingError::Storage(err) => {
                    JsonResponse::<views::Relation>::build().internal_server_error(err)
                }
            })?;
    }

    Ok(JsonResponse::build()
        .set_item(Into::<views::Relation>::into(relation))
        .ok("success"))
}

#[tracing::instrument(name = "Update own product relation.", skip(pg_pool))]
#[put("/{product_id}")]
pub async fn item(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::RelationForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user
        .ok_or_else(|| JsonResponse::<views::Relation>::build().unauthorized(NOT_AUTHENTICATED))?;

    apply(pg_pool.get_ref(), &user, path.0, form.into_inner()).await
}

#[tracing::instrument(name = "Partially update own product relation.", skip(pg_pool))]
#[patch("/{product_id}")]
pub async fn partial(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::RelationForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user
        .ok_or_else(|| JsonResponse::<views::Relation>::build().unauthorized(NOT_AUTHENTICATED))?;

    apply(pg_pool.get_ref(), &user, path.0, form.into_inner()).await
}
