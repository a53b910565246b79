use crate::db;
use crate::forms;
use crate::helpers::{enforce, JsonResponse};
use crate::models;
use crate::services::access_policy::{has_object_permission, has_permission, Operation};
use crate::views;
use actix_web::{patch, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Loads the product and checks the caller may change it. Nothing is written here.
async fn fetch_for_update(
    pg_pool: &PgPool,
    actor: Option<&models::User>,
    id: i32,
) -> Result<models::Product> {
    enforce(has_permission(actor, Operation::Update))?;

    let product = db::product::fetch(pg_pool, id)
        .await
        .map_err(|err| JsonResponse::<views::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::Product>::build().not_found("Product not found"))?;

    enforce(has_object_permission(actor, Operation::Update, &product))?;

    Ok(product)
}

async fn save(pg_pool: &PgPool, product: models::Product) -> Result<web::Json<JsonResponse<views::Product>>> {
    let product = db::product::update(pg_pool, product)
        .await
        .map_err(|err| JsonResponse::<views::Product>::build().internal_server_error(err))?;

    db::product::fetch_item(pg_pool, product.id)
        .await
        .map_err(|err| JsonResponse::<views::Product>::build().internal_server_error(err))?
        .map(|found| {
            JsonResponse::build()
                .set_item(Into::<views::Product>::into(found))
                .ok("success")
        })
        .ok_or_else(|| JsonResponse::<views::Product>::build().not_found("Product not found"))
}

#[tracing::instrument(name = "Update product.", skip(pg_pool))]
#[put("/{id}")]
pub async fn item(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::ProductForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let actor = user.as_deref().map(|user| &**user);
    let mut product = fetch_for_update(pg_pool.get_ref(), actor, path.0).await?;

    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::Product>::build().form_error(&errors));
    }

    form.update(&mut product);
    tracing::debug!("Updating product {:?}", product);

    save(pg_pool.get_ref(), product).await
}

#[tracing::instrument(name = "Partially update product.", skip(pg_pool))]
#[patch("/{id}")]
pub async fn partial(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::ProductPatchForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let actor = user.as_deref().map(|user| &**user);
    let mut product = fetch_for_update(pg_pool.get_ref(), actor, path.0).await?;

    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::Product>::build().form_error(&errors));
    }

    form.update(&mut product);
    tracing::debug!("Patching product {:?}", product);

    save(pg_pool.get_ref(), product).await
}
