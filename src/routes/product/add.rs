use crate::db;
use crate::forms;
use crate::helpers::{enforce, JsonResponse};
use crate::models;
use crate::services::access_policy::{has_permission, Operation};
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add product.", skip(pg_pool))]
#[post("")]
pub async fn item(
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::ProductForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let actor = user.as_deref().map(|user| &**user);
    enforce(has_permission(actor, Operation::Create))?;
    // has_permission only lets authenticated callers create
    let owner_id = actor.map(|user| user.id);

    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        tracing::debug!("Invalid product form {:?}", errors);
        return Err(JsonResponse::<views::Product>::build().form_error(&errors));
    }

    let mut product: models::Product = form.into();
    product.owner_id = owner_id;

    let product = db::product::insert(pg_pool.get_ref(), product)
        .await
        .map_err(|err| JsonResponse::<views::Product>::build().internal_server_error(err))?;
    tracing::info!("New product {} has been saved", product.id);

    db::product::fetch_item(pg_pool.get_ref(), product.id)
        .await
        .map_err(|err| JsonResponse::<views::Product>::build().internal_server_error(err))
        .and_then(|found| match found {
            Some(found) => Ok(JsonResponse::build()
                .set_id(product.id)
                .set_item(Into::<views::Product>::into(found))
                .created("Created")),
            None => Err(JsonResponse::<views::Product>::build().not_found("Product not found")),
        })
}
