use crate::db;
use crate::helpers::{enforce, JsonResponse};
use crate::models;
use crate::services::access_policy::{has_object_permission, has_permission, Operation};
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Delete product.", skip(pg_pool))]
#[delete("/{id}")]
pub async fn item(
    path: web::Path<(i32,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let actor = user.as_deref().map(|user| &**user);
    enforce(has_permission(actor, Operation::Delete))?;

    let (id,) = path.into_inner();
    let product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    enforce(has_object_permission(actor, Operation::Delete, &product))?;

    // relations go with the product (ON DELETE CASCADE)
    db::product::delete(pg_pool.get_ref(), product.id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
        .and_then(|deleted| match deleted {
            true => Ok(JsonResponse::<models::Product>::build()
                .set_id(product.id)
                .ok("Deleted")),
            false => Err(JsonResponse::<models::Product>::build().not_found("Product not found")),
        })
}
