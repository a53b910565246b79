use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::convert::Into;

#[tracing::instrument(name = "Get product.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item(path: web::Path<(i32,)>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let id = path.0;
    db::product::fetch_item(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::Product>::build().internal_server_error(err))
        .and_then(|product| match product {
            Some(product) => Ok(JsonResponse::build()
                .set_item(Into::<views::Product>::into(product))
                .ok("OK")),
            None => Err(JsonResponse::<views::Product>::build().not_found("Product not found")),
        })
}

#[tracing::instrument(name = "Get the list of products.", skip(pg_pool))]
#[get("")]
pub async fn list(
    query: web::Query<forms::ProductQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let price = query
        .price_filter()
        .map_err(|err| JsonResponse::<views::Product>::build().bad_request(err))?;

    db::product::fetch_all(
        pg_pool.get_ref(),
        price,
        &query.search_terms(),
        &query.order_by(),
    )
    .await
    .map(|products| {
        let products = products
            .into_iter()
            .map(Into::into)
            .collect::<Vec<views::Product>>();

        JsonResponse::build().set_list(products).ok("OK")
    })
    .map_err(|err| JsonResponse::<views::Product>::build().internal_server_error(err))
}
