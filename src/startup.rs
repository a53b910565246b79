use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
) -> Result<Server, std::io::Error> {
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg = match &err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "JSON parse error at line {} column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            _ => err.to_string(),
        };
        JsonResponse::<serde_json::Value>::build().bad_request(msg)
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        JsonResponse::<serde_json::Value>::build().bad_request(err.to_string())
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::authentication::Manager::new())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/product")
                    .service(routes::product::get::list)
                    .service(routes::product::get::item)
                    .service(routes::product::add::item)
                    .service(routes::product::update::item)
                    .service(routes::product::update::partial)
                    .service(routes::product::delete::item),
            )
            .service(
                web::scope("/product_relation")
                    .service(routes::relation::get::item)
                    .service(routes::relation::update::item)
                    .service(routes::relation::update::partial),
            )
            .app_data(json_config.clone())
            .app_data(query_config.clone())
            .app_data(pg_pool.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
