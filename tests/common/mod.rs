#![allow(dead_code)]

use rust_decimal::Decimal;
use shop::configuration::{get_configuration, DatabaseSettings, Settings};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::str::FromStr;

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub struct TestUser {
    pub id: i32,
    pub token: String,
}

pub async fn spawn_app_with_configuration(mut configuration: Settings) -> Option<TestApp> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = shop::startup::run(listener, connection_pool.clone())
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
    })
}

pub async fn spawn_app() -> Option<TestApp> {
    let configuration = get_configuration().expect("Failed to get configuration");
    spawn_app_with_configuration(configuration).await
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

impl TestApp {
    pub async fn create_user(&self, username: &str, is_staff: bool) -> TestUser {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (username, is_staff) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(is_staff)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert user");

        let token = uuid::Uuid::new_v4().simple().to_string();
        sqlx::query("INSERT INTO auth_token (key, user_id) VALUES ($1, $2)")
            .bind(&token)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to insert token");

        TestUser { id, token }
    }

    pub async fn create_product(&self, name: &str, price: &str, owner_id: Option<i32>) -> i32 {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO product (name, price, owner_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(Decimal::from_str(price).unwrap())
        .bind(owner_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert product")
    }

    pub async fn create_relation(
        &self,
        user_id: i32,
        product_id: i32,
        like: bool,
        rate: Option<i16>,
    ) {
        sqlx::query(
            r#"INSERT INTO user_product_relation (user_id, product_id, "like", rate) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(like)
        .bind(rate)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert relation");
    }

    pub async fn product_row(&self, id: i32) -> Option<(String, Decimal, Option<Decimal>)> {
        sqlx::query_as::<_, (String, Decimal, Option<Decimal>)>(
            "SELECT name, price, rating FROM product WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .expect("Failed to fetch product")
    }
}

pub fn token_header(user: &TestUser) -> String {
    format!("Token {}", user.token)
}
