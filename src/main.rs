use bakery_service::security::TokenAuthority;
use bakery_service::{build_server, create_pool, run_migrations};
use dotenvy::dotenv;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let pool_size: u32 = env::var("DB_POOL_SIZE")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .expect("DB_POOL_SIZE must be a valid number");
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let jwt_ttl_hours: i64 = env::var("JWT_TTL_HOURS")
        .unwrap_or_else(|_| "24".to_string())
        .parse()
        .expect("JWT_TTL_HOURS must be a valid number");

    let pool = create_pool(&database_url, pool_size);
    run_migrations(&pool);

    let tokens = TokenAuthority::new(&jwt_secret, jwt_ttl_hours);

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(pool, &host, port, tokens)?.await
}
