pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod security;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{AuthService, CatalogService, DeliveryService, OrderService};
use infrastructure::{DieselOrderStore, DieselProductStore, DieselUserStore};
use security::TokenAuthority;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Concrete service wiring over the Diesel stores, shared across workers.
pub struct AppState {
    pub auth: AuthService<DieselUserStore>,
    pub orders: OrderService<DieselOrderStore, DieselProductStore>,
    pub delivery: DeliveryService<DieselOrderStore, DieselUserStore>,
    pub catalog: CatalogService<DieselProductStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::products::list_available,
        handlers::products::list_all,
        handlers::products::get_product,
        handlers::products::create,
        handlers::products::update,
        handlers::products::delete,
        handlers::products::toggle_availability,
        handlers::orders::create_order,
        handlers::orders::my_orders,
        handlers::orders::get_order,
        handlers::orders::list_all,
        handlers::orders::list_by_status,
        handlers::orders::update_status,
        handlers::delivery::my_assigned,
        handlers::delivery::update_status,
        handlers::delivery::assign,
        handlers::delivery::list_assignments,
        handlers::delivery::couriers,
    ),
    tags(
        (name = "auth", description = "Registration, login, current identity"),
        (name = "products", description = "Catalog browsing and admin management"),
        (name = "orders", description = "Order creation, projections, admin status updates"),
        (name = "delivery", description = "Courier assignment and delivery tracking"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
    tokens: TokenAuthority,
) -> std::io::Result<actix_web::dev::Server> {
    let users = DieselUserStore::new(pool.clone());
    let products = DieselProductStore::new(pool.clone());
    let orders = DieselOrderStore::new(pool);

    let state = web::Data::new(AppState {
        auth: AuthService::new(users.clone(), tokens.clone()),
        orders: OrderService::new(orders.clone(), products.clone()),
        delivery: DeliveryService::new(orders, users),
        catalog: CatalogService::new(products),
    });
    let tokens = web::Data::new(tokens);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(tokens.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(handlers::auth::register))
                            .route("/login", web::post().to(handlers::auth::login))
                            .route("/me", web::get().to(handlers::auth::me)),
                    )
                    .service(
                        web::scope("/products")
                            .route("", web::get().to(handlers::products::list_available))
                            .route("", web::post().to(handlers::products::create))
                            .route("/all", web::get().to(handlers::products::list_all))
                            .route("/{id}", web::get().to(handlers::products::get_product))
                            .route("/{id}", web::put().to(handlers::products::update))
                            .route("/{id}", web::delete().to(handlers::products::delete))
                            .route(
                                "/{id}/availability",
                                web::patch().to(handlers::products::toggle_availability),
                            ),
                    )
                    .service(
                        web::scope("/orders")
                            .route("", web::post().to(handlers::orders::create_order))
                            .route("/my-orders", web::get().to(handlers::orders::my_orders))
                            .route("/admin/all", web::get().to(handlers::orders::list_all))
                            .route(
                                "/admin/status/{status}",
                                web::get().to(handlers::orders::list_by_status),
                            )
                            .route(
                                "/admin/{id}/status",
                                web::patch().to(handlers::orders::update_status),
                            )
                            .route("/{id}", web::get().to(handlers::orders::get_order)),
                    )
                    .service(
                        web::scope("/delivery")
                            .route("/my-orders", web::get().to(handlers::delivery::my_assigned))
                            .route(
                                "/orders/{id}/status",
                                web::patch().to(handlers::delivery::update_status),
                            )
                            .route("/admin/assign", web::post().to(handlers::delivery::assign))
                            .route(
                                "/admin/assignments",
                                web::get().to(handlers::delivery::list_assignments),
                            )
                            .route(
                                "/admin/couriers",
                                web::get().to(handlers::delivery::couriers),
                            ),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
