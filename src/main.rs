use anyhow::Result;
use axum::Router;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use cardapio_orderservice::{app_state::AppState, bootstrap, config, db, routes};

/// Migrations embedded into the binary which helps with streamlining image building process
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_tracing();
    bootstrap::init_env();

    let config = config::load()?;

    tracing::info!("Running migrations...");
    let migrations_count = db::run_migrations_blocking(MIGRATIONS, &config.database_url).await?;
    tracing::info!("Run {} new migrations successfully", migrations_count);

    let db_pool = db::build_pool(&config.database_url).await?;
    let state = AppState {
        db_pool,
        config: config.clone(),
    };

    let api = OpenApiRouter::new().nest(
        "/api",
        routes::categories::routes_with_openapi()
            .merge(routes::products::routes_with_openapi())
            .merge(routes::waiters::routes_with_openapi())
            .merge(routes::menu::routes_with_openapi())
            .merge(routes::orders::routes_with_openapi()),
    );

    let mut openapi = api.get_openapi().clone();
    openapi.info = utoipa::openapi::InfoBuilder::new()
        .title("Cardápio OrderService API")
        .version("1.0.0")
        .build();
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi);

    let app = Router::new()
        .merge(api)
        .merge(swagger_ui)
        .with_state(state);

    bootstrap::serve("OrderService", app, config.port).await
}
