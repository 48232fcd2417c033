use stockwise_api::config::Config;
use stockwise_store::{Database, DbConfig};

#[tokio::main]
async fn main() {
    stockwise_observability::init();

    let config = Config::from_env();

    let db = Database::connect(DbConfig::new(&config.database_path))
        .await
        .expect("failed to open database");

    let app = stockwise_api::app::build_app(&config, db);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
