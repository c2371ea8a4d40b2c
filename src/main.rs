mod db;
mod llm;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Initialize the estimation client (non-fatal: estimation disabled if config missing).
    let estimator = match llm::client_from_env() {
        Ok(client) => {
            tracing::info!(endpoint = client.endpoint(), "estimator client initialized");
            Some(std::sync::Arc::new(client) as std::sync::Arc<dyn llm::GenerateText>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "estimator not configured — cost estimation disabled");
            None
        }
    };

    let state = state::AppState::new(pool, estimator);

    tokio::spawn(services::draft::run_sweeper(state.pool.clone(), state.drafts.clone()));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "buildcost listening");
    axum::serve(listener, app).await.expect("server failed");
}
