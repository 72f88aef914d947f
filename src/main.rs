use analytics_reports::api::reports::AppState;
use analytics_reports::config::Config;
use analytics_reports::gateway::http::HttpGateway;
use analytics_reports::gateway::AnalyticsGateway;
use analytics_reports::query::ReportEngine;
use analytics_reports::server;
use std::sync::Arc;

// The blocking HTTP client must be created and dropped outside the async
// runtime, so the runtime is built by hand instead of with `#[tokio::main]`.
fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analytics_reports=info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref().map(std::path::Path::new));

    tracing::info!(
        host = %config.host,
        port = config.port,
        view_id = config.view_id.as_deref().unwrap_or("<unset>"),
        api_base_url = %config.gateway.api_base_url,
        "Starting analytics reports service"
    );

    let gateway: Arc<dyn AnalyticsGateway> = match HttpGateway::new(&config.gateway) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create analytics gateway");
            std::process::exit(1);
        }
    };
    let engine = match ReportEngine::from_config(Arc::clone(&gateway), &config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create report engine");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start Tokio runtime");
            std::process::exit(1);
        }
    };

    let served = runtime.block_on(async move {
        let state = Arc::new(AppState { engine });
        let app = server::build_router(state);
        let addr = format!("{}:{}", config.host, config.port);
        let listener = match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(addr = %addr, error = %e, "Failed to bind");
                return Err(e);
            }
        };

        tracing::info!(addr = %addr, "Listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Server error"))
    });

    drop(runtime);
    drop(gateway);
    if served.is_err() {
        std::process::exit(1);
    }
    tracing::info!("Shut down");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
