//! Greenline Server
//!
//! HTTP surface of the deployment pipeline:
//! - Trigger: validated image push events from the registry
//! - Approval: operator decisions against a run's approval gate
//! - Alarm: breach notifications routed to the rollback controller
//! - Runs: inspection of live and finished pipeline runs

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greenline_client::GatewayClient;
use greenline_engine::approval::ApprovalRegistry;
use greenline_engine::config::PipelineConfig;
use greenline_engine::controller::PipelineController;
use greenline_engine::rollback::RollbackController;
use greenline_engine::service::Services;
use greenline_engine::store::RunStore;

pub mod api;
pub mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenline_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Greenline Server...");

    // Load pipeline configuration from the environment
    let config = PipelineConfig::from_env().expect("Failed to load pipeline configuration");
    config.validate().expect("Invalid pipeline configuration");

    tracing::info!(
        "Deploying {} via {}/{}",
        config.app_name,
        config.deploy_application,
        config.deploy_group
    );

    // Wire the service seams to the cloud gateway
    let gateway_url =
        std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:9090".to_string());
    let client = Arc::new(GatewayClient::new(gateway_url));
    let services = Services::gateway(client);

    let store = Arc::new(RunStore::new());
    let approvals = Arc::new(ApprovalRegistry::new());

    let controller = Arc::new(PipelineController::new(
        config.clone(),
        services.clone(),
        store.clone(),
        approvals.clone(),
    ));

    // The rollback controller listens to stage events for the lifetime of
    // the process.
    let rollback = Arc::new(RollbackController::new(config, &services, store.clone()));
    rollback.clone().spawn(controller.subscribe());

    tracing::info!("Pipeline controller and rollback listener started");

    // Build router with all API endpoints
    let app = api::create_router(AppState {
        controller,
        rollback,
        store,
        approvals,
    });

    // Get bind address
    let addr =
        std::env::var("GREENLINE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
