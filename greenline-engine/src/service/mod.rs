//! Service seams over the cloud gateway
//!
//! Each trait covers one external collaborator the pipeline acts through.
//! Production wiring implements every trait directly on
//! [`greenline_client::GatewayClient`]; tests inject in-memory fakes.

pub mod credentials;
pub mod deploy;
pub mod notify;
pub mod storage;
pub mod upstream;

pub use credentials::CredentialBroker;
pub use deploy::{DeployApi, StopOutcome};
pub use notify::ApprovalNotifier;
pub use storage::{ArtifactStore, ParameterStore};
pub use upstream::{ImageRegistry, SourceFetcher, TaskRegistry};

use greenline_client::GatewayClient;
use std::sync::Arc;

/// Bundle of the collaborators a pipeline run acts through
#[derive(Clone)]
pub struct Services {
    pub credentials: Arc<dyn CredentialBroker>,
    pub sources: Arc<dyn SourceFetcher>,
    pub images: Arc<dyn ImageRegistry>,
    pub tasks: Arc<dyn TaskRegistry>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub parameters: Arc<dyn ParameterStore>,
    pub deploy: Arc<dyn DeployApi>,
    pub notifier: Arc<dyn ApprovalNotifier>,
}

impl Services {
    /// Wires every seam to the same gateway client
    pub fn gateway(client: Arc<GatewayClient>) -> Self {
        Self {
            credentials: client.clone(),
            sources: client.clone(),
            images: client.clone(),
            tasks: client.clone(),
            artifacts: client.clone(),
            parameters: client.clone(),
            deploy: client.clone(),
            notifier: client,
        }
    }
}
