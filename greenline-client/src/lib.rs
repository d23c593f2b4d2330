//! Greenline Gateway Client
//!
//! A typed HTTP client for the cloud gateway: the account-local facade over
//! the identity service, the blue/green deployment service, the compute
//! registry, the parameter store, the artifact bucket, and the notification
//! topic.
//!
//! Calls that act in the target account take a [`DelegatedCredential`]
//! explicitly; the credential is attached to that single request and never
//! stored on the client.
//!
//! # Example
//!
//! ```no_run
//! use greenline_client::GatewayClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), greenline_client::ClientError> {
//!     let client = GatewayClient::new("http://localhost:9090");
//!
//!     let grant = client
//!         .assume_role("arn:aws:iam::123123123:role/deployer", "pipeline")
//!         .await?;
//!     println!("credentials valid until {}", grant.expires_at);
//!     Ok(())
//! }
//! ```

pub mod error;
mod deployments;
mod identity;
mod notifications;
mod registry;
mod sources;
mod storage;

// Re-export commonly used types
pub use error::{ClientError, Result};

use greenline_core::domain::credential::DelegatedCredential;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Request header carrying the delegated access key id
const HEADER_ACCESS_KEY_ID: &str = "x-gl-access-key-id";
/// Request header carrying the delegated secret access key
const HEADER_SECRET_ACCESS_KEY: &str = "x-gl-secret-access-key";
/// Request header carrying the delegated session token
const HEADER_SESSION_TOKEN: &str = "x-gl-session-token";

/// HTTP client for the cloud gateway
///
/// Methods are organized into logical groups:
/// - Identity: role assumption
/// - Sources & registry: source bundles, image detail, task definitions
/// - Storage: artifacts and parameters
/// - Deployments: create, status, continue, stop
/// - Notifications: approval notification publishing
#[derive(Debug, Clone)]
pub struct GatewayClient {
    /// Base URL of the gateway (e.g., "http://localhost:9090")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GatewayClient {
    /// Create a new gateway client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the gateway (e.g., "http://localhost:9090")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new gateway client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request & Response Handlers
    // =============================================================================

    /// Attach a delegated credential to a single outgoing request
    ///
    /// The credential is read at call time and not retained; dropping the
    /// stage-local credential scrubs the only copy of the secret material.
    fn delegated(&self, request: RequestBuilder, credential: &DelegatedCredential) -> RequestBuilder {
        request
            .header(HEADER_ACCESS_KEY_ID, credential.access_key_id())
            .header(HEADER_SECRET_ACCESS_KEY, credential.secret_access_key())
            .header(HEADER_SESSION_TOKEN, credential.session_token())
    }

    /// Handle a gateway response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle a gateway response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }

    /// Handle a gateway response carrying a raw object body
    async fn handle_bytes_response(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new("http://localhost:9090");
        assert_eq!(client.base_url(), "http://localhost:9090");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GatewayClient::new("http://localhost:9090/");
        assert_eq!(client.base_url(), "http://localhost:9090");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = GatewayClient::with_client("http://localhost:9090", http_client);
        assert_eq!(client.base_url(), "http://localhost:9090");
    }
}
