// ABOUTME: gRPC channel creation with timeout and TLS configuration.
// ABOUTME: Builds one-shot channels to the identity directory, optionally pinned to a custom CA.

use std::time::Duration;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};

use crate::error::GrpcClientError;

/// Default identity directory port.
pub const DEFAULT_PORT: u16 = 1729;

/// Configuration for creating a gRPC channel.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Server address to connect to (e.g., "https://netauth.example.com:1729").
    pub address: String,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
    /// Per-request timeout.
    pub request_timeout: Option<Duration>,
    /// Enable TLS for the connection.
    pub use_tls: bool,
    /// PEM-encoded CA certificate used instead of the system roots.
    pub ca_certificate: Option<Vec<u8>>,
}

impl ChannelConfig {
    /// Create a channel config with default settings.
    /// Auto-detects TLS from URL scheme (https:// enables TLS).
    pub fn new(address: impl Into<String>) -> Self {
        let addr = address.into().trim().to_string();
        let use_tls = Self::detect_tls(&addr);
        Self {
            address: addr,
            connect_timeout: Some(Duration::from_secs(10)),
            request_timeout: Some(Duration::from_secs(10)),
            use_tls,
            ca_certificate: None,
        }
    }

    /// Build a config from a bare host and port.
    pub fn for_server(server: &str, port: u16, use_tls: bool) -> Self {
        let scheme = if use_tls { "https" } else { "http" };
        Self::new(format!("{}://{}:{}", scheme, server.trim(), port))
    }

    /// Detect TLS from URL scheme (case-insensitive).
    fn detect_tls(addr: &str) -> bool {
        addr.to_lowercase().starts_with("https://")
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Trust `pem` as the CA for this connection.
    pub fn with_ca_certificate(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_certificate = Some(pem.into());
        self
    }
}

/// Create a gRPC channel with the specified configuration.
pub async fn create_channel(config: &ChannelConfig) -> Result<Channel, GrpcClientError> {
    let mut endpoint = Endpoint::from_shared(config.address.clone())
        .map_err(|e| GrpcClientError::InvalidAddress(e.to_string()))?;

    // Apply TLS if configured
    if config.use_tls {
        let tls = match &config.ca_certificate {
            Some(pem) => ClientTlsConfig::new().ca_certificate(Certificate::from_pem(pem)),
            None => ClientTlsConfig::new().with_native_roots(),
        };
        endpoint = endpoint
            .tls_config(tls)
            .map_err(|e| GrpcClientError::ConnectionFailed(format!("TLS config error: {}", e)))?;
    }

    if let Some(timeout) = config.connect_timeout {
        endpoint = endpoint.connect_timeout(timeout);
    }

    if let Some(timeout) = config.request_timeout {
        endpoint = endpoint.timeout(timeout);
    }

    let channel = endpoint
        .connect()
        .await
        .map_err(|e| GrpcClientError::ConnectionFailed(e.to_string()))?;

    tracing::debug!(
        address = %config.address,
        use_tls = config.use_tls,
        custom_ca = config.ca_certificate.is_some(),
        "gRPC channel connected"
    );

    Ok(channel)
}
