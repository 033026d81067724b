// ABOUTME: gRPC client for the identity directory used by netkeys.
// ABOUTME: Provides channel creation, service identity injection, and the IdentityService implementation.

pub mod channel;
pub mod client;
pub mod error;
pub mod interceptor;
#[doc(hidden)]
pub mod testing;

// Channel creation
pub use channel::{create_channel, ChannelConfig, DEFAULT_PORT};

// Directory client
pub use client::GrpcIdentityService;

// Error types
pub use error::{service_error, GrpcClientError};

pub use interceptor::{ServiceInterceptor, SERVICE_HEADER};

// Re-export proto types for convenience
pub use netkeys_proto;
