// ABOUTME: Error types for the netkeys-grpc crate.
// ABOUTME: Channel setup errors and the mapping from gRPC status codes to service errors.

use netkeys_core::ServiceError;
use thiserror::Error;
use tonic::Code;

/// Errors that can occur while setting up the gRPC client.
#[derive(Error, Debug)]
pub enum GrpcClientError {
    /// Invalid server address format.
    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    /// Failed to connect to the server.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Map a gRPC status onto the lookup core's service error.
pub fn service_error(status: tonic::Status) -> ServiceError {
    let message = status.message().to_string();
    match status.code() {
        Code::NotFound => ServiceError::NotFound(message),
        Code::PermissionDenied | Code::Unauthenticated => ServiceError::PermissionDenied(message),
        Code::Unavailable | Code::DeadlineExceeded => ServiceError::Unavailable(message),
        _ => ServiceError::Remote(status.to_string()),
    }
}
