// ABOUTME: Re-exports wire messages and generated gRPC code for the identity directory.
// ABOUTME: Single source of truth for netkeys request and response types.

#![allow(clippy::derive_partial_eq_without_eq)]

pub mod messages;

/// Generated tonic client and server for `netkeys.directory.v1.Directory`.
pub mod directory {
    tonic::include_proto!("netkeys.directory.v1.Directory");
}

pub use messages::*;

// Re-export client types under a client module
pub mod client {
    pub use super::directory::directory_client::DirectoryClient;
}

// Re-export server types under a server module
pub mod server {
    pub use super::directory::directory_server::{Directory, DirectoryServer};
}
