// ABOUTME: Lookup core for netkeys: resolve an entity, gate on its lock state, select keys.
// ABOUTME: The identity service is injected through the IdentityService trait.

pub mod error;
pub mod lookup;
pub mod model;
pub mod service;
pub mod status;

pub use error::{Error, LookupError, Result, RetrievalError};
pub use lookup::{emit, is_disclosure_allowed, resolve, run, select_keys, LookupRequest};
pub use model::{
    CredentialScope, EntityId, EntityMetadata, KeyCollection, KeyQuery, KeyType, ServiceIdentity,
};
pub use service::{IdentityService, ServiceError};
pub use status::ExitStatus;
