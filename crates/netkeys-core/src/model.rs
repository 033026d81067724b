// ABOUTME: Data model for entity key lookups.
// ABOUTME: Entity identifiers, metadata, key types, key collections, and read-only key queries.

use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of an entity. Passed through to the identity service as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Entity metadata as returned by the identity service.
///
/// Only `locked` drives any decision. `display_name` is logged once the
/// entity has passed the lock check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMetadata {
    pub locked: bool,
    pub display_name: Option<String>,
}

/// Key type tag in canonical uppercase form ("SSH", "PGP", ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyType(String);

impl KeyType {
    /// Normalize a case-insensitive tag to its canonical uppercase form.
    pub fn new(tag: &str) -> Self {
        Self(tag.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored key material grouped by key type.
///
/// Keys of one type keep the order in which they were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCollection {
    keys: BTreeMap<KeyType, Vec<String>>,
}

impl KeyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key of the given type.
    pub fn push(&mut self, key_type: KeyType, key: impl Into<String>) {
        self.keys.entry(key_type).or_default().push(key.into());
    }

    /// Keys stored for `key_type`, empty when the entity has none of that type.
    pub fn get(&self, key_type: &KeyType) -> &[String] {
        self.keys.get(key_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Build a collection from `"<TYPE>:<material>"` entries.
    ///
    /// The tag before the first `:` is normalized to uppercase; the material
    /// after it is kept verbatim. Entries without a separator are skipped.
    pub fn from_tagged<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collection = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once(':') {
                Some((tag, material)) => collection.push(KeyType::new(tag), material),
                None => {
                    tracing::warn!(entry_len = entry.len(), "skipping untagged key entry");
                }
            }
        }
        collection
    }
}

/// Credential scope requested from the identity service.
///
/// Only read access exists: key lookups publish stored material and never
/// alter it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScope {
    Read,
}

impl CredentialScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialScope::Read => "READ",
        }
    }
}

/// Name the caller presents to the identity service for audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity(String);

impl ServiceIdentity {
    pub const DEFAULT: &'static str = "netkeys";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parameters of a key fetch against the identity service.
///
/// Only constructible through [`KeyQuery::read_only`], so every query carries
/// the read scope and no token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyQuery {
    entity: EntityId,
    scope: CredentialScope,
    key_type: KeyType,
    token: Option<String>,
}

impl KeyQuery {
    pub fn read_only(entity: EntityId, key_type: KeyType) -> Self {
        Self {
            entity,
            scope: CredentialScope::Read,
            key_type,
            token: None,
        }
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    pub fn scope(&self) -> CredentialScope {
        self.scope
    }

    pub fn key_type(&self) -> &KeyType {
        &self.key_type
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
