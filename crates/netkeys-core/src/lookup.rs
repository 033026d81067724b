// ABOUTME: The key lookup pipeline: resolve, gate, select, emit.
// ABOUTME: Decides which stored keys of an entity may be printed and with what status.

use std::io::Write;

use crate::error::{LookupError, Result, RetrievalError};
use crate::model::{EntityId, EntityMetadata, KeyQuery, KeyType};
use crate::service::IdentityService;
use crate::status::ExitStatus;

/// One key lookup: which entity, which type of key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub entity: EntityId,
    pub key_type: KeyType,
}

impl LookupRequest {
    pub fn new(entity: impl Into<EntityId>, key_type: &str) -> Self {
        Self {
            entity: entity.into(),
            key_type: KeyType::new(key_type),
        }
    }
}

/// Fetch the metadata of `id`.
pub async fn resolve<S>(
    service: &S,
    id: &EntityId,
) -> std::result::Result<EntityMetadata, LookupError>
where
    S: IdentityService + ?Sized,
{
    service
        .entity_info(id)
        .await
        .map_err(|source| LookupError {
            entity: id.clone(),
            source,
        })
}

/// Keys of an entity may be disclosed only while it is not locked.
pub fn is_disclosure_allowed(meta: &EntityMetadata) -> bool {
    !meta.locked
}

/// Fetch the entity's keys with read scope and return those of `key_type`,
/// in stored order.
pub async fn select_keys<S>(
    service: &S,
    id: &EntityId,
    key_type: &KeyType,
) -> std::result::Result<Vec<String>, RetrievalError>
where
    S: IdentityService + ?Sized,
{
    let query = KeyQuery::read_only(id.clone(), key_type.clone());
    let collection = service
        .entity_keys(&query)
        .await
        .map_err(|source| RetrievalError {
            entity: id.clone(),
            source,
        })?;

    let keys = collection.get(query.key_type()).to_vec();
    tracing::debug!(entity = %id, key_type = %key_type, count = keys.len(), "selected keys");
    Ok(keys)
}

/// Write one key per line to `out`.
///
/// A failing output stream does not change the status; the write error is
/// only logged.
pub fn emit<W: Write>(keys: &[String], out: &mut W) -> ExitStatus {
    let written = keys
        .iter()
        .try_for_each(|key| writeln!(out, "{key}"))
        .and_then(|()| out.flush());

    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to write keys");
    }
    ExitStatus::Success
}

/// Run a full lookup and write the disclosed keys to `out`.
///
/// A locked entity yields `Ok(ExitStatus::Success)` with nothing written and
/// no key fetch. Nothing is written to `out` unless the keys were retrieved.
pub async fn run<S, W>(service: &S, request: &LookupRequest, out: &mut W) -> Result<ExitStatus>
where
    S: IdentityService + ?Sized,
    W: Write,
{
    let meta = resolve(service, &request.entity).await?;

    if !is_disclosure_allowed(&meta) {
        return Ok(ExitStatus::Success);
    }
    tracing::debug!(
        entity = %request.entity,
        display_name = meta.display_name.as_deref().unwrap_or_default(),
        "entity resolved"
    );

    let keys = select_keys(service, &request.entity, &request.key_type).await?;
    Ok(emit(&keys, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{CredentialScope, KeyCollection};
    use crate::service::ServiceError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory identity service recording every key query it receives.
    #[derive(Default)]
    struct FakeDirectory {
        entities: HashMap<String, (EntityMetadata, KeyCollection)>,
        keys_error: Option<ServiceError>,
        key_queries: Mutex<Vec<KeyQuery>>,
    }

    impl FakeDirectory {
        fn with_entity(mut self, id: &str, meta: EntityMetadata, tagged: &[&str]) -> Self {
            self.entities
                .insert(id.to_string(), (meta, KeyCollection::from_tagged(tagged)));
            self
        }

        fn failing_keys(mut self, err: ServiceError) -> Self {
            self.keys_error = Some(err);
            self
        }

        fn key_query_count(&self) -> usize {
            self.key_queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl IdentityService for FakeDirectory {
        async fn entity_info(
            &self,
            id: &EntityId,
        ) -> std::result::Result<EntityMetadata, ServiceError> {
            self.entities
                .get(id.as_str())
                .map(|(meta, _)| meta.clone())
                .ok_or_else(|| ServiceError::NotFound(id.to_string()))
        }

        async fn entity_keys(
            &self,
            query: &KeyQuery,
        ) -> std::result::Result<KeyCollection, ServiceError> {
            self.key_queries.lock().unwrap().push(query.clone());
            if let Some(err) = &self.keys_error {
                return Err(err.clone());
            }
            self.entities
                .get(query.entity().as_str())
                .map(|(_, keys)| keys.clone())
                .ok_or_else(|| ServiceError::NotFound(query.entity().to_string()))
        }
    }

    fn meta(locked: bool) -> EntityMetadata {
        EntityMetadata {
            locked,
            ..EntityMetadata::default()
        }
    }

    fn directory() -> FakeDirectory {
        FakeDirectory::default()
            .with_entity(
                "alice",
                EntityMetadata {
                    locked: false,
                    display_name: Some("Alice Liddell".to_string()),
                },
                &["SSH:ssh-ed25519 AAA...", "PGP:pgp-alice", "SSH:ssh-rsa BBB..."],
            )
            .with_entity(
                "bob",
                EntityMetadata {
                    locked: true,
                    display_name: Some("Bob Locked".to_string()),
                },
                &["SSH:ssh-ed25519 BOB..."],
            )
            .with_entity("carol", meta(false), &["PGP:pgp-carol"])
    }

    async fn lookup(
        service: &FakeDirectory,
        id: &str,
        key_type: &str,
    ) -> (String, Result<ExitStatus>) {
        let mut out = Vec::new();
        let result = run(service, &LookupRequest::new(id, key_type), &mut out).await;
        (String::from_utf8(out).unwrap(), result)
    }

    #[tokio::test]
    async fn test_unlocked_entity_prints_keys_in_order() {
        let service = directory();
        let (out, result) = lookup(&service, "alice", "SSH").await;
        assert_eq!(out, "ssh-ed25519 AAA...\nssh-rsa BBB...\n");
        assert_eq!(result, Ok(ExitStatus::Success));
    }

    #[tokio::test]
    async fn test_locked_entity_is_silent_success() {
        let service = directory();
        let (out, result) = lookup(&service, "bob", "SSH").await;
        assert_eq!(out, "");
        assert_eq!(result, Ok(ExitStatus::Success));
        assert_eq!(service.key_query_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_type_prints_nothing() {
        let service = directory();
        let (out, result) = lookup(&service, "carol", "SSH").await;
        assert_eq!(out, "");
        assert_eq!(result, Ok(ExitStatus::Success));
    }

    #[tokio::test]
    async fn test_key_type_is_case_insensitive() {
        let service = directory();
        let (lower, lower_result) = lookup(&service, "alice", "ssh").await;
        let (upper, upper_result) = lookup(&service, "alice", "SSH").await;
        let (mixed, _) = lookup(&service, "alice", "pGp").await;
        assert_eq!(lower, upper);
        assert_eq!(lower_result, upper_result);
        assert_eq!(mixed, "pgp-alice\n");
    }

    #[tokio::test]
    async fn test_unknown_entity_fails_lookup_without_key_fetch() {
        let service = directory();
        let (out, result) = lookup(&service, "doesnotexist", "SSH").await;
        assert_eq!(out, "");
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Lookup(_)));
        assert_eq!(err.exit_status(), ExitStatus::LookupFailed);
        assert_eq!(service.key_query_count(), 0);
    }

    #[tokio::test]
    async fn test_key_fetch_failure_is_retrieval_error() {
        let service = directory()
            .with_entity(
                "erin",
                meta(false),
                &["SSH:ssh-ed25519 ERIN..."],
            )
            .failing_keys(ServiceError::Unavailable("transport error".to_string()));
        let (out, result) = lookup(&service, "erin", "SSH").await;
        assert_eq!(out, "");
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Retrieval(_)));
        assert_eq!(err.exit_status(), ExitStatus::RetrievalFailed);
        assert!(err.to_string().contains("transport error"));
    }

    #[tokio::test]
    async fn test_locked_entity_never_reaches_failing_key_fetch() {
        let service = directory().failing_keys(ServiceError::Remote("boom".to_string()));
        let (out, result) = lookup(&service, "bob", "SSH").await;
        assert_eq!(out, "");
        assert_eq!(result, Ok(ExitStatus::Success));
    }

    #[tokio::test]
    async fn test_key_query_is_read_only_without_token() {
        let service = directory();
        let _ = lookup(&service, "alice", "ssh").await;

        let queries = service.key_queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].scope(), CredentialScope::Read);
        assert_eq!(queries[0].token(), None);
        assert_eq!(queries[0].key_type().as_str(), "SSH");
        assert_eq!(queries[0].entity().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_identical() {
        let service = directory();
        let first = lookup(&service, "alice", "SSH").await;
        let second = lookup(&service, "alice", "SSH").await;
        assert_eq!(first, second);
    }

    /// Shared buffer standing in for the log output stream.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run a lookup with every log level enabled and return what was logged.
    async fn traced_lookup(
        service: &FakeDirectory,
        id: &str,
    ) -> (String, Result<ExitStatus>, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (out, result) = lookup(service, id, "SSH").await;
        (out, result, logs.contents())
    }

    #[tokio::test]
    async fn test_locked_entity_logs_nothing_at_trace() {
        let service = directory();
        let (out, result, logs) = traced_lookup(&service, "bob").await;
        assert_eq!(out, "");
        assert_eq!(result, Ok(ExitStatus::Success));
        assert_eq!(logs, "");
    }

    #[tokio::test]
    async fn test_unlocked_entity_logs_display_name_at_trace() {
        let service = directory();
        let (out, result, logs) = traced_lookup(&service, "alice").await;
        assert_eq!(out, "ssh-ed25519 AAA...\nssh-rsa BBB...\n");
        assert_eq!(result, Ok(ExitStatus::Success));
        assert!(logs.contains("Alice Liddell"));
        assert!(logs.contains("selected keys"));
    }

    #[test]
    fn test_gate() {
        assert!(is_disclosure_allowed(&meta(false)));
        assert!(!is_disclosure_allowed(&meta(true)));
    }

    #[test]
    fn test_emit_empty_writes_nothing() {
        let mut out = Vec::new();
        assert_eq!(emit(&[], &mut out), ExitStatus::Success);
        assert!(out.is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_ignores_broken_output() {
        let keys = vec!["ssh-ed25519 AAA".to_string()];
        assert_eq!(emit(&keys, &mut BrokenPipe), ExitStatus::Success);
    }
}
