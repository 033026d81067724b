// ABOUTME: In-process identity directory server for tests.
// ABOUTME: Serves canned entities over a real tonic listener and records every request it sees.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use netkeys_proto::server::{Directory, DirectoryServer};
use netkeys_proto::{Entity, EntityMeta, EntityRequest, EntityResponse, KeysRequest, KeysResponse};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use crate::interceptor::SERVICE_HEADER;

/// A request received by [`StubDirectory`], with its service identity header.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    EntityInfo {
        request: EntityRequest,
        service_header: Option<String>,
    },
    EntityKeys {
        request: KeysRequest,
        service_header: Option<String>,
    },
}

#[derive(Debug, Clone)]
struct StubEntity {
    locked: bool,
    keys: Vec<String>,
}

/// Canned identity directory. Clones share the request log.
#[derive(Debug, Clone, Default)]
pub struct StubDirectory {
    entities: HashMap<String, StubEntity>,
    keys_failure: Option<String>,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity whose keys are `"<TYPE>:<material>"` strings.
    pub fn entity(mut self, id: &str, locked: bool, keys: &[&str]) -> Self {
        self.entities.insert(
            id.to_string(),
            StubEntity {
                locked,
                keys: keys.iter().map(|k| k.to_string()).collect(),
            },
        );
        self
    }

    /// Fail every key listing with `Unavailable`.
    pub fn failing_keys(mut self, message: &str) -> Self {
        self.keys_failure = Some(message.to_string());
        self
    }

    /// Requests received so far.
    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of key listings received so far.
    pub fn key_requests(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|r| matches!(r, Recorded::EntityKeys { .. }))
            .count()
    }

    /// Serve on an ephemeral localhost port and return its `http://` URL.
    pub async fn serve(self) -> std::io::Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);

        tokio::spawn(async move {
            let result = Server::builder()
                .add_service(DirectoryServer::new(self))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "stub directory stopped");
            }
        });

        Ok(url)
    }

    fn record(&self, entry: Recorded) {
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.push(entry);
        }
    }
}

fn service_header<T>(request: &Request<T>) -> Option<String> {
    request
        .metadata()
        .get(SERVICE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tonic::async_trait]
impl Directory for StubDirectory {
    async fn entity_info(
        &self,
        request: Request<EntityRequest>,
    ) -> Result<Response<EntityResponse>, Status> {
        let service_header = service_header(&request);
        let request = request.into_inner();
        self.record(Recorded::EntityInfo {
            request: request.clone(),
            service_header,
        });

        let entity = self
            .entities
            .get(&request.entity_id)
            .ok_or_else(|| Status::not_found(format!("no entity '{}'", request.entity_id)))?;

        Ok(Response::new(EntityResponse {
            entity: Some(Entity {
                id: request.entity_id.clone(),
                number: 0,
                meta: Some(EntityMeta {
                    locked: entity.locked,
                    ..EntityMeta::default()
                }),
            }),
        }))
    }

    async fn entity_keys(
        &self,
        request: Request<KeysRequest>,
    ) -> Result<Response<KeysResponse>, Status> {
        let service_header = service_header(&request);
        let request = request.into_inner();
        self.record(Recorded::EntityKeys {
            request: request.clone(),
            service_header,
        });

        if let Some(message) = &self.keys_failure {
            return Err(Status::unavailable(message.clone()));
        }

        let entity = self
            .entities
            .get(&request.entity_id)
            .ok_or_else(|| Status::not_found(format!("no entity '{}'", request.entity_id)))?;

        Ok(Response::new(KeysResponse {
            keys: entity.keys.clone(),
        }))
    }
}
