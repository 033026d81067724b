// ABOUTME: gRPC implementation of the lookup core's IdentityService trait.
// ABOUTME: Converts directory responses into entity metadata and key collections.

use async_trait::async_trait;
use netkeys_core::{
    EntityId, EntityMetadata, IdentityService, KeyCollection, KeyQuery, ServiceError,
    ServiceIdentity,
};
use netkeys_proto::client::DirectoryClient;
use netkeys_proto::{ClientInfo, EntityMeta, EntityRequest, KeysRequest};
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;

use crate::channel::{create_channel, ChannelConfig};
use crate::error::{service_error, GrpcClientError};
use crate::interceptor::ServiceInterceptor;

type Client = DirectoryClient<InterceptedService<Channel, ServiceInterceptor>>;

/// Identity directory reached over gRPC.
#[derive(Debug, Clone)]
pub struct GrpcIdentityService {
    client: Client,
    info: ClientInfo,
}

impl GrpcIdentityService {
    /// Connect to the directory described by `config`, identifying as `service`.
    pub async fn connect(
        config: &ChannelConfig,
        service: &ServiceIdentity,
    ) -> Result<Self, GrpcClientError> {
        let channel = create_channel(config).await?;
        Ok(Self::new(channel, service, local_hostname()))
    }

    /// Wrap an existing channel.
    pub fn new(channel: Channel, service: &ServiceIdentity, client_name: String) -> Self {
        let interceptor = ServiceInterceptor::new(service.as_str());
        Self {
            client: DirectoryClient::with_interceptor(channel, interceptor),
            info: ClientInfo {
                service: service.as_str().to_string(),
                client: client_name,
            },
        }
    }
}

fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default()
}

fn metadata(meta: Option<EntityMeta>) -> EntityMetadata {
    let meta = meta.unwrap_or_default();
    EntityMetadata {
        locked: meta.locked,
        display_name: Some(meta.display_name).filter(|name| !name.is_empty()),
    }
}

#[async_trait]
impl IdentityService for GrpcIdentityService {
    async fn entity_info(&self, id: &EntityId) -> Result<EntityMetadata, ServiceError> {
        let request = EntityRequest {
            info: Some(self.info.clone()),
            entity_id: id.as_str().to_string(),
        };

        let response = self
            .client
            .clone()
            .entity_info(request)
            .await
            .map_err(service_error)?
            .into_inner();

        let entity = response
            .entity
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        Ok(metadata(entity.meta))
    }

    async fn entity_keys(&self, query: &KeyQuery) -> Result<KeyCollection, ServiceError> {
        let request = KeysRequest {
            info: Some(self.info.clone()),
            entity_id: query.entity().as_str().to_string(),
            mode: query.scope().as_str().to_string(),
            key_type: query.key_type().as_str().to_string(),
            token: query.token().unwrap_or_default().to_string(),
        };

        let response = self
            .client
            .clone()
            .entity_keys(request)
            .await
            .map_err(service_error)?
            .into_inner();

        Ok(KeyCollection::from_tagged(response.keys))
    }
}
