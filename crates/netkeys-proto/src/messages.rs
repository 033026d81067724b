// ABOUTME: Prost message definitions for the identity directory service.
// ABOUTME: Hand-written from proto-src/directory.proto; field numbers are checked against it.

/// Identifies the caller: the configured service name and the local host.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientInfo {
    #[prost(string, tag = "1")]
    pub service: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub client: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityRequest {
    #[prost(message, optional, tag = "1")]
    pub info: ::core::option::Option<ClientInfo>,
    #[prost(string, tag = "2")]
    pub entity_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityMeta {
    #[prost(bool, tag = "1")]
    pub locked: bool,
    #[prost(string, tag = "2")]
    pub display_name: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub groups: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Entity {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(int32, tag = "2")]
    pub number: i32,
    #[prost(message, optional, tag = "3")]
    pub meta: ::core::option::Option<EntityMeta>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntityResponse {
    #[prost(message, optional, tag = "1")]
    pub entity: ::core::option::Option<Entity>,
}

/// Key listing request. `mode` is the credential scope ("READ").
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeysRequest {
    #[prost(message, optional, tag = "1")]
    pub info: ::core::option::Option<ClientInfo>,
    #[prost(string, tag = "2")]
    pub entity_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub mode: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub key_type: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub token: ::prost::alloc::string::String,
}

/// Stored keys as `"<TYPE>:<material>"` strings.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeysResponse {
    #[prost(string, repeated, tag = "1")]
    pub keys: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
