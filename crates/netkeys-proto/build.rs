// ABOUTME: Build script generating the Directory gRPC client and server.
// ABOUTME: Uses tonic-build's manual builder so proto-src/directory.proto builds without protoc.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn main() {
    let directory = Service::builder()
        .name("Directory")
        .package("netkeys.directory.v1")
        .method(
            Method::builder()
                .name("entity_info")
                .route_name("EntityInfo")
                .input_type("crate::messages::EntityRequest")
                .output_type("crate::messages::EntityResponse")
                .codec_path(CODEC)
                .build(),
        )
        .method(
            Method::builder()
                .name("entity_keys")
                .route_name("EntityKeys")
                .input_type("crate::messages::KeysRequest")
                .output_type("crate::messages::KeysResponse")
                .codec_path(CODEC)
                .build(),
        )
        .build();

    Builder::new().compile(&[directory]);

    // Rerun if the wire contract or the message definitions change
    println!("cargo:rerun-if-changed=proto-src/directory.proto");
    println!("cargo:rerun-if-changed=src/messages.rs");
}
