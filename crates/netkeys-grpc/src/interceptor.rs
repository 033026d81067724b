// ABOUTME: gRPC interceptor tagging every request with the caller's service identity.
// ABOUTME: Adds the x-netkeys-service metadata header used for audit on the directory side.

use tonic::service::Interceptor;

/// Metadata key carrying the service identity.
pub const SERVICE_HEADER: &str = "x-netkeys-service";

/// Interceptor that adds the service identity header to requests
#[derive(Debug, Clone)]
pub struct ServiceInterceptor {
    service: String,
}

impl ServiceInterceptor {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Interceptor for ServiceInterceptor {
    fn call(&mut self, mut req: tonic::Request<()>) -> Result<tonic::Request<()>, tonic::Status> {
        let value = self
            .service
            .parse()
            .map_err(|_| tonic::Status::invalid_argument("invalid service name"))?;
        req.metadata_mut().insert(SERVICE_HEADER, value);
        Ok(req)
    }
}
