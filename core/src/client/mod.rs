//! Stateless HTTP request builder and response parser for the clinic API.
//!
//! # Design
//! `ApiClient` holds only the API base URL and carries no mutable state
//! between calls. Operations are grouped into namespaces (`patients`,
//! `staff`, `enlistments`, `raw`) borrowed from the client. Each operation
//! is split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. The caller executes the
//! actual HTTP round-trip, keeping the core deterministic and free of I/O.
//!
//! Constructing a client never touches the network, which is what lets the
//! mock-type generator introspect a real instance.

mod enlistments;
mod patients;
mod raw;
mod staff;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::shape::{Callable, Introspect, Namespace, ShapeNode};

pub use enlistments::Enlistments;
pub use patients::Patients;
pub use raw::Raw;
pub use staff::Staff;

/// Synchronous, stateless client for the clinic API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Build a client for the host named in `credentials`.
    ///
    /// A bare host name is assumed to be served over HTTPS.
    pub fn new(credentials: &Credentials) -> Self {
        let host = credentials.api_host.as_str();
        if host.contains("://") {
            Self::with_base_url(host)
        } else {
            Self::with_base_url(&format!("https://{host}"))
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn patients(&self) -> Patients<'_> {
        Patients::new(self)
    }

    pub fn staff(&self) -> Staff<'_> {
        Staff::new(self)
    }

    pub fn enlistments(&self) -> Enlistments<'_> {
        Enlistments::new(self)
    }

    /// Low-level request builders. Not part of [`Introspect::shape`]; the
    /// mock-type generator declares these verbs itself.
    pub fn raw(&self) -> Raw<'_> {
        Raw::new(self)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Introspect for ApiClient {
    fn shape(&self) -> ShapeNode {
        Namespace::new()
            .with("patients", self.patients().shape())
            .with("staff", self.staff().shape())
            .with("enlistments", self.enlistments().shape())
            .into()
    }
}

/// Describe a namespace of routed operations.
fn operations(routes: &[(&str, HttpMethod, &str)]) -> ShapeNode {
    routes
        .iter()
        .map(|(name, method, path)| {
            (
                (*name).to_string(),
                ShapeNode::from(Callable::route(*name, *method, *path)),
            )
        })
        .collect::<Namespace>()
        .into()
}

fn bare_request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        path: url,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: Serialize + ?Sized>(
    method: HttpMethod,
    url: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_vec(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path: url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    tracing::debug!(status = response.status, expected, "unexpected response status");
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
