use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};

use super::{bare_request, json_request, ApiClient};

/// Arbitrary requests against the API host.
///
/// Paths are resolved relative to the client's base URL. Responses are
/// parsed by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Raw<'a> {
    client: &'a ApiClient,
}

impl<'a> Raw<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Request with an explicit method, headers and optional raw body.
    pub fn request(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            path: self.client.url(path),
            headers,
            body,
        }
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        bare_request(HttpMethod::Get, self.client.url(path))
    }

    pub fn head(&self, path: &str) -> HttpRequest {
        bare_request(HttpMethod::Head, self.client.url(path))
    }

    pub fn options(&self, path: &str) -> HttpRequest {
        bare_request(HttpMethod::Options, self.client.url(path))
    }

    pub fn delete(&self, path: &str) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.client.url(path))
    }

    pub fn post<T: Serialize + ?Sized>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.client.url(path), input)
    }

    pub fn put<T: Serialize + ?Sized>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.client.url(path), input)
    }

    pub fn patch<T: Serialize + ?Sized>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Patch, self.client.url(path), input)
    }

    /// Build several requests at once, resolving each path against the base
    /// URL. Order is preserved.
    pub fn all<'p, I>(&self, requests: I) -> Vec<HttpRequest>
    where
        I: IntoIterator<Item = (HttpMethod, &'p str)>,
    {
        requests
            .into_iter()
            .map(|(method, path)| bare_request(method, self.client.url(path)))
            .collect()
    }
}
