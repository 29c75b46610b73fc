use uuid::Uuid;

use crate::error::ApiError;
use crate::form::{create_custom_form_data, generate_boundary, multipart_content_type};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::shape::{Introspect, ShapeNode};
use crate::types::{CreatePatient, Document, Patient, UpdatePatient};

use super::{bare_request, check_status, json_request, operations, parse_json, ApiClient};

/// Patient records and their documents.
#[derive(Debug, Clone, Copy)]
pub struct Patients<'a> {
    client: &'a ApiClient,
}

impl<'a> Patients<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.client.url("/patients"))
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        bare_request(HttpMethod::Get, self.client.url(&format!("/patients/{id}")))
    }

    pub fn build_create(&self, input: &CreatePatient) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.client.url("/patients"), input)
    }

    pub fn build_update(&self, id: Uuid, input: &UpdatePatient) -> Result<HttpRequest, ApiError> {
        json_request(
            HttpMethod::Patch,
            self.client.url(&format!("/patients/{id}")),
            input,
        )
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.client.url(&format!("/patients/{id}")))
    }

    /// Upload `contents` as a document of patient `id`, using a freshly
    /// generated boundary.
    pub fn build_upload_document(&self, id: Uuid, contents: &[u8]) -> HttpRequest {
        self.build_upload_document_with_boundary(id, contents, &generate_boundary())
    }

    /// Like [`Patients::build_upload_document`] with a caller-chosen boundary.
    /// The boundary must not occur inside `contents`.
    pub fn build_upload_document_with_boundary(
        &self,
        id: Uuid,
        contents: &[u8],
        boundary: &str,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: self.client.url(&format!("/patients/{id}/documents")),
            headers: vec![("content-type".to_string(), multipart_content_type(boundary))],
            body: Some(create_custom_form_data(contents, boundary)),
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Patient>, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        parse_json(&response, 201)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Patient, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_upload_document(&self, response: HttpResponse) -> Result<Document, ApiError> {
        parse_json(&response, 201)
    }
}

impl Introspect for Patients<'_> {
    fn shape(&self) -> ShapeNode {
        operations(&[
            ("list", HttpMethod::Get, "/patients"),
            ("get", HttpMethod::Get, "/patients/{id}"),
            ("create", HttpMethod::Post, "/patients"),
            ("update", HttpMethod::Patch, "/patients/{id}"),
            ("delete", HttpMethod::Delete, "/patients/{id}"),
            ("uploadDocument", HttpMethod::Post, "/patients/{id}/documents"),
        ])
    }
}
