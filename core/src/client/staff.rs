use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::shape::{Introspect, ShapeNode};
use crate::types::{CreateStaffMember, StaffMember};

use super::{bare_request, json_request, operations, parse_json, ApiClient};

/// Clinic staff directory.
#[derive(Debug, Clone, Copy)]
pub struct Staff<'a> {
    client: &'a ApiClient,
}

impl<'a> Staff<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.client.url("/staff"))
    }

    pub fn build_get(&self, id: Uuid) -> HttpRequest {
        bare_request(HttpMethod::Get, self.client.url(&format!("/staff/{id}")))
    }

    pub fn build_create(&self, input: &CreateStaffMember) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.client.url("/staff"), input)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<StaffMember>, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<StaffMember, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<StaffMember, ApiError> {
        parse_json(&response, 201)
    }
}

impl Introspect for Staff<'_> {
    fn shape(&self) -> ShapeNode {
        operations(&[
            ("list", HttpMethod::Get, "/staff"),
            ("get", HttpMethod::Get, "/staff/{id}"),
            ("create", HttpMethod::Post, "/staff"),
        ])
    }
}
