use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::shape::{Introspect, ShapeNode};
use crate::types::{CreateEnlistment, Enlistment};

use super::{bare_request, check_status, json_request, operations, parse_json, ApiClient};

/// Links between patients and the staff members they are enlisted with.
#[derive(Debug, Clone, Copy)]
pub struct Enlistments<'a> {
    client: &'a ApiClient,
}

impl<'a> Enlistments<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.client.url("/enlistments"))
    }

    pub fn build_create(&self, input: &CreateEnlistment) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.client.url("/enlistments"), input)
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.client.url(&format!("/enlistments/{id}")))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Enlistment>, ApiError> {
        parse_json(&response, 200)
    }

    /// A 404 here means the patient or the staff member does not exist.
    pub fn parse_create(&self, response: HttpResponse) -> Result<Enlistment, ApiError> {
        parse_json(&response, 201)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

impl Introspect for Enlistments<'_> {
    fn shape(&self) -> ShapeNode {
        operations(&[
            ("list", HttpMethod::Get, "/enlistments"),
            ("create", HttpMethod::Post, "/enlistments"),
            ("delete", HttpMethod::Delete, "/enlistments/{id}"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:3000")
    }

    #[test]
    fn build_create_references_both_ids() {
        let input = CreateEnlistment {
            patient_id: Uuid::nil(),
            staff_member_id: Uuid::from_u128(u128::MAX),
            note: None,
        };
        let req = client().enlistments().build_create(&input).unwrap();
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["patientId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(body["staffMemberId"], "ffffffff-ffff-ffff-ffff-ffffffffffff");
        assert!(body.get("note").is_none());
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().enlistments().build_delete(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(
            req.path,
            "http://localhost:3000/enlistments/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn parse_list_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"[{"id":"00000000-0000-0000-0000-000000000001","patientId":"00000000-0000-0000-0000-000000000002","staffMemberId":"00000000-0000-0000-0000-000000000003","note":"weekly"}]"#.to_string(),
        };
        let list = client().enlistments().parse_list(response).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].note.as_deref(), Some("weekly"));
    }
}
