//! Synchronous API client core for the clinic service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `ApiClient` is stateless and holds only the base URL taken from
//!   `Credentials`, which are passed in explicitly.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `shape` turns a constructed client into a mock type declaration; see
//!   [`shape::generate_mock_types`].
//! - `form` holds the multipart encoder used for document uploads.

pub mod client;
pub mod credentials;
pub mod error;
pub mod form;
pub mod http;
pub mod shape;
pub mod types;

pub use client::{ApiClient, Enlistments, Patients, Raw, Staff};
pub use credentials::Credentials;
pub use error::{ApiError, CredentialsError, ShapeError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use shape::{generate_mock_types, Introspect, ShapeNode};
pub use types::{
    CreateEnlistment, CreatePatient, CreateStaffMember, Document, Enlistment, Patient, StaffMember,
    StaffRole, UpdatePatient,
};
