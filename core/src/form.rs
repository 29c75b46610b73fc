//! Multipart form-data helpers for document uploads.
//!
//! The payload always carries exactly one part named `file` with filename
//! `data`. Neither `value` nor `boundary` is validated: the caller must make
//! sure the boundary does not occur inside the value.

use rand::Rng;

/// Number of leading dashes in a generated boundary.
pub const BOUNDARY_PREFIX_LEN: usize = 26;
/// Number of random characters following the dashes.
pub const BOUNDARY_RANDOM_LEN: usize = 24;

/// Generate a 50 character multipart boundary.
///
/// The random tail is drawn from the decimal digits only. Each character
/// comes from a 0-9 value, so the boundary never contains `a`-`f` even
/// though it reads like a hex token.
pub fn generate_boundary() -> String {
    let mut rng = rand::thread_rng();
    let mut boundary = "-".repeat(BOUNDARY_PREFIX_LEN);
    boundary.extend((0..BOUNDARY_RANDOM_LEN).map(|_| char::from(b'0' + rng.gen_range(0..10u8))));
    boundary
}

/// Build a single-part multipart body around `value`.
///
/// There is no line terminator after the closing `--{boundary}--` marker.
pub fn create_custom_form_data(value: &[u8], boundary: &str) -> Vec<u8> {
    let head = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"data\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    );
    let tail = format!("\r\n--{boundary}--");

    let mut body = Vec::with_capacity(head.len() + value.len() + tail.len());
    body.extend_from_slice(head.as_bytes());
    body.extend_from_slice(value);
    body.extend_from_slice(tail.as_bytes());
    body
}

/// `Content-Type` header value announcing `boundary`.
pub fn multipart_content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_dashes_then_digits() {
        for _ in 0..100 {
            let boundary = generate_boundary();
            assert_eq!(boundary.len(), 50);
            assert!(boundary[..BOUNDARY_PREFIX_LEN].chars().all(|c| c == '-'));
            assert!(boundary[BOUNDARY_PREFIX_LEN..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn form_data_is_bit_exact() {
        let body = create_custom_form_data(b"hello", "XYZ");
        let expected = "--XYZ\r\n\
                        Content-Disposition: form-data; name=\"file\"; filename=\"data\"\r\n\
                        Content-Type: application/octet-stream\r\n\
                        \r\n\
                        hello\r\n\
                        --XYZ--";
        assert_eq!(body, expected.as_bytes());
    }

    #[test]
    fn form_data_keeps_binary_payload() {
        let value = [0u8, 159, 146, 150, b'\r', b'\n'];
        let boundary = generate_boundary();
        let body = create_custom_form_data(&value, &boundary);
        assert!(body.starts_with(format!("--{boundary}\r\n").as_bytes()));
        assert!(body.ends_with(format!("--{boundary}--").as_bytes()));
        assert!(body.windows(value.len()).any(|w| w == value));
    }

    #[test]
    fn empty_value_still_has_both_markers() {
        let body = String::from_utf8(create_custom_form_data(b"", "b")).unwrap();
        assert!(body.starts_with("--b\r\n"));
        assert!(body.ends_with("\r\n\r\n\r\n--b--"));
    }

    #[test]
    fn content_type_names_boundary() {
        assert_eq!(
            multipart_content_type("--123"),
            "multipart/form-data; boundary=--123"
        );
    }
}
