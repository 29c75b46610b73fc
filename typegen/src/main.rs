//! Prints the mock type declaration for the clinic API client.
//!
//! Takes no arguments. The declaration goes to stdout; diagnostics go to
//! stderr and are controlled by `RUST_LOG`. Any failure exits non-zero.

use anyhow::{Context, Result};
use clinic_core::{generate_mock_types, ApiClient, Credentials};
use tracing_subscriber::EnvFilter;

/// Host used for the introspected client. Building a client only stores the
/// host, so nothing is contacted.
const OFFLINE_HOST: &str = "http://localhost";

/// Construct a client without touching the network or any credentials file.
fn offline_client() -> ApiClient {
    let credentials = Credentials {
        api_host: OFFLINE_HOST.to_string(),
        oauth_consumer_key: String::new(),
        oauth_consumer_secret: String::new(),
        oauth_token: String::new(),
        oauth_token_secret: String::new(),
    };
    ApiClient::new(&credentials)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let client = offline_client();
    tracing::debug!(base_url = client.base_url(), "introspecting client");

    let text = generate_mock_types(&client).context("failed to generate mock client type")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_client_output_starts_with_label() {
        let text = generate_mock_types(&offline_client()).unwrap();
        assert!(text.starts_with("export type MockClient<MockFn> =\n{\n  patients: {"));
        assert!(text.ends_with("\n};"));
    }
}
