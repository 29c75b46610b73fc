//! API credentials and the `KEY=VALUE` credential file decoder.
//!
//! # Design
//! Decoding is lenient about individual lines and strict about the result:
//! lines without an `=` are dropped, later duplicates overwrite earlier ones,
//! and the five required fields must all be present. Nothing here reads the
//! process environment; callers hand a `Credentials` value to
//! `ApiClient::new` explicitly.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::CredentialsError;

pub const API_HOST: &str = "API_HOST";
pub const API_OAUTH_CONSUMER_KEY: &str = "API_OAUTH_CONSUMER_KEY";
pub const API_OAUTH_CONSUMER_SECRET: &str = "API_OAUTH_CONSUMER_SECRET";
pub const API_OAUTH_TOKEN: &str = "API_OAUTH_TOKEN";
pub const API_OAUTH_TOKEN_SECRET: &str = "API_OAUTH_TOKEN_SECRET";

/// Host and OAuth 1.0 material needed to talk to the API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_host: String,
    pub oauth_consumer_key: String,
    pub oauth_consumer_secret: String,
    pub oauth_token: String,
    pub oauth_token_secret: String,
}

impl Credentials {
    /// Decode credentials from `KEY=VALUE` text.
    ///
    /// Lines are separated by `\n` with an optional trailing `\r`. Each line
    /// is split on its first `=`, so values may themselves contain `=`.
    pub fn decode(text: &str) -> Result<Self, CredentialsError> {
        let mut fields: HashMap<&str, &str> = HashMap::new();
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match line.split_once('=') {
                Some((key, value)) => {
                    fields.insert(key, value);
                }
                None if !line.is_empty() => {
                    tracing::debug!(line, "dropping credential line without `=`");
                }
                None => {}
            }
        }

        let require = |name: &'static str| -> Result<String, CredentialsError> {
            fields
                .get(name)
                .map(|value| (*value).to_string())
                .ok_or(CredentialsError::MissingField(name))
        };

        Ok(Self {
            api_host: require(API_HOST)?,
            oauth_consumer_key: require(API_OAUTH_CONSUMER_KEY)?,
            oauth_consumer_secret: require(API_OAUTH_CONSUMER_SECRET)?,
            oauth_token: require(API_OAUTH_TOKEN)?,
            oauth_token_secret: require(API_OAUTH_TOKEN_SECRET)?,
        })
    }

    /// Read and decode a credentials file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CredentialsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&text)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_host", &self.api_host)
            .field("oauth_consumer_key", &"<redacted>")
            .field("oauth_consumer_secret", &"<redacted>")
            .field("oauth_token", &"<redacted>")
            .field("oauth_token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "API_HOST=h\nAPI_OAUTH_CONSUMER_KEY=k\nAPI_OAUTH_CONSUMER_SECRET=s\nAPI_OAUTH_TOKEN=t\nAPI_OAUTH_TOKEN_SECRET=ts\n";

    #[test]
    fn decodes_all_fields() {
        let creds = Credentials::decode(FULL).unwrap();
        assert_eq!(
            creds,
            Credentials {
                api_host: "h".to_string(),
                oauth_consumer_key: "k".to_string(),
                oauth_consumer_secret: "s".to_string(),
                oauth_token: "t".to_string(),
                oauth_token_secret: "ts".to_string(),
            }
        );
    }

    #[test]
    fn missing_line_names_the_field() {
        let fields = [
            API_HOST,
            API_OAUTH_CONSUMER_KEY,
            API_OAUTH_CONSUMER_SECRET,
            API_OAUTH_TOKEN,
            API_OAUTH_TOKEN_SECRET,
        ];
        for field in fields {
            let text: String = FULL
                .lines()
                .filter(|line| line.split_once('=').map(|(k, _)| k) != Some(field))
                .map(|line| format!("{line}\n"))
                .collect();
            match Credentials::decode(&text) {
                Err(CredentialsError::MissingField(name)) => assert_eq!(name, field),
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let text = FULL.replace('\n', "\r\n");
        let creds = Credentials::decode(&text).unwrap();
        assert_eq!(creds.api_host, "h");
        assert_eq!(creds.oauth_token_secret, "ts");
    }

    #[test]
    fn drops_malformed_lines_and_keeps_last_duplicate() {
        let text = format!("# comment\ngarbage\n{FULL}API_HOST=second\n");
        let creds = Credentials::decode(&text).unwrap();
        assert_eq!(creds.api_host, "second");
    }

    #[test]
    fn value_may_contain_equals() {
        let text = FULL.replace("API_OAUTH_TOKEN_SECRET=ts", "API_OAUTH_TOKEN_SECRET=a=b==");
        let creds = Credentials::decode(&text).unwrap();
        assert_eq!(creds.oauth_token_secret, "a=b==");
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::decode(FULL).unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("api_host: \"h\""));
        assert!(!debug.contains("\"ts\""));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = Credentials::from_file("/nonexistent/credentials.env").unwrap_err();
        assert!(matches!(err, CredentialsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/credentials.env"));
    }
}
