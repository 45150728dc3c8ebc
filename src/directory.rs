//! Directory service client
//!
//! Issues the single authenticated lookup against the remote directory
//! service (a bwIDM-style registration app) and decodes its JSON response
//! into [`UserRecord`]s.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};

/// Attribute key carrying the username (LDAP uid OID)
pub const ATTR_USERNAME: &str = "urn:oid:0.9.2342.19200300.100.1.1";

/// Attribute key carrying the organization id
pub const ATTR_ORG_ID: &str = "http://bwidm.de/bwidmOrgId";

/// Generic-store key carrying the embedded SSH key payload
pub const GENERIC_SSH_KEY: &str = "ssh_key";

/// Characters escaped when the username is placed in the URL path.
/// Includes `/` and `%` so a hostile username cannot extend the path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/');

/// One user entry returned by the directory service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Federated attributes, keyed by URN/URL
    #[serde(default)]
    pub attribute_store: HashMap<String, String>,

    /// Service-specific values, keyed by name
    #[serde(default)]
    pub generic_store: HashMap<String, String>,

    /// Numeric POSIX uid assigned by the registration app
    #[serde(default)]
    pub uid_number: i64,
}

impl UserRecord {
    /// Username attribute, if present
    pub fn username(&self) -> Option<&str> {
        self.attribute_store.get(ATTR_USERNAME).map(String::as_str)
    }

    /// Organization id attribute, if present
    pub fn org_id(&self) -> Option<&str> {
        self.attribute_store.get(ATTR_ORG_ID).map(String::as_str)
    }

    /// Raw embedded SSH key payload, if present
    pub fn ssh_key_payload(&self) -> Option<&str> {
        self.generic_store.get(GENERIC_SSH_KEY).map(String::as_str)
    }
}

/// Transport options for the directory client
///
/// Kept explicit so the TLS bypass is a constructor argument rather than a
/// global toggle read deep inside the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientOptions {
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl ClientOptions {
    /// Derive options from the process environment
    ///
    /// `HTTPS_INSECURE` disables certificate verification by presence alone;
    /// any value, including the empty string, triggers it.
    pub fn from_env() -> Self {
        Self {
            accept_invalid_certs: std::env::var_os("HTTPS_INSECURE").is_some(),
        }
    }
}

/// Client for the directory service's external-user lookup
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
    base_url: String,
    rest_user: String,
    rest_password: String,
}

impl DirectoryClient {
    /// Create a client from the loaded configuration
    pub fn new(config: &Config, options: ClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if options.accept_invalid_certs {
            tracing::warn!("TLS certificate verification disabled via HTTPS_INSECURE");
            builder = builder.danger_accept_invalid_certs(true);
        }
        // TODO: requests currently run without a timeout; agree on a value
        // with the registration app operators before introducing one.
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            rest_user: config.rest_user.clone(),
            rest_password: config.rest_password.clone(),
        })
    }

    /// Look up all records for a username at the directory service
    ///
    /// Transport failures surface as [`Error::Request`]; an unreadable body
    /// as [`Error::Body`]; a malformed top-level response as [`Error::Json`].
    pub async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>> {
        let url = find_url(&self.base_url, username);
        tracing::debug!(%url, "Querying directory service");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.rest_user, Some(&self.rest_password))
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Directory service responded");

        let body = response.text().await.map_err(Error::Body)?;
        let records: Vec<UserRecord> = serde_json::from_str(&body)?;

        tracing::debug!(records = records.len(), "Decoded directory response");
        Ok(records)
    }
}

/// Build the lookup URL for a username
///
/// The base URL is concatenated as configured (it is expected to end with a
/// slash); only the username segment is percent-encoded.
pub fn find_url(base_url: &str, username: &str) -> String {
    format!(
        "{}external-user/find/attribute/{}/{}",
        base_url,
        ATTR_USERNAME,
        utf8_percent_encode(username, PATH_SEGMENT)
    )
}

/// Keep only the records belonging to the requested organization
///
/// Exact string equality; records without an org id attribute never match.
/// More than one match is possible and all are kept, in response order.
pub fn filter_by_org<'a>(records: &'a [UserRecord], org_id: &str) -> Vec<&'a UserRecord> {
    records
        .iter()
        .filter(|r| r.org_id() == Some(org_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(org_id: &str, payload: &str) -> UserRecord {
        let mut attribute_store = HashMap::new();
        attribute_store.insert(ATTR_USERNAME.to_string(), "jdoe".to_string());
        attribute_store.insert(ATTR_ORG_ID.to_string(), org_id.to_string());
        let mut generic_store = HashMap::new();
        generic_store.insert(GENERIC_SSH_KEY.to_string(), payload.to_string());
        UserRecord {
            attribute_store,
            generic_store,
            uid_number: 900001,
        }
    }

    #[test]
    fn test_find_url_plain() {
        let url = find_url("https://directory.example.org/rest/", "jdoe");
        assert_eq!(
            url,
            "https://directory.example.org/rest/external-user/find/attribute/urn:oid:0.9.2342.19200300.100.1.1/jdoe"
        );
    }

    #[test]
    fn test_find_url_escapes_username() {
        let url = find_url("https://directory.example.org/rest/", "j doe/../x");
        assert!(url.ends_with("/j%20doe%2F..%2Fx"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_record_accessors() {
        let r = record("uni", "[]");
        assert_eq!(r.username(), Some("jdoe"));
        assert_eq!(r.org_id(), Some("uni"));
        assert_eq!(r.ssh_key_payload(), Some("[]"));
        assert_eq!(r.uid_number, 900001);
    }

    #[test]
    fn test_decode_record_json() {
        let json = r#"{
            "attributeStore": {
                "urn:oid:0.9.2342.19200300.100.1.1": "jdoe",
                "http://bwidm.de/bwidmOrgId": "uni"
            },
            "genericStore": {
                "ssh_key": "[{'name': 'key0', 'value': 'ssh-ed25519 AAAA'}]"
            },
            "uidNumber": 900001
        }"#;

        let r: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.org_id(), Some("uni"));
        assert_eq!(r.uid_number, 900001);
        assert!(r.ssh_key_payload().unwrap().contains("ssh-ed25519"));
    }

    #[test]
    fn test_decode_record_missing_stores() {
        let r: UserRecord = serde_json::from_str(r#"{ "uidNumber": 1 }"#).unwrap();
        assert_eq!(r.username(), None);
        assert_eq!(r.org_id(), None);
        assert_eq!(r.ssh_key_payload(), None);
    }

    #[test]
    fn test_filter_by_org() {
        let records = vec![record("orgA", "[]"), record("orgB", "[]")];
        let matches = filter_by_org(&records, "orgA");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].org_id(), Some("orgA"));

        assert!(filter_by_org(&records, "orgC").is_empty());
    }
}
