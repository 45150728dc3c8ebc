//! SSH key payload decoding and rendering
//!
//! The directory service stores each user's key list as a JSON-like string
//! that uses single quotes where JSON wants double quotes. Decoding swaps
//! every single quote for a double quote and then parses as JSON. The swap
//! is a blind character substitution with no escaping; a key value that
//! itself contains an apostrophe will fail to decode, same as it does for
//! every other consumer of this format.

use serde::Deserialize;

use crate::directory::UserRecord;
use crate::error::Result;

/// One named SSH key from a user's embedded key list
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SshKeyEntry {
    /// Label the user gave the key
    pub name: String,
    /// The SSH public key line itself
    pub value: String,
}

/// Translate the single-quoted payload dialect into standard JSON
fn normalize_quotes(raw: &str) -> String {
    raw.replace('\'', "\"")
}

/// Decode a raw embedded payload into key entries
pub fn parse_entries(raw: &str) -> Result<Vec<SshKeyEntry>> {
    Ok(serde_json::from_str(&normalize_quotes(raw))?)
}

/// Render a record's SSH keys, one key value per line
///
/// Every key line carries a trailing newline, including the last. A missing
/// or undecodable payload renders as an empty block: the failure is logged
/// and the run continues, unlike a malformed top-level response.
pub fn render_keys(record: &UserRecord) -> String {
    let Some(raw) = record.ssh_key_payload() else {
        tracing::warn!(
            username = record.username().unwrap_or("<unknown>"),
            "Record has no embedded SSH key payload"
        );
        return String::new();
    };

    match parse_entries(raw) {
        Ok(entries) => {
            let mut out = String::new();
            for entry in &entries {
                out.push_str(&entry.value);
                out.push('\n');
            }
            out
        }
        Err(e) => {
            tracing::warn!(
                username = record.username().unwrap_or("<unknown>"),
                error = %e,
                "Failed to decode embedded SSH key payload"
            );
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{ATTR_ORG_ID, ATTR_USERNAME, GENERIC_SSH_KEY};
    use std::collections::HashMap;

    fn record_with_payload(payload: Option<&str>) -> UserRecord {
        let mut attribute_store = HashMap::new();
        attribute_store.insert(ATTR_USERNAME.to_string(), "jdoe".to_string());
        attribute_store.insert(ATTR_ORG_ID.to_string(), "uni".to_string());
        let mut generic_store = HashMap::new();
        if let Some(p) = payload {
            generic_store.insert(GENERIC_SSH_KEY.to_string(), p.to_string());
        }
        UserRecord {
            attribute_store,
            generic_store,
            uid_number: 900001,
        }
    }

    #[test]
    fn test_parse_entries_single_quoted() {
        let entries =
            parse_entries("[{'name': 'id_rsa', 'value': 'ssh-ed25519 AAAAC3Nz test'}]").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "id_rsa");
        assert_eq!(entries[0].value, "ssh-ed25519 AAAAC3Nz test");
    }

    #[test]
    fn test_parse_entries_empty_list() {
        assert!(parse_entries("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_entries_malformed() {
        assert!(parse_entries("not a list").is_err());
        assert!(parse_entries("[{'name': 'broken'").is_err());
    }

    #[test]
    fn test_parse_entries_apostrophe_in_value_corrupts() {
        // The blind quote swap cannot represent an apostrophe inside a value
        let payload = "[{'name': 'k', 'value': 'o'brien key'}]";
        assert!(parse_entries(payload).is_err());
    }

    #[test]
    fn test_render_keys_single() {
        let record =
            record_with_payload(Some("[{'name': 'id_rsa', 'value': 'ssh-ed25519 AAAA...'}]"));
        assert_eq!(render_keys(&record), "ssh-ed25519 AAAA...\n");
    }

    #[test]
    fn test_render_keys_multiple_trailing_newlines() {
        let record = record_with_payload(Some(
            "[{'name': 'a', 'value': 'ssh-ed25519 AAAA one'}, {'name': 'b', 'value': 'ssh-rsa BBBB two'}]",
        ));
        assert_eq!(render_keys(&record), "ssh-ed25519 AAAA one\nssh-rsa BBBB two\n");
    }

    #[test]
    fn test_render_keys_malformed_payload_is_empty() {
        let record = record_with_payload(Some("{{ nope"));
        assert_eq!(render_keys(&record), "");
    }

    #[test]
    fn test_render_keys_missing_payload_is_empty() {
        let record = record_with_payload(None);
        assert_eq!(render_keys(&record), "");
    }
}
