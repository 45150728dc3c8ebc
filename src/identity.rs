//! Federated identifier parsing
//!
//! sshd hands the tool a single combined identifier of the form
//! `<orgId>_<username>`. Only the first underscore separates the two parts;
//! usernames may legitimately contain further underscores.

/// A combined identifier split into its organization id and username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedId {
    /// Organization id (the segment before the first underscore)
    pub org_id: String,
    /// Username at the home organization (everything after it)
    pub username: String,
}

impl FederatedId {
    /// Split a combined identifier on its first underscore
    ///
    /// Returns `None` when the identifier contains no underscore. Callers
    /// treat that as "no match", not as an error.
    pub fn split(combined: &str) -> Option<Self> {
        let (org_id, username) = combined.split_once('_')?;
        Some(Self {
            org_id: org_id.to_string(),
            username: username.to_string(),
        })
    }
}
