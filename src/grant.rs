use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authorization outcome recorded on the grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    /// Created, waiting for the user to enter the user code.
    Pending,
    Approved,
    Denied,
}

/// Subject attached to a grant once the user has authenticated.
///
/// Claims arrive already resolved by the caller; this crate never inspects
/// claim structures itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSubject {
    pub subject_id: String,
    #[serde(default)]
    pub claims: BTreeMap<String, String>,
}

impl GrantSubject {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            claims: BTreeMap::new(),
        }
    }
}

/// The logical device-flow grant, independent of its serialized storage form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGrant {
    pub client_id: String,
    /// Scopes requested by the client.
    pub scopes: Vec<String>,
    /// Absent until the user authorizes or denies the request.
    pub subject: Option<GrantSubject>,
    /// Unix seconds, set by the caller at creation.
    pub creation_time: i64,
    /// Lifetime in seconds.
    pub lifetime: i64,
    pub status: GrantStatus,
}

impl DeviceGrant {
    /// Advisory expiry; enforcement is the authorization server's job.
    pub fn expiration(&self) -> i64 {
        self.creation_time + self.lifetime
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject.as_ref().map(|s| s.subject_id.as_str())
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expiration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_grant() -> DeviceGrant {
        DeviceGrant {
            client_id: "test_client_id".to_string(),
            scopes: vec!["openid".to_string(), "profile".to_string()],
            subject: None,
            creation_time: 1_700_000_000,
            lifetime: 300,
            status: GrantStatus::Pending,
        }
    }

    #[test]
    fn test_expiration_is_creation_plus_lifetime() {
        let grant = pending_grant();
        assert_eq!(grant.expiration(), 1_700_000_000 + 300);
    }

    #[test]
    fn test_is_expired() {
        let grant = pending_grant();
        assert!(!grant.is_expired(grant.expiration()));
        assert!(grant.is_expired(grant.expiration() + 1));
    }

    #[test]
    fn test_subject_id_absent_until_authorized() {
        let mut grant = pending_grant();
        assert_eq!(grant.subject_id(), None);

        grant.subject = Some(GrantSubject::new("alice"));
        grant.status = GrantStatus::Approved;
        assert_eq!(grant.subject_id(), Some("alice"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&GrantStatus::Pending).expect("serialize status");
        assert_eq!(json, "\"pending\"");
    }
}
