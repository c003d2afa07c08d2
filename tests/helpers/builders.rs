use apsis::{DeviceGrant, GrantStatus, GrantSubject};
use chrono::Utc;

/// Builder for test device grants
pub struct GrantBuilder {
    client_id: String,
    scopes: Vec<String>,
    subject: Option<GrantSubject>,
    creation_time: i64,
    lifetime: i64,
    status: GrantStatus,
}

impl GrantBuilder {
    pub fn new(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            scopes: vec!["openid".to_string(), "profile".to_string()],
            subject: None,
            creation_time: Utc::now().timestamp(),
            lifetime: 1800,
            status: GrantStatus::Pending,
        }
    }

    pub fn with_scopes(mut self, scopes: &[&str]) -> Self {
        self.scopes = scopes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn created_at(mut self, creation_time: i64) -> Self {
        self.creation_time = creation_time;
        self
    }

    pub fn with_lifetime(mut self, lifetime: i64) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn approved_by(mut self, subject_id: &str) -> Self {
        self.subject = Some(GrantSubject::new(subject_id));
        self.status = GrantStatus::Approved;
        self
    }

    pub fn approved_with_claims(mut self, subject_id: &str, claims: &[(&str, &str)]) -> Self {
        let mut subject = GrantSubject::new(subject_id);
        for (key, value) in claims {
            subject.claims.insert(key.to_string(), value.to_string());
        }
        self.subject = Some(subject);
        self.status = GrantStatus::Approved;
        self
    }

    pub fn denied(mut self) -> Self {
        self.status = GrantStatus::Denied;
        self
    }

    pub fn build(self) -> DeviceGrant {
        DeviceGrant {
            client_id: self.client_id,
            scopes: self.scopes,
            subject: self.subject,
            creation_time: self.creation_time,
            lifetime: self.lifetime,
            status: self.status,
        }
    }
}
