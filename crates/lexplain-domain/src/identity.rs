//! Identity module - who is using the service

/// A signed-in user as reported by the identity collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Opaque user identifier, used as the owner key for stored records
    pub id: String,

    /// Contact email, when the identity service exposes one
    pub email: Option<String>,
}

impl UserIdentity {
    /// Create an identity with only an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    /// Attach an email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
