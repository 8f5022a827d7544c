use serde::{Deserialize, Serialize};

/// Identity of an authenticated caller, as resolved by the auth service.
///
/// Owned by the remote auth service; this crate never persists it. A value
/// lives for one request on the server, or until the next validation/logout
/// on the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl Identity {
    pub const DEV_USER_ID: &'static str = "dev-user";

    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
        }
    }

    /// Fixed synthetic identity returned by the development bypass.
    pub fn dev_user() -> Self {
        Self::new(Self::DEV_USER_ID, "dev@localhost", "Development User")
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} <{}>", self.id, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_auth_service_user_object() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.com","name":"A","image":null}"#).unwrap();
        assert_eq!(identity, Identity::new("u1", "a@b.com", "A"));
    }

    #[test]
    fn dev_user_is_fixed() {
        assert_eq!(
            Identity::dev_user(),
            Identity::new(Identity::DEV_USER_ID, "dev@localhost", "Development User")
        );
    }
}
