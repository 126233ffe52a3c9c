use serde::{Deserialize, Serialize};

/// Display value used whenever a record has no department set
pub const DEPARTMENT_NOT_AVAILABLE: &str = "Not Available";

/// One user record as held in the collection and in the snapshot.
///
/// `id` is assigned by the store and never editable; `name` is the first
/// name and `username` the last name (the remote demo API uses those field
/// names, and the snapshot keeps them so a seeded collection round-trips).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl User {
    /// Department as shown in listings: the stored value, or the
    /// "Not Available" marker when absent.
    pub fn department_display(&self) -> &str {
        self.department.as_deref().unwrap_or(DEPARTMENT_NOT_AVAILABLE)
    }
}

/// The four editable fields of a record, as emitted by the user form.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
pub struct UserFields {
    pub name: String,
    pub username: String,
    pub email: String,
    pub department: String,
}

/// Record shape returned by the remote demo API. Only the fields this
/// service cares about are decoded; `name` maps to first name and
/// `username` to last name, department is never present.
#[derive(Debug, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<RemoteUser> for User {
    fn from(remote: RemoteUser) -> Self {
        User {
            id: remote.id,
            name: remote.name,
            username: remote.username,
            email: remote.email,
            department: None,
        }
    }
}
