// ==================== USER FORM ====================
// Transient editing surface for one record's four text fields. Holds no
// authoritative state: it works on a copy and emits it on submit; the
// store never sees a partially edited form.

use crate::models::{User, UserFields};
use crate::utils::error::AppError;

/// Working copy of a record being created or edited.
///
/// `open` starts an editing session; `submit` emits the fields and
/// `cancel` drops them, both ending the session (the instance is consumed
/// or discarded, there is no reopen).
#[derive(Debug, Clone)]
pub struct UserForm {
    fields: UserFields,
}

impl UserForm {
    /// Opens the form: pre-populated from an existing record (edit) or
    /// blank (create).
    pub fn open(user: Option<&User>) -> Self {
        let fields = match user {
            Some(user) => UserFields {
                name: user.name.clone(),
                username: user.username.clone(),
                email: user.email.clone(),
                department: user.department.clone().unwrap_or_default(),
            },
            None => UserFields::default(),
        };
        Self { fields }
    }

    /// Updates exactly one field of the working copy by its form name.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        match name {
            "name" => self.fields.name = value.to_string(),
            "username" => self.fields.username = value.to_string(),
            "email" => self.fields.email = value.to_string(),
            "department" => self.fields.department = value.to_string(),
            other => {
                return Err(AppError::InvalidRequest(format!(
                    "Unknown form field: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    pub fn fields(&self) -> &UserFields {
        &self.fields
    }

    /// Emits the working copy. Refuses while any of the four fields is
    /// empty; the form stays open so the caller can keep editing.
    pub fn submit(&self) -> Result<UserFields, AppError> {
        if let Some(missing) = self.first_empty_field() {
            return Err(AppError::InvalidRequest(format!(
                "Field '{}' is required",
                missing
            )));
        }
        Ok(self.fields.clone())
    }

    /// Discards the working copy with no side effects.
    pub fn cancel(self) {}

    fn first_empty_field(&self) -> Option<&'static str> {
        if self.fields.name.is_empty() {
            Some("name")
        } else if self.fields.username.is_empty() {
            Some("username")
        } else if self.fields.email.is_empty() {
            Some("email")
        } else if self.fields.department.is_empty() {
            Some("department")
        } else {
            None
        }
    }
}
