// ==================== USER STORE ====================
// Authoritative user collection with snapshot write-back. Every mutation
// rewrites the full snapshot before reporting success; loading never
// writes, so a freshly fetched seed list only hits disk on the first
// subsequent mutation.

use crate::form::UserForm;
use crate::models::{User, UserFields};
use crate::storage::SnapshotStorage;
use crate::utils::error::AppError;
use serde::{Deserialize, Serialize};

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ListUsersResponse {
    pub success: bool,
    pub users: Vec<UserInfo>,
    pub count: usize,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateUserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateUserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ==================== STORE ====================

pub struct UserStore {
    users: Vec<User>,
    storage: Box<dyn SnapshotStorage>,
}

impl UserStore {
    pub fn new(storage: Box<dyn SnapshotStorage>) -> Self {
        Self {
            users: Vec::new(),
            storage,
        }
    }

    /// Adopts the persisted snapshot if one exists. Returns `true` when a
    /// snapshot was found, `false` when the caller should fall back to the
    /// one-time remote fetch. Never writes.
    pub fn load_snapshot(&mut self) -> Result<bool, AppError> {
        match self.storage.load()? {
            Some(users) => {
                self.users = users;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Adopts a fetched seed list as the current collection without
    /// persisting it; the first mutation writes it out.
    pub fn adopt(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Next identifier: last record's id + 1, or 1 when empty.
    ///
    /// Deleting the tail record hands its id to the next create. Kept
    /// verbatim for compatibility with existing snapshots; not a scheme to
    /// reuse anywhere ids must stay unique across deletions.
    fn next_id(&self) -> u64 {
        self.users.last().map(|u| u.id).unwrap_or(0) + 1
    }

    /// Appends a new record and persists. The fields arrive pre-validated
    /// by the form; the store does not re-validate them.
    pub fn create(&mut self, fields: UserFields) -> Result<User, AppError> {
        let user = User {
            id: self.next_id(),
            name: fields.name,
            username: fields.username,
            email: fields.email,
            department: if fields.department.is_empty() {
                None
            } else {
                Some(fields.department)
            },
        };
        self.users.push(user.clone());
        self.persist()?;
        Ok(user)
    }

    /// Merges the given fields over the matching record; the id and any
    /// field left unset are preserved. Returns whether a record matched.
    /// The snapshot is rewritten either way.
    pub fn update(&mut self, id: u64, request: UpdateUserRequest) -> Result<bool, AppError> {
        let found = match self.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                if let Some(name) = request.name {
                    user.name = name;
                }
                if let Some(username) = request.username {
                    user.username = username;
                }
                if let Some(email) = request.email {
                    user.email = email;
                }
                if let Some(department) = request.department {
                    user.department = Some(department);
                }
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(found)
    }

    /// Removes the matching record (no-op if absent) and persists.
    pub fn delete(&mut self, id: u64) -> Result<bool, AppError> {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        let found = self.users.len() != before;
        self.persist()?;
        Ok(found)
    }

    fn persist(&self) -> Result<(), AppError> {
        self.storage.save(&self.users)
    }
}

// ==================== SERVICE FUNCTIONS ====================

/// GET /users - Lists the collection with display-ready departments
pub fn list_users(store: &UserStore) -> ListUsersResponse {
    let users: Vec<UserInfo> = store
        .users()
        .iter()
        .map(|u| UserInfo {
            id: u.id,
            name: u.name.clone(),
            username: u.username.clone(),
            email: u.email.clone(),
            department: u.department_display().to_string(),
        })
        .collect();

    ListUsersResponse {
        count: users.len(),
        success: true,
        users,
    }
}

/// GET /users/{id} - Looks up one record
pub fn get_user(store: &UserStore, id: u64) -> Result<User, AppError> {
    store
        .users()
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No user with id {}", id)))
}

/// POST /users - Funnels the request through the form so the
/// required-field contract is enforced before the store sees it
pub fn create_user(
    store: &mut UserStore,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, AppError> {
    let mut form = UserForm::open(None);
    form.set_field("name", &request.name)?;
    form.set_field("username", &request.username)?;
    form.set_field("email", &request.email)?;
    form.set_field("department", &request.department)?;

    let fields = match form.submit() {
        Ok(fields) => fields,
        Err(e) => {
            return Ok(CreateUserResponse {
                success: false,
                user: None,
                error: Some(e.to_string()),
            })
        }
    };

    let user = store.create(fields)?;
    log::info!("✅ User added: id={}", user.id);

    Ok(CreateUserResponse {
        success: true,
        user: Some(user),
        error: None,
    })
}

/// PATCH /users/{id} - Merge-updates a record
pub fn update_user(
    store: &mut UserStore,
    id: u64,
    request: UpdateUserRequest,
) -> Result<UpdateUserResponse, AppError> {
    let found = store.update(id, request)?;
    if found {
        log::info!("✅ User updated: id={}", id);
    } else {
        // Matches the historical contract: unknown ids succeed as no-ops
        log::warn!("⚠️ Update for unknown user id={}, nothing changed", id);
    }

    Ok(UpdateUserResponse {
        success: true,
        error: None,
    })
}

/// DELETE /users/{id} - Removes a record
pub fn delete_user(store: &mut UserStore, id: u64) -> Result<DeleteUserResponse, AppError> {
    let found = store.delete(id)?;
    if found {
        log::info!("✅ User deleted: id={}", id);
    } else {
        log::warn!("⚠️ Delete for unknown user id={}, nothing changed", id);
    }

    Ok(DeleteUserResponse {
        success: true,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemorySnapshot;

    fn fields(name: &str) -> UserFields {
        UserFields {
            name: name.to_string(),
            username: format!("{}son", name),
            email: format!("{}@example.com", name.to_lowercase()),
            department: "Engineering".to_string(),
        }
    }

    fn store_with(snapshot: &MemorySnapshot) -> UserStore {
        UserStore::new(Box::new(snapshot.clone()))
    }

    #[test]
    fn creates_assign_sequential_ids_from_one() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);

        for (i, name) in ["Ada", "Grace", "Edsger"].iter().enumerate() {
            let user = store.create(fields(name)).unwrap();
            assert_eq!(user.id, i as u64 + 1);
        }
    }

    #[test]
    fn deleting_the_tail_record_reuses_its_id() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);

        store.create(fields("Ada")).unwrap();
        let second = store.create(fields("Grace")).unwrap();
        assert_eq!(second.id, 2);

        store.delete(2).unwrap();
        let third = store.create(fields("Edsger")).unwrap();
        assert_eq!(third.id, 2);
    }

    #[test]
    fn non_contiguous_ids_continue_from_the_last() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);
        store.adopt(vec![
            User {
                id: 1,
                name: "Ada".to_string(),
                username: "Lovelace".to_string(),
                email: "ada@x.com".to_string(),
                department: None,
            },
            User {
                id: 3,
                name: "Grace".to_string(),
                username: "Hopper".to_string(),
                email: "grace@x.com".to_string(),
                department: None,
            },
        ]);

        let user = store.create(fields("Edsger")).unwrap();
        assert_eq!(user.id, 4);
    }

    #[test]
    fn update_merges_and_preserves_unset_fields() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);
        let created = store.create(fields("Ada")).unwrap();

        let found = store
            .update(
                created.id,
                UpdateUserRequest {
                    email: Some("ada@new.example.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(found);

        let user = &store.users()[0];
        assert_eq!(user.id, created.id);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.username, "Adason");
        assert_eq!(user.email, "ada@new.example.com");
        assert_eq!(user.department.as_deref(), Some("Engineering"));
    }

    #[test]
    fn update_of_unknown_id_is_a_persisted_noop() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);
        store.create(fields("Ada")).unwrap();
        let saves_before = snapshot.save_count();

        let found = store
            .update(
                99,
                UpdateUserRequest {
                    name: Some("Nobody".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!found);
        assert_eq!(store.users()[0].name, "Ada");
        // Snapshot rewritten even though nothing changed
        assert_eq!(snapshot.save_count(), saves_before + 1);
        assert_eq!(snapshot.persisted().unwrap(), store.users());
    }

    #[test]
    fn delete_of_unknown_id_is_a_persisted_noop() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);
        store.create(fields("Ada")).unwrap();
        let saves_before = snapshot.save_count();

        let found = store.delete(99).unwrap();

        assert!(!found);
        assert_eq!(store.users().len(), 1);
        assert_eq!(snapshot.save_count(), saves_before + 1);
        assert_eq!(snapshot.persisted().unwrap(), store.users());

        let response = delete_user(&mut store, 99).unwrap();
        assert!(response.success);
    }

    #[test]
    fn every_mutation_round_trips_through_the_snapshot() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);

        store.create(fields("Ada")).unwrap();
        assert_eq!(snapshot.persisted().unwrap(), store.users());

        store
            .update(
                1,
                UpdateUserRequest {
                    department: Some("Mathematics".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(snapshot.persisted().unwrap(), store.users());

        store.create(fields("Grace")).unwrap();
        store.delete(1).unwrap();
        assert_eq!(snapshot.persisted().unwrap(), store.users());

        // A fresh store loading the same snapshot sees the same collection
        let mut reloaded = store_with(&snapshot);
        assert!(reloaded.load_snapshot().unwrap());
        assert_eq!(reloaded.users(), store.users());
    }

    #[test]
    fn load_adopts_snapshot_when_present() {
        let snapshot = MemorySnapshot::new();
        {
            let mut store = store_with(&snapshot);
            store.create(fields("Ada")).unwrap();
        }

        let mut store = store_with(&snapshot);
        assert!(store.load_snapshot().unwrap());
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn adopting_a_fetched_seed_list_does_not_persist() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);

        assert!(!store.load_snapshot().unwrap());
        store.adopt(vec![User {
            id: 1,
            name: "Ada".to_string(),
            username: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            department: None,
        }]);

        assert_eq!(snapshot.save_count(), 0);
        assert!(snapshot.persisted().is_none());
        assert_eq!(store.users()[0].department_display(), "Not Available");

        // First mutation writes the adopted list plus the new record
        store.create(fields("Grace")).unwrap();
        assert_eq!(snapshot.persisted().unwrap().len(), 2);
    }

    #[test]
    fn create_user_refuses_empty_fields() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);

        let response = create_user(
            &mut store,
            CreateUserRequest {
                name: "Ada".to_string(),
                username: "Lovelace".to_string(),
                email: "ada@x.com".to_string(),
                department: String::new(),
            },
        )
        .unwrap();

        assert!(!response.success);
        assert!(response.error.unwrap().contains("department"));
        assert!(store.users().is_empty());
        assert_eq!(snapshot.save_count(), 0);
    }

    #[test]
    fn get_user_reports_not_found_for_unknown_id() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);
        let created = store.create(fields("Ada")).unwrap();

        assert_eq!(get_user(&store, created.id).unwrap(), created);
        assert!(matches!(
            get_user(&store, 99),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn list_users_shows_the_not_available_marker() {
        let snapshot = MemorySnapshot::new();
        let mut store = store_with(&snapshot);
        store.adopt(vec![User {
            id: 1,
            name: "Ada".to_string(),
            username: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            department: None,
        }]);

        let response = list_users(&store);
        assert_eq!(response.count, 1);
        assert_eq!(response.users[0].department, "Not Available");
    }
}
