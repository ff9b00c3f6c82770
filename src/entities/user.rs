use serde::{Deserialize, Serialize};

use crate::entities::AccountStatus;
use crate::id_gen::{generate_unique_ids, today_iso};
use crate::local_db_model::LocalDbModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    #[default]
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

/// Dashboard operator account. Roles are labels only; nothing here enforces
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub last_login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub last_login: String,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: Role::Viewer,
            status: AccountStatus::Active,
            last_login: today_iso(),
        }
    }
}

impl LocalDbModel for User {
    const COLLECTION: &'static str = "users";
    type Draft = UserDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: UserDraft) -> Self {
        User {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: draft.status,
            last_login: draft.last_login,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn facet(&self, field: &str) -> Option<&'static str> {
        match field {
            "role" => Some(self.role.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn sample_seed() -> Vec<Self> {
        let rows = [
            ("John Doe", "john@example.com", Role::Admin, AccountStatus::Active, "2023-05-01"),
            ("Jane Smith", "jane@example.com", Role::Editor, AccountStatus::Active, "2023-05-02"),
            ("Robert Johnson", "robert@example.com", Role::Viewer, AccountStatus::Inactive, "2023-04-15"),
            ("Emily Davis", "emily@example.com", Role::Editor, AccountStatus::Active, "2023-05-03"),
            ("Michael Wilson", "michael@example.com", Role::Viewer, AccountStatus::Active, "2023-05-01"),
        ];
        let ids = generate_unique_ids(rows.len());

        rows.into_iter()
            .zip(ids)
            .map(|((name, email, role, status, last_login), id)| User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                role,
                status,
                last_login: last_login.to_string(),
            })
            .collect()
    }
}
