use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub name: String,
    pub created_by: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub family_id: String,
    pub user_id: String,
    pub role: Role,
}

impl FamilyMember {
    pub fn admin(family_id: &str, user_id: &str) -> Self {
        Self {
            family_id: family_id.to_string(),
            user_id: user_id.to_string(),
            role: Role::Admin,
        }
    }

    pub fn member(family_id: &str, user_id: &str) -> Self {
        Self {
            family_id: family_id.to_string(),
            user_id: user_id.to_string(),
            role: Role::Member,
        }
    }

    /// Memberships are keyed by (family, user).
    pub fn same_key(&self, other: &FamilyMember) -> bool {
        self.family_id == other.family_id && self.user_id == other.user_id
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFamily {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinOutcome {
    pub joined: bool,
    pub already_member: bool,
}
