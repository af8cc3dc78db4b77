use crate::data::memory::InMemoryStore;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, instrument, trace};

#[async_trait]
impl UserRepository for InMemoryStore {
    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn insert_user(&self, user: User) -> Result<bool> {
        trace!("Inserting user into store");
        let inserted = self
            .commit(move |s| {
                if s.users.iter().any(|u| u.email == user.email) {
                    false
                } else {
                    s.users.push(user);
                    true
                }
            })
            .await?;
        debug!(inserted, "User insert finished");
        Ok(inserted)
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        trace!(email = email, "Looking up user by email in store");
        let user = self
            .read(|s| s.users.iter().find(|u| u.email == email).cloned())
            .await;
        match &user {
            Some(u) => debug!(user_id = %u.id, "User found in store"),
            None => trace!(email = email, "User not found in store"),
        }
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        trace!(user_id = id, "Looking up user by ID in store");
        let user = self
            .read(|s| s.users.iter().find(|u| u.id == id).cloned())
            .await;
        if user.is_none() {
            trace!(user_id = id, "User not found in store");
        }
        Ok(user)
    }
}
