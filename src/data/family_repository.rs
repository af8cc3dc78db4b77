use crate::data::memory::InMemoryStore;
use crate::domain::family::{Family, FamilyMember};
use crate::domain::repository::FamilyRepository;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, instrument, trace};

#[async_trait]
impl FamilyRepository for InMemoryStore {
    #[instrument(skip(self, family, founder), fields(family_id = %family.id, founder = %founder.user_id))]
    async fn create_family(&self, family: Family, founder: FamilyMember) -> Result<()> {
        self.commit(move |s| {
            s.families.push(family);
            s.family_members.push(founder);
        })
        .await?;
        debug!("Family and founding membership saved to store");
        Ok(())
    }

    #[instrument(skip(self), fields(family_id = id))]
    async fn find_family_by_id(&self, id: &str) -> Result<Option<Family>> {
        trace!("Looking up family by ID in store");
        Ok(self
            .read(|s| s.families.iter().find(|f| f.id == id).cloned())
            .await)
    }

    #[instrument(skip(self, member), fields(family_id = %member.family_id, user_id = %member.user_id))]
    async fn add_member(&self, member: FamilyMember) -> Result<bool> {
        let inserted = self
            .commit(move |s| {
                if s.family_members.iter().any(|m| m.same_key(&member)) {
                    false
                } else {
                    s.family_members.push(member);
                    true
                }
            })
            .await?;
        debug!(inserted, "Membership write finished");
        Ok(inserted)
    }

    #[instrument(skip(self), fields(family_id = family_id))]
    async fn list_members(&self, family_id: &str) -> Result<Vec<FamilyMember>> {
        Ok(self
            .read(|s| {
                s.family_members
                    .iter()
                    .filter(|m| m.family_id == family_id)
                    .cloned()
                    .collect()
            })
            .await)
    }

    #[instrument(skip(self), fields(user_id = user_id))]
    async fn list_families_for_user(&self, user_id: &str) -> Result<Vec<Family>> {
        Ok(self
            .read(|s| {
                s.families
                    .iter()
                    .filter(|f| {
                        s.family_members
                            .iter()
                            .any(|m| m.family_id == f.id && m.user_id == user_id)
                    })
                    .cloned()
                    .collect()
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::VolatilePersistence;
    use crate::domain::family::Role;
    use std::sync::Arc;

    fn family(id: &str, founder: &str) -> Family {
        Family {
            id: id.to_string(),
            name: format!("Family {}", id),
            created_by: founder.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_family_stores_founder_membership() {
        let repo = InMemoryStore::new();
        repo.create_family(family("f_1", "u_1"), FamilyMember::admin("f_1", "u_1"))
            .await
            .unwrap();

        assert_eq!(
            repo.find_family_by_id("f_1").await.unwrap(),
            Some(family("f_1", "u_1"))
        );
        let members = repo.list_members("f_1").await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].role, Role::Admin);
    }

    #[tokio::test]
    async fn test_add_member_twice_keeps_one_row() {
        let repo = InMemoryStore::new();
        repo.create_family(family("f_1", "u_1"), FamilyMember::admin("f_1", "u_1"))
            .await
            .unwrap();

        assert!(repo.add_member(FamilyMember::member("f_1", "u_2")).await.unwrap());
        assert!(!repo.add_member(FamilyMember::member("f_1", "u_2")).await.unwrap());

        let members = repo.list_members("f_1").await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members.iter().filter(|m| m.user_id == "u_2").count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_join_does_not_rewrite_snapshot() {
        let persistence = Arc::new(VolatilePersistence::new());
        let repo = InMemoryStore::with_persistence(persistence.clone());
        repo.create_family(family("f_1", "u_1"), FamilyMember::admin("f_1", "u_1"))
            .await
            .unwrap();
        repo.add_member(FamilyMember::member("f_1", "u_2")).await.unwrap();
        assert_eq!(persistence.save_count(), 2);

        assert!(!repo.add_member(FamilyMember::member("f_1", "u_2")).await.unwrap());
        assert_eq!(persistence.save_count(), 2);
    }

    #[tokio::test]
    async fn test_add_member_does_not_demote_founder() {
        let repo = InMemoryStore::new();
        repo.create_family(family("f_1", "u_1"), FamilyMember::admin("f_1", "u_1"))
            .await
            .unwrap();

        assert!(!repo.add_member(FamilyMember::member("f_1", "u_1")).await.unwrap());
        let members = repo.list_members("f_1").await.unwrap();
        assert_eq!(members, vec![FamilyMember::admin("f_1", "u_1")]);
    }

    #[tokio::test]
    async fn test_list_families_for_user() {
        let repo = InMemoryStore::new();
        repo.create_family(family("f_1", "u_1"), FamilyMember::admin("f_1", "u_1"))
            .await
            .unwrap();
        repo.create_family(family("f_2", "u_2"), FamilyMember::admin("f_2", "u_2"))
            .await
            .unwrap();
        repo.add_member(FamilyMember::member("f_2", "u_1")).await.unwrap();

        let ids: Vec<String> = repo
            .list_families_for_user("u_1")
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["f_1", "f_2"]);
        assert!(repo.list_families_for_user("u_3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_unknown_family_returns_none() {
        let repo = InMemoryStore::new();
        assert!(repo.find_family_by_id("f_missing").await.unwrap().is_none());
    }
}
