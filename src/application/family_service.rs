use crate::domain::error::DomainError;
use crate::domain::family::{CreateFamily, Family, FamilyMember, JoinOutcome};
use crate::domain::ids::{IdGenerator, IdKind};
use crate::domain::repository::FamilyRepository;
use crate::domain::validation::require_text;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct FamilyService<R: FamilyRepository> {
    repository: Arc<R>,
    ids: Arc<dyn IdGenerator>,
}

impl<R: FamilyRepository> FamilyService<R> {
    pub fn new(repository: Arc<R>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Creates the family and makes `founder_id` its admin in one write.
    #[instrument(skip(self, req))]
    pub async fn create_family(&self, req: CreateFamily, founder_id: &str) -> Result<Family> {
        let name = require_text("name", req.name)?;
        let family = Family {
            id: self.ids.next_id(IdKind::Family),
            name,
            created_by: founder_id.to_string(),
        };
        let founder = FamilyMember::admin(&family.id, founder_id);

        self.repository
            .create_family(family.clone(), founder)
            .await?;

        info!(family_id = %family.id, founder = founder_id, "Family created");
        Ok(family)
    }

    /// Joining is idempotent: a second join succeeds without a second row.
    #[instrument(skip(self))]
    pub async fn join_family(&self, family_id: &str, user_id: &str) -> Result<JoinOutcome> {
        self.get_family(family_id).await?;

        let inserted = self
            .repository
            .add_member(FamilyMember::member(family_id, user_id))
            .await?;

        info!(
            family_id = family_id,
            user_id = user_id,
            already_member = !inserted,
            "Family joined"
        );
        Ok(JoinOutcome {
            joined: true,
            already_member: !inserted,
        })
    }

    pub async fn get_family(&self, family_id: &str) -> Result<Family> {
        self.repository
            .find_family_by_id(family_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Family", family_id).into())
    }

    pub async fn list_members(&self, family_id: &str) -> Result<Vec<FamilyMember>> {
        self.get_family(family_id).await?;
        self.repository.list_members(family_id).await
    }

    pub async fn list_families_for_user(&self, user_id: &str) -> Result<Vec<Family>> {
        self.repository.list_families_for_user(user_id).await
    }
}
