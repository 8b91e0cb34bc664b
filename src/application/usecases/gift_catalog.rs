use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{
    errors::EconomyError,
    repositories::gifts::GiftRepository,
    value_objects::{
        gifts::{GiftModel, UpsertGiftModel, gift_key},
        roles::Role,
    },
};

pub struct GiftCatalogUseCase<G>
where
    G: GiftRepository + Send + Sync + 'static,
{
    gift_repository: Arc<G>,
}

impl<G> GiftCatalogUseCase<G>
where
    G: GiftRepository + Send + Sync + 'static,
{
    pub fn new(gift_repository: Arc<G>) -> Self {
        Self { gift_repository }
    }

    pub async fn upsert(
        &self,
        role: Role,
        model: UpsertGiftModel,
    ) -> Result<GiftModel, EconomyError> {
        if !role.can_manage_catalog() {
            return Err(EconomyError::Forbidden);
        }

        let key = gift_key(&model.name);
        if key.is_empty() {
            return Err(EconomyError::Validation(
                "gift name must contain at least one alphanumeric character".to_string(),
            ));
        }
        if model.price < 0 {
            return Err(EconomyError::Validation(
                "gift price must not be negative".to_string(),
            ));
        }
        if model.points < 0 {
            return Err(EconomyError::Validation(
                "gift points must not be negative".to_string(),
            ));
        }

        let gift = self
            .gift_repository
            .upsert(
                key.clone(),
                model.name,
                model.price,
                model.points,
                model.metadata,
            )
            .await
            .map_err(|err| {
                error!(gift_key = %key, error = ?err, "gift_catalog: upsert failed");
                err
            })?;

        info!(gift_id = gift.id, gift_key = %gift.key, "gift_catalog: gift upserted");
        Ok(GiftModel::from(gift))
    }

    pub async fn list(&self) -> Result<Vec<GiftModel>, EconomyError> {
        let gifts = self.gift_repository.list().await?;
        Ok(gifts.into_iter().map(GiftModel::from).collect())
    }
}
