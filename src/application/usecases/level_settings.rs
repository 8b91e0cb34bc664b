use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    errors::EconomyError,
    repositories::level_settings::LevelSettingRepository,
    value_objects::{
        levels::{BulkUpsertLevelsModel, LevelSettingModel},
        roles::Role,
    },
};

pub struct LevelSettingsUseCase<L>
where
    L: LevelSettingRepository + Send + Sync + 'static,
{
    level_setting_repository: Arc<L>,
}

impl<L> LevelSettingsUseCase<L>
where
    L: LevelSettingRepository + Send + Sync + 'static,
{
    pub fn new(level_setting_repository: Arc<L>) -> Self {
        Self {
            level_setting_repository,
        }
    }

    pub async fn list(&self) -> Result<Vec<LevelSettingModel>, EconomyError> {
        let settings = self.level_setting_repository.list().await?;
        Ok(settings.into_iter().map(LevelSettingModel::from).collect())
    }

    /// Applies every valid row and skips the rest; a bulk upload with a few
    /// bad rows still lands the good ones.
    pub async fn bulk_upsert(
        &self,
        role: Role,
        model: BulkUpsertLevelsModel,
    ) -> Result<Vec<LevelSettingModel>, EconomyError> {
        if !role.can_manage_catalog() {
            return Err(EconomyError::Forbidden);
        }

        let mut applied = Vec::with_capacity(model.levels.len());
        for threshold in model.levels {
            if threshold.level < 1 {
                warn!(
                    level = threshold.level,
                    "level_settings: skipping non-positive level"
                );
                continue;
            }

            let setting = self
                .level_setting_repository
                .upsert(threshold.level, threshold.points_required)
                .await?;
            applied.push(LevelSettingModel::from(setting));
        }

        info!(
            applied_count = applied.len(),
            "level_settings: thresholds upserted"
        );
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::entities::level_settings::LevelSettingEntity;
    use crate::domain::repositories::level_settings::MockLevelSettingRepository;
    use crate::domain::value_objects::levels::LevelThresholdModel;

    fn sample_setting(level: i32, points_required: i64) -> LevelSettingEntity {
        LevelSettingEntity {
            level,
            points_required,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn bulk_upsert_skips_non_positive_levels() {
        let mut repo = MockLevelSettingRepository::new();
        repo.expect_upsert()
            .with(eq(2), eq(500))
            .times(1)
            .returning(|level, points| Box::pin(async move { Ok(sample_setting(level, points)) }));

        let usecase = LevelSettingsUseCase::new(Arc::new(repo));
        let applied = usecase
            .bulk_upsert(
                Role::Admin,
                BulkUpsertLevelsModel {
                    levels: vec![
                        LevelThresholdModel {
                            level: 0,
                            points_required: 100,
                        },
                        LevelThresholdModel {
                            level: -3,
                            points_required: 100,
                        },
                        LevelThresholdModel {
                            level: 2,
                            points_required: 500,
                        },
                    ],
                },
            )
            .await
            .unwrap();

        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].level, 2);
    }

    #[tokio::test]
    async fn bulk_upsert_rejects_viewers() {
        let repo = MockLevelSettingRepository::new();
        let usecase = LevelSettingsUseCase::new(Arc::new(repo));

        let result = usecase
            .bulk_upsert(Role::Viewer, BulkUpsertLevelsModel { levels: vec![] })
            .await;

        assert!(matches!(result, Err(EconomyError::Forbidden)));
    }
}
