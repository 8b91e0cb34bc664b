use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    errors::EconomyError,
    repositories::{participants::ParticipantRepository, users::UserRepository},
    value_objects::{
        participants::LevelProgressDto,
        roles::Role,
        wallet::{AdjustCoinsModel, BalanceDto, CreditPointsModel, LedgerScope},
    },
};

pub struct LedgerUseCase<U, P>
where
    U: UserRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    participant_repository: Arc<P>,
}

impl<U, P> LedgerUseCase<U, P>
where
    U: UserRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>, participant_repository: Arc<P>) -> Self {
        Self {
            user_repository,
            participant_repository,
        }
    }

    /// Manual point credit, admin only. The scope decides which account the
    /// delta lands on; both paths run the same leveling policy.
    pub async fn credit_points(
        &self,
        role: Role,
        model: CreditPointsModel,
    ) -> Result<LevelProgressDto, EconomyError> {
        if !role.is_admin() {
            return Err(EconomyError::Forbidden);
        }

        let scope = match model.stream_id {
            Some(stream_id) => LedgerScope::Stream {
                stream_id,
                user_id: model.user_id,
            },
            None => LedgerScope::Global {
                user_id: model.user_id,
            },
        };

        let progress = match scope {
            LedgerScope::Global { user_id } => {
                self.user_repository.credit_points(user_id, model.delta).await?
            }
            LedgerScope::Stream { stream_id, user_id } => {
                self.participant_repository
                    .credit_points(stream_id, user_id, model.delta)
                    .await?
            }
        };

        info!(
            user_id = model.user_id,
            stream_id = model.stream_id,
            delta = model.delta,
            level = progress.level,
            levels_gained = progress.levels_gained,
            "ledger: points credited"
        );

        Ok(LevelProgressDto::from(progress))
    }

    pub async fn credit_coins(
        &self,
        role: Role,
        model: AdjustCoinsModel,
    ) -> Result<BalanceDto, EconomyError> {
        if model.amount <= 0 {
            return Err(EconomyError::Validation(
                "amount must be positive".to_string(),
            ));
        }
        self.adjust_coins(role, model).await
    }

    pub async fn debit_coins(
        &self,
        role: Role,
        model: AdjustCoinsModel,
    ) -> Result<BalanceDto, EconomyError> {
        if model.amount <= 0 {
            return Err(EconomyError::Validation(
                "amount must be positive".to_string(),
            ));
        }
        self.adjust_coins(
            role,
            AdjustCoinsModel {
                user_id: model.user_id,
                amount: -model.amount,
            },
        )
        .await
    }

    async fn adjust_coins(
        &self,
        role: Role,
        model: AdjustCoinsModel,
    ) -> Result<BalanceDto, EconomyError> {
        if !role.is_admin() {
            return Err(EconomyError::Forbidden);
        }

        let coins = if model.amount > 0 {
            self.user_repository
                .credit_coins(model.user_id, model.amount)
                .await?
        } else {
            self.user_repository
                .debit_coins(model.user_id, -model.amount)
                .await
                .map_err(|err| {
                    warn!(
                        user_id = model.user_id,
                        amount = model.amount,
                        error = ?err,
                        "ledger: coin debit rejected"
                    );
                    err
                })?
        };

        Ok(BalanceDto {
            user_id: model.user_id,
            coins,
        })
    }

    pub async fn balance(&self, user_id: i64) -> Result<BalanceDto, EconomyError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(EconomyError::NotFound("user"))?;

        Ok(BalanceDto {
            user_id: user.id,
            coins: user.coins,
        })
    }
}
