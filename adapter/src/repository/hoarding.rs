use async_trait::async_trait;
use chrono::Local;
use derive_new::new;
use kernel::model::{
    availability::HoardingStatus,
    hoarding::{
        event::{CreateHoarding, DeleteHoarding, UpdateHoarding},
        Hoarding,
    },
    id::{HoardingId, ReservationId},
};
use kernel::repository::hoarding::HoardingRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::hoarding::HoardingRow, ConnectionPool};

#[derive(new)]
pub struct HoardingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HoardingRepository for HoardingRepositoryImpl {
    async fn create(&self, event: CreateHoarding) -> AppResult<HoardingId> {
        // 登録直後の看板には予約が存在しないため、空き状態で作成する
        let hoarding_id = HoardingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO hoardings
                (hoarding_id, hoarding_name, location, size_label, monthly_rate, is_available)
                VALUES ($1, $2, $3, $4, $5, TRUE)
            "#,
        )
        .bind(hoarding_id)
        .bind(event.hoarding_name)
        .bind(event.location)
        .bind(event.size_label)
        .bind(event.monthly_rate)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No hoarding record has been created".into(),
            ));
        }

        Ok(hoarding_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Hoarding>> {
        let rows: Vec<HoardingRow> = sqlx::query_as(
            r#"
                SELECT
                    hoarding_id,
                    hoarding_name,
                    location,
                    size_label,
                    monthly_rate,
                    is_available,
                    booked_until
                FROM hoardings
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Hoarding::from).collect())
    }

    async fn find_by_id(&self, hoarding_id: HoardingId) -> AppResult<Option<Hoarding>> {
        let row: Option<HoardingRow> = sqlx::query_as(
            r#"
                SELECT
                    hoarding_id,
                    hoarding_name,
                    location,
                    size_label,
                    monthly_rate,
                    is_available,
                    booked_until
                FROM hoardings
                WHERE hoarding_id = $1
            "#,
        )
        .bind(hoarding_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Hoarding::from))
    }

    async fn update(&self, event: UpdateHoarding) -> AppResult<()> {
        // 未指定の項目は現状の値を維持する
        let res = sqlx::query(
            r#"
                UPDATE hoardings
                SET
                    hoarding_name = COALESCE($2, hoarding_name),
                    location = COALESCE($3, location),
                    size_label = COALESCE($4, size_label),
                    monthly_rate = COALESCE($5, monthly_rate)
                WHERE hoarding_id = $1
            "#,
        )
        .bind(event.hoarding_id)
        .bind(event.hoarding_name)
        .bind(event.location)
        .bind(event.size_label)
        .bind(event.monthly_rate)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "看板（{}）が見つかりませんでした。",
                event.hoarding_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteHoarding) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 進行中または今後の掲出予約が残っている看板は削除できない
        let today = Local::now().date_naive();
        let remaining: Option<(ReservationId,)> = sqlx::query_as(
            r#"
                SELECT reservation_id
                FROM campaign_hoardings
                WHERE hoarding_id = $1
                  AND (end_date IS NULL OR end_date >= $2)
                LIMIT 1
            "#,
        )
        .bind(event.hoarding_id)
        .bind(today)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if remaining.is_some() {
            return Err(AppError::UnprocessableEntity(format!(
                "看板（{}）には進行中または今後の掲出予約が残っています。",
                event.hoarding_id
            )));
        }

        let res = sqlx::query("DELETE FROM hoardings WHERE hoarding_id = $1")
            .bind(event.hoarding_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "看板（{}）が見つかりませんでした。",
                event.hoarding_id
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn list_ids(&self) -> AppResult<Vec<HoardingId>> {
        sqlx::query_scalar("SELECT hoarding_id FROM hoardings")
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn apply_status(&self, status: &HoardingStatus) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE hoardings
                SET
                    is_available = $2,
                    booked_until = $3
                WHERE hoarding_id = $1
            "#,
        )
        .bind(status.hoarding_id)
        .bind(status.is_available)
        .bind(status.booked_until)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "看板（{}）が見つかりませんでした。",
                status.hoarding_id
            )));
        }

        Ok(())
    }
}
