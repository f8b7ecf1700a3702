use std::collections::HashMap;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    availability::Reservation,
    campaign::{
        event::{AddCampaignHoarding, CreateCampaign, ExtendCampaign},
        Campaign, CampaignHoarding,
    },
    id::{CampaignId, HoardingId, ReservationId},
};
use kernel::repository::campaign::CampaignRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::campaign::{CampaignHoardingRow, CampaignRow, ReservationRow},
    ConnectionPool,
};

#[derive(new)]
pub struct CampaignRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CampaignRepository for CampaignRepositoryImpl {
    async fn create(&self, event: CreateCampaign) -> AppResult<CampaignId> {
        if event.hoarding_ids.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "掲出する看板が 1 件も指定されていません。".into(),
            ));
        }
        if let Some(end_date) = event.end_date {
            if end_date < event.start_date {
                return Err(AppError::UnprocessableEntity(
                    "掲出終了日が開始日より前になっています。".into(),
                ));
            }
        }

        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、指定された看板がすべて存在するかを調べる。
        // 同じ期間に別キャンペーンの予約が重なっていてもここでは拒否しない。
        // 重複分は空き状況の再計算側が予約中として扱う
        for hoarding_id in &event.hoarding_ids {
            let row: Option<(HoardingId,)> =
                sqlx::query_as("SELECT hoarding_id FROM hoardings WHERE hoarding_id = $1")
                    .bind(*hoarding_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            if row.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "看板（{hoarding_id}）が見つかりませんでした。"
                )));
            }
        }

        // キャンペーン本体を登録する
        let campaign_id = CampaignId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO campaigns
                (campaign_id, campaign_name, client_name, start_date, end_date)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(campaign_id)
        .bind(event.campaign_name)
        .bind(event.client_name)
        .bind(event.start_date)
        .bind(event.end_date)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No campaign record has been created".into(),
            ));
        }

        // 看板ごとに掲出予約（campaign_hoardings）を登録する。
        // 予約期間はキャンペーンの期間をそのまま引き継ぐ
        for hoarding_id in &event.hoarding_ids {
            let res = sqlx::query(
                r#"
                    INSERT INTO campaign_hoardings
                    (reservation_id, campaign_id, hoarding_id, start_date, end_date)
                    VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(ReservationId::new())
            .bind(campaign_id)
            .bind(*hoarding_id)
            .bind(event.start_date)
            .bind(event.end_date)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() < 1 {
                return Err(AppError::NoRowsAffectedError(
                    "No campaign_hoardings record has been created".into(),
                ));
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(campaign_id)
    }

    async fn extend(&self, event: ExtendCampaign) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // ① キャンペーンの存在確認と開始日の取得
        let row: Option<(chrono::NaiveDate,)> =
            sqlx::query_as("SELECT start_date FROM campaigns WHERE campaign_id = $1")
                .bind(event.campaign_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        let Some((start_date,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "キャンペーン（{}）が見つかりませんでした。",
                event.campaign_id
            )));
        };

        if let Some(end_date) = event.end_date {
            if end_date < start_date {
                return Err(AppError::UnprocessableEntity(
                    "掲出終了日が開始日より前になっています。".into(),
                ));
            }
        }

        // ② キャンペーン本体と掲出予約の終了日をまとめて更新する
        sqlx::query("UPDATE campaigns SET end_date = $2 WHERE campaign_id = $1")
            .bind(event.campaign_id)
            .bind(event.end_date)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        sqlx::query("UPDATE campaign_hoardings SET end_date = $2 WHERE campaign_id = $1")
            .bind(event.campaign_id)
            .bind(event.end_date)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn add_hoarding(&self, event: AddCampaignHoarding) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // ① キャンペーンの存在確認と掲出期間の取得
        let campaign: Option<(chrono::NaiveDate, Option<chrono::NaiveDate>)> =
            sqlx::query_as("SELECT start_date, end_date FROM campaigns WHERE campaign_id = $1")
                .bind(event.campaign_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        let Some((start_date, end_date)) = campaign else {
            return Err(AppError::EntityNotFound(format!(
                "キャンペーン（{}）が見つかりませんでした。",
                event.campaign_id
            )));
        };

        // ② 看板の存在確認
        let hoarding: Option<(HoardingId,)> =
            sqlx::query_as("SELECT hoarding_id FROM hoardings WHERE hoarding_id = $1")
                .bind(event.hoarding_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        if hoarding.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "看板（{}）が見つかりませんでした。",
                event.hoarding_id
            )));
        }

        // ③ キャンペーンの期間を引き継いで掲出予約を追加する
        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO campaign_hoardings
                (reservation_id, campaign_id, hoarding_id, start_date, end_date)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reservation_id)
        .bind(event.campaign_id)
        .bind(event.hoarding_id)
        .bind(start_date)
        .bind(end_date)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No campaign_hoardings record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Campaign>> {
        let campaign_rows: Vec<CampaignRow> = sqlx::query_as(
            r#"
                SELECT
                    campaign_id,
                    campaign_name,
                    client_name,
                    start_date,
                    end_date
                FROM campaigns
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let link_rows: Vec<CampaignHoardingRow> = sqlx::query_as(
            r#"
                SELECT
                    ch.reservation_id,
                    ch.campaign_id,
                    ch.hoarding_id,
                    h.hoarding_name,
                    h.location
                FROM campaign_hoardings AS ch
                INNER JOIN hoardings AS h ON ch.hoarding_id = h.hoarding_id
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let mut grouped: HashMap<CampaignId, Vec<CampaignHoarding>> = HashMap::new();
        for row in link_rows {
            grouped
                .entry(row.campaign_id)
                .or_default()
                .push(CampaignHoarding::from(row));
        }

        Ok(campaign_rows
            .into_iter()
            .map(|row| {
                let hoardings = grouped.remove(&row.campaign_id).unwrap_or_default();
                row.into_campaign(hoardings)
            })
            .collect())
    }

    async fn find_by_id(&self, campaign_id: CampaignId) -> AppResult<Option<Campaign>> {
        let row: Option<CampaignRow> = sqlx::query_as(
            r#"
                SELECT
                    campaign_id,
                    campaign_name,
                    client_name,
                    start_date,
                    end_date
                FROM campaigns
                WHERE campaign_id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let link_rows: Vec<CampaignHoardingRow> = sqlx::query_as(
            r#"
                SELECT
                    ch.reservation_id,
                    ch.campaign_id,
                    ch.hoarding_id,
                    h.hoarding_name,
                    h.location
                FROM campaign_hoardings AS ch
                INNER JOIN hoardings AS h ON ch.hoarding_id = h.hoarding_id
                WHERE ch.campaign_id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let hoardings = link_rows.into_iter().map(CampaignHoarding::from).collect();

        Ok(Some(row.into_campaign(hoardings)))
    }

    async fn list_all_reservations(&self) -> AppResult<Vec<Reservation>> {
        // 過去・未来を含む全予約を返す。現在有効かどうかの判定は計算側が行う
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    hoarding_id,
                    start_date,
                    end_date
                FROM campaign_hoardings
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_reservations_by_hoarding_id(
        &self,
        hoarding_id: HoardingId,
    ) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    hoarding_id,
                    start_date,
                    end_date
                FROM campaign_hoardings
                WHERE hoarding_id = $1
            "#,
        )
        .bind(hoarding_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }
}

impl CampaignRepositoryImpl {
    // create, extend, add_hoarding でのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
