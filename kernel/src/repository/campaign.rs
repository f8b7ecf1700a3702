use crate::model::{
    availability::Reservation,
    campaign::{
        event::{AddCampaignHoarding, CreateCampaign, ExtendCampaign},
        Campaign,
    },
    id::{CampaignId, HoardingId, ReservationId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    // キャンペーンを登録し、指定された看板ごとに掲出予約を作成する
    async fn create(&self, event: CreateCampaign) -> AppResult<CampaignId>;
    // キャンペーンの掲出終了日を延長する（予約の end_date も追随する）
    async fn extend(&self, event: ExtendCampaign) -> AppResult<()>;
    // 進行中のキャンペーンへ看板を追加する
    async fn add_hoarding(&self, event: AddCampaignHoarding) -> AppResult<ReservationId>;
    async fn find_all(&self) -> AppResult<Vec<Campaign>>;
    async fn find_by_id(&self, campaign_id: CampaignId) -> AppResult<Option<Campaign>>;
    // 夜間バッチ用。日付での絞り込みは行わず全予約を返す
    async fn list_all_reservations(&self) -> AppResult<Vec<Reservation>>;
    // 単一看板の差分計算用。その看板に紐づく全予約を返す
    async fn find_reservations_by_hoarding_id(
        &self,
        hoarding_id: HoardingId,
    ) -> AppResult<Vec<Reservation>>;
}
