use crate::model::{
    availability::HoardingStatus,
    hoarding::{
        event::{CreateHoarding, DeleteHoarding, UpdateHoarding},
        Hoarding,
    },
    id::HoardingId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait HoardingRepository: Send + Sync {
    // 看板を登録する
    async fn create(&self, event: CreateHoarding) -> AppResult<HoardingId>;
    // 看板の一覧を取得する
    async fn find_all(&self) -> AppResult<Vec<Hoarding>>;
    // 看板 ID から看板情報を取得する
    async fn find_by_id(&self, hoarding_id: HoardingId) -> AppResult<Option<Hoarding>>;
    // 看板の基本情報を更新する
    async fn update(&self, event: UpdateHoarding) -> AppResult<()>;
    // 看板を削除する。進行中・今後の掲出予約が残っている場合は拒否する
    async fn delete(&self, event: DeleteHoarding) -> AppResult<()>;
    // 空き状況の再計算対象となる全看板の ID を取得する
    async fn list_ids(&self) -> AppResult<Vec<HoardingId>>;
    // 再計算した空き状況を看板へ反映する
    async fn apply_status(&self, status: &HoardingStatus) -> AppResult<()>;
}
