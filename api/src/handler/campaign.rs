use crate::model::campaign::{
    AddCampaignHoardingRequest, AddCampaignHoardingRequestWithId, CampaignResponse,
    CampaignsResponse, CreateCampaignRequest, ExtendCampaignRequest, ExtendCampaignRequestWithId,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use garde::Validate;
use kernel::model::{
    availability,
    campaign::event::CreateCampaign,
    id::{CampaignId, HoardingId},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_campaign(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCampaignRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let event: CreateCampaign = req.into();
    let hoarding_ids = event.hoarding_ids.clone();

    // ① キャンペーンと看板ごとの掲出予約を登録する
    let campaign_id = registry.campaign_repository().create(event).await?;

    // ② 予約を登録した看板は夜間バッチを待たずに空き状況へ即時反映する
    refresh_hoarding_statuses(&registry, &hoarding_ids).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "campaignId": campaign_id.to_string() })),
    ))
}

pub async fn extend_campaign(
    Path(campaign_id): Path<CampaignId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ExtendCampaignRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    // ① 掲出終了日を更新する（紐づく予約の end_date も追随する）
    let extend_campaign = ExtendCampaignRequestWithId::new(campaign_id, req);
    registry
        .campaign_repository()
        .extend(extend_campaign.into())
        .await?;

    // ② 延長後の期間で、紐づく看板の空き状況を即時反映する
    let campaign = registry
        .campaign_repository()
        .find_by_id(campaign_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("キャンペーン（{campaign_id}）が見つかりませんでした。"))
        })?;
    let hoarding_ids: Vec<HoardingId> = campaign
        .hoardings
        .iter()
        .map(|hoarding| hoarding.hoarding_id)
        .collect();
    refresh_hoarding_statuses(&registry, &hoarding_ids).await?;

    Ok(StatusCode::OK)
}

pub async fn add_campaign_hoarding(
    Path(campaign_id): Path<CampaignId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<AddCampaignHoardingRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let hoarding_id = req.hoarding_id;
    let add_hoarding = AddCampaignHoardingRequestWithId::new(campaign_id, req);
    let reservation_id = registry
        .campaign_repository()
        .add_hoarding(add_hoarding.into())
        .await?;

    // 追加した看板だけ空き状況を即時反映する
    refresh_hoarding_statuses(&registry, &[hoarding_id]).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "reservationId": reservation_id.to_string() })),
    ))
}

pub async fn show_campaign_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CampaignsResponse>> {
    registry
        .campaign_repository()
        .find_all()
        .await
        .map(CampaignsResponse::from)
        .map(Json)
}

pub async fn show_campaign(
    Path(campaign_id): Path<CampaignId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CampaignResponse>> {
    registry
        .campaign_repository()
        .find_by_id(campaign_id)
        .await
        .and_then(|campaign| match campaign {
            Some(campaign) => Ok(Json(campaign.into())),
            None => Err(AppError::EntityNotFound(format!(
                "キャンペーン（{campaign_id}）が見つかりませんでした。"
            ))),
        })
}

// 指定された看板について、その看板の全予約から今日時点の空き状況を計算し直して保存する。
// 計算は夜間バッチと同じ述語を使うため、バッチの結果と食い違うことはない
async fn refresh_hoarding_statuses(
    registry: &AppRegistry,
    hoarding_ids: &[HoardingId],
) -> AppResult<()> {
    let today = Local::now().date_naive();
    for hoarding_id in hoarding_ids {
        let reservations = registry
            .campaign_repository()
            .find_reservations_by_hoarding_id(*hoarding_id)
            .await?;
        let status = availability::status_of(*hoarding_id, &reservations, today);
        registry.hoarding_repository().apply_status(&status).await?;
    }
    Ok(())
}
