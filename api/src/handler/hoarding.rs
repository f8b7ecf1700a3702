use crate::model::hoarding::{
    CreateHoardingRequest, HoardingResponse, HoardingsResponse, UpdateHoardingRequest,
    UpdateHoardingRequestWithId,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{hoarding::event::DeleteHoarding, id::HoardingId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_hoarding(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateHoardingRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let hoarding_id = registry.hoarding_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "hoardingId": hoarding_id.to_string() })),
    ))
}

pub async fn show_hoarding_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HoardingsResponse>> {
    registry
        .hoarding_repository()
        .find_all()
        .await
        .map(HoardingsResponse::from)
        .map(Json)
}

pub async fn show_hoarding(
    Path(hoarding_id): Path<HoardingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HoardingResponse>> {
    registry
        .hoarding_repository()
        .find_by_id(hoarding_id)
        .await
        .and_then(|hoarding| match hoarding {
            Some(hoarding) => Ok(Json(hoarding.into())),
            None => Err(AppError::EntityNotFound(format!(
                "看板（{hoarding_id}）が見つかりませんでした。"
            ))),
        })
}

pub async fn update_hoarding(
    Path(hoarding_id): Path<HoardingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateHoardingRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_hoarding = UpdateHoardingRequestWithId::new(hoarding_id, req);
    registry
        .hoarding_repository()
        .update(update_hoarding.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_hoarding(
    Path(hoarding_id): Path<HoardingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_hoarding = DeleteHoarding { hoarding_id };
    registry
        .hoarding_repository()
        .delete(delete_hoarding)
        .await
        .map(|_| StatusCode::OK)
}
