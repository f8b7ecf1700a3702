use super::{
    campaign::build_campaign_routers, health::build_health_check_routers,
    hoarding::build_hoarding_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_hoarding_routers())
        .merge(build_campaign_routers());
    Router::new().nest("/api/v1", router)
}
