use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::campaign::{
    add_campaign_hoarding, extend_campaign, register_campaign, show_campaign, show_campaign_list,
};

pub fn build_campaign_routers() -> Router<AppRegistry> {
    let campaign_routers = Router::new()
        .route("/", post(register_campaign))
        .route("/", get(show_campaign_list))
        .route("/:campaign_id", get(show_campaign))
        .route("/:campaign_id/extend", put(extend_campaign))
        .route("/:campaign_id/hoardings", post(add_campaign_hoarding));

    Router::new().nest("/campaigns", campaign_routers)
}
