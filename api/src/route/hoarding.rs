use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::hoarding::{
    delete_hoarding, register_hoarding, show_hoarding, show_hoarding_list, update_hoarding,
};

pub fn build_hoarding_routers() -> Router<AppRegistry> {
    let hoarding_routers = Router::new()
        .route("/", post(register_hoarding))
        .route("/", get(show_hoarding_list))
        .route("/:hoarding_id", get(show_hoarding))
        .route("/:hoarding_id", put(update_hoarding))
        .route("/:hoarding_id", delete(delete_hoarding));

    Router::new().nest("/hoardings", hoarding_routers)
}
