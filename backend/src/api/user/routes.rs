use axum::routing::get;
use axum::Router;

use super::handlers::dashboard;
use crate::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new().route("/me/dashboard", get(dashboard))
}
