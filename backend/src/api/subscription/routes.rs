//! Defines the HTTP routes students use to activate a subscription.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{payment_info, request_subscription};
use crate::AppState;

pub fn subscription_router() -> Router<AppState> {
    Router::new()
        .route("/subscription/payment-info", get(payment_info))
        .route("/subscription/request", post(request_subscription))
}
