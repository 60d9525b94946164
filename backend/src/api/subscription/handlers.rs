//! Handler functions for subscription requests.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::auth::{CurrentUser, UserView};
use crate::errors::AppResult;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub vodafone_cash_number: String,
    pub subscription_price: String,
}

pub async fn payment_info(State(state): State<AppState>) -> Json<PaymentInfo> {
    let payment = &state.config.payment;
    Json(PaymentInfo {
        vodafone_cash_number: payment.vodafone_cash_number.clone(),
        subscription_price: payment.subscription_price.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub user: UserView,
    pub message: String,
}

pub async fn request_subscription(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<SubscriptionResponse>> {
    let user = state
        .subscriptions
        .request(&current.token, &current.user.id)
        .await?;
    Ok(Json(SubscriptionResponse {
        user: user.into(),
        message: "Your request was sent. The account will be activated once the payment is reviewed."
            .to_string(),
    }))
}
