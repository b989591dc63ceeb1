use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Protected landing route; echoes the identity established by the bearer token.
pub async fn dashboard(
    Extension(account): Extension<AuthenticatedAccount>,
) -> ApiSuccess<DashboardResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        DashboardResponseData {
            message: "Welcome to your dashboard!".to_string(),
            account_id: account.account_id.to_string(),
            email: account.email,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponseData {
    pub message: String,
    pub account_id: String,
    pub email: String,
}
