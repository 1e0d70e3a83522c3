use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    error::TransferError,
    server::AppState,
    transfer::Transfer,
    types::{FailureKind, TransferOutcome, TransferRequest, TransferStatus},
    warning,
};

pub async fn transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return TransferError::Validation(rejection.body_text()).into_response();
        }
    };

    match Transfer::new(state.source.as_ref(), state.destination.as_ref())
        .run(request)
        .await
    {
        Ok(outcome) => (outcome_status(&outcome), Json(outcome)).into_response(),
        Err(e) => {
            warning!("Transfer failed: {}", e);
            e.into_response()
        }
    }
}

pub fn outcome_status(outcome: &TransferOutcome) -> StatusCode {
    match outcome.status {
        TransferStatus::Success => StatusCode::OK,
        TransferStatus::Partial => StatusCode::MULTI_STATUS,
        TransferStatus::Failed => match outcome.failure.as_ref().map(|f| f.kind) {
            Some(FailureKind::EmptySource) | Some(FailureKind::NoMatches) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for TransferError {
    fn into_response(self) -> Response {
        let status = match &self {
            TransferError::Validation(_) | TransferError::NotFound(_) => StatusCode::BAD_REQUEST,
            TransferError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            TransferError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
