//! JSON envelope returned by `POST /api/submit-project`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::Error;
use crate::contract::Registration;

pub const SUCCESS_MESSAGE: &str = "Project registered successfully on the blockchain!";

/// `{status: "success", message, transactionHash}` or `{status: "error", message}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitResponse {
    Success {
        message: String,
        #[serde(rename = "transactionHash")]
        transaction_hash: String,
        #[serde(rename = "projectId", default, skip_serializing_if = "Option::is_none")]
        project_id: Option<u64>,
    },
    Error {
        message: String,
    },
}

impl SubmitResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success { .. } => StatusCode::OK,
            Self::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Registration> for SubmitResponse {
    fn from(registration: Registration) -> Self {
        Self::Success {
            message: SUCCESS_MESSAGE.to_string(),
            transaction_hash: registration.transaction_hash,
            project_id: registration.project_id,
        }
    }
}

impl From<Error> for SubmitResponse {
    fn from(err: Error) -> Self {
        Self::error(err.to_string())
    }
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
