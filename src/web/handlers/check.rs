// POST /check — run a plagiarism check on the submitted text.
//
// Request:  {"text": "..."}
// Response: {"plagiarism": 0-100, "level": "Safe|Medium|High",
//            "checkedSentences": n, "totalSentences": n,
//            "sources": [{"sentence", "title", "link", "score"}]}
//
// Returns 400 if the body isn't JSON or the text is missing/too short, and a
// generic 500 if the pipeline fails internally.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::CheckError;
use crate::models::{CheckResult, RiskLevel};
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub plagiarism: u8,
    pub level: RiskLevel,
    pub checked_sentences: usize,
    pub total_sentences: usize,
    pub sources: Vec<SourceMatch>,
}

/// A sentence and the web page it most likely came from.
#[derive(Debug, Serialize, Deserialize)]
pub struct SourceMatch {
    pub sentence: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub score: f64,
}

impl From<&CheckResult> for CheckResponse {
    fn from(result: &CheckResult) -> Self {
        Self {
            plagiarism: result.plagiarism,
            level: result.level,
            checked_sentences: result.checked_sentences(),
            total_sentences: result.total_sentences,
            sources: result
                .sources
                .iter()
                .map(|s| SourceMatch {
                    sentence: s.sentence.clone(),
                    title: s.candidate.title.clone(),
                    link: s.candidate.link.clone(),
                    score: s.score,
                })
                .collect(),
        }
    }
}

/// POST /check
pub async fn check_text(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected /check body");
            return api_error(
                StatusCode::BAD_REQUEST,
                "Request body must be a JSON object with a string `text` field",
            );
        }
    };

    match state.checker.check_optional(body.text.as_deref()).await {
        Ok(result) => Json(CheckResponse::from(&result)).into_response(),
        Err(CheckError::InvalidInput(message)) => api_error(StatusCode::BAD_REQUEST, &message),
        Err(e @ CheckError::Internal(_)) => {
            error!(error = %e, "Check failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error while checking text",
            )
        }
    }
}
