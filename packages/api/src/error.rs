use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::records::resolver::ResolveError;
use crate::retry::RetryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportPolicy {
    Ignore,
    Report,
}

/// Public-facing request error. The response body never carries internals;
/// anything reportable is logged under a generated id that is echoed back in
/// the `x-error-id` header.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    public_code: String,
    public_message: Option<String>,
    report_policy: ReportPolicy,
    report_summary: Option<String>,
}

// Associated constants for enum-like usage without parentheses
impl ApiError {
    pub const NOT_FOUND: ApiError = ApiError {
        status: StatusCode::NOT_FOUND,
        public_code: String::new(),
        public_message: None,
        report_policy: ReportPolicy::Ignore,
        report_summary: None,
    };

    pub const UNAUTHORIZED: ApiError = ApiError {
        status: StatusCode::UNAUTHORIZED,
        public_code: String::new(),
        public_message: None,
        report_policy: ReportPolicy::Ignore,
        report_summary: None,
    };
}

impl ApiError {
    /// Caller-facing rejection. The message goes into the body verbatim.
    fn rejection(status: StatusCode, code: &'static str, message: String) -> Self {
        tracing::warn!(code, "{}", message);
        ApiError {
            status,
            public_code: code.to_string(),
            public_message: Some(message),
            report_policy: ReportPolicy::Ignore,
            report_summary: None,
        }
    }

    /// Server-side failure. `summary` is only logged; the body stays generic.
    fn reported(status: StatusCode, code: &'static str, summary: String) -> Self {
        tracing::error!(code, "{}", summary);
        ApiError {
            status,
            public_code: code.to_string(),
            public_message: None,
            report_policy: ReportPolicy::Report,
            report_summary: Some(summary),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::rejection(StatusCode::BAD_REQUEST, "BAD_REQUEST", message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::rejection(StatusCode::NOT_FOUND, "NOT_FOUND", message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::rejection(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::rejection(StatusCode::FORBIDDEN, "FORBIDDEN", message.into())
    }

    pub fn internal(summary: impl Into<String>) -> Self {
        Self::reported(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            summary.into(),
        )
    }

    pub fn service_unavailable(summary: impl Into<String>) -> Self {
        let mut error = Self::reported(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            summary.into(),
        );
        error.public_message = Some("Service unavailable".to_string());
        error
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorEnvelope<'a> {
            error: ErrorBody<'a>,
        }

        #[derive(Serialize)]
        struct ErrorBody<'a> {
            code: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            id: Option<&'a str>,
            message: &'a str,
        }

        let code = if self.public_code.is_empty() {
            match self.status {
                StatusCode::NOT_FOUND => "NOT_FOUND",
                StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
                StatusCode::FORBIDDEN => "FORBIDDEN",
                StatusCode::BAD_REQUEST => "BAD_REQUEST",
                _ => "ERROR",
            }
        } else {
            self.public_code.as_str()
        };

        let public_message = self
            .public_message
            .as_deref()
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or("Error"));

        let mut error_id: Option<String> = None;
        if self.report_policy == ReportPolicy::Report {
            let id = uuid::Uuid::new_v4().to_string();
            tracing::error!(
                error_id = %id,
                status = self.status.as_u16(),
                code,
                summary = self.report_summary.as_deref().unwrap_or(public_message),
                "request failed"
            );
            error_id = Some(id);
        }

        let mut response = (
            self.status,
            Json(ErrorEnvelope {
                error: ErrorBody {
                    code,
                    id: error_id.as_deref(),
                    message: public_message,
                },
            }),
        )
            .into_response();

        if let Some(id) = error_id.as_deref()
            && let Ok(value) = HeaderValue::from_str(id)
        {
            response.headers_mut().insert("x-error-id", value);
        }

        response
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            // An update whose target row vanished is a stale id, not a fault.
            sea_orm::DbErr::RecordNotUpdated => Self::NOT_FOUND,
            err => Self::reported(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                err.to_string(),
            ),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            RetryError::Exhausted { attempts, source } => Self::service_unavailable(format!(
                "record store unavailable after {attempts} attempts: {source}"
            )),
            RetryError::Fatal(source) => source.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::bad_request(format!("JSON error: {}", err))
    }
}

impl From<sea_orm::TransactionError<ApiError>> for ApiError {
    fn from(err: sea_orm::TransactionError<ApiError>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(db_err) => db_err.into(),
            sea_orm::TransactionError::Transaction(api_err) => api_err,
        }
    }
}

impl std::error::Error for ApiError {}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.public_code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn rejections_carry_their_message() {
        let response = ApiError::bad_request("Event name is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("x-error-id").is_none());

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["message"], "Event name is required");
    }

    #[tokio::test]
    async fn reported_errors_hide_the_summary_and_expose_an_id() {
        let response = ApiError::internal("connection pool exhausted").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get("x-error-id").is_some());

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(body["error"]["id"].is_string());
        assert!(
            !body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("connection pool")
        );
    }

    #[tokio::test]
    async fn constants_fall_back_to_canonical_text() {
        let response = ApiError::NOT_FOUND.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Not Found");
    }

    #[test]
    fn vanished_update_targets_read_as_not_found() {
        let error: ApiError = sea_orm::DbErr::RecordNotUpdated.into();
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn exhausted_retries_become_service_unavailable() {
        let error: ApiError = RetryError::Exhausted {
            attempts: 3,
            source: sea_orm::DbErr::Custom("connection reset".into()),
        }
        .into();
        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);

        let error: ApiError =
            RetryError::Fatal(sea_orm::DbErr::Custom("bad query".into())).into();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
