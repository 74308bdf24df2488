//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 알림 발송 파이프라인을 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! fn enqueue(message: &EmailMessage) -> Result<PendingDelivery, AppError> {
//!     if message.to.is_empty() {
//!         return Err(AppError::ValidationError("수신자 주소가 필요합니다".to_string()));
//!     }
//!
//!     let payload = serde_json::to_string(message)?;
//!     broker.submit(topic, &message.to, payload)
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 발송 파이프라인에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// HTTP 경계에서는 자동으로 JSON 응답으로 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// Redis 캐시/스트림 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 브로커가 제출을 거부한 경우 (503 Service Unavailable)
    #[error("Queue error: {0}")]
    QueueError(String),

    /// 메시지 직렬화/역직렬화 실패 (500 Internal Server Error)
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 서명 키 구성 오류. 재시도로 복구되지 않습니다.
    #[error("Crypto error: {0}")]
    CryptoError(String),

    /// 이메일 템플릿 렌더링 실패
    #[error("Template error: {0}")]
    TemplateError(String),

    /// 메일 서버 전달 실패
    #[error("Mail delivery error: {0}")]
    MailDeliveryError(String),
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::QueueError(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("to: invalid email".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_queue_error_response() {
        let error = AppError::QueueError("broker refused submission".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Token has been revoked".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Invalid gateway signature".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_crypto_error_is_server_fault() {
        let error = AppError::CryptoError("HMAC key rejected".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serde_error_conversion() {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let error: AppError = parsed.unwrap_err().into();

        assert!(matches!(error, AppError::SerializationError(_)));
    }
}
