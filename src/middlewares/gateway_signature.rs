//! 게이트웨이 서명 검증 미들웨어
//!
//! 다운스트림 서비스가 API 게이트웨이를 거치지 않은 직접 호출을 거부합니다.
//! 게이트웨이는 아래 헤더를 붙여 요청을 전달합니다.
//!
//! | 헤더 | 내용 |
//! |------|------|
//! | `X-User-Id` | 인증된 사용자 ID (없을 수 있음) |
//! | `X-User-Email` | 인증된 사용자 이메일 (없을 수 있음) |
//! | `X-Gateway-Timestamp` | 서명 시각 (epoch millis) |
//! | `X-Gateway-Signature` | `"{id}:{email}:{timestamp}"`의 HMAC-SHA256 (base64) |
//!
//! 검증 순서: 예외 경로 → 비활성화 여부 → 헤더 존재 → 타임스탬프 허용 오차 → 서명.
//! 실패 시 모두 403입니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::config::GatewaySignatureConfig;
use crate::middlewares::gateway_signature_inner::GatewaySignatureService;

pub const HEADER_SIGNATURE: &str = "X-Gateway-Signature";
pub const HEADER_TIMESTAMP: &str = "X-Gateway-Timestamp";
pub const HEADER_USER_ID: &str = "X-User-Id";
pub const HEADER_USER_EMAIL: &str = "X-User-Email";

/// 게이트웨이 서명 검증 미들웨어
pub struct GatewaySignatureGuard {
    config: Arc<GatewaySignatureConfig>,
}

impl GatewaySignatureGuard {
    pub fn new(config: Arc<GatewaySignatureConfig>) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GatewaySignatureGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = GatewaySignatureService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GatewaySignatureService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use super::*;
    use crate::core::context::testing::{signature_config, TEST_SECRET};
    use crate::utils::signature::sign_forwarded_identity;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn now_millis() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    macro_rules! guarded_app {
        ($enabled:expr) => {
            test::init_service(
                App::new()
                    .wrap(GatewaySignatureGuard::new(Arc::new(signature_config($enabled))))
                    .route("/health", web::get().to(ok))
                    .route("/api/v1/notifications/emails", web::get().to(ok))
            ).await
        };
    }

    fn signed_request(timestamp: i64, signature: &str) -> test::TestRequest {
        test::TestRequest::get()
            .uri("/api/v1/notifications/emails")
            .insert_header((HEADER_USER_ID, "42"))
            .insert_header((HEADER_USER_EMAIL, "alice@example.com"))
            .insert_header((HEADER_TIMESTAMP, timestamp.to_string()))
            .insert_header((HEADER_SIGNATURE, signature.to_string()))
    }

    async fn error_message<B: actix_web::body::MessageBody>(resp: ServiceResponse<B>) -> String {
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["error"].as_str().unwrap_or_default().to_string()
    }

    #[actix_web::test]
    async fn test_valid_signature_passes() {
        let app = guarded_app!(true);
        let ts = now_millis();
        let signature = sign_forwarded_identity(Some("42"), Some("alice@example.com"), ts, TEST_SECRET).unwrap();

        let resp = test::call_service(&app, signed_request(ts, &signature).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_anonymous_identity_signature_passes() {
        let app = guarded_app!(true);
        let ts = now_millis();
        let signature = sign_forwarded_identity(None, None, ts, TEST_SECRET).unwrap();

        let req = test::TestRequest::get()
            .uri("/api/v1/notifications/emails")
            .insert_header((HEADER_TIMESTAMP, ts.to_string()))
            .insert_header((HEADER_SIGNATURE, signature))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_headers_are_forbidden() {
        let app = guarded_app!(true);

        let req = test::TestRequest::get().uri("/api/v1/notifications/emails").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            error_message(resp).await,
            "Authorization error: Direct access not allowed. Request must go through API Gateway."
        );
    }

    #[actix_web::test]
    async fn test_expired_timestamp_is_forbidden() {
        let app = guarded_app!(true);
        let ts = now_millis() - 10 * 60 * 1000;
        let signature = sign_forwarded_identity(Some("42"), Some("alice@example.com"), ts, TEST_SECRET).unwrap();

        let resp = test::call_service(&app, signed_request(ts, &signature).to_request()).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_message(resp).await, "Authorization error: Request timestamp expired");
    }

    #[actix_web::test]
    async fn test_non_numeric_timestamp_is_forbidden() {
        let app = guarded_app!(true);

        let req = test::TestRequest::get()
            .uri("/api/v1/notifications/emails")
            .insert_header((HEADER_TIMESTAMP, "yesterday"))
            .insert_header((HEADER_SIGNATURE, "c2ln"))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_tampered_identity_is_forbidden() {
        let app = guarded_app!(true);
        let ts = now_millis();
        let signature = sign_forwarded_identity(Some("1"), Some("alice@example.com"), ts, TEST_SECRET).unwrap();

        let resp = test::call_service(&app, signed_request(ts, &signature).to_request()).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_message(resp).await, "Authorization error: Invalid gateway signature");
    }

    #[actix_web::test]
    async fn test_exempt_path_and_disabled_guard_pass() {
        let app = guarded_app!(true);
        let health = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, health).await.status(), StatusCode::OK);

        let disabled = guarded_app!(false);
        let direct = test::TestRequest::get().uri("/api/v1/notifications/emails").to_request();
        assert_eq!(test::call_service(&disabled, direct).await.status(), StatusCode::OK);
    }
}
