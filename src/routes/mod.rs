//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별 스코프로 묶고 미들웨어를 스코프 단위로 적용합니다.
//!
//! ```text
//! /health                              (미들웨어 없음)
//! /api/v1                              RevocationGate → GatewaySignatureGuard
//!   ├── /notifications/emails
//!   ├── /events
//!   └── /auth/revocations
//! ```
//!
//! `/api/v1` 아래의 모든 엔드포인트는 부수 효과(메일 큐잉, 폐기 키 기록)가 있으므로
//! 게이트웨이 서명 없이는 도달할 수 없습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(|cfg| configure_all_routes(cfg, &context));
//! ```

use crate::core::AppContext;
use crate::handlers;
use crate::middlewares::{GatewaySignatureGuard, RevocationGate};
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 컨텍스트를 앱 데이터로 등록하고 기능별 라우트를 통합합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
/// * `context` - 핸들러와 미들웨어가 공유하는 구성요소
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, context: &AppContext) {
    cfg.app_data(web::Data::new(context.clone()));

    // Health check endpoint
    cfg.service(health_check);

    // wrap은 나중에 등록한 것이 바깥쪽입니다: RevocationGate → GatewaySignatureGuard → 핸들러
    cfg.service(
        web::scope("/api/v1")
            .wrap(GatewaySignatureGuard::new(context.signature_config.clone()))
            .wrap(RevocationGate::new(context.revocation_cache.clone()))
            .configure(configure_notification_routes)
            .configure(configure_event_routes)
            .configure(configure_auth_routes)
    );
}

/// 이메일 알림 라우트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/notifications/emails \
///   -H "X-Gateway-Timestamp: 1700000000000" \
///   -H "X-Gateway-Signature: <base64 hmac>" \
///   -H "Content-Type: application/json" \
///   -d '{"to":"user@example.com","subject":"Welcome","templateName":"welcome","username":"user","value":{}}'
/// ```
fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .service(handlers::notifications::enqueue_email)
    );
}

fn configure_event_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .service(handlers::events::publish_event)
    );
}

/// 인증 관련 라우트
///
/// - `POST /api/v1/auth/revocations` - 토큰 폐기 등록
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::revocations::revoke_token)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "jobhunter_dispatch",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z",
///   "features": {
///     "cache": "Redis",
///     "broker": "Redis Streams"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "jobhunter_dispatch",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "cache": "Redis",
            "broker": "Redis Streams"
        }
    }))
}
