//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//! 횡단 관심사(Cross-cutting concerns)를 라우트 스코프 단위로 명시적으로 적용합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 토큰 폐기 게이트 (RevocationGate)
//! - Bearer 토큰 추출
//! - 폐기 목록 조회 (조회 실패 시 통과)
//! - 폐기된 토큰이면 401 (`AppError::AuthenticationError`)
//!
//! ### 2. 게이트웨이 서명 검증 (GatewaySignatureGuard)
//! - `X-Gateway-Signature` / `X-Gateway-Timestamp` 검증
//! - 예외 경로 접두사 목록 지원
//! - 실패 시 403 (`AppError::AuthorizationError`)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1")
//!             .wrap(GatewaySignatureGuard::new(context.signature_config.clone()))
//!             .wrap(RevocationGate::new(context.revocation_cache.clone()))
//!             .service(web::scope("/notifications").service(enqueue_email))
//!     )
//! ```

pub mod revocation_gate;
mod revocation_inner;
pub mod gateway_signature;
mod gateway_signature_inner;

// 미들웨어 재export
pub use gateway_signature::GatewaySignatureGuard;
pub use revocation_gate::RevocationGate;
