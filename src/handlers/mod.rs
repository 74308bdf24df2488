//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 [`AppContext`](crate::core::AppContext)를 `web::Data`로 주입받아
//! 서비스 계층에 작업을 위임하고, 실패는 `AppError`로 반환합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   API Gateway / 내부 서비스
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                            ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 폐기 캐시, 이벤트 발행, 이메일 큐       ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - Redis 키 / Redis Streams        ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`notifications`**: 이메일 큐 등록 (`POST /api/v1/notifications/emails`)
//! - **`events`**: 도메인 이벤트 발행 (`POST /api/v1/events`)
//! - **`revocations`**: 토큰 폐기 (`POST /api/v1/auth/revocations`)

pub mod events;
pub mod notifications;
pub mod revocations;
