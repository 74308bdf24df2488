//! 잡헌터 알림 발송 서비스
//!
//! 채용 플랫폼의 알림 발송 파이프라인입니다.
//! 토큰 폐기 확인, 도메인 이벤트 발행, Redis Streams 기반 이메일 큐,
//! 그리고 게이트웨이 요청 서명(HMAC-SHA256)을 제공합니다.
//!
//! # Features
//!
//! - **토큰 폐기 캐시**: Redis 키 존재 여부로 폐기 확인, 장애 시 통과(fail-open)
//! - **도메인 이벤트**: 채용 공고/지원서 이벤트 발행, 지원서 이벤트는 메일로 중계
//! - **이메일 큐**: 비동기 제출, 지수 백오프 재시도, 데드레터
//! - **이메일 컨슈머**: 컨슈머 그룹 폴링, Handlebars 렌더링, SMTP 발송
//! - **게이트웨이 서명**: 게이트웨이를 거치지 않은 직접 호출 차단
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← RevocationGate / GatewaySignatureGuard
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌──────────────────┐
//! │    Services     │ ───▶ │ EmailQueueConsumer│
//! └─────────────────┘      └──────────────────┘
//!          │                        │
//!          ▼                        ▼
//! ┌─────────────────┐      ┌──────────────────┐
//! │  Repositories   │      │   SMTP / 로그     │
//! └─────────────────┘      └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Redis + Streams │ ← 저장소 / 브로커
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use jobhunter_dispatch::core::AppContext;
//! use jobhunter_dispatch::domain::EmailMessage;
//!
//! let context = AppContext::from_redis(redis, queue_config, signature_config, lookup_timeout);
//!
//! if context.revocation_cache.is_revoked(token).await {
//!     return unauthorized();
//! }
//!
//! let message = EmailMessage::new("alice@example.com", "Welcome", "welcome", "alice", json!({}));
//! let pending = context.email_producer.enqueue(&message)?;
//! ```

pub mod core;
pub mod config;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
