//! # Services
//!
//! 비즈니스 로직 계층입니다.
//!
//! - [`auth`] - 토큰 폐기 확인 (게이트웨이 요청 경로)
//! - [`events`] - 도메인 이벤트 발행
//! - [`notifications`] - 이메일 큐 프로듀서/컨슈머, 템플릿, 메일러

pub mod auth;
pub mod events;
pub mod notifications;
