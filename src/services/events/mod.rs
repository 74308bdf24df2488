//! 도메인 이벤트 발행 모듈
//!
//! - [`LoggingEventPublisher`] - 로그만 남기는 최선 노력 구현
//! - [`StreamEventPublisher`] - 브로커 확인 후 반환하는 내구성 구현
//! - [`EmailNotificationRelay`] - 지원서 이벤트를 이메일 큐로 중계하는 데코레이터

pub mod publisher;
pub mod stream_publisher;
pub mod email_relay;

pub use email_relay::EmailNotificationRelay;
pub use publisher::{DomainEventPublisher, LoggingEventPublisher};
pub use stream_publisher::StreamEventPublisher;
