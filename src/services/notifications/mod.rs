//! 이메일 알림 서비스 모듈
//!
//! ```text
//! EmailQueueProducer ──XADD──▶ email-notifications ──XREADGROUP──▶ EmailQueueConsumer
//!        │                                                       │
//!        └─(재시도 소진)─▶ email-notifications.dlq ◀─(재시도 소진)─┘
//!                                                   TemplateRenderer → Mailer
//! ```

pub mod email_producer;
pub mod email_consumer;
pub mod templates;
pub mod mailer;

pub use email_consumer::{ConsumeOutcome, EmailQueueConsumer};
pub use email_producer::EmailQueueProducer;
pub use mailer::{LogMailer, Mailer, SmtpMailer};
pub use templates::{RenderedEmail, TemplateRenderer};
