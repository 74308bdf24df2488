//! 메일 발송 수단
//!
//! - [`SmtpMailer`] - `lettre` 비동기 SMTP 전송
//! - [`LogMailer`] - 발송하지 않고 로그만 남깁니다 (개발용, `SMTP_HOST` 미설정 시)

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpConfig, SmtpSecurity};
use crate::errors::{AppError, AppResult};
use crate::services::notifications::templates::RenderedEmail;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// 렌더링된 메일을 한 명의 수신자에게 보냅니다.
    async fn send(&self, to: &str, email: &RenderedEmail) -> AppResult<()>;

    fn name(&self) -> &'static str;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> AppResult<Self> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
            .parse()
            .map_err(|e| AppError::ValidationError(format!("발신자 주소가 올바르지 않습니다: {}", e)))?;

        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username.clone(), password.clone())),
            _ => None,
        };

        let mut builder = match config.security() {
            SmtpSecurity::ImplicitTls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| AppError::MailDeliveryError(format!("SMTP relay 생성 실패: {}", e)))?,
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| AppError::MailDeliveryError(format!("SMTP STARTTLS relay 생성 실패: {}", e)))?,
            // 인증 없는 로컬 SMTP (Mailpit/Mailhog)
            SmtpSecurity::Plain => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };
        builder = builder.port(config.port);
        if let Some(credentials) = credentials {
            builder = builder.credentials(credentials);
        }

        log::info!("📧 SMTP 메일러 구성: {}:{}", config.host, config.port);

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, email: &RenderedEmail) -> AppResult<()> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| AppError::ValidationError(format!("수신자 주소가 올바르지 않습니다: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(&email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|e| AppError::MailDeliveryError(format!("메일 생성 실패: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::MailDeliveryError(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// 로그 전용 메일러
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, email: &RenderedEmail) -> AppResult<()> {
        log::info!("📨 [LogMailer] to={}, subject={}", to, email.subject);
        log::debug!("📨 [LogMailer] body:\n{}", email.text_body);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
