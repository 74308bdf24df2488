//! 지원서 이벤트 → 이메일 알림 중계
//!
//! 내부 발행자를 감싸는 데코레이터입니다. 모든 이벤트를 내부 발행자에게 먼저
//! 넘긴 뒤, 지원자에게 알릴 이벤트라면 이메일 메시지를 만들어 큐에 넣습니다.
//!
//! | 이벤트 | 템플릿 | 제목 |
//! |--------|--------|------|
//! | `ResumeSubmitted` | `resume-submitted` | Application Submitted Successfully |
//! | `ResumeApproved` | `resume-approved` | Congratulations! Your Application Was Approved |
//! | `ResumeRejected` | `resume-rejected` | Application Status Update |
//!
//! 그 밖의 이벤트(`ResumeWithdrawn`, 채용 공고 이벤트)는 메일을 보내지 않습니다.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{DomainEvent, DomainEventKind, EmailMessage, ResumeApplication};
use crate::errors::AppResult;
use crate::services::events::publisher::DomainEventPublisher;
use crate::services::notifications::EmailQueueProducer;
use crate::utils::string_utils::email_local_part;

pub struct EmailNotificationRelay {
    inner: Arc<dyn DomainEventPublisher>,
    producer: Arc<EmailQueueProducer>,
}

impl EmailNotificationRelay {
    pub fn new(inner: Arc<dyn DomainEventPublisher>, producer: Arc<EmailQueueProducer>) -> Self {
        Self { inner, producer }
    }
}

#[async_trait]
impl DomainEventPublisher for EmailNotificationRelay {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        self.inner.publish(event).await?;

        match notification_for(event.kind()) {
            Some(message) => {
                // 전송 결과는 프로듀서가 재시도/데드레터까지 처리합니다
                let _pending = self.producer.enqueue(&message)?;
            }
            None => {
                log::debug!("{} 이벤트는 이메일 알림 대상이 아닙니다", event.event_type());
            }
        }
        Ok(())
    }
}

/// 지원자에게 보낼 이메일. 알림 대상이 아니면 `None`입니다.
pub fn notification_for(kind: &DomainEventKind) -> Option<EmailMessage> {
    let (application, template, subject) = match kind {
        DomainEventKind::ResumeSubmitted(a) => (a, "resume-submitted", "Application Submitted Successfully"),
        DomainEventKind::ResumeApproved(a) => (a, "resume-approved", "Congratulations! Your Application Was Approved"),
        DomainEventKind::ResumeRejected(a) => (a, "resume-rejected", "Application Status Update"),
        DomainEventKind::ResumeWithdrawn(a) => {
            log::info!(
                "지원 취소 - 회사 {}에 알림 필요 (resumeId={})",
                a.company_id, a.resume_id
            );
            return None;
        }
        _ => return None,
    };

    Some(EmailMessage::new(
        application.user_email.clone(),
        subject,
        template,
        email_local_part(&application.user_email),
        template_variables(application),
    ))
}

fn template_variables(application: &ResumeApplication) -> serde_json::Value {
    json!({
        "jobName": application.job_name,
        "companyName": application.company_name,
        "resumeId": application.resume_id,
        "jobId": application.job_id,
    })
}
