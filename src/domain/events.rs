//! 도메인 이벤트
//!
//! 비즈니스 쓰기 작업이 끝난 뒤 발행되는 불변 레코드입니다.
//! 직렬화하면 `{eventId, eventType, occurredOn, payload}` 봉투가 됩니다.
//!
//! ```json
//! {
//!   "eventId": "5b0c...",
//!   "occurredOn": "2024-01-01T00:00:00Z",
//!   "eventType": "JobClosed",
//!   "payload": { "jobId": 7, "jobName": "Backend Engineer", "companyId": 3, "reason": "Closed by user" }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 채용 공고 마감 사유 기본값
pub const DEFAULT_CLOSE_REASON: &str = "Closed by user";

/// 채용 공고 식별 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRef {
    pub job_id: i64,
    pub job_name: String,
    pub company_id: i64,
}

/// 채용 공고 마감 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobClosure {
    #[serde(flatten)]
    pub job: JobRef,
    #[serde(default = "default_close_reason")]
    pub reason: String,
}

/// 지원서 상태 변경 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeApplication {
    pub resume_id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub company_id: i64,
    pub user_email: String,
    pub job_name: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
}

/// 이벤트 종류와 페이로드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType", content = "payload")]
pub enum DomainEventKind {
    JobCreated(JobRef),
    JobUpdated(JobRef),
    JobPublished(JobRef),
    JobClosed(JobClosure),
    ResumeSubmitted(ResumeApplication),
    ResumeApproved(ResumeApplication),
    ResumeRejected(ResumeApplication),
    ResumeWithdrawn(ResumeApplication),
}

fn default_close_reason() -> String {
    DEFAULT_CLOSE_REASON.to_string()
}

impl DomainEventKind {
    /// 이벤트 종류 이름. 직렬화된 `eventType`과 같습니다.
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEventKind::JobCreated(_) => "JobCreated",
            DomainEventKind::JobUpdated(_) => "JobUpdated",
            DomainEventKind::JobPublished(_) => "JobPublished",
            DomainEventKind::JobClosed(_) => "JobClosed",
            DomainEventKind::ResumeSubmitted(_) => "ResumeSubmitted",
            DomainEventKind::ResumeApproved(_) => "ResumeApproved",
            DomainEventKind::ResumeRejected(_) => "ResumeRejected",
            DomainEventKind::ResumeWithdrawn(_) => "ResumeWithdrawn",
        }
    }

    /// 공고 마감 이벤트. 사유가 없으면 기본 사유를 사용합니다.
    pub fn job_closed(job: JobRef, reason: Option<String>) -> Self {
        DomainEventKind::JobClosed(JobClosure {
            job,
            reason: reason.unwrap_or_else(default_close_reason),
        })
    }
}

/// 발행 단위가 되는 도메인 이벤트
///
/// 생성 후에는 바뀌지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    event_id: Uuid,
    occurred_on: DateTime<Utc>,
    #[serde(flatten)]
    kind: DomainEventKind,
}

impl DomainEvent {
    pub fn new(kind: DomainEventKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_on: Utc::now(),
            kind,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    pub fn kind(&self) -> &DomainEventKind {
        &self.kind
    }
}

impl From<DomainEventKind> for DomainEvent {
    fn from(kind: DomainEventKind) -> Self {
        Self::new(kind)
    }
}
