//! # Domain Layer Module
//!
//! 발송 파이프라인이 주고받는 값 객체들입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── events    - 도메인 이벤트 (JobCreated, ResumeApproved, ...)
//! ├── email     - 이메일 큐 메시지 봉투
//! ├── requests  - HTTP 요청 본문
//! └── response  - HTTP 응답 래퍼
//!      │
//!      ▼
//! Application Layer (Services)
//! ```
//!
//! 모든 타입은 `serde`로 camelCase JSON과 상호 변환되며,
//! 외부 입력은 `validator`로 검증합니다.

pub mod events;
pub mod email;
pub mod requests;
pub mod response;

pub use email::EmailMessage;
pub use events::{DomainEvent, DomainEventKind, JobClosure, JobRef, ResumeApplication};
pub use response::ApiResponse;
