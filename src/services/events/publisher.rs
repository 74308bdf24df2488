//! 도메인 이벤트 발행 인터페이스
//!
//! 비즈니스 쓰기 작업과 그 부수 효과(알림, 감사 기록 등)를 분리합니다.
//! 호출 측은 `Arc<dyn DomainEventPublisher>`에만 의존하며,
//! 어떤 구현을 쓸지는 프로세스 시작 시 명시적으로 결정됩니다.

use async_trait::async_trait;

use crate::domain::DomainEvent;
use crate::errors::AppResult;

#[async_trait]
pub trait DomainEventPublisher: Send + Sync {
    /// 이벤트 하나를 발행합니다.
    async fn publish(&self, event: &DomainEvent) -> AppResult<()>;

    /// 순서대로 하나씩 발행합니다.
    ///
    /// 첫 실패에서 멈추며, 그 뒤의 이벤트는 발행되지 않습니다.
    async fn publish_all(&self, events: &[DomainEvent]) -> AppResult<()> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

/// 로그만 남기는 발행자
///
/// 최선 노력(best-effort) 구현입니다. 이벤트는 어디에도 저장되지 않으며
/// 발행은 항상 성공합니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventPublisher;

#[async_trait]
impl DomainEventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        log::info!("도메인 이벤트 발행: {} - {:?}", event.event_type(), event.kind());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::recording::RecordingPublisher;
    use super::*;
    use crate::domain::events::fixtures::{application, job};
    use crate::domain::DomainEventKind;

    fn batch() -> Vec<DomainEvent> {
        vec![
            DomainEvent::new(DomainEventKind::JobCreated(job())),
            DomainEvent::new(DomainEventKind::JobPublished(job())),
            DomainEvent::new(DomainEventKind::ResumeSubmitted(application())),
        ]
    }

    #[actix_web::test]
    async fn test_publish_all_preserves_order() {
        let publisher = RecordingPublisher::default();

        publisher.publish_all(&batch()).await.unwrap();

        assert_eq!(
            publisher.event_types(),
            vec!["JobCreated", "JobPublished", "ResumeSubmitted"]
        );
    }

    #[actix_web::test]
    async fn test_publish_all_stops_at_first_failure() {
        let publisher = RecordingPublisher::failing_at(1);

        let result = publisher.publish_all(&batch()).await;

        assert!(result.is_err());
        assert_eq!(publisher.event_types(), vec!["JobCreated"]);
    }

    #[actix_web::test]
    async fn test_publish_all_empty_batch() {
        let publisher = RecordingPublisher::default();

        assert!(publisher.publish_all(&[]).await.is_ok());
        assert!(publisher.event_types().is_empty());
    }

    #[actix_web::test]
    async fn test_logging_publisher_never_fails() {
        assert!(LoggingEventPublisher.publish_all(&batch()).await.is_ok());
    }
}
