//! 내구성 있는 도메인 이벤트 발행자
//!
//! 이벤트 봉투를 브로커 토픽에 추가하고, 브로커가 추가를 확인(스트림 ID 반환)한
//! 뒤에만 `Ok`를 돌려줍니다. `publish`가 성공하면 이벤트는 이미 기록된 상태입니다.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainEvent;
use crate::errors::{AppError, AppResult};
use crate::repositories::streams::MessageBroker;
use crate::services::events::publisher::DomainEventPublisher;

pub struct StreamEventPublisher {
    broker: Arc<dyn MessageBroker>,
    topic: String,
}

impl StreamEventPublisher {
    pub fn new(broker: Arc<dyn MessageBroker>, topic: impl Into<String>) -> Self {
        Self { broker, topic: topic.into() }
    }
}

#[async_trait]
impl DomainEventPublisher for StreamEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        let payload = serde_json::to_string(event)?;

        let receipt = self.broker
            .submit(&self.topic, event.event_type(), payload)?
            .await
            .map_err(|e| {
                log::error!("도메인 이벤트 기록 실패: {} ({})", event.event_type(), e);
                AppError::QueueError(e.to_string())
            })?;

        log::info!(
            "도메인 이벤트 기록: {} id={} offset={}",
            event.event_type(), event.event_id(), receipt.offset
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::fixtures::job;
    use crate::domain::DomainEventKind;
    use crate::repositories::streams::memory::{InMemoryBroker, Verdict};

    #[actix_web::test]
    async fn test_publish_returns_after_append() {
        let broker = Arc::new(InMemoryBroker::new());
        let publisher = StreamEventPublisher::new(broker.clone(), "domain-events");
        let event = DomainEvent::new(DomainEventKind::job_closed(job(), None));

        publisher.publish(&event).await.unwrap();

        let records = broker.records("domain-events");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "JobClosed");
        let envelope: serde_json::Value = serde_json::from_str(&records[0].1).unwrap();
        assert_eq!(envelope["eventId"], event.event_id().to_string());
        assert_eq!(envelope["payload"]["reason"], "Closed by user");
    }

    #[actix_web::test]
    async fn test_rejected_append_is_error() {
        let broker = Arc::new(InMemoryBroker::scripted([Verdict::Reject("NOPERM")]));
        let publisher = StreamEventPublisher::new(broker.clone(), "domain-events");
        let event = DomainEvent::new(DomainEventKind::JobCreated(job()));

        let result = publisher.publish(&event).await;

        assert!(matches!(result, Err(AppError::QueueError(_))));
        assert!(broker.records("domain-events").is_empty());
    }

    #[actix_web::test]
    async fn test_publish_all_stops_after_rejection() {
        let broker = Arc::new(InMemoryBroker::scripted([Verdict::Accept, Verdict::Reject("NOPERM")]));
        let publisher = StreamEventPublisher::new(broker.clone(), "domain-events");
        let events = vec![
            DomainEvent::new(DomainEventKind::JobCreated(job())),
            DomainEvent::new(DomainEventKind::JobUpdated(job())),
            DomainEvent::new(DomainEventKind::JobPublished(job())),
        ];

        assert!(publisher.publish_all(&events).await.is_err());

        let keys: Vec<String> = broker.records("domain-events").into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["JobCreated".to_string()]);
        assert_eq!(broker.submissions(), 2);
    }
}
