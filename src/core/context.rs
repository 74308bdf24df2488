//! 애플리케이션 컨텍스트
//!
//! 프로세스 시작 시 한 번 명시적으로 조립되는 공유 구성요소 묶음입니다.
//! 핸들러와 미들웨어는 전역 조회 없이 이 값을 주입받습니다.

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::config::{EmailQueueConfig, GatewaySignatureConfig, DOMAIN_EVENT_TOPIC};
use crate::repositories::streams::{MessageBroker, RedisStreamBroker};
use crate::repositories::tokens::{RedisRevocationStore, RevocationStore};
use crate::services::auth::TokenRevocationCache;
use crate::services::events::{DomainEventPublisher, EmailNotificationRelay, StreamEventPublisher};
use crate::services::notifications::EmailQueueProducer;

#[derive(Clone)]
pub struct AppContext {
    pub revocation_cache: Arc<TokenRevocationCache>,
    pub email_producer: Arc<EmailQueueProducer>,
    pub event_publisher: Arc<dyn DomainEventPublisher>,
    pub signature_config: Arc<GatewaySignatureConfig>,
}

impl AppContext {
    /// Redis 기반 운영 구성
    ///
    /// - 폐기 목록: `RedisRevocationStore`
    /// - 이메일 큐 / 도메인 이벤트: `RedisStreamBroker`
    /// - 이벤트 발행: `StreamEventPublisher`를 `EmailNotificationRelay`로 감쌈
    pub fn from_redis(
        redis: RedisClient,
        queue: EmailQueueConfig,
        signature: GatewaySignatureConfig,
        lookup_timeout: std::time::Duration,
    ) -> Self {
        let store: Arc<dyn RevocationStore> = Arc::new(RedisRevocationStore::new(redis.clone()));
        let broker: Arc<dyn MessageBroker> = Arc::new(RedisStreamBroker::new(redis, queue.stream_max_len));

        let email_producer = Arc::new(EmailQueueProducer::new(broker.clone(), queue));
        let durable: Arc<dyn DomainEventPublisher> =
            Arc::new(StreamEventPublisher::new(broker, DOMAIN_EVENT_TOPIC));

        Self {
            revocation_cache: Arc::new(TokenRevocationCache::new(store, lookup_timeout)),
            event_publisher: Arc::new(EmailNotificationRelay::new(durable, email_producer.clone())),
            email_producer,
            signature_config: Arc::new(signature),
        }
    }
}
