//! 이메일 큐 프로듀서
//!
//! [`EmailMessage`]를 JSON으로 직렬화해 이메일 토픽에 제출합니다.
//! 파티션 키는 수신자 주소입니다.
//!
//! 결과는 두 단계로 나뉩니다.
//!
//! 1. `enqueue` 호출 자체의 실패 (직렬화 실패, 브로커의 제출 거부) → 즉시 `Err`
//! 2. 브로커 확인 결과 → 반환된 [`PendingDelivery`]가 최종 결과로 완료됩니다
//!
//! 비동기 실패는 지수 백오프로 재시도하고, 마지막 시도까지 실패하면
//! 데드레터 토픽에 기록한 뒤 `email_queue_dead_lettered_total` 카운터를 올립니다.
//! 메시지 사이의 순서는 보장하지 않습니다.

use std::sync::Arc;

use crate::config::EmailQueueConfig;
use crate::domain::EmailMessage;
use crate::errors::{AppError, AppResult};
use crate::repositories::streams::{DeliveryError, DeliveryResult, MessageBroker, PendingDelivery};

/// 데드레터 처리된 메시지 수
pub const DEAD_LETTER_COUNTER: &str = "email_queue_dead_lettered_total";

pub struct EmailQueueProducer {
    broker: Arc<dyn MessageBroker>,
    config: EmailQueueConfig,
}

impl EmailQueueProducer {
    pub fn new(broker: Arc<dyn MessageBroker>, config: EmailQueueConfig) -> Self {
        Self { broker, config }
    }

    pub fn topic(&self) -> &str {
        &self.config.topic
    }

    /// 메시지를 큐에 넣습니다.
    ///
    /// 반환된 핸들을 버려도 전송과 재시도는 계속됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::SerializationError` - 메시지 직렬화 실패
    /// * `AppError::QueueError` - 브로커가 제출을 거부함
    pub fn enqueue(&self, message: &EmailMessage) -> AppResult<PendingDelivery> {
        let payload = serde_json::to_string(message)?;

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AppError::QueueError(format!("비동기 런타임 없이 제출할 수 없습니다: {}", e)))?;

        let first_attempt = self.broker
            .submit(&self.config.topic, &message.to, payload.clone())
            .map_err(|e| {
                log::error!("이메일 메시지 큐 제출 실패: to={}, error={}", message.to, e);
                e
            })?;

        log::info!(
            "이메일 메시지 큐 제출: to={}, template={}",
            message.to, message.template_name
        );

        let (tx, pending) = PendingDelivery::channel(&self.config.topic);
        let broker = self.broker.clone();
        let config = self.config.clone();
        let key = message.to.clone();

        runtime.spawn(async move {
            let outcome = settle(broker.as_ref(), &config, &key, payload, first_attempt).await;
            let _ = tx.send(outcome);
        });

        Ok(pending)
    }
}

/// 첫 시도의 결과를 기다리고, 실패하면 재시도 후 데드레터까지 처리합니다.
async fn settle(
    broker: &dyn MessageBroker,
    config: &EmailQueueConfig,
    key: &str,
    payload: String,
    first_attempt: PendingDelivery,
) -> DeliveryResult {
    let mut attempt = 1;
    let mut in_flight = first_attempt;

    let last_error = loop {
        let error = match in_flight.await {
            Ok(receipt) => {
                log::info!(
                    "이메일 메시지 전송 성공 - topic [{}], offset [{}]",
                    receipt.topic, receipt.offset
                );
                return Ok(receipt);
            }
            Err(error) => error,
        };

        log::error!(
            "이메일 메시지 전송 실패 ({}/{}): {}",
            attempt, config.max_delivery_attempts, error.reason
        );

        if attempt >= config.max_delivery_attempts {
            break error;
        }

        tokio::time::sleep(config.backoff_for(attempt)).await;
        attempt += 1;

        in_flight = match broker.submit(&config.topic, key, payload.clone()) {
            Ok(next) => next,
            Err(e) => break DeliveryError::new(&config.topic, e.to_string()),
        };
    };

    dead_letter(broker, config, key, payload).await;
    Err(last_error)
}

async fn dead_letter(broker: &dyn MessageBroker, config: &EmailQueueConfig, key: &str, payload: String) {
    metrics::counter!(DEAD_LETTER_COUNTER).increment(1);

    let submitted = broker.submit(&config.dead_letter_topic, key, payload);
    match submitted {
        Ok(pending) => match pending.await {
            Ok(receipt) => log::warn!(
                "이메일 메시지를 데드레터 토픽에 기록: topic [{}], offset [{}]",
                receipt.topic, receipt.offset
            ),
            Err(e) => log::error!("데드레터 기록 실패, 메시지 유실: to={}, error={}", key, e),
        },
        Err(e) => log::error!("데드레터 제출 실패, 메시지 유실: to={}, error={}", key, e),
    }
}
