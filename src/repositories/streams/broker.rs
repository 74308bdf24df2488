//! 내구성 브로커 추상화
//!
//! 토픽에 레코드를 추가하는 쪽(`MessageBroker`)과 컨슈머 그룹으로 읽는 쪽(`MessageSource`)을
//! 분리해 정의합니다. 운영 구현은 Redis Streams이며 토픽은 스트림 키,
//! 오프셋은 `XADD`가 돌려준 엔트리 ID입니다.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::errors::AppResult;

/// 브로커가 레코드 추가를 확인한 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub topic: String,
    pub offset: String,
}

/// 비동기 전송 실패. `reason`은 브로커가 보고한 거부 사유입니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("delivery to '{topic}' failed: {reason}")]
pub struct DeliveryError {
    pub topic: String,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(topic: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            reason: reason.into(),
        }
    }
}

pub type DeliveryResult = Result<DeliveryReceipt, DeliveryError>;

/// 아직 완료되지 않은 전송 결과
///
/// `await`하면 최종 결과를 얻습니다. 버려도 전송은 취소되지 않습니다.
#[must_use = "결과를 확인하지 않으면 전송 실패를 알 수 없습니다"]
pub struct PendingDelivery {
    topic: String,
    rx: oneshot::Receiver<DeliveryResult>,
}

impl PendingDelivery {
    /// 완료 신호를 보낼 송신 측과 짝을 이루는 대기 핸들을 만듭니다.
    pub fn channel(topic: impl Into<String>) -> (oneshot::Sender<DeliveryResult>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { topic: topic.into(), rx })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Future for PendingDelivery {
    type Output = DeliveryResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let topic = self.topic.clone();
        Pin::new(&mut self.rx).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                Err(DeliveryError::new(topic, "completion dropped before the broker answered"))
            })
        })
    }
}

/// 토픽에 레코드를 추가하는 브로커
pub trait MessageBroker: Send + Sync {
    /// 레코드를 제출합니다. 호출은 네트워크 왕복을 기다리지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::QueueError` - 제출 자체가 거부된 경우 (런타임 없음, 빈 토픽 등)
    fn submit(&self, topic: &str, key: &str, payload: String) -> AppResult<PendingDelivery>;
}

/// 컨슈머 그룹으로 읽은 레코드 한 건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRecord {
    pub id: String,
    /// `payload` 필드. 없거나 문자열이 아니면 `None`입니다.
    pub payload: Option<String>,
}

/// 컨슈머 그룹 읽기 측
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// 컨슈머 그룹이 없으면 만듭니다. 이미 있으면 성공입니다.
    async fn ensure_group(&self) -> AppResult<()>;

    /// 새 레코드를 최대 `count`개 읽습니다. 없으면 빈 벡터입니다.
    async fn poll(&self, count: usize) -> AppResult<Vec<StreamRecord>>;

    /// 처리 완료를 확인합니다.
    async fn ack(&self, id: &str) -> AppResult<()>;

    /// 전달됐지만 `min_idle` 이상 ack되지 않은 레코드를 이 컨슈머로 가져옵니다.
    ///
    /// 중단된 컨슈머나 ack 실패로 남은 레코드가 여기서 다시 처리됩니다.
    async fn reclaim(&self, min_idle: Duration, count: usize) -> AppResult<Vec<StreamRecord>>;
}
