//! Redis Streams 기반 브로커
//!
//! - 추가: `XADD <topic> MAXLEN ~ <n> * payload <json> key <partition-key>`
//! - 읽기: `XREADGROUP GROUP <group> <consumer> COUNT <n> BLOCK <ms> STREAMS <topic> >`
//! - 확인: `XACK <topic> <group> <id>`
//! - 회수: `XAUTOCLAIM <topic> <group> <consumer> <min-idle-ms> 0 COUNT <n>`

use std::time::Duration;

use async_trait::async_trait;
use redis::streams::{StreamAutoClaimReply, StreamId, StreamReadReply};
use redis::{AsyncCommands, RedisResult};

use crate::caching::redis::RedisClient;
use crate::errors::{AppError, AppResult};
use crate::repositories::streams::broker::{
    DeliveryError, DeliveryReceipt, MessageBroker, MessageSource, PendingDelivery, StreamRecord,
};

/// 레코드 본문 필드 이름
pub const PAYLOAD_FIELD: &str = "payload";
/// 파티션 키 필드 이름
pub const KEY_FIELD: &str = "key";

/// `XADD` 기반 [`MessageBroker`]
#[derive(Clone)]
pub struct RedisStreamBroker {
    redis: RedisClient,
    max_len: usize,
}

impl RedisStreamBroker {
    pub fn new(redis: RedisClient, max_len: usize) -> Self {
        Self { redis, max_len }
    }
}

impl MessageBroker for RedisStreamBroker {
    fn submit(&self, topic: &str, key: &str, payload: String) -> AppResult<PendingDelivery> {
        if topic.is_empty() {
            return Err(AppError::QueueError("토픽 이름이 비어 있습니다".to_string()));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AppError::QueueError(format!("비동기 런타임 없이 제출할 수 없습니다: {}", e)))?;

        let (tx, pending) = PendingDelivery::channel(topic);
        let mut conn = self.redis.connection();
        let topic = topic.to_string();
        let key = key.to_string();
        let max_len = self.max_len;

        runtime.spawn(async move {
            let appended: RedisResult<String> = redis::cmd("XADD")
                .arg(&topic)
                .arg("MAXLEN")
                .arg("~")
                .arg(max_len)
                .arg("*")
                .arg(PAYLOAD_FIELD)
                .arg(&payload)
                .arg(KEY_FIELD)
                .arg(&key)
                .query_async(&mut conn)
                .await;

            let outcome = match appended {
                Ok(offset) => Ok(DeliveryReceipt { topic, offset }),
                Err(e) => Err(DeliveryError::new(topic, e.to_string())),
            };

            // 수신 측이 버려졌어도 전송은 이미 끝났습니다
            let _ = tx.send(outcome);
        });

        Ok(pending)
    }
}

/// `XREADGROUP` 기반 [`MessageSource`]
///
/// `BLOCK` 읽기는 연결을 붙잡고 있으므로 요청 경로와 공유하지 않는 별도
/// [`RedisClient`]로 만들어야 합니다.
#[derive(Clone)]
pub struct RedisStreamSource {
    redis: RedisClient,
    topic: String,
    group: String,
    consumer: String,
    block: Duration,
}

impl RedisStreamSource {
    pub fn new(
        redis: RedisClient,
        topic: impl Into<String>,
        group: impl Into<String>,
        consumer: impl Into<String>,
        block: Duration,
    ) -> Self {
        Self {
            redis,
            topic: topic.into(),
            group: group.into(),
            consumer: consumer.into(),
            block,
        }
    }
}

#[async_trait]
impl MessageSource for RedisStreamSource {
    async fn ensure_group(&self) -> AppResult<()> {
        let mut conn = self.redis.connection();

        let created: RedisResult<String> = redis::cmd("XGROUP")
            .arg("CREATE")
            .arg(&self.topic)
            .arg(&self.group)
            .arg("0")
            .arg("MKSTREAM")
            .query_async(&mut conn)
            .await;

        match created {
            Ok(_) => {
                log::info!("컨슈머 그룹 생성: stream={}, group={}", self.topic, self.group);
                Ok(())
            }
            Err(e) if e.code() == Some("BUSYGROUP") => {
                log::debug!("컨슈머 그룹이 이미 존재합니다: {}", self.group);
                Ok(())
            }
            Err(e) => {
                log::error!("컨슈머 그룹 생성 실패: {}", e);
                Err(e.into())
            }
        }
    }

    async fn poll(&self, count: usize) -> AppResult<Vec<StreamRecord>> {
        let mut conn = self.redis.connection();

        // BLOCK 시간 안에 새 메시지가 없으면 nil이 돌아옵니다
        let reply: RedisResult<Option<StreamReadReply>> = redis::cmd("XREADGROUP")
            .arg("GROUP")
            .arg(&self.group)
            .arg(&self.consumer)
            .arg("COUNT")
            .arg(count)
            .arg("BLOCK")
            .arg(self.block.as_millis() as u64)
            .arg("STREAMS")
            .arg(&self.topic)
            .arg(">")
            .query_async(&mut conn)
            .await;

        let reply = match reply {
            Ok(Some(reply)) => reply,
            Ok(None) => return Ok(Vec::new()),
            Err(e) if e.is_timeout() => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(reply
            .keys
            .into_iter()
            .flat_map(|stream| stream.ids)
            .map(to_record)
            .collect())
    }

    async fn ack(&self, id: &str) -> AppResult<()> {
        let mut conn = self.redis.connection();
        let _: i64 = conn.xack(&self.topic, &self.group, &[id]).await?;
        log::debug!("메시지 처리 확인: {}", id);
        Ok(())
    }

    async fn reclaim(&self, min_idle: Duration, count: usize) -> AppResult<Vec<StreamRecord>> {
        let mut conn = self.redis.connection();

        let reply: RedisResult<Option<StreamAutoClaimReply>> = redis::cmd("XAUTOCLAIM")
            .arg(&self.topic)
            .arg(&self.group)
            .arg(&self.consumer)
            .arg(min_idle.as_millis() as u64)
            .arg("0")
            .arg("COUNT")
            .arg(count)
            .query_async(&mut conn)
            .await;

        let reply = match reply {
            Ok(Some(reply)) => reply,
            Ok(None) => return Ok(Vec::new()),
            Err(e) if e.is_timeout() => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(reply.claimed.into_iter().map(to_record).collect())
    }
}

fn to_record(entry: StreamId) -> StreamRecord {
    StreamRecord {
        payload: entry.get::<String>(PAYLOAD_FIELD),
        id: entry.id,
    }
}
