pub mod broker;
pub mod redis_stream;

pub use broker::{
    DeliveryError, DeliveryReceipt, DeliveryResult, MessageBroker, MessageSource, PendingDelivery,
    StreamRecord,
};
pub use redis_stream::{RedisStreamBroker, RedisStreamSource};

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::broker::{
        DeliveryError, DeliveryReceipt, MessageBroker, MessageSource, PendingDelivery, StreamRecord,
    };
    use crate::errors::{AppError, AppResult};

    /// 한 번의 제출에 대해 브로커가 보일 반응
    #[derive(Debug, Clone, PartialEq)]
    pub enum Verdict {
        Accept,
        Reject(&'static str),
    }

    /// 메모리 브로커. 토픽별로 `(key, payload)`를 순서대로 쌓습니다.
    ///
    /// `script`에 남은 판정이 없으면 모든 제출을 받아들입니다.
    #[derive(Default)]
    pub struct InMemoryBroker {
        topics: Mutex<HashMap<String, Vec<(String, String)>>>,
        script: Mutex<VecDeque<Verdict>>,
        refuse_submit: bool,
        submissions: Mutex<usize>,
    }

    impl InMemoryBroker {
        pub fn new() -> Self {
            Self::default()
        }

        /// 제출 자체를 거부하는 브로커
        pub fn refusing() -> Self {
            Self {
                refuse_submit: true,
                ..Self::default()
            }
        }

        pub fn scripted(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
            Self {
                script: Mutex::new(verdicts.into_iter().collect()),
                ..Self::default()
            }
        }

        pub fn records(&self, topic: &str) -> Vec<(String, String)> {
            self.topics.lock().unwrap().get(topic).cloned().unwrap_or_default()
        }

        pub fn submissions(&self) -> usize {
            *self.submissions.lock().unwrap()
        }
    }

    impl MessageBroker for InMemoryBroker {
        fn submit(&self, topic: &str, key: &str, payload: String) -> AppResult<PendingDelivery> {
            if self.refuse_submit {
                return Err(AppError::QueueError("broker unavailable".to_string()));
            }
            *self.submissions.lock().unwrap() += 1;

            let verdict = self.script.lock().unwrap().pop_front().unwrap_or(Verdict::Accept);
            let (tx, pending) = PendingDelivery::channel(topic);

            let outcome = match verdict {
                Verdict::Accept => {
                    let mut topics = self.topics.lock().unwrap();
                    let records = topics.entry(topic.to_string()).or_default();
                    records.push((key.to_string(), payload));
                    Ok(DeliveryReceipt {
                        topic: topic.to_string(),
                        offset: format!("{}-0", records.len()),
                    })
                }
                Verdict::Reject(reason) => Err(DeliveryError::new(topic, reason)),
            };

            let _ = tx.send(outcome);
            Ok(pending)
        }
    }

    /// 미리 채워둔 레코드를 돌려주는 읽기 측
    ///
    /// 읽힌 레코드는 ack될 때까지 미확인(pending) 목록에 남고 `reclaim`으로 다시 나옵니다.
    /// 유휴 시간은 따지지 않습니다.
    #[derive(Default)]
    pub struct InMemorySource {
        queued: Mutex<VecDeque<StreamRecord>>,
        pending: Mutex<Vec<StreamRecord>>,
        acked: Mutex<Vec<String>>,
        failing_acks: Mutex<usize>,
    }

    impl InMemorySource {
        pub fn with_records(records: impl IntoIterator<Item = StreamRecord>) -> Self {
            Self {
                queued: Mutex::new(records.into_iter().collect()),
                ..Self::default()
            }
        }

        /// 이전 컨슈머가 읽고 ack하지 못한 레코드
        pub fn with_pending(mut self, records: impl IntoIterator<Item = StreamRecord>) -> Self {
            self.pending.get_mut().unwrap().extend(records);
            self
        }

        /// 처음 `n`번의 ack를 실패시킵니다.
        pub fn failing_first_acks(mut self, n: usize) -> Self {
            *self.failing_acks.get_mut().unwrap() = n;
            self
        }

        pub fn acked(&self) -> Vec<String> {
            self.acked.lock().unwrap().clone()
        }

        pub fn pending_ids(&self) -> Vec<String> {
            self.pending.lock().unwrap().iter().map(|r| r.id.clone()).collect()
        }
    }

    #[async_trait]
    impl MessageSource for InMemorySource {
        async fn ensure_group(&self) -> AppResult<()> {
            Ok(())
        }

        async fn poll(&self, count: usize) -> AppResult<Vec<StreamRecord>> {
            let mut queued = self.queued.lock().unwrap();
            let take = count.min(queued.len());
            let records: Vec<StreamRecord> = queued.drain(..take).collect();
            self.pending.lock().unwrap().extend(records.iter().cloned());
            Ok(records)
        }

        async fn ack(&self, id: &str) -> AppResult<()> {
            {
                let mut failing = self.failing_acks.lock().unwrap();
                if *failing > 0 {
                    *failing -= 1;
                    return Err(AppError::RedisError(format!("XACK {} timed out", id)));
                }
            }
            self.pending.lock().unwrap().retain(|r| r.id != id);
            self.acked.lock().unwrap().push(id.to_string());
            Ok(())
        }

        async fn reclaim(&self, _min_idle: Duration, count: usize) -> AppResult<Vec<StreamRecord>> {
            let pending = self.pending.lock().unwrap();
            Ok(pending.iter().take(count).cloned().collect())
        }
    }
}
