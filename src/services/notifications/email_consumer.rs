//! 이메일 큐 컨슈머
//!
//! 컨슈머 그룹으로 이메일 토픽을 읽어 템플릿을 렌더링하고 메일을 발송합니다.
//! 전달 보장은 최소 한 번(at-least-once)입니다.
//!
//! 레코드 한 건의 처리 결과:
//!
//! | 상황 | 처리 | ack |
//! |------|------|-----|
//! | 발송 성공 | - | O |
//! | JSON 파싱 실패 | 로그 후 폐기 | O |
//! | 템플릿 없음 / 렌더링 실패 | 데드레터 | O |
//! | 발송 실패, `retryCount < 3` | `retryCount + 1`로 다시 큐에 넣음 | O |
//! | 발송 실패, `retryCount >= 3` | 데드레터 | O |
//! | 재큐잉/데드레터 기록 실패 | - | X (회수 대기) |
//! | ack 실패 | 로그 후 다음 레코드 진행 | X (회수 대기) |
//!
//! ack되지 않은 레코드는 그룹의 미확인 목록(PEL)에 남습니다. 시작할 때와
//! 새 레코드가 없는 상태가 `reclaim_interval` 이상 이어질 때,
//! `reclaim_min_idle` 이상 묵은 레코드를 회수해 다시 처리합니다.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::config::{EmailQueueConfig, MAX_CONSUMER_RETRIES};
use crate::domain::EmailMessage;
use crate::errors::{AppError, AppResult};
use crate::repositories::streams::{MessageBroker, MessageSource, StreamRecord};
use crate::services::notifications::mailer::Mailer;
use crate::services::notifications::templates::TemplateRenderer;

/// 폴링 실패 후 다시 시도하기까지의 대기 시간
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// 레코드 한 건의 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum ConsumeOutcome {
    Delivered,
    Requeued { retry_count: u32 },
    DeadLettered,
    Discarded,
}

pub struct EmailQueueConsumer {
    source: Arc<dyn MessageSource>,
    broker: Arc<dyn MessageBroker>,
    renderer: Arc<TemplateRenderer>,
    mailer: Arc<dyn Mailer>,
    config: EmailQueueConfig,
}

impl EmailQueueConsumer {
    pub fn new(
        source: Arc<dyn MessageSource>,
        broker: Arc<dyn MessageBroker>,
        renderer: Arc<TemplateRenderer>,
        mailer: Arc<dyn Mailer>,
        config: EmailQueueConfig,
    ) -> Self {
        Self { source, broker, renderer, mailer, config }
    }

    /// `shutdown`이 `true`가 될 때까지 폴링 루프를 돕니다.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> AppResult<()> {
        self.source.ensure_group().await?;

        log::info!(
            "📬 이메일 컨슈머 시작: topic={}, group={}, consumer={}, mailer={}",
            self.config.topic, self.config.consumer_group, self.config.consumer_name, self.mailer.name()
        );

        if let Err(e) = self.recover_pending().await {
            log::warn!("미확인 레코드 회수 실패: {}", e);
        }
        let mut last_reclaim = Instant::now();

        while !*shutdown.borrow() {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                handled = self.poll_once() => match handled {
                    Ok(0) if last_reclaim.elapsed() >= self.config.reclaim_interval => {
                        last_reclaim = Instant::now();
                        if let Err(e) = self.recover_pending().await {
                            log::warn!("미확인 레코드 회수 실패: {}", e);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("이메일 큐 폴링 실패: {}", e);
                        tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        log::info!("📭 이메일 컨슈머 종료");
        Ok(())
    }

    /// 한 번 폴링해서 읽은 레코드를 모두 처리합니다. 처리한 건수를 돌려줍니다.
    pub async fn poll_once(&self) -> AppResult<usize> {
        let records = self.source.poll(self.config.batch_size).await?;
        Ok(self.handle_batch(records).await)
    }

    /// `reclaim_min_idle` 이상 ack되지 않은 레코드를 회수해 처리합니다.
    /// 회수한 건수를 돌려줍니다.
    pub async fn recover_pending(&self) -> AppResult<usize> {
        let records = self
            .source
            .reclaim(self.config.reclaim_min_idle, self.config.batch_size)
            .await?;

        if !records.is_empty() {
            log::info!("🔁 미확인 레코드 {}건 회수", records.len());
        }
        Ok(self.handle_batch(records).await)
    }

    /// 레코드마다 처리 후 ack합니다. 한 건의 실패가 나머지를 막지 않습니다.
    async fn handle_batch(&self, records: Vec<StreamRecord>) -> usize {
        let count = records.len();

        for record in records {
            match self.process(&record).await {
                Ok(outcome) => {
                    log::debug!("레코드 {} 처리 결과: {:?}", record.id, outcome);
                    if let Err(e) = self.source.ack(&record.id).await {
                        log::warn!("레코드 {} ack 실패, 회수 대기: {}", record.id, e);
                    }
                }
                Err(e) => {
                    log::error!("레코드 {} 처리 실패, ack 보류: {}", record.id, e);
                }
            }
        }

        count
    }

    /// 레코드 한 건을 처리합니다. `Ok`이면 ack해도 됩니다.
    pub async fn process(&self, record: &StreamRecord) -> AppResult<ConsumeOutcome> {
        let Some(payload) = record.payload.as_deref() else {
            log::error!("payload 필드가 없는 레코드를 폐기합니다: {}", record.id);
            return Ok(ConsumeOutcome::Discarded);
        };

        let message: EmailMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                log::error!("이메일 메시지 파싱 실패, 폐기합니다: id={}, error={}", record.id, e);
                return Ok(ConsumeOutcome::Discarded);
            }
        };

        let rendered = match self.renderer.render(&message) {
            Ok(rendered) => rendered,
            Err(e) => {
                log::error!("템플릿 렌더링 실패: to={}, error={}", message.to, e);
                self.write(&self.config.dead_letter_topic, &message).await?;
                return Ok(ConsumeOutcome::DeadLettered);
            }
        };

        match self.mailer.send(&message.to, &rendered).await {
            Ok(()) => {
                log::info!("✉️ 이메일 발송 완료: to={}, template={}", message.to, message.template_name);
                Ok(ConsumeOutcome::Delivered)
            }
            Err(e) if message.retry_count < MAX_CONSUMER_RETRIES => {
                let retry = message.next_attempt();
                log::warn!(
                    "이메일 발송 실패, 재시도 예약 ({}/{}): to={}, error={}",
                    retry.retry_count, MAX_CONSUMER_RETRIES, message.to, e
                );
                self.write(&self.config.topic, &retry).await?;
                Ok(ConsumeOutcome::Requeued { retry_count: retry.retry_count })
            }
            Err(e) => {
                log::error!(
                    "이메일 발송 최종 실패, 데드레터로 이동: to={}, error={}",
                    message.to, e
                );
                self.write(&self.config.dead_letter_topic, &message).await?;
                Ok(ConsumeOutcome::DeadLettered)
            }
        }
    }

    /// 브로커 확인까지 기다리는 기록
    async fn write(&self, topic: &str, message: &EmailMessage) -> AppResult<()> {
        let payload = serde_json::to_string(message)?;
        self.broker
            .submit(topic, &message.to, payload)?
            .await
            .map_err(|e| AppError::QueueError(e.to_string()))?;
        Ok(())
    }
}
