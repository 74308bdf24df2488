//! 메시징 관련 설정 관리 모듈
//!
//! 이메일 큐(토픽, 컨슈머 그룹, 재시도 정책), 게이트웨이 서명 검증,
//! SMTP 발송 설정을 관리합니다.

use std::env;
use std::time::Duration;

use crate::config::Environment;

/// 이메일 알림 토픽 이름
pub const EMAIL_TOPIC: &str = "email-notifications";

/// 이메일 컨슈머 그룹 이름
pub const EMAIL_CONSUMER_GROUP: &str = "notification-service";

/// 도메인 이벤트 토픽 이름
pub const DOMAIN_EVENT_TOPIC: &str = "domain-events";

/// 컨슈머가 발송 실패 메시지를 다시 큐에 넣는 최대 횟수
pub const MAX_CONSUMER_RETRIES: u32 = 3;

/// 이메일 큐 설정
///
/// 프로듀서와 컨슈머가 같은 값을 공유합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailQueueConfig {
    /// 메시지를 적재할 토픽 (Redis Stream 키)
    pub topic: String,
    /// 최종 실패 메시지를 보관할 토픽
    pub dead_letter_topic: String,
    /// 컨슈머 그룹 이름
    pub consumer_group: String,
    /// 이 프로세스의 컨슈머 이름
    pub consumer_name: String,
    /// 프로듀서의 전송 시도 횟수 (최초 시도 포함)
    pub max_delivery_attempts: u32,
    /// 재시도 간격의 기준값. 시도마다 두 배로 늘어납니다.
    pub retry_base_delay: Duration,
    /// 재시도 간격의 상한
    pub retry_max_delay: Duration,
    /// 스트림 근사 최대 길이 (`XADD MAXLEN ~`)
    pub stream_max_len: usize,
    /// 한 번의 폴링에서 읽을 최대 레코드 수
    pub batch_size: usize,
    /// `XREADGROUP BLOCK` 대기 시간
    pub poll_block: Duration,
    /// ack되지 않은 채 이 시간 이상 머문 레코드를 회수합니다 (`XAUTOCLAIM`)
    pub reclaim_min_idle: Duration,
    /// 유휴 상태에서 미확인 레코드 회수를 시도하는 간격
    pub reclaim_interval: Duration,
}

impl Default for EmailQueueConfig {
    fn default() -> Self {
        Self {
            topic: EMAIL_TOPIC.to_string(),
            dead_letter_topic: format!("{}.dlq", EMAIL_TOPIC),
            consumer_group: EMAIL_CONSUMER_GROUP.to_string(),
            consumer_name: "notification-worker-1".to_string(),
            max_delivery_attempts: 3,
            retry_base_delay: Duration::from_millis(200),
            retry_max_delay: Duration::from_secs(5),
            stream_max_len: 100_000,
            batch_size: 10,
            poll_block: Duration::from_secs(2),
            reclaim_min_idle: Duration::from_secs(60),
            reclaim_interval: Duration::from_secs(30),
        }
    }
}

impl EmailQueueConfig {
    /// 환경변수에서 설정을 로드합니다. 없는 값은 기본값을 사용합니다.
    ///
    /// # Environment Variables
    ///
    /// - `EMAIL_TOPIC`: 기본값 `email-notifications`
    /// - `EMAIL_CONSUMER_NAME`: 기본값 `notification-worker-1`
    /// - `EMAIL_MAX_DELIVERY_ATTEMPTS`: 기본값 3
    /// - `EMAIL_RETRY_BASE_DELAY_MS`: 기본값 200
    /// - `EMAIL_RECLAIM_MIN_IDLE_MS`: 기본값 60000
    /// - `EMAIL_RECLAIM_INTERVAL_MS`: 기본값 30000
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let topic = env::var("EMAIL_TOPIC").unwrap_or(defaults.topic);

        Self {
            dead_letter_topic: format!("{}.dlq", topic),
            topic,
            consumer_name: env::var("EMAIL_CONSUMER_NAME").unwrap_or(defaults.consumer_name),
            max_delivery_attempts: parse_env("EMAIL_MAX_DELIVERY_ATTEMPTS")
                .filter(|n: &u32| *n > 0)
                .unwrap_or(defaults.max_delivery_attempts),
            retry_base_delay: parse_env("EMAIL_RETRY_BASE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_base_delay),
            reclaim_min_idle: parse_env("EMAIL_RECLAIM_MIN_IDLE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.reclaim_min_idle),
            reclaim_interval: parse_env("EMAIL_RECLAIM_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.reclaim_interval),
            ..defaults
        }
    }

    /// `attempt`번째 실패 이후 기다릴 시간 (지수 백오프)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_base_delay
            .saturating_mul(factor)
            .min(self.retry_max_delay)
    }
}

/// 게이트웨이 서명 검증 설정
///
/// 다운스트림 서비스가 게이트웨이를 거치지 않은 요청을 거부할 때 사용합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySignatureConfig {
    /// HMAC 키
    pub secret: String,
    /// 검증 활성화 여부
    pub enabled: bool,
    /// 허용되는 타임스탬프 오차 (초)
    pub timestamp_tolerance_secs: i64,
    /// 검증을 건너뛰는 경로 접두사
    pub exempt_prefixes: Vec<String>,
}

impl GatewaySignatureConfig {
    /// # Environment Variables
    ///
    /// - `GATEWAY_SIGNATURE_SECRET`
    /// - `GATEWAY_SIGNATURE_ENABLED`: 기본값 true
    /// - `GATEWAY_TIMESTAMP_TOLERANCE_SECS`: 기본값 60
    pub fn from_env() -> Self {
        Self {
            secret: Self::secret(),
            enabled: env::var("GATEWAY_SIGNATURE_ENABLED")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "off"))
                .unwrap_or(true),
            timestamp_tolerance_secs: parse_env("GATEWAY_TIMESTAMP_TOLERANCE_SECS").unwrap_or(60),
            exempt_prefixes: vec!["/health".to_string(), "/actuator/".to_string()],
        }
    }

    fn secret() -> String {
        env::var("GATEWAY_SIGNATURE_SECRET")
            .unwrap_or_else(|_| {
                if !Environment::current().allows_default_secrets() {
                    log::error!("GATEWAY_SIGNATURE_SECRET not set outside development!");
                }
                log::warn!("GATEWAY_SIGNATURE_SECRET not set, using default (not secure for production!)");
                "dev-gateway-signature-secret".to_string()
            })
    }

    /// 주어진 경로가 서명 검증 대상에서 제외되는지 여부
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// SMTP 연결 보안 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// 465 포트: 연결 직후 TLS 핸드셰이크
    ImplicitTls,
    /// 587 등: 평문 연결 후 STARTTLS 업그레이드
    StartTls,
    /// 로컬 개발용 (Mailpit/Mailhog)
    Plain,
}

/// SMTP 발송 설정
#[derive(Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub use_tls: bool,
    pub from_address: String,
    pub from_name: String,
}

impl SmtpConfig {
    /// SMTP 설정을 로드합니다. `SMTP_HOST`가 없으면 `None`을 반환하고
    /// 호출 측은 로그 전용 메일러를 사용합니다.
    pub fn from_env() -> Option<Self> {
        let host = env::var("SMTP_HOST").ok()?;

        Some(Self {
            host,
            port: parse_env("SMTP_PORT").unwrap_or(587),
            username: env::var("SMTP_USERNAME").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
            use_tls: env::var("SMTP_TLS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            from_address: env::var("SMTP_FROM_ADDRESS")
                .unwrap_or_else(|_| "noreply@jobhunter.dev".to_string()),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "JobHunter".to_string()),
        })
    }

    /// `use_tls`와 포트로 연결 방식을 정합니다.
    pub fn security(&self) -> SmtpSecurity {
        match (self.use_tls, self.port) {
            (false, _) => SmtpSecurity::Plain,
            (true, 465) => SmtpSecurity::ImplicitTls,
            (true, _) => SmtpSecurity::StartTls,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::error!("{} 파싱 실패: '{}'. 기본값 사용", key, raw);
            None
        }
    }
}
