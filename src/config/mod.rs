//! # Configuration Module
//!
//! 알림 발송 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리하며,
//! `PROFILE`에 따라 `.env.dev` / `.env.prod` 파일이 먼저 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, Redis, Rate Limiting 설정
//! - [`messaging_config`] - 이메일 큐, 게이트웨이 서명, SMTP 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{EmailQueueConfig, RedisConfig, ServerConfig};
//!
//! let bind = ServerConfig::bind_address();
//! let timeout = RedisConfig::revocation_lookup_timeout();
//! let queue = EmailQueueConfig::from_env();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # Redis
//! export REDIS_URL="redis://127.0.0.1:6379"
//! export REVOCATION_LOOKUP_TIMEOUT_MS="200"
//!
//! # 게이트웨이 서명
//! export GATEWAY_SIGNATURE_SECRET="shared-secret-with-gateway"
//!
//! # SMTP (없으면 로그 메일러 사용)
//! export SMTP_HOST="smtp.example.com"
//! ```

pub mod data_config;
pub mod messaging_config;

pub use data_config::*;
pub use messaging_config::*;
