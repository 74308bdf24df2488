//! # Caching Module
//!
//! Redis 연결을 관리합니다. 토큰 폐기 목록 저장소와 스트림 브로커가
//! 같은 [`redis::RedisClient`]를 공유합니다.

pub mod redis;
