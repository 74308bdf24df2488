//! 토큰 폐기 목록 저장소
//!
//! 폐기된 토큰은 `blacklist_token:<token>` 키로 TTL과 함께 저장됩니다.
//! 키가 존재하면 해당 토큰은 거부 대상이고, 없으면 "폐기된 것으로 알려지지 않음"입니다.

use async_trait::async_trait;

use crate::caching::redis::RedisClient;
use crate::errors::AppResult;

/// 폐기 목록 저장소 추상화
///
/// 운영 환경에서는 [`RedisRevocationStore`]를 사용합니다.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// 키 존재 여부를 한 번의 왕복으로 확인합니다.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// 키를 TTL(초)과 함께 기록합니다.
    async fn insert(&self, key: &str, ttl_seconds: u64) -> AppResult<()>;

    /// 키를 삭제합니다.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Redis 기반 폐기 목록 저장소
#[derive(Clone)]
pub struct RedisRevocationStore {
    redis: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.redis.exists(key).await?)
    }

    async fn insert(&self, key: &str, ttl_seconds: u64) -> AppResult<()> {
        self.redis.set_flag_with_expiry(key, ttl_seconds).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.redis.del(key).await?;
        Ok(())
    }
}
