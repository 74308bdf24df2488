//! # Redis 클라이언트 구현
//!
//! 토큰 폐기 목록(키-값 + TTL)과 Redis Streams 브로커가 함께 사용하는
//! Redis 연결을 제공합니다.
//!
//! ## 연결 관리
//!
//! 내부적으로 [`ConnectionManager`]를 사용합니다. 단일 멀티플렉스 TCP 연결을
//! 여러 동시 요청이 공유하며, 연결이 끊기면 자동으로 재연결합니다.
//! 호출마다 매니저를 복제해 사용하므로 호출 사이에 잠금이 걸리지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let redis = RedisClient::new().await?;
//!
//! redis.set_flag_with_expiry("blacklist_token:abc", 3600).await?;
//! assert!(redis.exists("blacklist_token:abc").await?);
//! ```

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};

use crate::config::RedisConfig;

/// Redis 클라이언트
///
/// `Clone` 비용이 낮아 여러 저장소/브로커가 나눠 가질 수 있습니다.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL` 설정으로 연결합니다.
    ///
    /// # Errors
    ///
    /// * 연결 실패 또는 `PING` 실패
    pub async fn new() -> RedisResult<Self> {
        Self::connect(&RedisConfig::url()).await
    }

    /// 주어진 URL로 연결하고 `PING`으로 서버 가용성을 확인합니다.
    pub async fn connect(url: &str) -> RedisResult<Self> {
        let client = Client::open(url)?;
        let mut manager = ConnectionManager::new(client).await?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    /// 명령 실행용 연결 핸들. 복제본이므로 호출자가 자유롭게 `&mut`로 사용합니다.
    pub fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// 키 존재 여부
    pub async fn exists(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.connection();
        conn.exists(key).await
    }

    /// 존재 표시용 값(`"1"`)을 TTL과 함께 저장합니다.
    pub async fn set_flag_with_expiry(&self, key: &str, seconds: u64) -> RedisResult<()> {
        let mut conn = self.connection();
        conn.set_ex(key, "1", seconds).await
    }

    /// 키 삭제. 없는 키를 지워도 성공입니다.
    pub async fn del(&self, key: &str) -> RedisResult<()> {
        let mut conn = self.connection();
        let _: i64 = conn.del(key).await?;
        Ok(())
    }
}
