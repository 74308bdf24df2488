//! 인증 경계 서비스 모듈
//!
//! 게이트웨이 요청 경로에서 쓰이는 토큰 폐기 확인을 제공합니다.
//! JWT 검증 자체는 이 서비스의 범위가 아닙니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenRevocationCache;
//!
//! let cache = TokenRevocationCache::new(store, RedisConfig::revocation_lookup_timeout());
//! if cache.is_revoked(token).await {
//!     // 401 Token has been revoked
//! }
//! ```

pub mod revocation_cache;

pub use revocation_cache::{blacklist_key, TokenRevocationCache, BLACKLIST_TOKEN_PREFIX};
