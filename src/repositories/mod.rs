//! # Repositories
//!
//! 외부 저장소 접근 계층입니다. 비즈니스 로직은 여기의 트레이트에만 의존하고,
//! Redis 구현은 프로세스 시작 시 명시적으로 주입됩니다.
//!
//! - [`tokens`] - 토큰 폐기 목록 (`blacklist_token:*` 키)
//! - [`streams`] - Redis Streams 브로커 (추가 / 컨슈머 그룹 읽기)

pub mod tokens;
pub mod streams;
