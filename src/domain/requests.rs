//! HTTP 요청 본문 DTO

use serde::Deserialize;
use validator::Validate;

/// 토큰 폐기 요청
///
/// `ttlSeconds`는 토큰의 남은 수명이며 호출 측(로그아웃 흐름)이 계산합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RevokeTokenRequest {
    #[validate(length(min = 1, message = "토큰은 필수입니다"))]
    pub token: String,

    #[validate(range(min = 1, message = "TTL은 1초 이상이어야 합니다"))]
    pub ttl_seconds: u64,
}
