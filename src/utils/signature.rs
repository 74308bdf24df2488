//! # HMAC 서명 유틸리티
//!
//! 신뢰 경계를 벗어나는 데이터(게이트웨이가 전달하는 사용자 식별 헤더 등)에
//! HMAC-SHA256 서명을 붙이고 검증합니다.
//!
//! 서명 대상은 `"{subject_id}:{subject_email}:{timestamp}"` 형태의 정규화 문자열이며,
//! 서명은 표준 base64 문자열로 분리되어 전달됩니다.
//!
//! ```rust,ignore
//! use crate::utils::signature::{canonicalize, sign, verify};
//!
//! let data = canonicalize(Some("42"), Some("alice@example.com"), 1_700_000_000_000);
//! let signature = sign(&data, secret)?;
//! assert!(verify(Some(&data), Some(&signature), Some(secret)));
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// 서명 대상 정규화 문자열을 만듭니다. 없는 필드는 빈 문자열이 됩니다.
///
/// ```rust,ignore
/// assert_eq!(canonicalize(None, None, 1000), "::1000");
/// ```
pub fn canonicalize(subject_id: Option<&str>, subject_email: Option<&str>, timestamp: i64) -> String {
    format!(
        "{}:{}:{}",
        subject_id.unwrap_or(""),
        subject_email.unwrap_or(""),
        timestamp
    )
}

/// `data`의 UTF-8 바이트에 대한 HMAC-SHA256 값을 base64로 인코딩해 반환합니다.
///
/// # Errors
///
/// * `AppError::CryptoError` - MAC 초기화 실패. 설정 오류이므로 재시도 대상이 아닙니다.
pub fn sign(data: &str, secret: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| {
            log::error!("HMAC-SHA256 초기화 실패: {}", e);
            AppError::CryptoError(format!("Failed to initialize HMAC-SHA256: {}", e))
        })?;

    mac.update(data.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// 서명을 다시 계산해 상수 시간으로 비교합니다.
///
/// 입력 중 하나라도 없으면 계산하지 않고 `false`를 반환합니다.
pub fn verify(data: Option<&str>, signature: Option<&str>, secret: Option<&str>) -> bool {
    let (Some(data), Some(signature), Some(secret)) = (data, signature, secret) else {
        return false;
    };

    match sign(data, secret) {
        Ok(expected) => bool::from(expected.as_bytes().ct_eq(signature.as_bytes())),
        Err(e) => {
            log::error!("서명 검증 중 오류: {}", e);
            false
        }
    }
}

/// 게이트웨이가 전달하는 사용자 식별 정보에 대한 서명
///
/// 다운스트림의 [`GatewaySignatureGuard`](crate::middlewares::GatewaySignatureGuard)가
/// 같은 방식으로 검증합니다.
pub fn sign_forwarded_identity(
    user_id: Option<&str>,
    user_email: Option<&str>,
    timestamp_millis: i64,
    secret: &str,
) -> AppResult<String> {
    sign(&canonicalize(user_id, user_email, timestamp_millis), secret)
}
