//! # 문자열 유틸리티
//!
//! 입력 검증과 로그 마스킹에 사용하는 공통 문자열 함수들입니다.

use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  token  ", "token").unwrap(), "token");
/// assert!(validate_required_string("   ", "token").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 로그에 남길 수 있도록 앞부분 `visible`글자만 남기고 자릅니다.
///
/// 잘린 경우 뒤에 `...`를 붙입니다. 멀티바이트 문자 경계를 지킵니다.
///
/// ```rust,ignore
/// assert_eq!(truncate_for_log("blacklist_token:abcdef", 10), "blacklist_...");
/// ```
pub fn truncate_for_log(value: &str, visible: usize) -> String {
    match value.char_indices().nth(visible) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

/// 이메일 주소의 `@` 앞부분. `@`가 없으면 전체 문자열을 돌려줍니다.
pub fn email_local_part(email: &str) -> &str {
    email.split_once('@').map(|(local, _)| local).unwrap_or(email)
}
