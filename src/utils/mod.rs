//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 로그 마스킹 유틸리티
//! - [`signature`] - HMAC-SHA256 서명 생성/검증

pub mod string_utils;
pub mod signature;
