//! 이메일 알림 큐 핸들러
//!
//! | 메서드 | 경로 | 설명 | 응답 |
//! |--------|------|------|------|
//! | `POST` | `/api/v1/notifications/emails` | 이메일 메시지를 큐에 넣음 | 202 Accepted |
//!
//! 게이트웨이 서명 검증을 통과한 요청만 도달합니다.
//! 브로커 확인을 기다리지 않고 응답하며, 실패한 전송은 프로듀서가 재시도합니다.

use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::AppContext;
use crate::domain::{ApiResponse, EmailMessage};
use crate::errors::AppError;
use crate::utils::string_utils::truncate_for_log;

/// 이메일 메시지 큐 등록
///
/// # Errors
///
/// * `400` - 수신자 형식, 제목, 템플릿 이름 검증 실패
/// * `503` - 브로커가 제출을 거부함
#[post("/emails")]
pub async fn enqueue_email(
    context: web::Data<AppContext>,
    payload: web::Json<EmailMessage>,
) -> Result<HttpResponse, AppError> {
    let message = payload.into_inner();
    message.validate()?;

    let pending = context.email_producer.enqueue(&message)?;
    log::debug!(
        "이메일 큐 등록 요청 처리: to={}, topic={}",
        truncate_for_log(&message.to, 3),
        pending.topic()
    );

    Ok(HttpResponse::Accepted().json(ApiResponse::success_with_message(
        json!({ "topic": pending.topic(), "template": message.template_name }),
        "이메일이 발송 대기열에 등록되었습니다",
    )))
}
