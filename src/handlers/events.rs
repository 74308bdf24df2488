//! 도메인 이벤트 수신 핸들러
//!
//! 채용 공고/지원서 서비스가 발생시킨 이벤트를 받아 발행자에게 넘깁니다.
//! 지원서 이벤트는 발행과 함께 지원자 알림 메일이 큐에 들어갑니다.
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/events \
//!   -H "Content-Type: application/json" \
//!   -d '{"eventType":"JobClosed","payload":{"jobId":7,"jobName":"Backend Engineer","companyId":3}}'
//! ```

use actix_web::{post, web, HttpResponse};
use serde_json::json;

use crate::core::AppContext;
use crate::domain::{ApiResponse, DomainEvent, DomainEventKind};
use crate::errors::AppError;

/// 이벤트 발행
///
/// 이벤트 ID와 발생 시각은 서버에서 부여합니다.
#[post("")]
pub async fn publish_event(
    context: web::Data<AppContext>,
    payload: web::Json<DomainEventKind>,
) -> Result<HttpResponse, AppError> {
    let event = DomainEvent::new(payload.into_inner());

    context.event_publisher.publish(&event).await?;

    Ok(HttpResponse::Accepted().json(ApiResponse::success(json!({
        "eventId": event.event_id(),
        "eventType": event.event_type(),
    }))))
}
