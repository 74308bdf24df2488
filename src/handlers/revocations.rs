//! 토큰 폐기 핸들러
//!
//! 로그아웃 흐름이 토큰의 남은 수명을 계산해 호출합니다.
//! 폐기된 토큰은 이후 [`RevocationGate`](crate::middlewares::RevocationGate)에서 401로 거부됩니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::AppContext;
use crate::domain::requests::RevokeTokenRequest;
use crate::domain::ApiResponse;
use crate::errors::AppError;

/// `POST /api/v1/auth/revocations`
#[post("/revocations")]
pub async fn revoke_token(
    context: web::Data<AppContext>,
    payload: web::Json<RevokeTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    request.validate()?;

    context.revocation_cache.revoke(&request.token, request.ttl_seconds).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        success: true,
        data: None,
        message: Some("토큰이 폐기되었습니다".to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::json;

    use super::*;
    use crate::core::context::testing::in_memory;
    use crate::repositories::streams::memory::InMemoryBroker;
    use crate::repositories::tokens::revocation_store::memory::{InMemoryRevocationStore, StoreBehavior};
    use crate::services::auth::blacklist_key;

    #[actix_web::test]
    async fn test_revoke_token_stores_blacklist_entry() {
        let (context, store) = in_memory(InMemoryRevocationStore::healthy(), Arc::new(InMemoryBroker::new()), false);
        let app = test::init_service(
            App::new().app_data(web::Data::new(context.clone())).service(revoke_token)
        ).await;

        let req = test::TestRequest::post()
            .uri("/revocations")
            .set_json(json!({ "token": "eyJ.revoked.token", "ttlSeconds": 900 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(store.ttl_of(&blacklist_key("eyJ.revoked.token")), Some(900));
        assert!(context.revocation_cache.is_revoked("eyJ.revoked.token").await);
    }

    #[actix_web::test]
    async fn test_zero_ttl_is_bad_request() {
        let (context, _) = in_memory(InMemoryRevocationStore::healthy(), Arc::new(InMemoryBroker::new()), false);
        let app = test::init_service(
            App::new().app_data(web::Data::new(context)).service(revoke_token)
        ).await;

        let req = test::TestRequest::post()
            .uri("/revocations")
            .set_json(json!({ "token": "abc", "ttlSeconds": 0 }))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_store_failure_is_server_error() {
        let (context, _) = in_memory(
            InMemoryRevocationStore::new(StoreBehavior::Failing),
            Arc::new(InMemoryBroker::new()),
            false,
        );
        let app = test::init_service(
            App::new().app_data(web::Data::new(context)).service(revoke_token)
        ).await;

        let req = test::TestRequest::post()
            .uri("/revocations")
            .set_json(json!({ "token": "abc", "ttlSeconds": 60 }))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
