//! RevocationGate 확인 로직의 핵심적인 기능
use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::errors::AppError;
use crate::services::auth::TokenRevocationCache;

pub const REVOKED_TOKEN_MESSAGE: &str = "Token has been revoked. Please login again.";

/// 실제 폐기 확인을 수행하는 서비스
pub struct RevocationGateService<S> {
    pub service: Rc<S>,
    pub cache: Arc<TokenRevocationCache>,
}

impl<S, B> Service<ServiceRequest> for RevocationGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let cache = self.cache.clone();

        Box::pin(async move {
            if let Some(token) = extract_bearer_token(&req) {
                if cache.is_revoked(&token).await {
                    let response = AppError::AuthenticationError(REVOKED_TOKEN_MESSAGE.to_string())
                        .error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 추출
///
/// 접두사 뒤의 값을 그대로 조회 키로 씁니다. 공백을 다듬지 않습니다.
pub(crate) fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
