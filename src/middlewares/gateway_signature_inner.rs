//! GatewaySignatureGuard 검증 로직의 핵심적인 기능
use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::config::GatewaySignatureConfig;
use crate::errors::AppError;
use crate::middlewares::gateway_signature::{
    HEADER_SIGNATURE, HEADER_TIMESTAMP, HEADER_USER_EMAIL, HEADER_USER_ID,
};
use crate::utils::signature::{canonicalize, verify};

/// 실제 서명 검증을 수행하는 서비스
pub struct GatewaySignatureService<S> {
    pub service: Rc<S>,
    pub config: Arc<GatewaySignatureConfig>,
}

impl<S, B> Service<ServiceRequest> for GatewaySignatureService<S>
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
        let config = self.config.clone();

        Box::pin(async move {
            if config.enabled && !config.is_exempt(req.path()) {
                if let Err(reason) = check_signature(&req, &config, chrono::Utc::now().timestamp_millis()) {
                    log::warn!("게이트웨이 서명 검증 실패: {} ({})", reason, req.path());
                    let response = AppError::AuthorizationError(reason.to_string())
                        .error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn header<'a>(req: &'a ServiceRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|h| h.to_str().ok())
}

/// 실패 시 클라이언트에 돌려줄 사유를 반환합니다.
fn check_signature(
    req: &ServiceRequest,
    config: &GatewaySignatureConfig,
    now_millis: i64,
) -> Result<(), &'static str> {
    let (Some(signature), Some(timestamp)) = (header(req, HEADER_SIGNATURE), header(req, HEADER_TIMESTAMP)) else {
        return Err("Direct access not allowed. Request must go through API Gateway.");
    };

    let timestamp: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| "Invalid gateway timestamp")?;

    let tolerance_millis = config.timestamp_tolerance_secs.saturating_mul(1000);
    if now_millis.saturating_sub(timestamp).abs() > tolerance_millis {
        return Err("Request timestamp expired");
    }

    let data = canonicalize(header(req, HEADER_USER_ID), header(req, HEADER_USER_EMAIL), timestamp);
    if !verify(Some(&data), Some(signature), Some(&config.secret)) {
        return Err("Invalid gateway signature");
    }

    Ok(())
}
