//! 토큰 폐기 게이트 미들웨어
//!
//! `Authorization: Bearer <token>` 헤더가 있는 요청마다 폐기 여부를 확인합니다.
//! 폐기된 토큰이면 401을 반환하고, 헤더가 없거나 Bearer 형식이 아니면 그대로 통과시킵니다
//! (토큰 유효성 검증은 이 미들웨어의 책임이 아닙니다).

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::revocation_inner::RevocationGateService;
use crate::services::auth::TokenRevocationCache;

/// 토큰 폐기 게이트
pub struct RevocationGate {
    cache: Arc<TokenRevocationCache>,
}

impl RevocationGate {
    pub fn new(cache: Arc<TokenRevocationCache>) -> Self {
        Self { cache }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for RevocationGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RevocationGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RevocationGateService {
            service: Rc::new(service),
            cache: self.cache.clone(),
        }))
    }
}
