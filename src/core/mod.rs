//! # Core Module
//!
//! 애플리케이션 구성요소의 조립을 담당합니다.
//!
//! 전역 서비스 레지스트리 대신 `main`에서 [`AppContext`]를 명시적으로 만들고,
//! `actix_web::web::Data`로 핸들러에, 생성자 인자로 미들웨어에 전달합니다.
//!
//! ```rust,ignore
//! let context = AppContext::from_redis(redis, queue_config, signature_config, timeout);
//!
//! HttpServer::new(move || {
//!     App::new().configure(|cfg| configure_all_routes(cfg, &context))
//! })
//! ```

pub mod context;

pub use context::AppContext;
