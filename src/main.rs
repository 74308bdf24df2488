//! 잡헌터 알림 발송 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버와 이메일 큐 컨슈머를 함께 구동합니다.
//! Redis 연결을 설정하고 애플리케이션 컨텍스트를 명시적으로 조립합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use tokio::sync::watch;
use jobhunter_dispatch::caching::redis::RedisClient;
use jobhunter_dispatch::config::{
    EmailQueueConfig, GatewaySignatureConfig, RateLimitConfig, RedisConfig, ServerConfig, SmtpConfig,
};
use jobhunter_dispatch::core::AppContext;
use jobhunter_dispatch::repositories::streams::{RedisStreamBroker, RedisStreamSource};
use jobhunter_dispatch::routes::configure_all_routes;
use jobhunter_dispatch::services::notifications::{
    EmailQueueConsumer, LogMailer, Mailer, SmtpMailer, TemplateRenderer,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 잡헌터 알림 발송 서비스 시작중...");

    let queue_config = EmailQueueConfig::from_env();
    let (redis_client, consumer_redis) = initialize_data_stores().await?;

    let context = AppContext::from_redis(
        redis_client,
        queue_config.clone(),
        GatewaySignatureConfig::from_env(),
        RedisConfig::revocation_lookup_timeout(),
    );

    let consumer = build_email_consumer(consumer_redis, queue_config)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // 이메일 컨슈머 시작
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer_task = actix_web::rt::spawn(async move {
        if let Err(e) = consumer.run(shutdown_rx).await {
            error!("이메일 컨슈머 비정상 종료: {}", e);
        }
    });

    // HTTP 서버 시작
    let served = start_http_server(context).await;

    info!("🛑 HTTP 서버 종료, 이메일 컨슈머 정리중...");
    let _ = shutdown_tx.send(true);
    if let Err(e) = consumer_task.await {
        warn!("이메일 컨슈머 태스크 join 실패: {}", e);
    }

    served
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(context: AppContext) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(|cfg| configure_all_routes(cfg, &context))
    })
        .bind(&bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=jobhunter_dispatch::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// Redis 연결을 두 개 엽니다
///
/// 컨슈머의 `XREADGROUP BLOCK`이 연결을 점유하므로, 요청 경로(폐기 조회, 큐 제출)와
/// 컨슈머는 서로 다른 연결을 씁니다.
async fn initialize_data_stores() -> io::Result<(RedisClient, RedisClient)> {
    info!("📡 Redis 연결 중...");

    let to_io = |e: redis::RedisError| io::Error::new(io::ErrorKind::ConnectionRefused, format!("Redis 연결 실패: {}", e));

    let redis_client = RedisClient::new().await.map_err(to_io)?;
    let consumer_redis = RedisClient::new().await.map_err(to_io)?;

    Ok((redis_client, consumer_redis))
}

/// 이메일 큐 컨슈머 조립
///
/// `SMTP_HOST`가 설정되어 있으면 SMTP로 발송하고, 없으면 로그로만 남깁니다.
fn build_email_consumer(redis: RedisClient, config: EmailQueueConfig) -> io::Result<EmailQueueConsumer> {
    let to_io = |e: jobhunter_dispatch::errors::AppError| io::Error::other(e.to_string());

    let mailer: Arc<dyn Mailer> = match SmtpConfig::from_env() {
        Some(smtp) => Arc::new(SmtpMailer::new(&smtp).map_err(to_io)?),
        None => {
            warn!("⚠️ SMTP_HOST 미설정: 이메일을 실제로 발송하지 않고 로그로만 남깁니다");
            Arc::new(LogMailer)
        }
    };

    let renderer = Arc::new(TemplateRenderer::with_defaults().map_err(to_io)?);
    let source = Arc::new(RedisStreamSource::new(
        redis.clone(),
        config.topic.clone(),
        config.consumer_group.clone(),
        config.consumer_name.clone(),
        config.poll_block,
    ));
    let broker = Arc::new(RedisStreamBroker::new(redis, config.stream_max_len));

    Ok(EmailQueueConsumer::new(source, broker, renderer, mailer, config))
}

/// CORS 설정을 구성합니다
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")

        .allowed_methods(vec!["GET", "POST", "OPTIONS"])

        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-gateway-signature"),
            header::HeaderName::from_static("x-gateway-timestamp"),
            header::HeaderName::from_static("x-user-id"),
            header::HeaderName::from_static("x-user-email"),
        ])

        .supports_credentials()

        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
