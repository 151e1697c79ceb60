//! 태그 서비스 메인 애플리케이션
//!
//! 설정을 읽고 저장소와 서비스를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.
//! 필수 설정이 없거나 저장소 연결에 실패하면 서버를 띄우지 않고 종료합니다.

use std::process::ExitCode;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use tag_service_backend::config::{AppConfig, RateLimitConfig, ServerConfig};
use tag_service_backend::core::ServiceRegistry;
use tag_service_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> ExitCode {
    load_env_file();
    init_logging();

    info!("🚀 태그 서비스 시작중...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("설정 로드 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = match ServiceRegistry::build(&config).await {
        Ok(registry) => registry,
        Err(e) => {
            error!("서비스 초기화 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    match start_http_server(&config.server, &config.rate_limit, registry).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("서버 실행 실패: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 Rate Limiting, CORS, 로깅, 경로 정규화 순으로 적용됩니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    server: &ServerConfig,
    rate_limit: &RateLimitConfig,
    registry: ServiceRegistry,
) -> std::io::Result<()> {
    let bind_address = server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "rate limit values must be greater than zero",
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );

    HttpServer::new(move || {
        let registry = registry.clone();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| configure_all_routes(cfg, &registry))
    })
    .bind(&bind_address)?
    .workers(server.workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로거 초기화 전에 실행되므로 결과는 표준 에러로 출력합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("[{}] env 파일 로드 실패: {}", profile, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 프론트엔드 개발 서버와의 통신을 위한 CORS 설정
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}
