//! 태그 서비스 백엔드
//!
//! 태그와 태그에 속한 neche를 관리하는 REST API입니다. 로컬 계정
//! (이메일/비밀번호)과 Google 로그인을 지원하며, 모든 리소스 라우트는
//! Bearer JWT와 역할 기반 접근 제어로 보호됩니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middlewares   │ ← Bearer 토큰 검증, 역할 확인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (생성자 주입)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← MongoDB / 메모리 저장소
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - 환경 변수 기반 설정
//! - [`core`] - 저장소/서비스 조립
//! - [`db`] - MongoDB 연결
//! - [`caching`] - Redis 클라이언트, 로그인 세션 저장소
//! - [`domain`] - 엔티티, DTO, 인증 모델
//! - [`repositories`] - 데이터 접근 계층
//! - [`services`] - 비즈니스 로직
//! - [`handlers`] - HTTP 요청 핸들러
//! - [`middlewares`] - 접근 제어 미들웨어
//! - [`routes`] - 라우트 구성
//! - [`errors`] - 에러 타입과 HTTP 응답 매핑

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
