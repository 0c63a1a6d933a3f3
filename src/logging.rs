//! 진단 로그 설정
//!
//! 운영자가 보는 기록은 실행 로그(`runlog`)이고, 여기서는 oraboot 자체
//! 디버깅용 `tracing` 출력만 설정합니다. 실행 로그의 콘솔 출력과 섞이지
//! 않도록 stderr로 보냅니다.

use tracing_subscriber::{fmt, EnvFilter};

/// tracing subscriber 초기화
///
/// `RUST_LOG`가 있으면 그 값을, 없으면 `warn`(`--debug`이면 `debug`)을 씁니다.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // 이미 초기화됨 (테스트): 기존 subscriber 유지
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .try_init();
}
