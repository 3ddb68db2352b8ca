use std::process::ExitCode;

use clap::Parser;
use mmgr::{cli::Cli, commands};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("-- mmgr[ERR] - {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// 诊断日志写到 stderr，过滤级别取自 MMGR_LOG，默认 warn
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MMGR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
