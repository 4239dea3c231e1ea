use std::path::Path;

use tokio::runtime::{Builder, Runtime};

use crate::{
    infra::{
        self,
        config::{self, AppConfig},
        error::AppError,
    },
    usecases::context::AppContext,
};

const NETWORK_WORKER_THREADS: usize = 2;

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = load_config(config_path)?;
    let log_guard = infra::logging::init(&config.logging)?;
    let runtime = build_runtime()?;

    Ok(AppContext::new(config, runtime, log_guard))
}

fn load_config(config_path: Option<&Path>) -> Result<AppConfig, AppError> {
    config::load(config_path)
}

/// Socket tasks run here; the console thread only blocks on connect and bind.
fn build_runtime() -> Result<Runtime, AppError> {
    Builder::new_multi_thread()
        .worker_threads(NETWORK_WORKER_THREADS)
        .thread_name("chatcon-net")
        .enable_io()
        .enable_time()
        .build()
        .map_err(AppError::RuntimeBuild)
}
