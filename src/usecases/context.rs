use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::config::AppConfig;

/// Long-lived process state shared by both console roles.
pub struct AppContext {
    pub config: AppConfig,
    pub runtime: Runtime,
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(config: AppConfig, runtime: Runtime, log_guard: Option<WorkerGuard>) -> Self {
        Self {
            config,
            runtime,
            _log_guard: log_guard,
        }
    }
}
