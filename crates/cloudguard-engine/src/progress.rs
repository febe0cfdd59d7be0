use tracing::{error, info};

/// Receives lifecycle events for one scan invocation.
///
/// Terminal spinner implementations live outside the engine; the engine
/// only emits `start`, `succeed`, and `fail`.
pub trait ProgressReporter {
    fn start(&self, label: &str);
    fn succeed(&self);
    fn fail(&self, message: &str);
}

/// Progress reporter that writes through the tracing subscriber. Suitable
/// for non-interactive runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn start(&self, label: &str) {
        info!(scan = label, "scan started");
    }

    fn succeed(&self) {
        info!("scan succeeded");
    }

    fn fail(&self, message: &str) {
        error!(error = message, "scan failed");
    }
}
