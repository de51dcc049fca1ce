use crate::error::{DocTextError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ctrl+C flag shared between the signal handler and the extraction loop.
#[derive(Clone)]
pub struct GracefulShutdown {
    running: Arc<AtomicBool>,
}

impl GracefulShutdown {
    /// Register the process-wide Ctrl+C handler. The first press lets the
    /// current document finish; a second press exits with 130.
    pub fn new() -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let handler_flag = running.clone();
        let interrupted_once = AtomicBool::new(false);

        ctrlc::set_handler(move || {
            handler_flag.store(false, Ordering::SeqCst);

            if !interrupted_once.swap(true, Ordering::SeqCst) {
                eprintln!("\nStopping after the current document... (press Ctrl+C again to force exit)");
            } else {
                eprintln!("\nForce stopping...");
                std::process::exit(130);
            }
        })
        .map_err(|e| DocTextError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self { running })
    }

    /// Flag without a signal handler, for library callers and tests.
    pub fn new_for_test() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Polled by the extraction loop before each file; a document that is
    /// already being written is always finished first.
    pub fn check_shutdown(&self) -> Result<()> {
        if !self.is_running() {
            return Err(DocTextError::Cancelled);
        }
        Ok(())
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
