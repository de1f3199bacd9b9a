//! Test logging on top of `tracing-subscriber`

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use nomina_core::logging::LOG_ENV_VAR;

/// Install a global subscriber that writes through the test harness, so
/// output only shows for failing tests. Filtered by `NOMINA_LOG`, warnings
/// otherwise. Safe to call from every test.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` under a scoped subscriber filtered by `directives` and return its
/// result together with everything it logged
pub fn capture_logs<R, F>(directives: &str, f: F) -> (R, String)
where
    F: FnOnce() -> R,
{
    let buffer = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(buffer.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
    (result, logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_installs_global_subscriber() {
        init_test_logging();
        init_test_logging();
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_capture_respects_filter() {
        let ((), logs) = capture_logs("warn", || {
            tracing::info!("quiet line");
            tracing::warn!(dataset = 3, "loud line");
        });
        assert!(logs.contains("loud line"));
        assert!(logs.contains("dataset=3"));
        assert!(!logs.contains("quiet line"));
    }
}
