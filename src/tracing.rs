use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Optional copy of every log line, set from `--log-file`.
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

fn log_file() -> MutexGuard<'static, Option<File>> {
    LOG_FILE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Formatted records go to stderr first, then to the log file if one is open.
struct StderrAndFile;

impl Write for StderrAndFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = log_file().as_mut() {
            // A failing log file must not take stderr logging down with it.
            let _ = file.write_all(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = log_file().as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

/// Install the global subscriber and bridge `log` records into it.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Repeated calls are no-ops.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(|| StderrAndFile)
        .try_init();
}

/// Append log output to `path` from now on; `None` closes the current file.
pub fn set_log_file(path: Option<&Path>) -> io::Result<()> {
    let file = path.map(open_append).transpose()?;
    *log_file() = file;
    Ok(())
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
