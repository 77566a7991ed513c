// Logging setup for the stickminton binary
// Debug records go to a file when enabled via --debug, otherwise info and up go to stderr

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::SystemTime;

use tracing::Level;

pub const LOG_FILE_PATH: &str = "/tmp/stickminton-debug.log";

/// Install the global tracing subscriber
///
/// # Arguments
/// * `enabled` - Whether debug logging should go to the log file (controlled by --debug flag)
///
/// # Behavior
/// - If enabled=false: INFO and above are written to stderr
/// - If enabled=true: Creates/truncates the log file, writes a header and
///   records everything at DEBUG and above there
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE_PATH)?;

    writeln!(file, "=== Stickminton Debug Log ===")?;
    writeln!(file, "Session started: {:?}", SystemTime::now())?;
    writeln!(file, "To monitor: tail -f {}", LOG_FILE_PATH)?;
    writeln!(file, "========================================\n")?;

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
