//! Asynchronous logging channel for Vigil
//!
//! [`setup`] starts a dedicated worker thread that owns log transport for
//! the rest of the process. Producers hand each formatted record into an
//! mpsc channel and return immediately; only the worker touches stderr, so
//! log emission never blocks on a slow terminal.

use std::io::{self, Write};
use std::sync::mpsc::{self, Sender};
use std::thread;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Name of the background worker thread
const LOG_THREAD_NAME: &str = "vigil-log";

/// Hands out per-event writers that feed the worker channel.
struct LogChannel {
    tx: Sender<Vec<u8>>,
}

impl<'a> MakeWriter<'a> for LogChannel {
    type Writer = RecordWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RecordWriter {
            tx: self.tx.clone(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one formatted record, sending it to the worker on flush or drop.
struct RecordWriter {
    tx: Sender<Vec<u8>>,
    buf: Vec<u8>,
}

impl Write for RecordWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            // If the worker is gone the process is exiting; drop the record.
            let _ = self.tx.send(std::mem::take(&mut self.buf));
        }
        Ok(())
    }
}

impl Drop for RecordWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Start the logging channel and install the global subscriber.
///
/// Must run before any subsystem that logs and after the spawn policy is
/// pinned. The worker thread lives for the remainder of the process; there
/// is no teardown.
pub fn setup() {
    let (tx, rx) = mpsc::channel::<Vec<u8>>();

    thread::Builder::new()
        .name(LOG_THREAD_NAME.to_string())
        .spawn(move || {
            for record in rx {
                let _ = io::stderr().write_all(&record);
            }
        })
        .expect("failed to start logging thread");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(LogChannel { tx })
        .init();

    tracing::debug!("logging channel started");
}
