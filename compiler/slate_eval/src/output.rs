//! Output sinks for `SPEAK`.
//!
//! Output goes to an explicit sink handed to the interpreter:
//! - Stdout: the terminal (default)
//! - Buffer: captured for tests and embedding
//! - Silent: discarded (structure checks)
//!
//! `SPEAK` writes fragments without adding line breaks.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Sink that writes to stdout, flushing after each fragment.
#[derive(Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn write(&self, fragment: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout has nowhere to report to.
        let _ = stdout.write_all(fragment.as_bytes());
        let _ = stdout.flush();
    }
}

/// Sink that captures everything written to it.
#[derive(Default)]
pub struct BufferSink {
    buffer: Mutex<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, fragment: &str) {
        self.buffer.lock().push_str(fragment);
    }

    /// Get all captured output.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Output sink, dispatched by enum.
pub enum OutputSink {
    Stdout(StdoutSink),
    Buffer(BufferSink),
    Silent,
}

impl OutputSink {
    /// Write one fragment as-is.
    pub fn write(&self, fragment: &str) {
        match self {
            Self::Stdout(sink) => sink.write(fragment),
            Self::Buffer(sink) => sink.write(fragment),
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for sinks that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(sink) => sink.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Clear captured output. No-op for sinks that do not capture.
    pub fn clear(&self) {
        if let Self::Buffer(sink) = self {
            sink.clear();
        }
    }
}

/// Output sink shared between an interpreter and its caller.
pub type SharedOutput = Arc<OutputSink>;

pub fn stdout_sink() -> SharedOutput {
    Arc::new(OutputSink::Stdout(StdoutSink))
}

pub fn buffer_sink() -> SharedOutput {
    Arc::new(OutputSink::Buffer(BufferSink::new()))
}

pub fn silent_sink() -> SharedOutput {
    Arc::new(OutputSink::Silent)
}
