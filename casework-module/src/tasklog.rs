use crate::host::ProgressSink;

/// Ordered log buffer owned one-to-one by a module runtime.
///
/// The platform's task-execution model guarantees a single logical owner per
/// instance, so appends are plain synchronous writes with no locking. When a
/// sink is attached, every append republishes the whole buffer so the host
/// can show live progress for a long-running task.
#[derive(Default)]
pub struct ModuleLog {
    lines: Vec<String>,
    sink: Option<Box<dyn ProgressSink>>,
}

impl ModuleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_sink(&mut self, sink: Box<dyn ProgressSink>) {
        self.sink = Some(sink);
    }

    fn append(&mut self, level: &str, message: &str) {
        let line = format!("{} :: {level} :: {message}", chrono::Utc::now().to_rfc3339());
        self.lines.push(line);
        if let Some(sink) = &self.sink {
            sink.publish(&self.lines);
        }
    }

    pub fn info(&mut self, message: &str) {
        self.append("INFO", message);
    }

    pub fn warning(&mut self, message: &str) {
        self.append("WARNING", message);
    }

    pub fn error(&mut self, message: &str) {
        self.append("ERROR", message);
    }

    pub fn critical(&mut self, message: &str) {
        self.append("CRITICAL", message);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drain the buffer, e.g. to attach the lines to an outgoing status.
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

impl std::fmt::Debug for ModuleLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLog")
            .field("lines", &self.lines.len())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
