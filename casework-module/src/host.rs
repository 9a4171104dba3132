use serde::{Deserialize, Serialize};

/// Receipt for a task bound into the host's queue. Queueing, retries, and
/// execution are host business; modules only hold the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBinding {
    pub task_name: String,
    pub asynchronous: bool,
}

/// The functions the host platform injects into a module at configure time.
///
/// This is the whole surface a module can call back into: hook wiring and
/// task binding. Hook names are host vocabulary; modules forward them
/// verbatim and never validate them locally.
pub trait HostBridge {
    /// Subscribe the module to a named hook. `manual_hook_name` labels the
    /// hook in the UI when it differs from the internal name.
    fn register_hook(
        &self,
        module_id: u64,
        hook_name: &str,
        manual_hook_name: Option<&str>,
        run_asynchronously: bool,
    ) -> bool;

    /// Drop an existing hook subscription.
    fn deregister_hook(&self, module_id: u64, hook_name: &str) -> bool;

    /// Bind a module task into the host's task queue.
    fn bind_task(&self, task_name: &str) -> Result<TaskBinding, String>;
}

/// Host-owned file store for case evidence. Modules receive a handle at
/// configure time and never manage the underlying storage themselves.
pub trait EvidenceStorage {
    fn store(&self, case_name: &str, file_name: &str, contents: &[u8]) -> std::io::Result<()>;

    fn exists(&self, case_name: &str, file_name: &str) -> bool;
}

/// Receives the module log each time a line lands, so the host can surface
/// progress of a long-running task while it runs.
pub trait ProgressSink {
    fn publish(&self, lines: &[String]);
}
