pub mod config;
pub mod hooks;
pub mod host;
pub mod interface;
pub mod metadata;
pub mod tasklog;

// Re-export key types for convenience.
pub use config::{ConfigError, ParamRecord, ParamSpec, ParamType, ParamValue, normalize};
pub use hooks::{deregister_from_hook, register_to_hook};
pub use host::{EvidenceStorage, HostBridge, ProgressSink, TaskBinding};
pub use interface::{CaseworkModule, ModuleRuntime, PipelineType, run_pipeline};
pub use metadata::{
    BASE_MODULE_NAME, MetadataError, ModuleMetadata, ModuleType, PipelineArg, PipelineInfo,
};
pub use tasklog::ModuleLog;
