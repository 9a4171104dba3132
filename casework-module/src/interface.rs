use std::collections::HashMap;
use std::path::Path;

use casework_status::ModuleStatus;
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::config::{self, ConfigError, ParamRecord, ParamSpec, ParamValue};
use crate::host::{EvidenceStorage, HostBridge};
use crate::metadata::{ModuleMetadata, ModuleType, PipelineInfo};
use crate::tasklog::ModuleLog;

/// Which pipeline flow the host is driving. The wire names are part of the
/// host contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineType {
    #[serde(rename = "pipeline_import")]
    Import,
    #[serde(rename = "pipeline_update")]
    Update,
}

impl PipelineType {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineType::Import => "pipeline_import",
            PipelineType::Update => "pipeline_update",
        }
    }
}

/// Per-instance state behind every module: the declared metadata, the ready
/// flag, and whatever the host wired in at configure time.
pub struct ModuleRuntime {
    metadata: ModuleMetadata,
    ready: bool,
    bridge: Option<Box<dyn HostBridge>>,
    evidence: Option<Box<dyn EvidenceStorage>>,
    records: Vec<ParamRecord>,
    log: ModuleLog,
}

impl ModuleRuntime {
    /// Build the runtime and check the declaration invariants. A violation
    /// is recorded as critical and leaves the runtime non-ready;
    /// construction itself always succeeds.
    pub fn new(metadata: ModuleMetadata) -> Self {
        let mut log = ModuleLog::new();
        let ready = match metadata.validate() {
            Ok(()) => {
                info!(module = %metadata.name, "module initiated");
                true
            }
            Err(err) => {
                error!(module = %metadata.name, %err, "module declaration rejected");
                log.critical(&err.to_string());
                false
            }
        };
        Self {
            metadata,
            ready,
            bridge: None,
            evidence: None,
            records: Vec::new(),
            log,
        }
    }

    /// Host-side wiring. Module authors neither call nor override this; the
    /// host invokes it right after loading the module.
    pub fn internal_configure(
        &mut self,
        bridge: Option<Box<dyn HostBridge>>,
        evidence: Option<Box<dyn EvidenceStorage>>,
        records: Vec<ParamRecord>,
    ) -> ModuleStatus {
        self.bridge = bridge;
        self.evidence = evidence;
        self.records = records;
        ModuleStatus::success()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    pub fn module_name(&self) -> &str {
        &self.metadata.name
    }

    pub fn module_description(&self) -> &str {
        &self.metadata.description
    }

    pub fn module_version(&self) -> &Version {
        &self.metadata.module_version
    }

    pub fn interface_version(&self) -> &Version {
        &self.metadata.interface_version
    }

    pub fn module_type(&self) -> ModuleType {
        self.metadata.module_type
    }

    pub fn is_providing_pipeline(&self) -> bool {
        self.metadata.pipeline_support
    }

    pub fn pipeline_info(&self) -> &PipelineInfo {
        &self.metadata.pipeline_info
    }

    /// The schema as declared, for the host to render its admin form.
    pub fn init_configuration(&self) -> &[ParamSpec] {
        &self.metadata.configuration
    }

    pub fn host_bridge(&self) -> Option<&dyn HostBridge> {
        self.bridge.as_deref()
    }

    pub fn log(&mut self) -> &mut ModuleLog {
        &mut self.log
    }

    pub fn log_lines(&self) -> &[String] {
        self.log.lines()
    }

    /// Admin-set parameter records as stored host-side. Not-ready when the
    /// host never handed any over.
    pub fn configuration(&self) -> ModuleStatus {
        if self.records.is_empty() {
            return ModuleStatus::not_ready().with_message("Module configuration not retrieved");
        }
        match serde_json::to_value(&self.records) {
            Ok(data) => ModuleStatus::success().with_data(data),
            Err(err) => ModuleStatus::error().with_message(format!("Configuration malformed: {err}")),
        }
    }

    /// Typed `name -> value` view of the configuration. Falls back to the
    /// declared defaults when the host supplied nothing.
    pub fn resolved_configuration(&self) -> Result<HashMap<String, ParamValue>, ConfigError> {
        if self.records.is_empty() {
            let fallback: Vec<ParamRecord> = self
                .metadata
                .configuration
                .iter()
                .cloned()
                .map(ParamRecord::from_spec)
                .collect();
            return config::normalize(&fallback);
        }
        config::normalize(&self.records)
    }

    /// Same view shaped for the host boundary: the map travels as a status
    /// payload, and shaping failures come back as a malformed-configuration
    /// failure status instead of an error.
    pub fn configuration_dict(&self) -> ModuleStatus {
        match self.resolved_configuration() {
            Ok(resolved) => match serde_json::to_value(&resolved) {
                Ok(data) => ModuleStatus::success().with_data(data),
                Err(err) => {
                    ModuleStatus::error().with_message(format!("Configuration malformed: {err}"))
                }
            },
            Err(err) => {
                ModuleStatus::error().with_message(format!("Configuration malformed: {err}"))
            }
        }
    }

    /// Evidence storage handle the host wired in.
    pub fn evidence_storage(&self) -> Result<&dyn EvidenceStorage, ModuleStatus> {
        self.evidence.as_deref().ok_or_else(|| {
            ModuleStatus::not_ready().with_message("Evidence storage not initialized")
        })
    }

    /// Bind a module task into the host's queue; the receipt travels back as
    /// the status payload.
    pub fn wrap_task(&self, task_name: &str) -> ModuleStatus {
        let Some(bridge) = &self.bridge else {
            return ModuleStatus::unknown().with_message("Task binding unavailable");
        };
        match bridge.bind_task(task_name) {
            Ok(binding) => match serde_json::to_value(&binding) {
                Ok(data) => ModuleStatus::no_error().with_data(data),
                Err(err) => ModuleStatus::unknown().with_message(err.to_string()),
            },
            Err(err) => ModuleStatus::unknown().with_message(err),
        }
    }
}

impl std::fmt::Debug for ModuleRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRuntime")
            .field("module", &self.metadata.name)
            .field("ready", &self.ready)
            .field("configured", &!self.records.is_empty())
            .finish()
    }
}

/// Contract every Casework module implements.
///
/// Metadata accessors and configuration plumbing come for free via the
/// runtime; the extension points all default to the fixed not-implemented
/// failure, so a module only overrides the flows it actually supports and
/// the host can probe the rest safely.
pub trait CaseworkModule {
    fn runtime(&self) -> &ModuleRuntime;

    fn runtime_mut(&mut self) -> &mut ModuleRuntime;

    fn is_ready(&self) -> bool {
        self.runtime().is_ready()
    }

    fn module_name(&self) -> &str {
        self.runtime().module_name()
    }

    fn module_description(&self) -> &str {
        self.runtime().module_description()
    }

    fn module_version(&self) -> &Version {
        self.runtime().module_version()
    }

    fn interface_version(&self) -> &Version {
        self.runtime().interface_version()
    }

    fn module_type(&self) -> ModuleType {
        self.runtime().module_type()
    }

    fn is_providing_pipeline(&self) -> bool {
        self.runtime().is_providing_pipeline()
    }

    fn pipeline_info(&self) -> &PipelineInfo {
        self.runtime().pipeline_info()
    }

    fn init_configuration(&self) -> &[ParamSpec] {
        self.runtime().init_configuration()
    }

    fn configuration(&self) -> ModuleStatus {
        self.runtime().configuration()
    }

    fn configuration_dict(&self) -> ModuleStatus {
        self.runtime().configuration_dict()
    }

    /// Save files a user uploaded into the module's pipeline. The module
    /// owns the write, and with it the safety of the destination path.
    fn pipeline_files_upload(
        &mut self,
        _base_path: &Path,
        _file_name: &str,
        _case_customer: &str,
        _case_name: &str,
        _is_update: bool,
    ) -> ModuleStatus {
        ModuleStatus::not_implemented()
    }

    /// Entry point for import and update runs.
    fn pipeline_handler(&mut self, _pipeline_type: PipelineType, _pipeline_data: Value) -> ModuleStatus {
        ModuleStatus::not_implemented()
    }

    /// One-time initialization when the host starts up.
    fn pipeline_init(&mut self, _app_info: Value) -> ModuleStatus {
        ModuleStatus::not_implemented()
    }

    /// Called for every hook the module registered to.
    fn hooks_handler(
        &mut self,
        _hook_name: &str,
        _hook_ui_name: Option<&str>,
        _data: Value,
    ) -> ModuleStatus {
        ModuleStatus::not_implemented()
    }

    /// Computers known to the module, optionally filtered.
    fn computers_list(&self, _filter: Option<&str>) -> ModuleStatus {
        ModuleStatus::not_implemented()
    }

    /// Accounts known to the module, optionally filtered.
    fn accounts_list(&self, _filter: Option<&str>) -> ModuleStatus {
        ModuleStatus::not_implemented()
    }
}

/// Drive one pipeline run. This is what the host's task queue ends up
/// calling; a non-ready module is refused before its handler runs.
pub fn run_pipeline<M: CaseworkModule + ?Sized>(
    module: &mut M,
    pipeline_type: PipelineType,
    pipeline_data: Value,
) -> ModuleStatus {
    if !module.is_ready() {
        return ModuleStatus::not_ready().with_message("Module not ready");
    }
    module.pipeline_handler(pipeline_type, pipeline_data)
}
