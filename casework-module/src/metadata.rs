use semver::Version;
use serde::{Deserialize, Serialize};

use crate::config::ParamSpec;

/// Placeholder name carried by the contract itself. A module still reporting
/// this name was never renamed by its author and must not go in service.
pub const BASE_MODULE_NAME: &str = "CaseworkBaseModule";

/// Kind of module, as exposed to the host.
///
/// Pipeline modules drive a user-facing ingestion workflow; processor
/// modules only react to hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    Pipeline,
    Processor,
}

/// A user-facing pipeline field, offered in the host UI when a user drives
/// the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArg {
    pub name: String,
    pub required: bool,
}

impl PipelineArg {
    pub fn required(name: &str) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    pub fn optional(name: &str) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Description of the ingestion pipeline a module provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub internal_name: String,
    pub human_name: String,
    #[serde(default)]
    pub args: Vec<PipelineArg>,
    pub update_support: bool,
    pub import_support: bool,
}

impl PipelineInfo {
    /// The empty record processor modules declare.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Static descriptor a module declares about itself. The host reads this
/// once at load time; nothing in it changes while the module is in service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub name: String,
    pub description: String,
    /// Checked host-side against the interface versions it can drive.
    pub interface_version: Version,
    pub module_version: Version,
    pub module_type: ModuleType,
    pub pipeline_support: bool,
    pub pipeline_info: PipelineInfo,
    /// Parameters proposed to administrators in the host UI.
    #[serde(default)]
    pub configuration: Vec<ParamSpec>,
}

/// Why a declared module cannot be put in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    #[error("module cannot keep the placeholder name {BASE_MODULE_NAME}")]
    PlaceholderName,

    #[error("processor modules cannot declare pipeline support")]
    ProcessorWithPipeline,

    #[error("pipeline update support requires import support")]
    UpdateWithoutImport,
}

impl ModuleMetadata {
    /// Check the declaration invariants. A violation keeps the owning
    /// runtime non-ready; it never aborts construction.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.name == BASE_MODULE_NAME {
            return Err(MetadataError::PlaceholderName);
        }
        if self.module_type == ModuleType::Processor && self.pipeline_support {
            return Err(MetadataError::ProcessorWithPipeline);
        }
        if self.pipeline_support
            && self.pipeline_info.update_support
            && !self.pipeline_info.import_support
        {
            return Err(MetadataError::UpdateWithoutImport);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline_metadata(name: &str) -> ModuleMetadata {
        ModuleMetadata {
            name: name.into(),
            description: format!("{name} module"),
            interface_version: Version::new(1, 1, 0),
            module_version: Version::new(0, 1, 0),
            module_type: ModuleType::Pipeline,
            pipeline_support: true,
            pipeline_info: PipelineInfo {
                internal_name: "evidence_import".into(),
                human_name: "Evidence import".into(),
                args: vec![
                    PipelineArg::required("hostname"),
                    PipelineArg::optional("timezone"),
                ],
                update_support: true,
                import_support: true,
            },
            configuration: Vec::new(),
        }
    }

    #[test]
    fn test_valid_pipeline_module() {
        assert_eq!(pipeline_metadata("evidence-sync").validate(), Ok(()));
    }

    #[test]
    fn test_placeholder_name_rejected() {
        let metadata = pipeline_metadata(BASE_MODULE_NAME);
        assert_eq!(metadata.validate(), Err(MetadataError::PlaceholderName));
    }

    #[test]
    fn test_processor_cannot_provide_pipeline() {
        let mut metadata = pipeline_metadata("triage-processor");
        metadata.module_type = ModuleType::Processor;
        assert_eq!(
            metadata.validate(),
            Err(MetadataError::ProcessorWithPipeline)
        );

        metadata.pipeline_support = false;
        metadata.pipeline_info = PipelineInfo::none();
        assert_eq!(metadata.validate(), Ok(()));
    }

    #[test]
    fn test_update_requires_import() {
        let mut metadata = pipeline_metadata("evidence-sync");
        metadata.pipeline_info.import_support = false;
        assert_eq!(metadata.validate(), Err(MetadataError::UpdateWithoutImport));

        // Update off, import off is a legal (import-less) declaration only
        // when updates are not promised either.
        metadata.pipeline_info.update_support = false;
        assert_eq!(metadata.validate(), Ok(()));
    }

    #[test]
    fn test_module_type_serialization() {
        let json = serde_json::to_string(&ModuleType::Processor).unwrap();
        assert_eq!(json, "\"processor\"");

        let parsed: ModuleType = serde_json::from_str("\"pipeline\"").unwrap();
        assert_eq!(parsed, ModuleType::Pipeline);
    }

    #[test]
    fn test_metadata_serialization_roundtrip() {
        let metadata = pipeline_metadata("evidence-sync");
        let json = serde_json::to_string(&metadata).unwrap();
        let parsed: ModuleMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "evidence-sync");
        assert_eq!(parsed.interface_version, Version::new(1, 1, 0));
        assert_eq!(parsed.pipeline_info.args.len(), 2);
        assert!(parsed.pipeline_info.args[0].required);
    }
}
