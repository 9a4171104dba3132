use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::code::StatusCode;

/// Standardized result object returned by every module operation.
///
/// Carries the numeric code, a human-readable message, an optional opaque
/// payload, and the log lines accumulated while the operation ran. The host
/// only ever inspects this shape, never module-specific types, so errors
/// cross the module/host boundary as values rather than panics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleStatus {
    code: StatusCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    logs: Vec<String>,
}

impl ModuleStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            logs: Vec::new(),
        }
    }

    fn fixed(code: StatusCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn no_error() -> Self {
        Self::fixed(StatusCode::NO_ERROR)
    }

    pub fn success() -> Self {
        Self::fixed(StatusCode::SUCCESS)
    }

    pub fn configured() -> Self {
        Self::fixed(StatusCode::CONFIGURED)
    }

    pub fn not_implemented() -> Self {
        Self::fixed(StatusCode::NOT_IMPLEMENTED)
    }

    pub fn unexpected_result() -> Self {
        Self::fixed(StatusCode::UNEXPECTED_RESULT)
    }

    pub fn file_not_found() -> Self {
        Self::fixed(StatusCode::FILE_NOT_FOUND)
    }

    pub fn not_ready() -> Self {
        Self::fixed(StatusCode::NOT_READY)
    }

    pub fn not_initialized() -> Self {
        Self::fixed(StatusCode::NOT_INITIALIZED)
    }

    pub fn critical() -> Self {
        Self::fixed(StatusCode::CRITICAL)
    }

    pub fn error() -> Self {
        Self::fixed(StatusCode::ERROR)
    }

    pub fn unknown() -> Self {
        Self::fixed(StatusCode::UNKNOWN)
    }

    pub fn with_code(mut self, code: StatusCode) -> Self {
        self.code = code;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_logs(mut self, logs: Vec<String>) -> Self {
        self.logs = logs;
        self
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    pub fn is_failure(&self) -> bool {
        self.code.is_failure()
    }
}

/// Combine two statuses into one. Failure wins: if the second status failed
/// its code replaces the first's, otherwise the first's code stands (failing
/// or not). Messages are concatenated, payloads with both sides present
/// become a two-element array, and log lines are appended in order.
pub fn merge(first: ModuleStatus, second: ModuleStatus) -> ModuleStatus {
    let code = if second.code.is_failure() {
        second.code
    } else {
        first.code
    };
    let message = format!("{} - {}", first.message, second.message);
    let data = match (first.data, second.data) {
        (Some(a), Some(b)) => Some(Value::Array(vec![a, b])),
        (a, b) => a.or(b),
    };
    let mut logs = first.logs;
    logs.extend(second.logs);

    ModuleStatus {
        code,
        message,
        data,
        logs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_constructors_carry_canonical_messages() {
        let status = ModuleStatus::not_implemented();
        assert_eq!(status.code(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(status.message(), "Interface function not implemented");
        assert!(status.is_failure());

        let status = ModuleStatus::success();
        assert_eq!(status.message(), "Success");
        assert!(status.is_success());
    }

    #[test]
    fn test_builder_updates_are_selective() {
        let status = ModuleStatus::success()
            .with_message("imported 4 files")
            .with_data(json!({"count": 4}));

        assert_eq!(status.code(), StatusCode::SUCCESS);
        assert_eq!(status.message(), "imported 4 files");
        assert_eq!(status.data(), Some(&json!({"count": 4})));
        assert!(status.logs().is_empty());
    }

    #[test]
    fn test_classification_matches_code() {
        let status = ModuleStatus::success().with_code(StatusCode::CRITICAL);
        assert!(status.is_failure());
        assert_eq!(status.is_success(), !status.is_failure());
    }

    #[test]
    fn test_merge_two_successes() {
        let merged = merge(
            ModuleStatus::success().with_message("imported evidence"),
            ModuleStatus::configured().with_message("configured proxy"),
        );
        assert!(merged.is_success());
        assert_eq!(merged.message(), "imported evidence - configured proxy");
    }

    #[test]
    fn test_merge_failure_wins() {
        let merged = merge(ModuleStatus::success(), ModuleStatus::file_not_found());
        assert!(merged.is_failure());
        assert_eq!(merged.code(), StatusCode::FILE_NOT_FOUND);

        // A failing first status keeps its code when the second succeeded.
        let merged = merge(ModuleStatus::critical(), ModuleStatus::success());
        assert!(merged.is_failure());
        assert_eq!(merged.code(), StatusCode::CRITICAL);
    }

    #[test]
    fn test_merge_both_failures_keeps_second() {
        let merged = merge(ModuleStatus::not_ready(), ModuleStatus::unknown());
        assert_eq!(merged.code(), StatusCode::UNKNOWN);
    }

    #[test]
    fn test_merge_pairs_payloads() {
        let merged = merge(
            ModuleStatus::success().with_data(json!("a")),
            ModuleStatus::success().with_data(json!("b")),
        );
        assert_eq!(merged.data(), Some(&json!(["a", "b"])));

        let merged = merge(
            ModuleStatus::success(),
            ModuleStatus::success().with_data(json!(7)),
        );
        assert_eq!(merged.data(), Some(&json!(7)));

        let merged = merge(ModuleStatus::success(), ModuleStatus::success());
        assert!(merged.data().is_none());
    }

    #[test]
    fn test_merge_appends_logs() {
        let merged = merge(
            ModuleStatus::success().with_logs(vec!["one".into(), "two".into()]),
            ModuleStatus::success().with_logs(vec!["three".into()]),
        );
        assert_eq!(merged.logs(), ["one", "two", "three"]);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let json = serde_json::to_string(&ModuleStatus::success()).unwrap();
        assert_eq!(json, r#"{"code":2,"message":"Success"}"#);

        let parsed: ModuleStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code(), StatusCode::SUCCESS);
        assert!(parsed.logs().is_empty());
        assert!(parsed.data().is_none());
    }
}
