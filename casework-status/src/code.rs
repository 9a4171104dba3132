use std::fmt;

use serde::{Deserialize, Serialize};

/// Codes below this value are success tiers; codes at or above it are
/// failure kinds.
pub const FAILURE_THRESHOLD: u16 = 0xFF00;

/// Numeric status code shared with the host platform.
///
/// The numbering is a frozen contract: the host dispatches on the exact
/// values, so new codes may be added but existing ones are never renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const NO_ERROR: StatusCode = StatusCode(0x1);
    pub const SUCCESS: StatusCode = StatusCode(0x2);
    pub const CONFIGURED: StatusCode = StatusCode(0x3);

    pub const NOT_IMPLEMENTED: StatusCode = StatusCode(0xFF00);
    pub const UNEXPECTED_RESULT: StatusCode = StatusCode(0xFF01);
    pub const FILE_NOT_FOUND: StatusCode = StatusCode(0xFF02);
    pub const NOT_READY: StatusCode = StatusCode(0xFF03);
    pub const NOT_INITIALIZED: StatusCode = StatusCode(0xFF04);
    pub const CRITICAL: StatusCode = StatusCode(0xFF05);
    pub const ERROR: StatusCode = StatusCode(0xFFFE);
    pub const UNKNOWN: StatusCode = StatusCode(0xFFFF);

    pub fn is_success(self) -> bool {
        self.0 < FAILURE_THRESHOLD
    }

    pub fn is_failure(self) -> bool {
        !self.is_success()
    }

    /// Canonical message attached to a fixed code when the caller supplies
    /// nothing more specific.
    pub fn default_message(self) -> &'static str {
        match self {
            StatusCode::NO_ERROR => "No errors",
            StatusCode::SUCCESS => "Success",
            StatusCode::CONFIGURED => "Configured successfully",
            StatusCode::NOT_IMPLEMENTED => "Interface function not implemented",
            StatusCode::UNEXPECTED_RESULT => "Unexpected result",
            StatusCode::FILE_NOT_FOUND => "File not found",
            StatusCode::NOT_READY => "Interface not ready",
            StatusCode::NOT_INITIALIZED => "Interface not initialized",
            StatusCode::CRITICAL => "Critical error",
            StatusCode::ERROR => "Unspecified error",
            _ => "Unknown error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
