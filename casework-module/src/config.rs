use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value types a configuration parameter can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Bool,
    Int,
}

/// A configuration parameter a module declares. Administrators see these
/// fields in the host UI and set values against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub human_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub mandatory: bool,
    #[serde(rename = "type")]
    pub kind: ParamType,
}

/// A declared parameter together with the value administrators stored for
/// it. This is the shape the host hands back at configure time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamRecord {
    #[serde(flatten)]
    pub spec: ParamSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ParamRecord {
    /// A record carrying only the declared default, used when the host has
    /// no stored configuration for the module yet.
    pub fn from_spec(spec: ParamSpec) -> Self {
        Self { spec, value: None }
    }
}

/// A parameter value after the three-way cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl ParamValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Errors produced while shaping host-supplied configuration. Callers on the
/// module/host boundary convert these into a malformed-configuration status
/// rather than letting them escape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("parameter {0} is mandatory but has no value or default")]
    MissingMandatory(String),

    #[error("parameter {name} cannot be read as {kind:?}: {value}")]
    BadCast {
        name: String,
        kind: ParamType,
        value: Value,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Flatten host-supplied records into a `name -> typed value` map, explicit
/// values overriding declared defaults. Single pass; the first malformed
/// parameter aborts the whole normalization.
///
/// The host stores a cleared value as JSON null, which counts as unset.
pub fn normalize(records: &[ParamRecord]) -> Result<HashMap<String, ParamValue>> {
    let mut resolved = HashMap::with_capacity(records.len());
    for record in records {
        let value = record.value.as_ref().filter(|v| !v.is_null());
        let default = record.spec.default.as_ref().filter(|v| !v.is_null());
        let Some(raw) = value.or(default) else {
            if record.spec.mandatory {
                return Err(ConfigError::MissingMandatory(record.spec.name.clone()));
            }
            // Optional and unset: leave it out rather than inventing a value.
            continue;
        };
        resolved.insert(record.spec.name.clone(), cast(&record.spec, raw)?);
    }
    Ok(resolved)
}

/// Cast one raw JSON value to the parameter's declared type. Administrators
/// typically type values as strings, so string renditions of booleans and
/// integers are accepted alongside the native JSON forms.
fn cast(spec: &ParamSpec, raw: &Value) -> Result<ParamValue> {
    let bad = || ConfigError::BadCast {
        name: spec.name.clone(),
        kind: spec.kind,
        value: raw.clone(),
    };

    match spec.kind {
        ParamType::Bool => match raw {
            Value::Bool(b) => Ok(ParamValue::Bool(*b)),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(ParamValue::Bool(true)),
                "false" | "0" => Ok(ParamValue::Bool(false)),
                _ => Err(bad()),
            },
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(ParamValue::Bool(false)),
                Some(1) => Ok(ParamValue::Bool(true)),
                _ => Err(bad()),
            },
            _ => Err(bad()),
        },
        ParamType::Int => match raw {
            Value::Number(n) => n.as_i64().map(ParamValue::Int).ok_or_else(bad),
            Value::String(s) => s.trim().parse().map(ParamValue::Int).map_err(|_| bad()),
            _ => Err(bad()),
        },
        ParamType::String => match raw {
            Value::String(s) => Ok(ParamValue::String(s.clone())),
            Value::Bool(b) => Ok(ParamValue::String(b.to_string())),
            Value::Number(n) => Ok(ParamValue::String(n.to_string())),
            _ => Err(bad()),
        },
    }
}
