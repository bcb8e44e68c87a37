use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Context key -> entry. Ascending key order is the traversal order used for
/// option extraction and domain resolution.
pub type ContextSet = BTreeMap<String, ContextEntry>;

/// Root of `.fdk/context.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub theme: ThemeSection,

    /// Partner data owned by other FDK tooling; never interpreted here.
    /// `None` only when the key is absent, so an explicit `null` is kept.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub partners: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_context: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: ContextSet,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One deployable target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub application_id: String,
    /// Grouping key shown in the selector. Empty is still a valid option.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme_id: String,
    /// Environment name handed to `fdk env set`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub env: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that is present maps to `Some`, including `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Other FDK tools write `null` for unset fields; read it as the zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConfigDocument {
    /// The active context, or `None` when unset or pointing at a missing key.
    pub fn active_context(&self) -> Option<(&str, &ContextEntry)> {
        let key = self.theme.active_context.as_str();
        if key.is_empty() {
            return None;
        }
        self.theme
            .contexts
            .get_key_value(key)
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Mark `key` active. Refuses keys that are not in the context set so a
    /// dangling reference is never written back.
    pub fn set_active_context(&mut self, key: &str) -> bool {
        if !self.theme.contexts.contains_key(key) {
            return false;
        }
        self.theme.active_context = key.to_string();
        true
    }
}
