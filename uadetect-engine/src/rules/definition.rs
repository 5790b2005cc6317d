use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::DeviceType;

/// Declarative rule data, as loaded from JSON.
///
/// Every list is tried in order, the first matching entry wins.
/// Compile it into a [`RuleSet`] before classifying.
///
/// [`RuleSet`]: super::RuleSet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSetDefinition {
    pub bots: Vec<BotRuleDefinition>,
    pub oss: Vec<OsRuleDefinition>,
    /// OS short code to canonical OS name.
    pub os_short_names: IndexMap<String, String>,
    /// OS family name to the short codes belonging to it.
    pub os_families: IndexMap<String, Vec<String>>,
    pub desktop_os_families: Vec<String>,
    pub platforms: Vec<PlatformRuleDefinition>,
    pub clients: ClientRulesDefinition,
    /// Client short code to canonical client name.
    pub client_short_names: IndexMap<String, String>,
    /// Short codes of browsers that never run on a desktop.
    pub mobile_only_browsers: Vec<String>,
    pub browser_engines: Vec<EngineRuleDefinition>,
    pub devices: Vec<DeviceFamilyDefinition>,
    pub device_type_hints: Vec<DeviceTypeHintDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotRuleDefinition {
    pub regex: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<BotProducerDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotProducerDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsRuleDefinition {
    pub regex: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Overrides platform detection for this OS when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRuleDefinition {
    pub regex: String,
    pub name: String,
}

/// Client rules grouped per client family.
///
/// Families are tried as
/// feed readers, mobile apps, media players, PIMs, browsers and finally libraries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientRulesDefinition {
    pub feed_readers: Vec<ClientRuleDefinition>,
    pub mobile_apps: Vec<ClientRuleDefinition>,
    pub media_players: Vec<ClientRuleDefinition>,
    pub pims: Vec<ClientRuleDefinition>,
    pub browsers: Vec<ClientRuleDefinition>,
    pub libraries: Vec<ClientRuleDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRuleDefinition {
    pub regex: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Rendering engine of a browser, only used for the browser family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineRefDefinition>,
}

/// Engine a browser renders with, possibly depending on the browser version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineRefDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Minimum browser version to the engine used from that version onwards.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub versions: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRuleDefinition {
    pub regex: String,
    pub name: String,
    /// Pattern capturing the engine version in its first group,
    /// defaults to `<name>/<version>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A group of device rules, such as consoles or HbbTV sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFamilyDefinition {
    pub family: String,
    /// Pattern that has to match before any brand of the family is tried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    /// Device type of matches that do not declare one themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceType>,
    pub brands: IndexMap<String, DeviceBrandDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBrandDefinition {
    pub regex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<DeviceModelDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceModelDefinition {
    pub regex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceType>,
    /// Overrides the brand, for models sold under another label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// A condition under which the device type is set, or overridden when `force` is set.
///
/// All non-empty conditions have to hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTypeHintDefinition {
    pub device: DeviceType,
    #[serde(default)]
    pub force: bool,
    /// OS short codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub os: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub os_families: Vec<String>,
    /// Inclusive lower bound of the OS version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version_min: Option<String>,
    /// Exclusive upper bound of the OS version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version_below: Option<String>,
    /// Client names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}
