//! Rule data and its compiled form.
//!
//! A [`RuleSetDefinition`] is plain data, typically deserialized from JSON.
//! [`RuleSet::compile`] turns it into the immutable [`RuleSet`]
//! used by the classifiers, failing on the first invalid pattern.

use uadetect_error::OpaqueError;

use crate::{BotParser, ClientParser, DeviceParser, DeviceTypeHints, OsParser};

mod definition;
#[doc(inline)]
pub use definition::{
    BotProducerDefinition, BotRuleDefinition, ClientRuleDefinition, ClientRulesDefinition,
    DeviceBrandDefinition, DeviceFamilyDefinition, DeviceModelDefinition,
    DeviceTypeHintDefinition, EngineRefDefinition, EngineRuleDefinition, OsRuleDefinition,
    PlatformRuleDefinition, RuleSetDefinition,
};

mod pattern;
pub(crate) use pattern::{Pattern, interpolate_or_unknown};

/// Compiled, immutable rule data.
///
/// Cheap to share between threads behind an `Arc`,
/// all classification is read-only.
#[derive(Debug, Clone)]
pub struct RuleSet {
    bots: BotParser,
    os: OsParser,
    clients: ClientParser,
    devices: DeviceParser,
    device_type_hints: DeviceTypeHints,
}

impl RuleSet {
    /// Compile all patterns of the given definition.
    ///
    /// The error names the rule category, its index and the offending pattern.
    pub fn compile(definition: RuleSetDefinition) -> Result<Self, OpaqueError> {
        let rule_set = Self {
            bots: BotParser::compile(&definition.bots)?,
            os: OsParser::compile(
                &definition.oss,
                &definition.os_short_names,
                &definition.platforms,
            )?,
            clients: ClientParser::compile(
                &definition.clients,
                &definition.client_short_names,
                &definition.browser_engines,
            )?,
            devices: DeviceParser::compile(&definition.devices)?,
            device_type_hints: DeviceTypeHints::compile(&definition)?,
        };
        tracing::debug!(
            bots = definition.bots.len(),
            oss = definition.oss.len(),
            device_families = definition.devices.len(),
            hints = definition.device_type_hints.len(),
            "compiled user agent rule set"
        );
        Ok(rule_set)
    }

    /// Classifier for crawlers, spiders and other automated agents.
    #[must_use]
    pub fn bots(&self) -> &BotParser {
        &self.bots
    }

    /// Classifier for operating systems.
    #[must_use]
    pub fn os(&self) -> &OsParser {
        &self.os
    }

    /// Classifier for browsers, apps and other clients.
    #[must_use]
    pub fn clients(&self) -> &ClientParser {
        &self.clients
    }

    /// Classifier for device brand, model and type.
    #[must_use]
    pub fn devices(&self) -> &DeviceParser {
        &self.devices
    }

    /// Configuration used to reconcile the final device type.
    #[must_use]
    pub fn device_type_hints(&self) -> &DeviceTypeHints {
        &self.device_type_hints
    }
}

/// Compile a pattern, with context identifying the failing rule.
pub(crate) fn compile_pattern(
    category: &str,
    index: usize,
    rule: &str,
    bounded: bool,
) -> Result<Pattern, OpaqueError> {
    use uadetect_error::ErrorContext;

    let pattern = if bounded {
        Pattern::bounded(rule)
    } else {
        Pattern::unbounded(rule)
    };
    pattern.with_context(|| format!("compile {category} rule #{index}: pattern {rule:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_empty_definition() {
        let rule_set = RuleSet::compile(RuleSetDefinition::default()).unwrap();
        assert!(rule_set.bots().parse("Googlebot/2.1").is_none());
        assert!(rule_set.os().parse("Windows NT 6.1", Default::default()).is_none());
    }

    #[test]
    fn test_compile_reports_offending_rule() {
        let definition: RuleSetDefinition = serde_json::from_str(
            r#"{
                "bots": [
                    {"regex": "Googlebot", "name": "Googlebot"},
                    {"regex": "Bingbot(", "name": "BingBot"}
                ]
            }"#,
        )
        .unwrap();
        let err = RuleSet::compile(definition).unwrap_err().to_string();
        assert!(err.contains("bot rule #1"), "{err}");
        assert!(err.contains("Bingbot("), "{err}");
    }

    #[test]
    fn test_compile_pattern_context() {
        let err = compile_pattern("os", 3, "Windows (", true).unwrap_err();
        assert!(err.to_string().starts_with("compile os rule #3"), "{err}");
        assert!(compile_pattern("os", 0, "Windows", false).is_ok());
    }
}
