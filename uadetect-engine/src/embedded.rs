use uadetect_error::{ErrorContext, OpaqueError};

use crate::{RuleSet, rules::RuleSetDefinition};

/// The rule definitions embedded with this crate.
///
/// This function is only available if the `embed-rules` feature is enabled.
pub fn embedded_rules_definition() -> Result<RuleSetDefinition, OpaqueError> {
    serde_json::from_str(include_str!("embed_rules.json")).context("deserialize embedded rules")
}

/// Load and compile the rules embedded with this crate.
///
/// This function is only available if the `embed-rules` feature is enabled.
pub fn load_embedded_rules() -> Result<RuleSet, OpaqueError> {
    RuleSet::compile(embedded_rules_definition()?).context("compile embedded rules")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_rules_compile() {
        let definition = embedded_rules_definition().unwrap();
        assert!(!definition.bots.is_empty());
        assert!(!definition.clients.browsers.is_empty());
        assert!(definition.os_families.contains_key("Android"));
        load_embedded_rules().unwrap();
    }

    #[test]
    fn test_embedded_short_names_are_consistent() {
        let definition = embedded_rules_definition().unwrap();
        for codes in definition.os_families.values() {
            for code in codes {
                assert!(
                    definition.os_short_names.contains_key(code),
                    "unknown os code in family: {code}"
                );
            }
        }
        for code in &definition.mobile_only_browsers {
            assert!(
                definition.client_short_names.contains_key(code),
                "unknown mobile only browser: {code}"
            );
        }
    }
}
