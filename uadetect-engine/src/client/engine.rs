use indexmap::IndexMap;
use uadetect_error::OpaqueError;

use crate::{
    compare_versions,
    rules::{EngineRefDefinition, EngineRuleDefinition, Pattern, compile_pattern},
};

/// Rendering engines, detected from the user agent when the browser rule
/// does not pin one down.
#[derive(Debug, Clone)]
pub(super) struct BrowserEngines {
    rules: Vec<EngineRule>,
}

#[derive(Debug, Clone)]
struct EngineRule {
    pattern: Pattern,
    name: String,
    version: Pattern,
}

impl BrowserEngines {
    pub(super) fn compile(definitions: &[EngineRuleDefinition]) -> Result<Self, OpaqueError> {
        let rules = definitions
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let version = match def.version.as_deref() {
                    Some(rule) => compile_pattern("engine version", index, rule, false)?,
                    None => compile_pattern(
                        "engine version",
                        index,
                        &format!(r"{}\s*/?\s*((?:\d+[.\s])*\d+)", regex::escape(&def.name)),
                        false,
                    )?,
                };
                Ok(EngineRule {
                    pattern: compile_pattern("engine", index, &def.regex, true)?,
                    name: def.name.clone(),
                    version,
                })
            })
            .collect::<Result<_, OpaqueError>>()?;
        Ok(Self { rules })
    }

    /// Name of the first engine matching `ua`.
    pub(super) fn detect(&self, ua: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(ua))
            .map(|rule| rule.name.as_str())
    }

    /// Version of `engine` as found in `ua`, untruncated.
    pub(super) fn version(&self, engine: &str, ua: &str) -> Option<String> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.name.eq_ignore_ascii_case(engine))?;
        let captures = rule.version.captures(ua)?;
        let version = captures.group(1).trim().replace(' ', ".");
        (!version.is_empty()).then_some(version)
    }
}

/// Engine reference of a single browser rule.
#[derive(Debug, Clone, Default)]
pub(super) struct EngineRef {
    default: Option<String>,
    versions: IndexMap<String, String>,
}

impl EngineRef {
    pub(super) fn new(definition: &EngineRefDefinition) -> Self {
        Self {
            default: definition.default.clone(),
            versions: definition.versions.clone(),
        }
    }

    /// Engine for the given browser version.
    ///
    /// Version entries are checked in declared order and the last one
    /// satisfied by `browser_version` wins, otherwise the default engine.
    pub(super) fn resolve(&self, browser_version: &str) -> Option<&str> {
        if !browser_version.is_empty()
            && let Some((_, engine)) = self
                .versions
                .iter()
                .rev()
                .find(|(min, _)| compare_versions(browser_version, min).is_ge())
        {
            return Some(engine.as_str());
        }
        self.default.as_deref().filter(|engine| !engine.is_empty())
    }
}
