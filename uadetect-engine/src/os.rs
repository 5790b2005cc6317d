use indexmap::IndexMap;
use uadetect_error::OpaqueError;

use crate::{
    OsInfo, UNKNOWN, VersionTruncation,
    rules::{OsRuleDefinition, Pattern, PlatformRuleDefinition, compile_pattern},
};

/// Detects the operating system and the platform (CPU architecture) it runs on.
#[derive(Debug, Clone)]
pub struct OsParser {
    rules: Vec<OsRule>,
    short_names: Vec<(String, String)>,
    platforms: Vec<PlatformRule>,
}

#[derive(Debug, Clone)]
struct OsRule {
    pattern: Pattern,
    name: String,
    version: Option<String>,
    platform: Option<String>,
}

#[derive(Debug, Clone)]
struct PlatformRule {
    pattern: Pattern,
    name: String,
}

impl OsParser {
    pub(crate) fn compile(
        definitions: &[OsRuleDefinition],
        short_names: &IndexMap<String, String>,
        platforms: &[PlatformRuleDefinition],
    ) -> Result<Self, OpaqueError> {
        let rules = definitions
            .iter()
            .enumerate()
            .map(|(index, def)| {
                Ok(OsRule {
                    pattern: compile_pattern("os", index, &def.regex, true)?,
                    name: def.name.clone(),
                    version: def.version.clone(),
                    platform: def.platform.clone(),
                })
            })
            .collect::<Result<_, OpaqueError>>()?;
        let platforms = platforms
            .iter()
            .enumerate()
            .map(|(index, def)| {
                Ok(PlatformRule {
                    pattern: compile_pattern("platform", index, &def.regex, true)?,
                    name: def.name.clone(),
                })
            })
            .collect::<Result<_, OpaqueError>>()?;
        Ok(Self {
            rules,
            short_names: short_names
                .iter()
                .map(|(code, name)| (code.clone(), name.clone()))
                .collect(),
            platforms,
        })
    }

    /// OS information for the first OS rule matching `ua`.
    ///
    /// The name is canonicalized through the short name table,
    /// names missing from that table get [`UNKNOWN`] as short name.
    #[must_use]
    pub fn parse(&self, ua: &str, truncation: VersionTruncation) -> Option<OsInfo> {
        let (rule, captures) = self
            .rules
            .iter()
            .find_map(|rule| rule.pattern.captures(ua).map(|captures| (rule, captures)))?;

        let name = captures.interpolate(&rule.name);
        let (name, short_name) = match self.short_name(&name) {
            Some((code, canonical)) => (canonical.to_owned(), code.to_owned()),
            None if name.is_empty() => (UNKNOWN.to_owned(), UNKNOWN.to_owned()),
            None => (name, UNKNOWN.to_owned()),
        };
        let version = rule
            .version
            .as_deref()
            .map(|template| captures.version(template, truncation))
            .unwrap_or_default();
        let platform = match rule.platform.as_deref() {
            Some(template) => Some(captures.interpolate(template)).filter(|p| !p.is_empty()),
            None => self.platform(ua).map(ToOwned::to_owned),
        }
        .unwrap_or_else(|| UNKNOWN.to_owned());

        Some(OsInfo {
            name,
            short_name,
            version,
            platform,
        })
    }

    /// First platform matching `ua`, if any.
    #[must_use]
    pub fn platform(&self, ua: &str) -> Option<&str> {
        self.platforms
            .iter()
            .find(|rule| rule.pattern.is_match(ua))
            .map(|rule| rule.name.as_str())
    }

    /// Short code and canonical name for an OS name, case insensitive.
    #[must_use]
    pub fn short_name(&self, name: &str) -> Option<(&str, &str)> {
        self.short_names
            .iter()
            .find(|(_, canonical)| canonical.eq_ignore_ascii_case(name))
            .map(|(code, canonical)| (code.as_str(), canonical.as_str()))
    }
}
