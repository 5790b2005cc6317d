use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use uadetect_error::OpaqueError;
use uadetect_utils::macros::match_ignore_ascii_case_str;

use crate::{
    BotInfo, BotProducer,
    rules::{BotRuleDefinition, Pattern, compile_pattern, interpolate_or_unknown},
};

/// How bots are handled during classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BotDetection {
    /// Detect bots and report their details.
    #[default]
    Full,
    /// Detect bots but do not report any details about them.
    DiscardInfo,
    /// Do not detect bots, classify them like any other agent.
    Skip,
}

impl BotDetection {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::DiscardInfo => "discard-info",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for BotDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BotDetection {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_ignore_ascii_case_str! {
            match (s) {
                "full" => Ok(Self::Full),
                "discard-info" | "discard_info" | "discard" => Ok(Self::DiscardInfo),
                "skip" => Ok(Self::Skip),
                _ => Err(OpaqueError::from_display(format!("invalid bot detection: {s}"))),
            }
        }
    }
}

impl Serialize for BotDetection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BotDetection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

/// Detects crawlers, spiders and other automated agents.
#[derive(Debug, Clone)]
pub struct BotParser {
    rules: Vec<BotRule>,
}

#[derive(Debug, Clone)]
struct BotRule {
    pattern: Pattern,
    name: String,
    category: Option<String>,
    url: Option<String>,
    producer_name: Option<String>,
    producer_url: Option<String>,
}

impl BotParser {
    pub(crate) fn compile(definitions: &[BotRuleDefinition]) -> Result<Self, OpaqueError> {
        let rules = definitions
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let producer = def.producer.clone().unwrap_or_default();
                Ok(BotRule {
                    pattern: compile_pattern("bot", index, &def.regex, true)?,
                    name: def.name.clone(),
                    category: def.category.clone(),
                    url: def.url.clone(),
                    producer_name: producer.name,
                    producer_url: producer.url,
                })
            })
            .collect::<Result<_, OpaqueError>>()?;
        Ok(Self { rules })
    }

    /// Bot information for the first bot rule matching `ua`.
    #[must_use]
    pub fn parse(&self, ua: &str) -> Option<BotInfo> {
        self.rules.iter().find_map(|rule| {
            let captures = rule.pattern.captures(ua)?;
            Some(BotInfo {
                name: interpolate_or_unknown(&captures, Some(&rule.name)),
                category: interpolate_or_unknown(&captures, rule.category.as_deref()),
                url: interpolate_or_unknown(&captures, rule.url.as_deref()),
                producer: BotProducer {
                    name: interpolate_or_unknown(&captures, rule.producer_name.as_deref()),
                    url: interpolate_or_unknown(&captures, rule.producer_url.as_deref()),
                },
            })
        })
    }

    /// Whether any bot rule matches `ua`.
    #[must_use]
    pub fn is_match(&self, ua: &str) -> bool {
        self.rules.iter().any(|rule| rule.pattern.is_match(ua))
    }
}
