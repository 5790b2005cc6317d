use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use uadetect_error::OpaqueError;
use uadetect_utils::macros::match_ignore_ascii_case_str;

use crate::{
    ClientInfo, UNKNOWN, VersionTruncation,
    rules::{
        ClientRuleDefinition, ClientRulesDefinition, EngineRuleDefinition, Pattern,
        compile_pattern,
    },
};

mod engine;
use engine::{BrowserEngines, EngineRef};

/// The kind of client software behind a user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientType {
    FeedReader,
    MobileApp,
    MediaPlayer,
    Pim,
    Browser,
    Library,
    Unknown,
}

impl ClientType {
    /// Order in which client families are tried.
    pub const PRIORITY: [Self; 6] = [
        Self::FeedReader,
        Self::MobileApp,
        Self::MediaPlayer,
        Self::Pim,
        Self::Browser,
        Self::Library,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FeedReader => "feed reader",
            Self::MobileApp => "mobile app",
            Self::MediaPlayer => "mediaplayer",
            Self::Pim => "pim",
            Self::Browser => "browser",
            Self::Library => "library",
            Self::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_ignore_ascii_case_str! {
            match (s) {
                "feed reader" | "feedreader" => Ok(Self::FeedReader),
                "mobile app" | "mobileapp" => Ok(Self::MobileApp),
                "mediaplayer" | "media player" => Ok(Self::MediaPlayer),
                "pim" => Ok(Self::Pim),
                "browser" => Ok(Self::Browser),
                "library" => Ok(Self::Library),
                "unk" | "unknown" => Ok(Self::Unknown),
                _ => Err(OpaqueError::from_display(format!("invalid client type: {s}"))),
            }
        }
    }
}

impl Serialize for ClientType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClientType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

/// Detects the client: browsers, mobile apps, media players, libraries, ...
#[derive(Debug, Clone)]
pub struct ClientParser {
    families: Vec<(ClientType, Vec<ClientRule>)>,
    short_names: Vec<(String, String)>,
    engines: BrowserEngines,
}

#[derive(Debug, Clone)]
struct ClientRule {
    pattern: Pattern,
    name: String,
    version: Option<String>,
    engine: Option<EngineRef>,
}

impl ClientParser {
    pub(crate) fn compile(
        definition: &ClientRulesDefinition,
        short_names: &IndexMap<String, String>,
        engines: &[EngineRuleDefinition],
    ) -> Result<Self, OpaqueError> {
        // same order as ClientType::PRIORITY
        let families = [
            (ClientType::FeedReader, &definition.feed_readers),
            (ClientType::MobileApp, &definition.mobile_apps),
            (ClientType::MediaPlayer, &definition.media_players),
            (ClientType::Pim, &definition.pims),
            (ClientType::Browser, &definition.browsers),
            (ClientType::Library, &definition.libraries),
        ]
        .into_iter()
        .map(|(client_type, definitions)| {
            Ok((client_type, compile_rules(client_type, definitions)?))
        })
        .collect::<Result<_, OpaqueError>>()?;
        Ok(Self {
            families,
            short_names: short_names
                .iter()
                .map(|(code, name)| (code.clone(), name.clone()))
                .collect(),
            engines: BrowserEngines::compile(engines)?,
        })
    }

    /// Client information for the first matching rule,
    /// trying the families in [`ClientType::PRIORITY`] order.
    #[must_use]
    pub fn parse(&self, ua: &str, truncation: VersionTruncation) -> Option<ClientInfo> {
        self.families.iter().find_map(|(client_type, rules)| {
            rules
                .iter()
                .find_map(|rule| rule.pattern.captures(ua).map(|captures| (rule, captures)))
                .map(|(rule, captures)| {
                    let name = captures.interpolate(&rule.name);
                    let (name, short_name) = match self.short_name(&name) {
                        Some((code, canonical)) => (canonical.to_owned(), code.to_owned()),
                        None if name.is_empty() => (UNKNOWN.to_owned(), UNKNOWN.to_owned()),
                        None => (name, UNKNOWN.to_owned()),
                    };
                    let raw_version = rule
                        .version
                        .as_deref()
                        .map(|template| captures.version(template, VersionTruncation::None))
                        .unwrap_or_default();
                    let (engine, engine_version) = if *client_type == ClientType::Browser {
                        self.engine(rule, &raw_version, ua, truncation)
                    } else {
                        (UNKNOWN.to_owned(), UNKNOWN.to_owned())
                    };
                    ClientInfo {
                        client_type: *client_type,
                        name,
                        short_name,
                        version: truncation.truncate(&raw_version).into_owned(),
                        engine,
                        engine_version,
                    }
                })
        })
    }

    /// Engine and engine version of a matched browser rule.
    ///
    /// The engine comes from the rule itself, resolved against the untruncated
    /// browser version, falling back to engine detection on the user agent.
    fn engine(
        &self,
        rule: &ClientRule,
        browser_version: &str,
        ua: &str,
        truncation: VersionTruncation,
    ) -> (String, String) {
        let engine = rule
            .engine
            .as_ref()
            .and_then(|engine| engine.resolve(browser_version))
            .or_else(|| self.engines.detect(ua));
        match engine {
            Some(engine) => {
                let version = self
                    .engines
                    .version(engine, ua)
                    .map(|version| truncation.truncate(&version).into_owned())
                    .unwrap_or_default();
                (engine.to_owned(), version)
            }
            None => (UNKNOWN.to_owned(), UNKNOWN.to_owned()),
        }
    }

    /// Short code and canonical name for a client name, case insensitive.
    #[must_use]
    pub fn short_name(&self, name: &str) -> Option<(&str, &str)> {
        self.short_names
            .iter()
            .find(|(_, canonical)| canonical.eq_ignore_ascii_case(name))
            .map(|(code, canonical)| (code.as_str(), canonical.as_str()))
    }
}

fn compile_rules(
    client_type: ClientType,
    definitions: &[ClientRuleDefinition],
) -> Result<Vec<ClientRule>, OpaqueError> {
    definitions
        .iter()
        .enumerate()
        .map(|(index, def)| {
            Ok(ClientRule {
                pattern: compile_pattern(client_type.as_str(), index, &def.regex, true)?,
                name: def.name.clone(),
                version: def.version.clone(),
                engine: def.engine.as_ref().map(EngineRef::new),
            })
        })
        .collect()
}
