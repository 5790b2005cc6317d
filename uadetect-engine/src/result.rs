use serde::{Deserialize, Serialize};

use crate::{ClientType, DeviceType};

/// Sentinel used for every attribute that could not be determined.
pub const UNKNOWN: &str = "UNK";

fn unknown() -> String {
    UNKNOWN.to_owned()
}

/// Information about a detected bot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotInfo {
    pub name: String,
    pub category: String,
    pub url: String,
    pub producer: BotProducer,
}

impl BotInfo {
    /// Bot information with every attribute [`UNKNOWN`],
    /// used when only the fact that the agent is a bot matters.
    #[must_use]
    pub fn discarded() -> Self {
        Self {
            name: unknown(),
            category: unknown(),
            url: unknown(),
            producer: BotProducer::default(),
        }
    }
}

/// Organisation operating a bot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotProducer {
    pub name: String,
    pub url: String,
}

impl Default for BotProducer {
    fn default() -> Self {
        Self {
            name: unknown(),
            url: unknown(),
        }
    }
}

/// Information about the operating system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OsInfo {
    pub name: String,
    pub short_name: String,
    /// Truncated version, empty if the OS matched without a version.
    pub version: String,
    pub platform: String,
}

impl Default for OsInfo {
    fn default() -> Self {
        Self {
            name: unknown(),
            short_name: unknown(),
            version: unknown(),
            platform: unknown(),
        }
    }
}

/// Information about the client (browser, app, library, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(rename = "type")]
    pub client_type: ClientType,
    pub name: String,
    pub short_name: String,
    /// Truncated version, empty if the client matched without a version.
    pub version: String,
    /// Rendering engine, only known for browsers.
    pub engine: String,
    pub engine_version: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            client_type: ClientType::Unknown,
            name: unknown(),
            short_name: unknown(),
            version: unknown(),
            engine: unknown(),
            engine_version: unknown(),
        }
    }
}

/// Information about the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            device_type: DeviceType::Unknown,
            brand: unknown(),
            model: unknown(),
        }
    }
}

/// Outcome of classifying a single user agent.
///
/// Either a bot, in which case OS, client and device are all [`UNKNOWN`],
/// or the combination of the OS, client and device found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ClassificationRepr", into = "ClassificationRepr")]
pub struct ClassificationResult {
    user_agent: String,
    bot: Option<BotInfo>,
    os: OsInfo,
    client: ClientInfo,
    device: DeviceInfo,
}

impl ClassificationResult {
    /// Result for a user agent identified as a bot.
    #[must_use]
    pub fn bot(user_agent: impl Into<String>, bot: BotInfo) -> Self {
        Self {
            user_agent: user_agent.into(),
            bot: Some(bot),
            os: OsInfo::default(),
            client: ClientInfo::default(),
            device: DeviceInfo::default(),
        }
    }

    /// Result for a regular user agent,
    /// a missing OS or client is recorded as [`UNKNOWN`].
    #[must_use]
    pub fn agent(
        user_agent: impl Into<String>,
        os: Option<OsInfo>,
        client: Option<ClientInfo>,
        device: DeviceInfo,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            bot: None,
            os: os.unwrap_or_default(),
            client: client.unwrap_or_default(),
            device,
        }
    }

    /// Result for a user agent nothing is known about.
    #[must_use]
    pub fn unknown(user_agent: impl Into<String>) -> Self {
        Self::agent(user_agent, None, None, DeviceInfo::default())
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn bot_info(&self) -> Option<&BotInfo> {
        self.bot.as_ref()
    }

    #[must_use]
    pub fn os(&self) -> &OsInfo {
        &self.os
    }

    #[must_use]
    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    #[must_use]
    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device.device_type
    }

    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.bot.is_some()
    }

    /// A smartphone, tablet, feature phone or any other handheld device.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        !self.is_bot() && self.device.device_type.is_mobile()
    }

    #[must_use]
    pub fn is_desktop(&self) -> bool {
        !self.is_bot() && self.device.device_type == DeviceType::Desktop
    }

    #[must_use]
    pub fn is_smartphone(&self) -> bool {
        self.device.device_type == DeviceType::Smartphone
    }

    #[must_use]
    pub fn is_feature_phone(&self) -> bool {
        self.device.device_type == DeviceType::FeaturePhone
    }

    #[must_use]
    pub fn is_tablet(&self) -> bool {
        self.device.device_type == DeviceType::Tablet
    }

    #[must_use]
    pub fn is_phablet(&self) -> bool {
        self.device.device_type == DeviceType::Phablet
    }

    #[must_use]
    pub fn is_console(&self) -> bool {
        self.device.device_type == DeviceType::Console
    }

    #[must_use]
    pub fn is_tv(&self) -> bool {
        self.device.device_type == DeviceType::Tv
    }

    #[must_use]
    pub fn is_car_browser(&self) -> bool {
        self.device.device_type == DeviceType::CarBrowser
    }

    #[must_use]
    pub fn is_smart_display(&self) -> bool {
        self.device.device_type == DeviceType::SmartDisplay
    }

    #[must_use]
    pub fn is_camera(&self) -> bool {
        self.device.device_type == DeviceType::Camera
    }

    #[must_use]
    pub fn is_portable_media_player(&self) -> bool {
        self.device.device_type == DeviceType::PortableMediaPlayer
    }

    /// Whether the client is a browser.
    #[must_use]
    pub fn is_browser(&self) -> bool {
        self.client.client_type == ClientType::Browser
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ClassificationRepr {
    Bot {
        user_agent: String,
        bot: BotInfo,
    },
    Agent {
        user_agent: String,
        os: OsInfo,
        client: ClientInfo,
        device: DeviceInfo,
    },
}

impl From<ClassificationRepr> for ClassificationResult {
    fn from(repr: ClassificationRepr) -> Self {
        match repr {
            ClassificationRepr::Bot { user_agent, bot } => Self::bot(user_agent, bot),
            ClassificationRepr::Agent {
                user_agent,
                os,
                client,
                device,
            } => Self::agent(user_agent, Some(os), Some(client), device),
        }
    }
}

impl From<ClassificationResult> for ClassificationRepr {
    fn from(result: ClassificationResult) -> Self {
        match result.bot {
            Some(bot) => Self::Bot {
                user_agent: result.user_agent,
                bot,
            },
            None => Self::Agent {
                user_agent: result.user_agent,
                os: result.os,
                client: result.client,
                device: result.device,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn googlebot() -> BotInfo {
        BotInfo {
            name: "Googlebot".to_owned(),
            category: "Search bot".to_owned(),
            url: "http://www.google.com/bot.html".to_owned(),
            producer: BotProducer {
                name: "Google Inc.".to_owned(),
                url: "http://www.google.com".to_owned(),
            },
        }
    }

    #[test]
    fn test_bot_result_has_everything_else_unknown() {
        let result = ClassificationResult::bot("Googlebot/2.1", googlebot());
        assert!(result.is_bot());
        assert!(!result.is_mobile());
        assert!(!result.is_desktop());
        assert_eq!(result.os().short_name, UNKNOWN);
        assert_eq!(result.client().short_name, UNKNOWN);
        assert_eq!(result.client().client_type, ClientType::Unknown);
        assert_eq!(result.device_type(), DeviceType::Unknown);
        assert_eq!(result.bot_info().unwrap().name, "Googlebot");
    }

    #[test]
    fn test_unknown_result() {
        let result = ClassificationResult::unknown("Mozilla/3.01 (compatible;)");
        assert!(!result.is_bot());
        assert!(!result.is_mobile());
        assert!(!result.is_desktop());
        assert_eq!(result.user_agent(), "Mozilla/3.01 (compatible;)");
        assert_eq!(result.os(), &OsInfo::default());
        assert_eq!(result.client(), &ClientInfo::default());
        assert_eq!(result.device(), &DeviceInfo::default());
    }

    #[test]
    fn test_device_predicates() {
        let result = ClassificationResult::agent(
            "ua",
            None,
            None,
            DeviceInfo {
                device_type: DeviceType::Phablet,
                brand: "Samsung".to_owned(),
                model: "Galaxy Note".to_owned(),
            },
        );
        assert!(result.is_phablet());
        assert!(result.is_mobile());
        assert!(!result.is_tablet());
        assert!(!result.is_desktop());
        assert!(!result.is_browser());
    }

    #[test]
    fn test_bot_serializes_without_device_fields() {
        let result = ClassificationResult::bot("Googlebot/2.1", googlebot());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "user_agent": "Googlebot/2.1",
                "bot": {
                    "name": "Googlebot",
                    "category": "Search bot",
                    "url": "http://www.google.com/bot.html",
                    "producer": {
                        "name": "Google Inc.",
                        "url": "http://www.google.com",
                    },
                },
            })
        );
        let back: ClassificationResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_agent_serialization_shape() {
        let result = ClassificationResult::agent(
            "ua",
            Some(OsInfo {
                name: "Android".to_owned(),
                short_name: "AND".to_owned(),
                version: "4.4".to_owned(),
                platform: UNKNOWN.to_owned(),
            }),
            None,
            DeviceInfo {
                device_type: DeviceType::Smartphone,
                brand: "LG".to_owned(),
                model: "Nexus 4".to_owned(),
            },
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["os"]["short_name"], "AND");
        assert_eq!(value["client"]["type"], UNKNOWN);
        assert_eq!(value["device"]["type"], "smartphone");
        assert!(value.get("bot").is_none());

        let back: ClassificationResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
        assert!(back.is_mobile());
    }
}
