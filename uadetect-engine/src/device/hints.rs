use std::cmp::Ordering;

use ahash::HashMap;
use uadetect_error::OpaqueError;
use uadetect_utils::str::any_eq_ignore_ascii_case;

use super::DeviceType;
use crate::{
    ClientInfo, OsInfo, compare_versions,
    rules::{DeviceTypeHintDefinition, Pattern, RuleSetDefinition, compile_pattern},
};

/// Configuration for [`reconcile_device_type`].
#[derive(Debug, Clone, Default)]
pub struct DeviceTypeHints {
    forced: Vec<DeviceTypeHint>,
    soft: Vec<DeviceTypeHint>,
    /// OS short code to OS family.
    os_families: HashMap<String, String>,
    desktop_os_families: Vec<String>,
    mobile_only_browsers: Vec<String>,
}

#[derive(Debug, Clone)]
struct DeviceTypeHint {
    device_type: DeviceType,
    os: Vec<String>,
    os_families: Vec<String>,
    os_version_min: Option<String>,
    os_version_below: Option<String>,
    clients: Vec<String>,
    pattern: Option<Pattern>,
}

impl DeviceTypeHints {
    pub(crate) fn compile(definition: &RuleSetDefinition) -> Result<Self, OpaqueError> {
        let mut hints = Self {
            os_families: definition
                .os_families
                .iter()
                .flat_map(|(family, codes)| {
                    codes
                        .iter()
                        .map(move |code| (code.to_ascii_uppercase(), family.clone()))
                })
                .collect(),
            desktop_os_families: definition.desktop_os_families.clone(),
            mobile_only_browsers: definition.mobile_only_browsers.clone(),
            ..Default::default()
        };
        for (index, def) in definition.device_type_hints.iter().enumerate() {
            let hint = DeviceTypeHint::compile(index, def)?;
            if def.force {
                hints.forced.push(hint);
            } else {
                hints.soft.push(hint);
            }
        }
        Ok(hints)
    }

    /// Family of an OS short code, if it belongs to one.
    #[must_use]
    pub fn os_family(&self, short_name: &str) -> Option<&str> {
        self.os_families
            .get(&short_name.to_ascii_uppercase())
            .map(String::as_str)
    }

    fn is_desktop_os(&self, os: &OsInfo) -> bool {
        self.os_family(&os.short_name)
            .is_some_and(|family| any_eq_ignore_ascii_case(family, &self.desktop_os_families))
    }

    fn is_mobile_only_browser(&self, client: &ClientInfo) -> bool {
        any_eq_ignore_ascii_case(&client.short_name, &self.mobile_only_browsers)
    }
}

impl DeviceTypeHint {
    fn compile(index: usize, def: &DeviceTypeHintDefinition) -> Result<Self, OpaqueError> {
        Ok(Self {
            device_type: def.device,
            os: def.os.clone(),
            os_families: def.os_families.clone(),
            os_version_min: def.os_version_min.clone(),
            os_version_below: def.os_version_below.clone(),
            clients: def.clients.clone(),
            pattern: def
                .regex
                .as_deref()
                .map(|rule| compile_pattern("device type hint", index, rule, true))
                .transpose()?,
        })
    }

    fn holds(
        &self,
        ua: &str,
        os: Option<&OsInfo>,
        client: Option<&ClientInfo>,
        hints: &DeviceTypeHints,
    ) -> bool {
        let needs_os = !self.os.is_empty()
            || !self.os_families.is_empty()
            || self.os_version_min.is_some()
            || self.os_version_below.is_some();
        if needs_os {
            let Some(os) = os else {
                return false;
            };
            if !self.os.is_empty() && !any_eq_ignore_ascii_case(&os.short_name, &self.os) {
                return false;
            }
            if !self.os_families.is_empty()
                && !hints
                    .os_family(&os.short_name)
                    .is_some_and(|family| any_eq_ignore_ascii_case(family, &self.os_families))
            {
                return false;
            }
            if (self.os_version_min.is_some() || self.os_version_below.is_some())
                && os.version.is_empty()
            {
                return false;
            }
            if let Some(min) = &self.os_version_min
                && compare_versions(&os.version, min) == Ordering::Less
            {
                return false;
            }
            if let Some(below) = &self.os_version_below
                && compare_versions(&os.version, below) != Ordering::Less
            {
                return false;
            }
        }
        if !self.clients.is_empty()
            && !client.is_some_and(|client| any_eq_ignore_ascii_case(&client.name, &self.clients))
        {
            return false;
        }
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(ua))
    }
}

/// Decide the final device type of a non-bot user agent.
///
/// In order:
///
/// 1. a forced hint that holds wins, even over the device rules;
/// 2. the type found by the device rules;
/// 3. the first regular hint that holds;
/// 4. desktop, for OS families listed as desktop,
///    unless the browser only exists on mobile devices;
/// 5. [`DeviceType::Unknown`].
#[must_use]
pub fn reconcile_device_type(
    ua: &str,
    os: Option<&OsInfo>,
    client: Option<&ClientInfo>,
    candidate: Option<DeviceType>,
    hints: &DeviceTypeHints,
) -> DeviceType {
    let holds = |hint: &&DeviceTypeHint| hint.holds(ua, os, client, hints);

    if let Some(hint) = hints.forced.iter().find(holds) {
        return hint.device_type;
    }
    if let Some(device_type) = candidate.filter(|device_type| *device_type != DeviceType::Unknown) {
        return device_type;
    }
    if let Some(hint) = hints.soft.iter().find(holds) {
        return hint.device_type;
    }
    if let Some(os) = os
        && hints.is_desktop_os(os)
        && !client.is_some_and(|client| hints.is_mobile_only_browser(client))
    {
        return DeviceType::Desktop;
    }
    DeviceType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientType, UNKNOWN};

    fn hints() -> DeviceTypeHints {
        let definition: RuleSetDefinition = serde_json::from_str(
            r#"{
                "os_families": {
                    "Android": ["AND"],
                    "Windows": ["WIN"],
                    "Mac": ["MAC"],
                    "GNU/Linux": ["LIN"]
                },
                "desktop_os_families": ["Windows", "Mac", "GNU/Linux"],
                "mobile_only_browsers": ["CM"],
                "device_type_hints": [
                    {"device": "tv", "force": true, "regex": "Opera TV Store"},
                    {"device": "smartphone", "os_families": ["Android"], "clients": ["Chrome Mobile"]},
                    {"device": "tablet", "os_families": ["Android"], "clients": ["Chrome"]},
                    {"device": "smartphone", "os": ["AND"], "os_version_below": "2.0"},
                    {"device": "tablet", "os": ["AND"], "os_version_min": "3.0", "os_version_below": "4.0"},
                    {"device": "tablet", "os": ["WIN"], "os_version_min": "8", "regex": "Touch"}
                ]
            }"#,
        )
        .unwrap();
        DeviceTypeHints::compile(&definition).unwrap()
    }

    fn os(short_name: &str, version: &str) -> OsInfo {
        OsInfo {
            name: short_name.to_owned(),
            short_name: short_name.to_owned(),
            version: version.to_owned(),
            platform: UNKNOWN.to_owned(),
        }
    }

    fn browser(name: &str, short_name: &str) -> ClientInfo {
        ClientInfo {
            client_type: ClientType::Browser,
            name: name.to_owned(),
            short_name: short_name.to_owned(),
            version: "34.0".to_owned(),
            engine: UNKNOWN.to_owned(),
            engine_version: UNKNOWN.to_owned(),
        }
    }

    #[test]
    fn test_device_rule_type_wins_over_soft_hints() {
        let hints = hints();
        let device_type = reconcile_device_type(
            "ua",
            Some(&os("AND", "4.4")),
            Some(&browser("Chrome", "CH")),
            Some(DeviceType::Phablet),
            &hints,
        );
        assert_eq!(device_type, DeviceType::Phablet);
    }

    #[test]
    fn test_forced_hint_wins_over_device_rules() {
        let hints = hints();
        let device_type = reconcile_device_type(
            "Opera TV Store/5581",
            Some(&os("LIN", "")),
            None,
            Some(DeviceType::Desktop),
            &hints,
        );
        assert_eq!(device_type, DeviceType::Tv);
    }

    #[test]
    fn test_client_hints() {
        let hints = hints();
        let android = os("AND", "4.4");
        let mobile = browser("Chrome Mobile", "CM");
        let chrome = browser("Chrome", "CH");
        assert_eq!(
            reconcile_device_type("ua", Some(&android), Some(&mobile), None, &hints),
            DeviceType::Smartphone
        );
        assert_eq!(
            reconcile_device_type("ua", Some(&android), Some(&chrome), None, &hints),
            DeviceType::Tablet
        );
    }

    #[test]
    fn test_os_version_ranges() {
        let hints = hints();
        for (version, expected) in [
            ("1.6", DeviceType::Smartphone),
            ("1", DeviceType::Smartphone),
            ("2.0", DeviceType::Unknown),
            ("3.2", DeviceType::Tablet),
            ("3", DeviceType::Tablet),
            ("4.0", DeviceType::Unknown),
            ("", DeviceType::Unknown),
        ] {
            assert_eq!(
                reconcile_device_type("ua", Some(&os("AND", version)), None, None, &hints),
                expected,
                "version: {version:?}"
            );
        }
    }

    #[test]
    fn test_hint_with_pattern() {
        let hints = hints();
        let windows = os("WIN", "8.1");
        assert_eq!(
            reconcile_device_type("Windows NT 6.3; Touch", Some(&windows), None, None, &hints),
            DeviceType::Tablet
        );
        assert_eq!(
            reconcile_device_type("Windows NT 6.3", Some(&windows), None, None, &hints),
            DeviceType::Desktop
        );
        assert_eq!(
            reconcile_device_type(
                "Windows NT 6.1; Touch",
                Some(&os("WIN", "7")),
                None,
                None,
                &hints
            ),
            DeviceType::Desktop
        );
    }

    #[test]
    fn test_desktop_fallback() {
        let hints = hints();
        let mac = os("MAC", "10.15");
        assert_eq!(
            reconcile_device_type("ua", Some(&mac), Some(&browser("Safari", "SF")), None, &hints),
            DeviceType::Desktop
        );
        assert_eq!(
            reconcile_device_type("ua", Some(&mac), Some(&browser("Chrome Mobile", "CM")), None, &hints),
            DeviceType::Unknown
        );
        assert_eq!(
            reconcile_device_type("ua", Some(&mac), None, Some(DeviceType::Unknown), &hints),
            DeviceType::Desktop
        );
    }

    #[test]
    fn test_nothing_known() {
        assert_eq!(
            reconcile_device_type("ua", None, None, None, &hints()),
            DeviceType::Unknown
        );
        assert_eq!(
            reconcile_device_type("ua", None, None, None, &DeviceTypeHints::default()),
            DeviceType::Unknown
        );
    }

    #[test]
    fn test_os_family() {
        let hints = hints();
        assert_eq!(hints.os_family("and"), Some("Android"));
        assert_eq!(hints.os_family("WIN"), Some("Windows"));
        assert_eq!(hints.os_family("UNK"), None);
    }
}
