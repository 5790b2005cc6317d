use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use uadetect_error::OpaqueError;
use uadetect_utils::macros::match_ignore_ascii_case_str;

use crate::{
    UNKNOWN,
    rules::{DeviceFamilyDefinition, Pattern, compile_pattern},
};

mod hints;
pub use hints::{DeviceTypeHints, reconcile_device_type};

/// Form factor of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Desktop,
    Smartphone,
    Tablet,
    FeaturePhone,
    Console,
    Tv,
    CarBrowser,
    SmartDisplay,
    Camera,
    PortableMediaPlayer,
    Phablet,
    Unknown,
}

impl DeviceType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Smartphone => "smartphone",
            Self::Tablet => "tablet",
            Self::FeaturePhone => "feature phone",
            Self::Console => "console",
            Self::Tv => "tv",
            Self::CarBrowser => "car browser",
            Self::SmartDisplay => "smart display",
            Self::Camera => "camera",
            Self::PortableMediaPlayer => "portable media player",
            Self::Phablet => "phablet",
            Self::Unknown => UNKNOWN,
        }
    }

    /// Handheld and other devices carried around.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        matches!(
            self,
            Self::Smartphone
                | Self::Tablet
                | Self::FeaturePhone
                | Self::Phablet
                | Self::Camera
                | Self::PortableMediaPlayer
        )
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_ignore_ascii_case_str! {
            match (s) {
                "desktop" => Ok(Self::Desktop),
                "smartphone" => Ok(Self::Smartphone),
                "tablet" => Ok(Self::Tablet),
                "feature phone" | "featurephone" => Ok(Self::FeaturePhone),
                "console" => Ok(Self::Console),
                "tv" => Ok(Self::Tv),
                "car browser" | "carbrowser" => Ok(Self::CarBrowser),
                "smart display" | "smartdisplay" => Ok(Self::SmartDisplay),
                "camera" => Ok(Self::Camera),
                "portable media player" | "portablemediaplayer" => Ok(Self::PortableMediaPlayer),
                "phablet" => Ok(Self::Phablet),
                "unk" | "unknown" => Ok(Self::Unknown),
                _ => Err(OpaqueError::from_display(format!("invalid device type: {s}"))),
            }
        }
    }
}

impl Serialize for DeviceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

/// Brand, model and device type candidate found by the [`DeviceParser`].
///
/// The final device type is only known after [`reconcile_device_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMatch {
    pub brand: String,
    pub model: String,
    pub device_type: Option<DeviceType>,
}

/// Detects device brand, model and type, family by family.
#[derive(Debug, Clone)]
pub struct DeviceParser {
    families: Vec<DeviceFamily>,
}

#[derive(Debug, Clone)]
struct DeviceFamily {
    name: String,
    gate: Option<Pattern>,
    device_type: Option<DeviceType>,
    brands: Vec<BrandRule>,
}

#[derive(Debug, Clone)]
struct BrandRule {
    brand: String,
    pattern: Pattern,
    device_type: Option<DeviceType>,
    model: Option<String>,
    models: Vec<ModelRule>,
}

#[derive(Debug, Clone)]
struct ModelRule {
    pattern: Pattern,
    model: Option<String>,
    device_type: Option<DeviceType>,
    brand: Option<String>,
}

impl DeviceParser {
    pub(crate) fn compile(definitions: &[DeviceFamilyDefinition]) -> Result<Self, OpaqueError> {
        let families = definitions
            .iter()
            .map(|family| {
                let category = format!("{} device", family.family);
                let gate = family
                    .gate
                    .as_deref()
                    .map(|gate| compile_pattern(&format!("{} gate", family.family), 0, gate, true))
                    .transpose()?;
                let brands = family
                    .brands
                    .iter()
                    .enumerate()
                    .map(|(index, (brand, def))| {
                        let models = def
                            .models
                            .iter()
                            .enumerate()
                            .map(|(model_index, model)| {
                                Ok(ModelRule {
                                    pattern: compile_pattern(
                                        &format!("{brand} model"),
                                        model_index,
                                        &model.regex,
                                        true,
                                    )?,
                                    model: model.model.clone(),
                                    device_type: model.device,
                                    brand: model.brand.clone(),
                                })
                            })
                            .collect::<Result<_, OpaqueError>>()?;
                        Ok(BrandRule {
                            brand: brand.clone(),
                            pattern: compile_pattern(&category, index, &def.regex, true)?,
                            device_type: def.device,
                            model: def.model.clone(),
                            models,
                        })
                    })
                    .collect::<Result<_, OpaqueError>>()?;
                Ok(DeviceFamily {
                    name: family.family.clone(),
                    gate,
                    device_type: family.device,
                    brands,
                })
            })
            .collect::<Result<_, OpaqueError>>()?;
        Ok(Self { families })
    }

    /// Device match of the first family that recognizes `ua`.
    ///
    /// A family whose gate does not match is skipped entirely.
    /// A gated family whose gate matches always produces a match,
    /// with unknown brand and model if no brand rule matched.
    #[must_use]
    pub fn parse(&self, ua: &str) -> Option<DeviceMatch> {
        self.families.iter().find_map(|family| {
            if let Some(gate) = &family.gate
                && !gate.is_match(ua)
            {
                return None;
            }
            let found = family.brands.iter().find_map(|brand| brand.parse(ua));
            match found {
                Some(mut found) => {
                    found.device_type = found.device_type.or(family.device_type);
                    tracing::trace!(family = %family.name, brand = %found.brand, "device family matched");
                    Some(found)
                }
                None if family.gate.is_some() => Some(DeviceMatch {
                    brand: UNKNOWN.to_owned(),
                    model: UNKNOWN.to_owned(),
                    device_type: family.device_type,
                }),
                None => None,
            }
        })
    }
}

impl BrandRule {
    fn parse(&self, ua: &str) -> Option<DeviceMatch> {
        let captures = self.pattern.captures(ua)?;
        let brand = if self.brand.eq_ignore_ascii_case("unknown") {
            UNKNOWN.to_owned()
        } else {
            self.brand.clone()
        };

        let model_match = self.models.iter().find_map(|rule| {
            rule.pattern
                .captures(ua)
                .map(|captures| (rule, captures))
        });
        let found = match model_match {
            Some((rule, captures)) => DeviceMatch {
                brand: rule.brand.clone().unwrap_or(brand),
                model: rule
                    .model
                    .as_deref()
                    .map(|template| captures.model(template))
                    .unwrap_or_else(|| UNKNOWN.to_owned()),
                device_type: rule.device_type.or(self.device_type),
            },
            None => DeviceMatch {
                brand,
                model: self
                    .model
                    .as_deref()
                    .map(|template| captures.model(template))
                    .unwrap_or_else(|| UNKNOWN.to_owned()),
                device_type: self.device_type,
            },
        };
        Some(found)
    }
}
