use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use uadetect_error::OpaqueError;
use uadetect_utils::macros::match_ignore_ascii_case_str;

/// Precision to which an extracted dotted version is reduced
/// before it ends up in a [`ClassificationResult`].
///
/// [`ClassificationResult`]: crate::ClassificationResult
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VersionTruncation {
    /// Keep the version as extracted.
    None,
    /// Keep all numeric segments, drop a trailing non-numeric build qualifier.
    Build,
    /// Keep at most three segments (`major.minor.patch`).
    Patch,
    /// Keep at most two segments (`major.minor`).
    #[default]
    Minor,
    /// Keep only the major segment.
    Major,
}

impl VersionTruncation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Build => "build",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }

    /// Maximum amount of dot-separated segments retained, if capped.
    fn max_segments(self) -> Option<usize> {
        match self {
            Self::None | Self::Build => None,
            Self::Patch => Some(3),
            Self::Minor => Some(2),
            Self::Major => Some(1),
        }
    }

    /// Truncate `version` according to this policy.
    ///
    /// See [`truncate_version`].
    #[must_use]
    pub fn truncate<'a>(self, version: &'a str) -> Cow<'a, str> {
        truncate_version(version, self)
    }
}

impl fmt::Display for VersionTruncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VersionTruncation {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_ignore_ascii_case_str! {
            match (s) {
                "none" => Ok(Self::None),
                "build" => Ok(Self::Build),
                "patch" => Ok(Self::Patch),
                "minor" => Ok(Self::Minor),
                "major" => Ok(Self::Major),
                _ => Err(OpaqueError::from_display(format!("invalid version truncation: {s}"))),
            }
        }
    }
}

impl Serialize for VersionTruncation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VersionTruncation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

/// Truncate a dot-separated `version` to the precision of `policy`.
///
/// Never pads: a version with fewer segments than the policy allows
/// is returned unchanged. Malformed versions pass through as well,
/// only the segment count is ever looked at, except for
/// [`VersionTruncation::Build`] which drops trailing segments
/// that are not purely numeric (the first segment is always kept).
#[must_use]
pub fn truncate_version(version: &str, policy: VersionTruncation) -> Cow<'_, str> {
    match policy {
        VersionTruncation::None => Cow::Borrowed(version),
        VersionTruncation::Build => {
            let mut end = version.len();
            while let Some(dot) = version[..end].rfind('.') {
                let segment = &version[dot + 1..end];
                if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                    break;
                }
                end = dot;
            }
            Cow::Borrowed(&version[..end])
        }
        VersionTruncation::Patch | VersionTruncation::Minor | VersionTruncation::Major => {
            let Some(max) = policy.max_segments() else {
                return Cow::Borrowed(version);
            };
            match version.match_indices('.').nth(max - 1) {
                Some((dot, _)) => Cow::Borrowed(&version[..dot]),
                None => Cow::Borrowed(version),
            }
        }
    }
}

/// Compare two dot-separated versions segment by segment.
///
/// Each segment is compared by its leading digits (no digits counts as `0`),
/// a missing segment counts as `0` as well, so `"4"` and `"4.0"` are equal.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut lhs = a.split('.');
    let mut rhs = b.split('.');
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let ordering = segment_value(l.unwrap_or_default())
                    .cmp(&segment_value(r.unwrap_or_default()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn segment_value(segment: &str) -> u64 {
    segment
        .trim()
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}
