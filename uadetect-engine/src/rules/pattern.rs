use regex::Regex;
use uadetect_utils::str::strip_suffix_ignore_ascii_case;

use crate::{UNKNOWN, VersionTruncation};

/// A compiled signature.
///
/// Bounded patterns only match at the start of the user agent
/// or when not glued to a preceding token, e.g. `Nexus 4` matches
/// `"Android 4.4.2; Nexus 4 Build"` but `LG` does not match `"BLG"`.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub(crate) fn bounded(rule: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"(?i)(?:^|[^A-Z0-9\-_]|[^A-Z0-9\-]_|sprd-)(?:{rule})"
        ))?;
        Ok(Self { regex })
    }

    pub(crate) fn unbounded(rule: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("(?i)(?:{rule})"))?;
        Ok(Self { regex })
    }

    pub(crate) fn is_match(&self, ua: &str) -> bool {
        self.regex.is_match(ua)
    }

    pub(crate) fn captures<'h>(&self, ua: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(ua).map(Captures)
    }
}

/// Capture groups of a matched [`Pattern`].
#[derive(Debug)]
pub(crate) struct Captures<'h>(regex::Captures<'h>);

impl Captures<'_> {
    /// Text of capture group `index`, empty if it did not participate.
    pub(crate) fn group(&self, index: usize) -> &str {
        self.0.get(index).map(|m| m.as_str()).unwrap_or_default()
    }

    /// Replace the `$1`..`$9` placeholders of `template`
    /// by their capture group, trimming the result.
    pub(crate) fn interpolate(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '$'
                && let Some(index) = chars
                    .peek()
                    .and_then(|d| d.to_digit(10))
                    .filter(|d| *d > 0)
            {
                chars.next();
                out.push_str(self.group(index as usize));
            } else {
                out.push(c);
            }
        }
        out.trim().to_owned()
    }

    /// Interpolate and normalize a version template,
    /// underscores become dots, surrounding dots and spaces are dropped.
    pub(crate) fn version(&self, template: &str, truncation: VersionTruncation) -> String {
        let version = self.interpolate(template).replace('_', ".");
        let version = version.trim_matches(|c: char| c == ' ' || c == '.');
        truncation.truncate(version).into_owned()
    }

    /// Interpolate and normalize a model template.
    ///
    /// Returns [`UNKNOWN`] for empty models or the `Build` marker
    /// that some vendors put where the model is expected.
    pub(crate) fn model(&self, template: &str) -> String {
        let model = self.interpolate(template).replace('_', " ");
        let model = strip_suffix_ignore_ascii_case(&model, " TD").unwrap_or(&model);
        let model = model.trim();
        if model.is_empty() || model.eq_ignore_ascii_case("build") {
            UNKNOWN.to_owned()
        } else {
            model.to_owned()
        }
    }
}

/// Interpolate an optional template, defaulting to [`UNKNOWN`]
/// when absent or when it interpolates to nothing.
pub(crate) fn interpolate_or_unknown(captures: &Captures<'_>, template: Option<&str>) -> String {
    template
        .map(|template| captures.interpolate(template))
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture<'h>(rule: &str, ua: &'h str) -> Captures<'h> {
        Pattern::bounded(rule).unwrap().captures(ua).unwrap()
    }

    #[test]
    fn test_bounded_pattern_requires_token_boundary() {
        let pattern = Pattern::bounded("LG").unwrap();
        assert!(pattern.is_match("LG-E610"));
        assert!(pattern.is_match("Mozilla/5.0 (Linux; LG-E610)"));
        assert!(pattern.is_match("mozilla/5.0 (linux; lg-e610)"));
        assert!(!pattern.is_match("BLG-E610"));
        assert!(!pattern.is_match("X-LG"));
        assert!(!pattern.is_match("_LG"));
        assert!(pattern.is_match("sprd-LG"));
    }

    #[test]
    fn test_unbounded_pattern() {
        let pattern = Pattern::unbounded(r"rv:(\d+(?:\.\d+)*)").unwrap();
        let captures = pattern.captures("Windows NT 6.1; rv:12.0) Gecko").unwrap();
        assert_eq!(captures.group(1), "12.0");
    }

    #[test]
    fn test_interpolate() {
        let captures = capture(r"Chrome/(\d+)\.(\d+)", "Chrome/34.0.1847");
        for (template, expected) in [
            ("Chrome", "Chrome"),
            ("$1", "34"),
            ("$1.$2", "34.0"),
            (" $1 ", "34"),
            ("$3", ""),
            ("v$2$1", "v034"),
            ("$$1", "$34"),
            ("$0", "$0"),
            ("$", "$"),
        ] {
            assert_eq!(captures.interpolate(template), expected, "template: {template:?}");
        }
    }

    #[test]
    fn test_version_normalization() {
        let captures = capture(r"Mac OS X (\d+(?:[_.]\d+)+)", "Intel Mac OS X 10_15_7)");
        assert_eq!(captures.version("$1", VersionTruncation::None), "10.15.7");
        assert_eq!(captures.version("$1", VersionTruncation::Minor), "10.15");
        assert_eq!(captures.version("$1", VersionTruncation::Major), "10");

        let captures = capture(r"Foo/([\d.]+)", "Foo/3.1.");
        assert_eq!(captures.version("$1", VersionTruncation::None), "3.1");
        assert_eq!(captures.version(" 7 ", VersionTruncation::None), "7");
    }

    #[test]
    fn test_model_normalization() {
        let captures = capture(r"ARCHOS ([^/;]+?)(?: Build|[;)])", "ARCHOS 101_PLATINUM Build/JDQ39");
        assert_eq!(captures.model("$1"), "101 PLATINUM");

        let captures = capture(r"Lenovo ([^/;]+)", "Lenovo A1 TD;");
        assert_eq!(captures.model("$1"), "A1");

        let captures = capture(r"Vendor ([^/;]+)", "Vendor Build/XYZ");
        assert_eq!(captures.model("$1"), UNKNOWN);
        assert_eq!(captures.model("$2"), UNKNOWN);
    }

    #[test]
    fn test_interpolate_or_unknown() {
        let captures = capture(r"Googlebot(?:/(\d+))?", "Googlebot");
        assert_eq!(interpolate_or_unknown(&captures, Some("Googlebot")), "Googlebot");
        assert_eq!(interpolate_or_unknown(&captures, Some("$1")), UNKNOWN);
        assert_eq!(interpolate_or_unknown(&captures, None), UNKNOWN);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Pattern::bounded("Chrome/(").is_err());
        assert!(Pattern::unbounded("[a-").is_err());
    }
}
