use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use uadetect::ua::{ClassificationResult, RuleSet, load_embedded_rules};

pub(crate) static RULES: LazyLock<Arc<RuleSet>> =
    LazyLock::new(|| Arc::new(load_embedded_rules().unwrap()));

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Expected classification records, classified with the default truncation.
pub(crate) fn load_fixture(name: &str) -> Vec<ClassificationResult> {
    let path = fixture_path(name);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()));
    serde_json::from_str(&data)
        .unwrap_or_else(|err| panic!("parse fixture {}: {err}", path.display()))
}

/// Raw JSON of a fixture file, as written on disk.
pub(crate) fn load_fixture_json(name: &str) -> serde_json::Value {
    let path = fixture_path(name);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()));
    serde_json::from_str(&data)
        .unwrap_or_else(|err| panic!("parse fixture {}: {err}", path.display()))
}
