//! User agent device detection for the 🦀 Rust language.
//!
//! `uadetect` classifies a `User-Agent` string into either the bot behind it,
//! or the operating system, client software and device it identifies,
//! with version numbers normalized to a configurable precision.
//!
//! | category | support list |
//! |-|-|
//! | ✅ [bots](crate::ua::BotParser) | ✅ name, category, url and producer ⸱ ✅ [discard or skip](crate::ua::BotDetection) |
//! | ✅ [operating systems](crate::ua::OsParser) | ✅ name and short name ⸱ ✅ version ⸱ ✅ platform |
//! | ✅ [clients](crate::ua::ClientParser) | ✅ browsers and their engines ⸱ ✅ mobile apps ⸱ ✅ media players ⸱ ✅ feed readers ⸱ ✅ PIMs ⸱ ✅ libraries |
//! | ✅ [devices](crate::ua::DeviceParser) | ✅ brand and model ⸱ ✅ [device type reconciliation](crate::ua::reconcile_device_type) |
//! | ✅ [caching](crate::ua::cache) | ✅ static ⸱ ✅ bounded in-memory ⸱ ✅ external key-value stores |
//! | ✅ utilities | ✅ [error handling](crate::error) ⸱ ✅ [telemetry](crate::telemetry) |
//!
//! The classification is driven by declarative rule data,
//! see [`RuleSetDefinition`](crate::ua::rules::RuleSetDefinition).
//! A curated rule set is embedded when the `embed-rules` feature is enabled (default).
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "embed-rules")]
//! # {
//! use uadetect::ua::{DeviceDetector, VersionTruncation, cache::MemoryCache, load_embedded_rules};
//!
//! let detector = DeviceDetector::new(load_embedded_rules().unwrap())
//!     .with_version_truncation(VersionTruncation::Major)
//!     .with_cache(MemoryCache::new(1024));
//!
//! let result = detector.classify(
//!     "Mozilla/5.0 (Linux; Android 4.4.2; Nexus 4 Build/KOT49H) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/33.0.1750.136 Mobile Safari/537.36",
//! );
//! assert!(result.is_mobile());
//! assert_eq!(result.os().version, "4");
//! assert_eq!(result.client().name, "Chrome Mobile");
//! assert_eq!(result.device().model, "Nexus 4");
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

pub mod error {
    //! Error types and utilities, re-exported from `uadetect-error`.

    pub use ::uadetect_error::*;
}

pub mod utils {
    //! Utilities, re-exported from `uadetect-utils`.

    pub use ::uadetect_utils::*;
}

pub mod telemetry;

pub mod ua {
    //! User agent classification, re-exported from `uadetect-engine`.

    pub use ::uadetect_engine::*;
}
