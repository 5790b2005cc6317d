//! User agent classification engine.
//!
//! Classifies a `User-Agent` string into bot information or
//! the operating system, client and device behind it,
//! driven entirely by declarative rule data ([`rules::RuleSetDefinition`]).
//!
//! ```
//! # #[cfg(feature = "embed-rules")]
//! # {
//! use uadetect_engine::{DeviceDetector, DeviceType, load_embedded_rules};
//!
//! let detector = DeviceDetector::new(load_embedded_rules().unwrap());
//! let result = detector.classify(
//!     "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; WOW64; Trident/5.0)",
//! );
//! assert_eq!(result.os().name, "Windows");
//! assert_eq!(result.client().name, "Internet Explorer");
//! assert_eq!(result.device_type(), DeviceType::Desktop);
//! # }
//! ```
//!
//! # Pipeline
//!
//! A classification checks for bots first and stops there when one is found.
//! Otherwise the OS, client and device are classified independently,
//! after which the final device type is reconciled from the device rules,
//! [`DeviceTypeHints`] and the OS family.
//!
//! # Caching
//!
//! A [`DeviceDetector`] can be given a [`cache::CacheBackend`]
//! to reuse results of previously seen user agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

mod version;
pub use version::{VersionTruncation, compare_versions, truncate_version};

pub mod rules;
pub use rules::RuleSet;

mod result;
pub use result::{
    BotInfo, BotProducer, ClassificationResult, ClientInfo, DeviceInfo, OsInfo, UNKNOWN,
};

mod bot;
pub use bot::{BotDetection, BotParser};

mod os;
pub use os::OsParser;

mod client;
pub use client::{ClientParser, ClientType};

mod device;
pub use device::{
    DeviceMatch, DeviceParser, DeviceType, DeviceTypeHints, reconcile_device_type,
};

pub mod cache;

mod detector;
pub use detector::DeviceDetector;


#[cfg(feature = "embed-rules")]
mod embedded;
#[cfg(feature = "embed-rules")]
#[cfg_attr(docsrs, doc(cfg(feature = "embed-rules")))]
pub use embedded::{embedded_rules_definition, load_embedded_rules};
