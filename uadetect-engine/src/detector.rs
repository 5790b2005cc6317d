use std::{fmt, sync::Arc};

use uadetect_error::root_cause;

use crate::{
    BotDetection, BotInfo, ClassificationResult, DeviceInfo, RuleSet, UNKNOWN, VersionTruncation,
    cache::{CacheBackend, CacheKey},
    reconcile_device_type,
};

/// Classifies user agents with a compiled [`RuleSet`].
///
/// Cloning is cheap, the rule set and cache are shared.
/// Each classification runs the stages
/// bot check, OS, client, device and device type reconciliation in order,
/// consulting the cache (if any) first.
#[derive(Clone)]
pub struct DeviceDetector {
    rules: Arc<RuleSet>,
    version_truncation: VersionTruncation,
    bot_detection: BotDetection,
    cache: Option<Arc<dyn CacheBackend>>,
}

impl fmt::Debug for DeviceDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDetector")
            .field("version_truncation", &self.version_truncation)
            .field("bot_detection", &self.bot_detection)
            .field("cache", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl DeviceDetector {
    /// Create a detector with [`VersionTruncation::Minor`],
    /// full bot detection and no cache.
    pub fn new(rules: impl Into<Arc<RuleSet>>) -> Self {
        Self {
            rules: rules.into(),
            version_truncation: VersionTruncation::default(),
            bot_detection: BotDetection::default(),
            cache: None,
        }
    }

    /// Set the default [`VersionTruncation`].
    #[must_use]
    pub fn with_version_truncation(mut self, truncation: VersionTruncation) -> Self {
        self.version_truncation = truncation;
        self
    }

    /// Set the default [`VersionTruncation`].
    pub fn set_version_truncation(&mut self, truncation: VersionTruncation) -> &mut Self {
        self.version_truncation = truncation;
        self
    }

    /// Set how bots are handled.
    #[must_use]
    pub fn with_bot_detection(mut self, bot_detection: BotDetection) -> Self {
        self.bot_detection = bot_detection;
        self
    }

    /// Set how bots are handled.
    pub fn set_bot_detection(&mut self, bot_detection: BotDetection) -> &mut Self {
        self.bot_detection = bot_detection;
        self
    }

    /// Attach a [`CacheBackend`].
    #[must_use]
    pub fn with_cache(mut self, cache: impl CacheBackend) -> Self {
        let cache: Arc<dyn CacheBackend> = Arc::new(cache);
        self.cache = Some(cache);
        self
    }

    /// Attach a [`CacheBackend`].
    pub fn set_cache(&mut self, cache: impl CacheBackend) -> &mut Self {
        let cache: Arc<dyn CacheBackend> = Arc::new(cache);
        self.cache = Some(cache);
        self
    }

    /// Attach a shared [`CacheBackend`].
    #[must_use]
    pub fn with_shared_cache(mut self, cache: Arc<dyn CacheBackend>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Remove the [`CacheBackend`], if any.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// Remove the [`CacheBackend`], if any.
    pub fn unset_cache(&mut self) -> &mut Self {
        self.cache = None;
        self
    }

    #[must_use]
    pub fn cache(&self) -> Option<&Arc<dyn CacheBackend>> {
        self.cache.as_ref()
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn version_truncation(&self) -> VersionTruncation {
        self.version_truncation
    }

    #[must_use]
    pub fn bot_detection(&self) -> BotDetection {
        self.bot_detection
    }

    /// Classify `ua` with the configured [`VersionTruncation`].
    #[must_use]
    pub fn classify(&self, ua: &str) -> Arc<ClassificationResult> {
        self.classify_with_truncation(ua, self.version_truncation)
    }

    /// Classify `ua` with an explicit [`VersionTruncation`].
    #[must_use]
    pub fn classify_with_truncation(
        &self,
        ua: &str,
        truncation: VersionTruncation,
    ) -> Arc<ClassificationResult> {
        let Some(cache) = &self.cache else {
            return Arc::new(self.run(ua, truncation));
        };

        let key = CacheKey::new(ua, truncation, self.bot_detection);
        match cache.get(&key) {
            Ok(Some(result)) => {
                tracing::trace!(user_agent.original = %ua, "classification cache hit");
                return result;
            }
            Ok(None) => (),
            Err(err) => {
                tracing::debug!(
                    user_agent.original = %ua,
                    error.root_cause = %root_cause(&*err),
                    "classification cache lookup failed, recomputing: {err}"
                );
                return Arc::new(self.run(ua, truncation));
            }
        }

        let result = Arc::new(self.run(ua, truncation));
        if let Err(err) = cache.set(key, result.clone()) {
            tracing::debug!(
                user_agent.original = %ua,
                error.root_cause = %root_cause(&*err),
                "failed to store classification result: {err}"
            );
        }
        result
    }

    /// Whether a result for `ua`, classified with the current settings, is cached.
    #[must_use]
    pub fn is_cached(&self, ua: &str) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };
        let key = CacheKey::new(ua, self.version_truncation, self.bot_detection);
        cache.has(&key).unwrap_or_else(|err| {
            tracing::debug!(
                user_agent.original = %ua,
                error.root_cause = %root_cause(&*err),
                "classification cache lookup failed: {err}"
            );
            false
        })
    }

    fn run(&self, ua: &str, truncation: VersionTruncation) -> ClassificationResult {
        if self.bot_detection != BotDetection::Skip
            && let Some(bot) = self.rules.bots().parse(ua)
        {
            tracing::trace!(user_agent.original = %ua, bot.name = %bot.name, "bot detected");
            let bot = match self.bot_detection {
                BotDetection::DiscardInfo => BotInfo::discarded(),
                BotDetection::Full | BotDetection::Skip => bot,
            };
            return ClassificationResult::bot(ua, bot);
        }

        let os = self.rules.os().parse(ua, truncation);
        let client = self.rules.clients().parse(ua, truncation);
        let candidate = self.rules.devices().parse(ua);
        let device_type = reconcile_device_type(
            ua,
            os.as_ref(),
            client.as_ref(),
            candidate.as_ref().and_then(|found| found.device_type),
            self.rules.device_type_hints(),
        );
        let device = match candidate {
            Some(found) => DeviceInfo {
                device_type,
                brand: found.brand,
                model: found.model,
            },
            None => DeviceInfo {
                device_type,
                brand: UNKNOWN.to_owned(),
                model: UNKNOWN.to_owned(),
            },
        };
        tracing::trace!(
            user_agent.original = %ua,
            os.name = os.as_ref().map_or(UNKNOWN, |os| os.name.as_str()),
            client.name = client.as_ref().map_or(UNKNOWN, |client| client.name.as_str()),
            device.device_type = %device.device_type,
            "user agent classified"
        );
        ClassificationResult::agent(ua, os, client, device)
    }
}
