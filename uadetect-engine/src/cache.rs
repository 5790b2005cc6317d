//! Caching of classification results.
//!
//! A [`DeviceDetector`] consults its [`CacheBackend`], if any,
//! before classifying a user agent. Cache failures are never fatal,
//! the result is simply recomputed.
//!
//! [`DeviceDetector`]: crate::DeviceDetector

use std::{fmt, sync::Arc, time::Duration};

use ahash::HashMap;
use parking_lot::RwLock;
use uadetect_error::{BoxError, ErrorContext};

use crate::{BotDetection, ClassificationResult, VersionTruncation};

/// Identifies a classification: the user agent together with
/// every option that influences the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    user_agent: Arc<str>,
    truncation: VersionTruncation,
    bot_detection: BotDetection,
}

impl CacheKey {
    pub fn new(
        user_agent: impl Into<Arc<str>>,
        truncation: VersionTruncation,
        bot_detection: BotDetection,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            truncation,
            bot_detection,
        }
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn truncation(&self) -> VersionTruncation {
        self.truncation
    }

    #[must_use]
    pub fn bot_detection(&self) -> BotDetection {
        self.bot_detection
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.truncation, self.bot_detection, self.user_agent
        )
    }
}

/// Storage for classification results.
pub trait CacheBackend: Send + Sync + 'static {
    /// Fetch a previously stored result.
    fn get(&self, key: &CacheKey) -> Result<Option<Arc<ClassificationResult>>, BoxError>;

    /// Store a result, replacing any previous one.
    fn set(&self, key: CacheKey, result: Arc<ClassificationResult>) -> Result<(), BoxError>;

    /// Whether a result is stored for the key.
    fn has(&self, key: &CacheKey) -> Result<bool, BoxError> {
        self.get(key).map(|result| result.is_some())
    }
}

impl<C: CacheBackend> CacheBackend for Arc<C> {
    fn get(&self, key: &CacheKey) -> Result<Option<Arc<ClassificationResult>>, BoxError> {
        (**self).get(key)
    }

    fn set(&self, key: CacheKey, result: Arc<ClassificationResult>) -> Result<(), BoxError> {
        (**self).set(key, result)
    }

    fn has(&self, key: &CacheKey) -> Result<bool, BoxError> {
        (**self).has(key)
    }
}

/// A [`CacheBackend`] that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct NoCache;

impl CacheBackend for NoCache {
    fn get(&self, _key: &CacheKey) -> Result<Option<Arc<ClassificationResult>>, BoxError> {
        Ok(None)
    }

    fn set(&self, _key: CacheKey, _result: Arc<ClassificationResult>) -> Result<(), BoxError> {
        Ok(())
    }

    fn has(&self, _key: &CacheKey) -> Result<bool, BoxError> {
        Ok(false)
    }
}

/// Unbounded in-process [`CacheBackend`], entries live as long as the cache.
#[derive(Debug, Default)]
pub struct StaticCache {
    entries: RwLock<HashMap<CacheKey, Arc<ClassificationResult>>>,
}

impl StaticCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount of stored results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove all stored results.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl CacheBackend for StaticCache {
    fn get(&self, key: &CacheKey) -> Result<Option<Arc<ClassificationResult>>, BoxError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: CacheKey, result: Arc<ClassificationResult>) -> Result<(), BoxError> {
        self.entries.write().insert(key, result);
        Ok(())
    }

    fn has(&self, key: &CacheKey) -> Result<bool, BoxError> {
        Ok(self.entries.read().contains_key(key))
    }
}

/// Bounded in-process [`CacheBackend`], evicting the least valuable entries
/// once full, optionally expiring entries after a time to live.
#[derive(Clone)]
pub struct MemoryCache {
    entries: moka::sync::Cache<CacheKey, Arc<ClassificationResult>>,
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.entries.entry_count())
            .finish()
    }
}

impl MemoryCache {
    /// Create a cache holding at most `max_capacity` results.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            entries: moka::sync::Cache::new(max_capacity),
        }
    }

    /// Create a cache holding at most `max_capacity` results,
    /// each for no longer than `time_to_live`.
    #[must_use]
    pub fn new_with_time_to_live(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            entries: moka::sync::Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &CacheKey) -> Result<Option<Arc<ClassificationResult>>, BoxError> {
        Ok(self.entries.get(key))
    }

    fn set(&self, key: CacheKey, result: Arc<ClassificationResult>) -> Result<(), BoxError> {
        self.entries.insert(key, result);
        Ok(())
    }

    fn has(&self, key: &CacheKey) -> Result<bool, BoxError> {
        Ok(self.entries.contains_key(key))
    }
}

/// A byte oriented key-value store, such as a file system directory
/// or an external cache server.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BoxError>;

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), BoxError>;

    fn has(&self, key: &str) -> Result<bool, BoxError> {
        self.get(key).map(|value| value.is_some())
    }
}

/// [`CacheBackend`] storing results as JSON in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct KeyValueCache<S> {
    store: S,
    prefix: String,
}

impl<S> KeyValueCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            prefix: String::new(),
        }
    }

    /// Prefix all keys written to the store.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Prefix all keys written to the store.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn store_key(&self, key: &CacheKey) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl<S: KeyValueStore> CacheBackend for KeyValueCache<S> {
    fn get(&self, key: &CacheKey) -> Result<Option<Arc<ClassificationResult>>, BoxError> {
        let Some(bytes) = self.store.get(&self.store_key(key))? else {
            return Ok(None);
        };
        let result: ClassificationResult =
            serde_json::from_slice(&bytes).context("decode cached classification result")?;
        Ok(Some(Arc::new(result)))
    }

    fn set(&self, key: CacheKey, result: Arc<ClassificationResult>) -> Result<(), BoxError> {
        let bytes =
            serde_json::to_vec(result.as_ref()).context("encode classification result")?;
        self.store.set(&self.store_key(&key), bytes)
    }

    fn has(&self, key: &CacheKey) -> Result<bool, BoxError> {
        self.store.has(&self.store_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BotInfo, DeviceInfo, DeviceType, UNKNOWN};

    #[derive(Debug, Default)]
    struct MapStore(RwLock<HashMap<String, Vec<u8>>>);

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BoxError> {
            Ok(self.0.read().get(key).cloned())
        }

        fn set(&self, key: &str, value: Vec<u8>) -> Result<(), BoxError> {
            self.0.write().insert(key.to_owned(), value);
            Ok(())
        }
    }

    fn key(ua: &str) -> CacheKey {
        CacheKey::new(ua, VersionTruncation::Minor, BotDetection::Full)
    }

    fn result(ua: &str) -> Arc<ClassificationResult> {
        Arc::new(ClassificationResult::agent(
            ua,
            None,
            None,
            DeviceInfo {
                device_type: DeviceType::Tablet,
                brand: "Archos".to_owned(),
                model: "101 PLATINUM".to_owned(),
            },
        ))
    }

    fn exercise(cache: &dyn CacheBackend) {
        let ua = "Mozilla/5.0 (Linux; Android 4.2.2; ARCHOS 101 PLATINUM Build/JDQ39)";
        assert!(cache.get(&key(ua)).unwrap().is_none());
        assert!(!cache.has(&key(ua)).unwrap());

        cache.set(key(ua), result(ua)).unwrap();
        assert!(cache.has(&key(ua)).unwrap());
        assert_eq!(cache.get(&key(ua)).unwrap().unwrap(), result(ua));

        let other = CacheKey::new(ua, VersionTruncation::Major, BotDetection::Full);
        assert!(!cache.has(&other).unwrap());
    }

    #[test]
    fn test_static_cache() {
        let cache = StaticCache::new();
        exercise(&cache);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_memory_cache() {
        exercise(&MemoryCache::new(16));
        exercise(&MemoryCache::new_with_time_to_live(16, Duration::from_secs(60)));
    }

    #[test]
    fn test_key_value_cache() {
        let cache = KeyValueCache::new(MapStore::default()).with_prefix("ua:");
        exercise(&cache);
        assert!(
            cache
                .store()
                .0
                .read()
                .keys()
                .all(|key| key.starts_with("ua:minor:full:"))
        );
    }

    #[test]
    fn test_key_value_cache_bot_result() {
        let cache = KeyValueCache::new(MapStore::default());
        let bot = Arc::new(ClassificationResult::bot("Googlebot/2.1", BotInfo::discarded()));
        cache.set(key("Googlebot/2.1"), bot.clone()).unwrap();
        let cached = cache.get(&key("Googlebot/2.1")).unwrap().unwrap();
        assert_eq!(cached, bot);
        assert!(cached.is_bot());
        assert_eq!(cached.bot_info().unwrap().name, UNKNOWN);
    }

    #[test]
    fn test_key_value_cache_corrupt_entry() {
        let store = MapStore::default();
        store.set("minor:full:ua", b"not json".to_vec()).unwrap();
        let cache = KeyValueCache::new(store);
        let err = cache.get(&key("ua")).unwrap_err();
        assert!(err.to_string().contains("decode cached classification result"));
    }

    #[test]
    fn test_no_cache() {
        let cache = NoCache;
        cache.set(key("ua"), result("ua")).unwrap();
        assert!(cache.get(&key("ua")).unwrap().is_none());
        assert!(!cache.has(&key("ua")).unwrap());
    }

    #[test]
    fn test_cache_key_display() {
        let key = CacheKey::new("curl/8.0", VersionTruncation::None, BotDetection::Skip);
        assert_eq!(key.to_string(), "none:skip:curl/8.0");
        assert_eq!(key.user_agent(), "curl/8.0");
    }

    #[test]
    fn test_key_value_cache_stores_display_key() {
        let cache = KeyValueCache::new(MapStore::default()).with_prefix("ua:");
        let key = CacheKey::new("curl/8.0", VersionTruncation::Patch, BotDetection::Skip);
        cache.set(key.clone(), result("curl/8.0")).unwrap();
        let keys: Vec<String> = cache.store().0.read().keys().cloned().collect();
        assert_eq!(keys, [format!("ua:{key}")]);
        assert_eq!(keys[0], "ua:patch:skip:curl/8.0");
    }
}
