use std::sync::LazyLock;

use divan::AllocProfiler;
use uadetect::ua::{DeviceDetector, VersionTruncation, cache::MemoryCache, load_embedded_rules};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

static DETECTOR: LazyLock<DeviceDetector> =
    LazyLock::new(|| DeviceDetector::new(load_embedded_rules().unwrap()));

const USER_AGENTS: [&str; 5] = [
    "curl/7.68.0",
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.67",
    "Mozilla/5.0 (Linux; Android 4.4.2; Nexus 4 Build/KOT49H) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/33.0.1750.136 Mobile Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:125.0) Gecko/20100101 Firefox/125.0",
];

fn main() {
    // Run registered benchmarks.
    divan::main();
}

#[divan::bench]
fn compile_embedded_rules() {
    let _ = divan::black_box(load_embedded_rules());
}

#[divan::bench(args = USER_AGENTS)]
fn classify(ua: &str) {
    let _ = DETECTOR.classify_with_truncation(divan::black_box(ua), VersionTruncation::Minor);
}

#[divan::bench(args = USER_AGENTS)]
fn classify_cached(bencher: divan::Bencher<'_, '_>, ua: &str) {
    let detector = DETECTOR.clone().with_cache(MemoryCache::new(16));
    let _ = detector.classify(ua);
    bencher.bench_local(|| detector.classify(divan::black_box(ua)));
}
