//! Lazily populated cache of text recognized from diagram images.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use biostudy_model::RecognitionError;
use tracing::debug;

/// External text recognizer (an OCR engine, for example).
pub trait TextRecognizer: Send + Sync {
    /// Returns recognized text fragments for the image at `path`.
    fn recognize(&self, path: &Path) -> Result<Vec<String>, RecognitionError>;
}

/// Existence check consulted before any image read.
pub trait AssetProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetProbe;

impl AssetProbe for FsAssetProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Recognizer that never finds text. Used when no engine is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecognizer;

impl TextRecognizer for NoRecognizer {
    fn recognize(&self, _path: &Path) -> Result<Vec<String>, RecognitionError> {
        Ok(Vec::new())
    }
}

/// Maps image path to lower-cased recognized text.
///
/// Every outcome is cached, including the empty text produced for blank
/// paths, missing files and recognizer failures, so a path costs at most one
/// probe and one recognition for the lifetime of the cache. Different keys
/// may be populated concurrently; callers racing on the same key wait for a
/// single recognition.
pub struct ImageTextCache {
    recognizer: Arc<dyn TextRecognizer>,
    probe: Arc<dyn AssetProbe>,
    entries: Mutex<HashMap<String, Arc<OnceLock<String>>>>,
}

impl ImageTextCache {
    /// Cache backed by the filesystem probe.
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self::with_probe(recognizer, Arc::new(FsAssetProbe))
    }

    pub fn with_probe(recognizer: Arc<dyn TextRecognizer>, probe: Arc<dyn AssetProbe>) -> Self {
        Self {
            recognizer,
            probe,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cache that never recognizes anything.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoRecognizer))
    }

    /// Recognized text for `path`, lower-cased. Never fails.
    pub fn get_text(&self, path: &str) -> String {
        let cell = {
            let mut entries = self.lock();
            Arc::clone(entries.entry(path.to_string()).or_default())
        };
        cell.get_or_init(|| self.extract(path)).clone()
    }

    /// Cached text for `path` without populating the cache.
    pub fn peek(&self, path: &str) -> Option<String> {
        self.lock()
            .get(path)
            .and_then(|cell| cell.get().cloned())
    }

    /// Forgets every cached entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<OnceLock<String>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn extract(&self, path: &str) -> String {
        if path.trim().is_empty() {
            return String::new();
        }
        let asset = Path::new(path);
        if !self.probe.exists(asset) {
            debug!(path, "diagram not found, caching empty text");
            return String::new();
        }
        match self.recognizer.recognize(asset) {
            Ok(fragments) => {
                let text = fragments.join(" ").to_lowercase();
                debug!(path, chars = text.len(), "recognized diagram text");
                text
            }
            Err(error) => {
                debug!(path, %error, "text recognition failed, caching empty text");
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for ImageTextCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageTextCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRecognizer {
        calls: AtomicUsize,
        result: Result<Vec<&'static str>, &'static str>,
    }

    impl CountingRecognizer {
        fn ok(fragments: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                result: Ok(fragments),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                result: Err("corrupt image"),
            })
        }
    }

    impl TextRecognizer for CountingRecognizer {
        fn recognize(&self, path: &Path) -> Result<Vec<String>, RecognitionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(fragments) => Ok(fragments.iter().map(|s| (*s).to_string()).collect()),
                Err(message) => Err(RecognitionError::new(path, *message)),
            }
        }
    }

    struct AlwaysThere;

    impl AssetProbe for AlwaysThere {
        fn exists(&self, _path: &Path) -> bool {
            true
        }
    }

    #[test]
    fn test_fragments_joined_and_lowercased() {
        let recognizer = CountingRecognizer::ok(vec!["Taq", "POLYMERASE"]);
        let cache = ImageTextCache::with_probe(recognizer, Arc::new(AlwaysThere));
        assert_eq!(cache.get_text("pcr.png"), "taq polymerase");
    }

    #[test]
    fn test_recognizer_called_once_per_path() {
        let recognizer = CountingRecognizer::ok(vec!["helix"]);
        let cache = ImageTextCache::with_probe(recognizer.clone(), Arc::new(AlwaysThere));
        assert_eq!(cache.get_text("dna.png"), "helix");
        assert_eq!(cache.get_text("dna.png"), "helix");
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.peek("dna.png").as_deref(), Some("helix"));
    }

    #[test]
    fn test_failure_is_cached_as_empty() {
        let recognizer = CountingRecognizer::failing();
        let cache = ImageTextCache::with_probe(recognizer.clone(), Arc::new(AlwaysThere));
        assert_eq!(cache.get_text("broken.png"), "");
        assert_eq!(cache.get_text("broken.png"), "");
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_file_skips_recognizer() {
        let recognizer = CountingRecognizer::ok(vec!["never"]);
        let cache = ImageTextCache::new(recognizer.clone());
        assert_eq!(cache.get_text("/definitely/not/here.png"), "");
        assert_eq!(cache.get_text("/definitely/not/here.png"), "");
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_blank_path_is_cached_empty() {
        let recognizer = CountingRecognizer::ok(vec!["never"]);
        let cache = ImageTextCache::with_probe(recognizer.clone(), Arc::new(AlwaysThere));
        assert_eq!(cache.get_text(""), "");
        assert_eq!(cache.peek("").as_deref(), Some(""));
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clear_forces_recognition_again() {
        let recognizer = CountingRecognizer::ok(vec!["gel"]);
        let cache = ImageTextCache::with_probe(recognizer.clone(), Arc::new(AlwaysThere));
        cache.get_text("gel.png");
        cache.clear();
        assert!(cache.is_empty());
        cache.get_text("gel.png");
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_population_recognizes_once_per_key() {
        let recognizer = CountingRecognizer::ok(vec!["ribosome"]);
        let cache = ImageTextCache::with_probe(recognizer.clone(), Arc::new(AlwaysThere));
        let paths = ["a.png", "b.png", "c.png"];

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for path in paths {
                        assert_eq!(cache.get_text(path), "ribosome");
                    }
                });
            }
        });

        assert_eq!(recognizer.calls.load(Ordering::SeqCst), paths.len());
        assert_eq!(cache.len(), paths.len());
    }
}
