use std::path::Path;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::config::Config;
use crate::dictionary::WordDictionary;
use crate::error::LoadError;

/// Cloneable handle to one dictionary shared between threads.
///
/// Loads and unloads hold the write lock; checks and size queries share the
/// read lock and never observe a half-finished load.
#[derive(Clone, Debug)]
pub struct SharedDictionary(Arc<RwLock<WordDictionary>>);

impl SharedDictionary {
    pub fn new(dictionary: WordDictionary) -> Self {
        Self(Arc::new(RwLock::new(dictionary)))
    }

    pub fn with_config(config: &Config) -> Self {
        Self::new(WordDictionary::with_config(config))
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
        self.0.write().load(path)
    }

    pub fn load_str(&self, source: &str) -> Result<(), LoadError> {
        self.0.write().load_str(source)
    }

    pub fn check(&self, word: &str) -> bool {
        self.0.read().check(word)
    }

    pub fn size(&self) -> usize {
        self.0.read().size()
    }

    pub fn unload(&self) {
        self.0.write().unload();
    }

    /// Holds the read lock for a batch of lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, WordDictionary> {
        self.0.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn readers_on_many_threads() {
        let shared = SharedDictionary::new(WordDictionary::new(31, 45));
        shared.load_str("apple banana cherry").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let probe = if i % 2 == 0 { "APPLE" } else { "Cherry" };
                    (0..1000).all(|_| shared.check(probe) && !shared.check("grape"))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(shared.size(), 3);
    }

    #[test]
    fn writer_is_visible_to_every_clone() {
        let shared = SharedDictionary::with_config(&Config::default());
        let other = shared.clone();
        thread::spawn(move || other.load_str("late words").unwrap())
            .join()
            .unwrap();
        assert!(shared.check("LATE"));
        assert_eq!(shared.read().size(), 2);

        shared.unload();
        assert_eq!(shared.size(), 0);
        assert!(!shared.check("words"));
    }

    #[test]
    fn double_load_through_handle() {
        let shared = SharedDictionary::new(WordDictionary::new(3, 45));
        shared.load_str("one").unwrap();
        assert!(matches!(
            shared.load_str("two"),
            Err(LoadError::AlreadyLoaded)
        ));
    }
}
