//! Case-insensitive word dictionary backed by a fixed-size chained hash table.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::config::Config;
use crate::error::LoadError;

/// Polynomial rolling hash over the ASCII-lowercased bytes of `word`,
/// reduced to a bucket index in `0..bucket_count`.
///
/// The accumulator wraps at 32 bits. Bytes above 0x7f are folded as signed
/// 8-bit values, which keeps bucket placement identical to the reference
/// table for non-ASCII input.
///
/// Panics if `bucket_count` is zero.
pub fn hash<W: AsRef<[u8]>>(word: W, bucket_count: usize) -> usize {
    let hash_val = word.as_ref().iter().fold(0u32, |acc, &byte| {
        let lower = byte.to_ascii_lowercase() as i8 as u32;
        acc.wrapping_mul(31).wrapping_add(lower)
    });
    hash_val as usize % bucket_count
}

// Separators of a word list: C `isspace`, vertical tab included.
fn is_separator(byte: &u8) -> bool {
    matches!(*byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

fn words(source: &[u8]) -> impl Iterator<Item = &[u8]> {
    source.split(is_separator).filter(|word| !word.is_empty())
}

struct Entry {
    text: Box<[u8]>,
    next: Option<Box<Entry>>,
}

/// Words hanging off one bucket, most recently loaded first.
pub struct Chain<'a> {
    cursor: Option<&'a Entry>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor?;
        self.cursor = entry.next.as_deref();
        Some(&*entry.text)
    }
}

pub struct WordDictionary {
    buckets: Vec<Option<Box<Entry>>>,
    loaded_count: usize,
    max_word_length: usize,
    loaded: bool,
}

impl WordDictionary {
    /// Creates an empty table with `bucket_count` chains.
    ///
    /// Panics if `bucket_count` is zero.
    pub fn new(bucket_count: usize, max_word_length: usize) -> Self {
        assert!(bucket_count > 0, "a dictionary needs at least one bucket");
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);
        Self {
            buckets,
            loaded_count: 0,
            max_word_length,
            loaded: false,
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self::new(config.bucket_count, config.max_word_length)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Loads every whitespace-separated word of the file at `path`.
    ///
    /// Words are stored byte for byte; the file does not need to be UTF-8.
    ///
    /// On failure the words read so far stay loaded; call [`unload`] to
    /// discard them.
    ///
    /// [`unload`]: WordDictionary::unload
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        if self.loaded {
            return Err(LoadError::AlreadyLoaded);
        }
        let file = File::open(path).map_err(|source| LoadError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_reader(BufReader::new(file), path)?;
        info!(
            "Loaded {} words from {} into {} buckets",
            self.loaded_count,
            path.display(),
            self.bucket_count()
        );
        Ok(())
    }

    /// Same as [`load`](WordDictionary::load) for a word list already in memory.
    pub fn load_bytes(&mut self, source: &[u8]) -> Result<(), LoadError> {
        if self.loaded {
            return Err(LoadError::AlreadyLoaded);
        }
        self.loaded = true;
        for word in words(source) {
            self.insert(word)?;
        }
        Ok(())
    }

    pub fn load_str(&mut self, source: &str) -> Result<(), LoadError> {
        self.load_bytes(source.as_bytes())
    }

    fn load_reader<R: BufRead>(&mut self, mut reader: R, path: &Path) -> Result<(), LoadError> {
        self.loaded = true;
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|source| LoadError::SourceUnreadable {
                    path: path.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                return Ok(());
            }
            for word in words(&line) {
                self.insert(word)?;
            }
        }
    }

    fn insert(&mut self, word: &[u8]) -> Result<(), LoadError> {
        if word.len() > self.max_word_length {
            return Err(LoadError::WordTooLong {
                word: String::from_utf8_lossy(word).into_owned(),
                max: self.max_word_length,
            });
        }
        let mut text = Vec::new();
        text.try_reserve_exact(word.len())
            .map_err(|_| LoadError::AllocationFailure {
                word: String::from_utf8_lossy(word).into_owned(),
            })?;
        text.extend_from_slice(word);

        let index = hash(word, self.buckets.len());
        let bucket = &mut self.buckets[index];
        let next = bucket.take();
        *bucket = Some(Box::new(Entry {
            text: text.into_boxed_slice(),
            next,
        }));
        self.loaded_count += 1;
        Ok(())
    }

    /// Returns true if `word` was loaded, ignoring ASCII case.
    pub fn check<W: AsRef<[u8]>>(&self, word: W) -> bool {
        let word = word.as_ref();
        self.chain(hash(word, self.buckets.len()))
            .any(|text| text.eq_ignore_ascii_case(word))
    }

    /// Number of words loaded, duplicates included.
    pub fn size(&self) -> usize {
        self.loaded_count
    }

    /// Iterates the words stored in bucket `index`, head first.
    ///
    /// Panics if `index` is out of range.
    pub fn chain(&self, index: usize) -> Chain<'_> {
        Chain {
            cursor: self.buckets[index].as_deref(),
        }
    }

    /// Releases every entry and leaves the table ready for another load.
    /// Calling it on an empty table does nothing.
    pub fn unload(&mut self) {
        let released = self.release_chains();
        if released > 0 {
            info!("Unloaded {released} words");
        } else {
            debug!("unload on an empty dictionary");
        }
    }

    // Unlinks iteratively so long chains cannot overflow the stack through
    // recursive Box drops.
    fn release_chains(&mut self) -> usize {
        for bucket in self.buckets.iter_mut() {
            let mut cursor = bucket.take();
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
            }
        }
        self.loaded = false;
        std::mem::take(&mut self.loaded_count)
    }
}

impl Drop for WordDictionary {
    fn drop(&mut self) {
        self.release_chains();
    }
}

impl fmt::Debug for WordDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordDictionary")
            .field("bucket_count", &self.buckets.len())
            .field("size", &self.loaded_count)
            .field("max_word_length", &self.max_word_length)
            .field("loaded", &self.loaded)
            .finish()
    }
}
