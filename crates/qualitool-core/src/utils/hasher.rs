use std::hash::{BuildHasher, Hasher};
use xxhash_rust::xxh3::{xxh3_64_with_seed, Xxh3};

/// Pass-through hasher for keys that are already xxh3 digests.
///
/// A `u64` key is used as its own hash. Any other bytes are folded in with
/// xxh3, seeded by the state so far.
#[derive(Default, Clone)]
pub struct Xxh3Hasher {
    hash: u64,
}

impl Hasher for Xxh3Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.hash = xxh3_64_with_seed(bytes, self.hash);
    }
    #[inline]
    fn write_u64(&mut self, n: u64) {
        self.hash ^= n;
    }
}

#[derive(Clone, Default)]
pub struct Xxh3Builder;

impl BuildHasher for Xxh3Builder {
    type Hasher = Xxh3Hasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        Xxh3Hasher::default()
    }
}

/// Digest of a tuple of nullable cell values.
///
/// Each value is length-prefixed and nulls carry their own tag, so
/// `("ab", "c")`, `("a", "bc")` and `(null, "")` all hash differently.
pub fn hash_row(values: &[Option<&str>]) -> u64 {
    let mut hasher = Xxh3::new();
    for value in values {
        match value {
            Some(v) => {
                hasher.update(&[1]);
                hasher.update(&(v.len() as u64).to_le_bytes());
                hasher.update(v.as_bytes());
            }
            None => hasher.update(&[0]),
        }
    }
    hasher.digest()
}
