//! Hashing arbitrary strings onto edwards25519.
//!
//! A message is first expanded with SHA-512 into one or two 48-byte field
//! seeds, bound to a suite tag and a caller supplied context. Each seed is then
//! mapped onto the curve with [`point::from_hash`].
//!
//! Two suites are provided:
//! - [`from_string`] maps a single seed. It is cheaper, but its output is not
//!   uniformly distributed over the group.
//! - [`from_string_ro`] maps two seeds and adds the results, which makes the
//!   output indistinguishable from a random group element.
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::constants::{FIELD_SEED_BYTES, HASH_BYTES, SUITE_NU, SUITE_RO};
use crate::point::{self, Point};
use crate::Error;

// SHA-512 input block size
const BLOCK_BYTES: usize = 128;
// Maximum combined length of the suite tag and the context
const MAX_TAG_BYTES: usize = 0xff;
// The expansion never produces more than this many seeds
pub const MAX_SEEDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    // One seed, one map
    NonUniform,
    // Two seeds, two maps, one addition
    RandomOracle,
}

impl Suite {
    pub fn tag(&self) -> &'static [u8] {
        match self {
            Suite::NonUniform => SUITE_NU,
            Suite::RandomOracle => SUITE_RO,
        }
    }

    pub fn seeds(&self) -> usize {
        match self {
            Suite::NonUniform => 1,
            Suite::RandomOracle => 2,
        }
    }
}

/// 48 bytes of expanded output, read as a big-endian integer.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct FieldSeed(pub(crate) [u8; FIELD_SEED_BYTES]);

impl FieldSeed {
    pub fn as_bytes(&self) -> &[u8; FIELD_SEED_BYTES] {
        &self.0
    }

    // Zero-extended on the left, which preserves the big-endian value
    pub fn widen(&self) -> [u8; HASH_BYTES] {
        let mut wide = [0u8; HASH_BYTES];
        wide[HASH_BYTES - FIELD_SEED_BYTES..].copy_from_slice(&self.0);
        wide
    }

    pub fn to_point(&self) -> Point {
        let mut wide = self.widen();
        let point = point::from_hash(&wide);
        wide.zeroize();
        point
    }
}

impl std::fmt::Debug for FieldSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldSeed(..)")
    }
}

// Produces the 64-byte blocks of an expansion one at a time.
//
// Block i is SHA-512(c_i || i + 1 || tag length || suite || ctx), where c_0 is
// the digest of the padded message and c_i, for i > 0, is that digest XORed
// with block i - 1.
struct Expander<'a> {
    suite: &'a [u8],
    ctx: &'a [u8],
    tag_len: u8,
    // Digest of the padded message
    root: [u8; HASH_BYTES],
    // Last block produced
    previous: [u8; HASH_BYTES],
    counter: u8,
    remaining: usize,
}

impl<'a> Expander<'a> {
    // Checks the domain parameters before any hashing happens
    fn new(n: usize, suite: &'a [u8], ctx: &'a [u8], msg: &[u8]) -> Result<Self, Error> {
        if n > MAX_SEEDS {
            return Err(Error::UnsupportedSeedCount(n));
        }
        if suite.len() > MAX_TAG_BYTES {
            return Err(Error::SuiteTooLong(suite.len()));
        }
        let max = MAX_TAG_BYTES - suite.len();
        if ctx.len() > max {
            return Err(Error::ContextTooLong {
                len: ctx.len(),
                max,
            });
        }
        let tag_len = (suite.len() + ctx.len()) as u8;

        // n * 48 fits in the low byte of the 16-bit length for n <= 2
        let output_len = (n * FIELD_SEED_BYTES) as u16;
        let mut hasher = Sha512::new();
        hasher.update([0u8; BLOCK_BYTES]);
        hasher.update(msg);
        hasher.update(output_len.to_be_bytes());
        hasher.update([0u8, tag_len]);
        hasher.update(suite);
        hasher.update(ctx);

        let mut root = [0u8; HASH_BYTES];
        root.copy_from_slice(&hasher.finalize());

        Ok(Expander {
            suite,
            ctx,
            tag_len,
            root,
            previous: [0u8; HASH_BYTES],
            counter: 0,
            remaining: n,
        })
    }
}

impl Iterator for Expander<'_> {
    type Item = [u8; HASH_BYTES];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let mut chained = self.root;
        if self.counter > 0 {
            for (byte, prev) in chained.iter_mut().zip(self.previous.iter()) {
                *byte ^= prev;
            }
        }
        self.counter += 1;

        let mut hasher = Sha512::new();
        hasher.update(chained);
        hasher.update([self.counter, self.tag_len]);
        hasher.update(self.suite);
        hasher.update(self.ctx);
        chained.zeroize();

        self.previous.copy_from_slice(&hasher.finalize());
        self.remaining -= 1;
        Some(self.previous)
    }
}

impl Drop for Expander<'_> {
    fn drop(&mut self) {
        self.root.zeroize();
        self.previous.zeroize();
    }
}

/// Expands `msg` into `n` field seeds bound to `suite` and `ctx`.
///
/// The blocks are concatenated and cut into consecutive 48-byte seeds. Fails
/// without hashing anything if `n > 2`, if `suite` is longer than 255 bytes, or
/// if `suite` and `ctx` together are longer than 255 bytes.
pub fn expand(n: usize, suite: &[u8], ctx: &[u8], msg: &[u8]) -> Result<Vec<FieldSeed>, Error> {
    let expander = Expander::new(n, suite, ctx, msg)?;

    let mut stream = [0u8; MAX_SEEDS * HASH_BYTES];
    for (i, mut block) in expander.enumerate() {
        stream[i * HASH_BYTES..(i + 1) * HASH_BYTES].copy_from_slice(&block);
        block.zeroize();
    }

    let seeds = stream
        .chunks_exact(FIELD_SEED_BYTES)
        .take(n)
        .map(|chunk| {
            let mut seed = [0u8; FIELD_SEED_BYTES];
            seed.copy_from_slice(chunk);
            FieldSeed(seed)
        })
        .collect();
    stream.zeroize();

    Ok(seeds)
}

fn string_to_points(suite: Suite, ctx: &[u8], msg: &[u8]) -> Result<Vec<Point>, Error> {
    let seeds = expand(suite.seeds(), suite.tag(), ctx, msg)?;
    Ok(seeds.iter().map(FieldSeed::to_point).collect())
}

/// Hashes `msg` onto the curve with a single map (non-uniform suite).
pub fn from_string(ctx: &[u8], msg: &[u8]) -> Result<Point, Error> {
    let points = string_to_points(Suite::NonUniform, ctx, msg)?;
    Ok(points[0])
}

/// Hashes `msg` onto the curve as the sum of two maps (random oracle suite).
pub fn from_string_ro(ctx: &[u8], msg: &[u8]) -> Result<Point, Error> {
    let points = string_to_points(Suite::RandomOracle, ctx, msg)?;
    point::add(&points[0], &points[1])
}
