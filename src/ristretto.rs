//! The Ristretto255 prime order group.
//!
//! Elements share the scalar ring of edwards25519, so the functions in
//! [`crate::scalar`] apply unchanged. Hashing to the group uses
//! `expand_message_xmd` with SHA-256 followed by the Ristretto255 one-way map.
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::constants::{BYTES, FIELD_SEED_BYTES, NON_REDUCED_SCALAR_BYTES};
use crate::scalar::{self, NonReducedScalar, Scalar};
use crate::Error;

// Input size of `from_hash`
pub const HASH_BYTES: usize = 64;

const DIGEST_BYTES: usize = 32;
// SHA-256 input block size
const BLOCK_BYTES: usize = 64;
const MAX_DST_BYTES: usize = 0xff;
const OVERSIZE_DST_PREFIX: &[u8] = b"H2C-OVERSIZE-DST-";

// A compressed Ristretto255 element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point(pub(crate) [u8; BYTES]);

impl Point {
    pub fn from_bytes(bytes: [u8; BYTES]) -> Self {
        Point(bytes)
    }
    pub fn as_bytes(&self) -> &[u8; BYTES] {
        &self.0
    }
    pub fn to_bytes(&self) -> [u8; BYTES] {
        self.0
    }

    fn decode(&self) -> Option<RistrettoPoint> {
        CompressedRistretto(self.0).decompress()
    }

    fn from_ristretto(point: &RistrettoPoint) -> Self {
        Point(point.compress().to_bytes())
    }
}

impl From<[u8; BYTES]> for Point {
    fn from(bytes: [u8; BYTES]) -> Self {
        Point(bytes)
    }
}

/// Returns true if `p` is the canonical encoding of a group element.
pub fn is_valid_point(p: &Point) -> bool {
    p.decode().is_some()
}

fn decode_pair(p: &Point, q: &Point) -> Result<(RistrettoPoint, RistrettoPoint), Error> {
    let p = p.decode().ok_or(Error::InvalidPoint)?;
    let q = q.decode().ok_or(Error::InvalidPoint)?;
    Ok((p, q))
}

pub fn add(p: &Point, q: &Point) -> Result<Point, Error> {
    let (p, q) = decode_pair(p, q)?;
    Ok(Point::from_ristretto(&(p + q)))
}

pub fn sub(p: &Point, q: &Point) -> Result<Point, Error> {
    let (p, q) = decode_pair(p, q)?;
    Ok(Point::from_ristretto(&(p - q)))
}

/// Maps 64 uniformly random bytes to a group element.
pub fn from_hash(bytes: &[u8; HASH_BYTES]) -> Point {
    Point::from_ristretto(&RistrettoPoint::from_uniform_bytes(bytes))
}

pub fn random() -> Point {
    random_from_rng(&mut rand::thread_rng())
}

pub fn random_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Point {
    let mut bytes = [0u8; HASH_BYTES];
    rng.fill_bytes(&mut bytes);
    let point = from_hash(&bytes);
    bytes.zeroize();
    point
}

// expand_message_xmd over SHA-256. Contexts too long to be used as a domain
// separation tag are hashed down first.
fn expand_message(out: &mut [u8], ctx: &[u8], msg: &[u8]) {
    let hashed_ctx;
    let dst = if ctx.len() > MAX_DST_BYTES {
        hashed_ctx = Sha256::new()
            .chain_update(OVERSIZE_DST_PREFIX)
            .chain_update(ctx)
            .finalize();
        &hashed_ctx[..]
    } else {
        ctx
    };
    let dst_len = [dst.len() as u8];

    let b0 = Sha256::new()
        .chain_update([0u8; BLOCK_BYTES])
        .chain_update(msg)
        .chain_update((out.len() as u16).to_be_bytes())
        .chain_update([0u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut block = [0u8; DIGEST_BYTES];
    for (i, chunk) in out.chunks_mut(DIGEST_BYTES).enumerate() {
        // b_1 chains from b_0 alone, later blocks from b_0 XOR b_(i-1)
        for (byte, root) in block.iter_mut().zip(b0.iter()) {
            *byte ^= root;
        }
        let digest = Sha256::new()
            .chain_update(block)
            .chain_update([(i + 1) as u8])
            .chain_update(dst)
            .chain_update(dst_len)
            .finalize();
        block.copy_from_slice(&digest);
        chunk.copy_from_slice(&block[..chunk.len()]);
    }
    block.zeroize();
}

/// Hashes `msg` to a group element. The Ristretto255 map is already uniform,
/// so this is also the random oracle variant.
pub fn from_string(ctx: &[u8], msg: &[u8]) -> Point {
    let mut h = [0u8; HASH_BYTES];
    expand_message(&mut h, ctx, msg);
    let point = from_hash(&h);
    h.zeroize();
    point
}

pub fn from_string_ro(ctx: &[u8], msg: &[u8]) -> Point {
    from_string(ctx, msg)
}

/// Hashes `msg` to a scalar by reducing 48 expanded bytes, read big-endian,
/// modulo L.
pub fn scalar_from_string(ctx: &[u8], msg: &[u8]) -> Scalar {
    let mut h_be = [0u8; FIELD_SEED_BYTES];
    expand_message(&mut h_be, ctx, msg);

    let mut h = [0u8; NON_REDUCED_SCALAR_BYTES];
    for (le, be) in h.iter_mut().zip(h_be.iter().rev()) {
        *le = *be;
    }
    h_be.zeroize();

    scalar::reduce(&NonReducedScalar::from_bytes(h))
}
