use curve25519_dalek::edwards::EdwardsPoint;
use rand::{CryptoRng, RngCore};

use crate::backend;
use crate::constants::{BYTES, HASH_BYTES, UNIFORM_BYTES};
use crate::Error;

// A compressed edwards25519 point.
// The bytes carry no guarantee on their own: use `is_valid_point` before
// relying on a point received from elsewhere.
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

    pub(crate) fn from_edwards(point: &EdwardsPoint) -> Self {
        Point(backend::encode(point))
    }
}

impl From<[u8; BYTES]> for Point {
    fn from(bytes: [u8; BYTES]) -> Self {
        Point(bytes)
    }
}

impl AsRef<[u8]> for Point {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Returns true if `p` is a canonical encoding of a point in the prime order
/// subgroup, other than the identity.
///
/// Checks run in order and stop at the first failure: canonical encoding, not
/// of small order, decodes onto the curve, torsion free.
pub fn is_valid_point(p: &Point) -> bool {
    if !bool::from(backend::is_canonical(&p.0)) || bool::from(backend::is_small_order(&p.0)) {
        return false;
    }
    match backend::decode(&p.0) {
        Some(point) => backend::is_in_main_subgroup(&point),
        None => false,
    }
}

// Group operations only require the operands to decode onto the curve.
// Small order or non-canonical operands are accepted; callers that need more
// must call `is_valid_point` first.
fn decode_pair(p: &Point, q: &Point) -> Result<(EdwardsPoint, EdwardsPoint), Error> {
    let p = backend::decode(&p.0).ok_or(Error::InvalidPoint)?;
    let q = backend::decode(&q.0).ok_or(Error::InvalidPoint)?;
    Ok((p, q))
}

/// Computes `p + q`.
pub fn add(p: &Point, q: &Point) -> Result<Point, Error> {
    let (p, q) = decode_pair(p, q)?;
    Ok(Point::from_edwards(&(p + q)))
}

/// Computes `p - q`.
pub fn sub(p: &Point, q: &Point) -> Result<Point, Error> {
    let (p, q) = decode_pair(p, q)?;
    Ok(Point::from_edwards(&(p - q)))
}

/// Maps 32 uniformly random bytes to a point in the prime order subgroup.
pub fn from_uniform(bytes: &[u8; UNIFORM_BYTES]) -> Point {
    Point::from_edwards(&backend::map_uniform(bytes))
}

/// Maps a 64-byte hash output to a point in the prime order subgroup.
pub fn from_hash(bytes: &[u8; HASH_BYTES]) -> Point {
    Point::from_edwards(&backend::map_hash(bytes))
}

/// Samples a random point from the thread local generator.
pub fn random() -> Point {
    random_from_rng(&mut rand::thread_rng())
}

pub fn random_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Point {
    let mut bytes = [0u8; UNIFORM_BYTES];
    rng.fill_bytes(&mut bytes);
    from_uniform(&bytes)
}
