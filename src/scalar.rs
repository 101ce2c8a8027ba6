// Arithmetic in the scalar ring Z/LZ.
//
// Every operation accepts arbitrary 32-byte inputs and returns a canonical
// residue: whatever the path, it ends in a reduction mod L. Additions and
// negations are carried out on 512-bit integers so they cannot overflow before
// that reduction.
use core::ops::{Add, Mul, Neg, Sub};

use crypto_bigint::{Encoding, U512};
use curve25519_dalek::scalar::Scalar as DalekScalar;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{L, NON_REDUCED_SCALAR_BYTES, SCALAR_BYTES};
use crate::Error;

// A little-endian integer modulo L
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Zeroize)]
pub struct Scalar(pub(crate) [u8; SCALAR_BYTES]);

// A 512-bit little-endian integer, such as a hash output, that has not been
// reduced modulo L yet
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct NonReducedScalar(pub(crate) [u8; NON_REDUCED_SCALAR_BYTES]);

impl Scalar {
    pub const ZERO: Scalar = Scalar([0u8; SCALAR_BYTES]);
    pub const ONE: Scalar = {
        let mut bytes = [0u8; SCALAR_BYTES];
        bytes[0] = 1;
        Scalar(bytes)
    };

    // Does not reduce. Use `is_canonical` or route the value through a ring
    // operation to obtain a residue.
    pub fn from_bytes(bytes: [u8; SCALAR_BYTES]) -> Self {
        Scalar(bytes)
    }
    pub fn as_bytes(&self) -> &[u8; SCALAR_BYTES] {
        &self.0
    }
    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        self.0
    }

    pub fn is_canonical(&self) -> bool {
        is_canonical(self)
    }
    pub fn is_zero(&self) -> bool {
        self.0[..].ct_eq(&[0u8; SCALAR_BYTES][..]).into()
    }

    fn to_dalek(self) -> DalekScalar {
        DalekScalar::from_bytes_mod_order(self.0)
    }

    // Zero-extended to 64 bytes
    fn widen(&self) -> U512 {
        let mut wide = [0u8; NON_REDUCED_SCALAR_BYTES];
        wide[..SCALAR_BYTES].copy_from_slice(&self.0);
        let value = U512::from_le_bytes(wide);
        wide.zeroize();
        value
    }
}

impl From<[u8; SCALAR_BYTES]> for Scalar {
    fn from(bytes: [u8; SCALAR_BYTES]) -> Self {
        Scalar(bytes)
    }
}

impl NonReducedScalar {
    pub fn from_bytes(bytes: [u8; NON_REDUCED_SCALAR_BYTES]) -> Self {
        NonReducedScalar(bytes)
    }
    pub fn as_bytes(&self) -> &[u8; NON_REDUCED_SCALAR_BYTES] {
        &self.0
    }
    pub fn reduce(&self) -> Scalar {
        reduce(self)
    }

    fn from_uint(value: &U512) -> Self {
        NonReducedScalar(value.to_le_bytes())
    }
}

impl From<[u8; NON_REDUCED_SCALAR_BYTES]> for NonReducedScalar {
    fn from(bytes: [u8; NON_REDUCED_SCALAR_BYTES]) -> Self {
        NonReducedScalar(bytes)
    }
}

// L * 2^256, with `low` added to the least significant byte
fn shifted_order(low: u8) -> U512 {
    let mut wide = [0u8; NON_REDUCED_SCALAR_BYTES];
    wide[0] = low;
    wide[SCALAR_BYTES..].copy_from_slice(&L);
    U512::from_le_bytes(wide)
}

/// Reduces a 512-bit integer modulo L.
pub fn reduce(s: &NonReducedScalar) -> Scalar {
    Scalar(DalekScalar::from_bytes_mod_order_wide(&s.0).to_bytes())
}

/// Returns true if `s < L`.
pub fn is_canonical(s: &Scalar) -> bool {
    DalekScalar::from_canonical_bytes(s.0).is_some().into()
}

/// Computes `x + y mod L`. The sum is taken over the full 512-bit width, so
/// the carry out of non-canonical inputs is kept before reducing.
pub fn add(x: &Scalar, y: &Scalar) -> Scalar {
    reduce(&NonReducedScalar::from_uint(&x.widen().wrapping_add(&y.widen())))
}

/// Computes `-x mod L`.
pub fn negate(x: &Scalar) -> Scalar {
    reduce(&NonReducedScalar::from_uint(
        &shifted_order(0).wrapping_sub(&x.widen()),
    ))
}

/// Computes `1 - x mod L`.
pub fn complement(x: &Scalar) -> Scalar {
    reduce(&NonReducedScalar::from_uint(
        &shifted_order(1).wrapping_sub(&x.widen()),
    ))
}

pub fn sub(x: &Scalar, y: &Scalar) -> Scalar {
    add(x, &negate(y))
}

pub fn mul(x: &Scalar, y: &Scalar) -> Scalar {
    Scalar((x.to_dalek() * y.to_dalek()).to_bytes())
}

/// Computes `1 / x mod L`.
///
/// Fails with `Error::NonInvertibleScalar` when `x` is a multiple of L. The
/// check is on the reduced value, so a non-canonical encoding such as `L`
/// itself fails just like the all-zero scalar. No output is produced in
/// that case.
pub fn invert(x: &Scalar) -> Result<Scalar, Error> {
    let x = x.to_dalek();
    if bool::from(x.ct_eq(&DalekScalar::ZERO)) {
        return Err(Error::NonInvertibleScalar);
    }
    Ok(Scalar(x.invert().to_bytes()))
}

/// Samples a uniformly random non-zero scalar from the thread local generator.
pub fn random() -> Scalar {
    random_from_rng(&mut rand::thread_rng())
}

// Rejection sampling: draws below 2^253 are accepted when they are canonical
// and non-zero. More than half of all draws are accepted.
pub fn random_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    let mut bytes = [0u8; SCALAR_BYTES];
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[SCALAR_BYTES - 1] &= 0x1f;

        let candidate = Scalar(bytes);
        if candidate.is_canonical() && !candidate.is_zero() {
            bytes.zeroize();
            return candidate;
        }
    }
}

impl Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        add(&self, &rhs)
    }
}

impl Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        sub(&self, &rhs)
    }
}

impl Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        mul(&self, &rhs)
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        negate(&self)
    }
}
