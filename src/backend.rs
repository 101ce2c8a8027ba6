// The group primitives the point module is built from.
//
// Decoding, subgroup checks and point arithmetic come from curve25519-dalek.
// The encoding checks work directly on bytes so they can run before any
// decoding is attempted. The Elligator 2 map composes field operations from
// `field` with dalek's decompression and cofactor clearing.
use crypto_bigint::{Encoding, U256};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess};

use crate::constants::{BYTES, HASH_BYTES, SMALL_ORDER_BLOCKLIST, UNIFORM_BYTES};
use crate::field::{FieldElement, MODULUS};

const SIGN_BIT: u8 = 0x80;

// Decodes a compressed point. curve25519-dalek only returns points whose
// recovered x satisfies the curve equation, so a decoded element is always on
// the curve. Non-canonical y coordinates are accepted.
pub(crate) fn decode(bytes: &[u8; BYTES]) -> Option<EdwardsPoint> {
    CompressedEdwardsY(*bytes).decompress()
}

pub(crate) fn encode(point: &EdwardsPoint) -> [u8; BYTES] {
    point.compress().to_bytes()
}

// The y coordinate, ignoring the sign bit, must be below p
pub(crate) fn is_canonical(bytes: &[u8; BYTES]) -> Choice {
    let mut y = *bytes;
    y[BYTES - 1] &= !SIGN_BIT;
    U256::from_le_bytes(y).ct_lt(&MODULUS)
}

// True if the y coordinate, ignoring the sign bit, is that of a point of
// order dividing 8. Every blocklist entry is compared so the running time does
// not depend on which one matches.
pub(crate) fn is_small_order(bytes: &[u8; BYTES]) -> Choice {
    let mut y = *bytes;
    y[BYTES - 1] &= !SIGN_BIT;

    let mut matched = Choice::from(0u8);
    for entry in SMALL_ORDER_BLOCKLIST.iter() {
        matched |= y[..].ct_eq(&entry[..]);
    }
    matched
}

pub(crate) fn is_in_main_subgroup(point: &EdwardsPoint) -> bool {
    point.is_torsion_free()
}

// Maps 32 bytes to a point: the top bit selects the sign of x, the rest is a
// field element fed to Elligator 2.
pub(crate) fn map_uniform(bytes: &[u8; UNIFORM_BYTES]) -> EdwardsPoint {
    let x_sign = bytes[UNIFORM_BYTES - 1] & SIGN_BIT;
    let r = FieldElement::from_bytes(bytes);

    elligator2(&r, x_sign)
}

// Maps a 64-byte big-endian integer to a point. The top bit selects the sign
// of x and the remaining 511 bits are reduced mod p, using
// 2^255 = 19 and 2^256 = 38 (mod p).
pub(crate) fn map_hash(bytes: &[u8; HASH_BYTES]) -> EdwardsPoint {
    let x_sign = bytes[0] & SIGN_BIT;

    let mut low = [0u8; 32];
    let mut high = [0u8; 32];
    for i in 0..32 {
        low[i] = bytes[63 - i];
        high[i] = bytes[31 - i];
    }
    let low_bit_255 = Choice::from(low[31] >> 7);

    let carry = FieldElement::conditional_select(
        &FieldElement::ZERO,
        &FieldElement::from_u64(19),
        low_bit_255,
    );
    let r = FieldElement::from_bytes(&low)
        + carry
        + FieldElement::from_u64(38) * FieldElement::from_bytes(&high);

    elligator2(&r, x_sign)
}

fn elligator2(r: &FieldElement, x_sign: u8) -> EdwardsPoint {
    let a = FieldElement::montgomery_a();

    // x = -A / (1 + 2r^2)
    let r2 = r.square();
    let denominator = r2 + r2 + FieldElement::ONE;
    let mut x = -(a * denominator.invert());

    // e = x^3 + Ax^2 + x
    let x2 = x.square();
    let e = (x2 * x + x + x2 * a).chi();

    // When e is not a square, switch to the other candidate -x - A
    let not_square = e.ct_eq(&-FieldElement::ONE);
    x = FieldElement::conditional_select(&x, &-x, not_square);
    x = x - FieldElement::conditional_select(&FieldElement::ZERO, &a, not_square);

    // Montgomery u to Edwards y
    let y = (x - FieldElement::ONE) * (x + FieldElement::ONE).invert();
    let mut encoded = y.to_bytes();
    encoded[BYTES - 1] |= x_sign;

    // Every y produced above has a matching x on the curve, so decoding
    // cannot fail.
    decode(&encoded).unwrap_or_default().mul_by_cofactor()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::BASEPOINT;

    #[test]
    fn canonical_boundary() {
        let mut p = MODULUS.to_le_bytes();
        assert!(!bool::from(is_canonical(&p)));

        // p - 1 is the largest canonical y
        p[0] -= 1;
        assert!(bool::from(is_canonical(&p)));

        // the sign bit does not affect canonicity
        p[BYTES - 1] |= SIGN_BIT;
        assert!(bool::from(is_canonical(&p)));
    }

    #[test]
    fn small_order_ignores_sign_bit() {
        let mut identity = [0u8; BYTES];
        identity[0] = 1;
        assert!(bool::from(is_small_order(&identity)));
        identity[BYTES - 1] |= SIGN_BIT;
        assert!(bool::from(is_small_order(&identity)));

        assert!(!bool::from(is_small_order(&encode(&BASEPOINT))));
    }

    #[test]
    fn mapped_points_are_in_main_subgroup() {
        for seed in 0u8..16 {
            let uniform = [seed; UNIFORM_BYTES];
            let point = map_uniform(&uniform);
            assert!(is_in_main_subgroup(&point));

            let hash = [seed.wrapping_mul(17); HASH_BYTES];
            let point = map_hash(&hash);
            assert!(is_in_main_subgroup(&point));
        }
    }

    #[test]
    fn map_uniform_sign_bit_negates() {
        let mut bytes = [0x42u8; UNIFORM_BYTES];
        bytes[UNIFORM_BYTES - 1] &= !SIGN_BIT;
        let positive = map_uniform(&bytes);
        bytes[UNIFORM_BYTES - 1] |= SIGN_BIT;
        let negative = map_uniform(&bytes);

        // clearing the cofactor commutes with negation
        assert_eq!(positive, -negative);
    }

    #[test]
    fn map_hash_reduces_wide_input() {
        // The low 255 bits of the big-endian value are read as the field element,
        // so a value below 2^255 with a zero x sign matches the uniform map.
        let mut hash = [0u8; HASH_BYTES];
        let mut uniform = [0u8; UNIFORM_BYTES];
        for i in 0..31 {
            hash[HASH_BYTES - 1 - i] = i as u8 + 1;
            uniform[i] = i as u8 + 1;
        }
        assert_eq!(map_hash(&hash), map_uniform(&uniform));
    }

    fn from_hex<const N: usize>(s: &str) -> [u8; N] {
        let mut out = [0u8; N];
        hex::decode_to_slice(s, &mut out).unwrap();
        out
    }

    #[test]
    fn map_uniform_known_answer() {
        let r = from_hex("2580db3691ec47a2fd58b30e69c41f7ad5308be6419cf752ad0863be1974cf2a");
        assert_eq!(
            hex::encode(encode(&map_uniform(&r))),
            "0fcc9079163551339a4fa9ea59024bc5b930e23a5feedb56dfd2f17086b8bfe0"
        );
    }

    #[test]
    fn map_hash_known_answer() {
        let h = from_hex(
            "001d3a577491aecbe805223f5c7996b3d0ed0a2744617e9bb8d5f20f2c496683\
             a0bddaf714314e6b88a5c2dffc193653708daac7e4011e3b587592afcce90623",
        );
        assert_eq!(
            hex::encode(encode(&map_hash(&h))),
            "09259af4ddbf6b32496ce8f324bcf437e9cc71c79539bee09027e0cb7cf7606a"
        );
    }
}
