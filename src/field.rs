// Arithmetic mod p = 2^255 - 19, as needed by the Elligator 2 map.
//
// curve25519-dalek keeps its field elements private, so the map runs on
// crypto-bigint's constant-time Montgomery residues instead. Only the handful
// of operations the map uses are exposed.
use core::ops::{Add, Mul, Neg, Sub};

use crypto_bigint::modular::constant_mod::Residue;
use crypto_bigint::{impl_modulus, Encoding, U256};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

impl_modulus!(
    Prime25519,
    U256,
    "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"
);

type Inner = Residue<Prime25519, { U256::LIMBS }>;

// p - 2
const INVERT_EXPONENT: U256 =
    U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeb");
// (p - 1) / 2
const CHI_EXPONENT: U256 =
    U256::from_be_hex("3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff6");

pub(crate) const MODULUS: U256 =
    U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");

// Montgomery curve coefficient A of curve25519
const MONTGOMERY_A: u64 = 486662;

#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldElement(Inner);

impl FieldElement {
    pub(crate) const ZERO: FieldElement = FieldElement(Inner::ZERO);
    pub(crate) const ONE: FieldElement = FieldElement(Inner::ONE);

    pub(crate) fn from_u64(value: u64) -> FieldElement {
        FieldElement(Inner::new(&U256::from_u64(value)))
    }

    pub(crate) fn montgomery_a() -> FieldElement {
        FieldElement::from_u64(MONTGOMERY_A)
    }

    // Reads 255 bits little-endian, ignoring the top bit of the last byte.
    // Values in [p, 2^255) wrap around.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        let mut low = *bytes;
        let bit_254 = Choice::from((low[31] >> 6) & 1);
        low[31] &= 0x3f;

        // Both halves are below p, so each is a valid residue on its own
        let low = FieldElement(Inner::new(&U256::from_le_bytes(low)));
        let high = FieldElement(Inner::new(&U256::ONE.shl_vartime(254)));

        low + FieldElement::conditional_select(&FieldElement::ZERO, &high, bit_254)
    }

    // Canonical little-endian encoding
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        self.0.retrieve().to_le_bytes()
    }

    pub(crate) fn square(&self) -> FieldElement {
        FieldElement(self.0.square())
    }

    // Inverse by exponentiation, so zero maps to zero
    pub(crate) fn invert(&self) -> FieldElement {
        FieldElement(self.0.pow(&INVERT_EXPONENT))
    }

    // Legendre symbol: 0, 1, or p - 1
    pub(crate) fn chi(&self) -> FieldElement {
        FieldElement(self.0.pow(&CHI_EXPONENT))
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement(Inner::conditional_select(&a.0, &b.0, choice))
    }
}

impl Add for FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: FieldElement) -> FieldElement {
        FieldElement(self.0 + rhs.0)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: FieldElement) -> FieldElement {
        FieldElement(self.0 - rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: FieldElement) -> FieldElement {
        FieldElement(self.0 * rhs.0)
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        FieldElement(-self.0)
    }
}
