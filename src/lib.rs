//! Group and scalar arithmetic on edwards25519, with hash-to-curve.
//!
//! Points and scalars travel as fixed size byte strings: 32-byte compressed
//! points, 32-byte little-endian scalars and 64-byte unreduced scalars. Every
//! scalar operation returns a canonical value modulo the group order `L`.
//!
//! Point validation is strict while group operations are lax: [`point::add`]
//! and [`point::sub`] accept any encoding that decodes onto the curve,
//! including small order points. Call [`point::is_valid_point`] first when
//! that matters.
pub mod constants;
pub mod hash_to_curve;
pub mod point;
pub mod ristretto;
pub mod scalar;
pub mod tests_helper;

mod backend;
mod field;

pub use hash_to_curve::{expand, from_string, from_string_ro, FieldSeed, Suite};
pub use point::{is_valid_point, random as random_point, Point};
pub use scalar::{random as random_scalar, NonReducedScalar, Scalar};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // An operand of a group operation does not decode onto the curve
    #[error("point does not decode to a curve element")]
    InvalidPoint,
    // Expansion produces one or two field seeds
    #[error("at most 2 field seeds can be expanded, {0} requested")]
    UnsupportedSeedCount(usize),
    // The suite tag length must fit in a single byte
    #[error("suite tag is {0} bytes, the maximum is 255")]
    SuiteTooLong(usize),
    // Suite tag and context together must fit in a single length byte
    #[error("context is {len} bytes, at most {max} fit alongside the suite tag")]
    ContextTooLong { len: usize, max: usize },
    // Zero, or any multiple of L, has no inverse
    #[error("scalar is not invertible")]
    NonInvertibleScalar,
}
