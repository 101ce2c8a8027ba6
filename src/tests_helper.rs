use crate::constants::{BASEPOINT, BYTES, SMALL_ORDER_BLOCKLIST};
use crate::point::Point;
use crate::scalar::{self, Scalar};
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::scalar::Scalar as DalekScalar;

// Generates `num` points of the prime order subgroup as multiples of the basepoint
pub fn generate_valid_points(num: usize) -> Vec<Point> {
    let mut rng = rand::thread_rng();
    (0..num)
        .map(|_| {
            let s = scalar::random_from_rng(&mut rng);
            let point = DalekScalar::from_bytes_mod_order(s.to_bytes()) * BASEPOINT;
            Point::from_bytes(point.compress().to_bytes())
        })
        .collect()
}

// Generates `num` random non-zero canonical scalars
pub fn generate_scalars(num: usize) -> Vec<Scalar> {
    let mut rng = rand::thread_rng();
    (0..num).map(|_| scalar::random_from_rng(&mut rng)).collect()
}

fn with_sign(mut bytes: [u8; BYTES]) -> [u8; BYTES] {
    bytes[BYTES - 1] |= 0x80;
    bytes
}

// The canonical encodings of the eight points of order dividing 8.
// The first entry is the identity and the second the point of order 2.
pub fn small_order_encodings() -> [Point; 8] {
    // The remaining blocklist entries are non-canonical aliases
    let [order_four, identity, order_eight_a, order_eight_b, order_two, ..] = SMALL_ORDER_BLOCKLIST;

    [
        Point::from_bytes(identity),
        Point::from_bytes(order_two),
        Point::from_bytes(order_four),
        Point::from_bytes(with_sign(order_four)),
        Point::from_bytes(order_eight_a),
        Point::from_bytes(with_sign(order_eight_a)),
        Point::from_bytes(order_eight_b),
        Point::from_bytes(with_sign(order_eight_b)),
    ]
}

// Returns an encoding whose y coordinate has no matching x on the curve
pub fn undecodable_encoding() -> Point {
    let mut bytes = [0u8; BYTES];
    for y in 2u8.. {
        bytes[0] = y;
        if CompressedEdwardsY(bytes).decompress().is_none() {
            break;
        }
    }
    Point::from_bytes(bytes)
}
