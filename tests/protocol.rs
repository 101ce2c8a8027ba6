extern crate ed25519_core;

use ed25519_core::constants::{
    HASH_BYTES, L, NON_REDUCED_SCALAR_BYTES, SCALAR_BYTES, SUITE_NU, SUITE_RO, UNIFORM_BYTES,
};
use ed25519_core::tests_helper::*;
use ed25519_core::{hash_to_curve, point, ristretto, scalar};
use ed25519_core::{Error, NonReducedScalar, Scalar};

// Schnorr style response arithmetic over a hashed generator and a hashed
// challenge: s = r + c*x must give back r and x.
#[test]
fn test_protocol() {
    let h = hash_to_curve::from_string_ro(b"protocol", b"generator").unwrap();
    assert!(point::is_valid_point(&h));

    let x = scalar::random();
    let r = scalar::random();
    let c = ristretto::scalar_from_string(b"protocol", h.as_bytes());

    let s = scalar::add(&r, &scalar::mul(&c, &x));

    // Recover r from s, c and x
    let recovered = scalar::sub(&s, &scalar::mul(&c, &x));
    assert_eq!(recovered, r);

    // c * x * c^-1 = x
    let c_inv = scalar::invert(&c).unwrap();
    assert_eq!(scalar::mul(&scalar::mul(&c, &x), &c_inv), x);
}

#[test]
fn test_point_group_laws() {
    let points = generate_valid_points(6);
    for p in points.iter() {
        for q in points.iter() {
            let sum = point::add(p, q).unwrap();
            assert_eq!(sum, point::add(q, p).unwrap());
            assert_eq!(point::sub(&sum, q).unwrap(), *p);
        }
    }
}

#[test]
fn test_identity_is_neutral() {
    let identity = small_order_encodings()[0];
    for p in generate_valid_points(4) {
        assert_eq!(point::add(&p, &identity).unwrap(), p);
    }
}

#[test]
fn test_validator_rejects_all_small_order_points() {
    for encoding in small_order_encodings().iter() {
        assert!(!point::is_valid_point(encoding));
    }
}

#[test]
fn test_scalar_ring_scenarios() {
    // L zero-extended reduces to zero
    let mut wide = [0u8; NON_REDUCED_SCALAR_BYTES];
    wide[..SCALAR_BYTES].copy_from_slice(&L);
    assert_eq!(NonReducedScalar::from_bytes(wide).reduce(), Scalar::ZERO);

    // (L - 1) + 1 wraps to zero
    let mut l_minus_one = L;
    l_minus_one[0] -= 1;
    assert_eq!(
        scalar::add(&Scalar::from_bytes(l_minus_one), &Scalar::ONE),
        Scalar::ZERO
    );

    assert!(matches!(
        scalar::invert(&Scalar::ZERO),
        Err(Error::NonInvertibleScalar)
    ));
}

#[test]
fn test_scalar_ring_properties() {
    let scalars = generate_scalars(20);
    for x in scalars.iter() {
        assert_eq!(scalar::add(x, &scalar::negate(x)), Scalar::ZERO);
        assert_eq!(scalar::add(x, &scalar::complement(x)), Scalar::ONE);
        assert_eq!(scalar::mul(x, &scalar::invert(x).unwrap()), Scalar::ONE);
        for y in scalars.iter() {
            assert_eq!(scalar::sub(&scalar::add(x, y), y), *x);
        }
    }
}

#[test]
fn test_random_scalars() {
    for _ in 0..2000 {
        let s = scalar::random();
        assert!(scalar::is_canonical(&s));
        assert_ne!(s, Scalar::ZERO);
    }
}

#[test]
fn test_hash_to_curve_boundaries() {
    let suite = [b's'; 255];
    assert!(matches!(
        hash_to_curve::expand(1, &suite, b"c", b"msg"),
        Err(Error::ContextTooLong { .. })
    ));

    let ctx = vec![b'c'; 255 - SUITE_NU.len()];
    assert!(hash_to_curve::expand(1, SUITE_NU, &ctx, b"msg").is_ok());
    let ctx = vec![b'c'; 255 - SUITE_RO.len()];
    assert!(hash_to_curve::expand(2, SUITE_RO, &ctx, b"msg").is_ok());
}

// Fixed outputs shared with other implementations of the same encodings
#[test]
fn test_known_answers() {
    let mut r = [0u8; UNIFORM_BYTES];
    hex::decode_to_slice(
        "2580db3691ec47a2fd58b30e69c41f7ad5308be6419cf752ad0863be1974cf2a",
        &mut r,
    )
    .unwrap();
    assert_eq!(
        hex::encode(point::from_uniform(&r)),
        "0fcc9079163551339a4fa9ea59024bc5b930e23a5feedb56dfd2f17086b8bfe0"
    );

    let mut h = [0u8; HASH_BYTES];
    hex::decode_to_slice(
        "001d3a577491aecbe805223f5c7996b3d0ed0a2744617e9bb8d5f20f2c496683\
         a0bddaf714314e6b88a5c2dffc193653708daac7e4011e3b587592afcce90623",
        &mut h,
    )
    .unwrap();
    let p = point::from_hash(&h);
    assert!(point::is_valid_point(&p));
    assert_eq!(
        hex::encode(p),
        "09259af4ddbf6b32496ce8f324bcf437e9cc71c79539bee09027e0cb7cf7606a"
    );

    assert_eq!(
        hex::encode(hash_to_curve::from_string(b"ctx", b"abc").unwrap()),
        "7c75e9960bb8d39015c0765c3b0daefe37788b909733a57c1f2b4bf33eda628b"
    );
    assert_eq!(
        hex::encode(hash_to_curve::from_string_ro(b"ctx", b"abc").unwrap()),
        "4d77c03bebf849111aeda53fdb340370cdb1572c4f7e9b0f0a326aabdfbe6ea8"
    );
}

#[test]
fn test_hash_to_curve_outputs() {
    for msg in [&b""[..], b"a", b"abc", &[0u8; 1000][..]].iter() {
        let nu = hash_to_curve::from_string(b"tests", msg).unwrap();
        let ro = hash_to_curve::from_string_ro(b"tests", msg).unwrap();
        assert!(point::is_valid_point(&nu));
        assert!(point::is_valid_point(&ro));
        assert_eq!(ro, hash_to_curve::from_string_ro(b"tests", msg).unwrap());
    }
}
