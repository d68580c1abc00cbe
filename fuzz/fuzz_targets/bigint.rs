#![no_main]
use gm_sm2::{BigInteger, CurveParams};
use libfuzzer_sys::fuzz_target;

fn test_mod_arith(a: &BigInteger, b: &BigInteger, c: &BigInteger, m: &BigInteger) {
    // Associativity
    assert_eq!((a + &(b + c)).modulo(m), ((a + b) + c).modulo(m));
    assert_eq!((a * &(b * c)).modulo(m), ((a * b) * c).modulo(m));

    // Commutativity
    assert_eq!((a + b).modulo(m), (b + a).modulo(m));
    assert_eq!((a * b).modulo(m), (b * a).modulo(m));

    // Distributivity
    assert_eq!((a * &(b + c)).modulo(m), (a * b + a * c).modulo(m));

    // Reduction lands in [0, m)
    let r = (a - b).modulo(m);
    assert!(!r.is_negative() && &r < m);

    // Inverse
    let a = a.modulo(m);
    if !a.is_zero() {
        let inv = a.mod_inverse(m).unwrap();
        assert_eq!((&a * &inv).modulo(m), BigInteger::one());
        assert_eq!(a.mod_pow(&-BigInteger::one(), m).unwrap(), inv);
    } else {
        assert!(a.mod_inverse(m).is_err());
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        return;
    }

    let a = BigInteger::from_bytes(&data[0..32]);
    let b = BigInteger::from_bytes(&data[32..64]);
    let c = BigInteger::from_bytes(&data[64..96]);

    // Fixed-width encoding round trip
    let bytes: [u8; 32] = a.to_fixed_bytes().unwrap();
    assert_eq!(BigInteger::from_bytes(&bytes), a);

    let params = CurveParams::sm2();
    test_mod_arith(&a, &b, &c, &params.p);
    test_mod_arith(&a, &b, &c, &params.n);
});
