#![no_main]
use gm_sm2::{
    AffinePoint, DEFAULT_DISTID,
    dsa::{Signature, VerifyingKey},
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary public key encodings must be rejected, not panic
    if let Ok(vk) = VerifyingKey::<gm_sm2::sm3::Sm3>::from_sec1_bytes(DEFAULT_DISTID, data) {
        assert!(vk.as_affine().is_on_curve());
    }

    // Verifying key for the secret scalar 1
    let vk: VerifyingKey = VerifyingKey::from_affine(DEFAULT_DISTID, AffinePoint::generator()).unwrap();

    // Arbitrary signatures over an arbitrary message
    let (sig, msg) = data.split_at(data.len().min(Signature::BYTE_SIZE));
    let _ = vk.verify_bytes(msg, sig);

    if let Ok(sig) = Signature::from_der(data) {
        assert_eq!(Signature::from_der(&sig.to_der().unwrap()).unwrap(), sig);
        let _ = vk.is_valid(msg, &sig);
    }
});
