use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HoloprismError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        HoloprismError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        HoloprismError::transform("x")
            .to_string()
            .contains("transform error:")
    );
    assert!(
        HoloprismError::service("x")
            .to_string()
            .contains("service error:")
    );
    assert!(
        HoloprismError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HoloprismError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
