use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlidecastError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        SlidecastError::effect_resolution("x")
            .to_string()
            .contains("effect resolution error:")
    );
    assert!(
        SlidecastError::internal("x")
            .to_string()
            .contains("internal consistency error:")
    );
    assert!(
        SlidecastError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        SlidecastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_internal_errors_are_flagged_internal() {
    assert!(SlidecastError::internal("x").is_internal());
    assert!(!SlidecastError::configuration("x").is_internal());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlidecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
