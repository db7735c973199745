use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollreelError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(
        ScrollreelError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        ScrollreelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
