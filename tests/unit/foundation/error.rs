use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CapsuleError::argument("x")
            .to_string()
            .contains("argument error:")
    );
    assert!(CapsuleError::io("x").to_string().contains("io error:"));
    assert!(
        CapsuleError::resource("x")
            .to_string()
            .contains("resource error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CapsuleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
