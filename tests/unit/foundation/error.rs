use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScanimateError::shape("x")
            .to_string()
            .contains("shape mismatch:")
    );
    assert!(
        ScanimateError::invalid("x")
            .to_string()
            .contains("invalid parameter:")
    );
    assert!(
        ScanimateError::frame_count(3, 2)
            .to_string()
            .contains("frame count mismatch:")
    );
    assert!(
        ScanimateError::period(6, 10)
            .to_string()
            .contains("invalid period:")
    );
}

#[test]
fn structured_variants_carry_their_numbers() {
    let msg = ScanimateError::frame_count(3, 2).to_string();
    assert!(msg.contains("expects 3"));
    assert!(msg.contains("got 2"));

    let msg = ScanimateError::period(6, 10).to_string();
    assert!(msg.contains("period 6"));
    assert!(msg.contains("axis length 10"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScanimateError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
