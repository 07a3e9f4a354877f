use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DotwalkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DotwalkError::palette("x")
            .to_string()
            .contains("palette error:")
    );
    assert!(DotwalkError::render("x").to_string().contains("render error:"));
    assert!(DotwalkError::encode("x").to_string().contains("encode error:"));
    assert!(
        DotwalkError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DotwalkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let err: DotwalkError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, DotwalkError::Serde(_)));
}
