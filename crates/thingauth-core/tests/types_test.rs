use thingauth_core::types::{
    CertificateId, CertificateMaterial, DeviceIdentity, ValidationError, MAX_DEVICE_NAME_LEN,
};

#[test]
fn device_identity_accepts_thing_names() {
    for name in ["thing-42", "sensor_01", "Kitchen:Oven"] {
        assert_eq!(DeviceIdentity::new(name).unwrap().as_str(), name);
    }
}

#[test]
fn device_identity_rejects_empty() {
    assert_eq!(DeviceIdentity::new(""), Err(ValidationError::Empty));
}

#[test]
fn device_identity_rejects_path_traversal() {
    assert_eq!(DeviceIdentity::new(".."), Err(ValidationError::PathTraversal));
    assert_eq!(DeviceIdentity::new("."), Err(ValidationError::PathTraversal));
    assert_eq!(
        DeviceIdentity::new("../etc/passwd"),
        Err(ValidationError::InvalidCharacters)
    );
    assert_eq!(
        DeviceIdentity::new("a\\b"),
        Err(ValidationError::InvalidCharacters)
    );
}

#[test]
fn device_identity_rejects_control_characters() {
    assert_eq!(
        DeviceIdentity::new("thing\n42"),
        Err(ValidationError::InvalidCharacters)
    );
}

#[test]
fn device_identity_rejects_overlong_names() {
    let name = "a".repeat(MAX_DEVICE_NAME_LEN + 1);
    assert!(matches!(
        DeviceIdentity::new(&name),
        Err(ValidationError::TooLong { .. })
    ));
}

#[test]
fn device_identity_length_counts_characters_not_bytes() {
    let at_limit = "é".repeat(MAX_DEVICE_NAME_LEN);
    assert!(DeviceIdentity::new(&at_limit).is_ok());

    let over = "é".repeat(MAX_DEVICE_NAME_LEN + 1);
    assert_eq!(
        DeviceIdentity::new(&over),
        Err(ValidationError::TooLong {
            max: MAX_DEVICE_NAME_LEN,
            got: MAX_DEVICE_NAME_LEN + 1,
        })
    );
}

#[test]
fn device_identity_deserialization_validates() {
    let ok: DeviceIdentity = serde_json::from_str(r#""thing-42""#).unwrap();
    assert_eq!(ok.as_str(), "thing-42");
    assert!(serde_json::from_str::<DeviceIdentity>(r#""..""#).is_err());
}

#[test]
fn certificate_id_rejects_empty() {
    assert_eq!(CertificateId::new(""), Err(ValidationError::Empty));
}

#[test]
fn certificate_material_debug_hides_contents() {
    let material = CertificateMaterial::from("-----BEGIN CERTIFICATE-----".to_owned());
    let rendered = format!("{material:?}");
    assert!(!rendered.contains("BEGIN"));
    assert!(rendered.contains("27"));
}
