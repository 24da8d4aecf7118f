mod support;

use entity_contract::{
    decode_entity, encode_entity, CodecOptions, ContentType, ContractConfig, EntityCodec,
    PackValue, ValidatorRegistry,
};
use serde_json::json;
use support::*;

fn codec() -> EntityCodec {
    EntityCodec::new(&ContractConfig::default(), ValidatorRegistry::new()).unwrap()
}

#[test]
fn encode_matches_wire_fixture() {
    let value = encode_entity(&sample_profile(), &CodecOptions::default()).unwrap();
    assert_eq!(value, sample_value());
    assert_eq!(value.get("nickname"), Some(&PackValue::Null));
    assert_eq!(value.get("billing"), Some(&PackValue::Null));
}

#[test]
fn decode_wire_fixture() {
    let profile: Profile = decode_entity(&sample_value(), &CodecOptions::default()).unwrap();
    assert_eq!(profile, sample_profile());
}

#[test]
fn every_field_kind_roundtrips_with_and_without_remapping() {
    let mut profile = sample_profile();
    profile.nickname = Some("ada".to_owned());
    profile.billing = Some(home());
    profile.priority = None;
    for options in [CodecOptions::default(), CodecOptions::without_remapping()] {
        let value = encode_entity(&profile, &options).unwrap();
        let back: Profile = decode_entity(&value, &options).unwrap();
        assert_eq!(back, profile, "{options:?}");
    }
}

#[test]
fn remapping_toggle_changes_keys_only() {
    let profile = sample_profile();
    let on = encode_entity(&profile, &CodecOptions::default()).unwrap();
    let off = encode_entity(&profile, &CodecOptions::without_remapping()).unwrap();
    assert_eq!(on.get("displayName"), Some(&PackValue::Str("Ada".into())));
    assert_eq!(on.get("display_name"), None);
    assert_eq!(off.get("display_name"), Some(&PackValue::Str("Ada".into())));
    assert_eq!(
        off.get("address").and_then(|a| a.get("zip")),
        Some(&PackValue::Str("12345".into()))
    );
    assert_eq!(on.get("address").and_then(|a| a.get("zip")), None);

    // A remapped payload read with remapping off is missing the field.
    let err = decode_entity::<Profile>(&on, &CodecOptions::without_remapping()).unwrap_err();
    assert_eq!(err.field_category().map(|(field, _)| field), Some("display_name"));
}

#[test]
fn numeric_fields_accept_any_numeric_wire_form() {
    let mut value = sample_value();
    if let PackValue::Object(obj) = &mut value {
        obj.insert("age".to_owned(), PackValue::Float(42.0));
        obj.insert("score".to_owned(), PackValue::Integer(42));
    }
    let profile: Profile = decode_entity(&value, &CodecOptions::default()).unwrap();
    assert_eq!(profile.age, 42);
    assert_eq!(profile.score, 42.0);
}

#[tokio::test]
async fn packed_roundtrip_in_both_formats() {
    let codec = codec();
    let profile = sample_profile();
    for format in [ContentType::BinaryMap, ContentType::Json] {
        let bytes = codec.pack(&profile, format).unwrap();
        let back: Profile = codec
            .unpack(&bytes, format, codec.accept(), "en")
            .await
            .unwrap();
        assert_eq!(back, profile, "{format}");
    }
}

#[tokio::test]
async fn binary_map_keeps_map_nulls_and_drops_list_nulls() {
    let codec = codec();
    let mut value = sample_value();
    if let PackValue::Object(obj) = &mut value {
        obj.insert("tags".to_owned(), PackValue::from(json!(["a", null, "b"])));
    }
    let bytes = entity_pack::pack(&value, ContentType::BinaryMap).unwrap();
    let profile: Profile = codec
        .unpack(&bytes, ContentType::BinaryMap, &[ContentType::BinaryMap], "en")
        .await
        .unwrap();
    assert_eq!(profile.tags, ["a", "b"]);
    assert_eq!(profile.nickname, None);
    assert_eq!(profile.billing, None);
}

#[tokio::test]
async fn json_payload_with_base64_avatar() {
    let codec = codec();
    let bytes = codec.pack(&sample_profile(), ContentType::Json).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.contains("\"displayName\":\"Ada\""), "{text}");
    assert!(text.contains("data:application/octet-stream;base64,"), "{text}");
    let back: Profile = codec
        .unpack(&bytes, ContentType::Json, &[ContentType::Json], "en")
        .await
        .unwrap();
    assert_eq!(back.avatar, [0, 1, 2, 255]);
}

#[tokio::test]
async fn data_uri_text_stays_text_through_json() {
    let codec = codec();
    let mut profile = sample_profile();
    profile.display_name = "data:application/octet-stream;base64,AAEC".to_owned();
    profile.tags = vec!["data:application/octet-stream;base64,/w==".to_owned()];
    for format in [ContentType::Json, ContentType::BinaryMap] {
        let bytes = codec.pack(&profile, format).unwrap();
        let back: Profile = codec
            .unpack(&bytes, format, codec.accept(), "en")
            .await
            .unwrap();
        assert_eq!(back, profile, "{format}");
    }
}
