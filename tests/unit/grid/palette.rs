use super::*;
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn every_palette_has_five_opaque_colors() {
    for name in PaletteName::ALL {
        let p = Palette::get(name);
        assert_eq!(p.name(), name);
        assert_eq!(p.colors().len(), PALETTE_LEN);
        assert!(p.colors().iter().all(|c| c.a == 255));
    }
}

#[test]
fn schema_three_first_color_is_gold() {
    let p = Palette::get(PaletteName::Schema3);
    assert_eq!(p.colors()[0], Rgba8Premul::opaque(0xFF, 0xD7, 0x00));
    assert_eq!(p.colors()[4], Rgba8Premul::opaque(0x8B, 0x00, 0x00));
}

#[test]
fn names_parse_from_labels_and_short_forms() {
    assert_eq!("Schema 3".parse::<PaletteName>().unwrap(), PaletteName::Schema3);
    assert_eq!("schema-2".parse::<PaletteName>().unwrap(), PaletteName::Schema2);
    assert_eq!("SCHEMA4".parse::<PaletteName>().unwrap(), PaletteName::Schema4);
    assert_eq!(" 1 ".parse::<PaletteName>().unwrap(), PaletteName::Schema1);
    assert!(matches!(
        "Schema 5".parse::<PaletteName>(),
        Err(DotwalkError::Palette(_))
    ));
    assert_eq!(PaletteName::Schema2.to_string(), "Schema 2");
}

#[test]
fn names_serialize_as_labels() {
    let v = serde_json::to_value(PaletteName::Schema4).unwrap();
    assert_eq!(v, serde_json::json!("Schema 4"));
    let back: PaletteName = serde_json::from_value(v).unwrap();
    assert_eq!(back, PaletteName::Schema4);
    assert!(serde_json::from_value::<PaletteName>(serde_json::json!("nope")).is_err());
}

#[test]
fn hex_parsing_accepts_rgb_and_rgba() {
    assert_eq!(parse_hex_rgb("#e54f6d").unwrap(), Rgba8Premul::opaque(0xE5, 0x4F, 0x6D));
    assert_eq!(parse_hex_rgb("FFFFFF00").unwrap().to_array(), [0, 0, 0, 0]);
    assert!(parse_hex_rgb("#12345").is_err());
    assert!(parse_hex_rgb("#GG0000").is_err());
}

#[test]
fn pick_draws_only_palette_colors() {
    let p = Palette::get(PaletteName::Schema1);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        assert!(p.contains(p.pick(&mut rng)));
    }
}

#[test]
fn hex_colors_round_trip_through_parser() {
    let p = Palette::get(PaletteName::Schema1);
    let hex = p.hex_colors();
    assert_eq!(hex[0], "#22162B");
    for (h, c) in hex.iter().zip(p.colors()) {
        assert_eq!(parse_hex_rgb(h).unwrap(), *c);
    }
}
