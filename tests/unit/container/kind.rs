use super::*;

#[test]
fn tags_are_unique_and_reversible() {
    for (i, kind) in ALL.into_iter().enumerate() {
        assert_eq!(kind.tag(), i as u32);
        assert_eq!(AssetKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(AssetKind::from_tag(999), None);
}

#[test]
fn classify_by_extension_ignores_case() {
    assert_eq!(AssetKind::from_path("a/b/sprite.PNG"), AssetKind::Png);
    assert_eq!(AssetKind::from_path("photo.jpeg"), AssetKind::Jpeg);
    assert_eq!(AssetKind::from_path("theme.Ogg"), AssetKind::Ogg);
    assert_eq!(AssetKind::from_path("mono.otf"), AssetKind::Font);
    assert_eq!(AssetKind::from_path("level.dat"), AssetKind::Data);
}

#[test]
fn unknown_or_missing_extension_is_raw() {
    assert_eq!(AssetKind::from_path("README"), AssetKind::Raw);
    assert_eq!(AssetKind::from_path("archive.zzz"), AssetKind::Raw);
    assert_eq!(AssetKind::from_path(".hidden"), AssetKind::Raw);
}

#[test]
fn family_predicates() {
    assert!(AssetKind::Gif.is_image());
    assert!(!AssetKind::Wav.is_image());
    assert!(AssetKind::Music.is_audio());
    assert!(AssetKind::Font.is_font());
    assert_eq!(
        AssetKind::from_path(format!("x.{}", AssetKind::Jpeg.extension())),
        AssetKind::Jpeg
    );
}

#[test]
fn serializes_snake_case() {
    assert_eq!(serde_json::to_string(&AssetKind::Png).unwrap(), "\"png\"");
}
