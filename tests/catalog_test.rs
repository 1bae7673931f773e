use kitchen_critic::{CombinationVariant, EmojiCatalog, EmojiRecord};

fn variant(is_latest: bool, url: &str, alt: &str) -> CombinationVariant {
    CombinationVariant {
        is_latest,
        g_static_url: url.to_string(),
        alt: alt.to_string(),
    }
}

fn record(
    id: &str,
    alt: &str,
    combinations: Vec<(&str, Vec<CombinationVariant>)>,
) -> EmojiRecord {
    EmojiRecord {
        emoji_codepoint: id.to_string(),
        alt: alt.to_string(),
        keywords: Vec::new(),
        combinations: combinations
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    }
}

fn sample_catalog() -> EmojiCatalog {
    EmojiCatalog::from_records(vec![
        record(
            "1f600",
            "grinning face",
            vec![
                (
                    "1f525",
                    vec![
                        variant(false, "https://img.test/old.png", "old grin-fire"),
                        variant(true, "https://img.test/new.png", "grin-fire"),
                    ],
                ),
                ("1f4a9", vec![]),
            ],
        ),
        record("1f525", "fire", vec![]),
        record("1f4a9", "pile of poo", vec![]),
    ])
}

#[test]
fn resolve_returns_none_for_unknown_ids() {
    let catalog = sample_catalog();
    assert!(catalog.resolve("zzz", "yyy").is_none());
    assert!(catalog.resolve("1f600", "yyy").is_none());
}

#[test]
fn resolve_returns_none_for_empty_ids() {
    let catalog = sample_catalog();
    assert!(catalog.resolve("", "1f525").is_none());
    assert!(catalog.resolve("1f600", "").is_none());
    assert!(catalog.resolve("", "").is_none());
}

#[test]
fn resolve_returns_none_for_empty_variant_list() {
    let catalog = sample_catalog();
    assert!(catalog.resolve("1f600", "1f4a9").is_none());
}

#[test]
fn resolve_picks_the_latest_variant_regardless_of_order() {
    let catalog = sample_catalog();
    let resolved = catalog.resolve("1f600", "1f525").expect("combination");
    assert!(resolved.is_latest);
    assert_eq!(resolved.g_static_url, "https://img.test/new.png");

    // Same pair with the flagged variant listed first.
    let reordered = EmojiCatalog::from_records(vec![record(
        "1f600",
        "grinning face",
        vec![(
            "1f525",
            vec![
                variant(true, "https://img.test/new.png", "grin-fire"),
                variant(false, "https://img.test/old.png", "old grin-fire"),
            ],
        )],
    )]);
    let resolved = reordered.resolve("1f600", "1f525").expect("combination");
    assert_eq!(resolved.g_static_url, "https://img.test/new.png");
}

#[test]
fn resolve_falls_back_to_first_when_none_flagged_latest() {
    let catalog = EmojiCatalog::from_records(vec![record(
        "a",
        "left",
        vec![(
            "b",
            vec![
                variant(false, "https://img.test/first.png", "first"),
                variant(false, "https://img.test/second.png", "second"),
            ],
        )],
    )]);
    let resolved = catalog.resolve("a", "b").expect("combination");
    assert_eq!(resolved.g_static_url, "https://img.test/first.png");
}

#[test]
fn resolve_picks_first_flagged_when_several_flagged_latest() {
    let catalog = EmojiCatalog::from_records(vec![record(
        "a",
        "left",
        vec![(
            "b",
            vec![
                variant(false, "https://img.test/plain.png", "plain"),
                variant(true, "https://img.test/one.png", "one"),
                variant(true, "https://img.test/two.png", "two"),
            ],
        )],
    )]);
    let resolved = catalog.resolve("a", "b").expect("combination");
    assert_eq!(resolved.g_static_url, "https://img.test/one.png");
}

#[test]
fn catalog_loads_from_camel_case_json() {
    let json = r#"[
        {
            "emojiCodepoint": "1f600",
            "alt": "grinning face",
            "keywords": ["grin", "happy"],
            "combinations": {
                "1f525": [
                    {
                        "isLatest": true,
                        "gStaticUrl": "https://img.test/combo.png",
                        "alt": "grin-fire"
                    }
                ]
            }
        },
        {
            "emojiCodepoint": "1f525",
            "alt": "fire"
        }
    ]"#;

    let catalog = EmojiCatalog::from_json_str(json).expect("valid catalog JSON");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.label_of("1f525"), Some("fire"));
    let resolved = catalog.resolve("1f600", "1f525").expect("combination");
    assert_eq!(resolved.alt, "grin-fire");
}
