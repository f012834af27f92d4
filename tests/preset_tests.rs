// Host-side tests for the preset catalog and binaural modes.

use moodscape_core::{all_assets, BinauralMode, PresetError, PresetKey, AMBIENT_ASSET, PRESETS};

#[test]
fn keys_parse_from_their_names() {
    for key in PresetKey::ALL {
        assert_eq!(key.as_str().parse::<PresetKey>(), Ok(key));
        assert_eq!(key.to_string(), key.as_str());
    }
}

#[test]
fn unknown_key_is_rejected() {
    assert_eq!(
        "ketamine".parse::<PresetKey>(),
        Err(PresetError("ketamine".to_string()))
    );
    assert!("Calm".parse::<PresetKey>().is_err(), "keys are case sensitive");
}

#[test]
fn catalog_is_indexed_by_key() {
    assert_eq!(PRESETS.len(), 5);
    for key in PresetKey::ALL {
        let preset = key.preset();
        assert_eq!(preset.key, key);
        assert_eq!(preset.music, format!("{}-music.mp3", key));
        assert_eq!(preset.background, format!("{}-background.png", key));
        assert!(!preset.title.is_empty());
        assert_eq!(preset.subtitle.matches("<br>").count(), 1);
    }
}

#[test]
fn slideshow_order_starts_with_calm() {
    assert_eq!(PresetKey::ALL[0], PresetKey::Calm);
    assert_eq!(PresetKey::default(), PresetKey::Calm);
    assert_eq!(PresetKey::Calm.preset().title, "Calma Creativa");
    assert_eq!(PresetKey::Caapi.preset().title, "Viaje de Introspección");
}

#[test]
fn assets_cover_every_music_loop_and_ambience() {
    let assets = all_assets();
    assert_eq!(assets.len(), 6);
    assert!(assets.contains(&AMBIENT_ASSET));
    for preset in PRESETS.iter() {
        assert!(assets.contains(&preset.music));
    }
}

#[test]
fn only_calm_has_ambient_layer() {
    let with_ambient: Vec<PresetKey> = PresetKey::ALL
        .into_iter()
        .filter(|k| k.has_ambient_layer())
        .collect();
    assert_eq!(with_ambient, vec![PresetKey::Calm]);
}

#[test]
fn binaural_base_frequencies() {
    let expected = [
        (PresetKey::Calm, 110.0),
        (PresetKey::Dopamine, 140.0),
        (PresetKey::Oxytocin, 100.0),
        (PresetKey::Psilocybin, 80.0),
        (PresetKey::Caapi, 60.0),
    ];
    for (key, hz) in expected {
        assert_eq!(key.binaural_base_hz(), hz, "{}", key);
    }
}

#[test]
fn binaural_mode_parsing_is_lenient() {
    assert_eq!(BinauralMode::from_key("none"), BinauralMode::None);
    assert_eq!(BinauralMode::from_key("alpha"), BinauralMode::Alpha);
    assert_eq!(BinauralMode::from_key("theta"), BinauralMode::Theta);
    assert_eq!(BinauralMode::from_key("gamma"), BinauralMode::Theta);
    assert_eq!(BinauralMode::default(), BinauralMode::None);
}

#[test]
fn beat_offsets() {
    assert_eq!(BinauralMode::None.beat_hz(), None);
    assert_eq!(BinauralMode::Alpha.beat_hz(), Some(10.0));
    assert_eq!(BinauralMode::Theta.beat_hz(), Some(6.0));
}
