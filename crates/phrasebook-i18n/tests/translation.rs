//! Translation behaviour against real catalog files.

use phrasebook_config::I18nConfig;
use phrasebook_i18n::{t, tn, Engine, Entry, FormatArg, MemoryStore, PhraseTable};
use phrasebook_test_utils::{assert_ok, read_locale_file, temp_locales_dir};
use std::path::PathBuf;
use std::sync::Arc;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data/locales")
}

/// Engine over the checked-in fixtures that never writes to them.
fn fixture_engine() -> Engine {
    let config = I18nConfig::default()
        .with_directory(fixtures())
        .with_update_files(false);
    assert_ok!(Engine::new(config))
}

fn engine_in(dir: &tempfile::TempDir) -> Engine {
    assert_ok!(Engine::new(I18nConfig::default().with_directory(dir.path())))
}

#[test]
fn test_existing_translations() {
    let engine = fixture_engine();

    assert_eq!(t!(engine, Some("de"), "Hello"), "Hallo");
    assert_eq!(t!(engine, Some("de"), "Hello %s", "Ada"), "Hallo Ada");
    assert_eq!(
        t!(engine, Some("de"), "Welcome to %s, %s", "Ada", "Berlin"),
        "Willkommen in Berlin, Ada"
    );
    assert_eq!(tn!(engine, Some("de"), "%s cat", "%s cats", 1), "1 Katze");
    assert_eq!(tn!(engine, Some("de"), "%s cat", "%s cats", 3), "3 Katzen");
    assert_eq!(t!(engine, Some("en"), "Hello"), "Hello");
}

#[test]
fn test_plural_buckets() {
    let engine = fixture_engine();

    for (count, expected) in [(1, "1 cat"), (2, "2 cats"), (0, "0 cat"), (-1, "-1 cat")] {
        assert_eq!(tn!(engine, Some("en"), "%s cat", "%s cats", count), expected);
    }
    assert_eq!(tn!(engine, Some("en"), "%s cat", "%s cats", 1.5), "1.5 cat");
    assert_eq!(tn!(engine, Some("en"), "%s cat", "%s cats", "7"), "7 cats");
    assert_eq!(tn!(engine, Some("en"), "%s cat", "%s cats", "lots"), "lots cat");
}

#[test]
fn test_new_key_is_persisted_as_identity() {
    let dir = temp_locales_dir(&[]);
    let engine = engine_in(&dir);

    assert_eq!(engine.translate(Some("en"), "Good morning", &[]), "Good morning");
    assert_eq!(
        read_locale_file(&dir, "en.json"),
        "{\n\t\"Good morning\": \"Good morning\"\n}"
    );
}

#[test]
fn test_new_plural_key_is_persisted_as_pair() {
    let dir = temp_locales_dir(&[]);
    let engine = engine_in(&dir);

    assert_eq!(engine.translate_plural(Some("en"), "%d dog", "%d dogs", 2, &[]), "2 dogs");

    let stored: PhraseTable =
        serde_json::from_str(&read_locale_file(&dir, "en.json")).unwrap();
    assert_eq!(stored["%d dog"], Entry::plural("%d dog", "%d dogs"));
}

#[test]
fn test_missing_file_is_bootstrapped() {
    let dir = temp_locales_dir(&[]);
    let engine = engine_in(&dir);

    engine.preload(&["fr"]);
    assert_eq!(read_locale_file(&dir, "fr.json"), "{}");
}

#[test]
fn test_missing_directory_is_created() {
    let dir = temp_locales_dir(&[]);
    let locales = dir.path().join("nested/locales");
    let engine = Engine::new(I18nConfig::default().with_directory(&locales)).unwrap();

    engine.translate(Some("en"), "Hello", &[]);
    assert!(locales.join("en.json").is_file());
}

#[test]
fn test_round_trip_in_fresh_engine() {
    let dir = temp_locales_dir(&[]);
    let first = engine_in(&dir);
    first.translate(Some("de"), "Hello", &[]);
    first.translate_plural(Some("de"), "%s cat", "%s cats", 1, &[]);
    let written = first.catalog("de");

    let second = engine_in(&dir);
    assert_eq!(second.catalog("de"), written);
}

#[test]
fn test_keys_are_sorted_in_blob() {
    let dir = temp_locales_dir(&[]);
    let engine = engine_in(&dir);
    for key in ["zebra", "apple", "mango"] {
        engine.translate(Some("en"), key, &[]);
    }

    assert_eq!(
        read_locale_file(&dir, "en.json"),
        "{\n\t\"apple\": \"apple\",\n\t\"mango\": \"mango\",\n\t\"zebra\": \"zebra\"\n}"
    );
}

#[test]
fn test_repeat_translation_writes_once() {
    let store = Arc::new(MemoryStore::new());
    let engine = Engine::with_store(I18nConfig::default(), store.clone()).unwrap();

    engine.translate(Some("en"), "Hello", &[]);
    let after_first = store.write_count();

    for _ in 0..5 {
        engine.translate(Some("en"), "Hello", &[]);
        engine.translate(Some("en"), "Hello", &[FormatArg::from("x")]);
    }
    assert_eq!(store.write_count(), after_first);
}

#[test]
fn test_malformed_file_is_replaced_on_next_registration() {
    let dir = temp_locales_dir(&[("it.json", "{ not json")]);
    let engine = engine_in(&dir);

    assert!(engine.catalog("it").is_empty());
    // Nothing is written until a phrase is registered
    assert_eq!(read_locale_file(&dir, "it.json"), "{ not json");

    assert_eq!(engine.translate(Some("it"), "Hello", &[]), "Hello");
    assert_eq!(read_locale_file(&dir, "it.json"), "{\n\t\"Hello\": \"Hello\"\n}");
}

#[test]
fn test_malformed_fixture_does_not_abort() {
    let engine = fixture_engine();
    assert_eq!(engine.translate(Some("broken"), "Hello", &[]), "Hello");
    assert_eq!(engine.stats().dirty_locales, vec!["broken"]);
}

#[test]
fn test_unwritable_directory_degrades_to_memory() {
    let dir = temp_locales_dir(&[("not-a-dir", "")]);
    let config = I18nConfig::default().with_directory(dir.path().join("not-a-dir"));
    let engine = Engine::new(config).unwrap();

    assert_eq!(engine.translate(Some("en"), "Hello", &[]), "Hello");
    assert_eq!(engine.translate(Some("en"), "Hello", &[]), "Hello");
    assert_eq!(engine.stats().dirty_locales, vec!["en"]);
    assert_eq!(engine.flush(), 0);
}

#[test]
fn test_flush_retries_after_directory_appears() {
    let dir = temp_locales_dir(&[("locales", "")]);
    let locales = dir.path().join("locales");
    let engine = Engine::new(I18nConfig::default().with_directory(&locales)).unwrap();

    engine.translate(Some("en"), "Hello", &[]);
    assert_eq!(engine.stats().dirty_locales, vec!["en"]);

    std::fs::remove_file(&locales).unwrap();
    assert_eq!(engine.flush(), 1);
    assert!(engine.stats().dirty_locales.is_empty());
    assert_eq!(
        std::fs::read_to_string(locales.join("en.json")).unwrap(),
        "{\n\t\"Hello\": \"Hello\"\n}"
    );
}

#[test]
fn test_concurrent_registration() {
    let dir = temp_locales_dir(&[]);
    let engine = Arc::new(engine_in(&dir));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                for j in 0..25 {
                    let key = format!("phrase {}", (i * 25 + j) % 50);
                    assert_eq!(engine.translate(Some("en"), &key, &[]), key);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stored: PhraseTable =
        serde_json::from_str(&read_locale_file(&dir, "en.json")).unwrap();
    assert_eq!(stored.len(), 50);
    assert_eq!(stored, engine.catalog("en"));
}
