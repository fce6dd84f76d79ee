//! The translation engine.
//!
//! An [`Engine`] owns the configuration, the catalog and the persistence
//! bridge. Every public operation is infallible from the caller's point of
//! view: storage and locale problems are logged and the engine carries on
//! with the default locale, an empty table, or its in-memory state.

use crate::carrier::LocaleCarrier;
use crate::catalog::CatalogStore;
use crate::entry::{Entry, PhraseTable};
use crate::error::I18nError;
use crate::format::{vsprintf, FormatArg};
use crate::plural;
use crate::storage::{BlobStore, FsStore, Persistence};
use parking_lot::RwLock;
use phrasebook_config::I18nConfig;
use phrasebook_log::spans::catalog_span;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Snapshot of catalog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    /// Loaded locales, sorted.
    pub loaded_locales: Vec<String>,
    /// Entries across all loaded locales.
    pub phrases: usize,
    /// Locales with changes not yet written.
    pub dirty_locales: Vec<String>,
    /// Storage extension in effect.
    pub extension: String,
}

/// Translation engine.
pub struct Engine {
    config: I18nConfig,
    default_locale: RwLock<String>,
    catalog: RwLock<CatalogStore>,
    persistence: Persistence,
}

impl Engine {
    /// Build an engine backed by the file system.
    pub fn new(config: I18nConfig) -> Result<Self, I18nError> {
        Self::with_store(config, Arc::new(FsStore::new()))
    }

    /// Build an engine backed by `store`. Preloads `config.locales`.
    pub fn with_store(config: I18nConfig, store: Arc<dyn BlobStore>) -> Result<Self, I18nError> {
        config.validate()?;

        let engine = Self {
            default_locale: RwLock::new(config.default_locale.clone()),
            catalog: RwLock::new(CatalogStore::new()),
            persistence: Persistence::new(&config, store),
            config,
        };

        let preload = engine.config.locales.clone();
        engine.preload(&preload);
        Ok(engine)
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Current engine-wide default locale.
    pub fn default_locale(&self) -> String {
        self.default_locale.read().clone()
    }

    /// Translate `phrase` in `locale`, registering it if unseen.
    ///
    /// A missing or empty `locale` falls back to the default locale. `args`
    /// are substituted only when non-empty.
    pub fn translate(&self, locale: Option<&str>, phrase: &str, args: &[FormatArg]) -> String {
        let locale = self.resolve_locale(locale);
        let entry = self.lookup(&locale, phrase, None);
        let text = entry.singular();

        if args.is_empty() {
            text.to_string()
        } else {
            vsprintf(text, args)
        }
    }

    /// Translate with plural selection on `count`.
    ///
    /// The selected form is formatted with `count` first (which also turns
    /// `%%s` into `%s`), then with `args` if there are any.
    pub fn translate_plural(
        &self,
        locale: Option<&str>,
        singular: &str,
        plural: &str,
        count: impl Into<FormatArg>,
        args: &[FormatArg],
    ) -> String {
        let count = count.into();
        let locale = self.resolve_locale(locale);
        let entry = self.lookup(&locale, singular, Some(plural));

        let form = entry.select(plural::category(&count));
        let msg = vsprintf(form, std::slice::from_ref(&count));

        if args.is_empty() {
            msg
        } else {
            vsprintf(&msg, args)
        }
    }

    /// Set the engine-wide default locale.
    ///
    /// Any non-empty code is accepted. Its table is loaded, or bootstrapped,
    /// on the first translation. An empty code is ignored. Returns the default
    /// in effect afterwards.
    pub fn set_default_locale(&self, code: &str) -> String {
        if code.is_empty() {
            warn!("ignoring empty default locale");
            return self.default_locale();
        }

        *self.default_locale.write() = code.to_string();
        debug!(locale = code, "default locale set");
        code.to_string()
    }

    /// Bind `code` to one carrier.
    ///
    /// Carrier codes come from request input, so only a known locale is
    /// bound: the default, or one already in the catalog through preloading
    /// or translation. Binding never touches storage. Anything else leaves the
    /// binding unchanged. Returns the carrier's effective locale afterwards.
    pub fn bind_carrier_locale<C>(&self, carrier: &mut C, code: &str) -> String
    where
        C: LocaleCarrier + ?Sized,
    {
        if code.is_empty() {
            warn!("ignoring empty locale for request");
        } else if self.is_known_locale(code) {
            carrier.binding_mut().locale = Some(code.to_string());
        } else {
            debug!(locale = code, "locale not loaded, keeping request locale");
        }
        self.get_effective_locale(carrier)
    }

    /// True for the default locale and for every locale in the catalog.
    pub fn is_known_locale(&self, code: &str) -> bool {
        *self.default_locale.read() == code || self.catalog.read().contains(code)
    }

    /// The carrier's bound locale, or the default when none is bound.
    pub fn get_effective_locale<C>(&self, carrier: &C) -> String
    where
        C: LocaleCarrier + ?Sized,
    {
        match carrier.binding().locale.as_deref() {
            Some(locale) if !locale.is_empty() => locale.to_string(),
            _ => self.default_locale(),
        }
    }

    /// Load each locale that is not loaded yet. Empty codes are skipped.
    pub fn preload<S: AsRef<str>>(&self, locales: &[S]) {
        for locale in locales.iter().map(AsRef::as_ref) {
            if locale.is_empty() {
                warn!("skipping empty locale in preload list");
                continue;
            }
            self.ensure_locale(locale);
        }
    }

    /// Copy of the phrase table for `locale`, loading it if needed.
    pub fn catalog(&self, locale: &str) -> PhraseTable {
        let locale = self.resolve_locale(Some(locale));
        self.ensure_locale(&locale);
        self.catalog
            .read()
            .table(&locale)
            .cloned()
            .unwrap_or_default()
    }

    /// Loaded locale codes, sorted.
    pub fn loaded_locales(&self) -> Vec<String> {
        self.catalog.read().locales()
    }

    /// Counts and dirty state of the loaded catalog.
    pub fn stats(&self) -> CatalogStats {
        let catalog = self.catalog.read();
        CatalogStats {
            loaded_locales: catalog.locales(),
            phrases: catalog.phrase_count(),
            dirty_locales: catalog.dirty_locales(),
            extension: self.persistence.extension(),
        }
    }

    /// Write every table with unsaved changes. Returns how many were written.
    pub fn flush(&self) -> usize {
        if !self.persistence.is_enabled() {
            return 0;
        }

        phrasebook_log::timed!("flush", {
            let mut catalog = self.catalog.write();
            let dirty = catalog.dirty_locales();
            dirty
                .iter()
                .filter(|locale| self.persist(&mut catalog, locale))
                .count()
        })
    }

    fn resolve_locale(&self, locale: Option<&str>) -> String {
        match locale {
            Some(locale) if !locale.is_empty() => locale.to_string(),
            _ => {
                let error = I18nError::MissingLocale {
                    default: self.default_locale(),
                };
                warn!(%error, "check the context of the translation call");
                self.default_locale()
            }
        }
    }

    /// Stored entry for `key`, registering the identity entry when unseen.
    fn lookup(&self, locale: &str, key: &str, plural: Option<&str>) -> Entry {
        if let Some(entry) = self.catalog.read().entry(locale, key) {
            return entry.clone();
        }

        let mut catalog = self.catalog.write();
        self.load_into(&mut catalog, locale);

        let candidate = match plural {
            Some(plural) => Entry::plural(key, plural),
            None => Entry::simple(key),
        };
        let (entry, inserted) = catalog.register(locale, key, candidate);
        if inserted {
            debug!(locale, key, "registered new phrase");
            self.persist(&mut catalog, locale);
        }
        entry
    }

    fn ensure_locale(&self, locale: &str) {
        if self.catalog.read().contains(locale) {
            return;
        }
        let mut catalog = self.catalog.write();
        self.load_into(&mut catalog, locale);
    }

    /// Load `locale` into `catalog` unless already present.
    fn load_into(&self, catalog: &mut CatalogStore, locale: &str) {
        if catalog.contains(locale) {
            return;
        }

        let span = catalog_span(locale, "load");
        let _guard = span.enter();

        match self.persistence.load(locale) {
            Ok(table) => {
                debug!(phrases = table.len(), "catalog loaded");
                catalog.insert_loaded(locale, table);
            }
            Err(error @ I18nError::StorageRead { .. }) => {
                debug!(%error, "initializing catalog");
                catalog.insert_loaded(locale, PhraseTable::new());
                self.persist(catalog, locale);
            }
            Err(error @ I18nError::UnsafeLocale(_)) => {
                warn!(%error, "keeping catalog in memory only");
                catalog.insert_memory_only(locale);
            }
            Err(error) => {
                error!(%error, "continuing with an empty catalog");
                catalog.insert_loaded(locale, PhraseTable::new());
            }
        }
    }

    /// Save `locale` and mark it clean on success. Returns whether a write happened.
    fn persist(&self, catalog: &mut CatalogStore, locale: &str) -> bool {
        if !catalog.is_persistent(locale) {
            return false;
        }
        let Some(table) = catalog.table(locale) else {
            return false;
        };

        match self.persistence.save(locale, table) {
            Ok(true) => {
                catalog.mark_clean(locale);
                true
            }
            Ok(false) => false,
            Err(error) => {
                error!(locale, %error, "keeping catalog in memory");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::RequestContext;
    use crate::storage::MemoryStore;

    fn engine() -> (Engine, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let config = I18nConfig::default().with_directory("/locales");
        let engine = Engine::with_store(config, store.clone()).unwrap();
        (engine, store)
    }

    #[test]
    fn test_unseen_key_is_identity() {
        let (engine, store) = engine();
        assert_eq!(engine.translate(Some("en"), "Hello", &[]), "Hello");

        let blob = store.get("/locales/en.json").unwrap();
        assert_eq!(blob, "{\n\t\"Hello\": \"Hello\"\n}");
    }

    #[test]
    fn test_known_key_causes_no_write() {
        let (engine, store) = engine();
        engine.translate(Some("en"), "Hello", &[]);
        let writes = store.write_count();

        engine.translate(Some("en"), "Hello", &[]);
        engine.translate(Some("en"), "Hello", &[FormatArg::from("x")]);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_missing_locale_uses_default() {
        let (engine, _store) = engine();
        assert_eq!(engine.translate(None, "Hello", &[]), "Hello");
        assert_eq!(engine.translate(Some(""), "Bye", &[]), "Bye");
        assert!(engine.catalog("en").contains_key("Hello"));
        assert!(engine.catalog("en").contains_key("Bye"));
    }

    #[test]
    fn test_translate_formats_only_with_args() {
        let (engine, _store) = engine();
        assert_eq!(engine.translate(Some("en"), "100% sure", &[]), "100% sure");
        assert_eq!(
            engine.translate(Some("en"), "Hello %s", &[FormatArg::from("Ada")]),
            "Hello Ada"
        );
    }

    #[test]
    fn test_plural_registration_and_selection() {
        let (engine, _store) = engine();

        assert_eq!(engine.translate_plural(Some("en"), "%s cat", "%s cats", 1, &[]), "1 cat");
        assert_eq!(engine.translate_plural(Some("en"), "%s cat", "%s cats", 2, &[]), "2 cats");
        assert_eq!(engine.translate_plural(Some("en"), "%s cat", "%s cats", 0, &[]), "0 cat");
        assert_eq!(engine.translate_plural(Some("en"), "%s cat", "%s cats", -1, &[]), "-1 cat");

        assert_eq!(
            engine.catalog("en").get("%s cat"),
            Some(&Entry::plural("%s cat", "%s cats"))
        );
    }

    #[test]
    fn test_plural_second_pass() {
        let (engine, _store) = engine();
        let msg = engine.translate_plural(
            Some("en"),
            "%%s has %d cat",
            "%%s has %d cats",
            3,
            &[FormatArg::from("Ada")],
        );
        assert_eq!(msg, "Ada has 3 cats");
    }

    #[test]
    fn test_entry_shape_fixed_by_first_registration() {
        let (engine, _store) = engine();

        engine.translate(Some("en"), "sheep", &[]);
        assert_eq!(engine.translate_plural(Some("en"), "sheep", "sheeps", 5, &[]), "sheep");
        assert_eq!(engine.catalog("en")["sheep"], Entry::simple("sheep"));

        engine.translate_plural(Some("en"), "cat", "cats", 1, &[]);
        assert_eq!(engine.translate(Some("en"), "cat", &[]), "cat");
        assert!(engine.catalog("en")["cat"].is_plural());
    }

    #[test]
    fn test_set_default_locale_defers_loading() {
        let (engine, store) = engine();
        assert_eq!(engine.set_default_locale("de"), "de");
        assert_eq!(engine.default_locale(), "de");
        assert!(!engine.loaded_locales().contains(&"de".to_string()));
        assert_eq!(store.write_count(), 0);

        assert_eq!(engine.translate(None, "Hello", &[]), "Hello");
        assert!(store.get("/locales/de.json").is_some());

        assert_eq!(engine.set_default_locale(""), "de");
    }

    #[test]
    fn test_bind_and_get_effective_locale() {
        let (engine, _store) = engine();
        engine.preload(&["fr"]);
        let mut carrier = RequestContext::new();

        assert_eq!(engine.get_effective_locale(&carrier), "en");
        assert_eq!(engine.bind_carrier_locale(&mut carrier, "fr"), "fr");
        assert_eq!(engine.get_effective_locale(&carrier), "fr");
        assert_eq!(engine.bind_carrier_locale(&mut carrier, ""), "fr");
        assert_eq!(engine.bind_carrier_locale(&mut carrier, "en"), "en");

        // Binding a request leaves the default alone
        assert_eq!(engine.default_locale(), "en");
    }

    #[test]
    fn test_bind_unknown_locale_keeps_binding() {
        let (engine, store) = engine();
        let mut carrier = RequestContext::new().with_locale("en");

        assert_eq!(engine.bind_carrier_locale(&mut carrier, "xx"), "en");
        assert!(!engine.is_known_locale("xx"));
        assert!(engine.loaded_locales().is_empty());
        assert_eq!(store.write_count(), 0);

        // A locale becomes bindable once something was translated into it
        engine.translate(Some("xx"), "Hello", &[]);
        assert_eq!(engine.bind_carrier_locale(&mut carrier, "xx"), "xx");
    }

    #[test]
    fn test_preload_and_stats() {
        let store = Arc::new(MemoryStore::new());
        let config = I18nConfig::default()
            .with_directory("/locales")
            .with_locales(["en", "de"]);
        let engine = Engine::with_store(config, store.clone()).unwrap();

        assert_eq!(engine.loaded_locales(), vec!["de", "en"]);
        assert_eq!(store.write_count(), 2);

        engine.translate(Some("de"), "Hello", &[]);
        let stats = engine.stats();
        assert_eq!(stats.loaded_locales, vec!["de", "en"]);
        assert_eq!(stats.phrases, 1);
        assert!(stats.dirty_locales.is_empty());
        assert_eq!(stats.extension, ".json");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = I18nConfig::default().with_default_locale("");
        assert!(matches!(
            Engine::with_store(config, Arc::new(MemoryStore::new())),
            Err(I18nError::Config(_))
        ));
    }

    #[test]
    fn test_persistence_disabled() {
        let store = Arc::new(MemoryStore::new());
        let config = I18nConfig::default().with_update_files(false);
        let engine = Engine::with_store(config, store.clone()).unwrap();

        assert_eq!(engine.translate(Some("en"), "Hello", &[]), "Hello");
        assert_eq!(store.write_count(), 0);
        assert_eq!(engine.stats().dirty_locales, vec!["en"]);
        assert_eq!(engine.flush(), 0);
    }

    #[test]
    fn test_unsafe_locale_stays_in_memory() {
        let (engine, store) = engine();
        assert_eq!(engine.translate(Some("../../etc/passwd"), "Hello", &[]), "Hello");
        assert_eq!(store.write_count(), 0);
        assert!(engine.loaded_locales().contains(&"../../etc/passwd".to_string()));
        assert!(engine.stats().dirty_locales.is_empty());
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
