//! Translation lookup and locale negotiation for Phrasebook.
//!
//! Phrases are looked up by their source text. A phrase seen for the first
//! time is stored as its own translation and written back to the locale's
//! catalog file, so catalogs fill themselves as the application runs.
//! Request negotiation only picks locales the engine already knows.
//!
//! ```no_run
//! use phrasebook_config::I18nConfig;
//! use phrasebook_i18n::{t, tn, Engine, RequestContext};
//!
//! let config = I18nConfig::default()
//!     .with_directory("locales")
//!     .with_locales(["en", "de"]);
//! let engine = Engine::new(config).unwrap();
//!
//! let mut request = RequestContext::new().with_accept_language("de-AT,en;q=0.8");
//! let locale = engine.negotiate(&mut request);
//!
//! let greeting = t!(engine, Some(locale.as_str()), "Hello %s", "Ada");
//! let cats = tn!(engine, Some(locale.as_str()), "%s cat", "%s cats", 3);
//! ```

pub mod carrier;
pub mod catalog;
pub mod engine;
pub mod entry;
pub mod error;
pub mod format;
pub mod negotiate;
pub mod plural;
pub mod scope;
pub mod storage;

#[cfg(feature = "axum")]
pub mod middleware;

pub use carrier::{LocaleBinding, LocaleCarrier, RequestContext};
pub use catalog::CatalogStore;
pub use engine::{CatalogStats, Engine};
pub use entry::{Entry, PhraseTable};
pub use error::I18nError;
pub use format::{vsprintf, FormatArg};
pub use negotiate::{parse_accept_language, AcceptLanguage};
pub use plural::PluralCategory;
pub use scope::LocaleScope;
pub use storage::{BlobStore, FsStore, MemoryStore};

/// Translate a phrase on an [`Engine`].
///
/// `t!(engine, locale, "phrase", args..)` where `locale` is an `Option<&str>`.
#[macro_export]
macro_rules! t {
    ($engine:expr, $locale:expr, $phrase:expr) => {
        $engine.translate($locale, $phrase, &[])
    };
    ($engine:expr, $locale:expr, $phrase:expr, $($arg:expr),+ $(,)?) => {
        $engine.translate($locale, $phrase, &[$($crate::FormatArg::from($arg)),+])
    };
}

/// Translate a plural phrase on an [`Engine`].
///
/// `tn!(engine, locale, "singular", "plural", count, args..)`.
#[macro_export]
macro_rules! tn {
    ($engine:expr, $locale:expr, $singular:expr, $plural:expr, $count:expr) => {
        $engine.translate_plural($locale, $singular, $plural, $count, &[])
    };
    ($engine:expr, $locale:expr, $singular:expr, $plural:expr, $count:expr, $($arg:expr),+ $(,)?) => {
        $engine.translate_plural(
            $locale,
            $singular,
            $plural,
            $count,
            &[$($crate::FormatArg::from($arg)),+],
        )
    };
}

/// Translate a phrase on a [`LocaleScope`].
#[macro_export]
macro_rules! st {
    ($scope:expr, $phrase:expr) => {
        $scope.t($phrase, &[])
    };
    ($scope:expr, $phrase:expr, $($arg:expr),+ $(,)?) => {
        $scope.t($phrase, &[$($crate::FormatArg::from($arg)),+])
    };
}

/// Translate a plural phrase on a [`LocaleScope`].
#[macro_export]
macro_rules! stn {
    ($scope:expr, $singular:expr, $plural:expr, $count:expr) => {
        $scope.tn($singular, $plural, $count, &[])
    };
    ($scope:expr, $singular:expr, $plural:expr, $count:expr, $($arg:expr),+ $(,)?) => {
        $scope.tn($singular, $plural, $count, &[$($crate::FormatArg::from($arg)),+])
    };
}
