//! Locale-bound translation handles.

use crate::carrier::LocaleCarrier;
use crate::engine::Engine;
use crate::format::FormatArg;

/// An [`Engine`] paired with one locale, for code that translates many
/// phrases on behalf of the same request.
#[derive(Clone)]
pub struct LocaleScope<'a> {
    engine: &'a Engine,
    locale: String,
}

impl<'a> LocaleScope<'a> {
    pub fn new(engine: &'a Engine, locale: impl Into<String>) -> Self {
        Self {
            engine,
            locale: locale.into(),
        }
    }

    /// Locale this scope translates into.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Switch this scope to `code`. Empty codes are ignored.
    ///
    /// The table is loaded on the first translation through the scope.
    pub fn set_locale(&mut self, code: &str) -> &str {
        if !code.is_empty() {
            self.locale = code.to_string();
        }
        &self.locale
    }

    pub fn t(&self, phrase: &str, args: &[FormatArg]) -> String {
        self.engine.translate(Some(&self.locale), phrase, args)
    }

    pub fn tn(
        &self,
        singular: &str,
        plural: &str,
        count: impl Into<FormatArg>,
        args: &[FormatArg],
    ) -> String {
        self.engine
            .translate_plural(Some(&self.locale), singular, plural, count, args)
    }
}

impl Engine {
    /// Scope bound to the carrier's effective locale.
    pub fn scope<C>(&self, carrier: &C) -> LocaleScope<'_>
    where
        C: LocaleCarrier + ?Sized,
    {
        LocaleScope::new(self, self.get_effective_locale(carrier))
    }

    /// Scope bound to `locale`, or the default locale when `locale` is empty.
    pub fn scope_for(&self, locale: &str) -> LocaleScope<'_> {
        if locale.is_empty() {
            LocaleScope::new(self, self.default_locale())
        } else {
            LocaleScope::new(self, locale)
        }
    }
}
