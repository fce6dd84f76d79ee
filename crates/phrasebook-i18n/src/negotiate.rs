//! Locale negotiation from request hints.
//!
//! Sources are applied in rising priority: engine default, `accept-language`,
//! the configured cookie, and (as a separate call) the `locale` query
//! parameter. A hint only becomes the request locale when the engine already
//! knows that locale, so request input never creates catalogs.

use crate::carrier::{LocaleBinding, LocaleCarrier};
use crate::engine::Engine;
use phrasebook_log::spans::negotiation_span;
use tracing::debug;
use url::Url;

/// Language and region subtags from an `accept-language` header, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptLanguage {
    pub languages: Vec<String>,
    pub regions: Vec<String>,
}

/// Parse an `accept-language` header.
///
/// Quality weights are dropped without reordering. Each entry contributes its
/// first subtag as a language and, when present, its second as a region.
pub fn parse_accept_language(header: &str) -> AcceptLanguage {
    let mut parsed = AcceptLanguage::default();

    for entry in header.split(',') {
        let tag = entry.split(';').next().unwrap_or_default().trim();
        let mut subtags = tag.splitn(3, '-');

        if let Some(language) = subtags.next().filter(|s| !s.is_empty()) {
            parsed.languages.push(language.to_lowercase());
        }
        if let Some(region) = subtags.next().filter(|s| !s.is_empty()) {
            parsed.regions.push(region.to_lowercase());
        }
    }

    parsed
}

/// Lowercased `locale` query parameter of a request target, if non-empty.
pub fn query_locale(target: &str) -> Option<String> {
    let base = Url::parse("http://localhost").ok()?;
    let url = base.join(target).ok()?;
    let locale = url
        .query_pairs()
        .find(|(key, _)| key == "locale")
        .map(|(_, value)| value.to_lowercase());
    locale.filter(|l| !l.is_empty())
}

impl Engine {
    /// Resolve and bind a locale for `carrier` from its header and cookie.
    ///
    /// Fills in the carrier's language and region metadata. Returns the bound locale.
    pub fn negotiate<C>(&self, carrier: &mut C) -> String
    where
        C: LocaleCarrier + ?Sized,
    {
        let span = negotiation_span(carrier.url());
        let _guard = span.enter();

        let default = self.default_locale();
        let mut binding = LocaleBinding {
            languages: vec![default.clone()],
            regions: vec![default.clone()],
            language: Some(default.clone()),
            region: Some(default.clone()),
            locale: Some(default),
        };

        if let Some(header) = carrier.accept_language() {
            let parsed = parse_accept_language(header);
            if let Some(first) = parsed.languages.first() {
                binding.language = Some(first.clone());
                binding.languages = parsed.languages;
            }
            if let Some(first) = parsed.regions.first() {
                binding.region = Some(first.clone());
                binding.regions = parsed.regions;
            }
        }

        if let Some(name) = self.config().cookie.as_deref() {
            if let Some(value) = carrier.cookie(name).filter(|v| !v.is_empty()) {
                debug!(cookie = name, value, "locale from cookie");
                binding.language = Some(value.to_string());
            }
        }

        let language = binding.language.clone().unwrap_or_default();
        *carrier.binding_mut() = binding;
        self.bind_carrier_locale(carrier, &language)
    }

    /// Rebind `carrier` to its URL's `locale` query parameter, lowercased.
    ///
    /// Returns the carrier's effective locale afterwards, which is unchanged
    /// when the parameter names an unknown locale. Returns `None` when the
    /// carrier has no URL or the URL has no such parameter.
    pub fn override_locale_from_query<C>(&self, carrier: &mut C) -> Option<String>
    where
        C: LocaleCarrier + ?Sized,
    {
        let locale = query_locale(carrier.url()?)?;
        debug!(locale = %locale, "overriding locale from query");
        Some(self.bind_carrier_locale(carrier, &locale))
    }
}
