//! Request-scoped locale carriers.

use std::collections::HashMap;

/// Locale metadata attached to one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleBinding {
    /// Primary language subtags from `accept-language`, in header order.
    pub languages: Vec<String>,
    /// Region subtags from `accept-language`, in header order.
    pub regions: Vec<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    /// Locale used for translations on this request. `None` means the engine default.
    pub locale: Option<String>,
}

/// A request-like object the engine reads locale hints from and binds a locale to.
pub trait LocaleCarrier {
    /// Raw `accept-language` header value.
    fn accept_language(&self) -> Option<&str>;

    /// Value of the cookie called `name`.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Request target, e.g. `/path?locale=de`.
    fn url(&self) -> Option<&str>;

    fn binding(&self) -> &LocaleBinding;

    fn binding_mut(&mut self) -> &mut LocaleBinding;
}

/// Plain owned carrier.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    accept_language: Option<String>,
    cookies: HashMap<String, String>,
    url: Option<String>,
    binding: LocaleBinding,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `accept-language` header.
    pub fn with_accept_language(mut self, header: impl Into<String>) -> Self {
        self.accept_language = Some(header.into());
        self
    }

    /// Add a cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Set the request target.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Start with a locale already bound.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.binding.locale = Some(locale.into());
        self
    }

    /// Take the binding, dropping the request hints.
    pub fn into_binding(self) -> LocaleBinding {
        self.binding
    }
}

impl LocaleCarrier for RequestContext {
    fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn binding(&self) -> &LocaleBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut LocaleBinding {
        &mut self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_accessors() {
        let ctx = RequestContext::new()
            .with_accept_language("de-AT")
            .with_cookie("lang", "fr")
            .with_url("/?locale=it")
            .with_locale("en");

        assert_eq!(ctx.accept_language(), Some("de-AT"));
        assert_eq!(ctx.cookie("lang"), Some("fr"));
        assert_eq!(ctx.cookie("other"), None);
        assert_eq!(ctx.url(), Some("/?locale=it"));
        assert_eq!(ctx.binding().locale.as_deref(), Some("en"));
    }

    #[test]
    fn test_empty_context() {
        let mut ctx = RequestContext::new();
        assert!(ctx.accept_language().is_none());
        assert!(ctx.url().is_none());
        assert_eq!(ctx.binding(), &LocaleBinding::default());

        ctx.binding_mut().locale = Some("ja".to_string());
        assert_eq!(ctx.into_binding().locale.as_deref(), Some("ja"));
    }
}
