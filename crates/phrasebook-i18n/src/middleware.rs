//! axum integration.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(engine.clone(), negotiate_locale));
//! ```
//!
//! Handlers read the result with `Extension<LocaleBinding>`.

use crate::carrier::RequestContext;
use crate::engine::Engine;
use axum::extract::{Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Negotiate the request locale, apply the query override, and store the
/// resulting [`LocaleBinding`](crate::LocaleBinding) in the request extensions.
pub async fn negotiate_locale(
    State(engine): State<Arc<Engine>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let mut carrier = RequestContext::new().with_url(request.uri().to_string());

    if let Some(header) = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
    {
        carrier = carrier.with_accept_language(header);
    }

    if let Some(name) = engine.config().cookie.as_deref() {
        if let Some(cookie) = jar.get(name) {
            carrier = carrier.with_cookie(name, cookie.value());
        }
    }

    engine.negotiate(&mut carrier);
    engine.override_locale_from_query(&mut carrier);

    request.extensions_mut().insert(carrier.into_binding());
    next.run(request).await
}
