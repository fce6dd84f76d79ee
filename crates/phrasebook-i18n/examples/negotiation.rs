//! Negotiate locales for a handful of simulated requests.

use phrasebook_config::I18nConfig;
use phrasebook_i18n::{st, stn, Engine, LocaleCarrier, RequestContext};
use phrasebook_log::LogConfig;

fn main() -> anyhow::Result<()> {
    phrasebook_log::init(LogConfig::from_env())?;

    let config = I18nConfig::default()
        .with_directory(std::env::temp_dir().join("phrasebook-negotiation"))
        .with_cookie("lang")
        .with_locales(["en", "de", "fr"]);
    let engine = Engine::new(config)?;

    let requests = [
        RequestContext::new(),
        RequestContext::new().with_accept_language("fr-CA,fr;q=0.8,en;q=0.5"),
        RequestContext::new()
            .with_accept_language("en-US")
            .with_cookie("lang", "de"),
        RequestContext::new()
            .with_url("/checkout?locale=IT")
            .with_cookie("lang", "de"),
    ];

    for mut request in requests {
        engine.negotiate(&mut request);
        engine.override_locale_from_query(&mut request);

        let binding = request.binding();
        println!(
            "locale={} languages={:?} region={:?}",
            engine.get_effective_locale(&request),
            binding.languages,
            binding.region
        );

        let scope = engine.scope(&request);
        println!("  {}", st!(scope, "Welcome back, %s", "Ada"));
        println!("  {}", stn!(scope, "%d item in your cart", "%d items in your cart", 3));
    }

    println!("written: {}", engine.flush());
    Ok(())
}
