//! Narrative localization
//!
//! Engines never format text themselves: every event description goes
//! through an injected [`Localize`] implementation.
//!
//! - [`KeyLocalizer`] echoes keys (tests, headless runs)
//! - [`FluentLocalizer`] renders Fluent (FTL) bundles, `en-US` embedded
//! - any `Fn(&str, &[(&str, String)]) -> String` closure

use fluent::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use std::collections::HashMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Locale shipped with the crate
pub const DEFAULT_LOCALE: &str = "en-US";

const EN_US_FTL: &str = include_str!("../locales/en-US.ftl");

/// Resolves a message key plus named arguments into display text
pub trait Localize {
    fn localize(&self, key: &str, args: &[(&str, String)]) -> String;
}

impl<F> Localize for F
where
    F: Fn(&str, &[(&str, String)]) -> String,
{
    fn localize(&self, key: &str, args: &[(&str, String)]) -> String {
        self(key, args)
    }
}

/// Returns the key itself, followed by its arguments
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLocalizer;

impl Localize for KeyLocalizer {
    fn localize(&self, key: &str, args: &[(&str, String)]) -> String {
        if args.is_empty() {
            return key.to_string();
        }
        let rendered: Vec<String> = args.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{} {{{}}}", key, rendered.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Failed to parse FTL for {0}")]
    Parse(String),

    #[error("Locale {0} not loaded")]
    NotLoaded(String),
}

/// Fluent-backed localizer with per-locale bundles and fallback
pub struct FluentLocalizer {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl FluentLocalizer {
    /// Localizer with the embedded `en-US` resource loaded
    pub fn new() -> Result<Self, LocalizationError> {
        let mut localizer = Self {
            bundles: HashMap::new(),
            current_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
        };
        localizer.load_locale(DEFAULT_LOCALE, EN_US_FTL)?;
        Ok(localizer)
    }

    pub fn load_locale(&mut self, locale: &str, ftl_content: &str) -> Result<(), LocalizationError> {
        let resource = FluentResource::try_new(ftl_content.to_string())
            .map_err(|_| LocalizationError::Parse(locale.to_string()))?;
        let lang_id: LanguageIdentifier =
            locale.parse().map_err(|_| LocalizationError::InvalidLocale(locale.to_string()))?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|_| LocalizationError::Parse(locale.to_string()))?;

        self.bundles.insert(locale.to_string(), bundle);
        Ok(())
    }

    pub fn set_locale(&mut self, locale: &str) -> Result<(), LocalizationError> {
        if !self.bundles.contains_key(locale) {
            return Err(LocalizationError::NotLoaded(locale.to_string()));
        }
        self.current_locale = locale.to_string();
        Ok(())
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    /// Best loaded locale for the requested list, falling back to `en-US`
    pub fn negotiate_locale(&self, requested: &[&str]) -> String {
        let available: Vec<LanguageIdentifier> =
            self.bundles.keys().filter_map(|k| k.parse().ok()).collect();
        let requested: Vec<LanguageIdentifier> =
            requested.iter().filter_map(|l| l.parse().ok()).collect();
        let default: Option<LanguageIdentifier> = self.fallback_locale.parse().ok();

        let negotiated = negotiate_languages(
            &requested,
            &available,
            default.as_ref(),
            NegotiationStrategy::Filtering,
        );

        negotiated.first().map(|l| l.to_string()).unwrap_or_else(|| self.fallback_locale.clone())
    }

    fn bundle_with(&self, key: &str) -> Option<&FluentBundle<FluentResource>> {
        [&self.current_locale, &self.fallback_locale]
            .into_iter()
            .filter_map(|locale| self.bundles.get(locale))
            .find(|bundle| bundle.has_message(key))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundle_with(key)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let text = bundle.format_pattern(pattern, args, &mut errors).to_string();
        if !errors.is_empty() {
            log::debug!("Fluent reported {} error(s) formatting {}", errors.len(), key);
        }
        Some(text)
    }
}

impl Localize for FluentLocalizer {
    /// Argument values that are themselves message ids (trophy and award keys)
    /// are resolved before substitution.
    fn localize(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            let resolved = self.format(value, None).unwrap_or_else(|| value.clone());
            fluent_args.set(*name, FluentValue::from(resolved));
        }
        self.format(key, Some(&fluent_args)).unwrap_or_else(|| format!("[{}]", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_localizer_echoes() {
        assert_eq!(KeyLocalizer.localize("event-debut", &[]), "event-debut");
        let text = KeyLocalizer.localize("event-injury", &[("weeks", "4".to_string())]);
        assert_eq!(text, "event-injury {weeks=4}");
    }

    #[test]
    fn test_closure_localizer() {
        let upper = |key: &str, _: &[(&str, String)]| key.to_uppercase();
        assert_eq!(upper.localize("event-debut", &[]), "EVENT-DEBUT");
    }

    #[test]
    fn test_fluent_resolves_nested_keys() {
        let loc = FluentLocalizer::new().unwrap();
        let text = loc.localize("event-trophy", &[("trophy", "trophy-world-cup".to_string())]);
        assert_eq!(text, "Lifted the World Cup.");
        let text = loc.localize("event-goal-milestone", &[("goals", "100".to_string())]);
        assert_eq!(text, "Reached 100 career goals.");
    }

    #[test]
    fn test_fluent_missing_key_is_bracketed() {
        let loc = FluentLocalizer::new().unwrap();
        assert_eq!(loc.localize("no-such-key", &[]), "[no-such-key]");
    }

    #[test]
    fn test_fluent_fallback_locale() {
        let mut loc = FluentLocalizer::new().unwrap();
        loc.load_locale("es-ES", "event-debut = Debut profesional.\n").unwrap();
        loc.set_locale("es-ES").unwrap();
        assert_eq!(loc.localize("event-debut", &[]), "Debut profesional.");
        assert_eq!(loc.localize("event-released", &[]), "Released by the club.");
        assert!(loc.set_locale("fr-FR").is_err());
        assert_eq!(loc.negotiate_locale(&["es-ES"]), "es-ES");
    }
}
