use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

use crate::domain::models::REDACTED_VALUE;
use crate::infrastructure::config::{ConfigSchema, ConfigValue, Environment};

static KEY_VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Dotted configuration paths such as `es.password:` are not key/value pairs.
    Regex::new(
        r#"(?i)(^|[^.\w])(["']?(?:password|secret|token|api_key|apikey)["']?\s*[:=]\s*)["']?[^"'\s,}]+["']?"#,
    )
    .unwrap()
});

static BEARER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.]+").unwrap());

/// Removes sensitive values from text before it is logged or printed
#[derive(Clone, Default)]
pub struct SecretScrubber {
    secrets: Vec<String>,
    known: Option<Regex>,
}

impl SecretScrubber {
    /// Scrubber that only applies the generic patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also redact every occurrence of the given literal values.
    #[must_use]
    pub fn with_secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.secrets.extend(
            secrets
                .into_iter()
                .map(|secret| secret.as_ref().to_string())
                .filter(|secret| !secret.is_empty()),
        );
        // Longest first so a secret containing another is removed whole.
        self.secrets
            .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self.secrets.dedup();

        self.known = if self.secrets.is_empty() {
            None
        } else {
            let pattern = self
                .secrets
                .iter()
                .map(|secret| regex::escape(secret))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&pattern).ok()
        };
        self
    }

    /// Scrubber for the sensitive leaves of a realized configuration.
    pub fn for_config(config: &ConfigValue) -> Self {
        Self::new().with_secrets(config.sensitive_values())
    }

    /// Scrubber for the raw environment values bound to sensitive leaves.
    ///
    /// Usable before the configuration has been validated.
    pub fn for_environment(schema: &ConfigSchema, env: &Environment) -> Self {
        Self::new().with_secrets(schema.sensitive_leaves().filter_map(|leaf| env.get(leaf.env)))
    }

    /// Scrub a message of sensitive data
    pub fn scrub(&self, message: &str) -> String {
        let mut scrubbed = match &self.known {
            Some(known) => known.replace_all(message, REDACTED_VALUE).into_owned(),
            None => message.to_string(),
        };
        scrubbed = BEARER_PATTERN
            .replace_all(&scrubbed, format!("Bearer {REDACTED_VALUE}").as_str())
            .into_owned();
        KEY_VALUE_PATTERN
            .replace_all(&scrubbed, |caps: &Captures| format!("{}{}{REDACTED_VALUE}", &caps[1], &caps[2]))
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish_non_exhaustive()
    }
}
