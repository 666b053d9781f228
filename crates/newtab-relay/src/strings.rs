//! # Localized Strings
//!
//! Lookup and positional formatting for the page's localized templates.
//! The table itself belongs to the host's localization bundle; the relay is
//! handed a flat copy at construction and never mutates it.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Every page string lives under this key prefix.
pub const STRING_PREFIX: &str = "newtab.";

/// Positional placeholder: `%<digit>$S`, substituted by 1-based index.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([0-9])\$S").expect("placeholder pattern is valid"));

/// A flat copy of the localized string table.
#[derive(Debug, Clone, Default)]
pub struct StringBundle {
    strings: HashMap<String, String>,
}

impl StringBundle {
    /// Wrap a string table. Keys are expected to carry the `newtab.`
    /// prefix already; lookups add it.
    #[must_use]
    pub fn new(strings: HashMap<String, String>) -> Self {
        Self { strings }
    }

    /// Raw template for `name`, or `None` when the table has no such key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.strings
            .get(&format!("{STRING_PREFIX}{name}"))
            .map(String::as_str)
    }

    /// Template for `name` with positional placeholders substituted from
    /// `args`, or `None` when the table has no such key.
    #[must_use]
    pub fn format(&self, name: &str, args: &[&str]) -> Option<String> {
        self.get(name)
            .map(|template| format_positional(template, args))
    }
}

/// Replace every `%N$S` placeholder in `template` with `args[N - 1]`.
///
/// Repeated placeholders are all replaced. An index without a matching
/// argument (including `%0$S`) keeps its literal placeholder text and is
/// reported with a warning. Substitution is a single pass over the
/// template, so no input can loop.
#[must_use]
pub fn format_positional(template: &str, args: &[&str]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let substituted = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| args.get(index));
            match substituted {
                Some(arg) => (*arg).to_owned(),
                None => {
                    warn!(placeholder = &caps[0], "No argument for placeholder");
                    caps[0].to_owned()
                }
            }
        })
        .into_owned()
}
