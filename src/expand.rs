//! `${NAME}` expansion against an explicit environment.

use std::collections::HashMap;

/// Variable lookup table used during expansion.
///
/// Parsing never reads the process environment directly; callers
/// either snapshot it with [`Env::from_process`] or build one by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars().collect()
    }

    /// Add or replace a variable.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Replace every `${NAME}` in `input` with its value from `env`.
///
/// Unset variables expand to the empty string. Expanded text is not
/// scanned again. A `$` not followed by a closed `${...}` is kept as
/// written.
#[must_use]
pub fn expand(input: &str, env: &Env) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match env.get(name) {
            Some(value) => out.push_str(value),
            None => log::trace!("variable {name} is unset, expanding to empty string"),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
