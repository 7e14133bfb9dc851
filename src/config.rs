use crate::emit::Expect;
use serde_derive::Deserialize;
use std::io::{Error, ErrorKind, Result};

/// Test case generator settings.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Substring that marks a statement as expected to fail.
    pub marker: String,
    /// Macro invoked for statements expected to succeed.
    pub ok_macro: String,
    /// Macro invoked for statements expected to fail.
    pub err_macro: String,
    /// First argument passed to every generated macro.
    pub context: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            marker: "error".into(),
            ok_macro: Expect::Ok.to_string(),
            err_macro: Expect::Err.to_string(),
            context: "e".into(),
        }
    }
}

impl Config {
    /// Name of the macro emitted for the given expectation.
    pub fn macro_for(&self, expect: Expect) -> &str {
        match expect {
            Expect::Ok => &self.ok_macro,
            Expect::Err => &self.err_macro,
        }
    }

    /// Check that every generated line will still be a macro call.
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "marker must not be empty",
            ));
        }
        for (key, value) in [
            ("ok-macro", &self.ok_macro),
            ("err-macro", &self.err_macro),
            ("context", &self.context),
        ] {
            if !is_ident(value) {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("{}: `{}` is not an identifier", key, value),
                ));
            }
        }
        Ok(())
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
