use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for the document path.
pub const PATH_VAR: &str = "path";

/// Placeholder for the label id.
pub const LABEL_ID_VAR: &str = "label_id";

/// Command string handed to the interpreter, with `{path}` / `{label_id}` placeholders.
///
/// Substituted values have every single-quote character PowerShell recognizes
/// (`'` and U+2018..U+201B) doubled so they stay inside a single-quoted literal.
/// Unknown `{...}` sequences are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Substitute placeholders in a single left-to-right pass.
    ///
    /// Substituted text is never rescanned, so a path containing `{label_id}`
    /// is passed through literally.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open + 1..];

            let hit = vars.iter().find(|(name, _)| {
                tail.strip_prefix(name)
                    .is_some_and(|after| after.starts_with('}'))
            });
            match hit {
                Some((name, value)) => {
                    out.push_str(&quote(value));
                    rest = &tail[name.len() + 1..];
                }
                None => {
                    out.push('{');
                    rest = tail;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Characters PowerShell treats as single-quote string delimiters.
const SINGLE_QUOTES: [char; 5] = ['\'', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if SINGLE_QUOTES.contains(&c) {
            out.push(c);
        }
        out.push(c);
    }
    out
}
