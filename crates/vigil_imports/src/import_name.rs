//! Fully-qualified import names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully-qualified import, optionally static.
///
/// Serialized as its display form: `"java.util.List"` or
/// `"static org.junit.Assert.assertEquals"`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ImportName {
    /// The qualified name, e.g. `java.util.List`.
    pub path: String,
    /// Whether this is a static member import.
    pub is_static: bool,
}

impl ImportName {
    /// A regular type import.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_static: false,
        }
    }

    /// A static member import.
    pub fn new_static(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_static: true,
        }
    }

    /// Parses `"a.b.C"` or `"static a.b.C.m"`, tolerating extra whitespace.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.strip_prefix("static") {
            Some(rest) if rest.starts_with(char::is_whitespace) => {
                Self::new_static(rest.split_whitespace().collect::<String>())
            }
            _ => Self::new(text.split_whitespace().collect::<String>()),
        }
    }

    /// The first dotted segment of the path (`java` for `java.util.List`).
    pub fn root(&self) -> &str {
        self.path.split('.').next().unwrap_or_default()
    }

    /// The import statement as it appears in source, e.g. `import static a.B.c;`.
    pub fn statement(&self) -> String {
        format!("import {self};")
    }
}

impl fmt::Display for ImportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            write!(f, "static {}", self.path)
        } else {
            write!(f, "{}", self.path)
        }
    }
}

impl From<&str> for ImportName {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for ImportName {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<ImportName> for String {
    fn from(name: ImportName) -> Self {
        name.to_string()
    }
}
