//! Rewriting of caller-supplied model paths into the storage layout.

/// Quote artifact produced by the upstream upload tool.
const BACKTICK_QUOTE: &str = "`\"`";

/// Maps paths between the namespace callers use and the storage mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    source_base: String,
    storage_base: String,
}

impl PathNormalizer {
    pub fn new(source_base: impl Into<String>, storage_base: impl Into<String>) -> Self {
        Self {
            source_base: trim_trailing_separator(source_base.into()),
            storage_base: trim_trailing_separator(storage_base.into()),
        }
    }

    pub fn source_base(&self) -> &str {
        &self.source_base
    }

    pub fn storage_base(&self) -> &str {
        &self.storage_base
    }

    /// True when a caller-supplied path lies under the source base.
    pub fn is_under_source_base(&self, raw_path: &str) -> bool {
        strip_base(raw_path, &self.source_base).is_some()
    }

    /// Rewrite the source base to the storage base, then repair quotes.
    ///
    /// Paths outside the source base pass through unchanged; rejecting them is
    /// the validator's job.
    pub fn adjust(&self, raw_path: &str) -> String {
        let rebased = match strip_base(raw_path, &self.source_base) {
            Some(rest) => format!("{}{}", self.storage_base, rest),
            None => raw_path.to_string(),
        };
        replace_backquotes(&rebased)
    }

    /// Remove the storage base from an already adjusted path.
    pub fn strip_storage_prefix(&self, normalized_path: &str) -> String {
        match strip_base(normalized_path, &self.storage_base) {
            Some(rest) => rest.to_string(),
            None => normalized_path.to_string(),
        }
    }
}

/// Returns the remainder after `base` when `path` lies under it.
fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

fn replace_backquotes(path: &str) -> String {
    path.replace(BACKTICK_QUOTE, "\"").replace('`', "\"")
}

fn trim_trailing_separator(mut base: String) -> String {
    while base.len() > 1 && base.ends_with('/') {
        base.pop();
    }
    base
}
