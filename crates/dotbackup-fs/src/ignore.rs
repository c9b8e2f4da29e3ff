//! Glob-style ignore patterns matched against bare entry names

use std::ffi::OsStr;
use std::path::Path;

use glob::Pattern;

/// A set of glob patterns deciding which directory entries a tree copy skips.
///
/// Patterns are matched against entry names only (never against full
/// paths), so one pattern applies at every depth of the tree. Matching is
/// case-sensitive and `*` also matches a leading dot.
///
/// A pattern that is not valid glob syntax, such as an unclosed `[`, is
/// matched literally instead of being rejected.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// Compile a matcher from pattern strings.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|raw| compile(raw.as_ref()))
            .collect();
        Self { patterns }
    }

    /// The union of the global patterns and one application's patterns.
    pub fn merged(global: &[String], app: &[String]) -> Self {
        Self::new(global.iter().chain(app.iter()))
    }

    /// Whether the matcher has no patterns at all.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether an entry with this name is skipped.
    pub fn is_ignored(&self, name: &OsStr) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let name = name.to_string_lossy();
        self.patterns.iter().any(|pattern| pattern.matches(&name))
    }

    /// The subset of `names`, all entries of `dir`, that a copy of `dir` skips.
    ///
    /// The directory itself does not influence the result; it is accepted so
    /// callers can apply the matcher the same way at every level of a walk.
    pub fn ignored_names<'a, N>(&self, _dir: &Path, names: &'a [N]) -> Vec<&'a N>
    where
        N: AsRef<OsStr>,
    {
        names
            .iter()
            .filter(|name| self.is_ignored(name.as_ref()))
            .collect()
    }
}

fn compile(raw: &str) -> Pattern {
    Pattern::new(&collapse_stars(raw)).unwrap_or_else(|err| {
        tracing::debug!(
            "ignore pattern {:?} is not a valid glob ({}), matching literally",
            raw,
            err
        );
        Pattern::new(&Pattern::escape(raw)).unwrap_or_default()
    })
}

/// Names never contain separators, so `**` means the same as `*`.
fn collapse_stars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}
