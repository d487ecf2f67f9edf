//! Structural splitting of same-origin paths.
//!
//! Rewriting the language segment of a path must never touch the query or
//! fragment, so paths are split into their three parts, the path part is
//! edited, and the parts are joined back together.

use std::fmt;

/// A path split into path component, query and fragment.
///
/// `query` and `fragment` exclude their `?`/`#` markers. `Some("")` records a
/// marker with nothing after it, so `"/en/?"` reassembles to `"/en/?"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath {
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl SplitPath {
    /// Split a path into its components.
    ///
    /// The fragment starts at the first `#`; the query starts at the first
    /// `?` before it.
    pub fn parse(input: &str) -> Self {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (input, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        Self {
            path: path.to_string(),
            query,
            fragment,
        }
    }

    /// Path segments between slashes, including empty ones.
    ///
    /// `"/en/page/"` yields `["en", "page", ""]`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.strip_prefix('/').unwrap_or(&self.path).split('/')
    }

    /// First path segment, or `None` when it is empty.
    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next().filter(|s| !s.is_empty())
    }

    /// Second path segment, or `None` when it is missing or empty.
    pub fn second_segment(&self) -> Option<&str> {
        self.segments().nth(1).filter(|s| !s.is_empty())
    }

    /// Everything after the first segment, without its leading slash.
    ///
    /// `"/en/another/page/"` yields `"another/page/"`; `"/en"` yields `""`.
    pub fn after_first_segment(&self) -> &str {
        let trimmed = self.path.strip_prefix('/').unwrap_or(&self.path);
        match trimmed.split_once('/') {
            Some((_, rest)) => rest,
            None => "",
        }
    }

    /// Replace the first segment, keeping the remainder, query and fragment.
    pub fn with_first_segment(&self, segment: &str) -> Self {
        Self {
            path: format!("/{}/{}", segment, self.after_first_segment()),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }

    /// Replace the path component, keeping query and fragment.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

impl fmt::Display for SplitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}
