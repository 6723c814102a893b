//! Path representation for locating values in nested structures.
//!
//! This module provides [`Path`], the ordered list of string segments that
//! identifies where a validated value lives, and [`PathBuilder`], the only
//! way a constraint may override the path it reports.

use std::fmt::{self, Display};

/// A path to a value in a nested structure.
///
/// Paths are append-only: every method that adds segments returns a new
/// path and leaves the receiver untouched. Empty segments are dropped on the
/// way in, so a path never contains stray empty fragments.
///
/// # Example
///
/// ```rust
/// use pathwise::Path;
///
/// let path = Path::root()
///     .push("users")
///     .push("0")
///     .push("email");
///
/// assert_eq!(path.to_string(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a sequence of segments, skipping empty ones.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::root().join(segments)
    }

    /// Parses a dot-joined path, dropping empty pieces.
    ///
    /// ```rust
    /// use pathwise::Path;
    ///
    /// let path = Path::parse("address..city.");
    /// assert_eq!(path, Path::from_segments(["address", "city"]));
    /// ```
    pub fn parse(dotted: &str) -> Self {
        Self::from_segments(dotted.split('.'))
    }

    /// Returns a new path with a segment appended.
    ///
    /// An empty segment leaves the path unchanged.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.append(segment.into());
        path
    }

    /// Returns a new path with every non-empty segment appended in order.
    pub fn join<I>(&self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut path = self.clone();
        for segment in segments {
            path.append(segment.into());
        }
        path
    }

    /// Returns `self` followed by all segments of `other`.
    pub fn concat(&self, other: &Path) -> Self {
        self.join(other.segments.iter().cloned())
    }

    fn append(&mut self, segment: String) {
        if !segment.is_empty() {
            self.segments.push(segment);
        }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns true if `prefix` is a leading part of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

/// Computes path overrides for a constraint.
///
/// A builder is handed to the closure passed to
/// [`Constraint::with_path`](crate::Constraint::with_path). It knows the path
/// of the wrapper the constraint was evaluated against and the path of that
/// wrapper's parent.
///
/// ```rust
/// use pathwise::{Path, PathBuilder};
///
/// let builder = PathBuilder::new(
///     Path::from_segments(["user", "password"]),
///     Some(Path::from_segments(["user"])),
/// );
///
/// assert_eq!(builder.absolute(["confirm"]).to_string(), "confirm");
/// assert_eq!(builder.relative(["confirm"]).to_string(), "user.confirm");
/// assert_eq!(builder.appended(["hash"]).to_string(), "user.password.hash");
/// ```
#[derive(Debug, Clone)]
pub struct PathBuilder {
    current: Path,
    parent: Option<Path>,
}

impl PathBuilder {
    /// Creates a builder for a wrapper at `current` whose parent sits at `parent`.
    pub fn new(current: Path, parent: Option<Path>) -> Self {
        Self { current, parent }
    }

    /// Replaces the path entirely.
    pub fn absolute<I>(&self, segments: I) -> Path
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Path::from_segments(segments)
    }

    /// The parent's path followed by `segments`.
    ///
    /// For a root wrapper there is no parent and the root path is used.
    pub fn relative<I>(&self, segments: I) -> Path
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.parent.clone().unwrap_or_default().join(segments)
    }

    /// The wrapper's own path followed by `segments`.
    pub fn appended<I>(&self, segments: I) -> Path
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.current.join(segments)
    }
}
