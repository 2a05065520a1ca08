//! Core types for the lexical path model.
//!
//! This module defines [`Path`], an immutable, string-backed, slash-delimited
//! path, and [`Origin`], which records the filesystem a path was built by.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::path::normalize::{self, SEPARATOR};

/// Indicates which filesystem produced a path.
///
/// Paths parsed directly with [`Path::parse`] are [`Origin::Unbound`] and can
/// be combined with paths of any filesystem. Paths produced by a
/// [`FileSystem`](crate::fs::FileSystem) are bound to it; combining paths bound
/// to two different filesystems is an error.
///
/// # Examples
///
/// ```
/// use pathfs::path::Origin;
///
/// assert!(Origin::Unbound.is_compatible(Origin::Backend("os")));
/// assert!(!Origin::Backend("os").is_compatible(Origin::Backend("memory")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Not produced by any particular filesystem.
    #[default]
    Unbound,
    /// Produced by the filesystem with the given name.
    Backend(&'static str),
}

impl Origin {
    /// Returns `true` if paths of the two origins may be combined.
    #[must_use]
    pub fn is_compatible(self, other: Self) -> bool {
        match (self, other) {
            (Self::Unbound, _) | (_, Self::Unbound) => true,
            (Self::Backend(a), Self::Backend(b)) => a == b,
        }
    }

    /// The origin of a value derived from both operands.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match self {
            Self::Unbound => other,
            Self::Backend(_) => self,
        }
    }

    /// Fails unless `other` is compatible with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatiblePaths`] when both origins are bound to
    /// different filesystems.
    pub fn check(self, other: Self) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(Error::IncompatiblePaths {
                expected: self,
                found: other,
            })
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbound => write!(f, "unbound"),
            Self::Backend(name) => write!(f, "{name}"),
        }
    }
}

/// A location expressed lexically, not necessarily an existing file.
///
/// The raw string is normalized eagerly: runs of `/` collapse to one and
/// trailing separators are stripped. `.` and `..` are ordinary names.
/// Equality, hashing and ordering use the normalized string only.
///
/// # Examples
///
/// ```
/// use pathfs::Path;
///
/// let path = Path::parse("foo/bar//test///file.txt/").unwrap();
/// assert_eq!(path.to_string(), "foo/bar/test/file.txt");
/// assert_eq!(path.name_count(), 4);
/// assert_eq!(path.parent().unwrap().as_str(), "foo/bar/test");
/// assert_eq!(path.file_name().unwrap().as_str(), "file.txt");
/// ```
#[derive(Clone)]
pub struct Path {
    normalized: String,
    offsets: OnceLock<Box<[usize]>>,
    origin: Origin,
}

impl Path {
    /// Parse a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the string contains a NUL character.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfs::Path;
    ///
    /// assert_eq!(Path::parse("a//b/").unwrap().as_str(), "a/b");
    /// assert!(Path::parse("nul\0byte").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        normalize::validate(raw)?;
        Ok(Self::from_raw(raw, Origin::Unbound))
    }

    /// Build a path from segments the way a filesystem's path factory does.
    ///
    /// Empty segments are skipped, the rest are joined with `/`, and the
    /// result is normalized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if any segment contains a NUL character.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfs::Path;
    ///
    /// let path = Path::from_segments("/base", &["dir/", "", "file.txt"]).unwrap();
    /// assert_eq!(path.as_str(), "/base/dir/file.txt");
    /// ```
    pub fn from_segments(first: &str, more: &[&str]) -> Result<Self> {
        normalize::validate(first)?;
        for segment in more {
            normalize::validate(segment)?;
        }
        Ok(Self::from_raw(
            &normalize::join_segments(first, more),
            Origin::Unbound,
        ))
    }

    fn from_raw(raw: &str, origin: Origin) -> Self {
        Self::from_normalized(normalize::normalize(raw).into_owned(), origin)
    }

    /// The string must already be normalized.
    fn from_normalized(normalized: String, origin: Origin) -> Self {
        debug_assert!(
            normalized == "/" || normalize::is_normalized(&normalized),
            "not normalized: {normalized:?}"
        );
        Self {
            normalized,
            offsets: OnceLock::new(),
            origin,
        }
    }

    fn derive(&self, normalized: &str) -> Self {
        Self::from_normalized(normalized.to_string(), self.origin)
    }

    /// Returns this path bound to `origin`.
    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// The filesystem this path was built by.
    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The normalized path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// View this path as a standard library path.
    #[must_use]
    pub fn as_std_path(&self) -> &std::path::Path {
        std::path::Path::new(&self.normalized)
    }

    fn offsets(&self) -> &[usize] {
        self.offsets
            .get_or_init(|| normalize::name_offsets(&self.normalized))
    }

    /// Returns `true` if the path starts with the separator.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.normalized.starts_with(SEPARATOR)
    }

    /// Returns `true` for the zero-length path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Number of names in the path. The root has none; the empty path has one.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.offsets().len()
    }

    /// The name at `index`, counting from the name closest to the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameIndexOutOfRange`] unless `index < name_count()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfs::Path;
    ///
    /// let path = Path::parse("/usr/local/bin").unwrap();
    /// assert_eq!(path.name(1).unwrap().as_str(), "local");
    /// assert!(path.name(3).is_err());
    /// ```
    pub fn name(&self, index: usize) -> Result<Self> {
        let offsets = self.offsets();
        let count = offsets.len();
        if index >= count {
            return Err(Error::NameIndexOutOfRange { index, count });
        }

        let begin = offsets[index];
        let end = if index == count - 1 {
            self.normalized.len()
        } else {
            offsets[index + 1] - 1
        };

        Ok(self.derive(&self.normalized[begin..end]))
    }

    /// Iterate over the names of this path.
    pub fn names(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.name_count()).filter_map(move |index| self.name(index).ok())
    }

    /// The last name, or `None` for the root.
    #[must_use]
    pub fn file_name(&self) -> Option<Self> {
        let last = *self.offsets().last()?;
        Some(self.derive(&self.normalized[last..]))
    }

    /// The path without its last name.
    ///
    /// Returns `None` for the root and for single-name relative paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfs::Path;
    ///
    /// assert_eq!(Path::parse("/file.txt").unwrap().parent().unwrap().as_str(), "/");
    /// assert!(Path::parse("file.txt").unwrap().parent().is_none());
    /// assert!(Path::parse("/").unwrap().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let last = *self.offsets().last()?;

        // "/file.txt" has its last name at 1, "file.txt" at 0.
        match last {
            0 => None,
            1 => Some(self.derive("/")),
            _ => Some(self.derive(&self.normalized[..last - 1])),
        }
    }

    /// Lexically resolve `other` against this path.
    ///
    /// An absolute `other` replaces this path; an empty operand yields the
    /// other one; otherwise the two strings are joined with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatiblePaths`] if the paths are bound to
    /// different filesystems.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfs::Path;
    ///
    /// let base = Path::parse("/srv").unwrap();
    /// let rel = Path::parse("www/../index.html").unwrap();
    /// assert_eq!(base.resolve(&rel).unwrap().as_str(), "/srv/www/../index.html");
    ///
    /// let abs = Path::parse("/etc").unwrap();
    /// assert_eq!(base.resolve(&abs).unwrap(), abs);
    /// ```
    pub fn resolve(&self, other: &Self) -> Result<Self> {
        self.origin.check(other.origin)?;
        let origin = self.origin.merge(other.origin);

        if other.is_absolute() || self.is_empty() {
            return Ok(other.clone().with_origin(origin));
        }

        if other.is_empty() {
            return Ok(self.clone().with_origin(origin));
        }

        let joined = format!("{}{SEPARATOR}{}", self.normalized, other.normalized);
        Ok(Self::from_raw(&joined, origin))
    }

    /// Concatenate a raw string onto this path.
    ///
    /// Unlike [`resolve`](Self::resolve), leading and trailing separators of
    /// `other` are ignored, so an absolute `other` is appended rather than
    /// substituted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `other` contains a NUL character.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfs::Path;
    ///
    /// let base = Path::parse("/base").unwrap();
    /// assert_eq!(base.join("foo.txt").unwrap(), base.join("///foo.txt///").unwrap());
    /// ```
    pub fn join(&self, other: &str) -> Result<Self> {
        normalize::validate(other)?;
        Ok(self.concat(other))
    }

    fn concat(&self, other: &str) -> Self {
        let joined = normalize::join_segments(&self.normalized, &[other]);
        Self::from_raw(&joined, self.origin)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.normalized).finish()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Add<&Path> for &Path {
    type Output = Path;

    /// Concatenate, ignoring whether `rhs` is absolute. The result keeps the
    /// left operand's origin.
    fn add(self, rhs: &Path) -> Path {
        self.concat(rhs.as_str())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn p(raw: &str) -> Path {
        Path::parse(raw).unwrap()
    }

    fn check_single_name(path: &Path, expected: &str) {
        assert!(!path.is_absolute());
        assert_eq!(path.file_name().unwrap().as_str(), expected);
        assert_eq!(path.name_count(), 1);
        assert_eq!(path.to_string(), expected);
        assert!(path.parent().is_none());
        assert!(path.name(1).is_err());
    }

    fn check_slashes(path: &Path, prefix: &str) {
        assert_eq!(path.file_name().unwrap().as_str(), "file.txt");
        assert_eq!(path.name_count(), 4);
        assert_eq!(path.to_string(), format!("{prefix}foo/bar/test/file.txt"));
        assert_eq!(
            path.parent().unwrap().to_string(),
            format!("{prefix}foo/bar/test")
        );

        let names: Vec<String> = path.names().map(|n| n.to_string()).collect();
        assert_eq!(names, ["foo", "bar", "test", "file.txt"]);
    }

    #[test]
    fn test_empty_path() {
        let path = p("");
        check_single_name(&path, "");
        assert_eq!(path.name(0).unwrap().as_str(), "");
    }

    #[test]
    fn test_working_directory() {
        check_single_name(&p("."), ".");
    }

    #[test]
    fn test_parent_directory() {
        check_single_name(&p(".."), "..");
    }

    #[test]
    fn test_single_file() {
        check_single_name(&p("42.txt"), "42.txt");
    }

    #[test]
    fn test_root() {
        let path = p("/");
        assert!(path.is_absolute());
        assert!(path.file_name().is_none());
        assert_eq!(path.name_count(), 0);
        assert_eq!(path.to_string(), "/");
        assert!(path.parent().is_none());
        assert!(matches!(
            path.name(0),
            Err(Error::NameIndexOutOfRange { index: 0, count: 0 })
        ));
    }

    #[test]
    fn test_relative_path_slashes() {
        check_slashes(&p("foo/bar//test///file.txt"), "");
        check_slashes(&p("foo/bar//test///file.txt/"), "");
        check_slashes(&p("foo/bar//test/file.txt//"), "");
    }

    #[test]
    fn test_absolute_path_slashes() {
        check_slashes(&p("/foo/bar//test///file.txt"), "/");
        check_slashes(&p("/foo/bar//test///file.txt/"), "/");
        check_slashes(&p("/foo/bar//test/file.txt//"), "/");
    }

    #[test]
    fn test_denormalized_path() {
        let path = p("1/2/3/../3/../../2//1.txt");
        assert_eq!(path.file_name().unwrap().as_str(), "1.txt");
        assert_eq!(path.name_count(), 9);
        assert_eq!(path.to_string(), "1/2/3/../3/../../2/1.txt");
        assert_eq!(path.parent().unwrap().as_str(), "1/2/3/../3/../../2");

        assert_eq!(path.name(0).unwrap().as_str(), "1");
        assert_eq!(path.name(1).unwrap().as_str(), "2");
        assert_eq!(path.name(2).unwrap().as_str(), "3");
        assert_eq!(path.name(3).unwrap().as_str(), "..");
    }

    #[test]
    fn test_parent_of_single_absolute_name_is_root() {
        assert_eq!(p("/file.txt").parent().unwrap().as_str(), "/");
        assert_eq!(p("///x//").parent().unwrap().as_str(), "/");
    }

    #[test]
    fn test_parent_chain_ends_at_root() {
        let mut current = Some(p("/a/b/c"));
        let mut seen = Vec::new();
        while let Some(path) = current {
            seen.push(path.to_string());
            current = path.parent();
        }
        assert_eq!(seen, ["/a/b/c", "/a/b", "/a", "/"]);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(p("a").resolve(&p("b")).unwrap().as_str(), "a/b");
        assert_eq!(p("a").resolve(&p("/b/")).unwrap().as_str(), "/b");
        assert_eq!(p("").resolve(&p("x")).unwrap().as_str(), "x");
        assert_eq!(p("x").resolve(&p("")).unwrap().as_str(), "x");
        assert_eq!(p("/").resolve(&p("a")).unwrap().as_str(), "/a");
        assert_eq!(p("/").resolve(&p("")).unwrap().as_str(), "/");
        assert_eq!(
            p("foo/../..").resolve(&p("../..")).unwrap().as_str(),
            "foo/../../../.."
        );
    }

    #[test]
    fn test_concatenation() {
        let cases = [
            ("a", "b", "a/b"),
            ("a", "/b/", "a/b"),
            ("foo/../..", "../../", "foo/../../../.."),
            ("", "/", "/"),
            ("/", "", "/"),
            (".", "bar", "./bar"),
            ("bar", ".", "bar/."),
            ("foo.txt", "foo.txt", "foo.txt/foo.txt"),
        ];

        for (base, other, expected) in cases {
            let base = p(base);
            assert_eq!(base.join(other).unwrap().as_str(), expected, "{base} + {other}");
            assert_eq!((&base + &p(other)).as_str(), expected, "{base} + Path({other})");
        }
    }

    #[test]
    fn test_join_rejects_nul() {
        assert!(p("a").join("b\0").is_err());
    }

    #[test]
    fn test_origin_mixing() {
        let os = p("/a").with_origin(Origin::Backend("os"));
        let mem = p("b").with_origin(Origin::Backend("memory"));
        let free = p("c");

        assert!(matches!(
            os.resolve(&mem),
            Err(Error::IncompatiblePaths { .. })
        ));

        let resolved = free.resolve(&mem).unwrap();
        assert_eq!(resolved.origin(), Origin::Backend("memory"));
        assert_eq!(os.resolve(&free).unwrap().origin(), Origin::Backend("os"));
    }

    #[test]
    fn test_derived_paths_keep_origin() {
        let path = p("/a/b").with_origin(Origin::Backend("memory"));
        assert_eq!(path.parent().unwrap().origin(), Origin::Backend("memory"));
        assert_eq!(path.file_name().unwrap().origin(), Origin::Backend("memory"));
        assert_eq!(path.name(0).unwrap().origin(), Origin::Backend("memory"));
        assert_eq!(path.join("c").unwrap().origin(), Origin::Backend("memory"));
    }

    #[test]
    fn test_equality_ignores_history_and_origin() {
        let direct = p("a/b/c");
        let chained = p("a").resolve(&p("b//")).unwrap().resolve(&p("c")).unwrap();
        let bound = p("a/b/c/").with_origin(Origin::Backend("os"));

        assert_eq!(direct, chained);
        assert_eq!(direct, bound);

        let set: HashSet<Path> = [direct, chained, bound].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut paths = vec![p("b"), p("/z"), p("a/b"), p("a")];
        paths.sort();
        let ordered: Vec<&str> = paths.iter().map(Path::as_str).collect();
        assert_eq!(ordered, ["/z", "a", "a/b", "b"]);
    }

    #[test]
    fn test_from_str_round_trip() {
        let path: Path = "x//y/".parse().unwrap();
        let reparsed: Path = path.to_string().parse().unwrap();
        assert_eq!(path, reparsed);
    }

    #[test]
    fn test_serde_as_string() {
        let path = p("/var//log/");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/var/log\"");
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", p("a//b")), "Path(\"a/b\")");
    }

    #[test]
    fn test_concurrent_name_access() {
        let path = std::sync::Arc::new(p("/one/two/three/four"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = std::sync::Arc::clone(&path);
                std::thread::spawn(move || {
                    (path.name_count(), path.file_name().map(|n| n.to_string()))
                })
            })
            .collect();

        for handle in handles {
            let (count, file_name) = handle.join().unwrap();
            assert_eq!(count, 4);
            assert_eq!(file_name.as_deref(), Some("four"));
        }
    }

    #[test]
    fn test_path_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Path>();
    }
}
