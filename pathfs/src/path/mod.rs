//! Lexical path model.
//!
//! This module provides [`Path`], an immutable representation of a
//! slash-delimited path that never touches storage.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Normalization converts a raw string to canonical form by:
//! - Collapsing runs of separators (`a//b` becomes `a/b`)
//! - Stripping trailing separators (`a/b/` becomes `a/b`, `///` becomes `/`)
//!
//! `.` and `..` are kept as ordinary names; nothing is resolved against a
//! filesystem.
//!
//! ## Names
//!
//! A name is a maximal run of non-separator characters. The root `/` has no
//! names, while the empty path `""` has exactly one, the empty name, so that
//! it keeps "current directory" semantics.
//!
//! ## Resolve versus join
//!
//! [`Path::resolve`] lets an absolute right-hand side replace the left-hand
//! side. [`Path::join`] and `&a + &b` always append, ignoring leading and
//! trailing separators of the right-hand side.
//!
//! # Examples
//!
//! ```
//! use pathfs::Path;
//!
//! let base = Path::parse("foo/../..").unwrap();
//! assert_eq!(base.join("../../").unwrap().as_str(), "foo/../../../..");
//!
//! let root = Path::parse("/").unwrap();
//! assert_eq!(root.name_count(), 0);
//! assert!(root.file_name().is_none());
//!
//! let empty = Path::parse("").unwrap();
//! assert_eq!(empty.name_count(), 1);
//! assert_eq!(empty.name(0).unwrap().as_str(), "");
//! ```

pub mod normalize;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use types::{Origin, Path};
