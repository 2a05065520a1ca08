//! File attribute snapshots.
//!
//! Backends return attributes as immutable snapshots in one of two shapes,
//! selected by [`AttributeKind`]: [`FileAttributes`], available everywhere, and
//! [`PosixFileAttributes`], which adds the POSIX permission bits.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// The attribute shape requested from a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Flags, timestamps and size.
    Basic,
    /// Basic attributes plus POSIX permissions.
    Posix,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic attributes"),
            Self::Posix => write!(f, "POSIX attributes"),
        }
    }
}

/// Basic attributes associated with a file in a filesystem.
///
/// Timestamps are microseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAttributes {
    /// The entry is a directory.
    pub is_directory: bool,
    /// The entry is a regular file.
    pub is_file: bool,
    /// The entry is a symbolic link (links are never followed).
    pub is_symbolic_link: bool,
    /// Creation (or, on POSIX, status change) time.
    pub creation_time_us: i64,
    /// Last access time.
    pub last_access_time_us: i64,
    /// Last modification time.
    pub last_modified_time_us: i64,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// Basic attributes plus POSIX permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosixFileAttributes {
    /// The basic attributes.
    #[serde(flatten)]
    pub basic: FileAttributes,
    /// Permission and special mode bits.
    pub permissions: PermissionSet,
}

/// Attributes returned by a backend, in the shape that was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Attributes {
    /// Answer to [`AttributeKind::Basic`].
    Basic(FileAttributes),
    /// Answer to [`AttributeKind::Posix`].
    Posix(PosixFileAttributes),
}

impl Attributes {
    /// The shape of these attributes.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Basic(_) => AttributeKind::Basic,
            Self::Posix(_) => AttributeKind::Posix,
        }
    }

    /// The basic part, available for every shape.
    #[must_use]
    pub fn basic(&self) -> &FileAttributes {
        match self {
            Self::Basic(basic) => basic,
            Self::Posix(posix) => &posix.basic,
        }
    }

    /// Drop everything but the basic part.
    #[must_use]
    pub fn into_basic(self) -> FileAttributes {
        match self {
            Self::Basic(basic) => basic,
            Self::Posix(posix) => posix.basic,
        }
    }

    /// The POSIX attributes, if this is the POSIX shape.
    #[must_use]
    pub fn into_posix(self) -> Option<PosixFileAttributes> {
        match self {
            Self::Basic(_) => None,
            Self::Posix(posix) => Some(posix),
        }
    }
}

/// A single POSIX mode bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PosixPermission {
    /// `S_IRUSR`
    OwnerRead,
    /// `S_IWUSR`
    OwnerWrite,
    /// `S_IXUSR`
    OwnerExecute,
    /// `S_IRGRP`
    GroupRead,
    /// `S_IWGRP`
    GroupWrite,
    /// `S_IXGRP`
    GroupExecute,
    /// `S_IROTH`
    OthersRead,
    /// `S_IWOTH`
    OthersWrite,
    /// `S_IXOTH`
    OthersExecute,
    /// `S_ISUID`
    SetUid,
    /// `S_ISGID`
    SetGid,
    /// `S_ISVTX`
    StickyBit,
}

impl PosixPermission {
    /// Every permission, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::OwnerRead,
        Self::OwnerWrite,
        Self::OwnerExecute,
        Self::GroupRead,
        Self::GroupWrite,
        Self::GroupExecute,
        Self::OthersRead,
        Self::OthersWrite,
        Self::OthersExecute,
        Self::SetUid,
        Self::SetGid,
        Self::StickyBit,
    ];

    /// The bit in a `st_mode` value.
    #[must_use]
    pub const fn mode_bit(self) -> u32 {
        match self {
            Self::OwnerRead => 0o400,
            Self::OwnerWrite => 0o200,
            Self::OwnerExecute => 0o100,
            Self::GroupRead => 0o040,
            Self::GroupWrite => 0o020,
            Self::GroupExecute => 0o010,
            Self::OthersRead => 0o004,
            Self::OthersWrite => 0o002,
            Self::OthersExecute => 0o001,
            Self::SetUid => 0o4000,
            Self::SetGid => 0o2000,
            Self::StickyBit => 0o1000,
        }
    }
}

/// A set of [`PosixPermission`]s.
///
/// # Examples
///
/// ```
/// use pathfs::fs::{PermissionSet, PosixPermission};
///
/// let perms = PermissionSet::from_mode(0o100_640);
/// assert!(perms.contains(PosixPermission::OwnerWrite));
/// assert!(!perms.contains(PosixPermission::OthersRead));
/// assert_eq!(perms.to_octal_string(), "0640");
/// assert_eq!(perms.to_symbolic_string(), "rw-r-----");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet {
    bits: u32,
}

impl PermissionSet {
    const MASK: u32 = 0o7777;

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Extract the permission bits of a `st_mode` value; file type bits are
    /// ignored.
    #[must_use]
    pub const fn from_mode(mode: u32) -> Self {
        Self {
            bits: mode & Self::MASK,
        }
    }

    /// The permission bits as a mode value.
    #[must_use]
    pub const fn mode(self) -> u32 {
        self.bits
    }

    /// Returns `true` if `permission` is in the set.
    #[must_use]
    pub const fn contains(self, permission: PosixPermission) -> bool {
        self.bits & permission.mode_bit() != 0
    }

    /// Add `permission` to the set.
    pub fn insert(&mut self, permission: PosixPermission) {
        self.bits |= permission.mode_bit();
    }

    /// Remove `permission` from the set.
    pub fn remove(&mut self, permission: PosixPermission) {
        self.bits &= !permission.mode_bit();
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Iterate over the permissions in the set.
    pub fn iter(self) -> impl Iterator<Item = PosixPermission> {
        PosixPermission::ALL
            .into_iter()
            .filter(move |permission| self.contains(*permission))
    }

    /// Four-digit octal rendering, e.g. `"0640"` or `"4755"`.
    #[must_use]
    pub fn to_octal_string(self) -> String {
        format!("{:04o}", self.bits)
    }

    /// Nine-character `ls` rendering, e.g. `"rwxr-x---"`.
    ///
    /// Set-uid and set-gid show as `s` (`S` without execute) in the owner and
    /// group execute slots; the sticky bit shows as `t` (`T`) in the others
    /// execute slot.
    #[must_use]
    pub fn to_symbolic_string(self) -> String {
        use PosixPermission as P;

        let triads = [
            (P::OwnerRead, P::OwnerWrite, P::OwnerExecute, P::SetUid, 's'),
            (P::GroupRead, P::GroupWrite, P::GroupExecute, P::SetGid, 's'),
            (P::OthersRead, P::OthersWrite, P::OthersExecute, P::StickyBit, 't'),
        ];

        let mut rendered = String::with_capacity(9);
        for (read, write, execute, special, marker) in triads {
            rendered.push(if self.contains(read) { 'r' } else { '-' });
            rendered.push(if self.contains(write) { 'w' } else { '-' });
            rendered.push(match (self.contains(special), self.contains(execute)) {
                (true, true) => marker,
                (true, false) => marker.to_ascii_uppercase(),
                (false, true) => 'x',
                (false, false) => '-',
            });
        }
        rendered
    }
}

impl FromIterator<PosixPermission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PosixPermission>>(iter: I) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_symbolic_string())
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_octal_string())
    }
}
