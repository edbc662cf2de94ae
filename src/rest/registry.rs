//! The table of resource kinds the client knows how to type.
//!
//! Each kind has a plural collection name (`tracks`), an explicit singular
//! used for bracketed parameters (`track[title]`), a descriptor name used by
//! binders (`Track`), and aliases: other path segments whose payloads are of
//! this kind (`favorites` are tracks).

use std::fmt;

/// Static description of a resource kind.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    /// Descriptor name, e.g. `Track`.
    pub name: &'static str,
    /// Plural collection name, e.g. `tracks`.
    pub kind: &'static str,
    /// Singular form used as parameter prefix, e.g. `track`.
    pub singular: &'static str,
    /// Other path segments that yield this kind.
    pub aliases: &'static [&'static str],
}

impl ResourceDescriptor {
    /// Returns `true` if `segment` is this kind's plural name or an alias.
    #[must_use]
    pub fn matches(&self, segment: &str) -> bool {
        self.kind == segment || self.aliases.contains(&segment)
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// User accounts.
pub static USER: ResourceDescriptor = ResourceDescriptor {
    name: "User",
    kind: "users",
    singular: "user",
    aliases: &["me", "permissions", "contacts", "user"],
};

/// Uploaded tracks.
pub static TRACK: ResourceDescriptor = ResourceDescriptor {
    name: "Track",
    kind: "tracks",
    singular: "track",
    aliases: &["favorites"],
};

/// Comments on tracks.
pub static COMMENT: ResourceDescriptor = ResourceDescriptor {
    name: "Comment",
    kind: "comments",
    singular: "comment",
    aliases: &[],
};

/// Playlists (sets).
pub static PLAYLIST: ResourceDescriptor = ResourceDescriptor {
    name: "Playlist",
    kind: "playlists",
    singular: "playlist",
    aliases: &[],
};

/// Groups.
pub static GROUP: ResourceDescriptor = ResourceDescriptor {
    name: "Group",
    kind: "groups",
    singular: "group",
    aliases: &[],
};

/// Every registered kind.
pub static REGISTRY: [&ResourceDescriptor; 5] = [&USER, &TRACK, &COMMENT, &PLAYLIST, &GROUP];

/// Finds the kind whose plural name or alias equals `segment`.
///
/// ```rust
/// use soundcloud_api::rest::registry::lookup_kind;
///
/// assert_eq!(lookup_kind("favorites").map(|d| d.kind), Some("tracks"));
/// assert_eq!(lookup_kind("me").map(|d| d.singular), Some("user"));
/// assert!(lookup_kind("apps").is_none());
/// ```
#[must_use]
pub fn lookup_kind(segment: &str) -> Option<&'static ResourceDescriptor> {
    REGISTRY.iter().copied().find(|d| d.matches(segment))
}

/// Finds the kind whose descriptor name equals `name` (e.g. `Track`).
#[must_use]
pub fn lookup_class(name: &str) -> Option<&'static ResourceDescriptor> {
    REGISTRY.iter().copied().find(|d| d.name == name)
}
