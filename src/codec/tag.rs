// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type tags used by the appliance firmware to encode scalar leaves.

/// Character separating the type tag from the hex payload.
pub const SEPARATOR: char = '_';

/// How the payload bytes of a tagged leaf are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// IEEE-754 single-precision float.
    Float32,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 64-bit integer.
    I64,
    /// Single byte, zero is `false`.
    Bool,
}

impl LeafKind {
    /// Returns the payload width in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::Float32 | Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
        }
    }

    /// Returns the number of hex digits the payload must have.
    #[must_use]
    pub const fn hex_digits(self) -> usize {
        self.width() * 2
    }
}

/// One entry of the tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafTag {
    /// Tag text as it appears before the separator.
    pub tag: &'static str,
    /// Payload interpretation.
    pub kind: LeafKind,
}

impl LeafTag {
    const fn new(tag: &'static str, kind: LeafKind) -> Self {
        Self { tag, kind }
    }
}

/// Every tag the normalizer decodes.
///
/// Tags are case-sensitive. Strings carrying any other prefix are left alone.
pub const LEAF_TAGS: &[LeafTag] = &[
    LeafTag::new("fl", LeafKind::Float32),
    LeafTag::new("u8", LeafKind::U8),
    LeafTag::new("i8", LeafKind::I8),
    LeafTag::new("u1", LeafKind::U16),
    LeafTag::new("i1", LeafKind::I16),
    LeafTag::new("u3", LeafKind::U32),
    LeafTag::new("i3", LeafKind::I32),
    LeafTag::new("u6", LeafKind::U64),
    LeafTag::new("i6", LeafKind::I64),
    LeafTag::new("bo", LeafKind::Bool),
];

/// Looks up a tag in [`LEAF_TAGS`].
#[must_use]
pub fn lookup(tag: &str) -> Option<&'static LeafTag> {
    LEAF_TAGS.iter().find(|entry| entry.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_kinds() {
        assert_eq!(LeafKind::Float32.width(), 4);
        assert_eq!(LeafKind::U16.hex_digits(), 4);
        assert_eq!(LeafKind::I64.hex_digits(), 16);
        assert_eq!(LeafKind::Bool.width(), 1);
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(lookup("fl").map(|t| t.kind), Some(LeafKind::Float32));
        assert_eq!(lookup("u1").map(|t| t.kind), Some(LeafKind::U16));
        assert!(lookup("st").is_none());
        assert!(lookup("FL").is_none());
    }

    #[test]
    fn tags_are_unique() {
        for (i, entry) in LEAF_TAGS.iter().enumerate() {
            assert!(
                LEAF_TAGS[i + 1..].iter().all(|other| other.tag != entry.tag),
                "duplicate tag {}",
                entry.tag
            );
        }
    }
}
