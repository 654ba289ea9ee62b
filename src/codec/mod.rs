// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalization of hex-encoded leaves in appliance responses.
//!
//! The appliance reports most scalar values as strings of the form
//! `<tag>_<hex>`, for example `fl_00006040` for the float `3.5` or
//! `u1_E803` for the integer `1000`. [`normalize`] walks a response tree and
//! replaces every such leaf with a native JSON number or boolean.
//!
//! Anything that is not a recognised encoding is kept verbatim, including
//! plain strings, values that are already numbers, and tagged strings whose
//! payload is malformed. Normalizing an already normalized tree is a no-op.
//!
//! # Examples
//!
//! ```
//! use senec_lib::codec::normalize;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "ENERGY": { "GUI_HOUSE_POW": "fl_00006040", "STAT_STATE": "u8_0E" },
//!     "PV1": { "MPP_POWER": ["fl_00000000", "fl_0000C842"] },
//!     "WIZARD": { "DEVICE_NAME": "hello" }
//! });
//!
//! let normalized = normalize(raw);
//! assert_eq!(normalized["ENERGY"]["GUI_HOUSE_POW"], json!(3.5));
//! assert_eq!(normalized["ENERGY"]["STAT_STATE"], json!(14));
//! assert_eq!(normalized["PV1"]["MPP_POWER"][1], json!(100.0));
//! assert_eq!(normalized["WIZARD"]["DEVICE_NAME"], json!("hello"));
//! ```

mod tag;

pub use tag::{LEAF_TAGS, LeafKind, LeafTag, SEPARATOR};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::DecodeError;

/// Byte order of the hex payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Decodes tagged leaves and normalizes whole response trees.
///
/// The decoder holds no state besides its byte order and can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeafDecoder {
    byte_order: ByteOrder,
}

impl LeafDecoder {
    /// Creates a decoder for the given payload byte order.
    #[must_use]
    pub const fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    /// Returns the payload byte order.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Decodes a single string leaf.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownTag`] when the string is not a tagged
    /// value at all, and the other [`DecodeError`] variants when the tag is
    /// known but the payload cannot be decoded.
    pub fn decode(&self, leaf: &str) -> Result<Value, DecodeError> {
        let (tag, payload) = leaf.split_once(SEPARATOR).ok_or(DecodeError::UnknownTag)?;
        let entry = tag::lookup(tag).ok_or(DecodeError::UnknownTag)?;

        let expected = entry.kind.hex_digits();
        if payload.len() != expected {
            return Err(DecodeError::PayloadLength {
                tag: entry.tag,
                expected,
                actual: payload.len(),
            });
        }

        let mut bytes =
            hex::decode(payload).map_err(|_| DecodeError::InvalidHex { tag: entry.tag })?;
        if self.byte_order == ByteOrder::Little {
            bytes.reverse();
        }

        decode_be(entry, &bytes)
    }

    /// Normalizes a response tree, decoding every tagged string leaf.
    #[must_use]
    pub fn normalize(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, child)| (key, self.normalize(child)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.normalize(item)).collect())
            }
            Value::String(leaf) => self.normalize_leaf(leaf),
            other => other,
        }
    }

    fn normalize_leaf(&self, leaf: String) -> Value {
        match self.decode(&leaf) {
            Ok(decoded) => decoded,
            Err(DecodeError::UnknownTag) => Value::String(leaf),
            Err(error) => {
                tracing::debug!(leaf = %leaf, %error, "Keeping undecodable leaf");
                Value::String(leaf)
            }
        }
    }
}

/// Normalizes a response tree using little-endian payloads.
///
/// Shorthand for `LeafDecoder::default().normalize(value)`.
#[must_use]
pub fn normalize(value: Value) -> Value {
    LeafDecoder::default().normalize(value)
}

/// Interprets big-endian payload bytes according to the tag kind.
fn decode_be(entry: &LeafTag, bytes: &[u8]) -> Result<Value, DecodeError> {
    let tag = entry.tag;
    let value = match entry.kind {
        LeafKind::Float32 => {
            let float = f32::from_be_bytes(fixed(tag, bytes)?);
            Number::from_f64(f64::from(float))
                .map(Value::Number)
                .ok_or(DecodeError::NonFinite { tag })?
        }
        LeafKind::U8 => Value::from(u8::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::I8 => Value::from(i8::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::U16 => Value::from(u16::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::I16 => Value::from(i16::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::U32 => Value::from(u32::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::I32 => Value::from(i32::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::U64 => Value::from(u64::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::I64 => Value::from(i64::from_be_bytes(fixed(tag, bytes)?)),
        LeafKind::Bool => {
            let [byte] = fixed(tag, bytes)?;
            Value::Bool(byte != 0)
        }
    };
    Ok(value)
}

fn fixed<const N: usize>(tag: &'static str, bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::PayloadLength {
        tag,
        expected: N * 2,
        actual: bytes.len() * 2,
    })
}
