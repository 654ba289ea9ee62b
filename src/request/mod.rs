// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field requests sent to the appliance.
//!
//! The appliance only returns what it is asked for. The request body mirrors
//! the response shape: every requested field appears with an empty string
//! placeholder, and a group with no fields asks for every field of that
//! group.
//!
//! ```json
//! { "ENERGY": { "GUI_HOUSE_POW": "", "STAT_STATE": "" }, "BMS": {} }
//! ```
//!
//! Asking for too much at once keeps the appliance busy and can break its
//! cloud synchronisation, so [`FieldRequest::standard`] only asks for the
//! fields the web interface itself shows.
//!
//! # Examples
//!
//! ```
//! use senec_lib::request::FieldRequest;
//! use serde_json::json;
//!
//! let request = FieldRequest::new()
//!     .with_field("ENERGY", "GUI_HOUSE_POW")
//!     .with_group("BMS");
//!
//! assert_eq!(
//!     request.to_body(),
//!     json!({ "BMS": {}, "ENERGY": { "GUI_HOUSE_POW": "" } })
//! );
//! ```

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::measurement::{FieldPath, Measurement, Series, catalog};

/// Fields the web interface requests besides the catalog measurements.
const STANDARD_EXTRA_FIELDS: &[(&str, &str)] = &[
    ("ENERGY", "GUI_CHARGING_INFO"),
    ("ENERGY", "GUI_BOOSTING_INFO"),
    ("ENERGY", "GUI_BAT_DATA_OA_CHARGING"),
    ("ENERGY", "STAT_LIMITED_NET_SKEW"),
    ("WALLBOX", "L1_CHARGING_CURRENT"),
    ("WALLBOX", "L2_CHARGING_CURRENT"),
    ("WALLBOX", "L3_CHARGING_CURRENT"),
    ("PWR_UNIT", "POWER_L1"),
    ("PWR_UNIT", "POWER_L2"),
    ("PWR_UNIT", "POWER_L3"),
    ("PM1OBJ2", "FREQ"),
    ("PM1OBJ2", "U_AC"),
    ("PM1OBJ2", "I_AC"),
    ("PM1OBJ2", "P_AC"),
    ("PM1OBJ2", "P_TOTAL"),
];

/// Groups returned whole by [`FieldRequest::all_groups`].
const ALL_GROUPS: &[&str] = &[
    "STATISTIC",
    "ENERGY",
    "FEATURES",
    "LOG",
    "SYS_UPDATE",
    "WIZARD",
    "BMS",
    "BAT1",
    "BAT1OBJ1",
    "BAT1OBJ2",
    "BAT1OBJ3",
    "BAT1OBJ4",
    "PWR_UNIT",
    "PV1",
];

/// The set of groups and fields to ask the appliance for.
///
/// Serializes as a map of group name to field list, which makes it easy to
/// keep in a configuration file:
///
/// ```
/// use senec_lib::request::FieldRequest;
///
/// let request: FieldRequest =
///     serde_json::from_str(r#"{ "ENERGY": ["GUI_HOUSE_POW"], "BMS": [] }"#).unwrap();
/// assert!(request.contains_group("BMS"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRequest {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl FieldRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The fields shown by the appliance's web interface.
    ///
    /// Covers every entry of [`catalog::ALL`] and [`catalog::SERIES`].
    #[must_use]
    pub fn standard() -> Self {
        let mut request = Self::from_measurements(catalog::ALL).with_series(catalog::SERIES);
        for (group, field) in STANDARD_EXTRA_FIELDS {
            request = request.with_field(*group, *field);
        }
        request
    }

    /// Every field of every diagnostic group.
    ///
    /// This is expensive for the appliance; do not poll with it frequently.
    #[must_use]
    pub fn all_groups() -> Self {
        ALL_GROUPS
            .iter()
            .fold(Self::new(), |request, group| request.with_group(*group))
    }

    /// Creates a request covering the given measurements.
    #[must_use]
    pub fn from_measurements<'a>(measurements: impl IntoIterator<Item = &'a Measurement>) -> Self {
        measurements
            .into_iter()
            .fold(Self::new(), |request, measurement| {
                request.with_path(measurement.path())
            })
    }

    /// Requests every field of a group.
    ///
    /// Any fields previously listed for the group are dropped.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into(), BTreeSet::new());
        self
    }

    /// Requests one field of a group.
    ///
    /// A group already requested whole stays whole.
    #[must_use]
    pub fn with_field(mut self, group: impl Into<String>, field: impl Into<String>) -> Self {
        match self.groups.entry(group.into()) {
            Entry::Occupied(entry) => {
                let fields = entry.into_mut();
                if !fields.is_empty() {
                    fields.insert(field.into());
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(BTreeSet::from([field.into()]));
            }
        }
        self
    }

    /// Requests the field a path points into. The array index is ignored;
    /// the appliance always returns whole arrays.
    #[must_use]
    pub fn with_path(self, path: FieldPath) -> Self {
        self.with_field(path.group(), path.field())
    }

    /// Requests the fields of several series.
    #[must_use]
    pub fn with_series<'a>(self, series: impl IntoIterator<Item = &'a Series>) -> Self {
        series
            .into_iter()
            .fold(self, |request, series| request.with_path(series.path()))
    }

    /// Returns `true` if nothing is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns `true` if the group is part of the request.
    #[must_use]
    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Returns `true` if the response will carry the field a path points to.
    #[must_use]
    pub fn contains(&self, path: FieldPath) -> bool {
        self.groups
            .get(path.group())
            .is_some_and(|fields| fields.is_empty() || fields.contains(path.field()))
    }

    /// Iterates over requested groups and their fields.
    ///
    /// An empty field set means the whole group.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.groups
            .iter()
            .map(|(group, fields)| (group.as_str(), fields))
    }

    /// Builds the JSON body sent to the appliance.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let body: Map<String, Value> = self
            .groups
            .iter()
            .map(|(group, fields)| {
                let placeholders: Map<String, Value> = fields
                    .iter()
                    .map(|field| (field.clone(), Value::String(String::new())))
                    .collect();
                (group.clone(), Value::Object(placeholders))
            })
            .collect();
        Value::Object(body)
    }
}
