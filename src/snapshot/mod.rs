// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized telemetry snapshots.
//!
//! A [`Snapshot`] is the normalized response of one successful poll. It is
//! never modified after creation; the client replaces it as a whole.
//!
//! Values are read either generically through [`Snapshot::measure`] with a
//! [`Measurement`] from the [`catalog`](crate::measurement::catalog), or
//! through the named accessors such as [`Snapshot::house_power`].
//!
//! # Examples
//!
//! ```
//! use senec_lib::snapshot::Snapshot;
//! use senec_lib::measurement::{catalog, Reading};
//! use serde_json::json;
//!
//! let snapshot = Snapshot::new(json!({
//!     "ENERGY": { "GUI_BAT_DATA_POWER": -250.0, "GUI_HOUSE_POW": 430.5 }
//! }));
//!
//! assert_eq!(snapshot.house_power(), Ok(430.5));
//! assert_eq!(snapshot.battery_charge_power(), Ok(0.0));
//! assert_eq!(
//!     snapshot.measure(&catalog::BATTERY_DISCHARGE_POWER),
//!     Ok(Reading::Number(250.0))
//! );
//! assert!(snapshot.grid_state_power().is_err());
//! ```

mod accessors;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::FieldError;
use crate::measurement::{FieldPath, Measurement, Reading, Series, catalog};
use crate::system_state::system_state_name;

/// The normalized response of one successful poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    data: Value,
    received_at: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot from a normalized tree, stamped with the current time.
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self::with_timestamp(data, Utc::now())
    }

    /// Creates a snapshot with an explicit receive time.
    #[must_use]
    pub fn with_timestamp(data: Value, received_at: DateTime<Utc>) -> Self {
        Self { data, received_at }
    }

    /// Returns the whole normalized tree.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.data
    }

    /// Consumes the snapshot, returning the normalized tree.
    #[must_use]
    pub fn into_raw(self) -> Value {
        self.data
    }

    /// Returns when the response was received.
    #[must_use]
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Returns the value at a path.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Absent`] if the group, field or element is
    /// missing or `null`, and [`FieldError::UnexpectedType`] if an index is
    /// requested on a field that is not an array.
    pub fn get(&self, path: FieldPath) -> Result<&Value, FieldError> {
        let absent = || FieldError::Absent {
            path: path.to_string(),
        };

        let field = self
            .data
            .get(path.group())
            .and_then(|group| group.get(path.field()))
            .filter(|field| !field.is_null())
            .ok_or_else(absent)?;

        let value = match (path.index(), field) {
            (None, value) => value,
            (Some(index), Value::Array(items)) => items.get(index).ok_or_else(absent)?,
            (Some(_), _) => {
                return Err(FieldError::UnexpectedType {
                    path: path.to_string(),
                    expected: "an array",
                });
            }
        };

        if value.is_null() {
            return Err(absent());
        }
        Ok(value)
    }

    /// Reads a measurement, applying its derivation.
    ///
    /// Booleans and strings are only returned for measurements without a
    /// derivation.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the value is absent or has an unusable type.
    pub fn measure(&self, measurement: &Measurement) -> Result<Reading, FieldError> {
        let path = measurement.path();
        let derivation = measurement.derivation();
        let mismatch = |expected| FieldError::UnexpectedType {
            path: path.to_string(),
            expected,
        };

        match self.get(path)? {
            Value::Number(number) => number
                .as_f64()
                .map(|value| Reading::Number(derivation.apply(value)))
                .ok_or_else(|| mismatch("a number")),
            Value::Bool(flag) if derivation.is_identity() => Ok(Reading::Flag(*flag)),
            Value::String(text) if derivation.is_identity() => Ok(Reading::Text(text.clone())),
            _ if derivation.is_identity() => Err(mismatch("a scalar")),
            _ => Err(mismatch("a number")),
        }
    }

    /// Reads a numeric measurement.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the value is absent or not a number.
    pub fn number(&self, measurement: &Measurement) -> Result<f64, FieldError> {
        self.measure(measurement)?
            .as_f64()
            .ok_or_else(|| FieldError::UnexpectedType {
                path: measurement.path().to_string(),
                expected: "a number",
            })
    }

    /// Reads an on/off measurement. Numbers count as on when non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the value is absent or a string.
    pub fn flag(&self, measurement: &Measurement) -> Result<bool, FieldError> {
        self.measure(measurement)?
            .as_bool()
            .ok_or_else(|| FieldError::UnexpectedType {
                path: measurement.path().to_string(),
                expected: "a boolean",
            })
    }

    /// Reads one element of a series.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Absent`] if `index` is past the series length
    /// or the element is missing.
    pub fn series(&self, series: &Series, index: usize) -> Result<Reading, FieldError> {
        let measurement = series_element(series, index)?;
        self.measure(&measurement)
    }

    /// Reads one numeric element of a series.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the element is absent or not a number.
    pub fn series_number(&self, series: &Series, index: usize) -> Result<f64, FieldError> {
        let measurement = series_element(series, index)?;
        self.number(&measurement)
    }

    /// Reads one on/off element of a series.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the element is absent or not a flag.
    pub fn series_flag(&self, series: &Series, index: usize) -> Result<bool, FieldError> {
        let measurement = series_element(series, index)?;
        self.flag(&measurement)
    }

    /// Reads all elements of a numeric series.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldError`] encountered.
    pub fn series_numbers(&self, series: &Series) -> Result<Vec<f64>, FieldError> {
        (0..series.len())
            .map(|index| self.series_number(series, index))
            .collect()
    }

    /// Returns the raw system state code.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the code is absent or not an unsigned integer.
    pub fn system_state_code(&self) -> Result<u64, FieldError> {
        let path = catalog::SYSTEM_STATE.path();
        self.get(path)?
            .as_u64()
            .ok_or_else(|| FieldError::UnexpectedType {
                path: path.to_string(),
                expected: "an unsigned integer",
            })
    }

    /// Returns the label of the current system state.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownSystemState`] for codes missing from the
    /// status table, or any error of [`Snapshot::system_state_code`].
    pub fn system_state(&self) -> Result<&'static str, FieldError> {
        let code = self.system_state_code()?;
        system_state_name(code).ok_or(FieldError::UnknownSystemState(code))
    }

    /// Reads every single-value measurement of [`catalog::ALL`], keyed by
    /// measurement name.
    ///
    /// Array series are not included; read them with
    /// [`series`](Self::series) or [`series_numbers`](Self::series_numbers).
    /// Entries that cannot be read carry their [`FieldError`].
    pub fn readings(&self) -> impl Iterator<Item = (&'static str, Result<Reading, FieldError>)> {
        catalog::ALL
            .iter()
            .map(move |measurement| (measurement.name(), self.measure(measurement)))
    }
}

fn series_element(series: &Series, index: usize) -> Result<Measurement, FieldError> {
    series.at(index).ok_or_else(|| FieldError::Absent {
        path: series.path().at(index).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> Snapshot {
        Snapshot::new(json!({
            "ENERGY": {
                "STAT_STATE": 14,
                "GUI_BAT_DATA_POWER": 250.0,
                "GUI_GRID_POW": null,
                "GUI_INVERTER_POWER": -1800.0,
                "GUI_CHARGING_INFO": true
            },
            "PM1OBJ1": {
                "U_AC": [230.1, 229.8, 231.0],
                "FREQ": "VARIABLE_NOT_FOUND"
            },
            "BMS": { "SOC": [80, 79] }
        }))
    }

    #[test]
    fn get_existing_paths() {
        let snap = snapshot();
        assert_eq!(
            snap.get(FieldPath::new("ENERGY", "STAT_STATE")),
            Ok(&json!(14))
        );
        assert_eq!(
            snap.get(FieldPath::new("PM1OBJ1", "U_AC").at(1)),
            Ok(&json!(229.8))
        );
    }

    #[test]
    fn get_absent_paths() {
        let snap = snapshot();
        for path in [
            FieldPath::new("WALLBOX", "EV_CONNECTED"),
            FieldPath::new("ENERGY", "GUI_HOUSE_POW"),
            FieldPath::new("ENERGY", "GUI_GRID_POW"),
            FieldPath::new("BMS", "SOC").at(3),
        ] {
            assert_eq!(
                snap.get(path),
                Err(FieldError::Absent {
                    path: path.to_string()
                })
            );
        }
    }

    #[test]
    fn get_index_on_scalar() {
        let snap = snapshot();
        assert!(matches!(
            snap.get(FieldPath::new("ENERGY", "STAT_STATE").at(0)),
            Err(FieldError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn measure_applies_derivation() {
        let snap = snapshot();
        assert_eq!(snap.number(&catalog::BATTERY_CHARGE_POWER), Ok(250.0));
        assert_eq!(snap.number(&catalog::BATTERY_DISCHARGE_POWER), Ok(0.0));
        assert_eq!(snap.number(&catalog::SOLAR_GENERATED_POWER), Ok(1800.0));
    }

    #[test]
    fn measure_discharging() {
        let snap = Snapshot::new(json!({ "ENERGY": { "GUI_BAT_DATA_POWER": -250.0 } }));
        assert_eq!(snap.battery_charge_power(), Ok(0.0));
        assert_eq!(snap.battery_discharge_power(), Ok(250.0));
        assert_eq!(snap.battery_state_power(), Ok(-250.0));
    }

    #[test]
    fn measure_text_and_type_errors() {
        let snap = snapshot();
        assert_eq!(
            snap.measure(&catalog::GRID_FREQUENCY),
            Ok(Reading::Text("VARIABLE_NOT_FOUND".to_string()))
        );
        assert_eq!(
            snap.grid_frequency(),
            Err(FieldError::UnexpectedType {
                path: "PM1OBJ1.FREQ".to_string(),
                expected: "a number"
            })
        );
    }

    #[test]
    fn series_flag_reads_elements() {
        let snap = Snapshot::new(json!({ "SOCKETS": { "POWER_ON": [1, "on"] } }));
        assert_eq!(snap.series_flag(&catalog::SOCKET_POWER_ON, 0), Ok(true));
        assert_eq!(
            snap.series_flag(&catalog::SOCKET_POWER_ON, 1),
            Err(FieldError::UnexpectedType {
                path: "SOCKETS.POWER_ON[1]".to_string(),
                expected: "a boolean"
            })
        );
    }

    #[test]
    fn null_array_field_is_absent() {
        let snap = Snapshot::new(json!({ "WALLBOX": { "EV_CONNECTED": null } }));
        assert_eq!(
            snap.wallbox_ev_connected(),
            Err(FieldError::Absent {
                path: "WALLBOX.EV_CONNECTED[0]".to_string()
            })
        );

        let snap = Snapshot::new(json!({ "BMS": { "SOC": null } }));
        assert!(matches!(
            snap.series_numbers(&catalog::BMS_SOC),
            Err(FieldError::Absent { .. })
        ));
    }

    #[test]
    fn absent_is_not_zero() {
        let snap = snapshot();
        assert!(matches!(
            snap.grid_imported_power(),
            Err(FieldError::Absent { .. })
        ));
    }

    #[test]
    fn series_reads() {
        let snap = snapshot();
        assert_eq!(snap.series_number(&catalog::AC_VOLTAGE, 2), Ok(231.0));
        assert_eq!(
            snap.series_numbers(&catalog::AC_VOLTAGE),
            Ok(vec![230.1, 229.8, 231.0])
        );
        assert!(matches!(
            snap.series_number(&catalog::AC_VOLTAGE, 3),
            Err(FieldError::Absent { .. })
        ));
        assert!(snap.series_numbers(&catalog::BMS_SOC).is_err());
    }

    #[test]
    fn system_state_lookup() {
        let snap = snapshot();
        assert_eq!(snap.system_state_code(), Ok(14));
        assert_eq!(snap.system_state(), Ok("LADEN"));

        let unknown = Snapshot::new(json!({ "ENERGY": { "STAT_STATE": 93 } }));
        assert_eq!(
            unknown.system_state(),
            Err(FieldError::UnknownSystemState(93))
        );

        let negative = Snapshot::new(json!({ "ENERGY": { "STAT_STATE": -1 } }));
        assert!(matches!(
            negative.system_state(),
            Err(FieldError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn readings_cover_catalog() {
        let snap = snapshot();
        let readings: Vec<_> = snap.readings().collect();
        assert_eq!(readings.len(), catalog::ALL.len());
        assert!(
            catalog::SERIES
                .iter()
                .all(|series| readings.iter().all(|(name, _)| *name != series.name()))
        );

        let (_, house) = readings
            .iter()
            .find(|(name, _)| *name == "house_power")
            .unwrap();
        assert!(house.is_err());
    }

    #[test]
    fn raw_and_timestamp() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let snap = Snapshot::with_timestamp(json!({ "A": {} }), at);
        assert_eq!(snap.received_at(), at);
        assert_eq!(snap.raw(), &json!({ "A": {} }));
        assert_eq!(snap.into_raw(), json!({ "A": {} }));
    }
}
