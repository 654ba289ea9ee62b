// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Every measurement and series the appliance exposes in its web-interface
//! query.
//!
//! [`ALL`] and [`SERIES`] list the entries below and are what
//! [`FieldRequest::standard`](crate::request::FieldRequest::standard) is
//! checked against.

use super::{Derivation, FieldPath, Measurement, Series, Unit};

macro_rules! measurements {
    (@index) => { None };
    (@index $index:literal) => { Some($index) };
    (@derive) => { Derivation::Identity };
    (@derive $derivation:expr) => { $derivation };
    ($(
        $(#[$meta:meta])*
        $ident:ident = $name:literal, $group:literal / $field:literal $([$index:literal])?,
            $unit:ident $(, $derivation:expr)?;
    )*) => {
        $(
            $(#[$meta])*
            pub const $ident: Measurement = Measurement::new(
                $name,
                FieldPath::new($group, $field).with_index(measurements!(@index $($index)?)),
                Unit::$unit,
            )
            .with_derivation(measurements!(@derive $($derivation)?));
        )*

        /// All single-value measurements, in declaration order.
        pub const ALL: &[Measurement] = &[$($ident),*];
    };
}

macro_rules! series {
    ($(
        $(#[$meta:meta])*
        $ident:ident = $name:literal, $group:literal / $field:literal [$len:literal], $unit:ident;
    )*) => {
        $(
            $(#[$meta])*
            pub const $ident: Series =
                Series::new($name, FieldPath::new($group, $field), $len, Unit::$unit);
        )*

        /// All array-valued fields, in declaration order.
        pub const SERIES: &[Series] = &[$($ident),*];
    };
}

measurements! {
    // ENERGY

    /// Raw system state code, see [`crate::system_state`].
    SYSTEM_STATE = "system_state", "ENERGY" / "STAT_STATE", None;
    /// Current house consumption (W).
    HOUSE_POWER = "house_power", "ENERGY" / "GUI_HOUSE_POW", Watt;
    /// Current solar generation (W). The inverter reports it negative.
    SOLAR_GENERATED_POWER = "solar_generated_power", "ENERGY" / "GUI_INVERTER_POWER",
        Watt, Derivation::Absolute;
    /// Battery state of charge (%).
    BATTERY_CHARGE_PERCENT = "battery_charge_percent", "ENERGY" / "GUI_BAT_DATA_FUEL_CHARGE",
        Percent;
    /// Battery power (W), positive while charging, negative while discharging.
    BATTERY_STATE_POWER = "battery_state_power", "ENERGY" / "GUI_BAT_DATA_POWER", Watt;
    /// Battery charging power (W), zero while discharging.
    BATTERY_CHARGE_POWER = "battery_charge_power", "ENERGY" / "GUI_BAT_DATA_POWER",
        Watt, Derivation::PositivePart;
    /// Battery discharging power (W), zero while charging.
    BATTERY_DISCHARGE_POWER = "battery_discharge_power", "ENERGY" / "GUI_BAT_DATA_POWER",
        Watt, Derivation::NegativePart;
    /// Battery voltage (V).
    BATTERY_VOLTAGE = "battery_voltage", "ENERGY" / "GUI_BAT_DATA_VOLTAGE", Volt;
    /// Battery current (A).
    BATTERY_CURRENT = "battery_current", "ENERGY" / "GUI_BAT_DATA_CURRENT", Ampere;
    /// Grid exchange power (W), positive on import, negative on export.
    GRID_STATE_POWER = "grid_state_power", "ENERGY" / "GUI_GRID_POW", Watt;
    /// Power imported from the grid (W).
    GRID_IMPORTED_POWER = "grid_imported_power", "ENERGY" / "GUI_GRID_POW",
        Watt, Derivation::PositivePart;
    /// Power exported to the grid (W).
    GRID_EXPORTED_POWER = "grid_exported_power", "ENERGY" / "GUI_GRID_POW",
        Watt, Derivation::NegativePart;

    // STATISTIC

    /// Total house consumption (kWh), wallbox excluded.
    HOUSE_TOTAL_CONSUMPTION = "house_total_consumption", "STATISTIC" / "LIVE_HOUSE_CONS",
        KilowattHour;
    /// Total solar generation (kWh).
    SOLAR_TOTAL_GENERATED = "solar_total_generated", "STATISTIC" / "LIVE_PV_GEN", KilowattHour;
    /// Total energy charged into the battery (kWh).
    BATTERY_TOTAL_CHARGED = "battery_total_charged", "STATISTIC" / "LIVE_BAT_CHARGE",
        KilowattHour;
    /// Total energy drawn from the battery (kWh).
    BATTERY_TOTAL_DISCHARGED = "battery_total_discharged", "STATISTIC" / "LIVE_BAT_DISCHARGE",
        KilowattHour;
    /// Total energy exported to the grid (kWh).
    GRID_TOTAL_EXPORT = "grid_total_export", "STATISTIC" / "LIVE_GRID_EXPORT", KilowattHour;
    /// Total energy imported from the grid (kWh).
    GRID_TOTAL_IMPORT = "grid_total_import", "STATISTIC" / "LIVE_GRID_IMPORT", KilowattHour;
    /// Total wallbox energy (kWh). Reported in Wh.
    WALLBOX_ENERGY = "wallbox_energy", "STATISTIC" / "LIVE_WB_ENERGY" [0],
        KilowattHour, Derivation::Scale(0.001);

    // WALLBOX

    /// Wallbox charging power (W), summed over the three phases.
    WALLBOX_POWER = "wallbox_power", "WALLBOX" / "APPARENT_CHARGING_POWER" [0], Watt;
    /// Whether a vehicle is connected to the wallbox.
    WALLBOX_EV_CONNECTED = "wallbox_ev_connected", "WALLBOX" / "EV_CONNECTED" [0], None;

    // TEMPMEASURE

    /// Battery temperature (°C).
    BATTERY_TEMPERATURE = "battery_temperature", "TEMPMEASURE" / "BATTERY_TEMP", Celsius;
    /// Case temperature (°C).
    CASE_TEMPERATURE = "case_temperature", "TEMPMEASURE" / "CASE_TEMP", Celsius;
    /// Controller temperature (°C).
    MCU_TEMPERATURE = "mcu_temperature", "TEMPMEASURE" / "MCU_TEMP", Celsius;

    // PV1 / PM1OBJ1

    /// Feed-in limitation ratio of the solar inverter (%).
    SOLAR_POWER_RATIO = "solar_power_ratio", "PV1" / "POWER_RATIO", Percent;
    /// Grid frequency (Hz).
    GRID_FREQUENCY = "grid_frequency", "PM1OBJ1" / "FREQ", Hertz;
    /// Total power measured at the grid meter (W).
    GRID_METER_TOTAL_POWER = "grid_meter_total_power", "PM1OBJ1" / "P_TOTAL", Watt;
}

series! {
    /// Power per MPP tracker (W).
    MPP_POWER = "mpp_power", "PV1" / "MPP_POWER" [3], Watt;

    /// Voltage per phase at the grid meter (V).
    AC_VOLTAGE = "ac_voltage", "PM1OBJ1" / "U_AC" [3], Volt;
    /// Current per phase at the grid meter (A).
    AC_CURRENT = "ac_current", "PM1OBJ1" / "I_AC" [3], Ampere;
    /// Power per phase at the grid meter (W).
    AC_POWER = "ac_power", "PM1OBJ1" / "P_AC" [3], Watt;

    /// State of charge per battery module (%).
    BMS_SOC = "bms_soc", "BMS" / "SOC" [4], Percent;
    /// State of health per battery module (%).
    BMS_SOH = "bms_soh", "BMS" / "SOH" [4], Percent;
    /// Voltage per battery module (V).
    BMS_VOLTAGE = "bms_voltage", "BMS" / "VOLTAGE" [4], Volt;
    /// Current per battery module (A).
    BMS_CURRENT = "bms_current", "BMS" / "CURRENT" [4], Ampere;
    /// Charge cycles per battery module.
    BMS_CYCLES = "bms_cycles", "BMS" / "CYCLES" [4], None;
    /// Charge current limit per battery module (A).
    BMS_CHARGE_LIMIT = "bms_charge_limit", "BMS" / "CHARGE_CURRENT_LIMIT" [4], Ampere;
    /// Firmware version per battery module.
    BMS_FIRMWARE = "bms_firmware", "BMS" / "FW" [4], None;

    /// Cell temperatures of module A (°C).
    BMS_CELL_TEMPERATURES_A = "bms_cell_temperature_a", "BMS" / "CELL_TEMPERATURES_MODULE_A" [6],
        Celsius;
    /// Cell temperatures of module B (°C).
    BMS_CELL_TEMPERATURES_B = "bms_cell_temperature_b", "BMS" / "CELL_TEMPERATURES_MODULE_B" [6],
        Celsius;
    /// Cell temperatures of module C (°C).
    BMS_CELL_TEMPERATURES_C = "bms_cell_temperature_c", "BMS" / "CELL_TEMPERATURES_MODULE_C" [6],
        Celsius;
    /// Cell temperatures of module D (°C).
    BMS_CELL_TEMPERATURES_D = "bms_cell_temperature_d", "BMS" / "CELL_TEMPERATURES_MODULE_D" [6],
        Celsius;

    /// Cell voltages of module A (mV).
    BMS_CELL_VOLTAGES_A = "bms_cell_voltage_a", "BMS" / "CELL_VOLTAGES_MODULE_A" [14], Millivolt;
    /// Cell voltages of module B (mV).
    BMS_CELL_VOLTAGES_B = "bms_cell_voltage_b", "BMS" / "CELL_VOLTAGES_MODULE_B" [14], Millivolt;
    /// Cell voltages of module C (mV).
    BMS_CELL_VOLTAGES_C = "bms_cell_voltage_c", "BMS" / "CELL_VOLTAGES_MODULE_C" [14], Millivolt;
    /// Cell voltages of module D (mV).
    BMS_CELL_VOLTAGES_D = "bms_cell_voltage_d", "BMS" / "CELL_VOLTAGES_MODULE_D" [14], Millivolt;

    /// Switched sockets, on/off.
    SOCKET_POWER_ON = "socket_power_on", "SOCKETS" / "POWER_ON" [2], None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, m) in ALL.iter().enumerate() {
            assert!(
                ALL[i + 1..].iter().all(|other| other.name() != m.name()),
                "duplicate measurement {}",
                m.name()
            );
        }
        for (i, s) in SERIES.iter().enumerate() {
            assert!(
                SERIES[i + 1..].iter().all(|other| other.name() != s.name()),
                "duplicate series {}",
                s.name()
            );
        }
    }

    #[test]
    fn indexed_scalars_carry_index() {
        assert_eq!(WALLBOX_POWER.path().index(), Some(0));
        assert_eq!(WALLBOX_ENERGY.derivation(), Derivation::Scale(0.001));
        assert_eq!(HOUSE_POWER.path().index(), None);
    }

    #[test]
    fn derived_power_shares_raw_field() {
        assert_eq!(BATTERY_CHARGE_POWER.path(), BATTERY_STATE_POWER.path());
        assert_eq!(BATTERY_DISCHARGE_POWER.path(), BATTERY_STATE_POWER.path());
        assert_eq!(GRID_IMPORTED_POWER.path(), GRID_STATE_POWER.path());
        assert_eq!(GRID_EXPORTED_POWER.derivation(), Derivation::NegativePart);
    }

    #[test]
    fn series_lengths() {
        assert_eq!(MPP_POWER.len(), 3);
        assert_eq!(AC_VOLTAGE.len(), 3);
        assert_eq!(BMS_SOC.len(), 4);
        assert_eq!(BMS_CELL_TEMPERATURES_C.len(), 6);
        assert_eq!(BMS_CELL_VOLTAGES_D.len(), 14);
        assert_eq!(SOCKET_POWER_ON.len(), 2);
    }
}
