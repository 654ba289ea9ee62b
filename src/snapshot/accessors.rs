// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named accessors over the measurement catalog.

use super::Snapshot;
use crate::error::FieldError;
use crate::measurement::{BatteryModule, Phase, catalog};

macro_rules! number_accessors {
    ($(
        $(#[$meta:meta])*
        $name:ident => $measurement:ident;
    )*) => {
        impl Snapshot {
            $(
                $(#[$meta])*
                ///
                /// # Errors
                ///
                /// Returns [`FieldError`] if the value is absent or not a number.
                pub fn $name(&self) -> Result<f64, FieldError> {
                    self.number(&catalog::$measurement)
                }
            )*
        }
    };
}

macro_rules! module_accessors {
    ($(
        $(#[$meta:meta])*
        $name:ident => $series:ident;
    )*) => {
        impl Snapshot {
            $(
                $(#[$meta])*
                ///
                /// # Errors
                ///
                /// Returns [`FieldError`] if the module value is absent or not a number.
                pub fn $name(&self, module: BatteryModule) -> Result<f64, FieldError> {
                    self.series_number(&catalog::$series, module.index())
                }
            )*
        }
    };
}

macro_rules! phase_accessors {
    ($(
        $(#[$meta:meta])*
        $name:ident => $series:ident;
    )*) => {
        impl Snapshot {
            $(
                $(#[$meta])*
                ///
                /// # Errors
                ///
                /// Returns [`FieldError`] if the phase value is absent or not a number.
                pub fn $name(&self, phase: Phase) -> Result<f64, FieldError> {
                    self.series_number(&catalog::$series, phase.index())
                }
            )*
        }
    };
}

number_accessors! {
    /// Current house consumption (W).
    house_power => HOUSE_POWER;
    /// Current solar generation (W), always non-negative.
    solar_generated_power => SOLAR_GENERATED_POWER;
    /// Battery state of charge (%).
    battery_charge_percent => BATTERY_CHARGE_PERCENT;
    /// Battery power (W).
    ///
    /// Positive while charging, negative while discharging.
    battery_state_power => BATTERY_STATE_POWER;
    /// Battery charging power (W), `0` while discharging.
    battery_charge_power => BATTERY_CHARGE_POWER;
    /// Battery discharging power (W), `0` while charging.
    battery_discharge_power => BATTERY_DISCHARGE_POWER;
    /// Battery voltage (V).
    battery_voltage => BATTERY_VOLTAGE;
    /// Battery current (A).
    battery_current => BATTERY_CURRENT;
    /// Grid exchange power (W).
    ///
    /// Positive when importing, negative when exporting.
    grid_state_power => GRID_STATE_POWER;
    /// Power imported from the grid (W), `0` while exporting.
    grid_imported_power => GRID_IMPORTED_POWER;
    /// Power exported to the grid (W), `0` while importing.
    grid_exported_power => GRID_EXPORTED_POWER;
    /// Total house consumption (kWh). Does not include the wallbox.
    house_total_consumption => HOUSE_TOTAL_CONSUMPTION;
    /// Total solar generation (kWh).
    solar_total_generated => SOLAR_TOTAL_GENERATED;
    /// Total energy charged into the battery (kWh).
    battery_total_charged => BATTERY_TOTAL_CHARGED;
    /// Total energy drawn from the battery (kWh).
    battery_total_discharged => BATTERY_TOTAL_DISCHARGED;
    /// Total energy exported to the grid (kWh).
    grid_total_export => GRID_TOTAL_EXPORT;
    /// Total energy imported from the grid (kWh).
    grid_total_import => GRID_TOTAL_IMPORT;
    /// Total wallbox energy (kWh).
    wallbox_energy => WALLBOX_ENERGY;
    /// Wallbox charging power (W).
    wallbox_power => WALLBOX_POWER;
    /// Battery temperature (°C).
    battery_temperature => BATTERY_TEMPERATURE;
    /// Case temperature (°C).
    case_temperature => CASE_TEMPERATURE;
    /// Controller temperature (°C).
    mcu_temperature => MCU_TEMPERATURE;
    /// Solar feed-in ratio (%).
    solar_power_ratio => SOLAR_POWER_RATIO;
    /// Grid frequency (Hz).
    grid_frequency => GRID_FREQUENCY;
    /// Total power at the grid meter (W).
    grid_meter_total_power => GRID_METER_TOTAL_POWER;
}

phase_accessors! {
    /// Grid meter voltage of a phase (V).
    ac_voltage => AC_VOLTAGE;
    /// Grid meter current of a phase (A).
    ac_current => AC_CURRENT;
    /// Grid meter power of a phase (W).
    ac_power => AC_POWER;
}

module_accessors! {
    /// State of charge of a battery module (%).
    bms_soc => BMS_SOC;
    /// State of health of a battery module (%).
    bms_soh => BMS_SOH;
    /// Voltage of a battery module (V).
    bms_voltage => BMS_VOLTAGE;
    /// Current of a battery module (A).
    bms_current => BMS_CURRENT;
    /// Charge cycles of a battery module.
    bms_cycles => BMS_CYCLES;
    /// Charge current limit of a battery module (A).
    bms_charge_limit => BMS_CHARGE_LIMIT;
    /// Firmware version of a battery module.
    bms_firmware => BMS_FIRMWARE;
}

impl Snapshot {
    /// Whether a vehicle is connected to the wallbox.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the value is absent or not a flag.
    pub fn wallbox_ev_connected(&self) -> Result<bool, FieldError> {
        self.flag(&catalog::WALLBOX_EV_CONNECTED)
    }

    /// Power of one MPP tracker (W), `tracker` counted from 0.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the tracker value is absent or not a number.
    pub fn mpp_power(&self, tracker: usize) -> Result<f64, FieldError> {
        self.series_number(&catalog::MPP_POWER, tracker)
    }

    /// Temperature of one cell (°C), `cell` counted from 0.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the cell value is absent or not a number.
    pub fn bms_cell_temperature(
        &self,
        module: BatteryModule,
        cell: usize,
    ) -> Result<f64, FieldError> {
        self.series_number(&module.cell_temperatures(), cell)
    }

    /// Voltage of one cell (mV), `cell` counted from 0.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the cell value is absent or not a number.
    pub fn bms_cell_voltage(&self, module: BatteryModule, cell: usize) -> Result<f64, FieldError> {
        self.series_number(&module.cell_voltages(), cell)
    }

    /// Whether a switched socket is on, `socket` counted from 0.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if the socket state is absent or not a flag.
    pub fn socket_power_on(&self, socket: usize) -> Result<bool, FieldError> {
        self.series_flag(&catalog::SOCKET_POWER_ON, socket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_snapshot() -> Snapshot {
        Snapshot::new(json!({
            "ENERGY": {
                "GUI_HOUSE_POW": 512.0,
                "GUI_INVERTER_POWER": -2400.0,
                "GUI_BAT_DATA_FUEL_CHARGE": 64.5,
                "GUI_BAT_DATA_POWER": 250.0,
                "GUI_GRID_POW": -800.0
            },
            "STATISTIC": {
                "LIVE_HOUSE_CONS": 1234.5,
                "LIVE_WB_ENERGY": [4500.0, 0.0, 0.0, 0.0]
            },
            "WALLBOX": {
                "APPARENT_CHARGING_POWER": [3680.0, 0.0, 0.0, 0.0],
                "EV_CONNECTED": [1, 0, 0, 0]
            },
            "PV1": { "MPP_POWER": [1200.0, 1100.0, 100.0] },
            "PM1OBJ1": {
                "U_AC": [230.0, 231.0, 232.0],
                "I_AC": [1.5, 2.5, 3.5],
                "P_AC": [-200.0, -300.0, -300.0]
            },
            "BMS": {
                "SOC": [64, 65, 63, 64],
                "SOH": [98, 99, 97, 100],
                "CELL_TEMPERATURES_MODULE_B": [21.0, 21.5, 22.0, 22.5, 23.0, 23.5],
                "CELL_VOLTAGES_MODULE_D": [
                    3301, 3302, 3303, 3304, 3305, 3306, 3307,
                    3308, 3309, 3310, 3311, 3312, 3313, 3314
                ]
            },
            "SOCKETS": { "POWER_ON": [true, false] }
        }))
    }

    #[test]
    fn energy_accessors() {
        let snap = full_snapshot();
        assert_eq!(snap.house_power(), Ok(512.0));
        assert_eq!(snap.solar_generated_power(), Ok(2400.0));
        assert_eq!(snap.battery_charge_percent(), Ok(64.5));
        assert_eq!(snap.battery_charge_power(), Ok(250.0));
        assert_eq!(snap.battery_discharge_power(), Ok(0.0));
        assert_eq!(snap.grid_imported_power(), Ok(0.0));
        assert_eq!(snap.grid_exported_power(), Ok(800.0));
        assert_eq!(snap.house_total_consumption(), Ok(1234.5));
    }

    #[test]
    fn wallbox_accessors() {
        let snap = full_snapshot();
        assert_eq!(snap.wallbox_power(), Ok(3680.0));
        assert_eq!(snap.wallbox_ev_connected(), Ok(true));
        let energy = snap.wallbox_energy().unwrap();
        assert!((energy - 4.5).abs() < 1e-9);
    }

    #[test]
    fn phase_and_tracker_accessors() {
        let snap = full_snapshot();
        assert_eq!(snap.ac_voltage(Phase::L2), Ok(231.0));
        assert_eq!(snap.ac_current(Phase::L3), Ok(3.5));
        assert_eq!(snap.ac_power(Phase::L1), Ok(-200.0));
        assert_eq!(snap.mpp_power(2), Ok(100.0));
        assert!(snap.mpp_power(3).is_err());
    }

    #[test]
    fn bms_accessors() {
        let snap = full_snapshot();
        assert_eq!(snap.bms_soc(BatteryModule::C), Ok(63.0));
        assert_eq!(snap.bms_soh(BatteryModule::D), Ok(100.0));
        assert_eq!(snap.bms_cell_temperature(BatteryModule::B, 5), Ok(23.5));
        assert_eq!(snap.bms_cell_voltage(BatteryModule::D, 13), Ok(3314.0));
        assert!(matches!(
            snap.bms_cell_voltage(BatteryModule::A, 0),
            Err(FieldError::Absent { .. })
        ));
        assert!(snap.bms_cycles(BatteryModule::A).is_err());
    }

    #[test]
    fn socket_accessors() {
        let snap = full_snapshot();
        assert_eq!(snap.socket_power_on(0), Ok(true));
        assert_eq!(snap.socket_power_on(1), Ok(false));
        assert_eq!(
            snap.socket_power_on(2),
            Err(FieldError::Absent {
                path: "SOCKETS.POWER_ON[2]".to_string()
            })
        );
    }
}
