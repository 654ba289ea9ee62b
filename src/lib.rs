// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `senec_lib` - A Rust library to read telemetry from SENEC home storage
//! appliances.
//!
//! The appliance answers JSON queries on its local `lala.cgi` endpoint. Most
//! values in the answer are hex-encoded strings (`fl_…` for floats, `u1_…`
//! for 16-bit integers and so on); this library decodes them and exposes
//! the result as typed measurements.
//!
//! # Features
//!
//! - **Normalization**: [`codec::normalize`] decodes every tagged leaf of a
//!   response tree and leaves everything else untouched
//! - **Polling**: [`Senec::poll`] queries the appliance and keeps the last
//!   good [`Snapshot`]
//! - **Measurements**: power, energy, temperatures, grid meter phases and
//!   per-module / per-cell BMS values with their units
//! - **System state**: the appliance status code and its label
//!
//! # Quick Start
//!
//! ```no_run
//! use senec_lib::Senec;
//! use senec_lib::measurement::{BatteryModule, Phase};
//!
//! #[tokio::main]
//! async fn main() -> senec_lib::Result<()> {
//!     let senec = Senec::http("192.168.1.120")
//!         .danger_accept_invalid_certs()
//!         .build()?;
//!
//!     let snapshot = senec.poll().await?;
//!     println!("state:      {}", snapshot.system_state()?);
//!     println!("house:      {} W", snapshot.house_power()?);
//!     println!("charging:   {} W", snapshot.battery_charge_power()?);
//!     println!("L1 voltage: {} V", snapshot.ac_voltage(Phase::L1)?);
//!     println!("SoC A:      {} %", snapshot.bms_soc(BatteryModule::A)?);
//!     Ok(())
//! }
//! ```
//!
//! # Reading the catalog
//!
//! Every measurement is also available as data, which is handy for
//! republishing everything to a monitoring system:
//!
//! ```
//! use senec_lib::Snapshot;
//! use senec_lib::measurement::catalog;
//! use serde_json::json;
//!
//! let snapshot = Snapshot::new(json!({ "ENERGY": { "GUI_HOUSE_POW": 412.0 } }));
//! for measurement in catalog::ALL {
//!     if let Ok(value) = snapshot.number(measurement) {
//!         println!("{} = {value} {}", measurement.name(), measurement.unit());
//!     }
//! }
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod measurement;
pub mod protocol;
pub mod request;
pub mod snapshot;
pub mod system_state;

#[cfg(feature = "http")]
pub use client::HttpSenecBuilder;
pub use client::Senec;
pub use codec::{ByteOrder, LeafDecoder, normalize};
pub use error::{DecodeError, Error, FieldError, ParseError, ProtocolError, Result};
pub use measurement::{BatteryModule, FieldPath, Measurement, Phase, Reading, Series, Unit};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::{DeviceResponse, Protocol};
pub use request::FieldRequest;
pub use snapshot::Snapshot;
