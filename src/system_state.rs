// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Labels for the appliance's system state codes.
//!
//! `ENERGY.STAT_STATE` carries an integer code; the appliance's own web
//! interface shows it with the German labels below.
//!
//! # Examples
//!
//! ```
//! use senec_lib::system_state::system_state_name;
//!
//! assert_eq!(system_state_name(14), Some("LADEN"));
//! assert_eq!(system_state_name(92), None);
//! ```

/// Known state codes and their labels, sorted by code.
///
/// Codes 92 to 94 are not assigned.
pub const SYSTEM_STATES: &[(u64, &str)] = &[
    (0, "INITIALZUSTAND"),
    (1, "KEINE KOMMUNIKATION LADEGERAET"),
    (2, "FEHLER LEISTUNGSMESSGERAET"),
    (3, "RUNDSTEUEREMPFAENGER"),
    (4, "ERSTLADUNG"),
    (5, "WARTUNGSLADUNG"),
    (6, "WARTUNGSLADUNG FERTIG"),
    (7, "WARTUNG NOTWENDIG"),
    (8, "MAN. SICHERHEITSLADUNG"),
    (9, "SICHERHEITSLADUNG FERTIG"),
    (10, "VOLLLADUNG"),
    (11, "AUSGLEICHSLADUNG: LADEN"),
    (12, "SULFATLADUNG: LADEN"),
    (13, "AKKU VOLL"),
    (14, "LADEN"),
    (15, "AKKU LEER"),
    (16, "ENTLADEN"),
    (17, "PV + ENTLADEN"),
    (18, "NETZ + ENTLADEN"),
    (19, "PASSIV"),
    (20, "AUSGESCHALTET"),
    (21, "EIGENVERBRAUCH"),
    (22, "NEUSTART"),
    (23, "MAN. AUSGLEICHSLADUNG: LADEN"),
    (24, "MAN. SULFATLADUNG: LADEN"),
    (25, "SICHERHEITSLADUNG"),
    (26, "AKKU-SCHUTZBETRIEB"),
    (27, "EG FEHLER"),
    (28, "EG LADEN"),
    (29, "EG ENTLADEN"),
    (30, "EG PASSIV"),
    (31, "EG LADEN VERBOTEN"),
    (32, "EG ENTLADEN VERBOTEN"),
    (33, "NOTLADUNG"),
    (34, "SOFTWAREAKTUALISIERUNG"),
    (35, "FEHLER: NA-SCHUTZ"),
    (36, "FEHLER: NA-SCHUTZ NETZ"),
    (37, "FEHLER: NA-SCHUTZ HARDWARE"),
    (38, "KEINE SERVERVERBINDUNG"),
    (39, "BMS FEHLER"),
    (40, "WARTUNG: FILTER"),
    (41, "SCHLAFMODUS"),
    (42, "WARTE AUF ÜBERSCHUSS"),
    (43, "KAPAZITÄTSTEST: LADEN"),
    (44, "KAPAZITÄTSTEST: ENTLADEN"),
    (45, "MAN. SULFATLADUNG: WARTEN"),
    (46, "MAN. SULFATLADUNG: FERTIG"),
    (47, "MAN. SULFATLADUNG: FEHLER"),
    (48, "AUSGLEICHSLADUNG: WARTEN"),
    (49, "NOTLADUNG: FEHLER"),
    (50, "MAN: AUSGLEICHSLADUNG: WARTEN"),
    (51, "MAN: AUSGLEICHSLADUNG: FEHLER"),
    (52, "MAN: AUSGLEICHSLADUNG: FERTIG"),
    (53, "AUTO: SULFATLADUNG: WARTEN"),
    (54, "LADESCHLUSSPHASE"),
    (55, "BATTERIETRENNSCHALTER AUS"),
    (56, "PEAK-SHAVING: WARTEN"),
    (57, "FEHLER LADEGERAET"),
    (58, "NPU-FEHLER"),
    (59, "BMS OFFLINE"),
    (60, "WARTUNGSLADUNG FEHLER"),
    (61, "MAN. SICHERHEITSLADUNG FEHLER"),
    (62, "SICHERHEITSLADUNG FEHLER"),
    (63, "KEINE MASTERVERBINDUNG"),
    (64, "LITHIUM SICHERHEITSMODUS AKTIV"),
    (65, "LITHIUM SICHERHEITSMODUS BEENDET"),
    (66, "FEHLER BATTERIESPANNUNG"),
    (67, "BMS DC AUSGESCHALTET"),
    (68, "NETZINITIALISIERUNG"),
    (69, "NETZSTABILISIERUNG"),
    (70, "FERNABSCHALTUNG"),
    (71, "OFFPEAK-LADEN"),
    (72, "FEHLER HALBBRÜCKE"),
    (73, "BMS: FEHLER BETRIEBSTEMPERATUR"),
    (74, "FACTORY SETTINGS NICHT GEFUNDEN"),
    (75, "NETZERSATZBETRIEB"),
    (76, "NETZERSATZBETRIEB AKKU LEER"),
    (77, "NETZERSATZBETRIEB FEHLER"),
    (78, "INITIALISIERUNG"),
    (79, "INSTALLATIONSMODUS"),
    (80, "NETZAUSFALL"),
    (81, "BMS UPDATE ERFORDERLICH"),
    (82, "BMS KONFIGURATION ERFORDERLICH"),
    (83, "ISOLATIONSPRÜFUNG"),
    (84, "SELBSTTEST"),
    (85, "EXTERNE KONTROLLE"),
    (86, "FEHLER: TEMPERATURSENSOR"),
    (87, "NETZBETREIBER: LADEN VERBOTEN"),
    (88, "GRID OPERATOR: ENTLADEN VERBOTEN"),
    (89, "RESERVEKAPAZITÄT"),
    (90, "SELBSTTEST FEHLER"),
    (91, "ERDUNG FEHLERHAFT"),
    (95, "BATTERIE DIAGNOSE"),
    (96, "BALANCING"),
    (97, "SICHERHEITSENTLADUNG"),
];

/// Returns the label of a system state code.
#[must_use]
pub fn system_state_name(code: u64) -> Option<&'static str> {
    SYSTEM_STATES
        .binary_search_by_key(&code, |&(known, _)| known)
        .ok()
        .map(|position| SYSTEM_STATES[position].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(SYSTEM_STATES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn known_codes() {
        assert_eq!(system_state_name(0), Some("INITIALZUSTAND"));
        assert_eq!(system_state_name(16), Some("ENTLADEN"));
        assert_eq!(system_state_name(21), Some("EIGENVERBRAUCH"));
        assert_eq!(system_state_name(97), Some("SICHERHEITSENTLADUNG"));
    }

    #[test]
    fn unassigned_codes() {
        assert_eq!(system_state_name(93), None);
        assert_eq!(system_state_name(98), None);
        assert_eq!(system_state_name(u64::MAX), None);
    }
}
