//! Baseboard (or Module) Information (Type 2)
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::{string::String, vec::Vec};

use bitfield::bitfield;

use crate::{
    feature::{label_for_code, push_flags, Feature},
    smbios::{SmbiosHandle, SMBIOS_TYPE_BASEBOARD_INFORMATION},
    structure::SmbiosStructure,
};

bitfield! {
    /// Feature Flags, offset 09h.
    struct BaseboardFeatureFlags(u8);
    impl Debug;
    /// Bits 0 through 4, bits 5 through 7 are reserved
    u8, features, _: 4, 0;
}

/// Labels for Feature Flags bits 0 through 4.
const FEATURE_FLAGS: [&str; 5] = [
    "Board is a hosting board",
    "Board requires at least one daughter board",
    "Board is removable",
    "Board is replaceable",
    "Board is hot swappable",
];

/// Labels for the Board Type byte, codes 01h through 0Dh.
const BOARD_TYPES: [&str; 13] = [
    "Unknown",
    "Other",
    "Server Blade",
    "Connectivity Switch",
    "System Management Module",
    "Processor Module",
    "I/O Module",
    "Memory Module",
    "Daughter Board",
    "Motherboard",
    "Processor+Memory Module",
    "Processor+I/O Module",
    "Interconnect Board",
];

const ASSET_TAG_MIN_LENGTH: u8 = 0x09;
const FEATURES_MIN_LENGTH: u8 = 0x0A;
const CHASSIS_MIN_LENGTH: u8 = 0x0E;

/// Decoded view of the Baseboard Information structure.
///
/// Only the first baseboard in a table is normally decoded; the optional contained object handles at offset 0Fh
/// are not interpreted.
#[derive(Debug, Clone, Copy)]
pub struct BaseboardInfo<'a> {
    structure: SmbiosStructure<'a>,
}

impl<'a> BaseboardInfo<'a> {
    /// Wraps `structure`, or returns `None` if it is not a Baseboard Information structure.
    pub fn new(structure: SmbiosStructure<'a>) -> Option<Self> {
        (structure.record_type() == SMBIOS_TYPE_BASEBOARD_INFORMATION).then_some(Self { structure })
    }

    /// The underlying structure.
    pub fn structure(&self) -> &SmbiosStructure<'a> {
        &self.structure
    }

    /// Manufacturer string, offset 04h.
    pub fn manufacturer(&self) -> String {
        self.structure.string(0x04)
    }

    /// Product string, offset 05h.
    pub fn product_name(&self) -> String {
        self.structure.string(0x05)
    }

    /// Version string, offset 06h.
    pub fn version(&self) -> String {
        self.structure.string(0x06)
    }

    /// Serial Number string, offset 07h.
    pub fn serial_number(&self) -> String {
        self.structure.string(0x07)
    }

    /// Asset Tag string, offset 08h. Empty if the structure predates the field.
    pub fn asset_tag(&self) -> String {
        if !self.structure.has_length(ASSET_TAG_MIN_LENGTH) {
            return String::new();
        }
        self.structure.string(0x08)
    }

    /// Feature flags in bit order. Empty when the field is absent or none of the defined bits are set.
    pub fn features(&self) -> Vec<Feature> {
        let mut features = Vec::new();
        if !self.structure.has_length(FEATURES_MIN_LENGTH) {
            return features;
        }

        let Some(flags) = self.structure.byte(0x09).map(BaseboardFeatureFlags) else {
            return features;
        };
        if flags.features() != 0 {
            push_flags(&mut features, u64::from(flags.features()), 0, &FEATURE_FLAGS);
        }
        features
    }

    /// Location in Chassis string, offset 0Ah. Empty if the structure predates the field.
    pub fn location_in_chassis(&self) -> String {
        if !self.structure.has_length(CHASSIS_MIN_LENGTH) {
            return String::new();
        }
        self.structure.string(0x0A)
    }

    /// Handle of the chassis the board sits in, or `None` if the structure predates the field.
    pub fn chassis_handle(&self) -> Option<SmbiosHandle> {
        if !self.structure.has_length(CHASSIS_MIN_LENGTH) {
            return None;
        }
        self.structure.word(0x0B)
    }

    /// Board Type, offset 0Dh. Empty for unknown codes or if the structure predates the field.
    pub fn board_type(&self) -> &'static str {
        if !self.structure.has_length(CHASSIS_MIN_LENGTH) {
            return "";
        }
        self.structure.byte(0x0D).map(|code| label_for_code(&BOARD_TYPES, code)).unwrap_or_default()
    }
}
