//! System Information (Type 1)
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::{format, string::String};

use uuid::Uuid;

use crate::{
    feature::label_for_code,
    smbios::{SmbiosVersion, SMBIOS_TYPE_SYSTEM_INFORMATION},
    structure::SmbiosStructure,
};

/// Labels for the Wake-up Type byte, codes 01h through 08h.
const WAKEUP_TYPES: [&str; 8] = [
    "Other",
    "Unknown",
    "APM Timer",
    "Modem Ring",
    "LAN Remote",
    "Power Switch",
    "PCI PME#",
    "AC Power Restored",
];

/// UUID and Wake-up Type were added in SMBIOS 2.1.
const UUID_MIN_LENGTH: u8 = 0x19;
/// SKU Number and Family were added in SMBIOS 2.4.
const SKU_MIN_LENGTH: u8 = 0x1B;

/// Decoded view of the System Information structure.
#[derive(Debug, Clone, Copy)]
pub struct SystemInfo<'a> {
    structure: SmbiosStructure<'a>,
    version: SmbiosVersion,
}

impl<'a> SystemInfo<'a> {
    /// Wraps `structure`, or returns `None` if it is not a System Information structure.
    ///
    /// `version` is the SMBIOS version of the table the structure came from; it selects the UUID byte order.
    pub fn new(structure: SmbiosStructure<'a>, version: SmbiosVersion) -> Option<Self> {
        (structure.record_type() == SMBIOS_TYPE_SYSTEM_INFORMATION).then_some(Self { structure, version })
    }

    /// The underlying structure.
    pub fn structure(&self) -> &SmbiosStructure<'a> {
        &self.structure
    }

    /// Manufacturer string, offset 04h.
    pub fn manufacturer(&self) -> String {
        self.structure.string(0x04)
    }

    /// Product Name string, offset 05h.
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

    /// The system UUID, or `None` when absent or set to all 00h ("not present") or all FFh ("not set").
    ///
    /// Starting with SMBIOS 2.6 the first three fields are encoded little-endian; earlier tables store all 16 bytes
    /// in network order.
    pub fn uuid_value(&self) -> Option<Uuid> {
        if !self.structure.has_length(UUID_MIN_LENGTH) {
            return None;
        }

        let bytes: [u8; 16] = self.structure.bytes(0x08, 16)?.try_into().ok()?;
        if bytes.iter().all(|&b| b == 0x00) || bytes.iter().all(|&b| b == 0xFF) {
            return None;
        }

        if self.version >= SmbiosVersion::UUID_LITTLE_ENDIAN {
            Some(Uuid::from_bytes_le(bytes))
        } else {
            Some(Uuid::from_bytes(bytes))
        }
    }

    /// The system UUID as upper case hyphenated text, or an empty string.
    pub fn uuid(&self) -> String {
        self.uuid_value().map(|uuid| format!("{:X}", uuid.hyphenated())).unwrap_or_default()
    }

    /// Event that caused the system to power up, or an empty string.
    pub fn wakeup_type(&self) -> &'static str {
        if !self.structure.has_length(UUID_MIN_LENGTH) {
            return "";
        }
        self.structure.byte(0x18).map(|code| label_for_code(&WAKEUP_TYPES, code)).unwrap_or_default()
    }

    /// SKU Number string, offset 19h. Empty before SMBIOS 2.4 layouts.
    pub fn sku_number(&self) -> String {
        if !self.structure.has_length(SKU_MIN_LENGTH) {
            return String::new();
        }
        self.structure.string(0x19)
    }

    /// Family string, offset 1Ah. Empty before SMBIOS 2.4 layouts.
    pub fn family(&self) -> String {
        if !self.structure.has_length(SKU_MIN_LENGTH) {
            return String::new();
        }
        self.structure.string(0x1A)
    }
}
