//! BIOS Information (Type 0)
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::{format, string::String, vec::Vec};

use bitfield::bitfield;

use crate::{
    feature::{push_flags, Feature},
    smbios::SMBIOS_TYPE_BIOS_INFORMATION,
    structure::SmbiosStructure,
};

bitfield! {
    /// BIOS Characteristics, offset 0Ah.
    struct BiosCharacteristics(u64);
    impl Debug;
    /// Characteristics are not supported, no other bit is meaningful
    not_supported, _: 3;
}

bitfield! {
    /// Extended BIOS ROM Size, offset 18h (SMBIOS 3.1 and later).
    struct ExtendedBiosRomSize(u16);
    impl Debug;
    /// Size in units
    u16, size, _: 13, 0;
    /// 00b megabytes, 01b gigabytes
    u8, unit, _: 15, 14;
}

/// Labels for BIOS Characteristics bits 4 through 31.
const CHARACTERISTICS: [&str; 28] = [
    "ISA",
    "MCA",
    "EISA",
    "PCI",
    "PC Card (PCMCIA)",
    "PNP",
    "APM",
    "BIOS is upgradeable",
    "BIOS shadowing",
    "VLB",
    "ESCD",
    "Boot from CD",
    "Selectable boot",
    "BIOS ROM is socketed",
    "Boot from PC Card (PCMCIA)",
    "EDD",
    "Japanese floppy for NEC 9800 1.2 MB (int 13h)",
    "Japanese floppy for Toshiba 1.2 MB (int 13h)",
    "5.25\"/360 kB floppy (int 13h)",
    "5.25\"/1.2 MB floppy (int 13h)",
    "3.5\"/720 kB floppy (int 13h)",
    "3.5\"/2.88 MB floppy (int 13h)",
    "Print screen (int 5h)",
    "8042 keyboard (int 9h)",
    "Serial (int 14h)",
    "Printer (int 17h)",
    "CGA/mono video (int 10h)",
    "NEC PC-98",
];

/// Labels for BIOS Characteristics Extension Byte 1 bits 0 through 7.
const CHARACTERISTICS_EXT1: [&str; 8] = [
    "ACPI",
    "USB legacy",
    "AGP",
    "I2O boot",
    "LS-120 boot",
    "ATAPI Zip drive boot",
    "IEEE 1394 boot",
    "Smart battery",
];

/// Labels for BIOS Characteristics Extension Byte 2 bits 0 through 2.
const CHARACTERISTICS_EXT2: [&str; 3] =
    ["BIOS boot specification", "Function key-initiated network boot", "Targeted content distribution"];

const REVISION_NOT_SUPPORTED: u8 = 0xFF;

/// Decoded view of the BIOS Information structure.
#[derive(Debug, Clone, Copy)]
pub struct BiosInfo<'a> {
    structure: SmbiosStructure<'a>,
}

impl<'a> BiosInfo<'a> {
    /// Wraps `structure`, or returns `None` if it is not a BIOS Information structure.
    pub fn new(structure: SmbiosStructure<'a>) -> Option<Self> {
        (structure.record_type() == SMBIOS_TYPE_BIOS_INFORMATION).then_some(Self { structure })
    }

    /// The underlying structure.
    pub fn structure(&self) -> &SmbiosStructure<'a> {
        &self.structure
    }

    /// Vendor string, offset 04h.
    pub fn manufacturer(&self) -> String {
        self.structure.string(0x04)
    }

    /// BIOS Version string, offset 05h.
    pub fn version(&self) -> String {
        self.structure.string(0x05)
    }

    /// BIOS Release Date string, offset 08h.
    pub fn release_date(&self) -> String {
        self.structure.string(0x08)
    }

    /// Size of the physical device containing the BIOS, in kilobytes: 64K * (n + 1).
    pub fn rom_size(&self) -> u32 {
        self.structure.byte(0x09).map(|size| (u32::from(size) + 1) << 6).unwrap_or(0)
    }

    /// Extended BIOS ROM size in kilobytes, or 0 if the structure predates SMBIOS 3.1.
    ///
    /// Firmware reports ROMs of 16 MB and larger here and sets [`rom_size`](Self::rom_size)'s byte to FFh.
    pub fn extended_rom_size(&self) -> u64 {
        if !self.structure.has_length(0x1A) {
            return 0;
        }
        let Some(extended) = self.structure.word(0x18).map(ExtendedBiosRomSize) else {
            return 0;
        };
        match extended.unit() {
            0 => u64::from(extended.size()) * 1024,
            1 => u64::from(extended.size()) * 1024 * 1024,
            _ => 0,
        }
    }

    /// System BIOS major and minor release, e.g. "2.5". Empty if either byte is FFh.
    pub fn bios_revision(&self) -> String {
        self.revision(0x14, 0x15)
    }

    /// Embedded controller firmware major and minor release. Empty if either byte is FFh.
    pub fn firmware_revision(&self) -> String {
        self.revision(0x16, 0x17)
    }

    /// Segment of the BIOS runtime image in real mode, e.g. "E0000h". Empty if the segment is 0.
    pub fn address(&self) -> String {
        match self.structure.word(0x06) {
            Some(segment) if segment != 0 => format!("{:04X}0h", segment),
            _ => String::new(),
        }
    }

    /// Size in bytes of the runtime image between the starting segment and the 1 MB boundary.
    pub fn runtime_size(&self) -> u32 {
        let segment = match self.structure.word(0x06) {
            Some(segment) if segment != 0 => u32::from(segment),
            _ => return 0,
        };

        let code = (0x10000 - segment) << 4;
        if code & 0x0000_03FF != 0 {
            code
        } else {
            (code >> 10) * 1024
        }
    }

    /// BIOS characteristics followed by the extension bytes present at this structure's length.
    ///
    /// The base list covers bits 4 through 31 and is left out entirely when bit 3 ("characteristics not supported")
    /// is set.
    pub fn characteristics(&self) -> Vec<Feature> {
        let mut features = Vec::new();

        if let Some(characteristics) = self.structure.qword(0x0A).map(BiosCharacteristics) {
            if !characteristics.not_supported() {
                push_flags(&mut features, characteristics.0, 4, &CHARACTERISTICS);
            }
        }

        if self.structure.has_length(0x13) {
            if let Some(ext1) = self.structure.byte(0x12) {
                push_flags(&mut features, u64::from(ext1), 0, &CHARACTERISTICS_EXT1);
            }
        }

        if self.structure.has_length(0x14) {
            if let Some(ext2) = self.structure.byte(0x13) {
                push_flags(&mut features, u64::from(ext2), 0, &CHARACTERISTICS_EXT2);
            }
        }

        features
    }

    fn revision(&self, major_offset: u8, minor_offset: u8) -> String {
        match (self.structure.byte(major_offset), self.structure.byte(minor_offset)) {
            (Some(major), Some(minor)) if major != REVISION_NOT_SUPPORTED && minor != REVISION_NOT_SUPPORTED => {
                format!("{}.{}", major, minor)
            }
            _ => String::new(),
        }
    }
}
