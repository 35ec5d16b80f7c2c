//! SMBIOS Standard Definitions
//!
//! Structure type codes, the structure header and the RawSMBIOSData header, as defined by the DMTF System
//! Management BIOS Reference Specification.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy_derive::*;

/// Types 0 through 127 (7Fh) are reserved for and defined by the specification. Types 128 through 255 (80h to FFh)
/// are available for system- and OEM-specific information.
pub type SmbiosType = u8;

/// Specifies the structure's handle, a unique 16-bit number in the range 0 to 0FEFFh.
pub type SmbiosHandle = u16;

/// BIOS Information (Type 0)
pub const SMBIOS_TYPE_BIOS_INFORMATION: SmbiosType = 0;
/// System Information (Type 1)
pub const SMBIOS_TYPE_SYSTEM_INFORMATION: SmbiosType = 1;
/// Baseboard Information (Type 2)
pub const SMBIOS_TYPE_BASEBOARD_INFORMATION: SmbiosType = 2;
/// System Enclosure (Type 3)
pub const SMBIOS_TYPE_SYSTEM_ENCLOSURE: SmbiosType = 3;
/// Processor Information (Type 4)
pub const SMBIOS_TYPE_PROCESSOR_INFORMATION: SmbiosType = 4;
/// Cache Information (Type 7)
pub const SMBIOS_TYPE_CACHE_INFORMATION: SmbiosType = 7;
/// OEM Strings (Type 11)
pub const SMBIOS_TYPE_OEM_STRINGS: SmbiosType = 11;
/// Memory Device (Type 17)
pub const SMBIOS_TYPE_MEMORY_DEVICE: SmbiosType = 17;

/// Inactive type is added from SMBIOS 2.2. Upper-level software that interprets the structure table should bypass
/// an Inactive structure just like a structure type that the software does not recognize.
pub const SMBIOS_TYPE_INACTIVE: SmbiosType = 0x7E;

/// End-of-table type is added from SMBIOS 2.2. The end-of-table indicator is used in the last physical structure
/// in a table.
pub const SMBIOS_TYPE_END_OF_TABLE: SmbiosType = 0x7F;

/// Name of a structure type, or an empty string for types without a name here.
///
/// Types 80h and above are reported as "OEM-specific".
pub fn type_name(record_type: SmbiosType) -> &'static str {
    match record_type {
        SMBIOS_TYPE_BIOS_INFORMATION => "BIOS Information",
        SMBIOS_TYPE_SYSTEM_INFORMATION => "System Information",
        SMBIOS_TYPE_BASEBOARD_INFORMATION => "Base Board Information",
        SMBIOS_TYPE_SYSTEM_ENCLOSURE => "Chassis Information",
        SMBIOS_TYPE_PROCESSOR_INFORMATION => "Processor Information",
        SMBIOS_TYPE_CACHE_INFORMATION => "Cache Information",
        SMBIOS_TYPE_OEM_STRINGS => "OEM Strings",
        SMBIOS_TYPE_MEMORY_DEVICE => "Memory Device",
        SMBIOS_TYPE_INACTIVE => "Inactive",
        SMBIOS_TYPE_END_OF_TABLE => "End Of Table",
        0x80..=0xFF => "OEM-specific",
        _ => "",
    }
}

/// Smallest legal value of a structure's length field: the header itself.
pub const SMBIOS_STRUCTURE_HEADER_LENGTH: u8 = 4;

/// Header shared by every SMBIOS structure.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SmbiosStructureHeader {
    /// Structure type
    pub record_type: SmbiosType,
    /// Length of the formatted area, header included, strings excluded
    pub length: u8,
    /// Structure handle
    pub handle: U16,
}

impl SmbiosStructureHeader {
    /// Creates a header for the given type, formatted area length and handle.
    pub fn new(record_type: SmbiosType, length: u8, handle: SmbiosHandle) -> Self {
        Self { record_type, length, handle: U16::new(handle) }
    }
}

/// Header of the firmware table blob returned for the `RSMB` provider, followed by `length` bytes of structure
/// table data.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct RawSmbiosDataHeader {
    /// Non-zero when the 2.0 calling method was used
    pub used_20_calling_method: u8,
    /// SMBIOS major version
    pub major_version: u8,
    /// SMBIOS minor version
    pub minor_version: u8,
    /// DMI revision
    pub dmi_revision: u8,
    /// Length of the structure table that follows
    pub length: U32,
}

/// Size in bytes of [`RawSmbiosDataHeader`].
pub const RAW_SMBIOS_DATA_HEADER_SIZE: usize = core::mem::size_of::<RawSmbiosDataHeader>();

/// SMBIOS specification version reported by firmware.
///
/// Versions compare by major then minor, so `version >= SmbiosVersion::new(2, 6)` is equivalent to
/// `(major << 8) + minor >= 0x0206`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SmbiosVersion {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
}

impl SmbiosVersion {
    /// Version 2.6, from which the first three UUID fields are stored little-endian.
    pub const UUID_LITTLE_ENDIAN: SmbiosVersion = SmbiosVersion::new(2, 6);

    /// Creates a version from the major and minor numbers reported by the entry point.
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for SmbiosVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
