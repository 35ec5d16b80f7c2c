//! Owned SMBIOS table buffer
//!
//! [`SmbiosTables`] takes ownership of the firmware-provided bytes, counts the structures once and hands out
//! borrowed views. Every view borrows from the [`SmbiosTables`] it came from, so none can outlive the buffer.
//!
//! ## Example
//!
//! ```
//! use patina_smbios_decoder::SmbiosTables;
//!
//! // BIOS Information with a vendor string, followed by the end-of-table structure.
//! let mut data = vec![0x00, 0x05, 0x00, 0x00, 0x01];
//! data.extend_from_slice(b"Contoso\0\0");
//! data.extend_from_slice(&[0x7F, 0x04, 0xFF, 0xFE, 0x00, 0x00]);
//! let length = data.len();
//!
//! let tables = SmbiosTables::new(data, length, 3, 4).unwrap();
//! assert_eq!(tables.structure_count(), 2);
//! assert_eq!(tables.bios_info().unwrap().manufacturer(), "Contoso");
//! assert!(tables.system_info().is_none());
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

use zerocopy::FromBytes;

use crate::{
    baseboard::BaseboardInfo,
    bios::BiosInfo,
    error::SmbiosTableError,
    smbios::{
        RawSmbiosDataHeader, SmbiosType, SmbiosVersion, RAW_SMBIOS_DATA_HEADER_SIZE,
        SMBIOS_TYPE_BASEBOARD_INFORMATION, SMBIOS_TYPE_BIOS_INFORMATION, SMBIOS_TYPE_SYSTEM_INFORMATION,
    },
    structure::SmbiosStructure,
    system::SystemInfo,
    walker::{self, StructureIter},
};

/// An SMBIOS structure table and the version it was produced for.
#[derive(Debug, Clone)]
pub struct SmbiosTables {
    data: Vec<u8>,
    table_length: usize,
    version: SmbiosVersion,
    structure_count: usize,
}

impl SmbiosTables {
    /// Takes ownership of a structure table.
    ///
    /// `table_length` is the length of the structure table region at the start of `data`, as announced by the
    /// entry point. A length past the end of `data` is clamped to the buffer.
    pub fn new(
        data: Vec<u8>,
        table_length: usize,
        major_version: u8,
        minor_version: u8,
    ) -> Result<Self, SmbiosTableError> {
        if data.is_empty() {
            return Err(SmbiosTableError::EmptyInput);
        }
        Self::from_region(data, table_length, SmbiosVersion::new(major_version, minor_version))
    }

    /// Takes ownership of a RawSMBIOSData blob: an 8-byte header carrying the version and table length, followed by
    /// the structure table.
    pub fn from_raw_smbios_data(mut data: Vec<u8>) -> Result<Self, SmbiosTableError> {
        if data.is_empty() {
            return Err(SmbiosTableError::EmptyInput);
        }

        let (header, _) =
            RawSmbiosDataHeader::read_from_prefix(&data).map_err(|_| SmbiosTableError::BufferTooSmall)?;
        log::debug!(
            "SMBIOS: RawSMBIOSData version {}.{} DMI revision {} table length {:#x}",
            header.major_version,
            header.minor_version,
            header.dmi_revision,
            header.length.get()
        );

        data.drain(..RAW_SMBIOS_DATA_HEADER_SIZE);
        let table_length = usize::try_from(header.length.get()).unwrap_or(usize::MAX);
        Self::from_region(data, table_length, SmbiosVersion::new(header.major_version, header.minor_version))
    }

    fn from_region(data: Vec<u8>, table_length: usize, version: SmbiosVersion) -> Result<Self, SmbiosTableError> {
        let table_length = if table_length > data.len() {
            log::warn!(
                "SMBIOS: announced table length {:#x} exceeds the buffer size {:#x}, clamping",
                table_length,
                data.len()
            );
            data.len()
        } else {
            table_length
        };

        let structure_count = walker::count(&data[..table_length]);
        if structure_count == 0 {
            log::warn!("SMBIOS tables not found");
            return Err(SmbiosTableError::NoStructures);
        }

        log::debug!("SMBIOS: version {} with {} structures in {:#x} bytes", version, structure_count, table_length);
        Ok(Self { data, table_length, version, structure_count })
    }

    /// SMBIOS major version.
    pub fn major_version(&self) -> u8 {
        self.version.major
    }

    /// SMBIOS minor version.
    pub fn minor_version(&self) -> u8 {
        self.version.minor
    }

    /// SMBIOS version as a comparable pair.
    pub fn version(&self) -> SmbiosVersion {
        self.version
    }

    /// Number of structures in the table, the end-of-table structure included.
    pub fn structure_count(&self) -> usize {
        self.structure_count
    }

    /// Length of the structure table region in bytes, after clamping.
    pub fn table_length(&self) -> usize {
        self.table_length
    }

    pub(crate) fn table(&self) -> &[u8] {
        &self.data[..self.table_length]
    }

    /// Iterates over the structures in table order.
    pub fn structures(&self) -> StructureIter<'_> {
        StructureIter::new(self.table())
    }

    /// Returns the first structure of `record_type`.
    pub fn find(&self, record_type: SmbiosType) -> Option<SmbiosStructure<'_>> {
        let table = self.table();
        walker::locate(table, self.structure_count, record_type).and_then(|offset| SmbiosStructure::new(table, offset))
    }

    /// The first BIOS Information structure, if any.
    pub fn bios_info(&self) -> Option<BiosInfo<'_>> {
        self.find(SMBIOS_TYPE_BIOS_INFORMATION).and_then(BiosInfo::new)
    }

    /// The first System Information structure, if any.
    pub fn system_info(&self) -> Option<SystemInfo<'_>> {
        self.find(SMBIOS_TYPE_SYSTEM_INFORMATION).and_then(|structure| SystemInfo::new(structure, self.version))
    }

    /// The first Baseboard Information structure, if any.
    pub fn baseboard_info(&self) -> Option<BaseboardInfo<'_>> {
        self.find(SMBIOS_TYPE_BASEBOARD_INFORMATION).and_then(BaseboardInfo::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        smbios::SMBIOS_TYPE_END_OF_TABLE,
        test_support::{end_of_table, table, StructureBuilder},
    };
    use alloc::vec;
    use zerocopy::IntoBytes;

    fn sample_table() -> Vec<u8> {
        table(&[
            StructureBuilder::new(SMBIOS_TYPE_BIOS_INFORMATION).field(&[0x01, 0x00, 0x00]).string("Vendor").build(),
            StructureBuilder::new(SMBIOS_TYPE_BASEBOARD_INFORMATION).handle(2).field(&[0x01]).string("Board").build(),
            end_of_table(),
        ])
    }

    fn raw_smbios_data(major: u8, minor: u8, table: &[u8]) -> Vec<u8> {
        let header = RawSmbiosDataHeader {
            used_20_calling_method: 0,
            major_version: major,
            minor_version: minor,
            dmi_revision: 0,
            length: (table.len() as u32).into(),
        };
        let mut data = header.as_bytes().to_vec();
        data.extend_from_slice(table);
        data
    }

    #[test]
    fn test_new_counts_structures() {
        let data = sample_table();
        let length = data.len();
        let tables = SmbiosTables::new(data, length, 3, 4).expect("valid table");

        assert_eq!(tables.structure_count(), 3);
        assert_eq!(tables.major_version(), 3);
        assert_eq!(tables.minor_version(), 4);
        assert_eq!(tables.version(), SmbiosVersion::new(3, 4));
        assert_eq!(tables.table_length(), length);
    }

    #[test]
    fn test_new_rejects_empty_buffer() {
        assert_eq!(SmbiosTables::new(Vec::new(), 0, 3, 0).err(), Some(SmbiosTableError::EmptyInput));
        assert_eq!(SmbiosTables::new(Vec::new(), 16, 3, 0).err(), Some(SmbiosTableError::EmptyInput));
    }

    #[test]
    fn test_new_rejects_empty_region() {
        assert_eq!(SmbiosTables::new(sample_table(), 0, 3, 0).err(), Some(SmbiosTableError::NoStructures));
    }

    #[test]
    fn test_region_shorter_than_buffer() {
        // Only the BIOS structure lies inside the announced region.
        let data = sample_table();
        let bios_length = StructureBuilder::new(SMBIOS_TYPE_BIOS_INFORMATION)
            .field(&[0x01, 0x00, 0x00])
            .string("Vendor")
            .build()
            .len();
        let tables = SmbiosTables::new(data, bios_length, 3, 0).expect("valid table");

        assert_eq!(tables.structure_count(), 1);
        assert!(tables.bios_info().is_some());
        assert!(tables.baseboard_info().is_none());
    }

    #[test]
    fn test_region_longer_than_buffer_is_clamped() {
        let data = sample_table();
        let length = data.len();
        let tables = SmbiosTables::new(data, length + 100, 3, 0).expect("valid table");

        assert_eq!(tables.table_length(), length);
        assert_eq!(tables.structure_count(), 3);
        assert!(tables.find(SMBIOS_TYPE_END_OF_TABLE).is_some());
    }

    #[test]
    fn test_lookups() {
        let data = sample_table();
        let length = data.len();
        let tables = SmbiosTables::new(data, length, 3, 0).expect("valid table");

        assert_eq!(tables.bios_info().map(|bios| bios.manufacturer()).as_deref(), Some("Vendor"));
        assert_eq!(tables.baseboard_info().map(|board| board.manufacturer()).as_deref(), Some("Board"));
        assert!(tables.system_info().is_none());
        assert_eq!(tables.find(SMBIOS_TYPE_BASEBOARD_INFORMATION).map(|s| s.handle()), Some(2));

        let handles: Vec<u16> = tables.structures().map(|s| s.handle()).collect();
        assert_eq!(handles, [0, 2, 0xFEFF]);
    }

    #[test]
    fn test_views_borrow_independently() {
        let data = sample_table();
        let length = data.len();
        let tables = SmbiosTables::new(data, length, 3, 0).expect("valid table");

        let bios = tables.bios_info().expect("bios present");
        let board = tables.baseboard_info().expect("baseboard present");
        assert_eq!(bios.manufacturer(), "Vendor");
        assert_eq!(board.manufacturer(), "Board");
    }

    #[test]
    fn test_from_raw_smbios_data() {
        let tables = SmbiosTables::from_raw_smbios_data(raw_smbios_data(2, 7, &sample_table())).expect("valid blob");

        assert_eq!(tables.version(), SmbiosVersion::new(2, 7));
        assert_eq!(tables.structure_count(), 3);
        assert_eq!(tables.table_length(), sample_table().len());
        assert_eq!(tables.structures().next().map(|s| s.offset()), Some(0));
        assert_eq!(tables.bios_info().map(|bios| bios.manufacturer()).as_deref(), Some("Vendor"));
    }

    #[test]
    fn test_from_raw_smbios_data_errors() {
        assert_eq!(SmbiosTables::from_raw_smbios_data(Vec::new()).err(), Some(SmbiosTableError::EmptyInput));
        assert_eq!(
            SmbiosTables::from_raw_smbios_data(vec![0x00, 0x03, 0x04]).err(),
            Some(SmbiosTableError::BufferTooSmall)
        );
        assert_eq!(
            SmbiosTables::from_raw_smbios_data(raw_smbios_data(3, 0, &[])).err(),
            Some(SmbiosTableError::NoStructures)
        );
    }

    #[test]
    fn test_from_raw_smbios_data_clamps_length() {
        let mut data = raw_smbios_data(3, 0, &sample_table());
        data[4..8].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        let tables = SmbiosTables::from_raw_smbios_data(data).expect("valid blob");

        assert_eq!(tables.table_length(), sample_table().len());
        assert_eq!(tables.structure_count(), 3);
    }
}
