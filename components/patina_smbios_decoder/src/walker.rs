//! SMBIOS structure table walking
//!
//! Structures are only length-prefixed up to the end of their formatted area; the length of the string list that
//! follows is discovered by scanning for the double-null terminator. The functions in this module find structure
//! boundaries without interpreting structure contents.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{
    smbios::{SmbiosType, SMBIOS_STRUCTURE_HEADER_LENGTH, SMBIOS_TYPE_END_OF_TABLE},
    structure::SmbiosStructure,
};

/// Counts the structures in a table region.
///
/// Every structure is counted, the end-of-table structure included. Declared lengths are not validated here; a
/// trailing byte too short to carry a length field ends the walk without being counted.
pub fn count(table: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;

    while pos < table.len() {
        let Some(&length) = table.get(pos + 1) else {
            log::debug!("SMBIOS: ignoring trailing byte at offset {:#x}", pos);
            break;
        };

        // Skip the formatted area, then the string list and its two null bytes.
        let mut next = pos + usize::from(length);
        while next + 1 < table.len() && (table[next] != 0 || table[next + 1] != 0) {
            next += 1;
        }
        pos = next + 2;
        count += 1;
    }

    count
}

/// Returns the offset of the first structure of `record_type`, or `None`.
///
/// The walk stops at the end-of-table structure, at a structure with a declared length below the header size, or
/// after `expected_count` structures. When nothing is found, disagreements between the walk and `expected_count` or
/// the region length are logged as warnings; they never change the result.
pub fn locate(table: &[u8], expected_count: usize, record_type: SmbiosType) -> Option<usize> {
    let mut structures = StructureIter::new(table);

    while structures.visited() < expected_count {
        let Some(structure) = structures.next() else {
            break;
        };
        if structure.record_type() == record_type {
            return Some(structure.offset());
        }
    }

    if structures.visited() != expected_count {
        log::warn!(
            "SMBIOS: the number of processed structures does not correspond to the total number of structures: {}/{}",
            structures.visited(),
            expected_count
        );
    }

    if structures.position() != table.len() {
        log::warn!(
            "SMBIOS: the announced size does not match the processed size: {}/{}",
            structures.position(),
            table.len()
        );
    }

    None
}

/// Iterator over the structures of a table region.
///
/// Yields structures in table order up to and including the end-of-table structure. A structure whose declared
/// length is shorter than its own header makes the position of the next structure unknowable, so it ends the
/// iteration with a warning.
#[derive(Debug, Clone)]
pub struct StructureIter<'a> {
    table: &'a [u8],
    next_offset: usize,
    visited: usize,
    done: bool,
}

impl<'a> StructureIter<'a> {
    /// Starts a walk at the beginning of `table`.
    pub fn new(table: &'a [u8]) -> Self {
        Self { table, next_offset: 0, visited: 0, done: false }
    }

    /// Number of structures yielded so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Offset at which the next structure is expected.
    pub fn position(&self) -> usize {
        self.next_offset
    }
}

impl<'a> Iterator for StructureIter<'a> {
    type Item = SmbiosStructure<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(structure) = SmbiosStructure::new(self.table, self.next_offset) else {
            self.done = true;
            return None;
        };

        if structure.length() < SMBIOS_STRUCTURE_HEADER_LENGTH {
            log::warn!(
                "SMBIOS: invalid structure length {} at offset {:#x} (type {}), table is broken",
                structure.length(),
                self.next_offset,
                structure.record_type()
            );
            self.done = true;
            return None;
        }

        log::trace!(
            "SMBIOS: type {} handle {:#06x} length {:#x} at offset {:#x}",
            structure.record_type(),
            structure.handle(),
            structure.length(),
            self.next_offset
        );

        self.next_offset += structure.total_length();
        self.visited += 1;
        if structure.record_type() == SMBIOS_TYPE_END_OF_TABLE {
            self.done = true;
        }

        Some(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        smbios::{SMBIOS_TYPE_BASEBOARD_INFORMATION, SMBIOS_TYPE_BIOS_INFORMATION, SMBIOS_TYPE_SYSTEM_INFORMATION},
        test_support::{end_of_table, table, StructureBuilder},
    };
    extern crate std;
    use std::vec::Vec;

    fn sample_table() -> Vec<u8> {
        table(&[
            StructureBuilder::new(SMBIOS_TYPE_BIOS_INFORMATION).field(&[0x01]).string("Vendor").build(),
            StructureBuilder::new(SMBIOS_TYPE_SYSTEM_INFORMATION).handle(1).field(&[0x00, 0x00]).build(),
            StructureBuilder::new(0x88).handle(2).string("a").string("b").build(),
            end_of_table(),
        ])
    }

    #[test]
    fn test_count_well_formed() {
        assert_eq!(count(&sample_table()), 4);
        assert_eq!(count(&end_of_table()), 1);
        assert_eq!(count(&[]), 0);
    }

    #[test]
    fn test_count_many_structures() {
        let mut structures: Vec<Vec<u8>> =
            (0..50u16).map(|i| StructureBuilder::new(0x80).handle(i).field(&[i as u8]).string("x").build()).collect();
        structures.push(end_of_table());
        assert_eq!(count(&table(&structures)), 51);
    }

    #[test]
    fn test_count_ignores_trailing_byte() {
        let mut bytes = sample_table();
        bytes.push(0x01);
        assert_eq!(count(&bytes), 4);
    }

    #[test]
    fn test_count_missing_terminator_stops_at_region_end() {
        let mut bytes = StructureBuilder::new(0x80).field(&[0x01]).build();
        bytes.truncate(5);
        bytes.extend_from_slice(b"unterminated");
        assert_eq!(count(&bytes), 1);
    }

    #[test]
    fn test_locate_each_type() {
        let bytes = sample_table();
        let total = count(&bytes);

        assert_eq!(locate(&bytes, total, SMBIOS_TYPE_BIOS_INFORMATION), Some(0));
        // Type 0: 5 byte formatted area, "Vendor\0", final null.
        assert_eq!(locate(&bytes, total, SMBIOS_TYPE_SYSTEM_INFORMATION), Some(13));
        // Type 1: 6 byte formatted area and an empty string list.
        assert_eq!(locate(&bytes, total, 0x88), Some(21));
        assert_eq!(locate(&bytes, total, SMBIOS_TYPE_END_OF_TABLE), Some(bytes.len() - 6));
    }

    #[test]
    fn test_locate_missing_type() {
        let bytes = sample_table();
        assert_eq!(locate(&bytes, count(&bytes), SMBIOS_TYPE_BASEBOARD_INFORMATION), None);
    }

    #[test]
    fn test_locate_first_match_wins() {
        let bytes = table(&[
            StructureBuilder::new(0x90).handle(7).build(),
            StructureBuilder::new(0x90).handle(8).build(),
            end_of_table(),
        ]);
        let offset = locate(&bytes, count(&bytes), 0x90).expect("structure present");
        let structure = SmbiosStructure::new(&bytes, offset).expect("header fits");
        assert_eq!(structure.handle(), 7);
    }

    #[test]
    fn test_locate_stops_at_end_of_table() {
        let bytes = table(&[
            StructureBuilder::new(SMBIOS_TYPE_BIOS_INFORMATION).build(),
            end_of_table(),
            StructureBuilder::new(SMBIOS_TYPE_SYSTEM_INFORMATION).build(),
        ]);
        let total = count(&bytes);
        assert_eq!(total, 3);
        assert_eq!(locate(&bytes, total, SMBIOS_TYPE_SYSTEM_INFORMATION), None);
    }

    #[test]
    fn test_locate_stops_at_malformed_length() {
        let bytes = table(&[
            StructureBuilder::new(SMBIOS_TYPE_BIOS_INFORMATION).build(),
            StructureBuilder::new(0x80).length(3).build(),
            StructureBuilder::new(SMBIOS_TYPE_SYSTEM_INFORMATION).build(),
            end_of_table(),
        ]);
        let total = count(&bytes);

        assert_eq!(locate(&bytes, total, SMBIOS_TYPE_BIOS_INFORMATION), Some(0));
        assert_eq!(locate(&bytes, total, SMBIOS_TYPE_SYSTEM_INFORMATION), None);
        assert_eq!(locate(&bytes, total, SMBIOS_TYPE_END_OF_TABLE), None);
    }

    #[test]
    fn test_locate_respects_expected_count() {
        let bytes = sample_table();
        assert_eq!(locate(&bytes, 1, SMBIOS_TYPE_SYSTEM_INFORMATION), None);
        assert_eq!(locate(&bytes, 0, SMBIOS_TYPE_BIOS_INFORMATION), None);
    }

    #[test]
    fn test_locate_truncated_header() {
        let bytes = [SMBIOS_TYPE_BIOS_INFORMATION, 0x04, 0x00];
        assert_eq!(locate(&bytes, count(&bytes), SMBIOS_TYPE_BIOS_INFORMATION), None);
    }

    #[test]
    fn test_iterator_yields_end_of_table_last() {
        let bytes = sample_table();
        let types: Vec<SmbiosType> = StructureIter::new(&bytes).map(|s| s.record_type()).collect();
        assert_eq!(
            types,
            [SMBIOS_TYPE_BIOS_INFORMATION, SMBIOS_TYPE_SYSTEM_INFORMATION, 0x88, SMBIOS_TYPE_END_OF_TABLE]
        );

        let mut structures = StructureIter::new(&bytes);
        structures.by_ref().for_each(drop);
        assert_eq!(structures.visited(), 4);
        assert_eq!(structures.position(), bytes.len());
    }

    #[test]
    fn test_iterator_stops_at_malformed_length() {
        let bytes = table(&[
            StructureBuilder::new(0x80).handle(1).build(),
            StructureBuilder::new(0x81).length(2).build(),
            end_of_table(),
        ]);
        let mut structures = StructureIter::new(&bytes);

        assert_eq!(structures.next().map(|s| s.handle()), Some(1));
        assert!(structures.next().is_none());
        assert!(structures.next().is_none());
        assert_eq!(structures.visited(), 1);
        assert_eq!(structures.position(), 6);
    }
}
