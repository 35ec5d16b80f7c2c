//! Builders for synthetic SMBIOS tables used by the unit tests.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
extern crate std;

use std::vec::Vec;

use zerocopy::IntoBytes;

use crate::smbios::{SmbiosHandle, SmbiosStructureHeader, SmbiosType, SMBIOS_TYPE_END_OF_TABLE};

/// Builds the bytes of one structure: header, formatted area and string list.
pub(crate) struct StructureBuilder {
    record_type: SmbiosType,
    handle: SmbiosHandle,
    length: Option<u8>,
    formatted: Vec<u8>,
    strings: Vec<Vec<u8>>,
}

impl StructureBuilder {
    pub(crate) fn new(record_type: SmbiosType) -> Self {
        Self { record_type, handle: 0, length: None, formatted: Vec::new(), strings: Vec::new() }
    }

    pub(crate) fn handle(mut self, handle: SmbiosHandle) -> Self {
        self.handle = handle;
        self
    }

    /// Overrides the declared length, which otherwise covers the header and every field added.
    pub(crate) fn length(mut self, length: u8) -> Self {
        self.length = Some(length);
        self
    }

    pub(crate) fn field(mut self, bytes: &[u8]) -> Self {
        self.formatted.extend_from_slice(bytes);
        self
    }

    pub(crate) fn string(mut self, string: &str) -> Self {
        self.strings.push(string.as_bytes().to_vec());
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let default_length = core::mem::size_of::<SmbiosStructureHeader>() + self.formatted.len();
        let length = self.length.unwrap_or(default_length as u8);
        let header = SmbiosStructureHeader::new(self.record_type, length, self.handle);

        let mut bytes = Vec::new();
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&self.formatted);
        if self.strings.is_empty() {
            bytes.extend_from_slice(&[0, 0]);
        } else {
            for string in &self.strings {
                bytes.extend_from_slice(string);
                bytes.push(0);
            }
            bytes.push(0);
        }
        bytes
    }
}

pub(crate) fn end_of_table() -> Vec<u8> {
    StructureBuilder::new(SMBIOS_TYPE_END_OF_TABLE).handle(0xFEFF).build()
}

/// Concatenates structures into one table region.
pub(crate) fn table(structures: &[Vec<u8>]) -> Vec<u8> {
    structures.concat()
}
