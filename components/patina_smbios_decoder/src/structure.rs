//! Field access for a single SMBIOS structure
//!
//! A [`SmbiosStructure`] borrows the table region starting at the structure's header. Fixed-width reads are bounded
//! by the declared formatted area, and string references are resolved through the string list that follows it.
//!
//! Text strings associated with a given SMBIOS structure are appended directly after the formatted portion of the
//! structure. Each string is terminated with a null (00h) byte and the set of strings is terminated with an additional
//! null (00h) byte. When the formatted portion of a structure references a string, it does so by specifying a non-zero
//! string number within the structure's string set. If a string field references no string, a null (0) is placed in
//! that string field.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::string::String;

use zerocopy::FromBytes;

use crate::smbios::{SmbiosHandle, SmbiosStructureHeader, SmbiosType};

/// A located structure inside an SMBIOS table region.
#[derive(Debug, Clone, Copy)]
pub struct SmbiosStructure<'a> {
    header: SmbiosStructureHeader,
    offset: usize,
    data: &'a [u8],
}

impl<'a> SmbiosStructure<'a> {
    /// Reads the structure header at `offset`. Returns `None` if the region cannot hold a full header.
    pub(crate) fn new(table: &'a [u8], offset: usize) -> Option<Self> {
        let data = table.get(offset..)?;
        let (header, _) = SmbiosStructureHeader::read_from_prefix(data).ok()?;
        Some(Self { header, offset, data })
    }

    /// Structure type from the header.
    pub fn record_type(&self) -> SmbiosType {
        self.header.record_type
    }

    /// Declared length of the formatted area, header included.
    pub fn length(&self) -> u8 {
        self.header.length
    }

    /// Structure handle from the header.
    pub fn handle(&self) -> SmbiosHandle {
        self.header.handle.get()
    }

    /// Offset of the structure from the start of the table region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if the declared length is at least `min_length`.
    ///
    /// Fields added by later revisions of the specification only exist when the firmware declared a formatted area
    /// long enough to hold them, so every optional field is gated through this check.
    pub fn has_length(&self, min_length: u8) -> bool {
        self.header.length >= min_length
    }

    /// The formatted area, clipped to the end of the table region.
    pub fn formatted_area(&self) -> &'a [u8] {
        let end = usize::from(self.header.length).min(self.data.len());
        &self.data[..end]
    }

    /// Returns `len` bytes at `offset`, or `None` if they are not entirely inside the formatted area.
    pub fn bytes(&self, offset: u8, len: usize) -> Option<&'a [u8]> {
        let start = usize::from(offset);
        let end = start.checked_add(len)?;
        self.formatted_area().get(start..end)
    }

    /// Byte at `offset`, or `None` outside the formatted area.
    pub fn byte(&self, offset: u8) -> Option<u8> {
        self.bytes(offset, 1).map(|bytes| bytes[0])
    }

    /// Little-endian word at `offset`, or `None` unless all of it is inside the formatted area.
    pub fn word(&self, offset: u8) -> Option<u16> {
        self.bytes(offset, 2)?.try_into().ok().map(u16::from_le_bytes)
    }

    /// Little-endian dword at `offset`, or `None` unless all of it is inside the formatted area.
    pub fn dword(&self, offset: u8) -> Option<u32> {
        self.bytes(offset, 4)?.try_into().ok().map(u32::from_le_bytes)
    }

    /// Little-endian qword at `offset`, or `None` unless all of it is inside the formatted area.
    pub fn qword(&self, offset: u8) -> Option<u64> {
        self.bytes(offset, 8)?.try_into().ok().map(u64::from_le_bytes)
    }

    /// Resolves the string reference stored in the byte at `offset`.
    ///
    /// A reference of 0, a reference past the last string and a string list that runs off the end of the table all
    /// produce an empty string.
    pub fn string(&self, offset: u8) -> String {
        self.byte(offset)
            .and_then(|index| self.string_by_index(index))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }

    /// Returns the raw bytes of the 1-based string `index`, without the terminator.
    pub fn string_by_index(&self, index: u8) -> Option<&'a [u8]> {
        let skip = usize::from(index).checked_sub(1)?;
        self.strings().nth(skip)
    }

    /// Iterates over the strings that follow the formatted area.
    pub fn strings(&self) -> StringIter<'a> {
        StringIter { remaining: self.data.get(usize::from(self.header.length)..).unwrap_or_default() }
    }

    /// Offset, relative to the structure start, of the first byte after the string list terminator.
    ///
    /// The result can point past the end of the table when the terminator is missing.
    pub(crate) fn total_length(&self) -> usize {
        let strings_start = usize::from(self.header.length);
        let mut pos = strings_start;
        while pos + 1 < self.data.len() && (self.data[pos] != 0 || self.data[pos + 1] != 0) {
            pos += 1;
        }
        pos + 2
    }
}

/// Iterator over the null-terminated strings of one structure.
///
/// Stops at the empty string that terminates the list, or when a string is not terminated before the end of the
/// table region.
#[derive(Debug, Clone)]
pub struct StringIter<'a> {
    remaining: &'a [u8],
}

impl<'a> Iterator for StringIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.remaining.iter().position(|&b| b == 0)?;
        if end == 0 {
            self.remaining = &[];
            return None;
        }
        let string = &self.remaining[..end];
        self.remaining = &self.remaining[end + 1..];
        Some(string)
    }
}
