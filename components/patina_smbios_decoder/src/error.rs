//! Error types for SMBIOS table decoding
//!
//! Only table construction can fail. Lookups that find nothing return `None` and fields that are not present decode
//! to empty values, so partially broken firmware tables still yield whatever could be read.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

use r_efi::efi;

/// Errors returned when building an [`SmbiosTables`](crate::SmbiosTables) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmbiosTableError {
    /// The supplied buffer was empty.
    EmptyInput,
    /// The buffer is shorter than the RawSMBIOSData header that should precede the table.
    BufferTooSmall,
    /// Walking the table region did not find a single structure.
    NoStructures,
}

impl fmt::Display for SmbiosTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmbiosTableError::EmptyInput => write!(f, "SMBIOS buffer is empty"),
            SmbiosTableError::BufferTooSmall => write!(f, "SMBIOS buffer is smaller than the RawSMBIOSData header"),
            SmbiosTableError::NoStructures => write!(f, "SMBIOS tables not found"),
        }
    }
}

impl core::error::Error for SmbiosTableError {}

impl From<SmbiosTableError> for efi::Status {
    fn from(error: SmbiosTableError) -> Self {
        match error {
            SmbiosTableError::EmptyInput | SmbiosTableError::BufferTooSmall => efi::Status::INVALID_PARAMETER,
            SmbiosTableError::NoStructures => efi::Status::NOT_FOUND,
        }
    }
}
