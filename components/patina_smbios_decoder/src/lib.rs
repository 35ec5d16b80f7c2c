//! SMBIOS Table Decoder
//!
//! Read-only decoding of the System Management BIOS structure table that firmware hands to the operating system.
//! The table is walked with bounded slice reads only, so truncated or corrupted firmware data produces empty values
//! and `log` warnings rather than panics.
//!
//! The library is `no_std` and only requires `alloc`. The `std` feature builds the `smbios_dump` tool.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod baseboard;
pub mod bios;
pub mod error;
pub mod feature;
pub mod smbios;
pub mod structure;
pub mod system;
pub mod table;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use baseboard::BaseboardInfo;
pub use bios::BiosInfo;
pub use error::SmbiosTableError;
pub use feature::Feature;
pub use smbios::SmbiosVersion;
pub use structure::SmbiosStructure;
pub use system::SystemInfo;
pub use table::SmbiosTables;
