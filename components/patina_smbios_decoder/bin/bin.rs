//! Executable for dumping SMBIOS tables.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

use clap::Parser;
use patina_smbios_decoder::{smbios::type_name, Feature, SmbiosTables};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

/// Without `--major`/`--minor` the input is a RawSMBIOSData blob, otherwise a bare structure table such as
/// /sys/firmware/dmi/tables/DMI.
#[derive(Parser, Debug)]
struct Args {
    input_path: PathBuf,
    #[arg(short, long)]
    output_path: Option<PathBuf>,
    #[arg(long, requires = "minor")]
    major: Option<u8>,
    #[arg(long, requires = "major")]
    minor: Option<u8>,
    #[arg(short, long, default_value_t = false)]
    all: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut file = File::open(Path::new(&args.input_path))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let tables = match (args.major, args.minor) {
        (Some(major), Some(minor)) => {
            let length = buffer.len();
            SmbiosTables::new(buffer, length, major, minor)
        }
        _ => SmbiosTables::from_raw_smbios_data(buffer),
    }
    .map_err(|e| {
        eprintln!("Error reading SMBIOS tables: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;

    // Write to standard if no output file is specified.
    match args.output_path {
        Some(path) => {
            let mut out = File::create(path)?;
            dump_tables(&tables, args.all, &mut out)?;
        }
        None => dump_tables(&tables, args.all, &mut io::stdout())?,
    };

    Ok(())
}

fn dump_tables<W: Write>(tables: &SmbiosTables, all: bool, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "SMBIOS {} ({} structures, {} bytes)",
        tables.version(),
        tables.structure_count(),
        tables.table_length()
    )?;

    if let Some(bios) = tables.bios_info() {
        writeln!(out, "\nBIOS Information")?;
        writeln!(out, "  Vendor: {}", bios.manufacturer())?;
        writeln!(out, "  Version: {}", bios.version())?;
        writeln!(out, "  Release Date: {}", bios.release_date())?;
        writeln!(out, "  Address: {}", bios.address())?;
        writeln!(out, "  Runtime Size: {} bytes", bios.runtime_size())?;
        match bios.extended_rom_size() {
            0 => writeln!(out, "  ROM Size: {} kB", bios.rom_size())?,
            size => writeln!(out, "  ROM Size: {} kB", size)?,
        }
        writeln!(out, "  BIOS Revision: {}", bios.bios_revision())?;
        writeln!(out, "  Firmware Revision: {}", bios.firmware_revision())?;
        write_features(out, "Characteristics", &bios.characteristics())?;
    }

    if let Some(system) = tables.system_info() {
        writeln!(out, "\nSystem Information")?;
        writeln!(out, "  Manufacturer: {}", system.manufacturer())?;
        writeln!(out, "  Product Name: {}", system.product_name())?;
        writeln!(out, "  Version: {}", system.version())?;
        writeln!(out, "  Serial Number: {}", system.serial_number())?;
        writeln!(out, "  UUID: {}", system.uuid())?;
        writeln!(out, "  Wake-up Type: {}", system.wakeup_type())?;
        writeln!(out, "  SKU Number: {}", system.sku_number())?;
        writeln!(out, "  Family: {}", system.family())?;
    }

    if let Some(board) = tables.baseboard_info() {
        writeln!(out, "\nBase Board Information")?;
        writeln!(out, "  Manufacturer: {}", board.manufacturer())?;
        writeln!(out, "  Product Name: {}", board.product_name())?;
        writeln!(out, "  Version: {}", board.version())?;
        writeln!(out, "  Serial Number: {}", board.serial_number())?;
        writeln!(out, "  Asset Tag: {}", board.asset_tag())?;
        writeln!(out, "  Location In Chassis: {}", board.location_in_chassis())?;
        if let Some(handle) = board.chassis_handle() {
            writeln!(out, "  Chassis Handle: {:#06X}", handle)?;
        }
        writeln!(out, "  Type: {}", board.board_type())?;
        write_features(out, "Features", &board.features())?;
    }

    if all {
        writeln!(out, "\nStructures")?;
        for structure in tables.structures() {
            writeln!(
                out,
                "  Handle {:#06X}, DMI type {} ({}), {} bytes",
                structure.handle(),
                structure.record_type(),
                type_name(structure.record_type()),
                structure.length()
            )?;
            for (index, string) in structure.strings().enumerate() {
                writeln!(out, "    String {}: {}", index + 1, String::from_utf8_lossy(string))?;
            }
        }
    }

    Ok(())
}

fn write_features<W: Write>(out: &mut W, title: &str, features: &[Feature]) -> io::Result<()> {
    if features.is_empty() {
        return Ok(());
    }
    writeln!(out, "  {}:", title)?;
    for feature in features.iter().filter(|feature| feature.supported) {
        writeln!(out, "    {}", feature.label)?;
    }
    Ok(())
}
