//! `log` backend for tests.
//!
//! Records are printed to stdout so `cargo test -- --nocapture` shows decoder diagnostics. [`capture`] collects the
//! records emitted by the current thread instead, so a test can assert that a warning was raised.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use std::{
    cell::RefCell,
    io::{self, Write},
};

use log::Log;

thread_local! {
    static CAPTURED: RefCell<Option<Vec<CapturedRecord>>> = const { RefCell::new(None) };
}

#[ctor::ctor]
fn setup_test_logger() {
    init();
}

/// Installs the test logger at `Trace` level. Later calls and calls after another logger was installed do nothing.
pub fn init() {
    if log::set_logger(&TestLogger).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

/// One record seen while capturing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

/// Runs `f` and returns its result along with every record it logged on this thread.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedRecord>) {
    init();
    let previous = CAPTURED.with(|captured| captured.replace(Some(Vec::new())));
    let result = f();
    let records = CAPTURED.with(|captured| captured.replace(previous)).unwrap_or_default();
    (result, records)
}

pub struct TestLogger;

impl Log for TestLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let captured = CAPTURED.with(|captured| match captured.borrow_mut().as_mut() {
            Some(records) => {
                records.push(CapturedRecord {
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                });
                true
            }
            None => false,
        });

        if !captured {
            _ = io::stdout().write_fmt(format_args!("{}\n", record.args()))
        }
    }

    fn flush(&self) {
        _ = io::stdout().flush()
    }
}
