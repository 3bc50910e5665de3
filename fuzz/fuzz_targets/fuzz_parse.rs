// SPDX-License-Identifier: GPL-2.0-or-later
#![no_main]

use clippings_core::{ClippingsParser, ExportFormat, ParseConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(outcome) = ClippingsParser::new().parse_reader(data, &ParseConfig::default()) else {
        return;
    };
    for (title, record) in outcome.log.iter() {
        for format in ExportFormat::ALL {
            let _ = format.exporter().render(title, record);
        }
    }
});
