#![no_main]
use libfuzzer_sys::fuzz_target;
extern crate ntp_sunset;

use chrono::TimeZone;
use chrono::Utc;

use ntp_sunset::timezone::PosixTz;

fuzz_target!(|input: &[u8]| {
    if let Ok(i) = std::str::from_utf8(input) {
        if let Ok(tz) = PosixTz::parse(i) {
            let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

            let _ = tz.to_local(now);
        }
    }
});
