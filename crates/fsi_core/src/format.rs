/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Human-facing speaker counts.

/// Short magnitude string: `1.2B`, `280M`, `6K`, `900`.
pub fn format_speakers(count: u64) -> String {
    let n = count as f64;
    if n >= 1e9 {
        format!("{:.1}B", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.0}M", n / 1e6)
    } else if n >= 1e3 {
        format!("{:.0}K", n / 1e3)
    } else {
        count.to_string()
    }
}

/// Global rank bucket for a total speaker count.
///
/// Both the 1.3B and 1.1B breakpoints resolve to rank 1, so rank 2 is
/// never produced.
pub fn global_rank(speakers: u64) -> u8 {
    match speakers {
        s if s >= 1_300_000_000 => 1,
        s if s >= 1_100_000_000 => 1,
        s if s >= 500_000_000 => 3,
        s if s >= 300_000_000 => 4,
        s if s >= 200_000_000 => 5,
        s if s >= 100_000_000 => 6,
        s if s >= 50_000_000 => 7,
        s if s >= 10_000_000 => 8,
        _ => 9,
    }
}
