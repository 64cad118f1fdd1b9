// Human-readable byte sizes (largest fitting binary unit, one decimal)

use std::fmt;

use crate::error::{MonitorError, Result};

pub const K: i64 = 1024;
pub const M: i64 = K * K;
pub const G: i64 = M * K;
pub const T: i64 = G * K;

/// Binary size units, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    B,
    KB,
    MB,
    GB,
    TB,
}

impl Unit {
    /// Checked in this order so the first fitting divisor is the largest one.
    const DESCENDING: [Unit; 5] = [Unit::TB, Unit::GB, Unit::MB, Unit::KB, Unit::B];

    pub fn divisor(self) -> i64 {
        match self {
            Unit::B => 1,
            Unit::KB => K,
            Unit::MB => M,
            Unit::GB => G,
            Unit::TB => T,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::B => "B",
            Unit::KB => "KB",
            Unit::MB => "MB",
            Unit::GB => "GB",
            Unit::TB => "TB",
        }
    }

    /// Largest unit whose divisor fits in `bytes`. `None` for counts below 1.
    pub fn select(bytes: i64) -> Option<Unit> {
        if bytes < 1 {
            return None;
        }
        Self::DESCENDING
            .into_iter()
            .find(|unit| bytes >= unit.divisor())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Format a byte count, e.g. `1536` -> `"1.5 KB"`, `512` -> `"512 B"`.
///
/// Rounds half-up to one decimal and drops a zero fraction. The integer part
/// is grouped with `,` every three digits.
pub fn format_bytes(bytes: i64) -> Result<String> {
    let unit = Unit::select(bytes).ok_or(MonitorError::InvalidArgument(bytes))?;
    let divisor = unit.divisor() as u128;
    // Tenths of a unit, rounded half-up in integer arithmetic.
    let tenths = (bytes as u128 * 10 + divisor / 2) / divisor;
    let whole = group_thousands(tenths / 10);
    let out = match tenths % 10 {
        0 => format!("{} {}", whole, unit),
        frac => format!("{}.{} {}", whole, frac, unit),
    };
    Ok(out)
}

/// Same as [`format_bytes`] for unsigned counters; values above `i64::MAX` saturate.
pub fn format_u64(bytes: u64) -> Result<String> {
    format_bytes(i64::try_from(bytes).unwrap_or(i64::MAX))
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
