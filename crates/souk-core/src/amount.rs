// crates/souk-core/src/amount.rs
//
// Integral amounts and display-unit conversion.
//
// All internal accounting uses base units (the smallest indivisible
// denomination of a currency or token) to avoid floating-point precision
// issues in settlement arithmetic. A ledger's `decimals` metadata maps
// base units to display units: 1 display unit = 10^decimals base units.

use crate::error::SoukError;

/// An amount in base units.
pub type Units = u128;

/// Largest `decimals` value whose scale factor fits in `Units`.
pub const MAX_DECIMALS: u8 = 38;

/// Number of base units in one display unit for the given `decimals`.
/// `decimals` must not exceed [`MAX_DECIMALS`].
///
/// # Example
/// ```
/// use souk_core::amount::scale_factor;
/// assert_eq!(scale_factor(18), 1_000_000_000_000_000_000);
/// ```
pub fn scale_factor(decimals: u8) -> Units {
    10u128.pow(decimals as u32)
}

/// Format a base-unit amount as a display-unit decimal string,
/// trimming trailing zeros from the fractional part.
pub fn format_units(units: Units, decimals: u8) -> String {
    let factor = scale_factor(decimals);
    let whole = units / factor;
    let frac = units % factor;
    if frac == 0 {
        format!("{}", whole)
    } else {
        let frac_str = format!("{:0width$}", frac, width = decimals as usize);
        let trimmed = frac_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}

/// Parse a display-unit decimal string (e.g. "0.1") into base units.
///
/// No floating point is involved; the fractional part may not exceed
/// `decimals` digits.
pub fn parse_units(s: &str, decimals: u8) -> Result<Units, SoukError> {
    let (whole_str, frac_str) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(SoukError::Parse(format!("empty amount {:?}", s)));
    }
    if frac_str.len() > decimals as usize {
        return Err(SoukError::Parse(format!(
            "amount {:?} has more than {} fractional digits",
            s, decimals
        )));
    }

    let whole: Units = if whole_str.is_empty() {
        0
    } else {
        whole_str
            .parse()
            .map_err(|e| SoukError::Parse(format!("invalid amount {:?}: {}", s, e)))?
    };
    let frac: Units = if frac_str.is_empty() {
        0
    } else {
        frac_str
            .parse()
            .map_err(|e| SoukError::Parse(format!("invalid amount {:?}: {}", s, e)))?
    };

    // Scale the fractional digits up to a full `decimals`-wide fraction.
    let frac_scale = scale_factor(decimals - frac_str.len() as u8);
    whole
        .checked_mul(scale_factor(decimals))
        .and_then(|w| w.checked_add(frac * frac_scale))
        .ok_or(SoukError::Overflow)
}
