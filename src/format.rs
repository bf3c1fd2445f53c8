//! Human-readable number formatting for dashboard cards and bars.

/// Suffix tiers, largest first.
const TIERS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

/// Render a count as a short string: `999`, `1K`, `1.5M`, `2.3B`.
///
/// The tier is picked from the raw magnitude, then the quotient is rounded
/// half-up to one decimal and a trailing `.0` dropped. Rounding never
/// promotes to the next tier, so `999_950` is `"1000K"` and
/// `999_999_999` is `"1000M"`.
pub fn format_count(n: u64) -> String {
    for (divisor, suffix) in TIERS {
        if n >= divisor {
            let divisor = u128::from(divisor);
            let tenths = (u128::from(n) * 10 + divisor / 2) / divisor;
            let (whole, frac) = (tenths / 10, tenths % 10);
            return if frac == 0 {
                format!("{}{}", whole, suffix)
            } else {
                format!("{}.{}{}", whole, frac, suffix)
            };
        }
    }
    n.to_string()
}

/// Bar width in whole percent of `max`, truncated. Zero when `max` is zero.
pub fn bar_percent(value: u64, max: u64) -> u8 {
    if max == 0 {
        return 0;
    }
    let pct = u128::from(value) * 100 / u128::from(max);
    pct.min(100) as u8
}
