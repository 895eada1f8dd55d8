//! Conversion between integer base units and the divisible coin view.
//!
//! Coin values are rendered from integer arithmetic so large balances do not
//! pick up float noise; only `to_coin_value` hands out an `f64`.

use lc_api_types::NodeConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConsoleError, ConsoleResult};

const COIN_DECIMALS: usize = 8;
const COIN_SCALE: u128 = 100_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Coin,
    Unit,
}

impl DisplayMode {
    pub fn other(self) -> Self {
        match self {
            DisplayMode::Coin => DisplayMode::Unit,
            DisplayMode::Unit => DisplayMode::Coin,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Coin => "coin",
            DisplayMode::Unit => "unit",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coin" => Ok(DisplayMode::Coin),
            "unit" => Ok(DisplayMode::Unit),
            other => Err(ConsoleError::validation(format!("unknown display mode: {other}"))),
        }
    }
}

/// Renders amounts for one configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormatter {
    coin_name: String,
    unit_name: String,
    units_per_coin: u64,
    mode: DisplayMode,
}

impl AmountFormatter {
    pub fn new(config: &NodeConfig, mode: DisplayMode) -> Self {
        Self {
            coin_name: config.coin_name.clone(),
            unit_name: config.unit_name.clone(),
            units_per_coin: config.units_per_coin,
            mode,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn label(&self, mode: DisplayMode) -> &str {
        match mode {
            DisplayMode::Coin => &self.coin_name,
            DisplayMode::Unit => &self.unit_name,
        }
    }

    // A rate of 0 or 1 means units are the only representation.
    fn divisible(&self) -> bool {
        self.units_per_coin > 1
    }

    pub fn to_coin_value(&self, units: u64) -> f64 {
        if self.divisible() {
            units as f64 / self.units_per_coin as f64
        } else {
            units as f64
        }
    }

    pub fn format_coin(&self, units: u64) -> String {
        let scaled = if self.divisible() {
            let rate = u128::from(self.units_per_coin);
            (u128::from(units) * COIN_SCALE + rate / 2) / rate
        } else {
            u128::from(units) * COIN_SCALE
        };
        let whole = scaled / COIN_SCALE;
        let fraction = scaled % COIN_SCALE;

        let value = if fraction == 0 {
            whole.to_string()
        } else {
            let digits = format!("{fraction:0width$}", width = COIN_DECIMALS);
            format!("{whole}.{}", digits.trim_end_matches('0'))
        };
        format!("{value} {}", self.coin_name)
    }

    pub fn format_unit(&self, units: u64) -> String {
        format!("{} {}", group_thousands(units), self.unit_name)
    }

    pub fn format_in(&self, mode: DisplayMode, units: u64) -> String {
        match mode {
            DisplayMode::Coin => self.format_coin(units),
            DisplayMode::Unit => self.format_unit(units),
        }
    }

    pub fn format_primary(&self, units: u64) -> String {
        self.format_in(self.mode, units)
    }

    pub fn format_secondary(&self, units: u64) -> String {
        self.format_in(self.mode.other(), units)
    }

    pub fn format_with_secondary(&self, units: u64) -> String {
        format!("{} ({})", self.format_primary(units), self.format_secondary(units))
    }

    /// Map a number typed in the current display mode back to base units,
    /// rounded to the nearest unit. Only fit for previews; submissions go
    /// through [`AmountFormatter::parse_input`]. Negative and non-finite
    /// input maps to zero.
    pub fn input_to_units(&self, raw: f64) -> u64 {
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        let units = match self.mode {
            DisplayMode::Coin if self.divisible() => raw * self.units_per_coin as f64,
            _ => raw,
        };
        units.round() as u64
    }

    /// Lenient variant for live previews: anything unparsable is zero.
    pub fn preview_units(&self, raw: &str) -> u64 {
        self.input_to_units(raw.trim().parse().unwrap_or(0.0))
    }

    /// Strict variant for submissions. The decimal is converted exactly;
    /// anything that lands between two base units is refused, never rounded.
    pub fn parse_input(&self, raw: &str) -> ConsoleResult<u64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConsoleError::validation("amount is required"));
        }
        if raw.starts_with('-') {
            return Err(ConsoleError::validation("amount must be positive"));
        }
        let rate = match self.mode {
            DisplayMode::Coin if self.divisible() => self.units_per_coin,
            _ => 1,
        };
        match decimal_to_units(raw, rate) {
            Ok(0) => Err(ConsoleError::validation("amount must be positive")),
            Ok(units) => Ok(units),
            Err(DecimalError::Fractional) => Err(ConsoleError::validation(format!(
                "amount must be a whole number of {}",
                self.unit_name
            ))),
            Err(DecimalError::Overflow) => Err(ConsoleError::validation(format!("amount is too large: {raw}"))),
            Err(DecimalError::Malformed) => Err(ConsoleError::validation(format!("invalid amount: {raw}"))),
        }
    }

    pub fn amount_label(&self) -> String {
        format!("Amount ({})", self.label(self.mode))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecimalError {
    Malformed,
    Fractional,
    Overflow,
}

/// Exact `text * rate` for a plain unsigned decimal such as `12`, `0.125`
/// or `.5`.
fn decimal_to_units(text: &str, rate: u64) -> Result<u64, DecimalError> {
    let text = text.strip_prefix('+').unwrap_or(text);
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(DecimalError::Malformed);
    }

    let rate = u128::from(rate);
    let whole = whole.trim_start_matches('0');
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|value| value.checked_mul(rate))
            .ok_or(DecimalError::Overflow)?
    };

    let fraction = fraction.trim_end_matches('0');
    let fraction_units = if fraction.is_empty() {
        0
    } else {
        // 10^38 is the largest power of ten a u128 holds.
        let places = u32::try_from(fraction.len()).map_err(|_| DecimalError::Fractional)?;
        if places > 38 {
            return Err(DecimalError::Fractional);
        }
        let numerator = fraction.parse::<u128>().map_err(|_| DecimalError::Malformed)?;
        let denominator = 10_u128.pow(places);
        // numerator * rate / denominator is whole iff the part of the
        // denominator not shared with the rate divides the numerator.
        let shared = gcd(rate, denominator);
        let remaining = denominator / shared;
        if numerator % remaining != 0 {
            return Err(DecimalError::Fractional);
        }
        (numerator / remaining)
            .checked_mul(rate / shared)
            .ok_or(DecimalError::Overflow)?
    };

    whole_units
        .checked_add(fraction_units)
        .and_then(|units| u64::try_from(units).ok())
        .ok_or(DecimalError::Overflow)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(units_per_coin: u64, mode: DisplayMode) -> AmountFormatter {
        let config = NodeConfig {
            coin_name: "PYTH".to_owned(),
            unit_name: "pipu".to_owned(),
            units_per_coin,
            ..NodeConfig::default()
        };
        AmountFormatter::new(&config, mode)
    }

    #[test]
    fn coin_mode_primary_and_secondary() {
        let fmt = formatter(100, DisplayMode::Coin);
        assert_eq!(fmt.format_primary(250), "2.5 PYTH");
        assert_eq!(fmt.format_secondary(250), "250 pipu");
        assert_eq!(fmt.format_with_secondary(250), "2.5 PYTH (250 pipu)");
        assert_eq!(fmt.input_to_units(2.5), 250);
    }

    #[test]
    fn unit_mode_swaps_roles() {
        let fmt = formatter(100, DisplayMode::Unit);
        assert_eq!(fmt.format_primary(1_234_567), "1,234,567 pipu");
        assert_eq!(fmt.format_secondary(1_234_567), "12345.67 PYTH");
        assert_eq!(fmt.input_to_units(250.0), 250);
        assert_eq!(fmt.amount_label(), "Amount (pipu)");
    }

    #[test]
    fn degenerate_rate_keeps_units() {
        for rate in [0, 1] {
            let fmt = formatter(rate, DisplayMode::Coin);
            for units in [0_u64, 1, 999, 1_000_000, 9_007_199_254_740_992] {
                assert_eq!(fmt.to_coin_value(units), units as f64);
                assert_eq!(fmt.input_to_units(units as f64), units);
            }
            assert_eq!(fmt.format_coin(1_000), "1000 PYTH");
        }
    }

    #[test]
    fn coin_formatting_strips_trailing_zeros() {
        let fmt = formatter(100_000_000, DisplayMode::Coin);
        assert_eq!(fmt.format_coin(0), "0 PYTH");
        assert_eq!(fmt.format_coin(1_200_000_000), "12 PYTH");
        assert_eq!(fmt.format_coin(1), "0.00000001 PYTH");
        assert_eq!(fmt.format_coin(10_000), "0.0001 PYTH");
        assert_eq!(fmt.format_coin(u64::MAX), "184467440737.09551615 PYTH");
    }

    #[test]
    fn coin_formatting_rounds_at_eight_digits() {
        let fmt = formatter(3, DisplayMode::Coin);
        assert_eq!(fmt.format_coin(1), "0.33333333 PYTH");
        assert_eq!(fmt.format_coin(2), "0.66666667 PYTH");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn coin_value_round_trips_through_input() {
        for rate in [1_u64, 100, 1_000, 100_000_000] {
            let fmt = formatter(rate, DisplayMode::Coin);
            for units in [0_u64, 1, 29, 250, 12_345, 1_200_000_000, 987_654_321_012] {
                assert_eq!(fmt.input_to_units(fmt.to_coin_value(units)), units, "rate {rate} units {units}");
            }
        }
    }

    #[test]
    fn parse_input_validates() {
        let fmt = formatter(100, DisplayMode::Coin);
        assert_eq!(fmt.parse_input(" 0.29 "), Ok(29));
        assert!(matches!(fmt.parse_input(""), Err(ConsoleError::Validation(_))));
        assert!(matches!(fmt.parse_input("abc"), Err(ConsoleError::Validation(_))));
        assert!(matches!(fmt.parse_input("-1"), Err(ConsoleError::Validation(_))));
        assert!(matches!(fmt.parse_input("0"), Err(ConsoleError::Validation(_))));
        assert_eq!(fmt.preview_units("nonsense"), 0);
    }

    #[test]
    fn unit_mode_input_must_be_whole_units() {
        let fmt = formatter(100, DisplayMode::Unit);
        assert_eq!(fmt.parse_input("250"), Ok(250));
        assert_eq!(fmt.parse_input("250.000"), Ok(250));
        assert_eq!(
            fmt.parse_input("1.6"),
            Err(ConsoleError::Validation("amount must be a whole number of pipu".to_owned()))
        );
        assert_eq!(
            fmt.parse_input("0.4"),
            Err(ConsoleError::Validation("amount must be a whole number of pipu".to_owned()))
        );
    }

    #[test]
    fn coin_mode_input_is_converted_exactly() {
        let fmt = formatter(100, DisplayMode::Coin);
        assert_eq!(fmt.parse_input("2.5"), Ok(250));
        assert_eq!(fmt.parse_input(".01"), Ok(1));
        assert_eq!(fmt.parse_input("+3"), Ok(300));
        assert!(matches!(
            fmt.parse_input("0.125"),
            Err(ConsoleError::Validation(message)) if message.contains("whole number")
        ));
        assert!(matches!(
            fmt.parse_input("1e2"),
            Err(ConsoleError::Validation(message)) if message.starts_with("invalid amount")
        ));
        assert!(matches!(fmt.parse_input("."), Err(ConsoleError::Validation(_))));

        let fine = formatter(100_000_000, DisplayMode::Coin);
        assert_eq!(fine.parse_input("0.00000001"), Ok(1));
        assert_eq!(fine.parse_input("12345.6789"), Ok(1_234_567_890_000));
        assert!(matches!(fine.parse_input("0.000000001"), Err(ConsoleError::Validation(_))));
        assert!(matches!(
            fine.parse_input("999999999999"),
            Err(ConsoleError::Validation(message)) if message.contains("too large")
        ));
    }

    #[test]
    fn rates_sharing_few_factors_with_ten_still_convert() {
        let fmt = formatter(3, DisplayMode::Coin);
        assert_eq!(fmt.parse_input("2"), Ok(6));
        assert!(matches!(fmt.parse_input("0.5"), Err(ConsoleError::Validation(_))));

        let fmt = formatter(8, DisplayMode::Coin);
        assert_eq!(fmt.parse_input("0.125"), Ok(1));
        assert_eq!(fmt.parse_input("1.25"), Ok(10));
    }

    #[test]
    fn display_mode_parses() {
        assert_eq!("Unit".parse::<DisplayMode>(), Ok(DisplayMode::Unit));
        assert_eq!(" coin ".parse::<DisplayMode>(), Ok(DisplayMode::Coin));
        assert!("sat".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn display_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DisplayMode::Unit).unwrap(), r#""unit""#);
        assert_eq!(serde_json::from_str::<DisplayMode>(r#""coin""#).unwrap(), DisplayMode::Coin);
    }
}
