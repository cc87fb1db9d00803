//! Place-value and operand helpers shared by the digit-oriented methods.

use crate::method::Validation;

/// Largest integer whose neighbours are all exactly representable in `f64`.
pub(crate) const MAX_EXACT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Decimal digits of `n`, least significant first. `0` yields `[0]`.
pub(crate) fn digits(mut n: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        out.push((n % 10) as u8);
        n /= 10;
        if n == 0 {
            return out;
        }
    }
}

/// Reassembles least-significant-first digits into a number.
pub(crate) fn from_digits(digits: &[u8]) -> u64 {
    digits
        .iter()
        .rev()
        .fold(0u64, |acc, &d| acc * 10 + u64::from(d))
}

/// Number of decimal digits in `n` (at least one).
pub(crate) fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

/// Name of the place-value column at `index` (0 = ones).
pub(crate) fn place_name(index: usize) -> String {
    const NAMES: [&str; 10] = [
        "ones",
        "tens",
        "hundreds",
        "thousands",
        "ten-thousands",
        "hundred-thousands",
        "millions",
        "ten-millions",
        "hundred-millions",
        "billions",
    ];
    NAMES
        .get(index)
        .map_or_else(|| format!("10^{index}"), |name| (*name).to_string())
}

/// Capitalized form of [`place_name`], for step titles.
pub(crate) fn place_title(index: usize) -> String {
    let name = place_name(index);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

/// Expanded form, e.g. `247 = 200 + 40 + 7`. Zero columns are skipped.
pub(crate) fn expanded(n: u64) -> String {
    let parts: Vec<String> = digits(n)
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, &d)| d != 0)
        .map(|(i, &d)| (u64::from(d) * 10u64.pow(i as u32)).to_string())
        .collect();
    if parts.len() <= 1 {
        n.to_string()
    } else {
        format!("{n} = {}", parts.join(" + "))
    }
}

/// Binary representation of `n`, zero-padded to `width` bits.
pub(crate) fn binary(n: u64, width: u32) -> String {
    format!("{n:0width$b}", width = width as usize)
}

/// Number of significant bits in `n` (at least one).
pub(crate) fn bit_length(n: u64) -> u32 {
    (u64::BITS - n.leading_zeros()).max(1)
}

/// `x` as a non-negative integer no larger than `max`.
pub(crate) fn whole(x: f64, max: f64) -> Option<u64> {
    (x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x <= max).then_some(x as u64)
}

/// Rejects operands that are not whole numbers in `0..=max`.
pub(crate) fn require_whole(label: &str, x: f64, max: f64) -> Validation {
    if !x.is_finite() {
        Validation::reject(format!("{label} must be a finite number"))
    } else if x < 0.0 {
        Validation::reject(format!("{label} must not be negative"))
    } else if x.fract() != 0.0 {
        Validation::reject(format!("{label} must be a whole number"))
    } else if x > max {
        Validation::reject(format!("{label} must be at most {max}"))
    } else {
        Validation::ok()
    }
}

/// Rejects non-finite operands.
pub(crate) fn require_finite(label: &str, x: f64) -> Validation {
    if x.is_finite() {
        Validation::ok()
    } else {
        Validation::reject(format!("{label} must be a finite number"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_least_significant_first() {
        assert_eq!(digits(0), vec![0]);
        assert_eq!(digits(247), vec![7, 4, 2]);
        assert_eq!(digits(1000), vec![0, 0, 0, 1]);
        assert_eq!(from_digits(&digits(90_210)), 90_210);
    }

    #[test]
    fn digit_and_bit_counts() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(999_999), 6);
        assert_eq!(bit_length(0), 1);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(8), 4);
    }

    #[test]
    fn place_names() {
        assert_eq!(place_name(0), "ones");
        assert_eq!(place_title(2), "Hundreds");
        assert_eq!(place_name(12), "10^12");
    }

    #[test]
    fn expanded_form_skips_zero_columns() {
        assert_eq!(expanded(247), "247 = 200 + 40 + 7");
        assert_eq!(expanded(1005), "1005 = 1000 + 5");
        assert_eq!(expanded(300), "300");
        assert_eq!(expanded(0), "0");
    }

    #[test]
    fn binary_is_padded() {
        assert_eq!(binary(5, 8), "00000101");
        assert_eq!(binary(0, 4), "0000");
    }

    #[test]
    fn whole_rejects_fractions_and_negatives() {
        assert_eq!(whole(12.0, MAX_EXACT), Some(12));
        assert_eq!(whole(12.5, MAX_EXACT), None);
        assert_eq!(whole(-1.0, MAX_EXACT), None);
        assert_eq!(whole(f64::NAN, MAX_EXACT), None);
        assert_eq!(whole(11.0, 10.0), None);
        assert!(!require_whole("divisor", 2.5, 10.0).valid);
        assert!(require_whole("divisor", 2.0, 10.0).valid);
    }
}
