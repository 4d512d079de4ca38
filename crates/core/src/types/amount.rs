//! Rupee amount presentation for invoices and estimates.
//!
//! Amounts are rounded half away from zero to two decimal places (paise)
//! before formatting. Both helpers use the Indian numbering system, which
//! groups digits as thousand, lakh (1,00,000) and crore (1,00,00,000).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Errors that can occur when converting an amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Negative amounts have no invoice wording.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),
    /// The rupee part does not fit in 64 bits.
    #[error("amount is too large: {0}")]
    TooLarge(Decimal),
}

/// Split an amount into whole rupees and paise.
fn split_rupees(amount: Decimal) -> Result<(u64, u64), AmountError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative(amount));
    }

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.trunc();
    let rupees = whole.to_u64().ok_or(AmountError::TooLarge(amount))?;
    let paise = ((rounded - whole) * Decimal::ONE_HUNDRED)
        .to_u64()
        .ok_or(AmountError::TooLarge(amount))?;

    Ok((rupees, paise))
}

fn below_hundred(n: u64) -> String {
    let ones = |i: u64| ONES.get(usize::try_from(i).unwrap_or(0)).copied().unwrap_or("");
    if n < 20 {
        return ones(n).to_owned();
    }
    let tens = TENS
        .get(usize::try_from(n / 10).unwrap_or(0))
        .copied()
        .unwrap_or("");
    match n % 10 {
        0 => tens.to_owned(),
        unit => format!("{tens} {}", ones(unit)),
    }
}

fn below_thousand(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (_, 0) => format!("{} Hundred", below_hundred(hundreds)),
        _ => format!("{} Hundred {}", below_hundred(hundreds), below_hundred(rest)),
    }
}

/// Spell out a non-negative integer using crore / lakh / thousand.
fn indian_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_owned();
    }

    let mut parts = Vec::new();
    let crores = n / CRORE;
    let mut rest = n % CRORE;
    if crores > 0 {
        // Counts above 99 crore are themselves spelled in Indian numbering.
        parts.push(format!("{} Crore", indian_words(crores)));
    }

    let lakhs = rest / LAKH;
    rest %= LAKH;
    if lakhs > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakhs)));
    }

    let thousands = rest / THOUSAND;
    rest %= THOUSAND;
    if thousands > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousands)));
    }

    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Convert a rupee amount to the wording printed on invoices.
///
/// ```
/// use murti_core::amount_in_words;
/// use rust_decimal::Decimal;
///
/// let words = amount_in_words(Decimal::new(123_450, 2)).unwrap();
/// assert_eq!(
///     words,
///     "Rupees One Thousand Two Hundred Thirty Four and Fifty Paise Only"
/// );
/// ```
///
/// # Errors
///
/// Returns [`AmountError::Negative`] for negative amounts and
/// [`AmountError::TooLarge`] when the rupee part exceeds `u64`.
pub fn amount_in_words(amount: Decimal) -> Result<String, AmountError> {
    let (rupees, paise) = split_rupees(amount)?;

    let words = match (rupees, paise) {
        (0, p) if p > 0 => format!("{} Paise Only", below_hundred(p)),
        (r, 0) => format!("Rupees {} Only", indian_words(r)),
        (r, p) => format!(
            "Rupees {} and {} Paise Only",
            indian_words(r),
            below_hundred(p)
        ),
    };

    Ok(words)
}

/// Insert Indian digit-group separators into a run of ASCII digits.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

/// Format an amount as rupees with Indian digit grouping, e.g. `₹12,34,567.00`.
///
/// Negative amounts are prefixed with a minus sign.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let abs = rounded.abs();
    let whole = abs.trunc();
    let paise = ((abs - whole) * Decimal::ONE_HUNDRED)
        .to_u64()
        .unwrap_or_default();

    format!("{sign}₹{}.{paise:02}", group_indian(&whole.to_string()))
}
