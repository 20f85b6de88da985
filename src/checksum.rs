//! Shared checksum arithmetic used by the country validators.
//!
//! Every function operates on an already length/format-validated ASCII digit
//! string; callers run structural checks first so the arithmetic here stays
//! branch-free and panic-free. Country-specific lookup tables (Codice Fiscale
//! position values, the DNI letter table, …) live with their country module.

/// Standard Luhn check, right to left: double every second digit, subtract 9
/// when the doubled value exceeds 9, and require the sum to be divisible
/// by 10. Used by the French SIREN and SIRET.
pub fn luhn(digits: &str) -> bool {
    debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));

    let mut sum = 0u32;
    let mut double = false;
    for b in digits.bytes().rev() {
        let mut d = u32::from(b - b'0');
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// Weighted digit sum: each digit multiplied by the weight at the same
/// position. Stops at the shorter of the two sequences.
pub fn weighted_sum(digits: &str, weights: &[u32]) -> u32 {
    debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));

    digits
        .bytes()
        .zip(weights)
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum()
}

/// ISO 7064 MOD 11,10 check digit over a digit string (German Steuer-IdNr).
///
/// Iterative scheme: the running sum is `(digit + product) mod 10` (mapped to
/// 10 when zero) and the product is `(sum * 2) mod 11`; the check digit is
/// `(11 - product) mod 10`.
pub fn iso7064_mod11_10(digits: &str) -> u32 {
    debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));

    let mut product = 10u32;
    for b in digits.bytes() {
        let mut sum = (u32::from(b - b'0') + product) % 10;
        if sum == 0 {
            sum = 10;
        }
        product = (sum * 2) % 11;
    }
    (11 - product) % 10
}

/// Alternating-sum check digit: digits at positions of `doubled_parity`
/// (0-indexed; `0` doubles even positions, `1` doubles odd positions) are
/// doubled and digit-summed, the rest added as-is. The check digit is
/// `(10 - sum mod 10) mod 10`.
///
/// The Italian Partita IVA doubles odd positions; the Spanish CIF doubles
/// even positions.
pub fn alternating_check_digit(digits: &str, doubled_parity: usize) -> u32 {
    debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    debug_assert!(doubled_parity < 2);

    let mut sum = 0u32;
    for (i, b) in digits.bytes().enumerate() {
        let d = u32::from(b - b'0');
        sum += if i % 2 == doubled_parity {
            let doubled = d * 2;
            // digit sum of a doubled digit: 14 -> 5, same as subtracting 9
            if doubled > 9 { doubled - 9 } else { doubled }
        } else {
            d
        };
    }
    (10 - sum % 10) % 10
}
