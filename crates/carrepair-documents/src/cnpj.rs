//! CNPJ (Cadastro Nacional da Pessoa Jurídica) check digits and formatting.
//!
//! Handles both the legacy numeric CNPJ and the alphanumeric format, where
//! the first twelve positions may carry uppercase letters. Letters are
//! valued `code - 55` ('A' = 10 ... 'Z' = 35); digits keep their value.

use crate::normalizer::{all_same, remove_formatting};
use carrepair_core::data_model::CNPJ_LENGTH;

/// Length of the CNPJ body (everything before the two check digits)
pub const CNPJ_BASE_LENGTH: usize = 12;

/// Numeric value of a CNPJ character, `None` outside `0-9A-Z`
pub fn char_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some(u32::from(c - b'0')),
        b'A'..=b'Z' => Some(u32::from(c) - 55),
        _ => None,
    }
}

/// Validate a numeric or alphanumeric CNPJ, with or without punctuation
pub fn is_valid_cnpj(input: &str) -> bool {
    let cnpj = remove_formatting(input);
    if cnpj.len() != CNPJ_LENGTH || all_same(&cnpj) {
        return false;
    }

    let values: Option<Vec<u32>> = cnpj.bytes().map(char_value).collect();
    let Some(values) = values else {
        return false;
    };

    check_digit(&values[..12]) == values[12] && check_digit(&values[..13]) == values[13]
}

/// Mod-11 check digit; weights run 2..=9 from the rightmost position, wrapping
pub(crate) fn check_digit(values: &[u32]) -> u32 {
    let mut sum = 0;
    let mut weight = 2;
    for value in values.iter().rev() {
        sum += value * weight;
        weight = if weight == 9 { 2 } else { weight + 1 };
    }

    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Append both check digits to a 12-character CNPJ body.
///
/// Returns `None` if the body (after normalization) is not 12 characters
/// of `0-9A-Z`.
pub fn complete_cnpj(base: &str) -> Option<String> {
    let base = remove_formatting(base);
    if base.len() != CNPJ_BASE_LENGTH {
        return None;
    }

    let mut values: Vec<u32> = base.bytes().map(char_value).collect::<Option<_>>()?;
    let first = check_digit(&values);
    values.push(first);
    let second = check_digit(&values);

    Some(format!("{}{}{}", base, first, second))
}

/// Apply `##.###.###/####-##` once the input holds 14 characters
pub fn format_cnpj(input: &str) -> String {
    let cnpj = remove_formatting(input);
    if cnpj.len() != CNPJ_LENGTH {
        return input.to_uppercase();
    }

    format!(
        "{}.{}.{}/{}-{}",
        &cnpj[0..2],
        &cnpj[2..5],
        &cnpj[5..8],
        &cnpj[8..12],
        &cnpj[12..14]
    )
}
