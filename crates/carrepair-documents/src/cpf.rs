//! CPF (Cadastro de Pessoas Físicas) check digits and formatting.

use crate::normalizer::{all_same, digits_only, is_numeric, remove_formatting};
use carrepair_core::data_model::CPF_LENGTH;

/// Validate a CPF, with or without punctuation.
///
/// Rejects anything that is not 11 digits after stripping, and the
/// repeated-digit sequences ("111.111.111-11") that pass the checksum.
pub fn is_valid_cpf(input: &str) -> bool {
    let cpf = digits_only(input);
    if cpf.len() != CPF_LENGTH || all_same(&cpf) {
        return false;
    }

    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Mod-11 check digit over `digits`, weights descending to 2
pub(crate) fn check_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();

    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Apply `###.###.###-##` once the input holds exactly 11 digits and
/// nothing else; anything else comes back unchanged
pub fn format_cpf(input: &str) -> String {
    let cpf = remove_formatting(input);
    if cpf.len() != CPF_LENGTH || !is_numeric(&cpf) {
        return input.to_string();
    }

    format!("{}.{}.{}-{}", &cpf[0..3], &cpf[3..6], &cpf[6..9], &cpf[9..11])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("111.444.777-35"));
    }

    #[test]
    fn test_corrupted_check_digit() {
        assert!(!is_valid_cpf("52998224726"));
        assert!(!is_valid_cpf("52998224715"));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!is_valid_cpf(&cpf), "accepted {}", cpf);
        }
    }

    #[test]
    fn test_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247250"));
        assert!(!is_valid_cpf("abc"));
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), 2);
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7, 2]), 5);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
        assert_eq!(format_cpf("5299822"), "5299822");
    }

    #[test]
    fn test_format_keeps_input_with_letters() {
        assert_eq!(format_cpf("52998224725X"), "52998224725X");
        assert_eq!(format_cpf("5299822472A"), "5299822472A");
    }
}
