//! Random valid documents, for fixtures and the development API.

use crate::cnpj::{complete_cnpj, CNPJ_BASE_LENGTH};
use crate::cpf::check_digit;
use crate::normalizer::all_same;
use rand::Rng;

const DIGITS: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a random valid CPF (digits only)
pub fn generate_cpf() -> String {
    generate_cpf_with(&mut rand::thread_rng())
}

pub fn generate_cpf_with<R: Rng>(rng: &mut R) -> String {
    loop {
        let mut digits: Vec<u32> = (0..9).map(|_| rng.gen_range(0..10)).collect();
        let first = check_digit(&digits);
        digits.push(first);
        let second = check_digit(&digits);
        digits.push(second);

        let cpf: String = digits
            .iter()
            .filter_map(|d| char::from_digit(*d, 10))
            .collect();
        if !all_same(&cpf) {
            return cpf;
        }
    }
}

/// Generate a random valid numeric CNPJ
pub fn generate_cnpj() -> String {
    generate_cnpj_with(&mut rand::thread_rng())
}

pub fn generate_cnpj_with<R: Rng>(rng: &mut R) -> String {
    generate_from_alphabet(rng, DIGITS)
}

/// Generate a random valid alphanumeric CNPJ (letters only in the body)
pub fn generate_alphanumeric_cnpj() -> String {
    generate_alphanumeric_cnpj_with(&mut rand::thread_rng())
}

pub fn generate_alphanumeric_cnpj_with<R: Rng>(rng: &mut R) -> String {
    generate_from_alphabet(rng, ALPHANUMERIC)
}

fn generate_from_alphabet<R: Rng>(rng: &mut R, alphabet: &[u8]) -> String {
    loop {
        let base: String = (0..CNPJ_BASE_LENGTH)
            .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
            .collect();

        if let Some(cnpj) = complete_cnpj(&base) {
            if !all_same(&cnpj) {
                return cnpj;
            }
        }
    }
}
