// src/common/cpf.rs

use std::fmt;

use crate::common::error::AppError;

const CPF_LEN: usize = 11;

/// CPF já validado, guardado no formato de exibição `DDD.DDD.DDD-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDocument(String);

impl CanonicalDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Soma ponderada mod 11; os pesos descem de (len + 1) até 2.
fn check_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

/// Valida um CPF (com ou sem pontuação) e devolve a forma canônica.
pub fn validate_and_format(raw: &str) -> Result<CanonicalDocument, AppError> {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_LEN {
        return Err(AppError::InvalidDocument);
    }

    // Sequências como 000.000.000-00 passam no dígito verificador, mas são inválidas.
    if digits.iter().all(|d| *d == digits[0]) {
        return Err(AppError::InvalidDocument);
    }

    if digits[9] != check_digit(&digits[..9]) || digits[10] != check_digit(&digits[..10]) {
        return Err(AppError::InvalidDocument);
    }

    let s: String = digits
        .iter()
        .filter_map(|d| char::from_digit(*d, 10))
        .collect();

    Ok(CanonicalDocument(format!(
        "{}.{}.{}-{}",
        &s[0..3],
        &s[3..6],
        &s[6..9],
        &s[9..11]
    )))
}
