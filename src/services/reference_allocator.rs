// src/services/reference_allocator.rs

use std::future::Future;

use chrono::{Datelike, Utc};
use rand::Rng;

use crate::common::error::AppError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Gera números de referência no formato `REP-AAAA-NNN`.
///
/// São só 1000 sufixos por ano: perto disso o laço de nova tentativa fica longo,
/// por isso existe o teto `max_attempts`.
#[derive(Debug, Clone)]
pub struct ReferenceAllocator {
    year: Option<i32>,
    max_attempts: u32,
}

impl Default for ReferenceAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl ReferenceAllocator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            year: None,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Fixa o ano (por padrão é o ano corrente em UTC).
    pub fn for_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn candidate(&self) -> String {
        let year = self.year.unwrap_or_else(|| Utc::now().year());
        let suffix: u16 = rand::thread_rng().gen_range(0..1000);
        format!("REP-{}-{:03}", year, suffix)
    }

    /// Gera candidatos até o predicado dizer que não há colisão.
    pub fn allocate<F>(&self, mut exists: F) -> Result<String, AppError>
    where
        F: FnMut(&str) -> bool,
    {
        for _ in 0..self.max_attempts {
            let candidate = self.candidate();
            if !exists(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!("Colisão de número de referência: {}", candidate);
        }

        Err(AppError::ReferenceSpaceExhausted(self.max_attempts))
    }

    /// Igual a `allocate`, mas com a checagem de existência indo ao armazenamento.
    pub async fn allocate_with<F, Fut>(&self, mut exists: F) -> Result<String, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<bool, AppError>>,
    {
        for _ in 0..self.max_attempts {
            let candidate = self.candidate();
            if !exists(candidate.clone()).await? {
                return Ok(candidate);
            }
            tracing::debug!("Colisão de número de referência: {}", candidate);
        }

        tracing::error!(
            "🔥 Espaço de números de referência esgotado após {} tentativas",
            self.max_attempts
        );
        Err(AppError::ReferenceSpaceExhausted(self.max_attempts))
    }
}

/// `REP-AAAA-NNN`
pub fn looks_like_reference(value: &str) -> bool {
    let mut parts = value.split('-');
    matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some("REP"), Some(year), Some(seq), None)
            if year.len() == 4
                && seq.len() == 3
                && year.chars().all(|c| c.is_ascii_digit())
                && seq.chars().all(|c| c.is_ascii_digit())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn candidate_has_expected_shape() {
        let allocator = ReferenceAllocator::default().for_year(2025);
        for _ in 0..50 {
            let reference = allocator.candidate();
            assert!(reference.starts_with("REP-2025-"));
            assert!(looks_like_reference(&reference), "{reference}");
        }
    }

    #[test]
    fn default_year_is_current_year() {
        let reference = ReferenceAllocator::default().candidate();
        assert!(reference.starts_with(&format!("REP-{}-", Utc::now().year())));
    }

    #[test]
    fn retries_until_no_collision() {
        let allocator = ReferenceAllocator::default().for_year(2025);
        let mut calls = 0;
        let reference = allocator
            .allocate(|_| {
                calls += 1;
                calls < 4
            })
            .unwrap();
        assert_eq!(calls, 4);
        assert!(looks_like_reference(&reference));
    }

    #[test]
    fn never_returns_a_taken_reference() {
        let allocator = ReferenceAllocator::default().for_year(2025);
        let mut taken: HashSet<String> = (0..900).map(|n| format!("REP-2025-{:03}", n)).collect();

        for _ in 0..50 {
            let reference = allocator.allocate(|c| taken.contains(c)).unwrap();
            assert!(taken.insert(reference));
        }
    }

    #[test]
    fn gives_up_when_space_is_full() {
        let allocator = ReferenceAllocator::new(25).for_year(2025);
        let result = allocator.allocate(|_| true);
        assert!(matches!(result, Err(AppError::ReferenceSpaceExhausted(25))));
    }

    #[tokio::test]
    async fn async_allocation_propagates_store_errors() {
        let allocator = ReferenceAllocator::default();
        let result = allocator
            .allocate_with(|_| async { Err(AppError::NotFound("x")) })
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn reference_shape_check() {
        assert!(looks_like_reference("REP-2025-007"));
        assert!(!looks_like_reference("REP-25-007"));
        assert!(!looks_like_reference("REP-2025-07"));
        assert!(!looks_like_reference("REP-2025-007-1"));
        assert!(!looks_like_reference("550e8400-e29b-41d4-a716-446655440000"));
    }
}
