/**
 * Auth Service
 * Enrollment and two-factor login: freehand pattern, then an ordered symbol sequence
 */

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::credentials::{sequences_equal, unix_now, CredentialStore, EnrolledUser, UserSummary};
use crate::error::AuthError;
use crate::gesture::{Gesture, GestureRecord};
use crate::pattern::PatternService;
use crate::scorer::ComparisonResult;

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub user: UserSummary,
    pub comparison: ComparisonResult,
}

pub struct AuthService<S> {
    store: S,
    patterns: PatternService,
    config: ServerConfig,
}

impl<S: CredentialStore> AuthService<S> {
    pub fn new(store: S, patterns: PatternService, config: ServerConfig) -> Self {
        Self {
            store,
            patterns,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn check_symbol_count(&self, got: usize) -> Result<(), AuthError> {
        if got != self.config.symbol_count {
            return Err(AuthError::InvalidSymbols {
                expected: self.config.symbol_count,
                got,
            });
        }
        Ok(())
    }

    /// A missing candidate counts as zero points.
    fn check_login_points(&self, candidate: &Gesture) -> Result<(), AuthError> {
        let got = candidate.as_record().map_or(0, GestureRecord::len);
        if got < self.config.min_login_points {
            return Err(AuthError::TooFewPoints {
                min: self.config.min_login_points,
                got,
            });
        }
        Ok(())
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        pattern: GestureRecord,
        confirm_pattern: &Gesture,
        symbols: Vec<String>,
    ) -> Result<UserSummary, AuthError> {
        if username.chars().count() < self.config.min_username_len {
            return Err(AuthError::UsernameTooShort {
                min: self.config.min_username_len,
            });
        }
        if pattern.len() < self.config.min_enrollment_points {
            return Err(AuthError::TooFewPoints {
                min: self.config.min_enrollment_points,
                got: pattern.len(),
            });
        }
        self.check_symbol_count(symbols.len())?;

        let confirmation = self.patterns.compare(
            &Gesture::Present(pattern.clone()),
            confirm_pattern,
            self.config.confirmation_threshold,
        );
        if !confirmation.is_match {
            warn!(
                "Enrollment confirmation failed: username={}, similarity={}",
                username, confirmation.similarity
            );
            return Err(AuthError::ConfirmationMismatch {
                similarity: confirmation.similarity,
            });
        }

        let user = EnrolledUser::new(username, email, pattern, symbols);
        let summary = user.summary();
        self.store.insert(user).await?;

        info!("Enrolled user: username={}, id={}", summary.username, summary.id);
        Ok(summary)
    }

    /// First login step: pattern only, at the more lenient check threshold.
    pub async fn verify_pattern(
        &self,
        username: &str,
        candidate: &Gesture,
    ) -> Result<ComparisonResult, AuthError> {
        self.check_login_points(candidate)?;

        let user = self
            .store
            .find_by_username(username)
            .await
            .ok_or(AuthError::UserNotFound)?;

        let comparison = self.patterns.compare(
            &Gesture::Present(user.pattern),
            candidate,
            self.config.pattern_check_threshold,
        );
        info!(
            "Pattern check: username={}, similarity={}, match={}",
            username, comparison.similarity, comparison.is_match
        );
        Ok(comparison)
    }

    pub async fn login(
        &self,
        username: &str,
        candidate: &Gesture,
        symbols: &[String],
    ) -> Result<LoginOutcome, AuthError> {
        self.check_login_points(candidate)?;
        self.check_symbol_count(symbols.len())?;

        let user = self
            .store
            .find_by_username(username)
            .await
            .ok_or(AuthError::UserNotFound)?;

        let comparison = self.patterns.compare(
            &Gesture::Present(user.pattern),
            candidate,
            self.config.login_threshold,
        );
        if !comparison.is_match {
            warn!(
                "Login rejected on pattern: username={}, similarity={}",
                username, comparison.similarity
            );
            return Err(AuthError::PatternMismatch {
                similarity: comparison.similarity,
            });
        }

        if !sequences_equal(&user.symbols, symbols) {
            warn!("Login rejected on symbols: username={}", username);
            return Err(AuthError::SymbolMismatch);
        }

        let user = self.store.record_login(username, unix_now()).await?;
        info!("Login succeeded: username={}", username);

        Ok(LoginOutcome {
            user: user.summary(),
            comparison,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::InMemoryCredentialStore;
    use crate::gesture::Point;

    fn record(raw: &[(f64, f64)]) -> GestureRecord {
        let points = raw.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let timestamps = (0..raw.len() as u64).map(|i| i * 20).collect();
        GestureRecord::new(points, timestamps).unwrap()
    }

    fn zed() -> GestureRecord {
        record(&[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0), (50.0, 50.0), (0.0, 100.0), (100.0, 100.0)])
    }

    /// The same Z traced from its last point back to its first.
    fn reversed_zed() -> GestureRecord {
        record(&[(100.0, 100.0), (0.0, 100.0), (50.0, 50.0), (100.0, 0.0), (50.0, 0.0), (0.0, 0.0)])
    }

    fn symbols() -> Vec<String> {
        vec!["sun".into(), "moon".into(), "star".into()]
    }

    fn service() -> AuthService<InMemoryCredentialStore> {
        AuthService::new(
            InMemoryCredentialStore::new(),
            PatternService::default(),
            ServerConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let auth = service();
        let summary = auth
            .register("alice", "a@example.com", zed(), &Gesture::Present(zed()), symbols())
            .await
            .unwrap();
        assert_eq!(summary.username, "alice");
        assert_eq!(summary.last_login, None);

        // Same shape drawn twice as large.
        let bigger = record(&[(0.0, 0.0), (100.0, 0.0), (200.0, 0.0), (100.0, 100.0), (0.0, 200.0), (200.0, 200.0)]);
        let outcome = auth
            .login("alice", &Gesture::Present(bigger), &symbols())
            .await
            .unwrap();
        assert_eq!(outcome.comparison.similarity, 100);
        assert!(outcome.user.last_login.is_some());
    }

    #[tokio::test]
    async fn test_register_rejects_bad_confirmation() {
        let auth = service();
        let result = auth
            .register("alice", "a@example.com", zed(), &Gesture::Present(reversed_zed()), symbols())
            .await;
        assert!(matches!(result, Err(AuthError::ConfirmationMismatch { .. })));
        assert_eq!(auth.store().len().await, 0);
    }

    #[tokio::test]
    async fn test_register_requires_symbol_count() {
        let auth = service();
        let result = auth
            .register("alice", "a@example.com", zed(), &Gesture::Present(zed()), vec!["sun".into()])
            .await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidSymbols { expected: 3, got: 1 })
        ));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let auth = service();
        auth.register("alice", "a@example.com", zed(), &Gesture::Present(zed()), symbols())
            .await
            .unwrap();

        assert!(matches!(
            auth.login("bob", &Gesture::Present(zed()), &symbols()).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            auth.login("alice", &Gesture::Present(reversed_zed()), &symbols()).await,
            Err(AuthError::PatternMismatch { .. })
        ));

        let mut swapped = symbols();
        swapped.swap(0, 2);
        assert!(matches!(
            auth.login("alice", &Gesture::Present(zed()), &swapped).await,
            Err(AuthError::SymbolMismatch)
        ));

        let user = auth.store().find_by_username("alice").await.unwrap();
        assert_eq!(user.last_login, None);
    }

    #[tokio::test]
    async fn test_register_input_minimums() {
        let auth = service();

        let short_name = auth
            .register("al", "a@example.com", zed(), &Gesture::Present(zed()), symbols())
            .await;
        assert!(matches!(short_name, Err(AuthError::UsernameTooShort { min: 3 })));

        let four_points = record(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let sparse = auth
            .register(
                "alice",
                "a@example.com",
                four_points.clone(),
                &Gesture::Present(four_points),
                symbols(),
            )
            .await;
        assert!(matches!(sparse, Err(AuthError::TooFewPoints { min: 5, got: 4 })));

        let dot = record(&[(3.0, 3.0)]);
        let single = auth
            .register("alice", "a@example.com", dot.clone(), &Gesture::Present(dot), symbols())
            .await;
        assert!(matches!(single, Err(AuthError::TooFewPoints { min: 5, got: 1 })));

        assert_eq!(auth.store().len().await, 0);
    }

    #[tokio::test]
    async fn test_login_input_minimums() {
        let auth = service();
        auth.register("alice", "a@example.com", zed(), &Gesture::Present(zed()), symbols())
            .await
            .unwrap();

        let two_points = Gesture::Present(record(&[(0.0, 0.0), (100.0, 0.0)]));
        assert!(matches!(
            auth.login("alice", &two_points, &symbols()).await,
            Err(AuthError::TooFewPoints { min: 3, got: 2 })
        ));
        assert!(matches!(
            auth.login("alice", &Gesture::Absent, &symbols()).await,
            Err(AuthError::TooFewPoints { min: 3, got: 0 })
        ));
        assert!(matches!(
            auth.verify_pattern("alice", &two_points).await,
            Err(AuthError::TooFewPoints { min: 3, got: 2 })
        ));

        let four = vec!["sun".to_string(), "moon".into(), "star".into(), "sun".into()];
        assert!(matches!(
            auth.login("alice", &Gesture::Present(zed()), &four).await,
            Err(AuthError::InvalidSymbols { expected: 3, got: 4 })
        ));

        let user = auth.store().find_by_username("alice").await.unwrap();
        assert_eq!(user.last_login, None);
    }

    #[tokio::test]
    async fn test_verify_pattern_does_not_log_in() {
        let auth = service();
        auth.register("alice", "a@example.com", zed(), &Gesture::Present(zed()), symbols())
            .await
            .unwrap();

        let comparison = auth
            .verify_pattern("alice", &Gesture::Present(zed()))
            .await
            .unwrap();
        assert!(comparison.is_match);

        let user = auth.store().find_by_username("alice").await.unwrap();
        assert_eq!(user.last_login, None);
    }
}
