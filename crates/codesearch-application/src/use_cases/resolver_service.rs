//! Symbol resolver dispatch (§4.5, C5): language-keyed lookup over a
//! registry of [`SymbolBackend`]s, each call bounded by a wall-clock budget.

use std::path::Path;
use std::time::Duration;

use codesearch_domain::error::{Error, Result};
use codesearch_domain::model::{Language, Location};
use codesearch_domain::ports::SymbolBackend;

/// Registry of the backends this service was built with, keyed by the
/// language each one resolves.
pub struct ResolverService {
    backends: Vec<Box<dyn SymbolBackend>>,
    timeout: Duration,
}

impl ResolverService {
    /// Build a resolver service over `backends`, each call bounded by
    /// `timeout`.
    #[must_use]
    pub fn new(backends: Vec<Box<dyn SymbolBackend>>, timeout: Duration) -> Self {
        Self { backends, timeout }
    }

    /// Every declaration site of `symbol` in `language`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an unsupported language;
    /// [`Error::BackendTimeout`] if the backend exceeds its budget (the
    /// error carries no results — callers surface an empty list alongside
    /// it, per §7).
    pub async fn definitions(&self, project_root: &Path, symbol: &str, language: &str) -> Result<Vec<Location>> {
        let backend = self.backend_for(language)?;
        self.with_timeout(backend.definitions(project_root, symbol)).await
    }

    /// Every occurrence of `symbol` in `language`.
    pub async fn references(&self, project_root: &Path, symbol: &str, language: &str) -> Result<Vec<Location>> {
        let backend = self.backend_for(language)?;
        self.with_timeout(backend.references(project_root, symbol)).await
    }

    fn backend_for(&self, language: &str) -> Result<&dyn SymbolBackend> {
        let parsed = Language::from_str(language)
            .ok_or_else(|| Error::invalid_argument(format!("unsupported language '{language}'")))?;
        self.backends
            .iter()
            .find(|backend| backend.language() == parsed)
            .map(std::convert::AsRef::as_ref)
            .ok_or_else(|| Error::invalid_argument(format!("no backend registered for '{language}'")))
    }

    async fn with_timeout<F>(&self, future: F) -> Result<Vec<Location>>
    where
        F: std::future::Future<Output = Result<Vec<Location>>>,
    {
        match tokio::time::timeout(self.timeout, future).await {
            Ok(result) => result,
            Err(_) => Err(Error::BackendTimeout {
                budget_secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct SlowBackend;

    #[async_trait]
    impl SymbolBackend for SlowBackend {
        fn language(&self) -> Language {
            Language::Python
        }

        async fn definitions(&self, _project_root: &Path, _symbol: &str) -> Result<Vec<Location>> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(Vec::new())
        }

        async fn references(&self, _project_root: &Path, _symbol: &str) -> Result<Vec<Location>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn unsupported_language_is_rejected() {
        let service = ResolverService::new(Vec::new(), Duration::from_secs(30));
        let err = service
            .definitions(Path::new("."), "login", "rust")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn missing_backend_for_a_known_language_is_rejected() {
        let service = ResolverService::new(Vec::new(), Duration::from_secs(30));
        let err = service
            .definitions(Path::new("."), "login", "python")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn backend_exceeding_its_budget_times_out() {
        let service = ResolverService::new(vec![Box::new(SlowBackend)], Duration::from_millis(10));
        let err = service
            .definitions(Path::new("."), "login", "python")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BackendTimeout { .. }));
    }
}
