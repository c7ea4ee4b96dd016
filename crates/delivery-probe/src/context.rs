//! Process-wide, read-only test context.

use std::sync::Arc;
use tracing::info;

use crate::config::HarnessConfig;
use crate::fixture::ValidCities;
use crate::result::HarnessResult;

/// Configuration plus fixtures, created once before any scenario runs
#[derive(Debug, Clone)]
pub struct FormContext {
    config: HarnessConfig,
    cities: ValidCities,
}

impl FormContext {
    /// Validate the config and load the city fixture it names.
    ///
    /// Any error here aborts the run.
    pub fn load(config: HarnessConfig) -> HarnessResult<Arc<Self>> {
        config.validate()?;
        let cities = match config.fixture_path {
            Some(ref path) => ValidCities::load(path)?,
            None => ValidCities::bundled()?,
        };
        info!(
            base_url = %config.base_url,
            cities = cities.len(),
            "form context ready"
        );
        Ok(Arc::new(Self { config, cities }))
    }

    /// Build from parts that are already loaded
    #[must_use]
    pub fn from_parts(config: HarnessConfig, cities: ValidCities) -> Arc<Self> {
        Arc::new(Self { config, cities })
    }

    /// Run configuration
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Valid cities
    #[must_use]
    pub const fn cities(&self) -> &ValidCities {
        &self.cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::HarnessError;
    use std::io::Write;

    #[test]
    fn test_load_with_bundled_fixture() {
        let context = FormContext::load(HarnessConfig::default()).unwrap();
        assert!(!context.cities().is_empty());
        assert_eq!(context.config().base_url, "http://localhost:9999");
    }

    #[test]
    fn test_load_with_fixture_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cities": ["Томск"]}}"#).unwrap();
        let context =
            FormContext::load(HarnessConfig::default().with_fixture_path(file.path())).unwrap();
        assert_eq!(context.cities().as_slice(), &["Томск".to_string()]);
    }

    #[test]
    fn test_missing_fixture_aborts() {
        let err = FormContext::load(
            HarnessConfig::default().with_fixture_path("/nonexistent/cities.json"),
        )
        .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_invalid_config_aborts() {
        let err = FormContext::load(HarnessConfig::default().with_base_url("ftp://x")).unwrap_err();
        assert!(matches!(err, HarnessError::ConfigError { .. }));
    }
}
