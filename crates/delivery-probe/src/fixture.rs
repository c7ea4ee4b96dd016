//! City fixture: the static list of cities the form accepts.
//!
//! Loaded once per run and shared read-only. A missing, unparseable or
//! empty fixture is fatal for the run.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::result::{HarnessError, HarnessResult};

/// Fixture bundled with the crate
const BUNDLED_CITIES: &str = include_str!("../fixtures/cities.json");

#[derive(Debug, Deserialize)]
struct CitiesFile {
    cities: Vec<String>,
}

/// Ordered, immutable list of valid city names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCities {
    cities: Vec<String>,
}

impl ValidCities {
    /// Parse `{"cities": [...]}`
    pub fn from_json(json: &str) -> HarnessResult<Self> {
        let file: CitiesFile = serde_json::from_str(json)
            .map_err(|e| HarnessError::fixture(format!("malformed city list: {e}")))?;
        Self::new(file.cities)
    }

    /// Build from an explicit list; rejects empty lists and blank names
    pub fn new(cities: Vec<String>) -> HarnessResult<Self> {
        if cities.is_empty() {
            return Err(HarnessError::fixture("city list is empty"));
        }
        if let Some(pos) = cities.iter().position(|c| c.trim().is_empty()) {
            return Err(HarnessError::fixture(format!("blank city at index {pos}")));
        }
        Ok(Self { cities })
    }

    /// Load the fixture from a file
    pub fn load(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::fixture(format!("cannot read {}: {e}", path.display()))
        })?;
        let cities = Self::from_json(&json)?;
        debug!(path = %path.display(), count = cities.len(), "loaded city fixture");
        Ok(cities)
    }

    /// The list shipped with the crate
    pub fn bundled() -> HarnessResult<Self> {
        Self::from_json(BUNDLED_CITIES)
    }

    /// Pick a city uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction
        self.cities.choose(rng).map_or("", String::as_str)
    }

    /// Whether `city` is in the list
    #[must_use]
    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Number of cities
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always false for a successfully loaded fixture
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// All cities in fixture order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.cities
    }
}
