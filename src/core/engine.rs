//! The name engine: selector → builder → mod orchestration.
//!
//! Owns the loaded configuration, the name store and a seeded random
//! generator, and wires the pure core operations together. This is the
//! only layer that logs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::builder::{build_compound, build_from_syllables};
use crate::core::config::{CharClasses, ConfigError, NameConfig};
use crate::core::error::NameError;
use crate::core::mods::SimpleMod;
use crate::core::selector::select;
use crate::core::store::{NameStore, StoreError};
use crate::schema::filter::NameFilter;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The top-level name engine. Built via `NameEngine::builder()`.
pub struct NameEngine {
    config: NameConfig,
    store: NameStore,
    rng: StdRng,
}

/// Builder for constructing a `NameEngine`.
#[derive(Default)]
pub struct NameEngineBuilder {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    store_path: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    /// Directly provided configuration (skips config file discovery).
    config: Option<NameConfig>,
    /// Directly provided store (skips store resolution).
    store: Option<NameStore>,
}

impl NameEngine {
    pub fn builder() -> NameEngineBuilder {
        NameEngineBuilder::default()
    }

    pub fn config(&self) -> &NameConfig {
        &self.config
    }

    pub fn classes(&self) -> &CharClasses {
        &self.config.classes
    }

    pub fn store(&self) -> &NameStore {
        &self.store
    }

    /// Draw `count` stored names.
    pub fn pick_names(
        &mut self,
        filter: &NameFilter,
        count: usize,
        modifier: Option<SimpleMod>,
    ) -> Result<Vec<String>, EngineError> {
        let picked = self.draw(filter, count)?;
        self.finish(picked, modifier)
    }

    /// Build `count` names, each from the first syllable of one selected
    /// name and the last syllable of another.
    pub fn compound_names(
        &mut self,
        filter: &NameFilter,
        count: usize,
        modifier: Option<SimpleMod>,
    ) -> Result<Vec<String>, EngineError> {
        if count == 0 {
            return Err(NameError::invalid("cannot build zero names").into());
        }
        let mut built = Vec::with_capacity(count);
        for _ in 0..count {
            let pair = self.draw(filter, 2)?;
            built.push(build_compound(&pair[0], &pair[1], &self.config.classes));
        }
        self.finish(built, modifier)
    }

    /// Build `count` names, each from `syllables` syllables pooled from
    /// `syllables` selected names.
    pub fn syllable_names(
        &mut self,
        filter: &NameFilter,
        syllables: usize,
        count: usize,
        modifier: Option<SimpleMod>,
    ) -> Result<Vec<String>, EngineError> {
        if count == 0 {
            return Err(NameError::invalid("cannot build zero names").into());
        }
        let mut built = Vec::with_capacity(count);
        for _ in 0..count {
            let sources = self.draw(filter, syllables)?;
            let name = build_from_syllables(&sources, syllables, &self.config.classes, &mut self.rng)?;
            built.push(name);
        }
        self.finish(built, modifier)
    }

    /// Every stored name matching `filter`, in store order, without the
    /// selector's fallback.
    pub fn list_names(&self, filter: &NameFilter) -> Vec<&str> {
        self.store
            .filter(filter)
            .into_iter()
            .map(|record| record.name.as_str())
            .collect()
    }

    pub fn cultures(&self) -> BTreeSet<String> {
        self.store.cultures()
    }

    pub fn genders(&self) -> BTreeSet<String> {
        self.store.genders()
    }

    pub fn kinds(&self) -> BTreeSet<String> {
        self.store.kinds()
    }

    pub fn sources(&self) -> BTreeSet<String> {
        self.store.sources()
    }

    /// Apply one mod to an arbitrary name using the engine's generator.
    pub fn apply_mod(&mut self, name: &str, modifier: SimpleMod) -> Result<String, EngineError> {
        Ok(modifier.apply(name, &self.config.classes, &mut self.rng)?)
    }

    fn draw(&mut self, filter: &NameFilter, count: usize) -> Result<Vec<String>, EngineError> {
        if !filter.is_unrestricted() && self.store.filter(filter).is_empty() {
            warn!(?filter, "no names match filter, selecting from all names");
        }
        Ok(select(self.store.records(), filter, count, &mut self.rng)?)
    }

    fn finish(&mut self, names: Vec<String>, modifier: Option<SimpleMod>) -> Result<Vec<String>, EngineError> {
        let Some(modifier) = modifier else {
            return Ok(names);
        };
        names
            .iter()
            .map(|name| self.apply_mod(name, modifier))
            .collect()
    }
}

impl NameEngineBuilder {
    /// Fix the generator seed. Without one the generator is seeded from
    /// system entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Config file or directory layered over `name_engine.ron` in the
    /// working directory.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Store file or directory, taking precedence over the configured one.
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Directory searched for `name_engine.ron` and `names.ron`. Defaults
    /// to the process working directory.
    pub fn working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }

    /// Provide configuration directly (for testing without files).
    pub fn with_config(mut self, config: NameConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Provide a store directly (for testing without files).
    pub fn with_store(mut self, store: NameStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<NameEngine, EngineError> {
        let cwd = match self.working_dir {
            Some(dir) => dir,
            // Nothing to discover on disk.
            None if self.config.is_some() && self.store.is_some() => PathBuf::new(),
            None => std::env::current_dir()?,
        };

        let config = match self.config {
            Some(config) => config,
            None => NameConfig::load_from(&cwd, self.config_path.as_deref())?,
        };

        let store = match self.store {
            Some(store) => store,
            None => {
                let configured = config.store_path.as_ref().map(|path| cwd.join(path));
                NameStore::open(self.store_path.as_deref(), configured.as_deref(), &cwd)?
            }
        };
        debug!(records = store.len(), seed = ?self.seed, "name engine ready");

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(NameEngine { config, store, rng })
    }
}
