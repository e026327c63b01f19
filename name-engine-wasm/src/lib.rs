//! WASM bindings for name-engine, backing the browser name generator.
//!
//! Everything crosses the boundary as JSON strings. Filters use the same
//! field names as `NameFilter`; an empty string means no filter.

use wasm_bindgen::prelude::*;

use name_engine::core::config::NameConfig;
use name_engine::core::engine::NameEngine;
use name_engine::core::mods::SimpleMod;
use name_engine::core::store::NameStore;
use name_engine::schema::filter::NameFilter;

#[derive(serde::Serialize)]
struct StoreInfo {
    records: usize,
    cultures: Vec<String>,
    genders: Vec<String>,
    kinds: Vec<String>,
}

fn parse_filter(filter_json: &str) -> Result<NameFilter, JsError> {
    if filter_json.trim().is_empty() {
        return Ok(NameFilter::any());
    }
    serde_json::from_str(filter_json).map_err(|e| JsError::new(&format!("Invalid filter JSON: {e}")))
}

fn parse_mod(mod_name: &str) -> Result<Option<SimpleMod>, JsError> {
    if mod_name.is_empty() {
        return Ok(None);
    }
    mod_name
        .parse()
        .map(Some)
        .map_err(|e| JsError::new(&format!("{e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// Seeded generator over the bundled name store.
#[wasm_bindgen]
pub struct NameGenerator {
    engine: NameEngine,
}

#[wasm_bindgen]
impl NameGenerator {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<NameGenerator, JsError> {
        let store = NameStore::bundled().map_err(|e| JsError::new(&format!("Store error: {e}")))?;
        let engine = NameEngine::builder()
            .seed(seed)
            .with_config(NameConfig::default())
            .with_store(store)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(NameGenerator { engine })
    }

    /// Draw stored names. Returns a JSON array of strings.
    ///
    /// Filter JSON shape (every field optional):
    /// ```json
    /// { "kind": "given", "culture": "Norse", "gender": "female" }
    /// ```
    pub fn pick(&mut self, filter_json: &str, count: usize, mod_name: &str) -> Result<String, JsError> {
        let filter = parse_filter(filter_json)?;
        let names = self
            .engine
            .pick_names(&filter, count, parse_mod(mod_name)?)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        to_json(&names)
    }

    /// Compound names. Returns a JSON array of strings.
    pub fn compound(&mut self, filter_json: &str, count: usize, mod_name: &str) -> Result<String, JsError> {
        let filter = parse_filter(filter_json)?;
        let names = self
            .engine
            .compound_names(&filter, count, parse_mod(mod_name)?)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        to_json(&names)
    }

    /// Syllable-built names. Returns a JSON array of strings.
    pub fn syllable(
        &mut self,
        filter_json: &str,
        syllables: usize,
        count: usize,
        mod_name: &str,
    ) -> Result<String, JsError> {
        let filter = parse_filter(filter_json)?;
        let names = self
            .engine
            .syllable_names(&filter, syllables, count, parse_mod(mod_name)?)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        to_json(&names)
    }

    /// Apply one mod to an arbitrary name.
    pub fn apply_mod(&mut self, name: &str, mod_name: &str) -> Result<String, JsError> {
        let modifier: SimpleMod = mod_name.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        self.engine
            .apply_mod(name, modifier)
            .map_err(|e| JsError::new(&format!("Mod error: {e}")))
    }

    /// JSON array of the cultures in the store.
    pub fn cultures(&self) -> Result<String, JsError> {
        to_json(&self.engine.cultures())
    }

    /// JSON summary of the store: record count and its distinct values.
    pub fn store_info(&self) -> Result<String, JsError> {
        to_json(&StoreInfo {
            records: self.engine.store().len(),
            cultures: self.engine.cultures().into_iter().collect(),
            genders: self.engine.genders().into_iter().collect(),
            kinds: self.engine.kinds().into_iter().collect(),
        })
    }

    /// JSON array of mod names accepted by `apply_mod` and the generators.
    pub fn mods() -> String {
        let names: Vec<&str> = SimpleMod::ALL.iter().map(SimpleMod::name).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Restart generation from a new seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        *self = NameGenerator::new(seed)?;
        Ok(())
    }
}
