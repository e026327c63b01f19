//! Name Engine: plausible personal names from fragments of real ones.
//!
//! Names are drawn from a store of records, split into syllables along
//! consonant and vowel runs, recombined, and optionally run through text
//! mods. Every randomized step takes an injected random source, so a fixed
//! seed reproduces the same output.
//!
//! ```
//! use name_engine::core::engine::NameEngine;
//! use name_engine::core::store::NameStore;
//! use name_engine::core::config::NameConfig;
//! use name_engine::schema::filter::NameFilter;
//!
//! let mut engine = NameEngine::builder()
//!     .seed(42)
//!     .with_config(NameConfig::default())
//!     .with_store(NameStore::bundled().unwrap())
//!     .build()
//!     .unwrap();
//! let names = engine.compound_names(&NameFilter::any().kind("given"), 3, None).unwrap();
//! assert_eq!(names.len(), 3);
//! ```

pub mod core;
pub mod schema;
