//! Generation core: splitter, selector, builder and mods, plus the
//! config, store and engine layers that feed them.

pub mod builder;
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod mods;
pub mod selector;
pub mod store;
pub mod syllable;
