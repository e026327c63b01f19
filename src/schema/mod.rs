//! Plain data types shared by the generation core.

pub mod filter;
pub mod name;
