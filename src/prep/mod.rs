// src/prep/mod.rs

pub mod config;
pub mod param;
pub mod repr;

pub use config::PrepConfig;
pub use param::{Caps, ComStr, EnOnly, ParamValue, PrepParam, Split, TabsNewlines};
pub use repr::{ReprConfig, ReprType, Splitter};
