//! Translate an English key/value catalog (`en.json`) into Spanish (`es.json`).
//!
//! The run is a single sequential pipeline:
//!
//! 1. [`mapping`] loads the source catalog and any existing Spanish catalog.
//! 2. [`filter`] picks the keys that need (re-)translation.
//! 3. [`translator`] sends them, batch by batch, to DeepL or Google Translate.
//! 4. [`merge`] folds the results back in source order and [`mapping`] writes the file.
//!
//! [`pipeline`] ties the stages together so the binary stays thin, and
//! [`report`] summarizes what a run did.

pub mod cli;
pub mod config;
pub mod filter;
pub mod mapping;
pub mod merge;
pub mod pipeline;
pub mod report;
pub mod translator;
