#![doc = "srcbundle-core: core logic library for srcbundle."]

//! This crate holds everything the `srcbundle` binary does besides argument parsing:
//! walking the source roots, picking qualifying files, detecting their encoding,
//! and appending them to a single bundle file.
//!
//! # Usage
//! Build a [`config::BundleConfig`], pick an [`contract::EncodingDetector`]
//! (usually [`encoding::SniffingDetector`]) and call [`bundle::bundle_to_file`].

pub mod bundle;
pub mod config;
pub mod contract;
pub mod encoding;
pub mod scan;
pub mod writer;

pub use bundle::{bundle_to_file, Aggregator};
pub use config::BundleConfig;
pub use contract::{
    BundleError, BundleReport, ComposeOutcome, DecodedText, Detection, EncodingDetector,
    FileOutcome,
};
pub use encoding::SniffingDetector;
pub use writer::BundleWriter;
