//! samplegen scaffolds operator sample projects with an external binary and
//! then patches the generated files into finished examples.
//! Every patch is anchored on exact text the scaffolder wrote and fails
//! loudly when that text is missing.

/// OLM bundle generation and annotation stripping
pub mod bundle;

/// Command-line interface module for the samplegen application
pub mod cli;

/// Subprocess execution bound to a directory and an environment overlay
pub mod command;

/// Configuration handling
/// Supports JSON and YAML formats (samplegen.json, samplegen.yml, samplegen.yaml)
pub mod config;

pub mod constants;

/// Identity and location of one generated project
pub mod context;

/// Error types and handling for the samplegen application
pub mod error;

/// Payloads spliced into generated files
pub mod fragments;

/// Batch scaffolding of samples with stage hooks
pub mod generator;

pub mod logger;

/// Fail-closed text patching primitives
pub mod patch;

/// Named, ordered step lists for every sample
pub mod pipeline;

/// Rendering of payloads that depend on the project
pub mod renderer;

/// Scaffolding parameters of a sample
pub mod sample;
