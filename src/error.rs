//! Error handling for samplegen.
//! Defines the error type shared by the patch engine, the command runner
//! and the sample pipelines.

use std::io;
use thiserror::Error;

/// Errors raised while generating and patching a sample.
///
/// None of these are recovered locally: every call site propagates them
/// and the binary entry point reports them and exits.
#[derive(Error, Debug)]
pub enum Error {
    /// An expected anchor, marker or pattern is absent from a target file.
    #[error("Patch error: unable to find the content to be replaced in '{path}': {anchor:?}.")]
    PatchNotFound { path: String, anchor: String },

    /// A subprocess exited with a non-zero status.
    #[error("Command error: '{command}' failed with {status}: {output}")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    /// A subprocess could not be started at all.
    #[error("Command error: unable to run '{command}': {source}.")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// An invalid regular expression was handed to the patch engine.
    #[error("Regex error: {0}.")]
    RegexError(#[from] regex::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A patch payload could not be rendered.
    #[error("Template error: {0}.")]
    TemplateError(#[from] minijinja::Error),

    /// A sample failed during one of the `init`, `api` or `webhook` stages.
    #[error("error in {stage} generation for sample {sample}: {source}")]
    SampleGeneration {
        stage: &'static str,
        sample: String,
        #[source]
        source: Box<Error>,
    },

    /// A pipeline step failed.
    #[error("{step}: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps the error with the name of the step that produced it.
    pub fn in_step<S: Into<String>>(self, step: S) -> Self {
        Error::Step {
            step: step.into(),
            source: Box::new(self),
        }
    }
}

/// Convenience type alias for Results with samplegen's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Only the binary entry point calls this; library code always returns the
/// error instead.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
