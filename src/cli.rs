//! Command-line interface implementation for samplegen.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::pipeline::go::ScaffoldVersion;
use crate::pipeline::SampleKind;

/// Command-line arguments structure for samplegen.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "samplegen: generates and patches operator sample projects",
    long_about = None
)]
pub struct Args {
    /// Root directory the samples are generated under
    #[arg(value_name = "SAMPLES_DIR")]
    pub samples_dir: PathBuf,

    /// Sample to generate; repeat for several. Defaults to all of them
    #[arg(short = 's', long = "sample", value_name = "SAMPLE", value_enum)]
    pub samples: Vec<SampleKind>,

    /// Scaffolding binary to run
    #[arg(short, long)]
    pub binary: Option<String>,

    /// Configuration file to use instead of the one in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Layout of the Go samples
    #[arg(long, value_enum)]
    pub scaffold_version: Option<ScaffoldVersion>,

    /// Also build the operator and bundle images
    #[arg(long)]
    pub build_images: bool,

    /// Print the steps of each selected sample without running them
    #[arg(long)]
    pub list: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Samples picked on the command line, or every sample when none was.
    pub fn selected_samples(&self) -> Vec<SampleKind> {
        if self.samples.is_empty() {
            SampleKind::all().to_vec()
        } else {
            self.samples.clone()
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let printed = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                if printed.is_err() {
                    eprintln!("{e}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
