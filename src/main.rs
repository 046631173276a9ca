//! samplegen's main application entry point.
//! Parses arguments, loads the configuration and runs the selected sample
//! pipelines one after the other.

use samplegen::{
    cli::{get_args, Args},
    config::get_config,
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline::for_sample,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Builds every selected pipeline and either lists or runs it.
///
/// Samples are generated in the order they were selected; the first failure
/// stops the run.
fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = get_config(args.config.as_deref(), &cwd)?;
    config.apply_args(&args);

    for kind in args.selected_samples() {
        let sample = for_sample(kind, &args.samples_dir, &config)?;
        if args.list {
            println!("{} ({}):", kind.name(), sample.context.dir().display());
            for (idx, step) in sample.pipeline.step_names().iter().enumerate() {
                println!("  {}. {step}", idx + 1);
            }
            continue;
        }

        sample.run()?;
        println!(
            "Sample {} generated successfully in {}.",
            kind.name(),
            sample.context.dir().display()
        );
    }
    Ok(())
}
