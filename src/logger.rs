/// Configures env_logger for the binary. Pipelines log each step at info
/// level; command lines and single patches are logged at debug level.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_target(false)
        .init();
}
