use trainsnap::cli::{CliArgs, OutputFormatter};
use trainsnap::{init_logging, LoggingConfig, RealFileSystem, SnapshotConfig, SnapshotRunner};
use trainsnap::VERSION;

use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let args = CliArgs::parse();
    let config = merge_config(&args);
    init_logging(LoggingConfig::from_args(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        &config.log_level,
    ));

    debug!("trainsnap v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(handle_snapshot(&args, &config));
}

/// Flags win over `SnapshotConfig::default()`, which reads the environment
fn merge_config(args: &CliArgs) -> SnapshotConfig {
    let default_config = SnapshotConfig::default();
    SnapshotConfig {
        script_path: args.script.clone().unwrap_or(default_config.script_path),
        default_config_path: args
            .default_config
            .clone()
            .unwrap_or(default_config.default_config_path),
        working_dir: args.working_dir.clone().unwrap_or(default_config.working_dir),
        log_level: args
            .log_level
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or(default_config.log_level),
    }
}

fn handle_snapshot(args: &CliArgs, config: &SnapshotConfig) -> i32 {
    debug!("{}", config);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return 1;
    }

    info!("Reading current training configuration");

    let fs = RealFileSystem::new();
    let runner = SnapshotRunner::new(&fs, config);

    let mut snapshot = match runner.inspect(chrono::Local::now()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let saved_to = match runner.persist(&mut snapshot) {
        Ok(path) => path,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let rendered = match OutputFormatter::new(args.format.into()).format(&snapshot) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format snapshot: {:#}", e);
            return 1;
        }
    };
    println!("{}", rendered);

    info!("Snapshot file generated: {}", saved_to.display());
    0
}
