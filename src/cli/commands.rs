use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Static snapshot of the configuration a training script will run with
#[derive(Parser, Debug)]
#[command(
    name = "trainsnap",
    about = "Static snapshot of the configuration a training script will run with",
    version,
    long_about = "trainsnap reads a training script and its model config document without \
                  executing either, and records the stage, resume checkpoint, injection \
                  settings and dataset list the run would use.\n\n\
                  The report is written to <root_dir>/manual_logs and echoed to stdout.\n\n\
                  Examples:\n  \
                  trainsnap\n  \
                  trainsnap --script scripts/train.py\n  \
                  trainsnap --format json"
)]
pub struct CliArgs {
    #[arg(
        short = 's',
        long,
        value_name = "PATH",
        help = "Training script to inspect [default: train.py]"
    )]
    pub script: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        value_name = "PATH",
        help = "Model config used when the script has no config_path [default: ./models_yaml/anytext2_sd15.yaml]"
    )]
    pub default_config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        help = "Directory relative paths resolve against (defaults to current directory)"
    )]
    pub working_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Format of the stdout echo (the snapshot file is always human-readable)"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Human,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let args = CliArgs::try_parse_from(["trainsnap"]).unwrap();
        assert!(args.script.is_none());
        assert!(args.default_config.is_none());
        assert!(args.working_dir.is_none());
        assert_eq!(args.format, OutputFormatArg::Human);
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_all_arguments() {
        let args = CliArgs::try_parse_from([
            "trainsnap",
            "--script",
            "scripts/train.py",
            "-c",
            "base.yaml",
            "-C",
            "/work",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.script, Some(PathBuf::from("scripts/train.py")));
        assert_eq!(args.default_config, Some(PathBuf::from("base.yaml")));
        assert_eq!(args.working_dir, Some(PathBuf::from("/work")));
        assert_eq!(args.format, OutputFormatArg::Json);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["trainsnap", "-v", "-q"]).is_err());
    }
}
