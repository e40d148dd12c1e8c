use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod convert;
mod demo;
mod export;
mod info;
mod overview;
mod profile;
mod validate;

pub use config::Config;
pub use profile::Profile;

/// chromstore - Native chromatogram container tool
#[derive(Parser)]
#[command(name = "chromstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load reader/writer settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Write profile for trading speed against file size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower writes
    MaxCompression,
    /// No compression at all
    Stored,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
            ProfileArg::Stored => Profile::Stored,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a container
    Info {
        /// Container path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the TIC overview without decoding scans
    Overview {
        /// Container path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate container integrity
    Validate {
        /// Container path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Export the peak table as CSV
    ExportPeaks {
        /// Container path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output CSV path (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Export the whole chromatogram as JSON
    ExportJson {
        /// Container path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output JSON path (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Re-write a container, optionally in another version
    Convert {
        /// Input container path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output container path (defaults to overwriting the input)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Version tag to write (defaults to the current version)
        #[arg(long = "to", value_name = "VERSION")]
        version: Option<String>,

        /// Write profile
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Deflate level (0-9), overrides the profile
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<i64>,
    },

    /// Synthesize a GC-MS run and write it
    Demo {
        /// Output container path
        #[arg(value_name = "OUTPUT", default_value = "demo_gcms_run.chrom")]
        output: PathBuf,

        /// Version tag to write (defaults to the current version)
        #[arg(long = "to", value_name = "VERSION")]
        version: Option<String>,

        /// Write profile
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Number of scans to synthesize
        #[arg(short = 'n', long, default_value = "1200")]
        scans: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Info { file } => info::run(file, &config),
        Commands::Overview { file, json } => overview::run(file, json),
        Commands::Validate { file } => validate::run(file),
        Commands::ExportPeaks { file, output } => export::run_peaks(file, output, &config),
        Commands::ExportJson {
            file,
            output,
            pretty,
        } => export::run_json(file, output, pretty, &config),
        Commands::Convert {
            input,
            output,
            version,
            profile,
            compression_level,
        } => convert::run(
            input,
            output,
            version,
            Profile::from(profile),
            compression_level,
            &config,
        ),
        Commands::Demo {
            output,
            version,
            profile,
            scans,
        } => demo::run(output, version, Profile::from(profile), scans, &config),
    }
}
