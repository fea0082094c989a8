use std::{
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use techair_dissect::{
    protocol::{fixed::AxisDecoding, tokenize::TokenMode, DissectOptions, Dissector},
    run_file, DissectError, Summary,
};

/// Dissect a Tech-Air USB capture into readable frames.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Capture log with one `R: `/`W: ` record per line
    file: PathBuf,

    /// Reject tokens that are not one or two hex digits instead of reading them leniently
    #[arg(long)]
    strict: bool,

    /// Fixed-point reading applied to sensor axis words
    #[arg(long, value_enum, default_value_t = AxisArg::SignMagnitude)]
    axis: AxisArg,

    /// Log more on stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log nothing on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AxisArg {
    SignMagnitude,
    Unsigned,
}

impl From<AxisArg> for AxisDecoding {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::SignMagnitude => AxisDecoding::SignMagnitude,
            AxisArg::Unsigned => AxisDecoding::Unsigned,
        }
    }
}

impl Args {
    fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn options(&self) -> DissectOptions {
        DissectOptions {
            tokens: if self.strict {
                TokenMode::Strict
            } else {
                TokenMode::Permissive
            },
            axis: self.axis.into(),
        }
    }
}

fn dissect(args: &Args) -> Result<Summary, DissectError> {
    // Logs go to stderr so stdout only carries dissections.
    TermLogger::init(
        args.level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let dissector = Dissector::new(args.options());
    let stdout = io::stdout().lock();

    run_file(&dissector, &args.file, BufWriter::new(stdout))
}

fn main() -> ExitCode {
    let args = Args::parse();

    match dissect(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("techair-dissect: {err}");
            ExitCode::FAILURE
        }
    }
}
