//! Dissects captured Tech-Air USB traffic.
//!
//! A capture is a text file with one record per line. Records start with a
//! direction tag, `R` for controller replies and `W` for host requests, then
//! a delimiter, then the frame as hex tokens:
//!
//! ```text
//! W: 00 02 80 71
//! R: 00 02 00 64 a0 0f
//! ```
//!
//! Every other line is ignored. [`run`] echoes the direction of each record
//! and writes the rendered [`Dissection`](protocol::Dissection) after it.

pub use techair_usb as protocol;

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, trace};
use thiserror::Error;

use techair_usb::{DecodeError, DecodeErrorKind, Dissector};

/// Length of the `R: ` / `W: ` prefix in front of every record.
pub const PREFIX_LEN: usize = 3;

#[derive(Error, Debug)]
pub enum DissectError {
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("Could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Which side of the link sent a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Sent by the controller.
    Read,
    /// Sent by the host.
    Write,
}

impl Direction {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'R' => Some(Self::Read),
            b'W' => Some(Self::Write),
            _ => None,
        }
    }

    /// Prefix echoed in front of each rendered record.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Read => "R: ",
            Self::Write => "W: ",
        }
    }
}

/// One protocol line of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub direction: Direction,
    /// The hex tokens, with the prefix and line ending removed.
    pub tokens: &'a str,
}

impl<'a> Record<'a> {
    /// Returns `None` for lines that are not protocol records.
    pub fn parse(line: &'a str) -> Option<Self> {
        let direction = Direction::from_tag(*line.as_bytes().first()?)?;
        let tokens = line
            .char_indices()
            .nth(PREFIX_LEN)
            .map_or("", |(start, _)| &line[start..]);

        Some(Self {
            direction,
            tokens: tokens.trim_end_matches(&['\r', '\n'][..]),
        })
    }
}

/// Totals for one pass over a capture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Protocol lines seen.
    pub records: usize,
    /// Records whose payload was interpreted.
    pub decoded: usize,
    /// Records that were skipped, failed their checksum or could not be interpreted.
    pub failed: usize,
}

/// Renders why a record could not be dissected at all.
fn write_rejection(output: &mut impl Write, err: &DecodeError) -> io::Result<()> {
    match err.kind() {
        DecodeErrorKind::EmptyFrame { len } => writeln!(output, "skipping empty frame (n={len})"),
        DecodeErrorKind::Checksum { value, expected } => writeln!(
            output,
            "crc16 invalid! found: 0x{value:04X}, expected: 0x{expected:04X}"
        ),
        kind => writeln!(output, "skipping record: {kind}"),
    }
}

/// Dissects every record read from `input` and writes the renderings to `output`.
///
/// Per-record problems are rendered in place and never stop the pass.
///
/// # Errors
///
/// Fails only when reading `input` or writing `output` fails.
pub fn run<R: BufRead, W: Write>(
    dissector: &Dissector,
    mut input: R,
    mut output: W,
) -> Result<Summary, DissectError> {
    let mut summary = Summary::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let Some(record) = Record::parse(&line) else {
            trace!("Skipping non-protocol line {line_no}.");
            continue;
        };
        summary.records += 1;

        output.write_all(record.direction.prefix().as_bytes())?;
        match dissector.dissect_line(record.tokens) {
            Ok(dissection) => {
                writeln!(output, "{dissection}")?;
                match &dissection.reading {
                    Ok(_) => summary.decoded += 1,
                    Err(err) => {
                        debug!("Line {line_no}: {err}");
                        summary.failed += 1;
                    }
                }
            }
            Err(err) => {
                debug!("Line {line_no}: {err}");
                write_rejection(&mut output, &err)?;
                summary.failed += 1;
            }
        }
    }

    output.flush()?;
    info!(
        "Dissected {} record(s): {} decoded, {} failed.",
        summary.records, summary.decoded, summary.failed
    );

    Ok(summary)
}

/// Opens the capture at `path` and [`run`]s over it.
pub fn run_file<W: Write>(
    dissector: &Dissector,
    path: impl AsRef<Path>,
    output: W,
) -> Result<Summary, DissectError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DissectError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Reading capture from {}.", path.display());

    run(dissector, BufReader::new(file), output)
}
