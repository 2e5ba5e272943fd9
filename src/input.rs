// src/input.rs
//! Input adapter: produces the two raw strings the engine needs, either from
//! files or from pasted text.
//!
//! Paste mode reads until two consecutive blank lines (or EOF). Blank lines are
//! not kept. With a fallback directory, an empty paste falls back to
//! `resume.txt` / `job_posting.txt` in that directory when present.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_RESUME_FILE: &str = "resume.txt";
pub const DEFAULT_JOB_FILE: &str = "job_posting.txt";

/// Consecutive blank lines that end one paste.
const BLANK_LINES_TO_SUBMIT: usize = 2;

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("missing file: {0}")]
    MissingFile(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read pasted input: {0}")]
    Stdin(#[from] io::Error),
    #[error("Missing inputs. Either paste resume + job text, OR provide --resume and --job file paths.")]
    MissingInputs,
}

pub type Result<T> = std::result::Result<T, InputError>;

/// Where the two texts come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Files { resume: PathBuf, job: PathBuf },
    Paste { fallback_dir: Option<PathBuf> },
}

impl InputSource {
    /// Files only when both paths are given; otherwise paste mode.
    pub fn from_args(
        resume: Option<PathBuf>,
        job: Option<PathBuf>,
        fallback_dir: Option<PathBuf>,
    ) -> Self {
        match (resume, job) {
            (Some(resume), Some(job)) => InputSource::Files { resume, job },
            _ => InputSource::Paste { fallback_dir },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub resume: String,
    pub job: String,
}

/// Read a required text file (lossy UTF-8), trimmed.
pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(InputError::MissingFile(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}

/// Like `read_text`, but a missing file yields an empty string.
pub fn read_text_optional(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    read_text(path)
}

/// Print `prompt`, then collect non-blank lines until two blank lines in a row or EOF.
pub fn collect_pasted_input<R, W>(prompt: &str, reader: &mut R, writer: &mut W) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(writer, "{prompt}")?;
    writeln!(writer, "(Press Enter twice to submit)\n")?;
    writer.flush()?;

    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0usize;
    let mut buf = String::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run >= BLANK_LINES_TO_SUBMIT {
                break;
            }
        } else {
            blank_run = 0;
            lines.push(line.to_string());
        }
    }
    Ok(lines.join("\n").trim().to_string())
}

/// Resolve both texts and reject empty ones.
pub fn gather_inputs<R, W>(source: &InputSource, reader: &mut R, writer: &mut W) -> Result<Inputs>
where
    R: BufRead,
    W: Write,
{
    let (resume, job) = match source {
        InputSource::Files { resume, job } => (read_text(resume)?, read_text(job)?),
        InputSource::Paste { fallback_dir } => {
            let mut resume = collect_pasted_input("Paste RESUME text now:", reader, writer)?;
            let mut job = collect_pasted_input("Paste JOB POSTING text now:", reader, writer)?;
            if let Some(dir) = fallback_dir {
                if resume.is_empty() {
                    debug!(dir = %dir.display(), "empty resume paste, trying default file");
                    resume = read_text_optional(&dir.join(DEFAULT_RESUME_FILE))?;
                }
                if job.is_empty() {
                    debug!(dir = %dir.display(), "empty job paste, trying default file");
                    job = read_text_optional(&dir.join(DEFAULT_JOB_FILE))?;
                }
            }
            (resume, job)
        }
    };

    if resume.is_empty() || job.is_empty() {
        return Err(InputError::MissingInputs);
    }
    Ok(Inputs { resume, job })
}
