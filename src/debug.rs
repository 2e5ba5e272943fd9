// src/debug.rs
//! Dev-only run diagnostics.
//!
//! Enabled by COPILOT_DEV_LOG=1 in a dev environment (debug build, or
//! COPILOT_ENV in {local, development, dev}). Raw resume/job text is never
//! logged: inputs are identified by a short SHA-256 prefix.

use tracing::info;

pub const ENV_DEV_LOG: &str = "COPILOT_DEV_LOG";
pub const ENV_COPILOT_ENV: &str = "COPILOT_ENV";

pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var(ENV_COPILOT_ENV)
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

/// Summary of one pipeline run, logged under target `copilot`.
pub(crate) struct RunDiagnostics<'a> {
    pub resume_text: &'a str,
    pub job_text: &'a str,
    pub keyword_coverage: f64,
    pub confidence: f64,
    pub overlap: &'a [String],
    pub missing: &'a [String],
    pub red_flags: &'a [String],
    pub edits: usize,
}

pub(crate) fn dev_log_run(d: &RunDiagnostics<'_>) {
    if !dev_logging_enabled() {
        return;
    }
    let resume_id = anon_hash(d.resume_text);
    let job_id = anon_hash(d.job_text);
    info!(
        target: "copilot",
        %resume_id, %job_id,
        coverage = d.keyword_coverage,
        confidence = d.confidence,
        edits = d.edits,
        overlap = ?truncate_vec(d.overlap, 5),
        missing = ?truncate_vec(d.missing, 5),
        red_flags = ?d.red_flags,
        "run scored"
    );
}
