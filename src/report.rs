// src/report.rs
//! Report writer: one run folder with `packet.md`, `changes.json` and `score.json`.
//!
//! JSON shapes:
//! - changes.json: `[{target, original, suggestion, rationale, needs_confirmation}, ...]`
//! - score.json:   `{"version": VERSION, "scores": {keyword_coverage, overlap_keywords,
//!                   missing_keywords, red_flags, confidence}}`

use crate::edits::SuggestedEdit;
use crate::engine::OutputPacket;
use crate::scoring::MatchScores;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const VERSION: &str = "v0.3.1 - Stable Scoring Patch";

pub const PACKET_FILE: &str = "packet.md";
pub const CHANGES_FILE: &str = "changes.json";
pub const SCORE_FILE: &str = "score.json";

const PREVIEW_CHARS: usize = 200;

/// Size and preview of one input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputStats {
    pub label: String,
    pub chars: usize,
    pub words: usize,
    pub preview: String,
}

impl InputStats {
    pub fn new(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
            preview: text.chars().take(PREVIEW_CHARS).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEnvelope {
    pub version: String,
    pub scores: MatchScores,
}

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub dir: PathBuf,
    pub packet: PathBuf,
    pub changes: PathBuf,
    pub score: PathBuf,
}

pub fn run_dir_name(ts: DateTime<Utc>) -> String {
    format!("run_{}", ts.format("%Y%m%d_%H%M%S"))
}

/// Create `<base>/run_YYYYMMDD_HHMMSS` (existing folder is fine).
pub fn make_run_dir(base: &Path, ts: DateTime<Utc>) -> anyhow::Result<PathBuf> {
    let dir = base.join(run_dir_name(ts));
    fs::create_dir_all(&dir).with_context(|| format!("creating run dir {}", dir.display()))?;
    Ok(dir)
}

fn percent(x: f64) -> String {
    format!("{:.0}%", x * 100.0)
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn render_markdown(packet: &OutputPacket, inputs: &[InputStats]) -> String {
    let mut md: Vec<String> = Vec::new();
    md.push("# Job Application Copilot Packet\n".into());
    md.push("## Role Fit Summary\n".into());
    md.push(format!("{}\n", packet.role_summary));

    let ms = &packet.match_scores;
    md.push("## Match Scores\n".into());
    md.push(format!("- Keyword coverage: **{}**\n", percent(ms.keyword_coverage)));
    md.push(format!("- Confidence: **{}**\n", percent(ms.confidence)));
    if !ms.red_flags.is_empty() {
        md.push(format!(
            "- Red flags detected in posting: **{}**\n",
            ms.red_flags.join(", ")
        ));
    }

    md.push("\n### Overlap Keywords\n".into());
    md.push(if ms.overlap_keywords.is_empty() {
        "_None detected from the keyword bank._".into()
    } else {
        ms.overlap_keywords.join(", ")
    });
    md.push("\n\n### Missing Keywords\n".into());
    md.push(if ms.missing_keywords.is_empty() {
        "_None \u{2014} strong keyword match._".into()
    } else {
        ms.missing_keywords.join(", ")
    });
    md.push("\n".into());

    md.push("\n## Suggested Resume Edits (Safe + Honest)\n".into());
    if packet.suggested_edits.is_empty() {
        md.push(
            "_No suggested edits generated (try adding bullets or expanding resume text)._".into(),
        );
    } else {
        for (i, e) in packet.suggested_edits.iter().enumerate() {
            md.push(format!("\n### Edit {}\n", i + 1));
            md.push(format!("**Original:** {}\n\n", e.original));
            md.push(format!("**Suggestion:** {}\n\n", e.suggestion));
            md.push(format!("**Rationale:** {}\n\n", e.rationale));
            if e.needs_confirmation {
                md.push(
                    "\u{26a0}\u{fe0f} **Needs confirmation**: this mentions a tool\u{2014}only keep if true.\n".into(),
                );
            }
        }
    }

    md.push("\n## Interview Prep\n".into());
    md.push("\n### Likely Questions\n".into());
    md.extend(packet.interview_questions.iter().map(|q| format!("- {q}")));

    md.push("\n\n### Talking Points\n".into());
    md.extend(packet.talking_points.iter().map(|tp| format!("- {tp}")));

    if !inputs.is_empty() {
        md.push("\n\n## Inputs\n".into());
        for s in inputs {
            md.push(format!(
                "- **{}**: {} chars, {} words. Preview: _{}_",
                s.label,
                s.chars,
                s.words,
                one_line(&s.preview)
            ));
        }
    }

    md.push(String::new());
    md.join("\n")
}

pub fn changes_json(edits: &[SuggestedEdit]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(edits).context("serializing suggested edits")
}

pub fn score_json(scores: &MatchScores) -> anyhow::Result<String> {
    let envelope = ScoreEnvelope {
        version: VERSION.to_string(),
        scores: scores.clone(),
    };
    serde_json::to_string_pretty(&envelope).context("serializing score envelope")
}

/// Write the three report files into `out_dir` (created if needed).
pub fn write_outputs(
    packet: &OutputPacket,
    out_dir: &Path,
    inputs: &[InputStats],
) -> anyhow::Result<WrittenReport> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output dir {}", out_dir.display()))?;

    let report = WrittenReport {
        dir: out_dir.to_path_buf(),
        packet: out_dir.join(PACKET_FILE),
        changes: out_dir.join(CHANGES_FILE),
        score: out_dir.join(SCORE_FILE),
    };

    write_file(&report.packet, &render_markdown(packet, inputs))?;
    write_file(&report.changes, &changes_json(&packet.suggested_edits)?)?;
    write_file(&report.score, &score_json(&packet.match_scores)?)?;
    Ok(report)
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
