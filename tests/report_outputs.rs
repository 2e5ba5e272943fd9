// tests/report_outputs.rs
// Report files and input collection against a temp directory.

use chrono::{TimeZone, Utc};
use job_copilot::input::{gather_inputs, InputError, InputSource, DEFAULT_JOB_FILE, DEFAULT_RESUME_FILE};
use job_copilot::report::{
    make_run_dir, write_outputs, InputStats, ScoreEnvelope, CHANGES_FILE, PACKET_FILE, SCORE_FILE,
    VERSION,
};
use job_copilot::{run_agent, SuggestedEdit};
use std::fs;
use std::io::{self, Cursor};

const RESUME: &str = "- I just resolved tickets very quickly for the helpdesk team\n\
                      - Maintained Windows laptops and Intune enrollment for staff";
const JOB: &str = "Helpdesk role: Python automation, Windows support, SLA tracking. \
                   Kindly pay via wire transfer for your laptop.";

#[test]
fn writes_three_files_that_parse_back() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2026, 10, 17, 8, 30, 0).unwrap();
    let run_dir = make_run_dir(dir.path(), ts).unwrap();
    assert!(run_dir.ends_with("run_20261017_083000"));
    assert!(run_dir.is_dir());

    let packet = run_agent(RESUME, JOB);
    let stats = [InputStats::new("resume", RESUME), InputStats::new("job", JOB)];
    let written = write_outputs(&packet, &run_dir, &stats).unwrap();
    assert_eq!(written.packet, run_dir.join(PACKET_FILE));
    assert_eq!(written.changes, run_dir.join(CHANGES_FILE));
    assert_eq!(written.score, run_dir.join(SCORE_FILE));

    let md = fs::read_to_string(&written.packet).unwrap();
    assert!(md.contains("## Match Scores"));
    assert!(md.contains("wire transfer, kindly"));
    assert!(md.contains("- **job**:"));

    let edits: Vec<SuggestedEdit> =
        serde_json::from_str(&fs::read_to_string(&written.changes).unwrap()).unwrap();
    assert_eq!(edits, packet.suggested_edits);
    assert!(!edits.is_empty());

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written.changes).unwrap()).unwrap();
    assert_eq!(raw[0]["target"], "bullet");

    let envelope: ScoreEnvelope =
        serde_json::from_str(&fs::read_to_string(&written.score).unwrap()).unwrap();
    assert_eq!(envelope.version, VERSION);
    let (got, want) = (&envelope.scores, &packet.match_scores);
    assert_eq!(got.overlap_keywords, want.overlap_keywords);
    assert_eq!(got.missing_keywords, want.missing_keywords);
    assert_eq!(got.red_flags, want.red_flags);
    assert!((got.keyword_coverage - want.keyword_coverage).abs() < 1e-9);
    assert!((got.confidence - want.confidence).abs() < 1e-9);
}

#[test]
fn rerun_in_same_second_reuses_folder() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let a = make_run_dir(dir.path(), ts).unwrap();
    let b = make_run_dir(dir.path(), ts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn file_inputs_are_read_and_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let resume = dir.path().join("r.txt");
    let job = dir.path().join("j.txt");
    fs::write(&resume, "\n  resume body  \n").unwrap();
    fs::write(&job, b"job \xFF body\n").unwrap();

    let src = InputSource::from_args(Some(resume), Some(job), None);
    let inputs = gather_inputs(&src, &mut io::empty(), &mut io::sink()).unwrap();
    assert_eq!(inputs.resume, "resume body");
    // invalid UTF-8 is replaced, not rejected
    assert_eq!(inputs.job, "job \u{FFFD} body");
}

#[test]
fn missing_input_file_is_named() {
    let dir = tempfile::tempdir().unwrap();
    let resume = dir.path().join("r.txt");
    fs::write(&resume, "resume").unwrap();
    let job = dir.path().join("missing_job.txt");

    let src = InputSource::from_args(Some(resume), Some(job.clone()), None);
    let err = gather_inputs(&src, &mut io::empty(), &mut io::sink()).unwrap_err();
    match err {
        InputError::MissingFile(p) => assert_eq!(p, job),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_paste_falls_back_to_default_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_RESUME_FILE), "saved resume\n").unwrap();
    fs::write(dir.path().join(DEFAULT_JOB_FILE), "saved job\n").unwrap();

    // resume pasted, job left empty
    let mut stdin = Cursor::new("pasted resume\n\n\n\n\n");
    let mut shown = Vec::new();
    let src = InputSource::Paste {
        fallback_dir: Some(dir.path().to_path_buf()),
    };
    let inputs = gather_inputs(&src, &mut stdin, &mut shown).unwrap();
    assert_eq!(inputs.resume, "pasted resume");
    assert_eq!(inputs.job, "saved job");

    let shown = String::from_utf8(shown).unwrap();
    assert!(shown.contains("Paste RESUME text now:"));
    assert!(shown.contains("Paste JOB POSTING text now:"));
}

#[test]
fn fallback_without_files_still_reports_missing_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let src = InputSource::Paste {
        fallback_dir: Some(dir.path().to_path_buf()),
    };
    let err = gather_inputs(&src, &mut io::empty(), &mut io::sink()).unwrap_err();
    assert!(matches!(err, InputError::MissingInputs));
}
