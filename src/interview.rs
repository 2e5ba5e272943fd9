// src/interview.rs
//! Interview prep: a fixed question list plus talking points built from the
//! bank overlap/missing keywords.

use serde::{Deserialize, Serialize};

/// Keywords named per talking-point line.
pub const MAX_TALKING_POINT_KEYWORDS: usize = 10;

pub const QUESTIONS: [&str; 10] = [
    "Walk me through your background and how it fits this role.",
    "Tell me about a tough troubleshooting issue you solved\u{2014}what was your process?",
    "How do you prioritize multiple incoming requests or tickets?",
    "Describe a time you improved a process or automated something.",
    "How do you communicate with non-technical stakeholders during an incident?",
    "What\u{2019}s your approach to documenting work and building repeatable playbooks?",
    "Tell me about a time you made a mistake\u{2014}how did you handle it?",
    "How do you ensure accuracy and avoid assumptions when diagnosing problems?",
    "What tools or systems have you used to manage work (ticketing, docs, version control)?",
    "What would your first 30 days look like in this role?",
];

const STAR_POINT: &str =
    "Use STAR format for behavioral answers (Situation, Task, Action, Result).";
const HONESTY_POINT: &str =
    "Keep claims grounded\u{2014}no tool name-dropping unless you\u{2019}ve used it.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewPack {
    pub questions: Vec<String>,
    pub talking_points: Vec<String>,
}

pub fn build_interview_pack(overlap: &[String], missing: &[String]) -> InterviewPack {
    let mut talking_points = Vec::with_capacity(4);
    if !overlap.is_empty() {
        talking_points.push(format!(
            "Emphasize matching keywords you already have: {}.",
            head(overlap)
        ));
    }
    if !missing.is_empty() {
        talking_points.push(format!(
            "Prepare honest answers for missing areas: {} (frame as 'learning plan').",
            head(missing)
        ));
    }
    talking_points.push(STAR_POINT.to_string());
    talking_points.push(HONESTY_POINT.to_string());

    InterviewPack {
        questions: QUESTIONS.iter().map(|q| q.to_string()).collect(),
        talking_points,
    }
}

fn head(items: &[String]) -> String {
    items
        .iter()
        .take(MAX_TALKING_POINT_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
