//! Score submission eligibility
//!
//! The leaderboard service itself lives outside this crate. These rules decide
//! whether a finished run may be handed to it, and shape the payload: a trimmed
//! display name plus the run's final score. Each run is submitted at most once
//! and submissions are spaced by a cooldown.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::FinishedRun;

/// Why a run cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("the run is still in progress")]
    RunNotFinished,
    #[error("display name must have at least {min} characters")]
    NameTooShort { min: usize },
    #[error("score {score} is below the minimum of {min}")]
    ScoreTooLow { score: u32, min: u32 },
    #[error("score {score} exceeds the maximum of {max}")]
    ScoreTooHigh { score: u32, max: u32 },
    #[error("run {run} was already submitted")]
    AlreadySubmitted { run: u32 },
    #[error("please wait {remaining_ms} ms before submitting again")]
    CoolingDown { remaining_ms: u64 },
}

/// Limits applied before a score leaves the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionRules {
    pub min_name_chars: usize,
    /// Longer names are truncated, not rejected
    pub max_name_chars: usize,
    pub min_score: u32,
    pub max_score: u32,
    /// Minimum spacing between two submissions (ms)
    pub cooldown_ms: u64,
}

impl Default for SubmissionRules {
    fn default() -> Self {
        Self {
            min_name_chars: 2,
            max_name_chars: 24,
            min_score: 11,
            max_score: 5000,
            cooldown_ms: 10_000,
        }
    }
}

/// Payload for the leaderboard service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub run: u32,
    pub name: String,
    pub score: u32,
}

/// Trim and truncate a raw display name
pub fn clean_name(raw: &str, rules: &SubmissionRules) -> Result<String, SubmissionError> {
    let name: String = raw.trim().chars().take(rules.max_name_chars).collect();
    // Truncation can leave trailing whitespace behind
    let name = name.trim_end().to_string();
    if name.chars().count() < rules.min_name_chars {
        return Err(SubmissionError::NameTooShort {
            min: rules.min_name_chars,
        });
    }
    Ok(name)
}

/// Tracks what was already sent during this session
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    pub rules: SubmissionRules,
    last_run: Option<u32>,
    last_sent_ms: Option<f64>,
}

impl SubmissionGate {
    pub fn new(rules: SubmissionRules) -> Self {
        Self {
            rules,
            last_run: None,
            last_sent_ms: None,
        }
    }

    /// Check a run and build its payload. Does not record anything.
    pub fn prepare(
        &self,
        run: Option<FinishedRun>,
        raw_name: &str,
        now_ms: f64,
    ) -> Result<ScoreSubmission, SubmissionError> {
        let run = run.ok_or(SubmissionError::RunNotFinished)?;

        if self.last_run == Some(run.run) {
            return Err(SubmissionError::AlreadySubmitted { run: run.run });
        }
        if let Some(last) = self.last_sent_ms {
            let elapsed = (now_ms - last).max(0.0);
            let cooldown = self.rules.cooldown_ms as f64;
            if elapsed < cooldown {
                return Err(SubmissionError::CoolingDown {
                    remaining_ms: (cooldown - elapsed).ceil() as u64,
                });
            }
        }

        let name = clean_name(raw_name, &self.rules)?;
        if run.score < self.rules.min_score {
            return Err(SubmissionError::ScoreTooLow {
                score: run.score,
                min: self.rules.min_score,
            });
        }
        if run.score > self.rules.max_score {
            return Err(SubmissionError::ScoreTooHigh {
                score: run.score,
                max: self.rules.max_score,
            });
        }

        Ok(ScoreSubmission {
            run: run.run,
            name,
            score: run.score,
        })
    }

    /// Remember a submission the host delivered successfully
    pub fn record(&mut self, submission: &ScoreSubmission, now_ms: f64) {
        self.last_run = Some(submission.run);
        self.last_sent_ms = Some(now_ms);
        log::info!(
            "Submitted run {} ({} pts) as {:?}",
            submission.run,
            submission.score,
            submission.name
        );
    }
}
