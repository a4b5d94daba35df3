//! Valuation run lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use fairval_core::types::{Currency, Date};
use fairval_instruments::ProjectionOverrides;

use crate::error::EngineError;

/// Unique identifier of a valuation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a fresh run id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scope of a valuation run.
///
/// Only security-level runs execute today; portfolio and fund rollups are
/// reserved and rejected at submission with `UnsupportedRunType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunType {
    /// Value a single security.
    Security,
    /// Aggregate a portfolio's holdings (reserved).
    Portfolio,
    /// Aggregate a fund across portfolios (reserved).
    Fund,
}

impl RunType {
    /// Returns the persisted run type string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RunType::Security => "security",
            RunType::Portfolio => "portfolio",
            RunType::Fund => "fund",
        }
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RunType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "security" => Ok(RunType::Security),
            "portfolio" => Ok(RunType::Portfolio),
            "fund" => Ok(RunType::Fund),
            _ => Err(EngineError::UnsupportedRunType {
                value: s.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a valuation run.
///
/// Transitions are monotonic: `Pending -> Running -> Completed | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunStatus {
    /// Submitted, not yet executing.
    #[default]
    Pending,
    /// Currently executing.
    Running,
    /// Target valued and results persisted.
    Completed,
    /// Execution aborted; see the run's error message.
    Failed,
}

impl RunStatus {
    /// Returns true for `Completed` or `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Options applying to a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Overrides the target's discount-spec curve binding when present.
    pub base_curve_name: Option<String>,
    /// Market date of the curve snapshot to resolve against. Defaults to
    /// the valuation date.
    pub curve_date: Option<Date>,
    /// Currency results are reported in. Defaults to the instrument
    /// currency.
    pub reporting_currency: Option<Currency>,
    /// Projection overrides applied to the target.
    pub overrides: ProjectionOverrides,
}

/// One valuation run: target, lifecycle state, progress and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationRun {
    id: RunId,
    run_type: RunType,
    target_id: String,
    valuation_date: Date,
    options: RunOptions,
    status: RunStatus,
    progress: u8,
    completed_count: u32,
    error: Option<String>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl ValuationRun {
    /// Creates a pending run with a fresh id.
    #[must_use]
    pub fn new(
        run_type: RunType,
        target_id: impl Into<String>,
        valuation_date: Date,
        options: RunOptions,
    ) -> Self {
        Self {
            id: RunId::new(),
            run_type,
            target_id: target_id.into(),
            valuation_date,
            options,
            status: RunStatus::Pending,
            progress: 0,
            completed_count: 0,
            error: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Returns the run id.
    #[must_use]
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Returns the run scope.
    #[must_use]
    pub fn run_type(&self) -> RunType {
        self.run_type
    }

    /// Returns the target security id.
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the run options.
    #[must_use]
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns completion progress, 0 to 100.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns the number of securities valued so far.
    #[must_use]
    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    /// Returns the failure message, if the run failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the market date curves are resolved on.
    #[must_use]
    pub fn curve_date(&self) -> Date {
        self.options.curve_date.unwrap_or(self.valuation_date)
    }

    /// Marks the run as running. Only meaningful from `Pending`.
    pub(crate) fn start(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Records one valued security.
    pub(crate) fn record_completed(&mut self, total: u32) {
        self.completed_count += 1;
        if total > 0 {
            self.progress = ((self.completed_count * 100) / total).min(100) as u8;
        }
    }

    /// Marks the run as completed.
    pub(crate) fn complete(&mut self) {
        self.status = RunStatus::Completed;
        self.progress = 100;
        self.completed_at = Some(Utc::now());
    }

    /// Marks the run as failed with a message.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = RunStatus::Failed;
        self.error = Some(message.into());
        self.completed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_type_parse() {
        assert_eq!("security".parse::<RunType>().unwrap(), RunType::Security);
        assert_eq!("FUND".parse::<RunType>().unwrap(), RunType::Fund);
        assert!(matches!(
            "snapshot".parse::<RunType>(),
            Err(EngineError::UnsupportedRunType { .. })
        ));
    }

    #[test]
    fn test_run_lifecycle() {
        let mut run = ValuationRun::new(
            RunType::Security,
            "SEC-1",
            Date::from_ymd(2025, 1, 1).unwrap(),
            RunOptions::default(),
        );
        assert_eq!(run.status(), RunStatus::Pending);
        assert_eq!(run.progress(), 0);

        run.start();
        assert_eq!(run.status(), RunStatus::Running);

        run.record_completed(1);
        assert_eq!(run.completed_count(), 1);
        assert_eq!(run.progress(), 100);

        run.complete();
        assert!(run.status().is_terminal());
    }

    #[test]
    fn test_failed_run_keeps_message() {
        let mut run = ValuationRun::new(
            RunType::Security,
            "SEC-1",
            Date::from_ymd(2025, 1, 1).unwrap(),
            RunOptions::default(),
        );
        run.start();
        run.fail("curve not found");
        assert_eq!(run.status(), RunStatus::Failed);
        assert_eq!(run.error(), Some("curve not found"));
    }

    #[test]
    fn test_curve_date_defaults_to_valuation_date() {
        let valuation_date = Date::from_ymd(2025, 1, 1).unwrap();
        let run = ValuationRun::new(
            RunType::Security,
            "SEC-1",
            valuation_date,
            RunOptions::default(),
        );
        assert_eq!(run.curve_date(), valuation_date);
    }
}
