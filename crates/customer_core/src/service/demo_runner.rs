//! One-shot customer demo flow.
//!
//! # Responsibility
//! - Clear the customer collection, seed two customers and run the three
//!   demo lookups, logging every result.
//!
//! # Invariants
//! - Stages only move forward: `Start -> Cleared -> Seeded -> Queried -> Done`.
//! - A runner executes at most once.
//! - Repository failures abort the run at the stage reached so far.

use crate::model::customer::Customer;
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::document::{RepoError, RepoResult};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// `(first_name, last_name)` pairs inserted by the demo, in order.
pub const SEED_CUSTOMERS: [(&str, &str); 2] = [("Alice", "Smith"), ("Bob", "Smith")];
pub const LOOKUP_FIRST_NAME: &str = "Alice";
pub const LOOKUP_LAST_NAME: &str = "Smith";

const SECTION_RULE: &str = "-------------------------------";

pub type RunResult<T> = Result<T, RunError>;

/// Progress of a demo run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    Start,
    Cleared,
    Seeded,
    Queried,
    Done,
}

impl RunStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Cleared => "cleared",
            Self::Seeded => "seeded",
            Self::Queried => "queried",
            Self::Done => "done",
        }
    }
}

impl Display for RunStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum RunError {
    /// The runner already left `Start`.
    AlreadyRan(RunStage),
    Repo(RepoError),
}

impl Display for RunError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRan(stage) => {
                write!(f, "demo already ran; runner is at stage `{stage}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyRan(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for RunError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Results logged by a completed demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Seed customers as returned by the store, with ids.
    pub seeded: Vec<Customer>,
    pub all: Vec<Customer>,
    pub by_first_name: Option<Customer>,
    pub by_last_name: Vec<Customer>,
}

/// Sequences the demo against any customer repository.
pub struct DemoRunner<R: CustomerRepository> {
    repo: R,
    stage: RunStage,
}

impl<R: CustomerRepository> DemoRunner<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            stage: RunStage::Start,
        }
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Runs the demo once.
    ///
    /// # Errors
    /// - `AlreadyRan` when called on a runner that is past `Start`.
    /// - `Repo` with the first repository failure; no step is retried.
    pub fn run(&mut self) -> RunResult<RunReport> {
        if self.stage != RunStage::Start {
            return Err(RunError::AlreadyRan(self.stage));
        }

        let started_at = Instant::now();
        info!("event=demo_run module=service status=start");

        match self.run_stages() {
            Ok(report) => {
                info!(
                    "event=demo_run module=service status=ok duration_ms={} customers={}",
                    started_at.elapsed().as_millis(),
                    report.all.len()
                );
                Ok(report)
            }
            Err(err) => {
                error!(
                    "event=demo_run module=service status=error duration_ms={} stage={} error={}",
                    started_at.elapsed().as_millis(),
                    self.stage,
                    err
                );
                Err(err.into())
            }
        }
    }

    fn run_stages(&mut self) -> RepoResult<RunReport> {
        self.repo.delete_all()?;
        self.advance(RunStage::Cleared);

        let mut seeded = Vec::with_capacity(SEED_CUSTOMERS.len());
        for (first_name, last_name) in SEED_CUSTOMERS {
            seeded.push(self.repo.save(&Customer::new(first_name, last_name))?);
        }
        self.advance(RunStage::Seeded);

        debug!("Customers found with find_all():");
        debug!("{SECTION_RULE}");
        let all = self.repo.find_all()?;
        for customer in &all {
            debug!("{customer}");
        }

        debug!("Customer found with find_by_first_name('{LOOKUP_FIRST_NAME}'):");
        debug!("{SECTION_RULE}");
        let by_first_name = self.repo.find_by_first_name(LOOKUP_FIRST_NAME)?;
        match &by_first_name {
            Some(customer) => debug!("{customer}"),
            None => debug!("no customer found"),
        }

        debug!("Customers found with find_by_last_name('{LOOKUP_LAST_NAME}'):");
        debug!("{SECTION_RULE}");
        let by_last_name = self.repo.find_by_last_name(LOOKUP_LAST_NAME)?;
        for customer in &by_last_name {
            debug!("{customer}");
        }
        self.advance(RunStage::Queried);

        self.advance(RunStage::Done);
        Ok(RunReport {
            seeded,
            all,
            by_first_name,
            by_last_name,
        })
    }

    fn advance(&mut self, next: RunStage) {
        debug_assert!(next > self.stage, "stage must move forward");
        self.stage = next;
        info!("event=demo_stage module=service status=ok stage={next}");
    }
}
