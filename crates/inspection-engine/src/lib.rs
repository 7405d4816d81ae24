//! Checklist branching and report aggregation for the inspection dashboard.
//!
//! Two independent components operate on snapshots supplied by the admin
//! server:
//!
//! - [`logic`]: decides which conditional checklist questions are shown for
//!   the current answers, and validates checklist definitions.
//! - [`reports`]: pivots per-period inspection counts into chart series and
//!   computes compliance rates.
//!
//! Both are pure and synchronous; nothing here performs I/O apart from
//! [`config::EngineConfig::from_file`].

pub mod config;
pub mod error;
pub mod logic;
pub mod notify;
pub mod reports;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use logic::{available_trigger_options, validate_checklist, ConditionalLogicEvaluator};
pub use notify::{CollectingNotifier, Notifier, TracingNotifier};
pub use reports::{
    compliance_rate, pivot_daily, pivot_quarterly, sum_across_reports, ReportAggregator,
};

use inspection_types::Question;

/// Entry point holding the engine configuration
#[derive(Debug, Clone, Default)]
pub struct InspectionEngine {
    config: EngineConfig,
}

impl InspectionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluator over one checklist category
    pub fn evaluator<'a>(&self, questions: &'a [Question]) -> ConditionalLogicEvaluator<'a> {
        ConditionalLogicEvaluator::new(questions, &self.config)
    }

    pub fn aggregator(&self) -> ReportAggregator {
        ReportAggregator::new(&self.config)
    }
}
