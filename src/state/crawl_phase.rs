/// Lifecycle phases of a crawl run
///
/// This module defines the phases a run moves through and the legal
/// transitions between them.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Run created, seed not yet submitted
    Idle,

    /// Seed submitted; fetches are being dispatched and drained
    Running,

    /// The page budget was spent
    BudgetReached,

    /// The frontier emptied before the budget was spent
    Exhausted,

    /// Completion has been reported
    Done,
}

impl CrawlPhase {
    /// Returns true if no further pages will be fetched in this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::BudgetReached | Self::Exhausted | Self::Done)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::BudgetReached)
                | (Self::Running, Self::Exhausted)
                | (Self::BudgetReached, Self::Done)
                | (Self::Exhausted, Self::Done)
        )
    }
}

impl From<CrawlOutcome> for CrawlPhase {
    fn from(outcome: CrawlOutcome) -> Self {
        match outcome {
            CrawlOutcome::BudgetReached => Self::BudgetReached,
            CrawlOutcome::Exhausted => Self::Exhausted,
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::BudgetReached => "budget reached",
            Self::Exhausted => "exhausted",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlOutcome {
    /// `pages_scanned` reached the page budget
    BudgetReached,

    /// No same-domain pages were left to fetch
    Exhausted,
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetReached => write!(f, "page budget reached"),
            Self::Exhausted => write!(f, "frontier exhausted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(CrawlPhase::Idle.can_transition_to(CrawlPhase::Running));
        assert!(CrawlPhase::Running.can_transition_to(CrawlPhase::BudgetReached));
        assert!(CrawlPhase::Running.can_transition_to(CrawlPhase::Exhausted));
        assert!(CrawlPhase::BudgetReached.can_transition_to(CrawlPhase::Done));
        assert!(CrawlPhase::Exhausted.can_transition_to(CrawlPhase::Done));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!CrawlPhase::Idle.can_transition_to(CrawlPhase::Done));
        assert!(!CrawlPhase::Running.can_transition_to(CrawlPhase::Idle));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Running));
        assert!(!CrawlPhase::Exhausted.can_transition_to(CrawlPhase::BudgetReached));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!CrawlPhase::Idle.is_terminal());
        assert!(!CrawlPhase::Running.is_terminal());
        assert!(CrawlPhase::BudgetReached.is_terminal());
        assert!(CrawlPhase::Exhausted.is_terminal());
        assert!(CrawlPhase::Done.is_terminal());
    }

    #[test]
    fn test_phase_from_outcome() {
        assert_eq!(
            CrawlPhase::from(CrawlOutcome::BudgetReached),
            CrawlPhase::BudgetReached
        );
        assert_eq!(
            CrawlPhase::from(CrawlOutcome::Exhausted),
            CrawlPhase::Exhausted
        );
    }
}
