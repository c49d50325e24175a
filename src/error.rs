use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    BlockedByIncompleteDescendants,
    OutOfSequence,
    BlockedByIncompleteMilestones,
    TaskNotFound,
    GoalNotFound,
    MilestoneNotFound,
    AmbiguousRef,
    CycleDetected,
    PersistenceFailure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BlockedByIncompleteDescendants => "BLOCKED_BY_INCOMPLETE_DESCENDANTS",
            Self::OutOfSequence => "OUT_OF_SEQUENCE",
            Self::BlockedByIncompleteMilestones => "BLOCKED_BY_INCOMPLETE_MILESTONES",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::GoalNotFound => "GOAL_NOT_FOUND",
            Self::MilestoneNotFound => "MILESTONE_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::CycleDetected => "CYCLE_DETECTED",
            Self::PersistenceFailure => "PERSISTENCE_FAILURE",
        }
    }

    /// Gate rejections: the request was well-formed but the current state forbids it.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::BlockedByIncompleteDescendants
                | Self::OutOfSequence
                | Self::BlockedByIncompleteMilestones
        )
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TasquestError {
    pub code: ErrorCode,
    pub message: String,
}

impl TasquestError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn empty_title() -> Self {
        Self::validation("Title must not be empty")
    }

    pub fn blocked_by_descendants(title: &str) -> Self {
        Self::new(
            ErrorCode::BlockedByIncompleteDescendants,
            format!("Cannot complete '{title}': it still has incomplete subtasks"),
        )
    }

    pub fn out_of_sequence(required_title: &str) -> Self {
        Self::new(
            ErrorCode::OutOfSequence,
            format!("Complete '{required_title}' first"),
        )
    }

    pub fn blocked_by_milestones(title: &str) -> Self {
        Self::new(
            ErrorCode::BlockedByIncompleteMilestones,
            format!("Cannot complete goal '{title}': all milestones must be completed first"),
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn goal_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::GoalNotFound,
            format!("Goal not found: {reference}"),
        )
    }

    pub fn milestone_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::MilestoneNotFound,
            format!("Milestone not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn cycle_detected(task_id: &str, parent_id: &str) -> Self {
        Self::new(
            ErrorCode::CycleDetected,
            format!("Cannot move {task_id} under {parent_id}: parent links would form a cycle"),
        )
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceFailure, message)
    }
}

impl From<std::io::Error> for TasquestError {
    fn from(e: std::io::Error) -> Self {
        Self::persistence(e.to_string())
    }
}

impl From<serde_json::Error> for TasquestError {
    fn from(e: serde_json::Error) -> Self {
        Self::persistence(e.to_string())
    }
}

impl From<tempfile::PersistError> for TasquestError {
    fn from(e: tempfile::PersistError) -> Self {
        Self::persistence(e.error.to_string())
    }
}
