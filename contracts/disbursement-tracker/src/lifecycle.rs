//! Disbursement status transitions.

use crate::types::DisbursementStatus;
use crate::DisbursementError;

/// Every `(from, to)` pair a disbursement may move along.
///
/// Anything not listed is rejected, which covers self-transitions, moves
/// back to `Scheduled`, skipped stages and moves out of terminal states.
pub const ALLOWED_TRANSITIONS: [(DisbursementStatus, DisbursementStatus); 4] = [
    (DisbursementStatus::Scheduled, DisbursementStatus::Released),
    (DisbursementStatus::Released, DisbursementStatus::Completed),
    (DisbursementStatus::Scheduled, DisbursementStatus::Cancelled),
    (DisbursementStatus::Released, DisbursementStatus::Cancelled),
];

pub fn can_transition(from: DisbursementStatus, to: DisbursementStatus) -> bool {
    ALLOWED_TRANSITIONS
        .iter()
        .any(|&(allowed_from, allowed_to)| allowed_from == from && allowed_to == to)
}

pub fn validate_transition(
    from: DisbursementStatus,
    to: DisbursementStatus,
) -> Result<(), DisbursementError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(DisbursementError::InvalidTransition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DisbursementStatus::*;

    const ALL: [DisbursementStatus; 4] = [Scheduled, Released, Completed, Cancelled];

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(can_transition(Scheduled, Released));
        assert!(can_transition(Released, Completed));
        assert!(can_transition(Scheduled, Cancelled));
        assert!(can_transition(Released, Cancelled));
    }

    #[test]
    fn test_skipping_released_rejected() {
        assert_eq!(
            validate_transition(Scheduled, Completed),
            Err(DisbursementError::InvalidTransition)
        );
    }

    #[test]
    fn test_nothing_returns_to_scheduled() {
        for from in ALL {
            assert!(!can_transition(from, Scheduled));
        }
    }

    #[test]
    fn test_self_transitions_rejected() {
        for status in ALL {
            assert_eq!(
                validate_transition(status, status),
                Err(DisbursementError::InvalidTransition)
            );
        }
    }

    #[test]
    fn test_terminal_statuses_have_no_exits() {
        for to in ALL {
            assert!(!can_transition(Completed, to));
            assert!(!can_transition(Cancelled, to));
        }
    }
}
