use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// The five stages a repair order moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProcess,
    Shipped,
    Completed,
    Closed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::InProcess,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProcess => "in_process",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Closed => "closed",
        }
    }

    /// Position in the progression, used for forward-only checks.
    fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::InProcess => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Closed => 4,
        }
    }

    /// The status a scan proposes next. `closed` either stops the cycle or
    /// wraps back to `pending`, depending on policy.
    pub fn next(self, policy: WorkflowPolicy) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InProcess),
            OrderStatus::InProcess => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Completed),
            OrderStatus::Completed => Some(OrderStatus::Closed),
            OrderStatus::Closed => match policy.closed {
                ClosedBehavior::Terminal => None,
                ClosedBehavior::WrapToPending => Some(OrderStatus::Pending),
            },
        }
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in_process" => Ok(OrderStatus::InProcess),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "closed" => Ok(OrderStatus::Closed),
            other => Err(AppError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a scan of a `closed` order does. The legacy system wrapped back to
/// `pending`; treating `closed` as terminal is the default here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedBehavior {
    Terminal,
    WrapToPending,
}

/// Whether direct status edits may move backward in the progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    FreeForm,
    Monotonic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowPolicy {
    pub closed: ClosedBehavior,
    pub rule: TransitionRule,
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            closed: ClosedBehavior::Terminal,
            rule: TransitionRule::FreeForm,
        }
    }
}

impl WorkflowPolicy {
    /// Validate a requested status change. Re-applying the current status is
    /// always allowed so confirm buttons can be pressed twice safely.
    pub fn check_transition(&self, from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
        match self.rule {
            TransitionRule::FreeForm => Ok(()),
            TransitionRule::Monotonic => {
                let wrap_allowed = self.closed == ClosedBehavior::WrapToPending
                    && from == OrderStatus::Closed
                    && to == OrderStatus::Pending;
                if to == from || to.rank() > from.rank() || wrap_allowed {
                    Ok(())
                } else {
                    Err(AppError::InvalidStatus(format!(
                        "cannot move order from {from} back to {to}"
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_the_five_stages_in_order() {
        let policy = WorkflowPolicy::default();
        assert_eq!(
            OrderStatus::Pending.next(policy),
            Some(OrderStatus::InProcess)
        );
        assert_eq!(
            OrderStatus::InProcess.next(policy),
            Some(OrderStatus::Shipped)
        );
        assert_eq!(
            OrderStatus::Shipped.next(policy),
            Some(OrderStatus::Completed)
        );
        assert_eq!(
            OrderStatus::Completed.next(policy),
            Some(OrderStatus::Closed)
        );
    }

    #[test]
    fn closed_is_terminal_by_default() {
        assert_eq!(OrderStatus::Closed.next(WorkflowPolicy::default()), None);
    }

    #[test]
    fn closed_wraps_to_pending_under_legacy_policy() {
        let policy = WorkflowPolicy {
            closed: ClosedBehavior::WrapToPending,
            ..WorkflowPolicy::default()
        };
        assert_eq!(OrderStatus::Closed.next(policy), Some(OrderStatus::Pending));
    }

    #[test]
    fn parses_every_wire_value_and_rejects_the_rest() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().ok(), Some(status));
        }
        assert!("bogus_status".parse::<OrderStatus>().is_err());
        assert!("Pending".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn free_form_rule_allows_backward_moves() {
        let policy = WorkflowPolicy::default();
        assert!(
            policy
                .check_transition(OrderStatus::Completed, OrderStatus::Pending)
                .is_ok()
        );
    }

    #[test]
    fn monotonic_rule_rejects_backward_moves_but_keeps_idempotent_updates() {
        let policy = WorkflowPolicy {
            rule: TransitionRule::Monotonic,
            ..WorkflowPolicy::default()
        };
        assert!(
            policy
                .check_transition(OrderStatus::Pending, OrderStatus::Shipped)
                .is_ok()
        );
        assert!(
            policy
                .check_transition(OrderStatus::Shipped, OrderStatus::Shipped)
                .is_ok()
        );
        assert!(
            policy
                .check_transition(OrderStatus::Shipped, OrderStatus::Pending)
                .is_err()
        );
    }

    #[test]
    fn monotonic_rule_honors_the_wrap_exception() {
        let policy = WorkflowPolicy {
            closed: ClosedBehavior::WrapToPending,
            rule: TransitionRule::Monotonic,
        };
        assert!(
            policy
                .check_transition(OrderStatus::Closed, OrderStatus::Pending)
                .is_ok()
        );
        assert!(
            policy
                .check_transition(OrderStatus::Completed, OrderStatus::Pending)
                .is_err()
        );
    }
}
