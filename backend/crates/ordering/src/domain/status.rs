//! Order status state machine
//!
//! `PLACED → ACCEPTED → PREPARING → READY → SERVED`, with `CANCELLED`
//! reachable from any non-terminal state. Staff may skip ahead (a placed
//! order can go straight to PREPARING) but never move backwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Accepted,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Placed,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
    ];

    /// Statuses a table's "current order" can be in.
    pub const OPEN: [OrderStatus; 4] = [
        OrderStatus::Placed,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Served => "SERVED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Targets of the generic status action. ACCEPTED needs an ETA and has
    /// its own action.
    #[inline]
    pub const fn is_staff_settable(&self) -> bool {
        matches!(
            self,
            OrderStatus::Preparing | OrderStatus::Ready | OrderStatus::Served | OrderStatus::Cancelled
        )
    }

    /// Legal `self → to` moves. `SERVED → SERVED` is a re-mark.
    pub const fn can_transition_to(&self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        match to {
            Placed => false,
            Accepted => matches!(self, Placed),
            Preparing => matches!(self, Placed | Accepted),
            Ready => matches!(self, Accepted | Preparing),
            Served => matches!(self, Accepted | Preparing | Ready | Served),
            Cancelled => !self.is_terminal(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::{self, *};

    #[test]
    fn test_transition_table() {
        let legal: &[(OrderStatus, &[OrderStatus])] = &[
            (Accepted, &[Placed]),
            (Preparing, &[Placed, Accepted]),
            (Ready, &[Accepted, Preparing]),
            (Served, &[Accepted, Preparing, Ready, Served]),
            (Cancelled, &[Placed, Accepted, Preparing, Ready]),
            (Placed, &[]),
        ];

        for (to, froms) in legal {
            for from in OrderStatus::ALL {
                assert_eq!(
                    from.can_transition_to(*to),
                    froms.contains(&from),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_cannot_be_cancelled() {
        assert!(!Served.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Served));
    }

    #[test]
    fn test_parse() {
        assert_eq!("READY".parse::<OrderStatus>().unwrap(), Ready);
        assert_eq!(" SERVED ".parse::<OrderStatus>().unwrap(), Served);
        assert!("ready".parse::<OrderStatus>().is_err());
        assert!(!Accepted.is_staff_settable());
        assert!(Cancelled.is_staff_settable());
    }
}
