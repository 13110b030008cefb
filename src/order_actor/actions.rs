use chrono::{DateTime, Utc};

/// Lifecycle actions for Order entities.
///
/// Each variant names the participant performing it so ownership can be checked
/// inside the actor, next to the status check.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Takes a pending order. Only the first courier to arrive succeeds.
    Accept { courier: String },
    /// The assigned courier has arrived and started loading.
    StartWork { courier: String },
    Complete { courier: String },
    /// The assigned courier hands the order back to the open pool.
    Release { courier: String },
    /// Sets the rating (1-5) and review. Repeating it overwrites the previous values.
    /// Out-of-range ratings are refused by the order, not by the caller.
    Rate {
        client: String,
        rating: u64,
        review: String,
    },
    Cancel { client: String },
    /// Cancels the order if it is still pending and was created before `cutoff`.
    Expire { cutoff: DateTime<Utc> },
}

impl OrderAction {
    /// Past participle used in transition errors ("cannot be accepted while ...").
    pub fn verb(&self) -> &'static str {
        match self {
            OrderAction::Accept { .. } => "accepted",
            OrderAction::StartWork { .. } => "started",
            OrderAction::Complete { .. } => "completed",
            OrderAction::Release { .. } => "released",
            OrderAction::Rate { .. } => "rated",
            OrderAction::Cancel { .. } => "cancelled",
            OrderAction::Expire { .. } => "expired",
        }
    }
}
