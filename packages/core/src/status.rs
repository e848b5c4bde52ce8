/// Presentation tone for a status label.
///
/// The backend does not enforce a status enum; records carry whatever
/// string the server returned. Classification is display-only and an
/// unrecognized label always falls back to `Neutral` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Active, Paid - green badge
    Positive,
    /// Offline, Inactive - gray badge
    Muted,
    /// Suspended, Not Pay, Overdue, Expired - red badge
    Negative,
    /// Pending, New, Open, In Progress, Paused - yellow badge
    Pending,
    /// Anything else
    Neutral,
}

impl StatusTone {
    pub fn classify(status: &str) -> StatusTone {
        match status.trim().to_lowercase().as_str() {
            "active" | "paid" => StatusTone::Positive,
            "offline" | "inactive" | "close" | "closed" => StatusTone::Muted,
            "suspended" | "not pay" | "overdue" | "expired" => StatusTone::Negative,
            "pending" | "new" | "open" | "in progress" | "paused" => StatusTone::Pending,
            _ => StatusTone::Neutral,
        }
    }
}
