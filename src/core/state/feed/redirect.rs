use nostr_sdk::prelude::*;

/// Emits one redirect per divergence between the navigated item and the
/// canonical latest item reported for an author
#[derive(Debug, Clone, Default)]
pub struct RedirectGuard {
    requested: Option<EventId>,
}

impl RedirectGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id to redirect to, or `None` when nothing diverges or the
    /// redirect for this divergence was already requested
    pub fn check(&mut self, current: Option<EventId>, latest: Option<EventId>) -> Option<EventId> {
        match (current, latest) {
            (Some(current), Some(latest)) if current != latest => {
                if self.requested == Some(latest) {
                    return None;
                }
                self.requested = Some(latest);
                Some(latest)
            }
            _ => None,
        }
    }
}
