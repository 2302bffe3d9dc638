use crate::models::Notification;
use crate::push::PushEvent;

/// Collection-side effect of a push event.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionDelta {
    /// Insert at the front, unless the id is already present.
    Prepend(Notification),
    /// Remove the matching id if present; absent ids are a no-op.
    Remove(u64),
    /// The loaded window can no longer be patched locally; refetch page 1.
    Refresh,
}

/// Unread-count-side effect of a push event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountAction {
    /// Bump locally; the arrival itself is the evidence.
    Increment,
    /// Whether the count changed cannot be inferred locally; ask the server.
    Reconcile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushEffects {
    pub collection: CollectionDelta,
    pub count: CountAction,
}

/// Classify a push event into its state delta. Pure; the controller
/// executes any I/O the effects call for.
pub fn reduce(event: PushEvent) -> PushEffects {
    match event {
        PushEvent::New(notification) => PushEffects {
            collection: CollectionDelta::Prepend(notification),
            count: CountAction::Increment,
        },
        PushEvent::BulkChange => PushEffects {
            collection: CollectionDelta::Refresh,
            count: CountAction::Reconcile,
        },
        PushEvent::Deleted(id) => PushEffects {
            collection: CollectionDelta::Remove(id),
            count: CountAction::Reconcile,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::sample_notification;

    #[test]
    fn new_notification_prepends_and_increments() {
        let effects = reduce(PushEvent::New(sample_notification(4, false)));
        assert!(matches!(effects.collection, CollectionDelta::Prepend(n) if n.id == 4));
        assert_eq!(effects.count, CountAction::Increment);
    }

    #[test]
    fn bulk_change_refreshes_and_reconciles() {
        let effects = reduce(PushEvent::BulkChange);
        assert_eq!(effects.collection, CollectionDelta::Refresh);
        assert_eq!(effects.count, CountAction::Reconcile);
    }

    #[test]
    fn delete_removes_and_reconciles() {
        // The deleted item may not be in the loaded window, and whether it
        // was unread is unknowable locally, so the count must reconcile.
        let effects = reduce(PushEvent::Deleted(17));
        assert_eq!(effects.collection, CollectionDelta::Remove(17));
        assert_eq!(effects.count, CountAction::Reconcile);
    }
}
