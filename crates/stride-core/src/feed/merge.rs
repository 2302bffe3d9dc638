use std::collections::HashMap;

use crate::models::Notification;

/// Where newly introduced ids land relative to the existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Full reset: the result is the incoming batch alone.
    Replace,
    /// Pagination continuation: new ids go after the existing items.
    Append,
    /// Live arrival: new ids go before the existing items.
    Prepend,
}

/// Merge an incoming batch into an existing server-ordered collection.
///
/// Every id appears exactly once in the result. Ids present on both sides
/// keep their existing position but take the incoming item's data (fresher).
/// The collection is never re-sorted; order is server-defined.
pub fn merge(
    existing: &[Notification],
    incoming: &[Notification],
    mode: MergeMode,
) -> Vec<Notification> {
    if incoming.is_empty() && mode != MergeMode::Replace {
        return existing.to_vec();
    }

    let base: &[Notification] = match mode {
        MergeMode::Replace => &[],
        MergeMode::Append | MergeMode::Prepend => existing,
    };

    let mut result: Vec<Notification> = base.to_vec();
    let index_by_id: HashMap<u64, usize> =
        result.iter().enumerate().map(|(i, n)| (n.id, i)).collect();

    let mut fresh: Vec<Notification> = Vec::new();
    for item in incoming {
        match index_by_id.get(&item.id) {
            Some(&at) => result[at] = item.clone(),
            None => {
                // Dedup within the batch itself as well.
                if let Some(pending) = fresh.iter_mut().find(|n| n.id == item.id) {
                    *pending = item.clone();
                } else {
                    fresh.push(item.clone());
                }
            }
        }
    }

    match mode {
        MergeMode::Replace | MergeMode::Append => {
            result.extend(fresh);
            result
        }
        MergeMode::Prepend => {
            fresh.extend(result);
            fresh
        }
    }
}
