//! Reconciliation of freshly fetched topics with saved completion flags.
//!
//! The remote source returns a fixed-size list with stable positional
//! identity across calls but no durable per-item state of its own, so
//! completion must be carried forward locally every time the same shape of
//! data is fetched again. Matching is by re-sequenced id, which means the
//! merge breaks down if the source ever reorders items or changes page
//! size between calls; that convention is kept for fidelity with the
//! observed source behavior.

use std::collections::HashMap;

use crate::model::{Topic, TopicId};

/// Carry saved completion flags onto a freshly fetched list.
///
/// For each fetched topic, the saved list is consulted by id: a saved topic
/// with the same id contributes its completed flag, while title and content
/// always come from the fresh fetch. Ids absent from the saved list start
/// not-completed.
#[must_use]
pub fn carry_completed_flags(fetched: Vec<Topic>, saved: &[Topic]) -> Vec<Topic> {
    let completed_ids: HashMap<TopicId, bool> =
        saved.iter().map(|t| (t.id(), t.is_completed())).collect();

    fetched
        .into_iter()
        .map(|mut topic| {
            if completed_ids.get(&topic.id()).copied().unwrap_or(false) {
                topic.complete();
            }
            topic
        })
        .collect()
}
