//! Tracking of the concurrent catalog pre-load.
//!
//! Every catalog model is requested at once; `PendingCatalog` then records
//! each outcome as it settles. Once nothing is pending, `finish` splits the
//! catalog into the models that loaded and the ones that were skipped. A
//! partial catalog is a normal result, not an error.

use crate::catalog::DecorativeAssetEntry;
use crate::error::SceneryError;
use crate::roadside::LoadedAsset;

/// Final state of one asset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

#[derive(Debug)]
struct PendingSlot<H> {
    entry: DecorativeAssetEntry,
    path: String,
    handle: H,
    outcome: Option<LoadOutcome>,
}

/// Catalog requests that have been issued but not necessarily settled.
#[derive(Debug)]
pub struct PendingCatalog<H> {
    slots: Vec<PendingSlot<H>>,
}

/// Counts for progress reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub failed: usize,
    pub pending: usize,
}

/// A catalog whose every request has settled.
#[derive(Debug)]
pub struct SettledCatalog<H> {
    pub loaded: Vec<LoadedAsset<H>>,
    pub skipped: Vec<(String, SceneryError)>,
}

impl<H> PendingCatalog<H> {
    /// `requests` is `(entry, asset path, handle)` for every issued load.
    pub fn new(requests: impl IntoIterator<Item = (DecorativeAssetEntry, String, H)>) -> Self {
        Self {
            slots: requests
                .into_iter()
                .map(|(entry, path, handle)| PendingSlot {
                    entry,
                    path,
                    handle,
                    outcome: None,
                })
                .collect(),
        }
    }

    /// Ask `check_load` about every unsettled request and record what it reports.
    /// Returns the outcomes that settled during this call, by entry name.
    pub fn poll(
        &mut self,
        mut check_load: impl FnMut(&H) -> Option<LoadOutcome>,
    ) -> Vec<(String, LoadOutcome)> {
        let mut settled = Vec::new();
        for slot in self.slots.iter_mut().filter(|s| s.outcome.is_none()) {
            if let Some(outcome) = check_load(&slot.handle) {
                settled.push((slot.entry.name.clone(), outcome.clone()));
                slot.outcome = Some(outcome);
            }
        }
        settled
    }

    pub fn progress(&self) -> LoadProgress {
        let mut progress = LoadProgress::default();
        for slot in &self.slots {
            match slot.outcome {
                Some(LoadOutcome::Loaded) => progress.loaded += 1,
                Some(LoadOutcome::Failed(_)) => progress.failed += 1,
                None => progress.pending += 1,
            }
        }
        progress
    }

    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(|s| s.outcome.is_some())
    }

    /// Split into loaded and skipped entries, preserving catalog order.
    ///
    /// Anything still pending is reported as skipped.
    pub fn finish(self) -> SettledCatalog<H> {
        let mut loaded = Vec::new();
        let mut skipped = Vec::new();
        for slot in self.slots {
            match slot.outcome {
                Some(LoadOutcome::Loaded) => loaded.push(LoadedAsset {
                    entry: slot.entry,
                    template: slot.handle,
                }),
                Some(LoadOutcome::Failed(reason)) => skipped.push((
                    slot.entry.name,
                    SceneryError::AssetLoad {
                        path: slot.path,
                        reason,
                    },
                )),
                None => skipped.push((
                    slot.entry.name,
                    SceneryError::AssetLoad {
                        path: slot.path,
                        reason: "load never settled".to_string(),
                    },
                )),
            }
        }
        SettledCatalog { loaded, skipped }
    }
}
