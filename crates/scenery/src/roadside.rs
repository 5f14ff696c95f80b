//! Roadside decoration lifecycle.
//!
//! `RoadsideManager` decides, once per game tick, whether a new decoration
//! should appear ahead of the player and which placed decorations have
//! fallen far enough behind to be retired. It never touches the scene
//! directly: every spawn and despawn goes through a `DecorationSink`, which
//! keeps the policy testable without an engine.

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::DecorativeAssetEntry;
use crate::config::RoadsideConfig;
use crate::placement::{compute_placement, Placement};

/// A loaded catalog entry. `template` is only ever cloned, never placed.
#[derive(Debug, Clone)]
pub struct LoadedAsset<T> {
    pub entry: DecorativeAssetEntry,
    pub template: T,
}

/// Scene-side effects requested by the manager.
pub trait DecorationSink {
    type Template;
    type Handle;

    /// Put a clone of `asset.template` into the scene at `placement`.
    fn place(&mut self, asset: &LoadedAsset<Self::Template>, placement: &Placement)
        -> Self::Handle;

    /// Take a previously placed decoration out of the scene.
    fn remove(&mut self, handle: Self::Handle);
}

/// A decoration currently in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance<H> {
    handle: H,
    retire_at: u64,
}

impl<H> PlacedInstance<H> {
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Progress after which this instance is removed. Fixed at creation.
    pub fn retire_at(&self) -> u64 {
        self.retire_at
    }
}

/// What a single `tick` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub placed: bool,
    pub retired: usize,
}

/// Placement/retirement state for roadside decorations.
#[derive(Debug)]
pub struct RoadsideManager<H> {
    last_placement_progress: u64,
    active: Vec<PlacedInstance<H>>,
}

impl<H> Default for RoadsideManager<H> {
    fn default() -> Self {
        Self {
            last_placement_progress: 0,
            active: Vec::new(),
        }
    }
}

impl<H> RoadsideManager<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[PlacedInstance<H>] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn last_placement_progress(&self) -> u64 {
        self.last_placement_progress
    }

    /// Advance the roadside to `progress`.
    ///
    /// Expired instances (`retire_at < progress`) are removed first, so a
    /// slot they free is available to the placement check of the same tick.
    /// Placement needs the interval to have elapsed, a non-empty catalog,
    /// and room under `max_active`.
    pub fn tick<T, S, R>(
        &mut self,
        progress: u64,
        road_position: Vec3,
        config: &RoadsideConfig,
        catalog: &[LoadedAsset<T>],
        rng: &mut R,
        sink: &mut S,
    ) -> TickReport
    where
        S: DecorationSink<Template = T, Handle = H>,
        R: Rng + ?Sized,
    {
        let retired = self.retire_expired(progress, sink);

        let due =
            progress.saturating_sub(self.last_placement_progress) >= config.placement_interval;
        if !due || catalog.is_empty() || self.active.len() >= config.max_active {
            return TickReport {
                placed: false,
                retired,
            };
        }

        let asset = &catalog[rng.gen_range(0..catalog.len())];
        let placement = compute_placement(&asset.entry, progress, road_position, config, rng);
        let handle = sink.place(asset, &placement);
        self.active.push(PlacedInstance {
            handle,
            retire_at: progress.saturating_add(config.retirement_window),
        });
        self.last_placement_progress = progress;

        TickReport {
            placed: true,
            retired,
        }
    }

    /// Remove every instance. Used when the host tears the scenery down.
    pub fn clear<S>(&mut self, sink: &mut S) -> usize
    where
        S: DecorationSink<Handle = H>,
    {
        let count = self.active.len();
        for instance in self.active.drain(..) {
            sink.remove(instance.handle);
        }
        self.last_placement_progress = 0;
        count
    }

    fn retire_expired<S>(&mut self, progress: u64, sink: &mut S) -> usize
    where
        S: DecorationSink<Handle = H>,
    {
        let before = self.active.len();
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|instance| instance.retire_at < progress);
        self.active = kept;
        for instance in expired {
            sink.remove(instance.handle);
        }
        before - self.active.len()
    }
}
