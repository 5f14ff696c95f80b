//! GLB loading for the decorative catalog.
//!
//! All catalog models are requested in one startup system; a polling system
//! records each outcome and publishes the loaded subset as soon as every
//! request has settled.

use bevy::asset::LoadState;
use bevy::prelude::*;

use scenery::catalog::DecorationCatalogDef;
use scenery::catalog_load::{LoadOutcome, LoadProgress, PendingCatalog};
use scenery::roadside::LoadedAsset;

/// Request the first scene of a GLB file.
pub fn load_scene(asset_server: &AssetServer, path: &str) -> Handle<Scene> {
    asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_string()))
}

/// Settled state of a scene request, or `None` while it is still in flight.
///
/// A scene present in `Assets<Scene>` counts as loaded even without an
/// `AssetServer` (scenes added directly by the host).
pub fn scene_load_outcome(
    handle: &Handle<Scene>,
    scenes: &Assets<Scene>,
    server: Option<&AssetServer>,
) -> Option<LoadOutcome> {
    if scenes.contains(handle) {
        return Some(LoadOutcome::Loaded);
    }
    match server?.get_load_state(handle) {
        Some(LoadState::Failed(err)) => Some(LoadOutcome::Failed(err.to_string())),
        _ => None,
    }
}

/// Sent once, when every catalog request has settled.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CatalogReady {
    pub loaded: usize,
    pub skipped: usize,
}

/// Decorative models available for placement.
///
/// Empty until the pre-load settles; placement simply does nothing until then.
#[derive(Resource, Default)]
pub struct DecorationCatalog {
    pending: Option<PendingCatalog<Handle<Scene>>>,
    assets: Vec<LoadedAsset<Handle<Scene>>>,
    skipped: Vec<String>,
    ready: bool,
}

impl DecorationCatalog {
    /// Start tracking a set of issued requests.
    pub fn begin(&mut self, pending: PendingCatalog<Handle<Scene>>) {
        self.pending = Some(pending);
        self.assets.clear();
        self.skipped.clear();
        self.ready = false;
    }

    pub fn assets(&self) -> &[LoadedAsset<Handle<Scene>>] {
        &self.assets
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn progress(&self) -> LoadProgress {
        match &self.pending {
            Some(pending) => pending.progress(),
            None => LoadProgress {
                loaded: self.assets.len(),
                failed: self.skipped.len(),
                pending: 0,
            },
        }
    }

    /// Record newly settled requests; returns the ready notice once all have
    /// settled.
    pub fn poll(
        &mut self,
        check_load: impl FnMut(&Handle<Scene>) -> Option<LoadOutcome>,
    ) -> Option<CatalogReady> {
        let pending = self.pending.as_mut()?;
        for (name, outcome) in pending.poll(check_load) {
            match outcome {
                LoadOutcome::Loaded => debug!("Catalog: loaded {name}"),
                LoadOutcome::Failed(reason) => {
                    warn!("Catalog: failed to load {name}, skipping it: {reason}")
                }
            }
        }
        if !pending.is_settled() {
            return None;
        }

        let settled = self.pending.take()?.finish();
        self.assets = settled.loaded;
        self.skipped = settled.skipped.into_iter().map(|(name, _)| name).collect();
        self.ready = true;
        Some(CatalogReady {
            loaded: self.assets.len(),
            skipped: self.skipped.len(),
        })
    }
}

/// Startup system: issue every catalog load at once.
pub fn start_catalog_load(
    asset_server: Res<AssetServer>,
    definition: Res<DecorationCatalogDef>,
    mut catalog: ResMut<DecorationCatalog>,
) {
    let requests = definition.entries.iter().map(|entry| {
        let path = definition.asset_path(entry);
        let handle = load_scene(&asset_server, &path);
        (entry.clone(), path, handle)
    });
    catalog.begin(PendingCatalog::new(requests));
    info!(
        "Catalog: requested {} decorative models",
        definition.entries.len()
    );
}

/// Poll outstanding catalog loads until all of them have settled.
pub fn poll_catalog_load(
    scenes: Res<Assets<Scene>>,
    server: Option<Res<AssetServer>>,
    mut catalog: ResMut<DecorationCatalog>,
    mut ready_events: EventWriter<CatalogReady>,
) {
    if !catalog.is_loading() {
        return;
    }
    let server = server.as_deref();
    if let Some(ready) = catalog.poll(|handle| scene_load_outcome(handle, &scenes, server)) {
        info!(
            "Catalog: {} decorative models ready ({} skipped)",
            ready.loaded, ready.skipped
        );
        ready_events.send(ready);
    }
}
