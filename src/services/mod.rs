/// Business logic services layer
use crate::clients::MarsApi;
use crate::config::RefreshSettings;
use crate::domain::{PhotoRecord, RoverEntry, Snapshot};
use crate::errors::{AppError, AppResult};
use crate::repo::SnapshotStore;
use crate::utils::date_stamp;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Daily refresh of the gallery snapshot
///
/// The snapshot lives behind an async mutex that stays locked for the whole
/// check-and-refresh, so at most one upstream refresh runs per stale day and
/// requests queued behind it see the fresh date.
///
/// A queued request waits for the whole refresh: one manifest call per entry,
/// one latest-photos call or up to `sol_sample_attempts` sol draws per entry,
/// and one APOD call, each capped by the client timeout. With the default
/// roster and settings that is at most 27 calls.
pub struct GalleryService {
    api: Arc<dyn MarsApi>,
    store: Arc<dyn SnapshotStore>,
    settings: RefreshSettings,
    snapshot: Mutex<Snapshot>,
}

impl GalleryService {
    pub fn new(
        api: Arc<dyn MarsApi>,
        store: Arc<dyn SnapshotStore>,
        settings: RefreshSettings,
        snapshot: Snapshot,
    ) -> Self {
        Self {
            api,
            store,
            settings,
            snapshot: Mutex::new(snapshot),
        }
    }

    /// Build the service from whatever the store currently holds
    pub async fn load(
        api: Arc<dyn MarsApi>,
        store: Arc<dyn SnapshotStore>,
        settings: RefreshSettings,
    ) -> Self {
        let snapshot = store.load().await;
        Self::new(api, store, settings, snapshot)
    }

    /// Snapshot for today, refreshing it first if the cache is stale
    pub async fn ensure_fresh(&self) -> Snapshot {
        self.ensure_fresh_on(Local::now().date_naive()).await
    }

    pub async fn ensure_fresh_on(&self, today: NaiveDate) -> Snapshot {
        let stamp = date_stamp(today);
        let mut snapshot = self.snapshot.lock().await;

        if snapshot.date == stamp {
            debug!("Cache is current for {}", stamp);
            return snapshot.clone();
        }

        info!(
            "Cache dated {:?} is stale, refreshing for {}",
            snapshot.date, stamp
        );
        self.refresh(&mut snapshot, stamp).await;
        snapshot.clone()
    }

    async fn refresh(&self, snapshot: &mut Snapshot, stamp: String) {
        snapshot.ensure_roster();

        for entry in snapshot.rover_entries.iter_mut() {
            self.refresh_rover(entry).await;
        }

        match self.api.fetch_image_of_day().await {
            Ok(image) => snapshot.image_of_day = Some(image),
            Err(e) => warn!(code = e.code(), "Couldn't get APOD data: {}", e),
        }

        snapshot.date = stamp;
        match self.store.save(snapshot).await {
            Ok(()) => info!("Cache updated for {}", snapshot.date),
            Err(e) => error!(code = e.code(), "Couldn't save cache: {}", e),
        }
    }

    async fn refresh_rover(&self, entry: &mut RoverEntry) {
        match self.api.fetch_manifest(&entry.name).await {
            Ok(manifest) => entry.manifest = Some(manifest),
            Err(e) => warn!(
                code = e.code(),
                "Couldn't get manifest for {}: {}", entry.name, e
            ),
        }

        match self.fetch_rover_photos(entry).await {
            Ok(photos) => {
                info!("Fetched {} photos for {}", photos.len(), entry.name);
                entry.photos = photos;
            }
            Err(e) => warn!(
                code = e.code(),
                "Couldn't get data for {}: {}", entry.name, e
            ),
        }
    }

    async fn fetch_rover_photos(&self, entry: &RoverEntry) -> AppResult<Vec<PhotoRecord>> {
        if !entry.is_inactive() {
            return self.api.fetch_latest_photos(&entry.name).await;
        }

        let max_sol = entry
            .max_sol()
            .ok_or_else(|| AppError::MissingMaxSol(entry.name.clone()))?;
        self.sample_sols(&entry.name, max_sol).await
    }

    /// Draw random sols until one has enough photos or attempts run out
    async fn sample_sols(&self, rover: &str, max_sol: u32) -> AppResult<Vec<PhotoRecord>> {
        let attempts = self.settings.sol_sample_attempts.max(1);

        for attempt in 1..=attempts {
            let sol = random_sol(max_sol);
            match self.api.fetch_photos_for_sol(rover, sol).await {
                Ok(photos) if photos.len() >= self.settings.min_inactive_photos => {
                    debug!("{} sol {} has {} photos", rover, sol, photos.len());
                    return Ok(photos);
                }
                Ok(photos) => debug!(
                    "{} sol {} has only {} photos (attempt {}/{})",
                    rover,
                    sol,
                    photos.len(),
                    attempt,
                    attempts
                ),
                Err(e) => debug!(
                    "{} sol {} failed (attempt {}/{}): {}",
                    rover, sol, attempt, attempts, e
                ),
            }
        }

        Err(AppError::InsufficientData {
            rover: rover.to_string(),
            attempts,
        })
    }
}

/// Uniform sol in `[1, max_sol]`
fn random_sol(max_sol: u32) -> u32 {
    fastrand::u32(1..=max_sol.max(1))
}
