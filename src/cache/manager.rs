use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::content::{ContentType, Payload, StorageKind, SETTINGS_COLLECTION};
use crate::store::{DocumentStore, LocalStore, StoreError};

/// Content sections are considered stale after 24 hours.
/// Long enough to keep remote reads rare on a mostly-static site; the
/// remote marker check below covers edits made inside the window.
pub const SECTION_TTL: Duration = Duration::hours(24);

/// The notice ticker refreshes the events feed every 10 minutes.
/// Notices are the one section where same-day edits matter.
pub const TICKER_TTL: Duration = Duration::minutes(10);

/// Maximum notices shown in the ticker.
const TICKER_LIMIT: usize = 20;

/// Collection holding the per-type "last updated" markers maintained by
/// the admin panel.
const MARKER_COLLECTION: &str = "cache";

/// Mediates between the remote document store and local key-value
/// storage. Each content type owns a disjoint pair of local keys, so
/// concurrent loads of different types never contend.
pub struct CacheManager<S: DocumentStore, L: LocalStore> {
    remote: S,
    local: L,
}

impl<S: DocumentStore, L: LocalStore> CacheManager<S, L> {
    pub fn new(remote: S, local: L) -> Self {
        Self { remote, local }
    }

    pub fn remote(&self) -> &S {
        &self.remote
    }

    // ===== Decision engine =====

    /// Decide whether a cached entry fetched at `cached_at` is still
    /// usable at `now` under `ttl`.
    ///
    /// Within the TTL window, the remote marker for the type is
    /// consulted: a marker strictly newer than `cached_at` invalidates
    /// the entry so admin edits show up without waiting out the TTL. If
    /// the marker read fails, the decision falls back to the pure TTL
    /// comparison instead of failing the load.
    pub async fn should_use_cache(
        &self,
        content_type: ContentType,
        cached_at: DateTime<Utc>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> bool {
        if now - cached_at >= ttl {
            return false;
        }

        match self
            .remote
            .get_document(MARKER_COLLECTION, content_type.as_str())
            .await
        {
            Ok(Some(marker)) => {
                let last_updated = marker
                    .get("lastUpdated")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(i64::MIN);
                if last_updated > cached_at.timestamp_millis() {
                    info!(content_type = %content_type, "Cache invalidated by remote update marker");
                    return false;
                }
                true
            }
            Ok(None) => true,
            Err(e) => {
                debug!(content_type = %content_type, error = %e,
                    "Marker check failed, falling back to TTL comparison");
                now - cached_at < ttl
            }
        }
    }

    // ===== Content loader =====

    /// Load one content type under the standard section TTL.
    pub async fn load(&self, content_type: ContentType) -> Payload {
        self.load_with_ttl(content_type, SECTION_TTL).await
    }

    /// Load one content type: cached payload when the cache decision
    /// allows it, otherwise a fresh fetch. A fetch failure degrades to
    /// the type's fallback sentinel and leaves the cache untouched.
    pub async fn load_with_ttl(&self, content_type: ContentType, ttl: Duration) -> Payload {
        if let Some((payload, cached_at)) = self.read_entry(content_type) {
            if self
                .should_use_cache(content_type, cached_at, Utc::now(), ttl)
                .await
            {
                debug!(content_type = %content_type, "Serving from cache");
                return payload;
            }
        }

        match self.fetch(content_type).await {
            Ok(Some(payload)) => {
                self.write_entry(content_type, &payload, Utc::now());
                payload
            }
            // Settings document absent: no content configured. Not cached,
            // so the section picks the document up as soon as it appears.
            Ok(None) => {
                debug!(content_type = %content_type, "No remote content configured");
                Payload::fallback(content_type)
            }
            Err(e) => {
                warn!(content_type = %content_type, operation = "fetch", error = %e,
                    "Content fetch failed, using fallback");
                Payload::fallback(content_type)
            }
        }
    }

    /// Load every content type concurrently. One type failing never
    /// blocks the others; failures surface as fallback payloads.
    pub async fn load_all(&self) -> Vec<Payload> {
        join_all(ContentType::ALL.iter().map(|&t| self.load(t))).await
    }

    /// The notice ticker's view of the events feed: shorter TTL, active
    /// notices only, newest first.
    pub async fn load_ticker(&self) -> Vec<crate::models::Notice> {
        let payload = self.load_with_ttl(ContentType::Events, TICKER_TTL).await;
        let Payload::Events(notices) = payload else {
            return Vec::new();
        };

        let today = Utc::now().date_naive();
        let mut active: Vec<_> = notices.into_iter().filter(|n| n.is_active(today)).collect();
        active.sort_by(|a, b| b.date.cmp(&a.date));
        active.truncate(TICKER_LIMIT);
        active
    }

    // ===== Invalidation controller =====

    /// Drop every cache entry, then reload every content type. Safe to
    /// call on an already-empty cache. Returns the fresh payloads so the
    /// caller can re-render without a page reload.
    pub async fn invalidate_all(&self) -> Vec<Payload> {
        for content_type in ContentType::ALL {
            self.invalidate(content_type);
        }
        info!("Cache invalidated for all content types");
        self.load_all().await
    }

    /// Drop the cache entry for one content type.
    pub fn invalidate(&self, content_type: ContentType) {
        // Timestamp first: a payload without a timestamp is already
        // treated as absent, so no ordering leaves a trusted stale entry.
        if let Err(e) = self.local.remove(&content_type.time_key()) {
            warn!(content_type = %content_type, error = %e, "Failed to remove cache timestamp");
        }
        if let Err(e) = self.local.remove(&content_type.data_key()) {
            warn!(content_type = %content_type, error = %e, "Failed to remove cache payload");
        }
    }

    // ===== Cache entry storage =====

    /// Read the local cache entry for a type. A missing or unparseable
    /// timestamp makes the whole entry absent regardless of the payload
    /// key, covering a crash between the two writes.
    fn read_entry(&self, content_type: ContentType) -> Option<(Payload, DateTime<Utc>)> {
        let millis: i64 = self.local.get(&content_type.time_key())?.trim().parse().ok()?;
        let cached_at = DateTime::<Utc>::from_timestamp_millis(millis)?;

        let raw = self.local.get(&content_type.data_key())?;
        match serde_json::from_str::<Payload>(&raw) {
            Ok(payload) if payload.content_type() == content_type => Some((payload, cached_at)),
            Ok(_) => {
                warn!(content_type = %content_type, "Cached payload is for a different type");
                None
            }
            Err(e) => {
                warn!(content_type = %content_type, error = %e, "Unparseable cached payload");
                None
            }
        }
    }

    /// Write payload and timestamp together. Payload goes first so an
    /// interrupted write leaves an entry the reader already distrusts.
    fn write_entry(&self, content_type: ContentType, payload: &Payload, fetched_at: DateTime<Utc>) {
        let serialized = match serde_json::to_string(payload) {
            Ok(s) => s,
            Err(e) => {
                warn!(content_type = %content_type, error = %e, "Failed to serialize payload");
                return;
            }
        };
        if let Err(e) = self.local.set(&content_type.data_key(), &serialized) {
            warn!(content_type = %content_type, error = %e, "Failed to write cache payload");
            return;
        }
        let millis = fetched_at.timestamp_millis().to_string();
        if let Err(e) = self.local.set(&content_type.time_key(), &millis) {
            warn!(content_type = %content_type, error = %e, "Failed to write cache timestamp");
        }
    }

    // ===== Remote fetch =====

    /// Fetch fresh content. `Ok(None)` means a settings document that
    /// does not exist; an empty collection is `Ok(Some(...))` and gets
    /// cached like any other payload.
    async fn fetch(&self, content_type: ContentType) -> Result<Option<Payload>, StoreError> {
        debug!(content_type = %content_type, "Fetching fresh content");
        match content_type.storage_kind() {
            StorageKind::Collection => {
                let docs = self.remote.list_documents(content_type.as_str()).await?;
                Ok(Some(Payload::from_collection(content_type, docs)))
            }
            StorageKind::Settings => {
                let doc = self
                    .remote
                    .get_document(SETTINGS_COLLECTION, content_type.as_str())
                    .await?;
                Ok(doc.map(|d| Payload::from_settings(content_type, d)))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
