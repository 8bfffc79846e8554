use crate::config::RegistryConfig;
use crate::stats::{AggregateStats, CodeStats, Stats};
use shortly_core::error::{RegistryError, Result};
use shortly_core::{Clock, ShortCode, Snapshot, Store, SystemClock, UrlRecord};
use shortly_generator::base62::DEFAULT_CODE_LENGTH;
use shortly_generator::{Base62Generator, Generator};
use shortly_storage::JsonFileStore;
use tracing::{debug, error, info, warn};
use url::Url;

/// The URL registry: an ordered mapping from short code to record, an id
/// counter, and the store they are persisted to.
///
/// Every mutating operation (create, delete, tracked resolve) rewrites the
/// whole document through the store. Persistence is best-effort: a failed
/// save is logged and the in-memory state is kept.
///
/// Mutations take `&mut self`; a host that shares a registry across
/// threads has to put it behind a lock.
#[derive(Debug)]
pub struct UrlRegistry<S, G = Base62Generator, C = SystemClock> {
    config: RegistryConfig,
    store: S,
    generator: G,
    clock: C,
    state: Snapshot,
}

impl UrlRegistry<JsonFileStore> {
    /// Opens the registry backed by the JSON document at `config.storage_path`.
    pub fn open(config: RegistryConfig) -> Self {
        let store = JsonFileStore::new(config.storage_path.clone());
        Self::with_store(config, store)
    }
}

impl<S: Store> UrlRegistry<S> {
    /// Creates a registry over `store` with the random generator and the system clock.
    pub fn with_store(mut config: RegistryConfig, store: S) -> Self {
        if config.code_length == 0 {
            warn!(
                fallback = DEFAULT_CODE_LENGTH,
                "generated code length must be positive, using the default"
            );
            config.code_length = DEFAULT_CODE_LENGTH;
        }
        let generator = Base62Generator::builder()
            .length(config.code_length)
            .build();
        Self::with_parts(config, store, generator, SystemClock)
    }
}

impl<S: Store, G: Generator, C: Clock> UrlRegistry<S, G, C> {
    /// Creates a registry from explicit parts and loads whatever `store` holds.
    pub fn with_parts(config: RegistryConfig, store: S, generator: G, clock: C) -> Self {
        let state = load_snapshot(&store);
        Self {
            config,
            store,
            generator,
            clock,
            state,
        }
    }

    /// Shortens `original_url`, optionally under a caller-chosen code.
    ///
    /// If the exact same URL string is already registered, the existing
    /// record is returned untouched and `custom_code` is ignored.
    pub fn create(&mut self, original_url: &str, custom_code: Option<&str>) -> Result<UrlRecord> {
        validate_url(original_url)?;

        if let Some(existing) = self.find_by_url(original_url) {
            debug!(short_code = %existing.short_code, "url already shortened");
            return Ok(existing.clone());
        }

        let short_code = match custom_code {
            Some(code) => {
                let code = ShortCode::new(code);
                if self.state.urls.contains_key(code.as_str()) {
                    return Err(RegistryError::CodeAlreadyExists(code.to_string()));
                }
                code
            }
            None => self.generate_code()?,
        };

        self.state.counter += 1;
        let record = UrlRecord::new(
            self.state.counter,
            original_url,
            short_code.clone(),
            self.clock.now(),
        );
        self.state.urls.insert(short_code, record.clone());
        self.persist();

        info!(
            id = %record.id,
            short_code = %record.short_code,
            original_url = %record.original_url,
            "created short url"
        );

        Ok(record)
    }

    /// Looks up the original URL for `code`.
    ///
    /// With `track_click` the click count and last access time are updated
    /// and persisted; without it this is a pure read.
    pub fn resolve(&mut self, code: &str, track_click: bool) -> Option<String> {
        if !track_click {
            return self.state.urls.get(code).map(|r| r.original_url.clone());
        }

        let now = self.clock.now();
        let record = self.state.urls.get_mut(code)?;
        record.record_click(now);
        let original_url = record.original_url.clone();
        debug!(short_code = code, clicks = record.click_count, "tracked click");

        self.persist();
        Some(original_url)
    }

    /// Stats for one code, or for the whole registry when `code` is `None`.
    ///
    /// Returns `None` only when a code is given and not registered.
    pub fn stats(&self, code: Option<&str>) -> Option<Stats> {
        match code {
            Some(code) => self.code_stats(code).map(Stats::Code),
            None => Some(Stats::Aggregate(self.summary())),
        }
    }

    pub fn code_stats(&self, code: &str) -> Option<CodeStats> {
        self.state.urls.get(code).map(CodeStats::from)
    }

    pub fn summary(&self) -> AggregateStats {
        AggregateStats::from_records(self.state.urls.values())
    }

    /// All records in insertion order.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &UrlRecord> {
        self.state.urls.values()
    }

    /// Removes `code`. Returns `false` if it was not registered.
    pub fn delete(&mut self, code: &str) -> bool {
        let Some(record) = self.state.urls.shift_remove(code) else {
            return false;
        };

        self.persist();
        info!(id = %record.id, short_code = code, "deleted short url");
        true
    }

    /// Composes the public short link for `code` without checking that it exists.
    pub fn full_short_url(&self, code: &str) -> String {
        ShortCode::new(code).to_url(&self.config.base_url)
    }

    pub fn get(&self, code: &str) -> Option<&UrlRecord> {
        self.state.urls.get(code)
    }

    /// Finds the record registered for exactly this URL string.
    pub fn find_by_url(&self, original_url: &str) -> Option<&UrlRecord> {
        self.state
            .urls
            .values()
            .find(|r| r.original_url == original_url)
    }

    pub fn len(&self) -> usize {
        self.state.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.urls.is_empty()
    }

    /// The last id counter value handed out.
    pub fn counter(&self) -> u64 {
        self.state.counter
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Draws codes until one is free, giving up after `max_generate_attempts`.
    fn generate_code(&self) -> Result<ShortCode> {
        let attempts = self.config.max_generate_attempts;

        for attempt in 1..=attempts {
            let code: ShortCode = self.generator.generate().into();
            if !self.state.urls.contains_key(code.as_str()) {
                return Ok(code);
            }
            debug!(short_code = %code, attempt, "generated short code collided");
        }

        error!(attempts, "could not generate a free short code");
        Err(RegistryError::GeneratorExhausted { attempts })
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.state) {
            error!(error = %err, "failed to persist registry, keeping in-memory state");
        }
    }
}

fn load_snapshot<S: Store>(store: &S) -> Snapshot {
    let mut snapshot = match store.load() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            debug!("no persisted registry, starting empty");
            return Snapshot::default();
        }
        Err(err) => {
            warn!(error = %err, "failed to load persisted registry, starting empty");
            return Snapshot::default();
        }
    };

    // Ids must stay unique even if the stored counter lags behind them.
    let highest = snapshot
        .urls
        .values()
        .filter_map(UrlRecord::sequence)
        .max()
        .unwrap_or(0);
    if highest > snapshot.counter {
        warn!(
            counter = snapshot.counter,
            highest, "stored counter is behind record ids, advancing it"
        );
        snapshot.counter = highest;
    }

    snapshot
}

/// Accepts absolute URLs with a scheme and a host.
fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(RegistryError::InvalidUrl("URL cannot be empty".to_string()));
    }

    let parsed = Url::parse(url).map_err(|e| RegistryError::InvalidUrl(format!("{url}: {e}")))?;

    if !parsed.has_host() {
        return Err(RegistryError::InvalidUrl(format!(
            "URL must have a scheme and host: {url}"
        )));
    }

    Ok(())
}
