//! Import orchestration.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};

use super::{
    assemble_all, parse_archetypes, parse_decks_snapshot, ArchetypeTable, ImportError,
    SnapshotSource,
};
use crate::cards::CardLookup;
use crate::db::CatalogStore;
use crate::models::{
    ImportOptions, ImportStage, ImportSummary, NormalizedDeck, ADVISOR_TAG, ARCHETYPE_TAG,
};
use crate::notify::Notifier;

/// Title of every notification the importer emits.
pub const NOTIFY_TITLE: &str = "Importing decks";

/// The two snapshot documents an import reads.
#[derive(Debug, Clone)]
pub struct SnapshotEndpoints {
    pub decks_url: String,
    pub archetypes_url: String,
}

/// Runs imports against one catalog.
///
/// Imports and purges run on their own task and are serialized by an
/// internal lock. A run outlives a dropped caller and always ends in
/// `Done` or `Failed`.
pub struct CatalogImporter {
    source: Arc<dyn SnapshotSource>,
    cards: Arc<dyn CardLookup>,
    catalog: Arc<dyn CatalogStore>,
    notifier: Arc<dyn Notifier>,
    endpoints: SnapshotEndpoints,
    notify_timeout: Duration,
    stage: watch::Sender<ImportStage>,
    run_lock: Mutex<()>,
}

impl CatalogImporter {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        cards: Arc<dyn CardLookup>,
        catalog: Arc<dyn CatalogStore>,
        notifier: Arc<dyn Notifier>,
        endpoints: SnapshotEndpoints,
    ) -> Self {
        let (stage, _) = watch::channel(ImportStage::Idle);
        Self {
            source,
            cards,
            catalog,
            notifier,
            endpoints,
            notify_timeout: Duration::ZERO,
            stage,
            run_lock: Mutex::new(()),
        }
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    /// Stage of the current or most recent run.
    pub fn stage(&self) -> ImportStage {
        *self.stage.borrow()
    }

    /// Watch stage transitions. Intermediate stages may be coalesced.
    pub fn subscribe(&self) -> watch::Receiver<ImportStage> {
        self.stage.subscribe()
    }

    /// Delete every importer-owned deck from the catalog.
    pub async fn purge(self: &Arc<Self>) -> Result<u64, ImportError> {
        let importer = Arc::clone(self);
        tokio::spawn(async move {
            let _guard = importer.run_lock.lock().await;
            importer.delete_imported().await
        })
        .await?
    }

    /// Run the full pipeline: optional purge, fetch, resolve, assemble, persist.
    ///
    /// The first unusable deck aborts the rest of the batch. Decks added before
    /// it stay in the catalog and the flush is skipped.
    pub async fn import_all(
        self: &Arc<Self>,
        options: ImportOptions,
    ) -> Result<ImportSummary, ImportError> {
        let importer = Arc::clone(self);
        tokio::spawn(async move {
            let _guard = importer.run_lock.lock().await;
            importer.run_to_completion(options).await
        })
        .await?
    }

    async fn run_to_completion(&self, options: ImportOptions) -> Result<ImportSummary, ImportError> {
        let result = self.run(options).await;

        match &result {
            Ok(summary) => {
                self.set_stage(ImportStage::Done);
                tracing::info!(
                    "Imported {} of {} decks",
                    summary.imported,
                    summary.fetched
                );
            }
            Err(err) => {
                self.set_stage(ImportStage::Failed);
                tracing::warn!("Import failed: {}", err);
                if let ImportError::Aborted {
                    imported, fetched, ..
                } = err
                {
                    self.notify(&format!(
                        "Only {} of {} archetype decks could be imported",
                        imported, fetched
                    ));
                }
                self.notify(&format!("Import failed: {}", err));
            }
        }

        result
    }

    async fn run(&self, options: ImportOptions) -> Result<ImportSummary, ImportError> {
        let purged = if options.delete_previous {
            self.set_stage(ImportStage::Purging);
            Some(self.delete_imported().await?)
        } else {
            None
        };

        self.set_stage(ImportStage::Fetching);
        self.notify("Fetching decks from HSReplay");
        tracing::info!("Using url {}", self.endpoints.decks_url);

        let (decks_json, archetypes_json) = tokio::try_join!(
            self.source.fetch_text(&self.endpoints.decks_url),
            self.source.fetch_text(&self.endpoints.archetypes_url),
        )?;

        let entries = parse_decks_snapshot(&decks_json)?;
        let remote = parse_archetypes(&archetypes_json)?;
        let fetched = entries.len();
        self.notify(&format!("Found {}", fetched));

        self.set_stage(ImportStage::Resolving);
        let archetypes = ArchetypeTable::build(remote)?;
        tracing::debug!("Resolved {} archetypes", archetypes.len());

        self.set_stage(ImportStage::Assembling);
        let decks = assemble_all(
            &entries,
            &archetypes,
            self.cards.as_ref(),
            options.shorten_titles,
        );

        self.set_stage(ImportStage::Persisting);
        let imported = save_decks(self.catalog.as_ref(), decks, options.auto_archive).await?;

        Ok(ImportSummary {
            fetched,
            imported,
            purged,
        })
    }

    async fn delete_imported(&self) -> Result<u64, ImportError> {
        tracing::info!("Deleting all archetype decks");
        let deleted = self.catalog.delete_all_with_tag(ADVISOR_TAG).await?;
        tracing::info!("Deleted {} archetype decks", deleted);
        Ok(deleted)
    }

    fn set_stage(&self, stage: ImportStage) {
        tracing::debug!("Import stage: {:?}", stage);
        self.stage.send_replace(stage);
    }

    fn notify(&self, message: &str) {
        self.notifier
            .notify(NOTIFY_TITLE, message, self.notify_timeout);
    }
}

/// Adds decks in order and flushes once.
async fn save_decks(
    catalog: &dyn CatalogStore,
    decks: Vec<Result<NormalizedDeck, ImportError>>,
    auto_archive: bool,
) -> Result<usize, ImportError> {
    let fetched = decks.len();
    let mut imported = 0;

    for deck in decks {
        let aborted = |cause: ImportError| ImportError::Aborted {
            imported,
            fetched,
            cause: Box::new(cause),
        };

        let deck = deck.map_err(aborted)?;

        tracing::info!("Importing deck ({})", deck.name);
        catalog
            .add_deck(&deck.name, &deck, auto_archive, &[ARCHETYPE_TAG, ADVISOR_TAG])
            .await
            .map_err(|e| aborted(e.into()))?;
        imported += 1;
    }

    catalog.persist().await?;
    Ok(imported)
}
