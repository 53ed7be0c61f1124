//! Operation Dispatcher - create/update/delete for one collection.
//!
//! Every mutation follows the same path:
//! 1. Validate at the write boundary (nothing invalid reaches the remote)
//! 2. Write through the table client
//! 3. On success, invalidate the cache and wait for the re-fetch
//! 4. Report exactly one outcome to the notifier
//!
//! A failed write leaves the cache untouched. Nothing is retried.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Notifier, Outcome, TableClient},
        services::collection_cache::CollectionCache,
    },
    domain::{DomainValidator as validator, Entity, EntityId, RawRecord},
    error::{FedError, FedResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    const fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Writes for one collection, paired with that collection's cache.
pub struct OperationDispatcher<T> {
    client: Arc<dyn TableClient>,
    cache: CollectionCache<T>,
    notifier: Arc<dyn Notifier>,
}

impl<T> Clone for OperationDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            cache: self.cache.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<T: Entity> OperationDispatcher<T> {
    pub fn new(
        client: Arc<dyn TableClient>,
        cache: CollectionCache<T>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            cache,
            notifier,
        }
    }

    /// Create a record from a draft; returns the stored entity.
    ///
    /// The remote assigns the identity, so a blank `id` in the draft is
    /// stripped before the insert.
    #[instrument(skip_all, fields(collection = %T::COLLECTION))]
    pub async fn create(&self, mut draft: RawRecord) -> FedResult<T> {
        let preview = match validator::validate_draft::<T>(&draft) {
            Ok(entity) => entity,
            Err(e) => return Err(self.fail(Mutation::Create, e.into())),
        };

        if !preview.id().is_assigned() {
            draft.remove("id");
        }

        let stored = match self.client.insert(T::COLLECTION, draft).await {
            Ok(stored) => stored,
            Err(e) => {
                return Err(self.fail(
                    Mutation::Create,
                    ApplicationError::remote(T::COLLECTION, e).into(),
                ));
            }
        };

        self.cache.invalidate().await;
        let entity = self.accept_stored(Mutation::Create, &stored)?;
        self.succeed(Mutation::Create, &entity);
        Ok(entity)
    }

    /// Create from a canonical entity (its id, if unassigned, is left to the remote).
    pub async fn create_entity(&self, entity: &T) -> FedResult<T> {
        let mut draft = entity.to_record();
        if !entity.id().is_assigned() {
            draft.remove("id");
        }
        self.create(draft).await
    }

    /// Apply a partial update to the record with this id.
    ///
    /// The patch is validated as merged over the cached entity, so a patch
    /// that only touches one side of an invariant is still checked.
    #[instrument(skip_all, fields(collection = %T::COLLECTION, id = %id))]
    pub async fn update(&self, id: &EntityId, patch: RawRecord) -> FedResult<T> {
        let current = self.cache.get(id);
        if let Err(e) = validator::validate_patch::<T>(id, current.as_ref(), &patch) {
            return Err(self.fail(Mutation::Update, e.into()));
        }

        let stored = match self.client.update(T::COLLECTION, id, patch).await {
            Ok(stored) => stored,
            Err(e) => {
                return Err(self.fail(
                    Mutation::Update,
                    ApplicationError::remote(T::COLLECTION, e).into(),
                ));
            }
        };

        // A failed refetch keeps the pre-write rows, so only trust the cache
        // when the fetch after the write succeeded.
        let refreshed = self.cache.invalidate().await;
        let cached = match refreshed.error {
            None => self.cache.get(id),
            Some(_) => None,
        };
        let entity = match cached {
            Some(entity) => entity,
            None => self.accept_stored(Mutation::Update, &with_id(stored, id))?,
        };
        self.succeed(Mutation::Update, &entity);
        Ok(entity)
    }

    /// Delete the record with this id.
    ///
    /// Deleting an id the remote no longer has is a `NotFound` failure and
    /// leaves the cache as it was.
    #[instrument(skip_all, fields(collection = %T::COLLECTION, id = %id))]
    pub async fn delete(&self, id: &EntityId) -> FedResult<()> {
        let label = self
            .cache
            .get(id)
            .map(|entity| entity.summary())
            .unwrap_or_else(|| id.to_string());

        if let Err(e) = self.client.delete(T::COLLECTION, id).await {
            return Err(self.fail(
                Mutation::Delete,
                ApplicationError::remote(T::COLLECTION, e).into(),
            ));
        }

        self.cache.invalidate().await;

        info!(id = %id, "record deleted");
        self.notifier.report(Outcome::success(
            format!("{} deleted", T::COLLECTION.label()),
            format!("{label} was deleted"),
        ));
        Ok(())
    }

    pub fn cache(&self) -> &CollectionCache<T> {
        &self.cache
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn accept_stored(&self, mutation: Mutation, stored: &RawRecord) -> FedResult<T> {
        T::normalize(stored).map_err(|e| {
            self.fail(
                mutation,
                ApplicationError::InvalidPayload {
                    collection: T::COLLECTION,
                    reason: e.to_string(),
                }
                .into(),
            )
        })
    }

    fn succeed(&self, mutation: Mutation, entity: &T) {
        info!(id = %entity.id(), "record {}", mutation.past_tense());
        self.notifier.report(Outcome::success(
            format!("{} {}", T::COLLECTION.label(), mutation.past_tense()),
            format!("{} was {}", entity.summary(), mutation.past_tense()),
        ));
    }

    /// Report a failed mutation and hand the error back to the caller.
    fn fail(&self, mutation: Mutation, error: FedError) -> FedError {
        warn!(error = %error, "{} failed", mutation.verb());
        self.notifier.report(Outcome::destructive(
            format!(
                "Could not {} {}",
                mutation.verb(),
                T::COLLECTION.label().to_lowercase()
            ),
            remote_message(&error),
        ));
        error
    }
}

/// The message shown to the user: the remote's own words when there are any.
fn remote_message(error: &FedError) -> String {
    error
        .remote()
        .map(|remote| remote.message.clone())
        .unwrap_or_else(|| error.to_string())
}

fn with_id(mut record: RawRecord, id: &EntityId) -> RawRecord {
    record
        .entry("id")
        .or_insert_with(|| Value::String(id.to_string()));
    record
}
