//! Generation fallback.
//!
//! Every read goes through [`EventResolver`]: the current tables are probed
//! first and the legacy tables only when the current ones have no row. A
//! failing generation is logged and skipped as long as another one can still
//! answer; deployments that dropped the legacy tables keep working, as do
//! reads while the legacy side is unreachable.

use std::future::Future;

use sea_orm::{DatabaseConnection, DbErr};

use crate::records::adapter::{CurrentSchema, LegacySchema, SchemaAdapter};
use crate::records::{EventBundle, EventRecord, SchemaGeneration};
use crate::retry::{RetryError, RetryPolicy, with_retry};

pub type ResolveError = RetryError<DbErr>;

pub struct EventResolver {
    db: DatabaseConnection,
    retry: RetryPolicy,
    current: CurrentSchema,
    legacy: LegacySchema,
}

impl EventResolver {
    pub fn new(db: DatabaseConnection, retry: RetryPolicy) -> Self {
        EventResolver {
            db,
            retry,
            current: CurrentSchema,
            legacy: LegacySchema,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Probe order: current generation first, legacy only as fallback.
    fn adapters(&self) -> [&dyn SchemaAdapter; 2] {
        [&self.current, &self.legacy]
    }

    /// Looks up an event owned by `user_id` in whichever generation has it.
    pub async fn resolve_event(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<EventRecord>, ResolveError> {
        self.probe("event", |adapter| {
            adapter.event_by_id(&self.db, event_id, user_id)
        })
        .await
    }

    /// The user's most recent event. A user with rows in the current tables
    /// is served from there even when their legacy rows are newer.
    pub async fn latest_event(&self, user_id: &str) -> Result<Option<EventRecord>, ResolveError> {
        self.probe("latest event", |adapter| {
            adapter.latest_event_for_user(&self.db, user_id)
        })
        .await
    }

    /// All events for the user across both generations, newest first. A
    /// generation that fails is skipped with a warning; the call only errors
    /// when no generation could answer.
    pub async fn list_events(&self, user_id: &str) -> Result<Vec<EventRecord>, ResolveError> {
        let mut merged = Vec::new();
        let mut failures = 0;
        let mut last_error = None;

        for adapter in self.adapters() {
            match with_retry(&self.retry, || adapter.events_for_user(&self.db, user_id)).await {
                Ok(mut events) => merged.append(&mut events),
                Err(error) => {
                    tracing::warn!(
                        generation = adapter.generation().as_str(),
                        error = %error,
                        "event list query failed"
                    );
                    failures += 1;
                    last_error = Some(error);
                }
            }
        }

        if let Some(error) = last_error
            && failures == self.adapters().len()
        {
            return Err(error);
        }

        merged.sort_by(|a, b| {
            b.event_date
                .cmp(&a.event_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(merged)
    }

    /// Fetches the satellite rows for a resolved event. Each satellite is
    /// probed across both generations independently, since children can have
    /// been written under a different generation than the event row. A
    /// satellite whose lookup fails in every generation degrades to empty
    /// defaults so callers can still render a partial view.
    pub async fn resolve_bundle(&self, event: EventRecord) -> EventBundle {
        let details = self
            .satellite("details", |adapter| {
                adapter.details_for_event(&self.db, &event.id)
            })
            .await;
        let expenses = self
            .satellite("expenses", |adapter| {
                adapter.expenses_for_event(&self.db, &event.id)
            })
            .await;
        let attendance = self
            .satellite("attendance", |adapter| {
                adapter.attendance_for_event(&self.db, &event.id)
            })
            .await;
        let appointments = self
            .satellite("appointments", |adapter| {
                adapter.appointments_for_event(&self.db, &event.id)
            })
            .await;
        let production = self
            .satellite("production", |adapter| {
                adapter.production_for_event(&self.db, &event.id)
            })
            .await;

        EventBundle {
            event,
            details,
            expenses,
            attendance,
            appointments,
            production,
        }
    }

    pub async fn bundle_for_event(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<EventBundle>, ResolveError> {
        match self.resolve_event(event_id, user_id).await? {
            Some(event) => Ok(Some(self.resolve_bundle(event).await)),
            None => Ok(None),
        }
    }

    async fn satellite<'a, T, F, Fut>(&'a self, lookup: &'static str, fetch: F) -> T
    where
        T: Default,
        F: FnMut(&'a dyn SchemaAdapter) -> Fut,
        Fut: Future<Output = Result<Option<T>, DbErr>> + 'a,
    {
        match self.probe(lookup, fetch).await {
            Ok(row) => row.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(lookup, error = %error, "satellite lookup failed, using defaults");
                T::default()
            }
        }
    }

    async fn probe<'a, T, F, Fut>(
        &'a self,
        lookup: &'static str,
        mut fetch: F,
    ) -> Result<Option<T>, ResolveError>
    where
        F: FnMut(&'a dyn SchemaAdapter) -> Fut,
        Fut: Future<Output = Result<Option<T>, DbErr>> + 'a,
    {
        let adapters = self.adapters();
        let last = adapters.len() - 1;

        for (index, adapter) in adapters.into_iter().enumerate() {
            match with_retry(&self.retry, || fetch(adapter)).await {
                Ok(Some(value)) => {
                    if adapter.generation() == SchemaGeneration::Legacy {
                        tracing::debug!(lookup, "served from legacy tables");
                    }
                    return Ok(Some(value));
                }
                Ok(None) => continue,
                Err(error) if index < last => {
                    tracing::warn!(
                        lookup,
                        generation = adapter.generation().as_str(),
                        error = %error,
                        "lookup failed, trying next generation"
                    );
                }
                Err(error) => return Err(error),
            }
        }

        Ok(None)
    }
}
