use crate::{
    db::{
        config::BatchInsertConfig,
        eligibility::EligibilityCache,
        populate::{PopulateReport, populate_cached},
        reorder::{ReorderReport, reorder},
    },
    error::InternalError,
    obs::sink::{self, MetricsEvent},
    traits::{PendingRecord, SqlConnection},
};
use tracing::{debug, warn};

///
/// FlushRequest
/// The pending new records handed to before-flush hooks.
///

#[derive(Debug)]
pub enum FlushRequest<'a, R> {
    /// Every pending new record of the flush.
    All(&'a mut [R]),
    /// An explicit subset of instances (deprecated flush variant).
    Subset(&'a mut [R]),
}

impl<R> FlushRequest<'_, R> {
    /// Shorter-lived request over the same records, for handing to one hook.
    pub fn reborrow(&mut self) -> FlushRequest<'_, R> {
        match self {
            Self::All(records) => FlushRequest::All(&mut **records),
            Self::Subset(records) => FlushRequest::Subset(&mut **records),
        }
    }

    #[must_use]
    pub const fn is_subset(&self) -> bool {
        matches!(self, Self::Subset(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::All(records) | Self::Subset(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// FlushOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FlushOutcome {
    Applied {
        populate: PopulateReport,
        reorder: ReorderReport,
    },
    /// The hook left every record untouched.
    Declined,
}

///
/// BeforeFlush
///
/// Callback the persistence layer runs before it emits any INSERT for a
/// flush, exactly once per flush, inside the flush transaction.
///

pub trait BeforeFlush<R, C: ?Sized> {
    fn before_flush(
        &mut self,
        conn: &mut C,
        request: FlushRequest<'_, R>,
    ) -> Result<FlushOutcome, InternalError>;
}

///
/// SessionHooks
/// Anything a before-flush hook can be registered on.
///

pub trait SessionHooks<R, C: ?Sized> {
    fn register_before_flush(&mut self, hook: Box<dyn BeforeFlush<R, C>>);
}

///
/// FlushHooks
///
/// Ordered before-flush registry a persistence session can embed.
/// Registration is not deduplicated.
///

pub struct FlushHooks<R, C: ?Sized> {
    hooks: Vec<Box<dyn BeforeFlush<R, C>>>,
}

impl<R, C: ?Sized> FlushHooks<R, C> {
    #[must_use]
    pub const fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register(&mut self, hook: impl BeforeFlush<R, C> + 'static) {
        self.hooks.push(Box::new(hook));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in registration order, stopping at the first error.
    pub fn run_before_flush(
        &mut self,
        conn: &mut C,
        mut request: FlushRequest<'_, R>,
    ) -> Result<Vec<FlushOutcome>, InternalError> {
        let mut outcomes = Vec::with_capacity(self.hooks.len());
        for hook in &mut self.hooks {
            outcomes.push(hook.before_flush(conn, request.reborrow())?);
        }

        Ok(outcomes)
    }
}

impl<R, C: ?Sized> Default for FlushHooks<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, C: ?Sized> SessionHooks<R, C> for FlushHooks<R, C> {
    fn register_before_flush(&mut self, hook: Box<dyn BeforeFlush<R, C>>) {
        self.hooks.push(hook);
    }
}

///
/// BatchInsertHook
///
/// Populates keys then rewrites insert order. Eligibility verdicts are
/// cached for the lifetime of the hook.
///

#[derive(Debug, Default)]
pub struct BatchInsertHook {
    config: BatchInsertConfig,
    cache: EligibilityCache,
}

impl BatchInsertHook {
    #[must_use]
    pub fn new(config: BatchInsertConfig) -> Self {
        Self {
            config,
            cache: EligibilityCache::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &BatchInsertConfig {
        &self.config
    }
}

impl<R, C> BeforeFlush<R, C> for BatchInsertHook
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
{
    fn before_flush(
        &mut self,
        conn: &mut C,
        request: FlushRequest<'_, R>,
    ) -> Result<FlushOutcome, InternalError> {
        match request {
            FlushRequest::All(records) => {
                debug!(records = records.len(), "batch insert hook running");
                let policy = self.config.policy();
                let populate = populate_cached(conn, records, policy, &mut self.cache)?;
                let reorder = reorder(records);

                Ok(FlushOutcome::Applied { populate, reorder })
            }
            FlushRequest::Subset(_) if self.config.reject_subset_flush => {
                Err(InternalError::unsupported_flush_mode())
            }
            FlushRequest::Subset(records) => {
                warn!(
                    records = records.len(),
                    "explicit-subset flush is not supported; keys and insert order left unchanged"
                );
                sink::record(MetricsEvent::FlushDeclined);

                Ok(FlushOutcome::Declined)
            }
        }
    }
}

/// Register the batch insert hook with the default configuration.
pub fn enable<R, C, S>(session: &mut S)
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
    S: SessionHooks<R, C> + ?Sized,
{
    enable_with(session, BatchInsertConfig::default());
}

/// Register the batch insert hook with an explicit configuration.
///
/// Registering twice runs the hook twice per flush.
pub fn enable_with<R, C, S>(session: &mut S, config: BatchInsertConfig)
where
    R: PendingRecord,
    C: SqlConnection + ?Sized,
    S: SessionHooks<R, C> + ?Sized,
{
    session.register_before_flush(Box::new(BatchInsertHook::new(config)));
}

///
/// TESTS
///
