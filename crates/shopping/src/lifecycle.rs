use std::collections::HashSet;

use strum::{AsRefStr, Display, EnumString};
use validator::Validate;
use weeklist_shared::{Error, Result};

use crate::{
    store::WeekStore,
    week::{ToggleInput, Week, WeekId, WeekSummary},
};

pub const DEFAULT_MAX_WEEKS: usize = 8;

/// A week about to be stored, with the stored weeks it may duplicate.
#[derive(Clone, Debug)]
pub enum Proposal {
    New(Week),
    Duplicate {
        week: Week,
        candidates: Vec<WeekSummary>,
    },
}

impl Proposal {
    pub fn week(&self) -> &Week {
        match self {
            Proposal::New(week) | Proposal::Duplicate { week, .. } => week,
        }
    }

    pub fn candidates(&self) -> &[WeekSummary] {
        match self {
            Proposal::New(_) => &[],
            Proposal::Duplicate { candidates, .. } => candidates,
        }
    }
}

/// The caller's answer when an import duplicates stored weeks.
#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Decision {
    /// Delete every duplicate, then store the new week.
    Replace,
    /// Store the new week next to the duplicates.
    KeepBoth,
}

/// What the retention check did after a store.
#[derive(Clone, Debug, PartialEq)]
pub enum Retention {
    WithinLimit,
    Evicted(WeekSummary),
    /// Over the limit but no other week is completed; nothing was deleted.
    LimitReached { count: usize, max: usize },
    /// The chosen week could not be deleted; the new week is stored.
    EvictionFailed { id: WeekId, reason: String },
    /// The stored weeks could not be read back; the new week is stored.
    Unchecked { reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoreOutcome {
    pub stored: WeekId,
    pub replaced: Vec<WeekId>,
    pub retention: Retention,
}

/// Single owner of the stored weeks: every store and delete goes through here
/// so duplicate handling and the retention limit hold.
pub struct ListManager<S> {
    store: S,
    max_weeks: usize,
}

impl<S: WeekStore> ListManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_weeks: DEFAULT_MAX_WEEKS,
        }
    }

    pub fn max_weeks(mut self, max_weeks: usize) -> Self {
        self.max_weeks = max_weeks;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn is_duplicate(stored: &Week, week: &Week) -> bool {
        stored.id == week.id
            || matches!((stored.source_week, week.source_week), (Some(a), Some(b)) if a == b)
            || stored.name.trim().to_lowercase() == week.name.trim().to_lowercase()
    }

    /// Compares a new week against the stored ones. Nothing is written.
    pub async fn propose(&self, week: Week) -> Result<Proposal> {
        let candidates = self
            .store
            .list_weeks()
            .await?
            .iter()
            .filter(|stored| Self::is_duplicate(stored, &week))
            .map(Week::summary)
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            return Ok(Proposal::New(week));
        }

        tracing::info!(
            week = %week.id,
            candidates = ?candidates.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            "duplicate weeks found"
        );

        Ok(Proposal::Duplicate { week, candidates })
    }

    /// Stores a proposal. A duplicate needs a [`Decision`]; without one
    /// nothing is written and `DecisionRequired` lists the candidates.
    #[tracing::instrument(skip_all, fields(week = %proposal.week().id))]
    pub async fn commit(
        &self,
        proposal: Proposal,
        decision: Option<Decision>,
    ) -> Result<StoreOutcome> {
        let (mut week, replaced) = match (proposal, decision) {
            (Proposal::New(week), _) => (week, vec![]),
            (Proposal::Duplicate { candidates, .. }, None) => {
                return Err(Error::DecisionRequired(
                    candidates.into_iter().map(|c| c.id.to_string()).collect(),
                ));
            }
            (Proposal::Duplicate { week, candidates }, Some(Decision::Replace)) => {
                let ids = candidates.into_iter().map(|c| c.id).collect::<Vec<_>>();
                self.delete_all(&ids, &week.id).await?;
                (week, ids)
            }
            (Proposal::Duplicate { week, .. }, Some(Decision::KeepBoth)) => (week, vec![]),
        };

        if matches!(decision, Some(Decision::KeepBoth)) {
            week.id = self.free_id(&week.id).await?;
        }

        if let Err(err) = self.store.store_week(&week).await {
            tracing::warn!(week = %week.id, error = %err, "store failed");

            if replaced.is_empty() {
                return Err(err);
            }

            return Err(Error::PartialReplace {
                deleted: replaced.iter().map(ToString::to_string).collect(),
                failed: week.id.to_string(),
                reason: err.to_string(),
            });
        }

        tracing::info!(week = %week.id, items = week.total(), replaced = replaced.len(), "week stored");

        let retention = self.enforce_retention(&week.id).await;

        Ok(StoreOutcome {
            stored: week.id,
            replaced,
            retention,
        })
    }

    /// Proposes and commits in one call.
    pub async fn import(&self, week: Week, decision: Option<Decision>) -> Result<StoreOutcome> {
        let proposal = self.propose(week).await?;
        self.commit(proposal, decision).await
    }

    async fn delete_all(&self, ids: &[WeekId], replacing: &WeekId) -> Result<()> {
        let mut deleted: Vec<String> = Vec::new();

        for id in ids {
            if let Err(err) = self.store.delete_week(id).await {
                tracing::warn!(week = %id, error = %err, "replace interrupted");

                return Err(Error::PartialReplace {
                    deleted,
                    failed: id.to_string(),
                    reason: format!("{err} (new week {replacing} not stored)"),
                });
            }

            deleted.push(id.to_string());
        }

        Ok(())
    }

    async fn free_id(&self, id: &WeekId) -> Result<WeekId> {
        let taken = self
            .store
            .list_weeks()
            .await?
            .into_iter()
            .map(|week| week.id)
            .collect::<HashSet<_>>();

        if !taken.contains(id) {
            return Ok(id.to_owned());
        }

        let mut n = 2;
        loop {
            let candidate = id.with_suffix(n);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Runs after a successful store. Evicts at most one week: the oldest
    /// completed one other than `stored`. Failures are reported in the
    /// result, never as an error, since `stored` is already written.
    async fn enforce_retention(&self, stored: &WeekId) -> Retention {
        let weeks = match self.store.list_weeks().await {
            Ok(weeks) => weeks,
            Err(err) => {
                tracing::warn!(week = %stored, error = %err, "retention check skipped");

                return Retention::Unchecked {
                    reason: err.to_string(),
                };
            }
        };
        let count = weeks.len();

        if count <= self.max_weeks {
            return Retention::WithinLimit;
        }

        let Some(oldest) = weeks
            .iter()
            .filter(|week| &week.id != stored && week.is_completed())
            .min_by_key(|week| week.created_at)
        else {
            tracing::warn!(count, max = self.max_weeks, "week limit reached, no completed week to evict");

            return Retention::LimitReached {
                count,
                max: self.max_weeks,
            };
        };

        if let Err(err) = self.store.delete_week(&oldest.id).await {
            tracing::warn!(week = %oldest.id, error = %err, "eviction failed");

            return Retention::EvictionFailed {
                id: oldest.id.to_owned(),
                reason: err.to_string(),
            };
        }

        tracing::info!(week = %oldest.id, count, max = self.max_weeks, "completed week evicted");

        Retention::Evicted(oldest.summary())
    }

    pub async fn get(&self, id: &WeekId) -> Result<Week> {
        match self.store.load_week(id).await? {
            Some(week) => Ok(week),
            None => weeklist_shared::not_found!("week {id}"),
        }
    }

    /// Stored weeks, newest first.
    pub async fn list(&self) -> Result<Vec<WeekSummary>> {
        let mut weeks = self
            .store
            .list_weeks()
            .await?
            .iter()
            .map(Week::summary)
            .collect::<Vec<_>>();
        weeks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(weeks)
    }

    /// Flips one item and returns its new `bought` value.
    pub async fn toggle_item(&self, id: &WeekId, input: ToggleInput) -> Result<bool> {
        input.validate()?;

        let mut week = self.get(id).await?;
        let bought = week.toggle(&input.item, input.list_type)?;
        self.store.store_week(&week).await?;

        tracing::debug!(week = %id, item = %input.item, bought, "item toggled");

        Ok(bought)
    }

    pub async fn reset(&self, id: &WeekId) -> Result<()> {
        let mut week = self.get(id).await?;
        week.reset();
        self.store.store_week(&week).await?;

        tracing::info!(week = %id, "week reset");

        Ok(())
    }

    pub async fn delete(&self, id: &WeekId) -> Result<()> {
        self.store.delete_week(id).await?;

        tracing::info!(week = %id, "week deleted");

        Ok(())
    }
}
