//! In-process holder of published leaderboards.
//!
//! Writers for one cohort key are serialized by a per-key mutex. A new
//! leaderboard is built off to the side from the previous member list and
//! published by swapping an `Arc`, so a reader holding a leaderboard always
//! sees one complete generation. Different cohort keys never contend.

use super::{build_leaderboard, CohortScore, Leaderboard};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug_span, info};

#[derive(Debug, Default)]
pub struct LeaderboardRegistry {
    boards: DashMap<String, Arc<Leaderboard>>,
    members: DashMap<String, Arc<Vec<CohortScore>>>,
    writers: DashMap<String, Arc<Mutex<()>>>,
}

impl LeaderboardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn writer_lock(&self, cohort_key: &str) -> Arc<Mutex<()>> {
        self.writers
            .entry(cohort_key.to_string())
            .or_default()
            .clone()
    }

    fn current_members(&self, cohort_key: &str) -> Vec<CohortScore> {
        self.members
            .get(cohort_key)
            .map(|m| m.as_ref().clone())
            .unwrap_or_default()
    }

    fn next_generation(&self, cohort_key: &str) -> u64 {
        self.boards
            .get(cohort_key)
            .map(|b| b.generation + 1)
            .unwrap_or(1)
    }

    /// Rebuild and publish. Caller holds the cohort's writer lock.
    fn publish(
        &self,
        cohort_key: &str,
        members: Vec<CohortScore>,
        now: DateTime<Utc>,
    ) -> Arc<Leaderboard> {
        let _span = debug_span!("recompute_cohort", cohort = cohort_key).entered();

        let generation = self.next_generation(cohort_key);
        let board = Arc::new(build_leaderboard(cohort_key, &members, now, generation));

        self.members
            .insert(cohort_key.to_string(), Arc::new(members));
        self.boards.insert(cohort_key.to_string(), Arc::clone(&board));

        info!(
            cohort = cohort_key,
            generation,
            size = board.statistics.size,
            "published leaderboard"
        );
        board
    }

    /// Replace the whole membership of a cohort.
    ///
    /// Members whose cohort key differs from `cohort_key` are re-keyed.
    pub fn replace_cohort(
        &self,
        cohort_key: &str,
        members: Vec<CohortScore>,
        now: DateTime<Utc>,
    ) -> Arc<Leaderboard> {
        let lock = self.writer_lock(cohort_key);
        let _guard = lock.lock();

        let members = members
            .into_iter()
            .map(|m| CohortScore {
                cohort_key: cohort_key.to_string(),
                ..m
            })
            .collect();
        self.publish(cohort_key, members, now)
    }

    /// Insert or update one person's score and recompute their cohort.
    pub fn update_score(&self, score: CohortScore, now: DateTime<Utc>) -> Arc<Leaderboard> {
        let cohort_key = score.cohort_key.clone();
        let lock = self.writer_lock(&cohort_key);
        let _guard = lock.lock();

        let mut members = self.current_members(&cohort_key);
        match members.iter_mut().find(|m| m.person_id == score.person_id) {
            Some(existing) => *existing = score,
            None => members.push(score),
        }
        self.publish(&cohort_key, members, now)
    }

    /// Remove a person from a cohort. Returns `None` if they were not in it.
    pub fn remove_member(
        &self,
        cohort_key: &str,
        person_id: &str,
        now: DateTime<Utc>,
    ) -> Option<Arc<Leaderboard>> {
        let lock = self.writer_lock(cohort_key);
        let _guard = lock.lock();

        let mut members = self.current_members(cohort_key);
        let before = members.len();
        members.retain(|m| m.person_id != person_id);
        if members.len() == before {
            return None;
        }
        Some(self.publish(cohort_key, members, now))
    }

    /// The latest published leaderboard for a cohort.
    pub fn leaderboard(&self, cohort_key: &str) -> Option<Arc<Leaderboard>> {
        self.boards.get(cohort_key).map(|b| Arc::clone(b.value()))
    }

    /// Published cohort keys, sorted.
    pub fn cohort_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.boards.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}
