//! Cohort-relative ranking.
//!
//! A cohort is a group of people compared with each other, identified by a
//! cohort key. Ranking is competition style: equal scores share a rank and
//! the next distinct score skips ahead (`1, 2, 2, 4`). The percentile is the
//! share of the other, non-tied members a person outscored, so 100 is best
//! and tied members always share a percentile. A tie for first place counts
//! the tied peers as well: shared first place is never 100.

pub mod registry;

pub use registry::LeaderboardRegistry;

use crate::config::ParallelConfig;
use crate::core::score::{mean, round1, sanitize_score};
use crate::core::{Error, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A person's score within one cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortScore {
    pub person_id: String,
    pub score: f64,
    pub cohort_key: String,
}

impl CohortScore {
    pub fn new(person_id: impl Into<String>, score: f64, cohort_key: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            score,
            cohort_key: cohort_key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub person_id: String,
    pub cohort_key: String,
    pub score: f64,
    /// 1 is best
    pub rank: usize,
    /// 100 is best
    pub percentile: f64,
    pub cohort_size: usize,
    pub average_score: f64,
    pub median_score: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortStatistics {
    pub size: usize,
    pub average: f64,
    /// Lower median: `sorted[(len - 1) / 2]` over ascending scores. For an
    /// even-sized cohort this is the lower of the two middle elements, not
    /// their mean.
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Read-optimized view of one ranked cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub cohort_key: String,
    /// Rank ascending, ties by person id
    pub entries: Vec<RankingEntry>,
    pub statistics: CohortStatistics,
    /// Incremented on every republish of this cohort
    pub generation: u64,
    pub updated_at: DateTime<Utc>,
}

impl Leaderboard {
    pub fn entry(&self, person_id: &str) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.person_id == person_id)
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Summary statistics over sanitized scores. Empty input is all zero.
pub fn cohort_statistics(scores: &[f64]) -> CohortStatistics {
    if scores.is_empty() {
        return CohortStatistics::default();
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    CohortStatistics {
        size: sorted.len(),
        average: round1(mean(&sorted)),
        median: sorted[(sorted.len() - 1) / 2],
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}

/// Rank one cohort's members.
///
/// The cohort key of each member is carried through unchecked; use
/// [`rank_cohort_checked`] when the input may mix cohorts.
pub fn rank_cohort(members: &[CohortScore], updated_at: DateTime<Utc>) -> Vec<RankingEntry> {
    if members.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<(&CohortScore, f64)> = members
        .iter()
        .map(|m| (m, sanitize_score(m.score, "cohort score")))
        .collect();
    ordered.sort_by(|(a, sa), (b, sb)| {
        descending(*sa, *sb).then_with(|| a.person_id.cmp(&b.person_id))
    });

    let scores: Vec<f64> = ordered.iter().map(|(_, s)| *s).collect();
    let statistics = cohort_statistics(&scores);
    let size = ordered.len();

    let mut entries = Vec::with_capacity(size);
    let mut group_start = 0;
    while group_start < size {
        let score = scores[group_start];
        let group_end = scores[group_start..]
            .iter()
            .position(|s| *s != score)
            .map_or(size, |offset| group_start + offset);

        let above = group_start;
        let below = size - group_end;
        // tied peers only count against a group nobody outscores
        let tied_peers = if above == 0 { group_end - group_start - 1 } else { 0 };
        let contested = above + below + tied_peers;
        let percentile = if contested == 0 {
            100.0
        } else {
            round1(100.0 * below as f64 / contested as f64)
        };

        for (member, _) in &ordered[group_start..group_end] {
            entries.push(RankingEntry {
                person_id: member.person_id.clone(),
                cohort_key: member.cohort_key.clone(),
                score,
                rank: above + 1,
                percentile,
                cohort_size: size,
                average_score: statistics.average,
                median_score: statistics.median,
                updated_at,
            });
        }
        group_start = group_end;
    }

    entries
}

/// Rank a cohort after checking every member belongs to `cohort_key`.
pub fn rank_cohort_checked(
    cohort_key: &str,
    members: &[CohortScore],
    updated_at: DateTime<Utc>,
) -> Result<Vec<RankingEntry>> {
    if let Some(stray) = members.iter().find(|m| m.cohort_key != cohort_key) {
        return Err(Error::Validation(format!(
            "member {} belongs to cohort '{}', not '{}'",
            stray.person_id, stray.cohort_key, cohort_key
        )));
    }
    Ok(rank_cohort(members, updated_at))
}

/// Partition a mixed list by cohort key.
pub fn group_by_cohort(members: Vec<CohortScore>) -> BTreeMap<String, Vec<CohortScore>> {
    let mut groups: BTreeMap<String, Vec<CohortScore>> = BTreeMap::new();
    for member in members {
        groups.entry(member.cohort_key.clone()).or_default().push(member);
    }
    groups
}

/// Build the full leaderboard view for one cohort.
pub fn build_leaderboard(
    cohort_key: &str,
    members: &[CohortScore],
    updated_at: DateTime<Utc>,
    generation: u64,
) -> Leaderboard {
    let entries = rank_cohort(members, updated_at);
    let scores: Vec<f64> = entries.iter().map(|e| e.score).collect();
    Leaderboard {
        cohort_key: cohort_key.to_string(),
        statistics: cohort_statistics(&scores),
        entries,
        generation,
        updated_at,
    }
}

/// Rank every cohort in a mixed list, cohorts in parallel, ordered by key.
pub fn rank_all(
    members: Vec<CohortScore>,
    updated_at: DateTime<Utc>,
    parallel: &ParallelConfig,
) -> Vec<Leaderboard> {
    let groups: Vec<(String, Vec<CohortScore>)> = group_by_cohort(members).into_iter().collect();
    let build = |(key, members): &(String, Vec<CohortScore>)| {
        build_leaderboard(key, members, updated_at, 1)
    };

    if parallel.enabled && groups.len() > 1 {
        groups.par_iter().map(build).collect()
    } else {
        groups.iter().map(build).collect()
    }
}
