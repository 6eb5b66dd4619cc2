use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::*;

/// Scored results of a tile action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    SafeCheck,
    MineCheck,
    MineFlag,
    SafeFlag,
}

impl ScoreEvent {
    pub const fn for_check(hit_mine: bool) -> Self {
        if hit_mine { Self::MineCheck } else { Self::SafeCheck }
    }

    pub const fn for_flag(on_mine: bool) -> Self {
        if on_mine { Self::MineFlag } else { Self::SafeFlag }
    }

    pub const fn delta(self) -> Score {
        match self {
            Self::SafeCheck => 1,
            Self::MineCheck => -6,
            Self::MineFlag => 2,
            Self::SafeFlag => -2,
        }
    }
}

/// Cumulative score per identity, kept for the whole session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreTracker {
    ledger: HashMap<String, Score>,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the identity's score, starting from 0, and returns the new total.
    pub fn adjust(&mut self, identity: &str, delta: Score) -> Score {
        let total = self.ledger.entry_ref(identity).or_insert(0);
        *total = total.saturating_add(delta);
        *total
    }

    pub fn score(&self, identity: &str) -> Option<Score> {
        self.ledger.get(identity).copied()
    }

    /// Highest score first, ties broken by name.
    pub fn standings(&self) -> Vec<(String, Score)> {
        let mut standings: Vec<_> = self
            .ledger
            .iter()
            .map(|(identity, &score)| (identity.clone(), score))
            .collect();
        sort_standings(&mut standings);
        standings
    }

    pub fn to_map(&self) -> BTreeMap<String, Score> {
        self.ledger
            .iter()
            .map(|(identity, &score)| (identity.clone(), score))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}

/// Orders `(identity, score)` pairs highest score first, ties broken by name.
pub fn sort_standings<S: AsRef<str>>(standings: &mut [(S, Score)]) {
    standings.sort_by(|(a_name, a_score), (b_name, b_score)| {
        b_score
            .cmp(a_score)
            .then_with(|| a_name.as_ref().cmp(b_name.as_ref()))
    });
}
