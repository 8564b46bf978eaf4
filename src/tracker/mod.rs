use crate::data::Rewards;
use crate::error::{CoreError, CoreResult};
use crate::model::{CompletionRecord, ItemKind};
use crate::streak::current_streak;
use crate::xp::XpProfile;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Submódulos
pub mod completion;
pub mod grid;
pub mod stats;

pub use completion::{complete_and_award, CompletionOutcome};
pub use grid::{GridCell, MonthGrid};

/// Hábito o herramienta del toolbox que el usuario marca por días.
/// Un único componente parametrizado por `kind` sirve a ambas pestañas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrackedItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub xp_reward: i64,
    #[serde(default)]
    pub completions: BTreeSet<NaiveDate>,
}

impl TrackedItem {
    pub fn new(
        id: impl Into<String>,
        kind: ItemKind,
        title: impl Into<String>,
        xp_reward: i64,
    ) -> CoreResult<Self> {
        if xp_reward < 0 {
            return Err(CoreError::invalid(format!(
                "xp_reward must be >= 0, got {xp_reward}"
            )));
        }
        Ok(Self {
            id: id.into(),
            kind,
            title: title.into(),
            xp_reward,
            completions: BTreeSet::new(),
        })
    }

    /// Item con la recompensa por defecto de su tipo
    pub fn with_default_reward(
        id: impl Into<String>,
        kind: ItemKind,
        title: impl Into<String>,
        rewards: &Rewards,
    ) -> CoreResult<Self> {
        Self::new(id, kind, title, rewards.for_kind(kind))
    }

    /// Reconstruye los días completados a partir de los registros de este item;
    /// los registros de otros items se ignoran.
    pub fn load_records<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a CompletionRecord>,
    {
        self.completions = records
            .into_iter()
            .filter(|r| r.entity_id == self.id)
            .map(|r| r.date)
            .collect();
    }

    pub fn records(&self) -> Vec<CompletionRecord> {
        self.completions
            .iter()
            .map(|&date| CompletionRecord {
                entity_id: self.id.clone(),
                date,
            })
            .collect()
    }
}
