use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    AlreadyCompleted,
    Completed { xp_earned: i64 },
}

impl TrackedItem {
    /// Marca el día. Un segundo marcado del mismo día no suma nada.
    pub fn complete(&mut self, date: NaiveDate) -> CompletionOutcome {
        if !self.completions.insert(date) {
            return CompletionOutcome::AlreadyCompleted;
        }
        CompletionOutcome::Completed {
            xp_earned: self.xp_reward,
        }
    }

    /// Desmarca el día; devuelve si había algo que quitar
    pub fn uncomplete(&mut self, date: NaiveDate) -> bool {
        self.completions.remove(&date)
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completions.contains(&date)
    }
}

/// Marca el día y, si es nuevo, suma la recompensa del item al perfil.
///
/// Si la suma de XP falla el marcado se deshace, para no dejar un día sin su XP.
pub fn complete_and_award(
    item: &mut TrackedItem,
    date: NaiveDate,
    profile: &mut XpProfile,
) -> CoreResult<CompletionOutcome> {
    let outcome = item.complete(date);
    let CompletionOutcome::Completed { xp_earned } = outcome else {
        log::debug!("{} already completed on {date}", item.id);
        return Ok(outcome);
    };

    let description = match item.kind {
        ItemKind::Habit => format!("Completed habit: {}", item.title),
        ItemKind::Tool => format!("Used toolbox item: {}", item.title),
    };
    if let Err(e) = profile.award(xp_earned, item.kind.xp_source(), description) {
        item.uncomplete(date);
        return Err(e);
    }
    Ok(outcome)
}
