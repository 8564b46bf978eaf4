// src/streak.rs

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};

use crate::error::{CoreError, CoreResult};

/// Días consecutivos con completado que terminan hoy o ayer.
///
/// Si hoy no está marcado se empieza a contar desde ayer; el primer hueco corta la racha.
pub fn current_streak(completed_dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = u32::from(completed_dates.contains(&today));
    let mut cursor = today.pred_opt();

    while let Some(day) = cursor {
        if !completed_dates.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }

    log::debug!("streak at {today}: {streak}");
    streak
}

/// Día de calendario UTC actual, para quien no tenga reloj propio
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Acepta "YYYY-MM-DD" o un timestamp ISO ("2024-01-22T09:00:00") y se queda con el día
pub fn parse_completion_date(raw: &str) -> CoreResult<NaiveDate> {
    let trimmed = raw.trim();
    let day = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| CoreError::invalid(format!("bad completion date {raw:?}: {e}")))
}

/// Convierte los valores crudos de `completed_at` en un conjunto de días
pub fn completion_dates<'a, I>(raw: I) -> CoreResult<BTreeSet<NaiveDate>>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter().map(parse_completion_date).collect()
}
