// src/unlock.rs

use serde::{Deserialize, Serialize};

use crate::data::ProgressConfig;
use crate::error::{ensure_non_negative, CoreError, CoreResult};
use crate::model::{CourseGate, Level};

/// Umbral inclusivo: alcanzar justo los puntos requeridos ya desbloquea
pub fn is_unlocked(current_points: i64, required_points: i64) -> CoreResult<bool> {
    let current = ensure_non_negative("current_points", current_points)?;
    let required = ensure_non_negative("required_points", required_points)?;
    Ok(current >= required)
}

/// Puntos que faltan para llegar al umbral (0 si ya se alcanzó)
pub fn shortfall(current_points: i64, required_points: i64) -> CoreResult<i64> {
    let current = ensure_non_negative("current_points", current_points)?;
    let required = ensure_non_negative("required_points", required_points)?;
    Ok((required - current).max(0))
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockStatus {
    pub unlocked: bool,
    pub user_xp: i64,
    pub required_xp: i64,
    pub shortfall: i64,
}

impl UnlockStatus {
    fn evaluate(user_xp: i64, required_xp: i64) -> CoreResult<Self> {
        Ok(Self {
            unlocked: is_unlocked(user_xp, required_xp)?,
            user_xp,
            required_xp,
            shortfall: shortfall(user_xp, required_xp)?,
        })
    }
}

fn school_threshold(config: &ProgressConfig, school: &str) -> CoreResult<i64> {
    config
        .school(school)
        .map(|s| s.unlock_xp)
        .ok_or_else(|| CoreError::invalid(format!("unknown school {school:?}")))
}

pub fn school_status(
    config: &ProgressConfig,
    school: &str,
    user_xp: i64,
) -> CoreResult<UnlockStatus> {
    let required = school_threshold(config, school)?;
    let status = UnlockStatus::evaluate(user_xp, required)?;
    log::debug!("school {school}: unlocked={} ({user_xp}/{required})", status.unlocked);
    Ok(status)
}

/// Un curso se desbloquea si su escuela lo está y, salvo en escuelas gratis,
/// si además se alcanza el umbral propio del curso.
///
/// En escuelas gratis se informa `required_xp = 0`; si la escuela sigue bloqueada,
/// `unlocked` es falso y la carencia es la de la escuela.
pub fn course_status(
    config: &ProgressConfig,
    course: &CourseGate,
    user_xp: i64,
) -> CoreResult<UnlockStatus> {
    let school = school_status(config, &course.masterschool, user_xp)?;
    let course_xp = ensure_non_negative("xp_threshold", course.xp_threshold)?;

    let free = config.is_free_school(&course.masterschool);
    let required_xp = if free { 0 } else { course_xp };
    let own = UnlockStatus::evaluate(user_xp, required_xp)?;

    let status = UnlockStatus {
        unlocked: school.unlocked && own.unlocked,
        user_xp,
        required_xp,
        shortfall: school.shortfall.max(own.shortfall),
    };
    log::debug!(
        "course {} in {}: unlocked={}",
        course.course_id,
        course.masterschool,
        status.unlocked
    );
    Ok(status)
}

/// Nombres de las escuelas desbloqueadas, en orden de `order_index`
pub fn unlocked_schools(config: &ProgressConfig, user_xp: i64) -> CoreResult<Vec<String>> {
    let mut names = Vec::new();
    for school in &config.schools {
        if is_unlocked(user_xp, school.unlock_xp)? {
            names.push(school.name.clone());
        }
    }
    Ok(names)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPosition<'a> {
    pub current: Option<&'a Level>,
    pub next: Option<&'a Level>,
}

/// Nivel actual (el más alto cuyo umbral se alcanzó) y el siguiente.
/// Sin ningún nivel alcanzado se toma el primero como actual y el segundo como siguiente.
pub fn current_and_next_level(levels: &[Level], xp: i64) -> CoreResult<LevelPosition<'_>> {
    let xp = ensure_non_negative("xp", xp)?;
    let mut sorted: Vec<&Level> = levels.iter().collect();
    sorted.sort_by_key(|l| l.level_number);

    let reached = sorted.iter().rposition(|l| xp >= l.xp_threshold);
    let position = match reached {
        Some(idx) => LevelPosition {
            current: Some(sorted[idx]),
            next: sorted.get(idx + 1).copied(),
        },
        None => LevelPosition {
            current: sorted.first().copied(),
            next: sorted.get(1).copied(),
        },
    };
    Ok(position)
}
