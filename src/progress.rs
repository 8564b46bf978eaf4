// src/progress.rs

use std::collections::BTreeSet;

use crate::error::{ensure_non_negative, CoreError, CoreResult};
use crate::model::{Chapter, CourseStatus, Lesson, LessonKey, Progress, XpSource, XpTransaction};
use crate::xp::XpProfile;

/// Porcentaje redondeado y estado de un curso a partir de sus lecciones completadas.
///
/// Las claves deben estar en el rango de la estructura (capítulos 1..=5, lecciones 1..=4);
/// `course_progress` ya filtra contra la estructura parseada.
pub fn progress(total_lessons: i64, completed: &BTreeSet<LessonKey>) -> CoreResult<Progress> {
    let total = ensure_non_negative("total_lessons", total_lessons)? as u64;
    if let Some(bad) = completed.iter().find(|k| !k.in_range()) {
        return Err(CoreError::invalid(format!(
            "lesson key {} out of range",
            bad.composite_id()
        )));
    }
    let done = completed.len() as u64;

    if total == 0 {
        if done > 0 {
            return Err(CoreError::invalid(format!(
                "{done} completed lessons for a course with no lessons"
            )));
        }
        return Ok(Progress {
            percentage: 0,
            status: CourseStatus::NotStarted,
            completed_lessons: 0,
            total_lessons: 0,
        });
    }
    if done > total {
        return Err(CoreError::invalid(format!(
            "{done} completed lessons exceed total of {total}"
        )));
    }

    // redondeo "half up" en enteros: round(100 * done / total); i128 para no desbordar
    let (done_w, total_w) = (i128::from(done), i128::from(total));
    let percentage = ((200 * done_w + total_w) / (2 * total_w)) as u8;
    let status = if done == 0 {
        CourseStatus::NotStarted
    } else if done == total {
        CourseStatus::Completed
    } else {
        CourseStatus::InProgress
    };

    log::debug!("progress {done}/{total} -> {percentage}% {}", status.as_str());
    Ok(Progress {
        percentage,
        status,
        completed_lessons: done,
        total_lessons: total,
    })
}

/// Progreso sobre una estructura ya parseada. Las marcas que no corresponden a ninguna
/// lección de la estructura (restos de una versión anterior del curso) no cuentan.
pub fn course_progress(
    chapters: &[Chapter],
    completed: &BTreeSet<LessonKey>,
) -> CoreResult<Progress> {
    let keys: BTreeSet<LessonKey> = chapters
        .iter()
        .flat_map(|c| c.lessons.iter())
        .map(Lesson::key)
        .collect();
    let matching: BTreeSet<LessonKey> = completed.intersection(&keys).copied().collect();

    let stale = completed.len() - matching.len();
    if stale > 0 {
        log::warn!("ignoring {stale} completion(s) with no matching lesson");
    }
    progress(keys.len() as i64, &matching)
}

/// Primera lección sin completar, en orden de capítulo y lección
pub fn next_lesson<'a>(
    chapters: &'a [Chapter],
    completed: &BTreeSet<LessonKey>,
) -> Option<&'a Lesson> {
    chapters
        .iter()
        .flat_map(|c| c.lessons.iter())
        .find(|l| !completed.contains(&l.key()))
}

/// Marca una lección de la estructura como completada y suma `xp_reward` la primera vez.
/// Repetir una lección ya completada no vuelve a dar XP.
pub fn complete_lesson(
    chapters: &[Chapter],
    completed: &mut BTreeSet<LessonKey>,
    key: LessonKey,
    xp_reward: i64,
    profile: &mut XpProfile,
) -> CoreResult<Option<XpTransaction>> {
    let lesson = chapters
        .iter()
        .flat_map(|c| c.lessons.iter())
        .find(|l| l.key() == key)
        .ok_or_else(|| CoreError::invalid(format!("lesson {} not in course", key.composite_id())))?;

    if completed.contains(&key) {
        return Ok(None);
    }
    let tx = profile.award(
        xp_reward,
        XpSource::LessonCompletion,
        format!("Completed lesson {}: {}", lesson.lesson_id, lesson.title),
    )?;
    completed.insert(key);
    Ok(Some(tx))
}
