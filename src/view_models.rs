// src/view_models.rs

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::data::ProgressConfig;
use crate::error::CoreResult;
use crate::model::{Chapter, CourseGate, CourseStatus, ItemKind, LessonKey};
use crate::progress::{course_progress, next_lesson};
use crate::tracker::TrackedItem;
use crate::unlock::{course_status, school_status};

#[derive(Clone, Debug)]
pub struct SchoolInfo {
    pub name: String,
    pub order_index: u32,
    pub unlocked: bool,
    pub required_xp: i64,
    pub shortfall: i64,
}

#[derive(Clone, Debug)]
pub struct CourseInfo {
    pub course_id: String,
    pub unlocked: bool,
    pub required_xp: i64,
    pub shortfall: i64,
    pub percentage: u8,
    pub status: CourseStatus,
    pub next_lesson: Option<LessonKey>,
}

#[derive(Clone, Debug)]
pub struct TrackedItemRow {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub xp_reward: i64,
    pub streak: u32,
    pub done_today: bool,
    pub completion_count: usize,
}

impl SchoolInfo {
    pub fn label(&self) -> String {
        if self.unlocked {
            format!("{} 🔓", self.name)
        } else {
            format!("{} 🔒 ({} XP to go)", self.name, self.shortfall)
        }
    }
}

impl CourseInfo {
    pub fn label(&self) -> String {
        match (self.unlocked, self.status) {
            (false, _) => format!("🔒 {} XP to go", self.shortfall),
            (true, CourseStatus::Completed) => "✅ Completed".to_string(),
            (true, CourseStatus::InProgress) => format!("▶ {}%", self.percentage),
            (true, CourseStatus::NotStarted) => "🔓 Start".to_string(),
        }
    }
}

impl TrackedItemRow {
    pub fn from_item(item: &TrackedItem, today: NaiveDate) -> Self {
        Self {
            id: item.id.clone(),
            kind: item.kind,
            title: item.title.clone(),
            xp_reward: item.xp_reward,
            streak: item.streak(today),
            done_today: item.is_completed_on(today),
            completion_count: item.completion_count(),
        }
    }

    pub fn label(&self) -> String {
        let check = if self.done_today { "✅" } else { "⬜" };
        format!("{check} {} 🔥{} +{} XP", self.title, self.streak, self.xp_reward)
    }
}

pub fn school_infos(config: &ProgressConfig, user_xp: i64) -> CoreResult<Vec<SchoolInfo>> {
    config
        .schools
        .iter()
        .map(|school| {
            let status = school_status(config, &school.name, user_xp)?;
            Ok(SchoolInfo {
                name: school.name.clone(),
                order_index: school.order_index,
                unlocked: status.unlocked,
                required_xp: status.required_xp,
                shortfall: status.shortfall,
            })
        })
        .collect()
}

pub fn course_info(
    config: &ProgressConfig,
    course: &CourseGate,
    chapters: &[Chapter],
    completed: &BTreeSet<LessonKey>,
    user_xp: i64,
) -> CoreResult<CourseInfo> {
    let gate = course_status(config, course, user_xp)?;
    let progress = course_progress(chapters, completed)?;
    Ok(CourseInfo {
        course_id: course.course_id.clone(),
        unlocked: gate.unlocked,
        required_xp: gate.required_xp,
        shortfall: gate.shortfall,
        percentage: progress.percentage,
        status: progress.status,
        next_lesson: next_lesson(chapters, completed).map(|l| l.key()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_thresholds_embedded;
    use crate::structure::{parse_structure, StructureRecord};

    #[test]
    fn school_rows_carry_lock_state() {
        let config = read_thresholds_embedded().unwrap();
        let rows = school_infos(&config, 9999).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].unlocked);
        assert_eq!(rows[0].label(), "Ignition 🔓");
        assert_eq!(rows[1].label(), "Insight 🔒 (1 XP to go)");
    }

    #[test]
    fn course_row_combines_gate_and_progress() {
        let config = read_thresholds_embedded().unwrap();
        let chapters = parse_structure(
            &StructureRecord::new(1)
                .with("chapter_title_1", "A")
                .with("lesson_1_1", "x")
                .with("lesson_1_2", "y"),
        )
        .unwrap();
        let course = CourseGate {
            course_id: "c9".to_string(),
            masterschool: "Ignition".to_string(),
            xp_threshold: 300,
        };
        let done: BTreeSet<LessonKey> = [LessonKey::new(1, 1)].into_iter().collect();

        let info = course_info(&config, &course, &chapters, &done, 0).unwrap();
        assert!(info.unlocked);
        assert_eq!(info.percentage, 50);
        assert_eq!(info.next_lesson, Some(LessonKey::new(1, 2)));
        assert_eq!(info.label(), "▶ 50%");
    }

    #[test]
    fn tracked_item_row_label() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
        let mut habit = TrackedItem::new("h1", ItemKind::Habit, "Read", 10).unwrap();
        habit.complete(today);
        habit.complete(today.pred_opt().unwrap());

        let row = TrackedItemRow::from_item(&habit, today);
        assert_eq!(row.streak, 2);
        assert!(row.done_today);
        assert_eq!(row.label(), "✅ Read 🔥2 +10 XP");
    }
}
