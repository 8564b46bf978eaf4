use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::structure::{LESSONS_PER_CHAPTER, MAX_CHAPTERS};

/// Par (capítulo, lección) con el que se marca una lección como completada
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct LessonKey {
    pub chapter_number: u8,
    pub lesson_number: u8,
}

impl LessonKey {
    pub fn new(chapter_number: u8, lesson_number: u8) -> Self {
        Self {
            chapter_number,
            lesson_number,
        }
    }

    /// Capítulo 1..=5 y lección 1..=4
    pub fn in_range(&self) -> bool {
        (1..=MAX_CHAPTERS).contains(&self.chapter_number)
            && (1..=LESSONS_PER_CHAPTER).contains(&self.lesson_number)
    }

    /// Id compuesto "capítulo_lección", igual al que guarda la tabla de progreso
    pub fn composite_id(&self) -> String {
        format!("{}_{}", self.chapter_number, self.lesson_number)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub chapter_number: u8,
    pub lesson_number: u8,
    pub title: String,
    pub lesson_id: String,
    #[serde(default)]
    pub chapter_id: Option<String>,
}

impl Lesson {
    pub fn key(&self) -> LessonKey {
        LessonKey::new(self.chapter_number, self.lesson_number)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub chapter_number: u8,
    pub title: String,
    #[serde(default)]
    pub chapter_id: Option<String>,
    pub lessons: Vec<Lesson>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl CourseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseStatus::NotStarted => "not_started",
            CourseStatus::InProgress => "in_progress",
            CourseStatus::Completed => "completed",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub percentage: u8, // 0..=100
    pub status: CourseStatus,
    pub completed_lessons: u64,
    pub total_lessons: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct School {
    pub name: String,
    pub unlock_xp: i64,
    #[serde(default)]
    pub order_index: u32,
}

/// Umbral de XP de un curso dentro de su escuela
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CourseGate {
    pub course_id: String,
    pub masterschool: String,
    #[serde(default)]
    pub xp_threshold: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub level_number: u32,
    #[serde(default)]
    pub title: String,
    pub xp_threshold: i64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum XpSource {
    HabitCompletion,
    ToolboxUsage,
    LessonCompletion,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct XpTransaction {
    pub amount: i64,
    pub source: XpSource,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Habit,
    Tool,
}

impl ItemKind {
    pub fn xp_source(self) -> XpSource {
        match self {
            ItemKind::Habit => XpSource::HabitCompletion,
            ItemKind::Tool => XpSource::ToolboxUsage,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompletionRecord {
    pub entity_id: String,
    pub date: NaiveDate,
}
