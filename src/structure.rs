// src/structure.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{ensure_non_negative, CoreResult};
use crate::model::{Chapter, Lesson, LessonKey};

pub const MAX_CHAPTERS: u8 = 5;
pub const LESSONS_PER_CHAPTER: u8 = 4;

/// Fila desnormalizada con columnas numeradas
/// (`chapter_title_1..5`, `lesson_<n>_<m>`, `chapter_<n>_description`...)
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StructureRecord {
    #[serde(default)]
    pub chapter_count: Option<i64>,
    #[serde(flatten)]
    pub columns: BTreeMap<String, Value>,
}

impl StructureRecord {
    pub fn new(chapter_count: i64) -> Self {
        Self {
            chapter_count: Some(chapter_count),
            columns: BTreeMap::new(),
        }
    }

    pub fn from_yaml_str(content: &str) -> CoreResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(column.into(), Value::String(value.into()));
        self
    }

    /// Valor de texto de una columna. Cualquier escalar (texto, número, booleano) se lee
    /// como texto; nulo, texto vacío, listas, mapas o columna ausente cuentan como hueco.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.columns.get(column)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Aplana las columnas numeradas en capítulos con sus lecciones.
///
/// El primer título de capítulo ausente corta todo el recorrido y la primera lección
/// ausente corta la de ese capítulo. Capítulos sin lecciones se descartan.
pub fn parse_structure(record: &StructureRecord) -> CoreResult<Vec<Chapter>> {
    let declared = ensure_non_negative("chapter_count", record.chapter_count.unwrap_or(0))?;
    let last_chapter = declared.min(i64::from(MAX_CHAPTERS)) as u8;

    let mut chapters = Vec::new();
    for n in 1..=last_chapter {
        let Some(title) = record.text(&format!("chapter_title_{n}")) else {
            break;
        };
        let chapter_id = record.text(&format!("chapter_id_{n}"));

        let mut lessons = Vec::new();
        for m in 1..=LESSONS_PER_CHAPTER {
            let Some(lesson_title) = record.text(&format!("lesson_{n}_{m}")) else {
                break;
            };
            lessons.push(Lesson {
                chapter_number: n,
                lesson_number: m,
                title: lesson_title,
                lesson_id: LessonKey::new(n, m).composite_id(),
                chapter_id: chapter_id.clone(),
            });
        }

        if lessons.is_empty() {
            log::debug!("chapter {n} ({title}) has no lessons, dropped");
            continue;
        }
        chapters.push(Chapter {
            chapter_number: n,
            title,
            chapter_id,
            lessons,
        });
    }

    Ok(chapters)
}

pub fn total_lessons(chapters: &[Chapter]) -> usize {
    chapters.iter().map(|c| c.lessons.len()).sum()
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptions {
    pub chapters: BTreeMap<u8, String>,
    pub lessons: BTreeMap<LessonKey, String>,
}

impl Descriptions {
    pub fn chapter(&self, chapter_number: u8) -> Option<&str> {
        self.chapters.get(&chapter_number).map(String::as_str)
    }

    pub fn lesson(&self, chapter_number: u8, lesson_number: u8) -> Option<&str> {
        self.lessons
            .get(&LessonKey::new(chapter_number, lesson_number))
            .map(String::as_str)
    }
}

/// Descripciones opcionales por capítulo y lección. Son anotaciones sueltas: aquí no se
/// corta en el primer hueco, se recorren las 5x4 posiciones.
pub fn parse_descriptions(record: &StructureRecord) -> Descriptions {
    let mut out = Descriptions::default();
    for n in 1..=MAX_CHAPTERS {
        if let Some(desc) = record.text(&format!("chapter_{n}_description")) {
            out.chapters.insert(n, desc);
        }
        for m in 1..=LESSONS_PER_CHAPTER {
            if let Some(desc) = record.text(&format!("lesson_{n}_{m}_description")) {
                out.lessons.insert(LessonKey::new(n, m), desc);
            }
        }
    }
    out
}
