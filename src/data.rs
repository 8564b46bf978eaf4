// src/data.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::model::{ItemKind, School};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewards {
    pub habit: i64,
    pub tool: i64,
    pub lesson: i64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            habit: 10,
            tool: 15,
            lesson: 50,
        }
    }
}

impl Rewards {
    pub fn for_kind(&self, kind: ItemKind) -> i64 {
        match kind {
            ItemKind::Habit => self.habit,
            ItemKind::Tool => self.tool,
        }
    }
}

/// Puntos de skill que suma cada completado, repartidos por las skills etiquetadas
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SkillPoints {
    pub habit: f64,
    pub tool: f64,
}

impl Default for SkillPoints {
    fn default() -> Self {
        Self {
            habit: 0.1,
            tool: 0.15,
        }
    }
}

impl SkillPoints {
    pub fn for_kind(&self, kind: ItemKind) -> f64 {
        match kind {
            ItemKind::Habit => self.habit,
            ItemKind::Tool => self.tool,
        }
    }
}

/// Tabla estática de umbrales: escuelas, escuelas "gratis" y recompensas por defecto
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgressConfig {
    pub schools: Vec<School>,
    #[serde(default)]
    pub free_schools: Vec<String>,
    #[serde(default)]
    pub rewards: Rewards,
    #[serde(default)]
    pub skill_points: SkillPoints,
}

impl ProgressConfig {
    pub fn from_yaml_str(content: &str) -> CoreResult<Self> {
        let mut config: ProgressConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        config.schools.sort_by_key(|s| s.order_index);
        log::debug!("loaded {} school thresholds", config.schools.len());
        Ok(config)
    }

    pub fn school(&self, name: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.name == name)
    }

    pub fn is_free_school(&self, name: &str) -> bool {
        self.free_schools.iter().any(|s| s == name)
    }

    fn validate(&self) -> CoreResult<()> {
        let mut seen = HashSet::new();
        for school in &self.schools {
            if school.unlock_xp < 0 {
                return Err(CoreError::invalid(format!(
                    "school {} has negative unlock_xp {}",
                    school.name, school.unlock_xp
                )));
            }
            if !seen.insert(school.name.as_str()) {
                return Err(CoreError::invalid(format!(
                    "school {} declared twice",
                    school.name
                )));
            }
        }
        for free in &self.free_schools {
            if !seen.contains(free.as_str()) {
                return Err(CoreError::invalid(format!(
                    "free school {free} is not a declared school"
                )));
            }
        }
        let r = &self.rewards;
        if r.habit < 0 || r.tool < 0 || r.lesson < 0 {
            return Err(CoreError::invalid("rewards must be >= 0"));
        }
        let sp = &self.skill_points;
        if !(sp.habit.is_finite() && sp.tool.is_finite() && sp.habit >= 0.0 && sp.tool >= 0.0) {
            return Err(CoreError::invalid("skill points must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Carga la tabla de umbrales desde el YAML embebido
pub fn read_thresholds_embedded() -> CoreResult<ProgressConfig> {
    let file_content = include_str!("data/thresholds.yaml");
    ProgressConfig::from_yaml_str(file_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_thresholds_match_known_schools() {
        let config = read_thresholds_embedded().expect("embedded yaml ok");
        let names: Vec<&str> = config.schools.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Ignition", "Insight", "Transformation", "God Mode"]);
        assert_eq!(config.school("Insight").map(|s| s.unlock_xp), Some(10000));
        assert_eq!(config.school("God Mode").map(|s| s.unlock_xp), Some(100000));
        assert!(config.is_free_school("Ignition"));
        assert!(!config.is_free_school("Insight"));
        assert_eq!(config.rewards, Rewards::default());
        assert_eq!(config.skill_points.for_kind(ItemKind::Habit), 0.1);
        assert_eq!(config.skill_points.for_kind(ItemKind::Tool), 0.15);
    }

    #[test]
    fn schools_are_sorted_by_order_index() {
        let yaml = r#"
schools:
  - { name: B, unlock_xp: 5, order_index: 2 }
  - { name: A, unlock_xp: 0, order_index: 1 }
"#;
        let config = ProgressConfig::from_yaml_str(yaml).expect("yaml ok");
        assert_eq!(config.schools[0].name, "A");
        assert!(config.free_schools.is_empty());
        assert_eq!(config.rewards.tool, 15);
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let yaml = "schools:\n  - { name: A, unlock_xp: -1 }\n";
        let err = ProgressConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn duplicate_and_unknown_free_schools_are_rejected() {
        let dup = "schools:\n  - { name: A, unlock_xp: 0 }\n  - { name: A, unlock_xp: 1 }\n";
        assert!(ProgressConfig::from_yaml_str(dup).is_err());

        let unknown = "schools:\n  - { name: A, unlock_xp: 0 }\nfree_schools: [Z]\n";
        assert!(ProgressConfig::from_yaml_str(unknown).is_err());
    }

    #[test]
    fn negative_skill_points_are_rejected() {
        let yaml = "schools:\n  - { name: A, unlock_xp: 0 }\nskill_points: { habit: -0.1, tool: 0.15 }\n";
        assert!(matches!(
            ProgressConfig::from_yaml_str(yaml),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = ProgressConfig::from_yaml_str("schools: [").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
