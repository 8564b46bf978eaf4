// src/skills.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::SkillPoints;
use crate::error::{CoreError, CoreResult};
use crate::model::ItemKind;

/// Tope de valor de una skill
pub const SKILL_CAP: f64 = 100.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MasterStat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub master_stat_id: String,
    #[serde(default, rename = "master_stats")]
    pub master_stat: Option<MasterStat>,
}

/// Valor acumulado de un usuario en una skill
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSkill {
    pub skill_id: String,
    #[serde(default)]
    pub current_value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillAward {
    pub updated: usize,
    pub inserted: usize,
}

/// Suma `points_per_skill` a cada skill de `skill_ids`, con tope en `SKILL_CAP`.
/// Las skills sin registro se crean con los puntos del award. Un id repetido en la
/// misma llamada suma dos veces: la segunda ya cuenta como actualización.
pub fn award_skill_points(
    user_skills: &mut Vec<UserSkill>,
    skill_ids: &[String],
    points_per_skill: f64,
) -> CoreResult<SkillAward> {
    if skill_ids.is_empty() {
        return Err(CoreError::invalid("no skill ids provided"));
    }
    if !points_per_skill.is_finite() || points_per_skill < 0.0 {
        return Err(CoreError::invalid(format!(
            "points per skill must be finite and >= 0, got {points_per_skill}"
        )));
    }

    let mut award = SkillAward::default();
    for skill_id in skill_ids {
        match user_skills.iter_mut().find(|s| &s.skill_id == skill_id) {
            Some(existing) => {
                let raised = existing.current_value + points_per_skill;
                existing.current_value = raised.min(SKILL_CAP);
                award.updated += 1;
            }
            None => {
                user_skills.push(UserSkill {
                    skill_id: skill_id.clone(),
                    current_value: points_per_skill.min(SKILL_CAP),
                });
                award.inserted += 1;
            }
        }
    }

    log::debug!(
        "awarded {points_per_skill} to {} skills ({} updated, {} inserted)",
        skill_ids.len(),
        award.updated,
        award.inserted
    );
    Ok(award)
}

/// Award de skills por completar un hábito o usar una herramienta
pub fn award_for_item(
    user_skills: &mut Vec<UserSkill>,
    kind: ItemKind,
    skill_ids: &[String],
    points: &SkillPoints,
) -> CoreResult<SkillAward> {
    award_skill_points(user_skills, skill_ids, points.for_kind(kind))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroup<'a> {
    pub master_stat: Option<&'a MasterStat>,
    pub skills: Vec<&'a Skill>,
}

/// Agrupa por `master_stat_id` conservando el orden de entrada dentro de cada grupo
pub fn group_by_master_stat(skills: &[Skill]) -> BTreeMap<&str, SkillGroup<'_>> {
    let mut grouped: BTreeMap<&str, SkillGroup<'_>> = BTreeMap::new();
    for skill in skills {
        let group = grouped
            .entry(skill.master_stat_id.as_str())
            .or_insert_with(|| SkillGroup {
                master_stat: skill.master_stat.as_ref(),
                skills: Vec::new(),
            });
        group.skills.push(skill);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn user_skill(id: &str, value: f64) -> UserSkill {
        UserSkill {
            skill_id: id.to_string(),
            current_value: value,
        }
    }

    fn skill(id: &str, stat: &str) -> Skill {
        Skill {
            id: id.to_string(),
            name: id.to_string(),
            display_name: id.to_uppercase(),
            master_stat_id: stat.to_string(),
            master_stat: None,
        }
    }

    #[test]
    fn updates_existing_and_inserts_missing() {
        let mut skills = vec![user_skill("focus", 2.0)];
        let award = award_skill_points(&mut skills, &ids(&["focus", "grit"]), 0.5).unwrap();
        assert_eq!(award, SkillAward { updated: 1, inserted: 1 });
        assert_eq!(skills[0].current_value, 2.5);
        assert_eq!(skills[1], user_skill("grit", 0.5));
    }

    #[test]
    fn values_are_capped_at_one_hundred() {
        let mut skills = vec![user_skill("focus", 99.95)];
        award_skill_points(&mut skills, &ids(&["focus", "big"]), 150.0).unwrap();
        assert_eq!(skills[0].current_value, SKILL_CAP);
        assert_eq!(skills[1].current_value, SKILL_CAP);
    }

    #[test]
    fn repeated_id_counts_as_update_the_second_time() {
        let mut skills = Vec::new();
        let award = award_skill_points(&mut skills, &ids(&["a", "a"]), 1.0).unwrap();
        assert_eq!(award, SkillAward { updated: 1, inserted: 1 });
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].current_value, 2.0);
    }

    #[test]
    fn empty_ids_and_bad_points_are_invalid() {
        let mut skills = vec![user_skill("a", 1.0)];
        assert!(matches!(
            award_skill_points(&mut skills, &[], 0.1),
            Err(CoreError::InvalidInput(_))
        ));
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(award_skill_points(&mut skills, &ids(&["a"]), bad).is_err());
        }
        assert_eq!(skills[0].current_value, 1.0);
    }

    #[test]
    fn item_kind_picks_configured_points() {
        let mut skills = Vec::new();
        let points = SkillPoints::default();
        award_for_item(&mut skills, ItemKind::Tool, &ids(&["a"]), &points).unwrap();
        award_for_item(&mut skills, ItemKind::Habit, &ids(&["b"]), &points).unwrap();
        assert_eq!(skills[0].current_value, 0.15);
        assert_eq!(skills[1].current_value, 0.1);
    }

    #[test]
    fn groups_by_master_stat_in_input_order() {
        let mut body = skill("strength", "body");
        body.master_stat = Some(MasterStat {
            id: "body".to_string(),
            name: "body".to_string(),
            display_name: "Body".to_string(),
            color: Some("#f00".to_string()),
        });
        let skills = vec![body, skill("focus", "mind"), skill("endurance", "body")];

        let grouped = group_by_master_stat(&skills);
        assert_eq!(grouped.len(), 2);
        let body_group = &grouped["body"];
        let names: Vec<&str> = body_group.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["strength", "endurance"]);
        assert_eq!(body_group.master_stat.map(|m| m.display_name.as_str()), Some("Body"));
        assert_eq!(grouped["mind"].skills.len(), 1);
        assert!(group_by_master_stat(&[]).is_empty());
    }

    #[test]
    fn skill_rows_deserialize_with_nested_master_stat() {
        let yaml = r##"
id: s1
name: focus
display_name: Focus
master_stat_id: m1
master_stats: { id: m1, name: mind, display_name: Mind, color: "#00f" }
"##;
        let skill: Skill = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(skill.master_stat.map(|m| m.name), Some("mind".to_string()));
    }
}
