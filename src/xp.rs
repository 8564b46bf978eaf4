// src/xp.rs

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, CoreError, CoreResult};
use crate::model::{XpSource, XpTransaction};

/// XP de un usuario: la actual (la que abre escuelas) y la histórica
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XpProfile {
    pub current_xp: i64,
    pub total_xp_earned: i64,
}

impl XpProfile {
    pub fn new(current_xp: i64, total_xp_earned: i64) -> CoreResult<Self> {
        Ok(Self {
            current_xp: ensure_non_negative("current_xp", current_xp)?,
            total_xp_earned: ensure_non_negative("total_xp_earned", total_xp_earned)?,
        })
    }

    /// Suma `amount` a ambos contadores y devuelve el movimiento a persistir.
    /// Si falla, el perfil queda sin tocar.
    pub fn award(
        &mut self,
        amount: i64,
        source: XpSource,
        description: impl Into<String>,
    ) -> CoreResult<XpTransaction> {
        let amount = ensure_non_negative("xp amount", amount)?;
        let overflow = || CoreError::invalid(format!("xp overflow adding {amount}"));
        let current = self.current_xp.checked_add(amount).ok_or_else(overflow)?;
        let total = self.total_xp_earned.checked_add(amount).ok_or_else(overflow)?;

        self.current_xp = current;
        self.total_xp_earned = total;
        let description = description.into();
        log::debug!("awarded {amount} xp ({source:?}): {description}");
        Ok(XpTransaction {
            amount,
            source,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn award_adds_to_both_counters() {
        let mut profile = XpProfile::new(100, 250).unwrap();
        let tx = profile
            .award(50, XpSource::LessonCompletion, "Completed lesson 1_1")
            .unwrap();
        assert_eq!(profile.current_xp, 150);
        assert_eq!(profile.total_xp_earned, 300);
        assert_eq!(tx.amount, 50);
        assert_eq!(tx.source, XpSource::LessonCompletion);
        assert_eq!(tx.description, "Completed lesson 1_1");
    }

    #[test]
    fn zero_award_is_allowed() {
        let mut profile = XpProfile::default();
        profile.award(0, XpSource::HabitCompletion, "noop").unwrap();
        assert_eq!(profile, XpProfile::default());
    }

    #[test]
    fn negative_award_leaves_profile_untouched() {
        let mut profile = XpProfile::new(10, 10).unwrap();
        assert!(profile.award(-5, XpSource::ToolboxUsage, "bad").is_err());
        assert_eq!(profile, XpProfile::new(10, 10).unwrap());
    }

    #[test]
    fn overflow_is_rejected() {
        let mut profile = XpProfile::new(1, i64::MAX).unwrap();
        let err = profile.award(1, XpSource::HabitCompletion, "x").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(profile.current_xp, 1);
    }

    #[test]
    fn negative_profile_is_invalid() {
        assert!(XpProfile::new(-1, 0).is_err());
    }

    #[test]
    fn transactions_serialize_with_snake_case_sources() {
        let tx = XpTransaction {
            amount: 15,
            source: XpSource::ToolboxUsage,
            description: "Used toolbox item: Pomodoro".to_string(),
        };
        let yaml = serde_yaml::to_string(&tx).unwrap();
        assert!(yaml.contains("source: toolbox_usage"));
    }
}
