pub mod data;
pub mod error;
pub mod model;
pub mod progress;
pub mod skills;
pub mod streak;
pub mod structure;
pub mod tracker;
pub mod unlock;
pub mod view_models;
pub mod xp;

pub use error::{CoreError, CoreResult};
pub use progress::{complete_lesson, course_progress, next_lesson, progress};
pub use skills::{award_skill_points, group_by_master_stat, UserSkill};
pub use streak::{current_streak, parse_completion_date, today_utc};
pub use structure::{parse_descriptions, parse_structure, StructureRecord};
pub use unlock::{course_status, is_unlocked, school_status, shortfall, unlocked_schools};
