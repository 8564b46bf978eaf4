use super::*;

impl TrackedItem {
    pub fn streak(&self, today: NaiveDate) -> u32 {
        current_streak(&self.completions, today)
    }

    pub fn completion_count(&self) -> usize {
        self.completions.len()
    }

    pub fn last_completed(&self) -> Option<NaiveDate> {
        self.completions.last().copied()
    }

    /// Días completados dentro del mes indicado
    pub fn completions_in_month(&self, year: i32, month: u32) -> usize {
        self.completions
            .iter()
            .filter(|d| d.year() == year && d.month() == month)
            .count()
    }
}
