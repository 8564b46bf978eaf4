use super::*;

pub const GRID_WEEKS: usize = 6;
pub const GRID_DAYS: usize = 7;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: Option<NaiveDate>, // None: celda fuera del mes
    pub filled: bool,
}

impl GridCell {
    pub fn day_of_month(&self) -> Option<u32> {
        self.date.map(|d| d.day())
    }
}

/// Cuadrícula de 6 semanas x 7 días (domingo primero) de un mes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(GRID_DAYS)
    }

    pub fn filled_days(&self) -> usize {
        self.cells.iter().filter(|c| c.filled).count()
    }
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

impl TrackedItem {
    pub fn month_grid(&self, year: i32, month: u32) -> CoreResult<MonthGrid> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CoreError::invalid(format!("no such month {year}-{month}")))?;
        let last = last_day_of_month(first)
            .ok_or_else(|| CoreError::invalid(format!("month {year}-{month} out of range")))?;
        let offset = first.weekday().num_days_from_sunday() as i64;

        let cells = (0..(GRID_WEEKS * GRID_DAYS) as i64)
            .map(|idx| {
                let date = first
                    .checked_add_signed(chrono::Duration::days(idx - offset))
                    .filter(|d| *d >= first && *d <= last);
                GridCell {
                    date,
                    filled: date.is_some_and(|d| self.completions.contains(&d)),
                }
            })
            .collect();

        Ok(MonthGrid { year, month, cells })
    }
}
