use chrono::{Datelike, NaiveDate};
use revcal_core::calendar::{date_at, day_of_week_row, week_index_within_year};
use revcal_core::{DayDetail, Direction, HeatmapSession, YearView};

/// Grid position of the highlighted day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub week: u32,
    pub row: u32,
}

pub struct App {
    pub session: HeatmapSession,
    pub view: YearView,
    pub cursor: Cursor,
}

impl App {
    pub fn new(session: HeatmapSession) -> App {
        let view = session.year_view();
        let cursor = initial_cursor(&view);
        App {
            session,
            view,
            cursor,
        }
    }

    pub fn year(&self) -> i32 {
        self.view.year
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        date_at(self.year(), self.cursor.week, self.cursor.row)
    }

    pub fn selected_detail(&self) -> Option<DayDetail> {
        self.selected_date().and_then(|d| self.session.day_detail(d))
    }

    pub fn selected_sparkline(&self) -> Vec<f64> {
        self.selected_date()
            .map(|d| self.session.sparkline(d))
            .unwrap_or_default()
    }

    pub fn move_left(&mut self) {
        if self.cursor.week > 0 {
            self.try_move(self.cursor.week - 1, self.cursor.row);
        }
    }

    pub fn move_right(&mut self) {
        self.try_move(self.cursor.week + 1, self.cursor.row);
    }

    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.try_move(self.cursor.week, self.cursor.row - 1);
        }
    }

    pub fn move_down(&mut self) {
        self.try_move(self.cursor.week, self.cursor.row + 1);
    }

    pub fn previous_year(&mut self) {
        self.change_year(Direction::Prev);
    }

    pub fn next_year(&mut self) {
        self.change_year(Direction::Next);
    }

    fn try_move(&mut self, week: u32, row: u32) {
        if date_at(self.year(), week, row).is_some() {
            self.cursor = Cursor { week, row };
        }
    }

    fn change_year(&mut self, direction: Direction) {
        if !self.session.advance(direction) {
            return;
        }
        let previous = self.selected_date();
        self.view = self.session.year_view();

        // Same month and day in the new year; Feb 29 becomes Feb 28
        let year = self.year();
        let target = previous.and_then(|d| {
            NaiveDate::from_ymd_opt(year, d.month(), d.day())
                .or_else(|| NaiveDate::from_ymd_opt(year, d.month(), d.day() - 1))
        });
        if let Some(date) = target {
            self.cursor = cursor_of(date);
        }
    }
}

fn cursor_of(date: NaiveDate) -> Cursor {
    Cursor {
        week: week_index_within_year(date),
        row: day_of_week_row(date),
    }
}

/// Best day of the year, or Jan 1 when the year has no data.
fn initial_cursor(view: &YearView) -> Cursor {
    let best = view
        .cells
        .iter()
        .fold(None, |best: Option<&revcal_core::HeatmapCell>, c| match best {
            Some(b) if b.total >= c.total => Some(b),
            _ => Some(c),
        });

    match best {
        Some(cell) => Cursor {
            week: cell.week,
            row: cell.row,
        },
        None => NaiveDate::from_ymd_opt(view.year, 1, 1)
            .map(cursor_of)
            .unwrap_or(Cursor { week: 0, row: 0 }),
    }
}
