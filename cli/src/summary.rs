use revcal_core::{format_money, DayDetail, HeatmapSession};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

// Helper struct for Table Row
#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Orders")]
    orders: usize,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Avg qty")]
    avg_qty: String,
    #[tabled(rename = "Avg price")]
    avg_price: String,
    #[tabled(rename = "Peak hour")]
    peak: String,
}

impl From<DayDetail> for DayRow {
    fn from(detail: DayDetail) -> Self {
        Self {
            date: detail.date.format("%Y-%m-%d").to_string(),
            day: detail.date.format("%a").to_string(),
            orders: detail.orders,
            revenue: detail.revenue_label,
            avg_qty: detail.avg_quantity_label,
            avg_price: detail.avg_price_label,
            peak: detail
                .peak_hour
                .map(|h| format!("{:02}:00", h))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn show_summary(session: &HeatmapSession) {
    let year = session.current_year();
    let days = session.year_days();

    if days.is_empty() {
        println!("No revenue recorded in {}.", year);
    } else {
        let rows: Vec<DayRow> = days
            .iter()
            .map(|day| DayRow::from(DayDetail::from_day(day)))
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

        println!("\x1b[1;36mRevenue {}\x1b[0m", year);
        println!("{}", table);

        let total: f64 = days.iter().map(|d| d.total).sum();
        let orders: usize = days.iter().map(|d| d.order_count()).sum();
        println!(
            "Total: {} over {} days, {} orders",
            format_money(total),
            days.len(),
            orders
        );
    }

    let (_, max) = session.scale().domain();
    println!("Best day across all years: {}", format_money(max));

    let skipped = session.failures().len();
    if skipped > 0 {
        println!("Skipped {} malformed rows:", skipped);
        for failure in session.failures().iter().take(10) {
            println!("  line {}: {}", failure.line, failure.error);
        }
        if skipped > 10 {
            println!("  ... and {} more", skipped - 10);
        }
    }
}
