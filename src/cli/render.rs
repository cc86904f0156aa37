use crate::directory::{CourtStatusCounts, DashboardStats};
use crate::domain::court::{Court, DayType};
use crate::domain::facility::Facility;
use crate::domain::user::User;
use crossterm::style::{Attribute, Color, ContentStyle, Stylize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Theme {
    pub prompt: ContentStyle,
    pub hint: ContentStyle,
    pub error: ContentStyle,
    pub success: ContentStyle,
    pub heading: ContentStyle,
    enabled: bool,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            prompt: ContentStyle::new().attribute(Attribute::Bold),
            hint: ContentStyle::new().with(Color::DarkGrey),
            error: ContentStyle::new().with(Color::Red).attribute(Attribute::Bold),
            success: ContentStyle::new().with(Color::Green),
            heading: ContentStyle::new().with(Color::Cyan).attribute(Attribute::Bold),
            enabled: true,
        }
    }

    /// No escape codes; used when stdout is not a terminal and in tests.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default_theme()
        }
    }

    pub fn paint(&self, style: ContentStyle, text: &str) -> String {
        if self.enabled {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Left-aligned columns padded by display width, so accented names line up.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                if idx >= widths.len() {
                    widths.push(0);
                }
                widths[idx] = widths[idx].max(cell.width());
            }
        }
        widths
    }

    pub fn render(&self, theme: &Theme) -> String {
        let widths = self.widths();
        let mut out = String::new();
        let header = format_row(&self.headers, &widths);
        out.push_str(&theme.paint(theme.heading, &header));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_row(row, &widths));
            out.push('\n');
        }
        out
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, width) in widths.iter().enumerate() {
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        if idx > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if idx + 1 < widths.len() {
            line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
        }
    }
    line.trim_end().to_string()
}

/// `1500000` → `1,500,000`.
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn facilities_table(facilities: &[&Facility], courts: &[Court]) -> Table {
    let mut table = Table::new(["ID", "Facility", "Status", "Hours", "Courts", "Address"]);
    for facility in facilities {
        let court_count = courts.iter().filter(|c| c.facility_id == facility.id).count();
        table.row([
            facility.id.to_string(),
            facility.name.clone(),
            facility.status.to_string(),
            facility.hours(),
            court_count.to_string(),
            facility.full_address(),
        ]);
    }
    table
}

pub fn courts_table(courts: &[&Court], facilities: &[Facility]) -> Table {
    let mut table = Table::new(["ID", "Court", "Facility", "Status", "From (weekday)"]);
    for court in courts {
        let facility = facilities
            .iter()
            .find(|f| f.id == court.facility_id)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| format!("#{}", court.facility_id));
        let price = court
            .lowest_price(DayType::Weekday)
            .map(group_thousands)
            .unwrap_or_else(|| "-".to_string());
        table.row([
            court.id.to_string(),
            court.name.clone(),
            facility,
            court.status.to_string(),
            price,
        ]);
    }
    table
}

pub fn staff_table(staff: &[&User]) -> Table {
    let mut table = Table::new(["ID", "Name", "Email", "Phone", "Status"]);
    for user in staff {
        table.row([
            user.id.to_string(),
            user.full_name(),
            user.email.clone(),
            user.phone_number.clone(),
            user.status.to_string(),
        ]);
    }
    table
}

pub fn status_summary(counts: &CourtStatusCounts) -> String {
    format!(
        "{} active, {} inactive, {} maintenance",
        counts.active, counts.inactive, counts.maintenance
    )
}

pub fn dashboard_table(stats: &DashboardStats) -> Table {
    let mut table = Table::new(["Metric", "Value"]);
    table.row(["Facilities".to_string(), stats.total_facilities.to_string()]);
    table.row(["Courts".to_string(), stats.total_courts.to_string()]);
    table.row(["Active courts".to_string(), stats.active_courts.to_string()]);
    table.row(["Inactive courts".to_string(), stats.inactive_courts.to_string()]);
    table.row(["Staff".to_string(), stats.total_staff.to_string()]);
    table.row([
        "Monthly revenue".to_string(),
        group_thousands(stats.monthly_revenue),
    ]);
    table.row(["Bookings".to_string(), stats.total_bookings.to_string()]);
    table
}
