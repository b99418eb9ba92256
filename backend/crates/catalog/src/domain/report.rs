//! Sales report rows

use serde::Serialize;

/// Periods returned by the sales report
pub const SALES_PERIODS: i64 = 60;
/// Products returned by the best-items report
pub const BEST_ITEMS: i64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalesRange {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl SalesRange {
    /// Unrecognised values report daily.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("monthly") => SalesRange::Monthly,
            Some("yearly") => SalesRange::Yearly,
            _ => SalesRange::Daily,
        }
    }

    /// Postgres `to_char` pattern for the period label.
    pub const fn pg_format(&self) -> &'static str {
        match self {
            SalesRange::Daily => "YYYY-MM-DD",
            SalesRange::Monthly => "YYYY-MM",
            SalesRange::Yearly => "YYYY",
        }
    }

    /// chrono pattern producing the same label as [`pg_format`](Self::pg_format).
    pub const fn chrono_format(&self) -> &'static str {
        match self {
            SalesRange::Daily => "%Y-%m-%d",
            SalesRange::Monthly => "%Y-%m",
            SalesRange::Yearly => "%Y",
        }
    }
}

/// Served revenue for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRow {
    pub period: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestItem {
    pub name: String,
    pub qty: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_daily() {
        assert_eq!(SalesRange::parse(None), SalesRange::Daily);
        assert_eq!(SalesRange::parse(Some("weekly")), SalesRange::Daily);
        assert_eq!(SalesRange::parse(Some("monthly")), SalesRange::Monthly);
        assert_eq!(SalesRange::parse(Some("yearly")).pg_format(), "YYYY");
    }
}
