use chrono::{Datelike, NaiveDate};

/// Calendar-month bucket, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// "2018-01"
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// "January 2018"
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_key_and_label() {
        let ym = YearMonth::of(d(2018, 2, 28));
        assert_eq!(ym.key(), "2018-02");
        assert_eq!(ym.label(), "February 2018");
    }

    #[test]
    fn test_year_month_ordering_across_years() {
        assert!(YearMonth::of(d(2017, 12, 31)) < YearMonth::of(d(2018, 1, 1)));
        assert!(YearMonth::of(d(2018, 1, 1)) < YearMonth::of(d(2018, 10, 1)));
        assert_eq!(YearMonth::of(d(2018, 1, 1)), YearMonth::of(d(2018, 1, 31)));
    }
}
