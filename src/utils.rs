use crate::record::Granularity;
use chrono::{Datelike, Days, NaiveDate};

/// First day (Sunday) of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset))).unwrap()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let year = if date.month() == 12 {
        date.year() + 1
    } else {
        date.year()
    };

    let month = if date.month() == 12 {
        1
    } else {
        date.month() + 1
    };

    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// The start of the bucket immediately after the one beginning at `date`.
pub fn advance_period(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date.checked_add_days(Days::new(1)).unwrap(),
        Granularity::Weekly => date.checked_add_days(Days::new(7)).unwrap(),
        Granularity::Monthly => next_month_start(date),
    }
}

pub fn month_name_pt(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        _ => "dezembro",
    }
}

/// pt-BR date rendering (dd/mm/yyyy).
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// pt-BR currency rendering: `R$ 1.234,56`. Rounds to cents.
pub fn format_currency_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("R$ -{},{:02}", grouped, frac)
    } else {
        format!("R$ {},{:02}", grouped, frac)
    }
}


/// Display label for a bucket starting at `date`: the formatted day for
/// daily, "Semana de <date>" for weekly, "<month name> <year>" for monthly.
pub fn period_label(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => format_date_br(date),
        Granularity::Weekly => format!("Semana de {}", format_date_br(date)),
        Granularity::Monthly => format!("{} {}", month_name_pt(date.month()), date.year()),
    }
}
