//! Terminal output for people, as opposed to the diagnostic `log` stream.

use crate::models::TripRecord;
use crate::utils::date::format_date;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const FG_CYAN: &str = "\x1b[36m";
const FG_MAGENTA: &str = "\x1b[35m";

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => ("\x1b[34m", "ℹ️"),
            Level::Success => ("\x1b[32m", "✅"),
            Level::Warning => ("\x1b[33m", "⚠️"),
            Level::Error => ("\x1b[31m", "❌"),
        }
    }

    fn emit(self, msg: impl fmt::Display) {
        let (color, icon) = self.style();
        match self {
            Level::Error => eprintln!("{color}{BOLD}{icon} {RESET}{msg}"),
            _ => println!("{color}{BOLD}{icon} {RESET}{msg}"),
        }
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    Level::Info.emit(msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    Level::Success.emit(msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    Level::Warning.emit(msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    Level::Error.emit(msg);
}

/// Bold section title above listings.
pub fn header<T: fmt::Display>(title: T) {
    println!("{FG_CYAN}{BOLD}{title}{RESET}");
}

/// Notification shown once a trip row is on disk.
pub fn trip_recorded(trip: &TripRecord) {
    println!("{}", trip_notice(trip));
}

/// `🚗 Trip recorded  2024-05-01  Buckeye  7 mi  (site visit)`, the reason
/// part left out when there is none.
pub fn trip_notice(trip: &TripRecord) -> String {
    let mut line = format!(
        "{FG_MAGENTA}{BOLD}🚗 Trip recorded{RESET}  {}  {}  {} mi",
        format_date(trip.date),
        trip.location,
        trip.miles
    );
    if let Some(reason) = trip.reason.as_deref().filter(|r| !r.trim().is_empty()) {
        line.push_str(&format!("  ({})", reason));
    }
    line
}
