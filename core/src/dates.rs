use crate::error::DateError;
use time::macros::format_description;
use time::Date;

/// Checkin/checkout pair. Construction only guarantees both dates parse;
/// call [`StayDates::validate`] before using them for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    pub checkin: Date,
    pub checkout: Date,
}

impl StayDates {
    pub fn parse(checkin: &str, checkout: &str) -> Result<Self, DateError> {
        Ok(Self { checkin: parse_iso(checkin)?, checkout: parse_iso(checkout)? })
    }

    /// Checkout strictly after checkin, checkin not before `today`.
    pub fn validate(&self, today: Date) -> Result<(), DateError> {
        if self.checkout <= self.checkin {
            return Err(DateError::CheckoutNotAfterCheckin {
                checkin: format_iso(self.checkin),
                checkout: format_iso(self.checkout),
            });
        }
        if self.checkin < today {
            return Err(DateError::CheckinInPast(format_iso(self.checkin)));
        }
        Ok(())
    }

    /// Whole nights between checkin and checkout; 0 if not after checkin.
    pub fn nights(&self) -> u32 {
        u32::try_from((self.checkout - self.checkin).whole_days()).unwrap_or(0)
    }
}

pub fn parse_iso(s: &str) -> Result<Date, DateError> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| DateError::Parse(s.to_string()))
}

/// `YYYY-MM-DD`, the format the upstream API expects.
pub fn format_iso(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// e.g. `Mon, 19 Oct 2026`.
pub fn format_display(date: Date) -> String {
    date.format(format_description!(
        "[weekday repr:short], [day padding:none] [month repr:short] [year]"
    ))
    .unwrap_or_default()
}
