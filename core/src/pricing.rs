use crate::room::RoomOffer;
use serde::Serialize;

/// Per-room-per-night components and stay totals, in both the display
/// currency and USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base_rate_in_currency: f64,
    pub included_taxes_in_currency: f64,
    pub excluded_taxes_in_currency: f64,
    pub per_room_per_night_in_currency: f64,
    pub total_in_currency: f64,
    pub base_rate_usd: f64,
    pub included_taxes_usd: f64,
    pub excluded_taxes_usd: f64,
    pub per_room_per_night_usd: f64,
    pub total_usd: f64,
}

/// Absent components count as 0. `None` when there is no offer.
pub fn price_breakdown(room: Option<&RoomOffer>, quantity: u32, nights: u32) -> Option<PriceBreakdown> {
    let room = room?;
    let multiplier = f64::from(quantity) * f64::from(nights);

    let base_rate_in_currency = room.base_rate_in_currency.unwrap_or(0.0);
    let included_taxes_in_currency = room.included_taxes_and_fees_total_in_currency.unwrap_or(0.0);
    let excluded_taxes_in_currency = room.excluded_taxes_and_fees_total_in_currency.unwrap_or(0.0);
    let per_room_per_night_in_currency =
        base_rate_in_currency + included_taxes_in_currency + excluded_taxes_in_currency;

    let base_rate_usd = room.base_rate.unwrap_or(0.0);
    let included_taxes_usd = room.included_taxes_and_fees_total.unwrap_or(0.0);
    let excluded_taxes_usd = room.excluded_taxes_and_fees_total.unwrap_or(0.0);
    let per_room_per_night_usd = base_rate_usd + included_taxes_usd + excluded_taxes_usd;

    Some(PriceBreakdown {
        base_rate_in_currency,
        included_taxes_in_currency,
        excluded_taxes_in_currency,
        per_room_per_night_in_currency,
        total_in_currency: per_room_per_night_in_currency * multiplier,
        base_rate_usd,
        included_taxes_usd,
        excluded_taxes_usd,
        per_room_per_night_usd,
        total_usd: per_room_per_night_usd * multiplier,
    })
}
