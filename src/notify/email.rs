//! HTML body of the operator notification.

use crate::booking::Booking;

/// Placeholder shown when the customer left no instructions.
pub const NO_INSTRUCTIONS: &str = "None";

pub fn render_booking_email(booking: &Booking) -> String {
    let instructions = booking
        .instructions
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_INSTRUCTIONS);

    let rows = [
        ("Name", booking.name.as_str()),
        ("Mobile", booking.mobile.as_str()),
        ("Ride Type", booking.ride_type.as_deref().unwrap_or_default()),
        ("Pickup", booking.pickup_city.as_str()),
        ("Drop", booking.drop_city.as_str()),
        ("Date", booking.date.as_deref().unwrap_or_default()),
        ("Time", booking.time.as_deref().unwrap_or_default()),
        ("Vehicle", booking.vehicle.as_deref().unwrap_or_default()),
        ("Instructions", instructions),
    ];

    let mut html = String::from("<h2>New Booking</h2>\n");
    for (label, value) in rows {
        html.push_str(&format!(
            "<p><strong>{label}:</strong> {}</p>\n",
            escape_html(value)
        ));
    }
    html
}

/// Values come straight from the public form.
fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
