//! Derived dashboard metrics.
//!
//! Pure arithmetic over canonical records. Every ratio is defined as 0 when
//! its denominator is 0, and percentages stay unrounded on a 0-100 scale;
//! display rounding is the client's job.

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{EventAttendance, EventBundle, EventProduction};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub total_expenses: f64,
    pub total_income: f64,
    pub roi: f64,
    /// Attendee to client rate.
    pub conversion_rate: f64,
    pub registration_to_attendance: f64,
    pub attendance_to_appointment: f64,
    pub appointment_to_client: f64,
    /// Registrant response to client rate across the whole funnel.
    pub overall_conversion: f64,
    pub expense_per_attendee: f64,
    pub expense_per_appointment: f64,
    pub expense_per_client: f64,
    pub clients: i32,
}

/// One entry of the historical ROI series.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiPoint {
    pub event_id: String,
    pub name: String,
    pub event_date: NaiveDate,
    pub roi: f64,
}

pub fn roi(total_income: f64, total_expenses: f64) -> f64 {
    if total_expenses > 0.0 {
        (total_income - total_expenses) / total_expenses * 100.0
    } else {
        0.0
    }
}

/// Clients credited to the event. The recorded count wins when it is
/// positive; an absent or zero count falls back to units sold.
pub fn resolved_clients(attendance: &EventAttendance, production: &EventProduction) -> i32 {
    match attendance.clients_from_event {
        Some(clients) if clients > 0 => clients,
        _ => production.annuities_sold.unwrap_or(0) + production.life_policies_sold.unwrap_or(0),
    }
}

pub(crate) fn pct(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

pub(crate) fn per_unit(total: f64, count: i32) -> f64 {
    if count > 0 { total / f64::from(count) } else { 0.0 }
}

pub fn derive_metrics(bundle: &EventBundle) -> DerivedMetrics {
    let total_expenses = bundle.expenses.total_or_sum();
    let total_income = bundle.production.total_or_sum();
    let clients = resolved_clients(&bundle.attendance, &bundle.production);
    let attendees = bundle.attendance.attendees.unwrap_or(0);
    let responses = bundle.attendance.registrant_responses.unwrap_or(0);
    let first_attended = bundle.appointments.first_attended.unwrap_or(0);

    DerivedMetrics {
        total_expenses,
        total_income,
        roi: roi(total_income, total_expenses),
        conversion_rate: pct(f64::from(clients), f64::from(attendees)),
        registration_to_attendance: pct(f64::from(attendees), f64::from(responses)),
        attendance_to_appointment: pct(f64::from(first_attended), f64::from(attendees)),
        appointment_to_client: pct(f64::from(clients), f64::from(first_attended)),
        overall_conversion: pct(f64::from(clients), f64::from(responses)),
        expense_per_attendee: per_unit(total_expenses, attendees),
        expense_per_appointment: per_unit(total_expenses, first_attended),
        expense_per_client: per_unit(total_expenses, clients),
        clients,
    }
}

/// ROI of the user's most recent events as a chronological series.
///
/// `bundles` must be ordered newest first, as the resolver returns them; the
/// newest seven are kept and reversed so charts read left to right in time.
/// Events without expense or production rows contribute an ROI of 0.
pub fn roi_trend(bundles: &[EventBundle]) -> Vec<RoiPoint> {
    bundles
        .iter()
        .take(7)
        .map(|bundle| RoiPoint {
            event_id: bundle.event.id.clone(),
            name: bundle.event.name.clone(),
            event_date: bundle.event.event_date,
            roi: roi(
                bundle.production.total_or_sum(),
                bundle.expenses.total_or_sum(),
            ),
        })
        .rev()
        .collect()
}
