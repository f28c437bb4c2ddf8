use std::collections::BTreeMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError, identity::CurrentUser, metrics, records::EventBundle, state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    /// Explicit user scope; falls back to the authenticated user.
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_events: usize,
    pub total_expenses: f64,
    pub total_income: f64,
    /// ROI of the summed totals, not a mean of per-event values.
    pub roi: f64,
    pub total_attendees: i32,
    pub total_clients: i32,
    pub overall_conversion_rate: f64,
    pub expense_per_client: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAnalytics {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub marketing_type: String,
    pub topic: Option<String>,
    pub total_expenses: f64,
    pub total_income: f64,
    pub roi: f64,
    pub attendees: i32,
    pub clients: i32,
    pub conversion_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetrics {
    /// Calendar month in `YYYY-MM` form.
    pub month: String,
    pub events: usize,
    pub expenses: f64,
    pub income: f64,
    pub roi: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetrics {
    pub marketing_type: String,
    pub events: usize,
    pub expenses: f64,
    pub income: f64,
    pub roi: f64,
    pub attendees: i32,
    pub clients: i32,
    pub conversion_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub summary: AnalyticsSummary,
    pub events: Vec<EventAnalytics>,
    pub monthly_data: Vec<MonthlyMetrics>,
    pub metrics_by_type: Vec<TypeMetrics>,
}

impl AnalyticsResponse {
    fn empty() -> Self {
        AnalyticsResponse {
            summary: AnalyticsSummary::default(),
            events: Vec::new(),
            monthly_data: Vec::new(),
            metrics_by_type: Vec::new(),
        }
    }
}

/// GET /analytics - Aggregate metrics across all of a user's events.
#[tracing::instrument(name = "GET /analytics", skip(state, user))]
pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    // No user scope at all means there is nothing to show, not an error.
    let user_id = match query.user_id.as_deref().or(user.user_id()) {
        Some(id) => id.to_string(),
        None => return Ok(Json(AnalyticsResponse::empty())),
    };

    let events = state.resolver.list_events(&user_id).await?;
    let bundles = join_all(
        events
            .into_iter()
            .map(|event| state.resolver.resolve_bundle(event)),
    )
    .await;

    Ok(Json(build_analytics(&bundles)))
}

fn build_analytics(bundles: &[EventBundle]) -> AnalyticsResponse {
    let events: Vec<EventAnalytics> = bundles.iter().map(event_analytics).collect();

    AnalyticsResponse {
        summary: build_summary(&events),
        monthly_data: build_monthly(&events),
        metrics_by_type: build_by_type(&events),
        events,
    }
}

fn event_analytics(bundle: &EventBundle) -> EventAnalytics {
    let metrics = metrics::derive_metrics(bundle);
    EventAnalytics {
        id: bundle.event.id.clone(),
        name: bundle.event.name.clone(),
        date: bundle.event.event_date,
        marketing_type: bundle.event.marketing_type.clone(),
        topic: bundle.event.topic.clone(),
        total_expenses: metrics.total_expenses,
        total_income: metrics.total_income,
        roi: metrics.roi,
        attendees: bundle.attendance.attendees.unwrap_or(0),
        clients: metrics.clients,
        conversion_rate: metrics.conversion_rate,
    }
}

fn build_summary(events: &[EventAnalytics]) -> AnalyticsSummary {
    let total_expenses: f64 = events.iter().map(|entry| entry.total_expenses).sum();
    let total_income: f64 = events.iter().map(|entry| entry.total_income).sum();
    let total_attendees: i32 = events.iter().map(|entry| entry.attendees).sum();
    let total_clients: i32 = events.iter().map(|entry| entry.clients).sum();

    AnalyticsSummary {
        total_events: events.len(),
        total_expenses,
        total_income,
        roi: metrics::roi(total_income, total_expenses),
        total_attendees,
        total_clients,
        overall_conversion_rate: metrics::pct(f64::from(total_clients), f64::from(total_attendees)),
        expense_per_client: metrics::per_unit(total_expenses, total_clients),
    }
}

fn build_monthly(events: &[EventAnalytics]) -> Vec<MonthlyMetrics> {
    let mut months: BTreeMap<String, (usize, f64, f64)> = BTreeMap::new();
    for entry in events {
        let key = entry.date.format("%Y-%m").to_string();
        let slot = months.entry(key).or_default();
        slot.0 += 1;
        slot.1 += entry.total_expenses;
        slot.2 += entry.total_income;
    }

    months
        .into_iter()
        .map(|(month, (events, expenses, income))| MonthlyMetrics {
            month,
            events,
            expenses,
            income,
            roi: metrics::roi(income, expenses),
        })
        .collect()
}

fn build_by_type(events: &[EventAnalytics]) -> Vec<TypeMetrics> {
    let mut types: BTreeMap<String, (usize, f64, f64, i32, i32)> = BTreeMap::new();
    for entry in events {
        let slot = types.entry(entry.marketing_type.clone()).or_default();
        slot.0 += 1;
        slot.1 += entry.total_expenses;
        slot.2 += entry.total_income;
        slot.3 += entry.attendees;
        slot.4 += entry.clients;
    }

    types
        .into_iter()
        .map(
            |(marketing_type, (events, expenses, income, attendees, clients))| TypeMetrics {
                marketing_type,
                events,
                expenses,
                income,
                roi: metrics::roi(income, expenses),
                attendees,
                clients,
                conversion_rate: metrics::pct(f64::from(clients), f64::from(attendees)),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        EventAppointments, EventAttendance, EventDetails, EventExpenses, EventProduction,
        EventRecord, SchemaGeneration,
    };

    fn bundle(
        id: &str,
        date: (i32, u32, u32),
        marketing_type: &str,
        expenses: f64,
        income: f64,
        clients: i32,
    ) -> EventBundle {
        EventBundle {
            event: EventRecord {
                id: id.into(),
                user_id: "user-1".into(),
                name: format!("Event {id}"),
                event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                location: None,
                marketing_type: marketing_type.into(),
                topic: None,
                generation: SchemaGeneration::Current,
            },
            details: EventDetails::default(),
            expenses: EventExpenses {
                total_cost: Some(expenses),
                ..Default::default()
            },
            attendance: EventAttendance {
                attendees: Some(50),
                clients_from_event: Some(clients),
                ..Default::default()
            },
            appointments: EventAppointments::default(),
            production: EventProduction {
                total_production: Some(income),
                ..Default::default()
            },
        }
    }

    #[test]
    fn summary_aggregates_across_events() {
        let payload = build_analytics(&[
            bundle("a", (2025, 3, 10), "seminar", 1000.0, 3000.0, 4),
            bundle("b", (2025, 3, 22), "webinar", 500.0, 500.0, 2),
            bundle("c", (2025, 4, 5), "seminar", 2000.0, 8000.0, 6),
        ]);

        assert_eq!(payload.summary.total_events, 3);
        assert_eq!(payload.summary.total_expenses, 3500.0);
        assert_eq!(payload.summary.total_income, 11500.0);
        assert_eq!(payload.summary.total_attendees, 150);
        assert_eq!(payload.summary.total_clients, 12);
        assert_eq!(
            payload.summary.roi,
            (11500.0 - 3500.0) / 3500.0 * 100.0
        );
        assert_eq!(payload.summary.overall_conversion_rate, 8.0);
        assert_eq!(payload.summary.expense_per_client, 3500.0 / 12.0);
    }

    #[test]
    fn per_event_rows_carry_their_own_metrics() {
        let payload = build_analytics(&[bundle("a", (2025, 3, 10), "seminar", 1000.0, 3000.0, 4)]);

        let event = &payload.events[0];
        assert_eq!(event.id, "a");
        assert_eq!(event.roi, 200.0);
        assert_eq!(event.attendees, 50);
        assert_eq!(event.conversion_rate, 8.0);
    }

    #[test]
    fn monthly_data_groups_and_sorts_by_month() {
        let payload = build_analytics(&[
            bundle("a", (2025, 4, 5), "seminar", 2000.0, 8000.0, 6),
            bundle("b", (2025, 3, 10), "seminar", 1000.0, 3000.0, 4),
            bundle("c", (2025, 3, 22), "webinar", 500.0, 500.0, 2),
        ]);

        let months: Vec<&str> = payload
            .monthly_data
            .iter()
            .map(|entry| entry.month.as_str())
            .collect();
        assert_eq!(months, vec!["2025-03", "2025-04"]);

        let march = &payload.monthly_data[0];
        assert_eq!(march.events, 2);
        assert_eq!(march.expenses, 1500.0);
        assert_eq!(march.income, 3500.0);
        assert_eq!(march.roi, (3500.0 - 1500.0) / 1500.0 * 100.0);
    }

    #[test]
    fn type_breakdown_groups_by_marketing_type() {
        let payload = build_analytics(&[
            bundle("a", (2025, 3, 10), "seminar", 1000.0, 3000.0, 4),
            bundle("b", (2025, 4, 5), "seminar", 2000.0, 8000.0, 6),
            bundle("c", (2025, 3, 22), "webinar", 500.0, 500.0, 2),
        ]);

        assert_eq!(payload.metrics_by_type.len(), 2);
        let seminar = payload
            .metrics_by_type
            .iter()
            .find(|entry| entry.marketing_type == "seminar")
            .unwrap();
        assert_eq!(seminar.events, 2);
        assert_eq!(seminar.expenses, 3000.0);
        assert_eq!(seminar.attendees, 100);
        assert_eq!(seminar.clients, 10);
        assert_eq!(seminar.conversion_rate, 10.0);
    }

    #[test]
    fn empty_scope_serializes_to_zeroes() {
        let payload = AnalyticsResponse::empty();
        assert_eq!(payload.summary.total_events, 0);
        assert_eq!(payload.summary.roi, 0.0);
        assert!(payload.events.is_empty());
        assert!(payload.monthly_data.is_empty());
        assert!(payload.metrics_by_type.is_empty());
    }
}
