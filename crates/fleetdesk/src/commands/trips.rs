//! Trip command handlers.

use tabled::{Table, Tabled, settings::Style};
use tracing::debug;

use fleetdesk_core::datefmt::{format_date_time, now_utc};
use fleetdesk_core::format::format_weight;
use fleetdesk_core::status::{trip_status_label, trip_status_severity};
use fleetdesk_core::types::{
    CompleteTripData, CreateOrderTripData, OrderTrip, Quantity, Truck, UpdateOrderTripData,
};
use fleetdesk_core::validation::validate_numeric;
use fleetdesk_core::{Pagination, Route};

use super::{Ctx, util};
use crate::cli::{OutputFormat, TripsArgs, TripsCommand};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct TripRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Trip")]
    number: String,
    #[tabled(rename = "Truck")]
    truck: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Pallets")]
    pallets: usize,
    #[tabled(rename = "Fuel (l)")]
    fuel: String,
    #[tabled(rename = "Duration (h)")]
    duration: String,
}

fn trip_row(t: &OrderTrip, ctx: &Ctx<'_>) -> TripRow {
    let label = trip_status_label(&t.status, ctx.console.i18n().as_ref());
    let actual_or_estimate = |actual: Option<&Quantity>, est: &str| {
        actual.map_or_else(|| est.to_owned(), |a| a.to_string())
    };
    TripRow {
        id: t.id.clone(),
        number: t.trip_number.clone(),
        truck: t
            .truck
            .as_ref()
            .map_or_else(|| "-".to_owned(), |tr| tr.plate_number.clone()),
        start: format_date_time(&t.start_date),
        status: output::tag(&label, trip_status_severity(&t.status), ctx.color),
        pallets: t.pallets.len(),
        fuel: actual_or_estimate(t.actual_fuel.as_ref(), t.estimated_fuel.as_str()),
        duration: actual_or_estimate(t.actual_duration.as_ref(), t.estimated_duration.as_str()),
    }
}

/// Rounded table of trips, shared with `orders show`.
pub(crate) fn trips_table(trips: &[OrderTrip], ctx: &Ctx<'_>) -> String {
    let rows: Vec<TripRow> = trips.iter().map(|t| trip_row(t, ctx)).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct AvailableTruckRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Max Weight")]
    max_weight: String,
    #[tabled(rename = "Pallets")]
    pallets: u32,
}

impl From<&Truck> for AvailableTruckRow {
    fn from(t: &Truck) -> Self {
        Self {
            id: t.id.clone(),
            plate: t.plate_number.clone(),
            driver: t.driver_name.clone(),
            max_weight: format_weight(t.max_weight.as_str(), false),
            pallets: t.max_pallets,
        }
    }
}

// ── Input checks ────────────────────────────────────────────────────

fn numeric(field: &str, value: Option<&str>) -> Result<(), CliError> {
    if value.is_none() || validate_numeric(value) {
        return Ok(());
    }
    Err(CliError::Validation {
        field: field.into(),
        reason: "must be a number".into(),
    })
}

fn required(field: &str, value: &str) -> Result<(), CliError> {
    if value.trim().is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "is required".into(),
        });
    }
    Ok(())
}

fn required_numeric(field: &str, value: &str) -> Result<(), CliError> {
    required(field, value)?;
    numeric(field, Some(value))
}

fn update_payload(
    truck: Option<String>,
    start: Option<String>,
    fuel: Option<String>,
    duration: Option<String>,
    notes: Option<String>,
) -> Result<UpdateOrderTripData, CliError> {
    numeric("fuel", fuel.as_deref())?;
    numeric("duration", duration.as_deref())?;
    let start_date = start.as_deref().map(util::parse_start).transpose()?;
    let data = UpdateOrderTripData {
        truck_id: truck,
        start_date,
        pallets: None,
        estimated_fuel: fuel,
        estimated_duration: duration,
        notes,
    };
    if data == UpdateOrderTripData::default() {
        return Err(CliError::Missing {
            message: "nothing to update; pass at least one of --truck, --start, --fuel, --duration, --notes".into(),
        });
    }
    Ok(data)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: TripsArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    util::enter(ctx, Route::Trips).await?;
    let store = ctx.console.trips();

    match args.command {
        TripsCommand::List(page) => {
            output::with_spinner(
                "Loading trips",
                ctx.quiet(),
                util::load_page(store, &page, ctx.page_size),
            )
            .await;
            let snap = store.list().snapshot();
            let out = output::render_list(
                ctx.format,
                &snap.items,
                |t| trip_row(t, ctx),
                |t| t.id.clone(),
            )?;
            ctx.print(&out);
            if ctx.format == OutputFormat::Table {
                ctx.print(&output::page_footer(snap.page, snap.page_count(), snap.total));
            }
            Ok(())
        }

        TripsCommand::ForOrder { order_id } => {
            output::with_spinner(
                "Loading trips",
                ctx.quiet(),
                store.fetch_order_trips(&order_id),
            )
            .await;
            let trips = store.order_trips();
            let out = output::render_list(
                ctx.format,
                &trips,
                |t| trip_row(t, ctx),
                |t| t.id.clone(),
            )?;
            ctx.print(&out);
            Ok(())
        }

        TripsCommand::Trucks { order_id } => {
            output::with_spinner(
                "Loading trucks",
                ctx.quiet(),
                store.fetch_available_trucks(&order_id),
            )
            .await;
            let trucks = store.available_trucks();
            let out = output::render_list(
                ctx.format,
                &trucks,
                |t| AvailableTruckRow::from(t),
                |t| t.id.clone(),
            )?;
            ctx.print(&out);
            Ok(())
        }

        TripsCommand::Create {
            order_id,
            truck,
            start,
            pallets,
            fuel,
            duration,
            notes,
        } => {
            required_numeric("fuel", &fuel)?;
            required_numeric("duration", &duration)?;
            let start_date = match start.as_deref() {
                Some(raw) => util::parse_start(raw)?,
                None => now_utc(),
            };
            let data = CreateOrderTripData {
                truck_id: truck,
                start_date,
                pallets,
                estimated_fuel: fuel,
                estimated_duration: duration,
                notes: util::non_blank(notes),
            };
            let trip = store.create_trip(&order_id, &data).await?;
            let out = output::render_single(
                ctx.format,
                &trip,
                |t| trips_table(std::slice::from_ref(t), ctx),
                |t| t.id.clone(),
            )?;
            ctx.print(&out);
            Ok(())
        }

        TripsCommand::Update {
            trip_id,
            truck,
            start,
            fuel,
            duration,
            notes,
        } => {
            let data = update_payload(truck, start, fuel, duration, util::non_blank(notes))?;
            store.update_trip(&trip_id, &data).await?;
            Ok(())
        }

        TripsCommand::Start { trip_id } => {
            util::require_interactive("start trip", ctx.global.yes)?;
            let workflow = ctx.console.trip_workflow(util::TerminalConfirm {
                assume_yes: ctx.global.yes,
            });
            // A failed start is reported as an error notification; a
            // declined prompt is not an error.
            if !workflow.confirm_start_trip(&trip_id).await {
                debug!(trip_id, "trip not started");
            }
            Ok(())
        }

        TripsCommand::Complete {
            trip_id,
            fuel,
            duration,
        } => {
            // Actual values are free text ("3h") and sent as typed.
            required("fuel", &fuel)?;
            required("duration", &duration)?;
            let data = CompleteTripData {
                actual_fuel: fuel,
                actual_duration: duration,
            };
            store.complete_trip(&trip_id, &data).await?;
            Ok(())
        }

        TripsCommand::Delete { trip_id } => {
            util::require_interactive("delete trip", ctx.global.yes)?;
            let workflow = ctx.console.trip_workflow(util::TerminalConfirm {
                assume_yes: ctx.global.yes,
            });
            if !workflow.confirm_delete_trip(&trip_id).await {
                debug!(trip_id, "trip not deleted");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn update_needs_at_least_one_field() {
        let err = update_payload(None, None, None, None, None).unwrap_err();
        assert!(err.to_string().contains("nothing to update"));
    }

    #[test]
    fn update_rejects_non_numeric_fuel() {
        let err = update_payload(None, None, Some("lots".into()), None, None).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn update_carries_only_given_fields() {
        let data = update_payload(Some("t1".into()), None, None, Some("4.5".into()), None).unwrap();
        assert_eq!(data.truck_id.as_deref(), Some("t1"));
        assert_eq!(data.estimated_duration.as_deref(), Some("4.5"));
        assert!(data.start_date.is_none());
        assert!(data.estimated_fuel.is_none());
    }

    #[test]
    fn estimates_must_be_numeric() {
        assert!(required_numeric("fuel", "").is_err());
        assert!(required_numeric("fuel", "12,5").is_ok());
        assert!(required_numeric("fuel", "-3").is_err());
        assert!(required("duration", "3h").is_ok());
        assert!(required("duration", " ").is_err());
    }
}
