//! Truck command handlers.

use tabled::Tabled;

use fleetdesk_core::datefmt::format_date_time;
use fleetdesk_core::format::format_weight;
use fleetdesk_core::types::{Truck, TruckFormData};
use fleetdesk_core::validation::Validate;
use fleetdesk_core::{CoreError, Pagination, Route};

use super::{Ctx, util};
use crate::cli::{OutputFormat, TruckFields, TrucksArgs, TrucksCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TruckRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "W×H×L (m)")]
    dimensions: String,
    #[tabled(rename = "Max Weight")]
    max_weight: String,
    #[tabled(rename = "Pallets")]
    pallets: u32,
    #[tabled(rename = "Active")]
    active: &'static str,
}

impl TruckRow {
    fn new(t: &Truck, tonnes: bool) -> Self {
        Self {
            id: t.id.clone(),
            plate: t.plate_number.clone(),
            driver: t.driver_name.clone(),
            dimensions: format!("{}×{}×{}", t.width, t.height, t.length),
            max_weight: format_weight(t.max_weight.as_str(), tonnes),
            pallets: t.max_pallets,
            active: if t.is_active { "yes" } else { "no" },
        }
    }
}

fn detail(t: &Truck, tonnes: bool) -> String {
    [
        format!("ID:           {}", t.id),
        format!("Plate:        {}", t.plate_number),
        format!("VIN:          {}", t.vin_code),
        format!("Registration: {}", t.registration_certificate),
        format!("Driver:       {}", t.driver_name),
        format!("Model:        {}", util::or_dash(t.truck_model.as_deref())),
        format!("Year:         {}", util::or_dash(t.manufacturing_year.as_deref())),
        format!("Width:        {} m", t.width),
        format!("Height:       {} m", t.height),
        format!("Length:       {} m", t.length),
        format!("Max Weight:   {}", format_weight(t.max_weight.as_str(), tonnes)),
        format!("Max Pallets:  {}", t.max_pallets),
        format!("Active:       {}", t.is_active),
        format!("Notes:        {}", util::or_dash(t.notes.as_deref())),
        format!("Updated:      {}", format_date_time(&t.updated_at)),
    ]
    .join("\n")
}

/// Overlay the given flags on `base`. Dimensions are passed through as
/// typed, so "12.50" reaches the server unchanged.
fn merge(base: TruckFormData, f: TruckFields) -> TruckFormData {
    TruckFormData {
        plate_number: f.plate.unwrap_or(base.plate_number),
        vin_code: f.vin.unwrap_or(base.vin_code),
        registration_certificate: f.registration.unwrap_or(base.registration_certificate),
        driver_name: f.driver.unwrap_or(base.driver_name),
        width: f.width.unwrap_or(base.width),
        height: f.height.unwrap_or(base.height),
        length: f.length.unwrap_or(base.length),
        max_weight: f.max_weight.unwrap_or(base.max_weight),
        truck_model: util::non_blank(f.model.or(base.truck_model)),
        manufacturing_year: util::non_blank(f.year.or(base.manufacturing_year)),
        notes: util::non_blank(f.notes.or(base.notes)),
        is_active: f.active.or(base.is_active),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: TrucksArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    util::enter(ctx, Route::Trucks).await?;
    let store = ctx.console.trucks();

    match args.command {
        TrucksCommand::List { page, tonnes } => {
            store.set_weight_in_tonnes(tonnes);
            output::with_spinner(
                "Loading trucks",
                ctx.quiet(),
                util::load_page(store, &page, ctx.page_size),
            )
            .await;
            let snap = store.list().snapshot();
            let tonnes = store.weight_in_tonnes();
            let out = output::render_list(
                ctx.format,
                &snap.items,
                |t| TruckRow::new(t, tonnes),
                |t| t.id.clone(),
            )?;
            ctx.print(&out);
            if ctx.format == OutputFormat::Table {
                ctx.print(&output::page_footer(snap.page, snap.page_count(), snap.total));
            }
            Ok(())
        }

        TrucksCommand::Show { id, tonnes } => {
            store.set_weight_in_tonnes(tonnes);
            let truck = ctx
                .console
                .api()
                .get_truck_by_id(&id)
                .await
                .map_err(CoreError::from)?;
            store.open_details(truck);
            let selected = store.selected().ok_or_else(|| CliError::NotFound {
                resource_type: "truck".into(),
                identifier: id,
                list_command: "trucks list".into(),
            })?;
            let tonnes = store.weight_in_tonnes();
            let out = output::render_single(
                ctx.format,
                &selected,
                |t| detail(t, tonnes),
                |t| t.id.clone(),
            )?;
            store.close_details();
            ctx.print(&out);
            Ok(())
        }

        TrucksCommand::Add(fields) => {
            let data = merge(TruckFormData::default(), fields);
            data.validate()?;
            store.open_modal(None);
            util::ensure(store.submit_form(&data).await, "add truck")
        }

        TrucksCommand::Edit { id, fields } => {
            let current = ctx
                .console
                .api()
                .get_truck_by_id(&id)
                .await
                .map_err(CoreError::from)?;
            let data = merge(TruckFormData::from(&current), fields);
            data.validate()?;
            store.open_modal(Some(current));
            util::ensure(store.submit_form(&data).await, "update truck")
        }

        TrucksCommand::Remove { id } => {
            if !util::confirm(&format!("Delete truck {id}?"), ctx.global.yes)? {
                return Ok(());
            }
            util::ensure(store.remove(&id).await, "delete truck")
        }
    }
}
