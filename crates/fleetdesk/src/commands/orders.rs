//! Order command handlers.

use serde::Serialize;
use tabled::Tabled;

use fleetdesk_core::datefmt::{format_date_time, format_relative};
use fleetdesk_core::format::{address_display_name, format_weight};
use fleetdesk_core::status::order_status_config;
use fleetdesk_core::types::{AddressRef, Order, OrderFormData, OrderStatus, OrderTrip, Pallet};
use fleetdesk_core::validation::Validate;
use fleetdesk_core::{Pagination, Route};

use super::{Ctx, trips, util};
use crate::cli::{OrderFields, OrdersArgs, OrdersCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Cargo")]
    cargo: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Pallets")]
    pallets: usize,
    #[tabled(rename = "Created")]
    created: String,
}

fn destination_label(dest: Option<&AddressRef>) -> String {
    match dest {
        Some(AddressRef::Populated(address)) => address_display_name(address),
        Some(AddressRef::Id(id)) => id.clone(),
        None => "-".into(),
    }
}

fn order_row(o: &Order, ctx: &Ctx<'_>) -> OrderRow {
    let tag = order_status_config(&o.status, ctx.console.i18n().as_ref());
    OrderRow {
        id: o.id.clone(),
        status: output::tag(&tag.label, tag.severity, ctx.color),
        cargo: format_weight(o.cargo_weight.as_str(), false),
        remaining: format_weight(o.remaining_cargo.as_str(), false),
        destination: destination_label(o.destination.as_ref()),
        pallets: o.pallets.len(),
        created: format_relative(&o.created_at),
    }
}

fn detail(o: &Order, ctx: &Ctx<'_>) -> String {
    let tag = order_status_config(&o.status, ctx.console.i18n().as_ref());
    let mut lines = vec![
        format!("ID:          {}", o.id),
        format!("Status:      {}", output::tag(&tag.label, tag.severity, ctx.color)),
        format!("Cargo:       {}", format_weight(o.cargo_weight.as_str(), false)),
        format!("Remaining:   {}", format_weight(o.remaining_cargo.as_str(), false)),
        format!("Destination: {}", destination_label(o.destination.as_ref())),
        format!("Notes:       {}", util::or_dash(o.notes.as_deref())),
        format!("Created:     {}", format_date_time(&o.created_at)),
        format!("Updated:     {}", format_date_time(&o.updated_at)),
        format!("Pallets:     {}", o.pallets.len()),
    ];
    for p in &o.pallets {
        lines.push(format!("  #{:<4} {} kg, {} m", p.id, p.weight, p.height));
    }
    lines.join("\n")
}

/// An order together with its trips, for structured output.
#[derive(Serialize)]
struct OrderView<'a> {
    order: &'a Order,
    trips: &'a [OrderTrip],
}

// ── Form input ──────────────────────────────────────────────────────

/// Parse repeated `WEIGHT:HEIGHT` flags. Pallets are numbered from 1.
fn parse_pallets(raw: &[String]) -> Result<Vec<Pallet>, CliError> {
    raw.iter()
        .enumerate()
        .map(|(i, flag)| {
            let (weight, height) = flag.split_once(':').ok_or_else(|| CliError::Validation {
                field: "pallet".into(),
                reason: format!("expected WEIGHT:HEIGHT, got '{flag}'"),
            })?;
            Ok(Pallet {
                id: (i + 1).to_string(),
                weight: weight.trim().into(),
                height: height.trim().into(),
            })
        })
        .collect()
}

/// Overlay the given flags on `base`. Pallet flags replace every pallet.
fn merge(base: OrderFormData, f: OrderFields) -> Result<OrderFormData, CliError> {
    let pallets = if f.pallets.is_empty() {
        base.pallets
    } else {
        parse_pallets(&f.pallets)?
    };
    Ok(OrderFormData {
        cargo_weight: f.cargo_weight.unwrap_or(base.cargo_weight),
        destination: f.destination.unwrap_or(base.destination),
        pallets,
        notes: util::non_blank(f.notes.or(base.notes)),
        status: f.status.map(OrderStatus::from).or(base.status),
    })
}

fn reject_unknown_status(status: Option<&OrderStatus>) -> Result<(), CliError> {
    match status {
        Some(OrderStatus::Unknown(raw)) => Err(CliError::Validation {
            field: "status".into(),
            reason: format!(
                "'{raw}' is not one of {}",
                OrderStatus::ALL.map(|s| s.to_string()).join(", ")
            ),
        }),
        _ => Ok(()),
    }
}

/// Check a `--status` flag against the order's current status. A status
/// the server sent is kept as is when the flag is absent.
fn check_requested_status(
    current: &OrderStatus,
    requested: Option<&OrderStatus>,
) -> Result<(), CliError> {
    reject_unknown_status(requested)?;
    match requested {
        Some(next) if next != current && !current.can_transition_to(next) => {
            Err(CliError::Validation {
                field: "status".into(),
                reason: format!("an order cannot move from {current} to {next}"),
            })
        }
        _ => Ok(()),
    }
}

fn load_failed(id: &str) -> CliError {
    CliError::NotFound {
        resource_type: "order".into(),
        identifier: id.into(),
        list_command: "orders list".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: OrdersArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    let store = ctx.console.orders();

    match args.command {
        OrdersCommand::List(page) => {
            util::enter(ctx, Route::Orders).await?;
            output::with_spinner(
                "Loading orders",
                ctx.quiet(),
                util::load_page(store, &page, ctx.page_size),
            )
            .await;
            let snap = store.list().snapshot();
            let out = output::render_list(
                ctx.format,
                &snap.items,
                |o| order_row(o, ctx),
                |o| o.id.clone(),
            )?;
            ctx.print(&out);
            if ctx.format == OutputFormat::Table {
                ctx.print(&output::page_footer(snap.page, snap.page_count(), snap.total));
            }
            Ok(())
        }

        OrdersCommand::Show { id } => {
            util::enter(ctx, Route::OrderDetails(id.clone())).await?;
            let trips_store = ctx.console.trips();
            let (order, ()) = output::with_spinner(
                "Loading order",
                ctx.quiet(),
                async { tokio::join!(store.load(&id), trips_store.fetch_order_trips(&id)) },
            )
            .await;
            let order = order.ok_or_else(|| load_failed(&id))?;
            let order_trips = trips_store.order_trips();

            let view = OrderView {
                order: &order,
                trips: &order_trips,
            };
            let out = output::render_single(
                ctx.format,
                &view,
                |v| {
                    let mut text = detail(v.order, ctx);
                    if !v.trips.is_empty() {
                        text.push_str("\n\n");
                        text.push_str(&trips::trips_table(v.trips, ctx));
                    }
                    text
                },
                |v| v.order.id.clone(),
            )?;
            ctx.print(&out);
            Ok(())
        }

        OrdersCommand::Create(fields) => {
            util::enter(ctx, Route::CreateOrder).await?;
            let data = merge(OrderFormData::default(), fields)?;
            reject_unknown_status(data.status.as_ref())?;
            data.validate()?;
            let id = store.create(&data).await.ok_or_else(|| CliError::Failed {
                action: "create order".into(),
            })?;
            // Scripts pick the new id up from stdout.
            println!("{id}");
            Ok(())
        }

        OrdersCommand::Edit { id, fields } => {
            util::enter(ctx, Route::EditOrder(id.clone())).await?;
            let current = store.load(&id).await.ok_or_else(|| load_failed(&id))?;
            let requested = fields.status.clone().map(OrderStatus::from);
            check_requested_status(&current.status, requested.as_ref())?;
            let data = merge(OrderFormData::from(&current), fields)?;
            data.validate()?;
            util::ensure(store.edit(&id, &data).await, "update order")
        }

        OrdersCommand::Cancel { id } => {
            util::enter(ctx, Route::OrderDetails(id.clone())).await?;
            let current = store.load(&id).await.ok_or_else(|| load_failed(&id))?;
            if !current.status.can_cancel() {
                return Err(CliError::Validation {
                    field: "status".into(),
                    reason: format!("order {id} is {} and cannot be cancelled", current.status),
                });
            }
            if !util::confirm(&format!("Cancel order {id}?"), ctx.global.yes)? {
                return Ok(());
            }
            store.cancel(&id).await?;
            Ok(())
        }
    }
}
