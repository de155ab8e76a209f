//! Address command handlers.

use tabled::Tabled;

use fleetdesk_core::format::address_display_name;
use fleetdesk_core::types::{Address, AddressFormData};
use fleetdesk_core::validation::Validate;
use fleetdesk_core::{CoreError, Pagination, Route};

use super::{Ctx, util};
use crate::cli::{AddressFields, AddressesArgs, AddressesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Country")]
    country: String,
}

impl From<&Address> for AddressRow {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id.clone(),
            address: address_display_name(a),
            country: a.country.clone(),
        }
    }
}

/// Overlay the given flags on `base`.
fn merge(base: AddressFormData, fields: AddressFields) -> AddressFormData {
    AddressFormData {
        address_line1: fields.line1.unwrap_or(base.address_line1),
        address_line2: util::non_blank(fields.line2.or(base.address_line2)),
        city: fields.city.unwrap_or(base.city),
        country: fields.country.unwrap_or(base.country),
        postcode: fields.postcode.unwrap_or(base.postcode),
        state: fields.state.unwrap_or(base.state),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AddressesArgs, ctx: &Ctx<'_>) -> Result<(), CliError> {
    util::enter(ctx, Route::Addresses).await?;
    let store = ctx.console.addresses();

    match args.command {
        AddressesCommand::List(page) => {
            output::with_spinner(
                "Loading addresses",
                ctx.quiet(),
                util::load_page(store, &page, ctx.page_size),
            )
            .await;
            let snap = store.list().snapshot();
            let out = output::render_list(
                ctx.format,
                &snap.items,
                |a| AddressRow::from(a),
                |a| a.id.clone(),
            )?;
            ctx.print(&out);
            if ctx.format == OutputFormat::Table {
                ctx.print(&output::page_footer(snap.page, snap.page_count(), snap.total));
            }
            Ok(())
        }

        AddressesCommand::Add(fields) => {
            let data = merge(AddressFormData::default(), fields);
            data.validate()?;
            store.open_modal(None);
            util::ensure(store.submit_form(&data).await, "add address")
        }

        AddressesCommand::Edit { id, fields } => {
            let current = ctx
                .console
                .api()
                .get_address_by_id(&id)
                .await
                .map_err(CoreError::from)?;
            let data = merge(AddressFormData::from(&current), fields);
            data.validate()?;
            store.open_modal(Some(current));
            util::ensure(store.submit_form(&data).await, "update address")
        }

        AddressesCommand::Remove { id } => {
            if !util::confirm(&format!("Delete address {id}?"), ctx.global.yes)? {
                return Ok(());
            }
            util::ensure(store.remove(&id).await, "delete address")
        }
    }
}
