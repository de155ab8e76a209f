// Typed endpoint methods, one `impl ApiClient` block per resource family.
//
// Every method maps to exactly one REST call. No business logic lives
// here; failures come back from the adapter unchanged.

mod addresses;
mod auth;
mod orders;
mod trips;
mod trucks;

pub use auth::LoginCredentials;

use crate::client::RequestConfig;
use crate::types::PageParams;

/// Request config carrying the pagination query, or `None` when no
/// parameter is set so the URL stays bare.
fn page_config(params: Option<&PageParams>) -> Option<RequestConfig> {
    let query = params.map(PageParams::to_query).unwrap_or_default();
    if query.is_empty() {
        None
    } else {
        Some(RequestConfig::with_query(query))
    }
}
