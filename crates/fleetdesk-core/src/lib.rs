// fleetdesk-core: Reactive data layer between fleetdesk-api and consumers (CLI).

pub mod console;
pub mod datefmt;
pub mod error;
pub mod format;
pub mod guard;
pub mod i18n;
pub mod notify;
pub mod status;
pub mod store;
pub mod validation;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use console::Console;
pub use error::CoreError;
pub use guard::{Navigation, Route};
pub use i18n::{English, MessageKey, Translate};
pub use notify::{Notification, Notifications, Severity};
pub use store::{
    AddressesStore, AuthStore, FormModal, ListState, OrdersStore, Page, Pagination, StoreContext,
    TripsStore, TrucksStore,
};
pub use workflow::{Confirm, ConfirmPrompt, TripWorkflow};

// Re-export the wire model so consumers need a single dependency.
pub use fleetdesk_api::types;
pub use fleetdesk_api::{ApiClient, Error as ApiError, LoginCredentials, TokenStore};
