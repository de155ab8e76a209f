// ── Message catalogue ──
//
// Stores and helpers never hard-code user-facing text; they emit a
// `MessageKey` and resolve it through a `Translate` implementation.
// English ships as the default catalogue.

use std::borrow::Cow;

use strum::{EnumIter, EnumString, IntoStaticStr};

/// Every user-facing message the core layer can produce.
///
/// The string form is the dotted catalogue key, e.g.
/// `addresses.failedToSaveAddress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
pub enum MessageKey {
    // ── Common ───────────────────────────────────────────────────────
    #[strum(serialize = "common.cancel")]
    Cancel,
    #[strum(serialize = "common.delete")]
    Delete,

    // ── Addresses ────────────────────────────────────────────────────
    #[strum(serialize = "addresses.addressCreatedSuccessfully")]
    AddressCreated,
    #[strum(serialize = "addresses.addressUpdatedSuccessfully")]
    AddressUpdated,
    #[strum(serialize = "addresses.addressDeletedSuccessfully")]
    AddressDeleted,
    #[strum(serialize = "addresses.failedToLoadAddresses")]
    FailedToLoadAddresses,
    #[strum(serialize = "addresses.failedToSaveAddress")]
    FailedToSaveAddress,
    #[strum(serialize = "addresses.failedToDeleteAddress")]
    FailedToDeleteAddress,

    // ── Trucks ───────────────────────────────────────────────────────
    #[strum(serialize = "trucks.truckCreatedSuccessfully")]
    TruckCreated,
    #[strum(serialize = "trucks.truckUpdatedSuccessfully")]
    TruckUpdated,
    #[strum(serialize = "trucks.truckDeletedSuccessfully")]
    TruckDeleted,
    #[strum(serialize = "trucks.failedToLoadTrucks")]
    FailedToLoadTrucks,
    #[strum(serialize = "trucks.failedToSaveTruck")]
    FailedToSaveTruck,
    #[strum(serialize = "trucks.failedToDeleteTruck")]
    FailedToDeleteTruck,

    // ── Orders ───────────────────────────────────────────────────────
    #[strum(serialize = "orders.orderCreatedSuccessfully")]
    OrderCreated,
    #[strum(serialize = "orders.orderUpdatedSuccessfully")]
    OrderUpdated,
    #[strum(serialize = "orders.orderCancelledSuccessfully")]
    OrderCancelled,
    #[strum(serialize = "orders.failedToLoadOrders")]
    FailedToLoadOrders,
    #[strum(serialize = "orders.failedToLoadOrder")]
    FailedToLoadOrder,
    #[strum(serialize = "orders.failedToSaveOrder")]
    FailedToSaveOrder,
    #[strum(serialize = "orders.failedToCancelOrder")]
    FailedToCancelOrder,
    #[strum(serialize = "orders.statusDraft")]
    OrderStatusDraft,
    #[strum(serialize = "orders.statusNew")]
    OrderStatusNew,
    #[strum(serialize = "orders.statusInProgress")]
    OrderStatusInProgress,
    #[strum(serialize = "orders.statusDone")]
    OrderStatusDone,
    #[strum(serialize = "orders.statusCancelled")]
    OrderStatusCancelled,

    // ── Trips ────────────────────────────────────────────────────────
    #[strum(serialize = "trips.tripCreatedSuccessfully")]
    TripCreated,
    #[strum(serialize = "trips.tripUpdatedSuccessfully")]
    TripUpdated,
    #[strum(serialize = "trips.tripStartedSuccessfully")]
    TripStarted,
    #[strum(serialize = "trips.tripCompletedSuccessfully")]
    TripCompleted,
    #[strum(serialize = "trips.tripDeletedSuccessfully")]
    TripDeleted,
    #[strum(serialize = "trips.failedToLoadTrips")]
    FailedToLoadTrips,
    #[strum(serialize = "trips.failedToCreateTrip")]
    FailedToCreateTrip,
    #[strum(serialize = "trips.failedToUpdateTrip")]
    FailedToUpdateTrip,
    #[strum(serialize = "trips.failedToStartTrip")]
    FailedToStartTrip,
    #[strum(serialize = "trips.failedToCompleteTrip")]
    FailedToCompleteTrip,
    #[strum(serialize = "trips.failedToDeleteTrip")]
    FailedToDeleteTrip,
    #[strum(serialize = "trips.failedToLoadAvailableTrucks")]
    FailedToLoadAvailableTrucks,
    #[strum(serialize = "trips.start")]
    StartTrip,
    #[strum(serialize = "trips.deleteTrip")]
    DeleteTrip,
    #[strum(serialize = "trips.confirmStartTripMessage")]
    ConfirmStartTrip,
    #[strum(serialize = "trips.confirmDeleteTripMessage")]
    ConfirmDeleteTrip,
    #[strum(serialize = "trips.status.planned")]
    TripStatusPlanned,
    #[strum(serialize = "trips.status.inProgress")]
    TripStatusInProgress,
    #[strum(serialize = "trips.status.done")]
    TripStatusDone,
    #[strum(serialize = "trips.status.cancelled")]
    TripStatusCancelled,
}

impl MessageKey {
    /// The dotted catalogue key.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Resolves message keys to display text.
pub trait Translate: Send + Sync {
    fn translate(&self, key: MessageKey) -> Cow<'static, str>;
}

/// Built-in English catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translate for English {
    #[allow(clippy::too_many_lines)]
    fn translate(&self, key: MessageKey) -> Cow<'static, str> {
        use MessageKey as K;

        Cow::Borrowed(match key {
            K::Cancel => "Cancel",
            K::Delete => "Delete",

            K::AddressCreated => "Address created successfully",
            K::AddressUpdated => "Address updated successfully",
            K::AddressDeleted => "Address deleted successfully",
            K::FailedToLoadAddresses => "Failed to load addresses",
            K::FailedToSaveAddress => "Failed to save address",
            K::FailedToDeleteAddress => "Failed to delete address",

            K::TruckCreated => "Truck created successfully",
            K::TruckUpdated => "Truck updated successfully",
            K::TruckDeleted => "Truck deleted successfully",
            K::FailedToLoadTrucks => "Failed to load trucks",
            K::FailedToSaveTruck => "Failed to save truck",
            K::FailedToDeleteTruck => "Failed to delete truck",

            K::OrderCreated => "Order created successfully",
            K::OrderUpdated => "Order updated successfully",
            K::OrderCancelled => "Order cancelled successfully",
            K::FailedToLoadOrders => "Failed to load orders",
            K::FailedToLoadOrder => "Failed to load order",
            K::FailedToSaveOrder => "Failed to save order",
            K::FailedToCancelOrder => "Failed to cancel order",
            K::OrderStatusDraft => "Draft",
            K::OrderStatusNew => "New",
            K::OrderStatusInProgress | K::TripStatusInProgress => "In progress",
            K::OrderStatusDone | K::TripStatusDone => "Done",
            K::OrderStatusCancelled | K::TripStatusCancelled => "Cancelled",

            K::TripCreated => "Trip created successfully",
            K::TripUpdated => "Trip updated successfully",
            K::TripStarted => "Trip started successfully",
            K::TripCompleted => "Trip completed successfully",
            K::TripDeleted => "Trip deleted successfully",
            K::FailedToLoadTrips => "Failed to load trips",
            K::FailedToCreateTrip => "Failed to create trip",
            K::FailedToUpdateTrip => "Failed to update trip",
            K::FailedToStartTrip => "Failed to start trip",
            K::FailedToCompleteTrip => "Failed to complete trip",
            K::FailedToDeleteTrip => "Failed to delete trip",
            K::FailedToLoadAvailableTrucks => "Failed to load available trucks",
            K::StartTrip => "Start trip",
            K::DeleteTrip => "Delete trip",
            K::ConfirmStartTrip => "Are you sure you want to start this trip?",
            K::ConfirmDeleteTrip => "Are you sure you want to delete this trip?",
            K::TripStatusPlanned => "Planned",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn keys_round_trip_through_their_dotted_form() {
        for key in MessageKey::iter() {
            assert_eq!(MessageKey::from_str(key.key()).unwrap(), key);
        }
        assert_eq!(
            MessageKey::FailedToSaveAddress.key(),
            "addresses.failedToSaveAddress"
        );
    }

    #[test]
    fn english_has_text_for_every_key() {
        for key in MessageKey::iter() {
            assert!(!English.translate(key).is_empty(), "{} is blank", key.key());
        }
    }
}
