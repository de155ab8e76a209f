// Wire types for the fleetdesk REST API.
//
// Field names follow the backend's camelCase JSON; Mongo-style `_id`
// identities are renamed to `id`. Numeric quantities stay strings
// (see `Quantity`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ── Quantity ─────────────────────────────────────────────────────────

/// A weight, dimension, fuel amount or duration kept as the text the user
/// or server produced (`"12.50"`, `"3h"`).
///
/// Accepts either a JSON number or a JSON string and always serializes as a
/// string, so values round-trip without reformatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(String);

impl Quantity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric reading of the value, accepting `,` as the decimal separator.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().replace(',', ".").parse().ok()
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Quantity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Pagination ───────────────────────────────────────────────────────

/// Optional `page` / `pageSize` query parameters for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Query pairs for the parameters that are set. Zero counts as unset.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.push(("page".to_owned(), page.to_string()));
        }
        if let Some(size) = self.page_size.filter(|s| *s > 0) {
            query.push(("pageSize".to_owned(), size.to_string()));
        }
        query
    }
}

/// Counters returned alongside every page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// A list-endpoint response: items plus counters.
pub trait Paginated {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, PageInfo);
}

macro_rules! page_envelope {
    ($name:ident, $field:ident, $item:ty) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(default)]
            pub $field: Vec<$item>,
            #[serde(default)]
            pub total: u64,
            #[serde(default)]
            pub page: u32,
            #[serde(default)]
            pub page_size: u32,
        }

        impl Paginated for $name {
            type Item = $item;

            fn into_parts(self) -> (Vec<$item>, PageInfo) {
                let info = PageInfo {
                    total: self.total,
                    page: self.page,
                    page_size: self.page_size,
                };
                (self.$field, info)
            }
        }
    };
}

page_envelope!(AddressPage, addresses, Address);
page_envelope!(TruckPage, trucks, Truck);
page_envelope!(OrderPage, orders, Order);
page_envelope!(TripPage, trips, OrderTrip);

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

// ── Addresses ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub country: String,
    pub postcode: String,
}

/// Create / update payload for an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressFormData {
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub country: String,
    pub postcode: String,
    pub state: String,
}

impl From<&Address> for AddressFormData {
    fn from(a: &Address) -> Self {
        Self {
            address_line1: a.address_line1.clone(),
            address_line2: a.address_line2.clone(),
            city: a.city.clone(),
            country: a.country.clone(),
            postcode: a.postcode.clone(),
            state: a.state.clone(),
        }
    }
}

// ── Trucks ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    #[serde(rename = "_id")]
    pub id: String,
    pub plate_number: String,
    #[serde(default)]
    pub vin_code: String,
    #[serde(default)]
    pub registration_certificate: String,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub width: Quantity,
    #[serde(default)]
    pub height: Quantity,
    #[serde(default)]
    pub length: Quantity,
    #[serde(default)]
    pub max_weight: Quantity,
    #[serde(default)]
    pub max_pallets: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create / update payload for a truck. Dimensions stay strings and are
/// validated client-side before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckFormData {
    pub plate_number: String,
    pub vin_code: String,
    pub registration_certificate: String,
    pub driver_name: String,
    pub width: String,
    pub height: String,
    pub length: String,
    pub max_weight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Truck> for TruckFormData {
    fn from(t: &Truck) -> Self {
        Self {
            plate_number: t.plate_number.clone(),
            vin_code: t.vin_code.clone(),
            registration_certificate: t.registration_certificate.clone(),
            driver_name: t.driver_name.clone(),
            width: t.width.to_string(),
            height: t.height.to_string(),
            length: t.length.to_string(),
            max_weight: t.max_weight.to_string(),
            truck_model: t.truck_model.clone(),
            manufacturing_year: t.manufacturing_year.clone(),
            notes: t.notes.clone(),
            is_active: Some(t.is_active),
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────

/// Order lifecycle: `draft → new → in_progress → done`, with `cancelled`
/// reachable from any non-terminal state. Unrecognised values are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Draft,
    New,
    InProgress,
    Done,
    Cancelled,
    Unknown(String),
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::New,
        Self::InProgress,
        Self::Done,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Unknown(raw) => raw,
        }
    }

    fn rank(&self) -> Option<u8> {
        match self {
            Self::Draft => Some(0),
            Self::New => Some(1),
            Self::InProgress => Some(2),
            Self::Done => Some(3),
            Self::Cancelled | Self::Unknown(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Progress only goes forward; cancellation is allowed from every
    /// non-terminal state. Nothing leaves a terminal or unknown state.
    pub fn can_transition_to(&self, next: &Self) -> bool {
        if self.is_terminal() || matches!(self, Self::Unknown(_)) {
            return false;
        }
        if *next == Self::Cancelled {
            return true;
        }
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }

    pub fn can_cancel(&self) -> bool {
        self.can_transition_to(&Self::Cancelled)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "draft" => Self::Draft,
            "new" => Self::New,
            "in_progress" => Self::InProgress,
            "done" => Self::Done,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown(s),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<OrderStatus> for String {
    fn from(s: OrderStatus) -> Self {
        match s {
            OrderStatus::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pallet {
    pub id: String,
    pub weight: Quantity,
    pub height: Quantity,
}

/// An order's destination: either a bare address id or the populated
/// address document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressRef {
    Populated(Box<Address>),
    Id(String),
}

impl AddressRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(a) => &a.id,
            Self::Id(id) => id,
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::Populated(a) => Some(a),
            Self::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub cargo_weight: Quantity,
    #[serde(default)]
    pub remaining_cargo: Quantity,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<AddressRef>,
    #[serde(default)]
    pub pallets: Vec<Pallet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub trips: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create / update payload for an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormData {
    pub cargo_weight: String,
    /// Destination address id.
    pub destination: String,
    #[serde(default)]
    pub pallets: Vec<Pallet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl From<&Order> for OrderFormData {
    fn from(o: &Order) -> Self {
        Self {
            cargo_weight: o.cargo_weight.to_string(),
            destination: o
                .destination
                .as_ref()
                .map(|d| d.id().to_owned())
                .unwrap_or_default(),
            pallets: o.pallets.clone(),
            notes: o.notes.clone(),
            status: Some(o.status.clone()),
        }
    }
}

// ── Trips ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TripStatus {
    Planned,
    InProgress,
    Done,
    Cancelled,
    Unknown(String),
}

impl TripStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for TripStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "planned" => Self::Planned,
            "in_progress" => Self::InProgress,
            "done" => Self::Done,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown(s),
        }
    }
}

impl From<&str> for TripStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<TripStatus> for String {
    fn from(s: TripStatus) -> Self {
        match s {
            TripStatus::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trip scoped to one order, carrying some of its pallets on one truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrip {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck: Option<Truck>,
    #[serde(default)]
    pub trip_number: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    pub status: TripStatus,
    #[serde(default)]
    pub pallets: Vec<String>,
    #[serde(default)]
    pub estimated_fuel: Quantity,
    #[serde(default)]
    pub estimated_duration: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_fuel: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /orders/:id/trips`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderTripData {
    pub truck_id: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub pallets: Vec<String>,
    pub estimated_fuel: String,
    pub estimated_duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial payload for `PUT /trips/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderTripData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pallets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_fuel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PATCH /trips/:id/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTripData {
    pub actual_fuel: String,
    pub actual_duration: String,
}
