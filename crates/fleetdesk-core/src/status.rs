// ── Status labels ──
//
// Pure mappings from lifecycle status to a translated label and a
// display severity. Unknown statuses show their raw value.

use strum::{Display, EnumString};

use fleetdesk_api::types::{OrderStatus, TripStatus};

use crate::i18n::{MessageKey, Translate};

/// Visual weight of a status tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TagSeverity {
    Secondary,
    Info,
    Warn,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTag {
    pub label: String,
    pub severity: TagSeverity,
}

pub fn order_status_config(status: &OrderStatus, i18n: &dyn Translate) -> StatusTag {
    let (key, severity) = match status {
        OrderStatus::Draft => (MessageKey::OrderStatusDraft, TagSeverity::Secondary),
        OrderStatus::New => (MessageKey::OrderStatusNew, TagSeverity::Info),
        OrderStatus::InProgress => (MessageKey::OrderStatusInProgress, TagSeverity::Warn),
        OrderStatus::Done => (MessageKey::OrderStatusDone, TagSeverity::Success),
        OrderStatus::Cancelled => (MessageKey::OrderStatusCancelled, TagSeverity::Danger),
        OrderStatus::Unknown(raw) => {
            return StatusTag {
                label: raw.clone(),
                severity: TagSeverity::Secondary,
            };
        }
    };
    StatusTag {
        label: i18n.translate(key).into_owned(),
        severity,
    }
}

pub fn trip_status_label(status: &TripStatus, i18n: &dyn Translate) -> String {
    let key = match status {
        TripStatus::Planned => MessageKey::TripStatusPlanned,
        TripStatus::InProgress => MessageKey::TripStatusInProgress,
        TripStatus::Done => MessageKey::TripStatusDone,
        TripStatus::Cancelled => MessageKey::TripStatusCancelled,
        TripStatus::Unknown(raw) => return raw.clone(),
    };
    i18n.translate(key).into_owned()
}

pub fn trip_status_severity(status: &TripStatus) -> TagSeverity {
    match status {
        TripStatus::Planned => TagSeverity::Warn,
        TripStatus::Done => TagSeverity::Success,
        TripStatus::Cancelled => TagSeverity::Danger,
        TripStatus::InProgress | TripStatus::Unknown(_) => TagSeverity::Info,
    }
}
