//! Event pricing: a fixed base price per event type plus flat surcharges
//! for selected services.
//!
//! Pricing ignores guest count, date and venue. Unknown event types price
//! at zero and unknown services add nothing, so [`cost`] is total over any
//! input.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Event types with a listed base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    Birthday,
    ThemedParty,
    Graduation,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        Self::Wedding,
        Self::Birthday,
        Self::ThemedParty,
        Self::Graduation,
    ];

    /// Return the display label for this event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wedding => "Wedding",
            Self::Birthday => "Birthday",
            Self::ThemedParty => "Themed Party",
            Self::Graduation => "Graduation",
        }
    }

    pub fn base_price(&self) -> u64 {
        match self {
            Self::Wedding => 1000,
            Self::Birthday => 500,
            Self::ThemedParty => 750,
            Self::Graduation => 600,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label names no known [`EventType`] or [`Service`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {label:?}")]
pub struct UnknownLabel {
    what: &'static str,
    label: String,
}

// Accepts the display label as well as the upper-case enumeration names
// older data files used ("THEMED_PARTY").
impl FromStr for EventType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|t| normalize(t.as_str()) == wanted)
            .ok_or_else(|| UnknownLabel {
                what: "event type",
                label: s.to_owned(),
            })
    }
}

/// Services a booking can add on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Service {
    Catering,
    Cleaning,
    Decorations,
    Entertainment,
    Furniture,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Self::Catering,
        Self::Cleaning,
        Self::Decorations,
        Self::Entertainment,
        Self::Furniture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catering => "Catering",
            Self::Cleaning => "Cleaning",
            Self::Decorations => "Decorations",
            Self::Entertainment => "Entertainment",
            Self::Furniture => "Furniture",
        }
    }

    /// Flat surcharge for this service. Entertainment and furniture are
    /// booked separately and carry no surcharge here.
    pub fn surcharge(&self) -> u64 {
        match self {
            Self::Catering => 200,
            Self::Cleaning => 100,
            Self::Decorations => 150,
            Self::Entertainment | Self::Furniture => 0,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|svc| normalize(svc.as_str()) == wanted)
            .ok_or_else(|| UnknownLabel {
                what: "service",
                label: s.to_owned(),
            })
    }
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Price breakdown for one booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Recognized event type, if any.
    pub event_type: Option<EventType>,
    pub base: u64,
    /// Recognized services, each listed once, with their surcharge.
    pub services: Vec<(Service, u64)>,
    pub total: u64,
}

/// Price a booking, keeping the breakdown.
pub fn quote<I, S>(event_type: &str, services: I) -> Quote
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let event_type = event_type.parse::<EventType>().ok();
    let base = event_type.map_or(0, |t| t.base_price());

    let selected: BTreeSet<Service> = services
        .into_iter()
        .filter_map(|s| s.as_ref().parse().ok())
        .collect();
    let services: Vec<(Service, u64)> = selected
        .into_iter()
        .map(|svc| (svc, svc.surcharge()))
        .collect();

    let total = base + services.iter().map(|(_, fee)| fee).sum::<u64>();
    Quote {
        event_type,
        base,
        services,
        total,
    }
}

/// Total price of a booking.
///
/// # Examples
///
/// ```
/// use event_desk::cost;
///
/// assert_eq!(cost("Wedding", Vec::<&str>::new()), 1000);
/// assert_eq!(cost("Wedding", ["Catering"]), 1200);
/// assert_eq!(cost("Birthday", ["Catering", "Cleaning", "Decorations"]), 950);
/// assert_eq!(cost("Unknown", Vec::<&str>::new()), 0);
/// ```
pub fn cost<I, S>(event_type: &str, services: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    quote(event_type, services).total
}

/// Render an amount the way guest records display it (`$1200.00`).
pub fn format_amount(amount: u64) -> String {
    format!("${amount}.00")
}
