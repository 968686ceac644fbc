use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(EventId);
id_newtype!(UserId);
id_newtype!(PartnerId);
id_newtype!(ParticipantId);

macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseError::new(stringify!($name), raw)),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Music,
    Dance,
    Theater,
    Art,
    Festival,
    Workshop,
    Conference,
    Other,
}

string_enum!(EventCategory {
    Music => "music",
    Dance => "dance",
    Theater => "theater",
    Art => "art",
    Festival => "festival",
    Workshop => "workshop",
    Conference => "conference",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

string_enum!(EventStatus {
    Upcoming => "upcoming",
    Ongoing => "ongoing",
    Completed => "completed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Confirmed,
    Pending,
    Cancelled,
}

string_enum!(ParticipantStatus {
    Confirmed => "confirmed",
    Pending => "pending",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Organizer,
    Public,
}

string_enum!(UserRole {
    Admin => "admin",
    Organizer => "organizer",
    Public => "public",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A cultural event as published in the catalog.
///
/// `registered_count` is not checked against `capacity`; fixture data may
/// overbook and callers report it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub image: String,
    pub capacity: u32,
    pub registered_count: u32,
    pub category: EventCategory,
    pub status: EventStatus,
    pub organizers: Vec<UserId>,
    pub partners: Vec<Partner>,
    pub is_published: bool,
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_currency: Option<String>,
}

impl Event {
    /// Absent prices count as free.
    pub fn effective_price(&self) -> u64 {
        self.ticket_price.unwrap_or(0)
    }

    pub fn is_free(&self) -> bool {
        self.effective_price() == 0
    }

    pub fn remaining_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.registered_count)
    }

    pub fn is_organized_by(&self, organizer: &UserId) -> bool {
        self.organizers.iter().any(|id| id == organizer)
    }
}

/// A registration for an event. `event_id` is not checked against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_id: EventId,
    pub status: ParticipantStatus,
    pub registration_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
