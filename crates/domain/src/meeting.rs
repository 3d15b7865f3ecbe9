use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Physical,
    Online,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Online => "online",
        }
    }
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(Self::Physical),
            "online" => Ok(Self::Online),
            _ => Err(format!("Unknown location type: {}", s)),
        }
    }
}

/// Where a `Meeting` takes place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MeetingLocation {
    Physical {
        name: Option<String>,
        address: Option<String>,
    },
    Online {
        url: Option<String>,
    },
}

impl MeetingLocation {
    /// Builds the location from the flat columns / form fields it is stored as.
    /// Fields that do not belong to the given `LocationType` are dropped.
    pub fn new(
        location_type: LocationType,
        name: Option<String>,
        address: Option<String>,
        online_url: Option<String>,
    ) -> Self {
        match location_type {
            LocationType::Physical => Self::Physical { name, address },
            LocationType::Online => Self::Online { url: online_url },
        }
    }

    pub fn location_type(&self) -> LocationType {
        match self {
            Self::Physical { .. } => LocationType::Physical,
            Self::Online { .. } => LocationType::Online,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Physical { name, .. } => name.as_deref(),
            Self::Online { .. } => None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Physical { address, .. } => address.as_deref(),
            Self::Online { .. } => None,
        }
    }

    pub fn online_url(&self) -> Option<&str> {
        match self {
            Self::Online { url } => url.as_deref(),
            Self::Physical { .. } => None,
        }
    }
}

/// A scheduled, time-boxed gathering owned by a `Group`.
///
/// Timestamps are UTC instants in millis. A `Meeting` is never
/// modified after it has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    pub id: ID,
    pub group_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub location: MeetingLocation,
    /// Maximum amount of `registered` participants, unlimited if `None`
    pub max_participants: Option<i64>,
    /// Id of the group admin that created the `Meeting`
    pub created_by: ID,
    pub created: i64,
    pub updated: i64,
}

impl Meeting {
    pub fn is_valid_time_range(start_ts: i64, end_ts: i64) -> bool {
        end_ts > start_ts
    }

    pub fn is_valid_capacity(max_participants: Option<i64>) -> bool {
        match max_participants {
            Some(max) => max >= 1,
            None => true,
        }
    }

    /// Registration closes at the start of the `Meeting`, not at the end
    pub fn has_started(&self, timestamp: i64) -> bool {
        timestamp >= self.start_ts
    }

    pub fn is_full(&self, registered_count: i64) -> bool {
        match self.max_participants {
            Some(max) => registered_count >= max,
            None => false,
        }
    }

    pub fn accepts_registrations(&self, timestamp: i64, registered_count: i64) -> bool {
        !self.has_started(timestamp) && !self.is_full(registered_count)
    }
}

impl Entity for Meeting {
    fn id(&self) -> &ID {
        &self.id
    }
}
