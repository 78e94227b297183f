// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of bookable campus resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Auditoriums, halls, and grounds.
    Venue,
    /// Campus transport.
    Bus,
    /// Sports turf, booked by sub-area.
    Turf,
}

impl ResourceType {
    /// Converts this resource type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Bus => "bus",
            Self::Turf => "turf",
        }
    }

    /// Turf is booked by named sub-area, everything else by id.
    #[must_use]
    pub const fn uses_sub_area(&self) -> bool {
        matches!(self, Self::Turf)
    }
}

impl FromStr for ResourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "venue" => Ok(Self::Venue),
            "bus" => Ok(Self::Bus),
            "turf" => Ok(Self::Turf),
            _ => Err(DomainError::InvalidResourceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a requester asked for: a resource type plus an id or a sub-area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// The resource type.
    pub resource_type: ResourceType,
    /// Catalog id for venues and buses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Named sub-area for turf bookings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_area: Option<String>,
}

impl ResourceRef {
    /// A venue reference.
    #[must_use]
    pub fn venue(id: &str) -> Self {
        Self {
            resource_type: ResourceType::Venue,
            resource_id: Some(id.to_string()),
            sub_area: None,
        }
    }

    /// A bus reference.
    #[must_use]
    pub fn bus(id: &str) -> Self {
        Self {
            resource_type: ResourceType::Bus,
            resource_id: Some(id.to_string()),
            sub_area: None,
        }
    }

    /// A turf sub-area reference.
    #[must_use]
    pub fn turf(sub_area: &str) -> Self {
        Self {
            resource_type: ResourceType::Turf,
            resource_id: None,
            sub_area: Some(sub_area.to_string()),
        }
    }

    /// Derives the resource key.
    ///
    /// The key is `"{type}:{id}"` for venues and buses and
    /// `"{type}:{sub_area}"` for turf, trimmed and lower-cased.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidResourceRef` if the required id or
    /// sub-area is missing or blank.
    pub fn key(&self) -> Result<ResourceKey, DomainError> {
        let (part, what) = if self.resource_type.uses_sub_area() {
            (self.sub_area.as_deref(), "sub-area")
        } else {
            (self.resource_id.as_deref(), "resource id")
        };

        let part: &str = part.map(str::trim).unwrap_or_default();
        if part.is_empty() {
            return Err(DomainError::InvalidResourceRef {
                reason: format!("{} bookings require a {what}", self.resource_type),
            });
        }

        Ok(ResourceKey(format!(
            "{}:{}",
            self.resource_type.as_str(),
            part.to_lowercase()
        )))
    }
}

/// Deterministic identifier of a bookable resource, e.g. `venue:auditorium`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Parses a stored key, normalizing case and whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not `type:part` with a known type.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let (type_part, rest) =
            value
                .trim()
                .split_once(':')
                .ok_or_else(|| DomainError::InvalidResourceRef {
                    reason: format!("'{value}' is not a type:id key"),
                })?;
        let resource_type: ResourceType = type_part.parse()?;
        let rest: &str = rest.trim();
        if rest.is_empty() {
            return Err(DomainError::InvalidResourceRef {
                reason: format!("'{value}' has no id or sub-area"),
            });
        }
        Ok(Self(format!(
            "{}:{}",
            resource_type.as_str(),
            rest.to_lowercase()
        )))
    }

    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The resource type encoded in the key.
    ///
    /// # Errors
    ///
    /// Cannot fail for keys built by this module.
    pub fn resource_type(&self) -> Result<ResourceType, DomainError> {
        self.0
            .split_once(':')
            .map_or_else(|| self.0.as_str(), |(t, _)| t)
            .parse()
    }

    /// The id or sub-area part of the key.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once(':').map_or("", |(_, rest)| rest)
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ResourceKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceKey> for String {
    fn from(key: ResourceKey) -> Self {
        key.0
    }
}
