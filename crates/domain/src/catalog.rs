// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static catalog of bookable resources and requesting departments.

use crate::error::DomainError;
use crate::resource::{ResourceKey, ResourceRef, ResourceType};
use serde::{Deserialize, Serialize};

/// A bookable venue, bus, or turf area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResource {
    /// The resource type.
    pub resource_type: ResourceType,
    /// Catalog id (the sub-area name for turf).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maximum attendance, if the resource has one.
    pub capacity: Option<u32>,
    /// Facilities on offer.
    pub facilities: Vec<String>,
}

impl CatalogResource {
    fn new(
        resource_type: ResourceType,
        id: &str,
        name: &str,
        capacity: Option<u32>,
        facilities: &[&str],
    ) -> Self {
        Self {
            resource_type,
            id: id.to_string(),
            name: name.to_string(),
            capacity,
            facilities: facilities.iter().map(ToString::to_string).collect(),
        }
    }

    /// The reference a requester would use to book this resource.
    #[must_use]
    pub fn reference(&self) -> ResourceRef {
        match self.resource_type {
            ResourceType::Venue => ResourceRef::venue(&self.id),
            ResourceType::Bus => ResourceRef::bus(&self.id),
            ResourceType::Turf => ResourceRef::turf(&self.id),
        }
    }

    /// The resource key for this entry.
    ///
    /// # Errors
    ///
    /// Fails only if the entry has a blank id.
    pub fn key(&self) -> Result<ResourceKey, DomainError> {
        self.reference().key()
    }
}

/// A requesting department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department id, e.g. `cse`.
    pub id: String,
    /// Display name, e.g. `CSE`.
    pub name: String,
}

/// A group of departments, e.g. Engineering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCategory {
    /// Category id, e.g. `engineering`.
    pub id: String,
    /// Display name, e.g. `Engineering`.
    pub name: String,
    /// Departments in this category.
    pub departments: Vec<Department>,
}

impl DepartmentCategory {
    fn new(id: &str, name: &str, departments: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            departments: departments
                .iter()
                .map(|(id, name)| Department {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    fn matches(&self, value: &str) -> bool {
        let value: &str = value.trim();
        self.id.eq_ignore_ascii_case(value) || self.name.eq_ignore_ascii_case(value)
    }
}

/// The resources and departments known to the booking system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCatalog {
    resources: Vec<CatalogResource>,
    department_categories: Vec<DepartmentCategory>,
}

impl ResourceCatalog {
    /// Builds a catalog from explicit lists.
    #[must_use]
    pub const fn new(
        resources: Vec<CatalogResource>,
        department_categories: Vec<DepartmentCategory>,
    ) -> Self {
        Self {
            resources,
            department_categories,
        }
    }

    /// The campus catalog: five venues, two buses, three turf areas.
    #[must_use]
    pub fn campus_default() -> Self {
        let resources: Vec<CatalogResource> = vec![
            CatalogResource::new(
                ResourceType::Venue,
                "auditorium",
                "Auditorium",
                Some(500),
                &["projector", "sound system", "stage", "A/C", "drum kit"],
            ),
            CatalogResource::new(
                ResourceType::Venue,
                "impact-greens",
                "Impact Greens",
                Some(1000),
                &["kitchen", "outdoor seating"],
            ),
            CatalogResource::new(
                ResourceType::Venue,
                "ramanujan-hall",
                "Ramanujan Hall",
                Some(100),
                &["projector", "whiteboard", "sound system"],
            ),
            CatalogResource::new(
                ResourceType::Venue,
                "visveswaraya-auditorium",
                "Visveswaraya Auditorium",
                Some(300),
                &["projector", "sound system", "A/C", "stage"],
            ),
            CatalogResource::new(
                ResourceType::Venue,
                "cse-seminar-hall",
                "CSE Seminar Hall",
                Some(80),
                &["projector", "whiteboard", "A/C", "smart board"],
            ),
            CatalogResource::new(ResourceType::Bus, "bus-1", "Bus 1", Some(45), &["A/C"]),
            CatalogResource::new(
                ResourceType::Bus,
                "bus-2",
                "Bus 2",
                Some(50),
                &["A/C", "charging ports"],
            ),
            CatalogResource::new(ResourceType::Turf, "football", "Football Area", None, &[]),
            CatalogResource::new(ResourceType::Turf, "badminton", "Badminton Area", None, &[]),
            CatalogResource::new(
                ResourceType::Turf,
                "table-tennis",
                "Table Tennis Area",
                None,
                &[],
            ),
        ];

        let department_categories: Vec<DepartmentCategory> = vec![
            DepartmentCategory::new(
                "engineering",
                "Engineering",
                &[
                    ("aiml", "AIML"),
                    ("cse", "CSE"),
                    ("electronics", "Electronics"),
                    ("automation-robotics", "Automation and Robotics"),
                    ("mechanical", "Mechanical"),
                    ("civil", "Civil"),
                    ("data-science", "Data Science"),
                    ("cyber-security", "Cyber Security"),
                ],
            ),
            DepartmentCategory::new(
                "management",
                "Management",
                &[
                    ("mba", "MBA"),
                    ("bba", "BBA"),
                    ("bcom", "BCom"),
                    ("other-bachelors", "Other Bachelor's Degree"),
                ],
            ),
            DepartmentCategory::new(
                "architecture",
                "Architecture",
                &[("architecture", "Architecture")],
            ),
        ];

        Self::new(resources, department_categories)
    }

    /// All resources, in catalog order.
    #[must_use]
    pub fn resources(&self) -> &[CatalogResource] {
        &self.resources
    }

    /// Resources of one type, in catalog order.
    pub fn resources_of_type(
        &self,
        resource_type: ResourceType,
    ) -> impl Iterator<Item = &CatalogResource> {
        self.resources
            .iter()
            .filter(move |r| r.resource_type == resource_type)
    }

    /// All department categories.
    #[must_use]
    pub fn department_categories(&self) -> &[DepartmentCategory] {
        &self.department_categories
    }

    /// Finds a catalog entry by resource key.
    #[must_use]
    pub fn find(&self, key: &ResourceKey) -> Option<&CatalogResource> {
        self.resources
            .iter()
            .find(|r| r.key().is_ok_and(|k| &k == key))
    }

    /// Finds a catalog entry by resource key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownResource` if no entry matches.
    pub fn lookup(&self, key: &ResourceKey) -> Result<&CatalogResource, DomainError> {
        self.find(key)
            .ok_or_else(|| DomainError::UnknownResource(key.to_string()))
    }

    /// Resources matching a free-text query, in catalog order.
    ///
    /// Every resource matches on its name. Venues also match on any of their
    /// facilities. Matching is case-insensitive; a blank query matches
    /// nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CatalogResource> {
        let needle: String = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.resources
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || (r.resource_type == ResourceType::Venue
                        && r.facilities
                            .iter()
                            .any(|f| f.to_lowercase().contains(&needle)))
            })
            .collect()
    }

    /// Display name for a key, falling back to the key text.
    #[must_use]
    pub fn display_name(&self, key: &ResourceKey) -> String {
        self.find(key)
            .map_or_else(|| key.to_string(), |r| r.name.clone())
    }

    /// Checks that a department belongs to a category.
    ///
    /// Both values may be given as ids or display names, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownDepartment` if the pair is not in the
    /// catalog.
    pub fn validate_department(&self, category: &str, department: &str) -> Result<(), DomainError> {
        let known: bool = self
            .department_categories
            .iter()
            .filter(|c| c.matches(category))
            .flat_map(|c| c.departments.iter())
            .any(|d| {
                d.id.eq_ignore_ascii_case(department.trim())
                    || d.name.eq_ignore_ascii_case(department.trim())
            });
        if known {
            Ok(())
        } else {
            Err(DomainError::UnknownDepartment {
                category: category.to_string(),
                department: department.to_string(),
            })
        }
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::campus_default()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_campus_default_counts() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        assert_eq!(catalog.resources_of_type(ResourceType::Venue).count(), 5);
        assert_eq!(catalog.resources_of_type(ResourceType::Bus).count(), 2);
        assert_eq!(catalog.resources_of_type(ResourceType::Turf).count(), 3);
        assert_eq!(catalog.department_categories().len(), 3);
    }

    #[test]
    fn test_lookup_by_key() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        let key: ResourceKey = ResourceRef::venue("ramanujan-hall").key().unwrap();
        let hall: &CatalogResource = catalog.lookup(&key).unwrap();
        assert_eq!(hall.name, "Ramanujan Hall");
        assert_eq!(hall.capacity, Some(100));

        let turf: ResourceKey = ResourceRef::turf("football").key().unwrap();
        assert_eq!(catalog.display_name(&turf), "Football Area");
    }

    #[test]
    fn test_unknown_resource() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        let key: ResourceKey = ResourceRef::venue("moon-base").key().unwrap();
        assert_eq!(
            catalog.lookup(&key),
            Err(DomainError::UnknownResource(String::from("venue:moon-base")))
        );
        assert_eq!(catalog.display_name(&key), "venue:moon-base");
    }

    #[test]
    fn test_search_by_name_is_case_insensitive() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        let names: Vec<&str> = catalog
            .search("AUDITORIUM")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Auditorium", "Visveswaraya Auditorium"]);

        let turf: Vec<&str> = catalog
            .search("  area ")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(turf, vec!["football", "badminton", "table-tennis"]);
    }

    #[test]
    fn test_search_matches_venue_facilities_only() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        let smart: Vec<&str> = catalog
            .search("smart board")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(smart, vec!["cse-seminar-hall"]);

        // Bus 2 has charging ports, but buses are searched by name.
        assert!(catalog.search("charging").is_empty());
        assert!(
            catalog
                .search("a/c")
                .iter()
                .all(|r| r.resource_type == ResourceType::Venue)
        );
    }

    #[test]
    fn test_blank_search_matches_nothing() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_validate_department_by_id_or_name() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        assert!(catalog.validate_department("Engineering", "cse").is_ok());
        assert!(catalog.validate_department("management", "MBA").is_ok());
        assert!(catalog.validate_department("Architecture", "architecture").is_ok());
    }

    #[test]
    fn test_validate_department_wrong_category() {
        let catalog: ResourceCatalog = ResourceCatalog::campus_default();
        assert!(matches!(
            catalog.validate_department("Management", "cse"),
            Err(DomainError::UnknownDepartment { .. })
        ));
    }
}
