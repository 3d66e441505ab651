use crate::models::{ListingStatus, Property, PropertyFilter};

/// Only active listings take part in batch matching
#[inline]
pub fn is_available(property: &Property) -> bool {
    property.status == ListingStatus::Active
}

/// Check a listing against the caller-supplied batch filter
///
/// Fields the filter leaves empty do not constrain. A listing missing a field the
/// filter does constrain is excluded.
#[inline]
pub fn matches_property_filter(property: &Property, filter: &PropertyFilter) -> bool {
    if let Some(state) = &filter.state {
        match &property.state {
            Some(have) if have.trim().eq_ignore_ascii_case(state.trim()) => {}
            _ => return false,
        }
    }

    if let Some(city) = &filter.city {
        match &property.city {
            Some(have) if have.trim().eq_ignore_ascii_case(city.trim()) => {}
            _ => return false,
        }
    }

    // Minimum class: better classes pass too
    if let Some(class) = filter.building_class {
        match property.building_class {
            Some(have) if have.rank() >= class.rank() => {}
            _ => return false,
        }
    }

    if let Some(min_sqft) = filter.min_available_sqft {
        match property.available_sqft {
            Some(have) if have >= min_sqft => {}
            _ => return false,
        }
    }

    true
}

/// Reduce the listing pool to the candidates of a batch run
pub fn select_candidates(properties: Vec<Property>, filter: &PropertyFilter) -> Vec<Property> {
    properties
        .into_iter()
        .filter(is_available)
        .filter(|property| matches_property_filter(property, filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrokerContact, BuildingClass};

    fn create_property(id: &str, state: &str, class: BuildingClass, sqft: u32) -> Property {
        Property {
            id: id.to_string(),
            version: 1,
            title: None,
            available_sqft: Some(sqft),
            building_class: Some(class),
            location: None,
            city: Some("Arlington".to_string()),
            state: Some(state.to_string()),
            available_date: None,
            lease_type: None,
            broker: BrokerContact::default(),
            status: ListingStatus::Active,
        }
    }

    #[test]
    fn test_empty_filter_matches() {
        let property = create_property("1", "VA", BuildingClass::B, 10_000);
        assert!(matches_property_filter(&property, &PropertyFilter::default()));
    }

    #[test]
    fn test_filter_by_state_and_class() {
        let filter = PropertyFilter {
            state: Some("va".to_string()),
            building_class: Some(BuildingClass::B),
            ..Default::default()
        };

        assert!(matches_property_filter(&create_property("1", "VA", BuildingClass::A, 5_000), &filter));
        assert!(matches_property_filter(&create_property("2", "VA", BuildingClass::B, 5_000), &filter));
        assert!(!matches_property_filter(&create_property("3", "VA", BuildingClass::C, 5_000), &filter));
        assert!(!matches_property_filter(&create_property("4", "MD", BuildingClass::A, 5_000), &filter));
    }

    #[test]
    fn test_filter_missing_field_excludes() {
        let mut property = create_property("1", "VA", BuildingClass::A, 5_000);
        property.available_sqft = None;
        let filter = PropertyFilter {
            min_available_sqft: Some(1_000),
            ..Default::default()
        };
        assert!(!matches_property_filter(&property, &filter));
    }

    #[test]
    fn test_select_candidates_drops_inactive() {
        let mut leased = create_property("2", "VA", BuildingClass::A, 5_000);
        leased.status = ListingStatus::Leased;
        let mut withdrawn = create_property("3", "VA", BuildingClass::A, 5_000);
        withdrawn.status = ListingStatus::Withdrawn;

        let candidates = select_candidates(
            vec![create_property("1", "VA", BuildingClass::A, 5_000), leased, withdrawn],
            &PropertyFilter::default(),
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "1");
    }
}
