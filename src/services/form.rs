// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pending metadata for a spot that has not been submitted yet.

use crate::error::{FormError, ValidationError};
use crate::models::spot::{coerce_count, coerce_miles};
use crate::models::{AdaAccessibility, Category, NewSpot};
use std::fmt;

/// Fields of the spot form, in the order the form shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotField {
    Description,
    Author,
    Category,
    AdaAccessibility,
    ParkingSpots,
    DistanceFromRoadMiles,
}

impl SpotField {
    /// Label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            SpotField::Description => "Description",
            SpotField::Author => "Your Name",
            SpotField::Category => "Category",
            SpotField::AdaAccessibility => "ADA Accessibility",
            SpotField::ParkingSpots => "Parking Availability",
            SpotField::DistanceFromRoadMiles => "Distance from Main Roads",
        }
    }
}

impl fmt::Display for SpotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transient form state. Numeric fields hold the raw input; they are
/// coerced when the submission payload is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSpot {
    pub description: String,
    pub author: String,
    pub category: Option<Category>,
    pub ada_accessibility: Option<AdaAccessibility>,
    pub parking_spots: String,
    pub distance_from_road_miles: String,
}

impl DraftSpot {
    /// Parking count, coercing empty or non-numeric input to 0.
    pub fn parking_spots(&self) -> u32 {
        coerce_count(parse_number(&self.parking_spots))
    }

    /// Distance in miles, coercing empty or non-numeric input to 0.
    pub fn distance_from_road_miles(&self) -> f64 {
        coerce_miles(parse_number(&self.distance_from_road_miles))
    }
}

fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Outcome of validating a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Vec<SpotField>),
}

/// Holds the draft and validates it.
#[derive(Debug, Clone, Default)]
pub struct SpotFormState {
    draft: DraftSpot,
}

impl SpotFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftSpot {
        &self.draft
    }

    /// Set one field from user input.
    ///
    /// Category and ADA values are parsed from their display text; an
    /// unrecognized choice leaves the field as it was. An empty value
    /// unsets a choice field.
    pub fn update(&mut self, field: SpotField, value: &str) -> Result<(), FormError> {
        match field {
            SpotField::Description => self.draft.description = value.to_string(),
            SpotField::Author => self.draft.author = value.to_string(),
            SpotField::Category => {
                self.draft.category = parse_choice(field, value)?;
            }
            SpotField::AdaAccessibility => {
                self.draft.ada_accessibility = parse_choice(field, value)?;
            }
            SpotField::ParkingSpots => self.draft.parking_spots = value.to_string(),
            SpotField::DistanceFromRoadMiles => {
                self.draft.distance_from_road_miles = value.to_string()
            }
        }
        Ok(())
    }

    /// Check the required fields. Parking and distance never fail.
    pub fn validate(&self) -> Validation {
        match self.required_choices() {
            Ok(_) => Validation::Valid,
            Err(missing) => Validation::Invalid(missing),
        }
    }

    /// Build the submission payload for a geometry.
    pub fn to_new_spot(&self, geometry: geojson::Geometry) -> Result<NewSpot, ValidationError> {
        let (views, ada) = self
            .required_choices()
            .map_err(|missing| ValidationError { missing })?;

        let draft = &self.draft;
        Ok(NewSpot {
            description: draft.description.trim().to_string(),
            name: draft.author.trim().to_string(),
            views,
            ada,
            parking: draft.parking_spots(),
            distance: draft.distance_from_road_miles(),
            geometry,
        })
    }

    /// The two choice fields, or every required field still unset.
    fn required_choices(&self) -> Result<(Category, AdaAccessibility), Vec<SpotField>> {
        let draft = &self.draft;
        let mut missing = Vec::new();

        if draft.description.is_empty() {
            missing.push(SpotField::Description);
        }
        if draft.author.is_empty() {
            missing.push(SpotField::Author);
        }
        if draft.category.is_none() {
            missing.push(SpotField::Category);
        }
        if draft.ada_accessibility.is_none() {
            missing.push(SpotField::AdaAccessibility);
        }

        match (draft.category, draft.ada_accessibility) {
            (Some(views), Some(ada)) if missing.is_empty() => Ok((views, ada)),
            _ => Err(missing),
        }
    }

    /// Discard the draft.
    pub fn reset(&mut self) {
        self.draft = DraftSpot::default();
    }
}

fn parse_choice<T: std::str::FromStr>(
    field: SpotField,
    value: &str,
) -> Result<Option<T>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| FormError::UnknownChoice {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SpotFormState {
        let mut form = SpotFormState::new();
        form.update(SpotField::Description, "Ridge view").unwrap();
        form.update(SpotField::Author, "Sam").unwrap();
        form.update(SpotField::Category, "Nature").unwrap();
        form.update(SpotField::AdaAccessibility, "Accessible").unwrap();
        form
    }

    fn point() -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Point(vec![-122.1, 47.3]))
    }

    #[test]
    fn test_empty_draft_is_invalid() {
        let form = SpotFormState::new();
        assert_eq!(
            form.validate(),
            Validation::Invalid(vec![
                SpotField::Description,
                SpotField::Author,
                SpotField::Category,
                SpotField::AdaAccessibility,
            ])
        );
    }

    #[test]
    fn test_required_fields_gate_validity() {
        // Every subset of the four required fields; valid only when all are set.
        for mask in 0u8..16 {
            let mut form = SpotFormState::new();
            if mask & 1 != 0 {
                form.update(SpotField::Description, "Ridge view").unwrap();
            }
            if mask & 2 != 0 {
                form.update(SpotField::Author, "Sam").unwrap();
            }
            if mask & 4 != 0 {
                form.update(SpotField::Category, "Hikes").unwrap();
            }
            if mask & 8 != 0 {
                form.update(SpotField::AdaAccessibility, "Not Accessible")
                    .unwrap();
            }
            for parking in ["", "abc", "4", "-2"] {
                form.update(SpotField::ParkingSpots, parking).unwrap();
                let valid = form.validate() == Validation::Valid;
                assert_eq!(valid, mask == 15, "mask {mask:04b} parking {parking:?}");
            }
        }
    }

    #[test]
    fn test_whitespace_only_text_counts_as_filled() {
        let mut form = filled();
        form.update(SpotField::Description, "   ").unwrap();
        form.update(SpotField::Author, " ").unwrap();
        assert_eq!(form.validate(), Validation::Valid);

        // Sent trimmed.
        let new_spot = form.to_new_spot(point()).unwrap();
        assert_eq!(new_spot.description, "");
        assert_eq!(new_spot.name, "");
    }

    #[test]
    fn test_empty_text_is_missing() {
        let mut form = filled();
        form.update(SpotField::Author, "").unwrap();
        assert_eq!(form.validate(), Validation::Invalid(vec![SpotField::Author]));
    }

    #[test]
    fn test_non_numeric_parking_coerces_to_zero() {
        let mut form = filled();
        form.update(SpotField::ParkingSpots, "abc").unwrap();
        form.update(SpotField::DistanceFromRoadMiles, "inf").unwrap();

        let new_spot = form.to_new_spot(point()).expect("valid draft");
        assert_eq!(new_spot.parking, 0);
        assert_eq!(new_spot.distance, 0.0);
    }

    #[test]
    fn test_numeric_fields_parse() {
        let mut form = filled();
        form.update(SpotField::ParkingSpots, " 12 ").unwrap();
        form.update(SpotField::DistanceFromRoadMiles, "0.75").unwrap();

        let new_spot = form.to_new_spot(point()).unwrap();
        assert_eq!(new_spot.parking, 12);
        assert_eq!(new_spot.distance, 0.75);
    }

    #[test]
    fn test_payload_trims_text() {
        let mut form = filled();
        form.update(SpotField::Description, "  Ridge view ").unwrap();
        form.update(SpotField::Author, " Sam").unwrap();

        let new_spot = form.to_new_spot(point()).unwrap();
        assert_eq!(new_spot.description, "Ridge view");
        assert_eq!(new_spot.name, "Sam");
        assert_eq!(new_spot.views, Category::Nature);
    }

    #[test]
    fn test_unknown_choice_leaves_field() {
        let mut form = filled();
        let err = form.update(SpotField::Category, "Beaches").unwrap_err();
        assert!(matches!(err, FormError::UnknownChoice { field: SpotField::Category, .. }));
        assert_eq!(form.draft().category, Some(Category::Nature));
    }

    #[test]
    fn test_invalid_draft_has_no_payload() {
        let form = SpotFormState::new();
        let err = form.to_new_spot(point()).unwrap_err();
        assert_eq!(err.missing.len(), 4);
    }

    #[test]
    fn test_reset_clears_draft() {
        let mut form = filled();
        form.reset();
        assert_eq!(form.draft(), &DraftSpot::default());
    }
}
