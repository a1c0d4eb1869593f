use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned property identifier
pub type PropertyId = i64;

/// Core property data model, as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    /// Absent until the property has been persisted
    pub id: Option<PropertyId>,
    pub address: String,
    pub price: f64,
    /// Area in square feet
    pub size: f64,
    pub description: String,
}

impl Property {
    /// The write payload carrying this property's values
    pub fn to_input(&self) -> PropertyInput {
        PropertyInput {
            address: self.address.clone(),
            price: self.price,
            size: self.size,
            description: self.description.clone(),
        }
    }
}

/// Body of create and update requests; never carries an id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyInput {
    pub address: String,
    pub price: f64,
    pub size: f64,
    pub description: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Raw text held by the listing form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    /// Hidden field, set while an existing property is loaded into the form
    pub property_id: String,
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

impl PropertyForm {
    /// Populate every field from an existing property
    pub fn fill(&mut self, property: &Property) {
        self.property_id = property.id.map(|id| id.to_string()).unwrap_or_default();
        self.address = property.address.clone();
        self.price = property.price.to_string();
        self.size = property.size.to_string();
        self.description = property.description.clone();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Read the form into a write payload.
    ///
    /// Address and description are taken as typed. Price and size must be
    /// finite numbers.
    pub fn parse(&self) -> Result<PropertyInput, FormError> {
        Ok(PropertyInput {
            address: self.address.clone(),
            price: parse_number("price", &self.price)?,
            size: parse_number("size", &self.size)?,
            description: self.description.clone(),
        })
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, FormError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cozy() -> Property {
        Property {
            id: Some(1),
            address: "1 Main St".to_string(),
            price: 250_000.0,
            size: 1200.0,
            description: "Cozy".to_string(),
        }
    }

    #[test]
    fn property_json_matches_backend_shape() {
        let json = r#"{"id":1,"address":"1 Main St","price":250000,"size":1200,"description":"Cozy"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property, cozy());
    }

    #[test]
    fn property_accepts_null_id() {
        let json = r#"{"id":null,"address":"x","price":1.5,"size":2,"description":""}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.id, None);
    }

    #[test]
    fn input_serializes_without_id() {
        let value = serde_json::to_value(cozy().to_input()).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["address"], "1 Main St");
        assert_eq!(value["price"], 250_000.0);
    }

    #[test]
    fn fill_copies_every_field() {
        let mut form = PropertyForm::default();
        form.fill(&cozy());

        assert_eq!(form.property_id, "1");
        assert_eq!(form.address, "1 Main St");
        assert_eq!(form.price, "250000");
        assert_eq!(form.size, "1200");
        assert_eq!(form.description, "Cozy");
        assert_eq!(form.parse().unwrap(), cozy().to_input());
    }

    #[test]
    fn reset_clears_form() {
        let mut form = PropertyForm::default();
        form.fill(&cozy());
        form.reset();
        assert_eq!(form, PropertyForm::default());
    }

    #[rstest]
    #[case("price", "", "10")]
    #[case("price", "abc", "10")]
    #[case("size", "10", "NaN")]
    #[case("size", "10", "inf")]
    fn parse_rejects_non_numbers(
        #[case] field: &str,
        #[case] price: &str,
        #[case] size: &str,
    ) {
        let form = PropertyForm {
            price: price.to_string(),
            size: size.to_string(),
            ..PropertyForm::default()
        };
        match form.parse() {
            Err(FormError::InvalidNumber { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected invalid number, got {:?}", other),
        }
    }

    #[test]
    fn parse_trims_numbers() {
        let form = PropertyForm {
            address: "2 Oak Ave".to_string(),
            price: " 1234.5 ".to_string(),
            size: "800".to_string(),
            description: "Bright".to_string(),
            ..PropertyForm::default()
        };
        let input = form.parse().unwrap();
        assert_eq!(input.price, 1234.5);
        assert_eq!(input.size, 800.0);
    }
}
