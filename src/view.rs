//! Table rendering for the property listing.

use crate::models::{Property, PropertyId};
use std::fmt;

/// Characters of the description kept in the table
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

const HEADER: &str = "Address | Price | Size | Description";

/// An action bound to a rendered row, carrying that row's id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit(PropertyId),
    Delete(PropertyId),
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowAction::Edit(id) => write!(f, "[edit {}]", id),
            RowAction::Delete(id) => write!(f, "[delete {}]", id),
        }
    }
}

/// One display row, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: Option<PropertyId>,
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

impl Row {
    pub fn from_property(property: &Property) -> Self {
        Self {
            id: property.id,
            address: property.address.clone(),
            price: format_price(property.price),
            size: format_size(property.size),
            description: truncate_description(&property.description),
        }
    }

    /// Edit and delete controls for this row.
    /// Rows for properties the backend returned without an id get none.
    pub fn actions(&self) -> Option<[RowAction; 2]> {
        self.id.map(|id| [RowAction::Edit(id), RowAction::Delete(id)])
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.address, self.price, self.size, self.description
        )
    }
}

/// The rendered listing, rows in backend order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn from_properties(properties: &[Property]) -> Self {
        Self {
            rows: properties.iter().map(Row::from_property).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "(no properties)");
        }

        writeln!(f, "{}", HEADER)?;
        for row in &self.rows {
            write!(f, "{}", row)?;
            if let Some([edit, delete]) = row.actions() {
                write!(f, " | {} {}", edit, delete)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Dollar amount with en-US digit grouping and up to three fraction digits,
/// e.g. `$1,234.5`
pub fn format_price(price: f64) -> String {
    format!("${}", group_number(price))
}

/// Area with its unit, e.g. `1200 sqft`
pub fn format_size(size: f64) -> String {
    format!("{} sqft", size)
}

/// First 50 characters followed by `...`.
/// Short descriptions also get the ellipsis.
pub fn truncate_description(description: &str) -> String {
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{}...", preview)
}

fn group_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Past 1e15 an f64 has no fraction digits left and scaling by 1000 can
    // overflow to infinity.
    let rounded = if value.abs() < 1e15 {
        (value * 1000.0).round() / 1000.0
    } else {
        value
    };
    if rounded == 0.0 {
        return "0".to_string();
    }

    let fixed = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 5);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1234.5, "$1,234.5")]
    #[case(250_000.0, "$250,000")]
    #[case(0.0, "$0")]
    #[case(999.0, "$999")]
    #[case(1000.0, "$1,000")]
    #[case(1_234_567.891, "$1,234,567.891")]
    #[case(10.12345, "$10.123")]
    #[case(-1500.25, "$-1,500.25")]
    fn formats_price_with_grouping(#[case] price: f64, #[case] expected: &str) {
        assert_eq!(format_price(price), expected);
    }

    #[test]
    fn groups_very_large_prices() {
        assert_eq!(format_price(1e21), "$1,000,000,000,000,000,000,000");
        assert_eq!(format_price(2_500_000_000_000_000.0), "$2,500,000,000,000,000");

        let huge = format_price(1e306);
        assert!(huge.starts_with("$1,000,"), "{}", huge);
        assert!(!huge.contains("inf"));
        assert_eq!(huge.len(), 1 + 307 + 306 / 3);
    }

    #[rstest]
    #[case(1200.0, "1200 sqft")]
    #[case(850.5, "850.5 sqft")]
    #[case(12000.0, "12000 sqft")]
    fn formats_size_without_grouping(#[case] size: f64, #[case] expected: &str) {
        assert_eq!(format_size(size), expected);
    }

    #[test]
    fn truncates_long_description() {
        let long = "a".repeat(49) + "bcdef";
        let shown = truncate_description(&long);
        assert_eq!(shown, format!("{}b...", "a".repeat(49)));
        assert_eq!(shown.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
    }

    #[rstest]
    #[case("")]
    #[case("Cozy")]
    #[case("xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx")]
    fn short_description_keeps_ellipsis(#[case] description: &str) {
        assert_eq!(truncate_description(description), format!("{}...", description));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "å".repeat(60);
        assert_eq!(truncate_description(&text), format!("{}...", "å".repeat(50)));
    }

    #[test]
    fn renders_scenario_row() {
        let property = Property {
            id: Some(1),
            address: "1 Main St".to_string(),
            price: 250_000.0,
            size: 1200.0,
            description: "Cozy".to_string(),
        };
        let table = Table::from_properties(&[property]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].to_string(), "1 Main St | $250,000 | 1200 sqft | Cozy...");
        assert_eq!(
            table.rows[0].actions(),
            Some([RowAction::Edit(1), RowAction::Delete(1)])
        );
        assert_eq!(
            table.to_string(),
            "Address | Price | Size | Description\n\
             1 Main St | $250,000 | 1200 sqft | Cozy... | [edit 1] [delete 1]\n"
        );
    }

    #[test]
    fn row_without_id_has_no_actions() {
        let property = Property {
            id: None,
            address: "Draft".to_string(),
            price: 1.0,
            size: 1.0,
            description: String::new(),
        };
        assert_eq!(Row::from_property(&property).actions(), None);
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(Table::default().to_string(), "(no properties)\n");
    }
}
