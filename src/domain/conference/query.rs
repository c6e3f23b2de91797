//! Conference query filters.

use std::fmt;

use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// Comparison operator understood by `queryConferences`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOperator {
    #[default]
    Eq,
    Gt,
    Gteq,
    Lt,
    Lteq,
    Ne,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 6] = [
        FilterOperator::Eq,
        FilterOperator::Gt,
        FilterOperator::Gteq,
        FilterOperator::Lt,
        FilterOperator::Lteq,
        FilterOperator::Ne,
    ];

    /// Symbol shown in the filter picker.
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Gt => ">",
            FilterOperator::Gteq => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lteq => "<=",
            FilterOperator::Ne => "!=",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One `field operator value` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

/// Payload of `queryConferences`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConferenceQuery {
    pub filters: Vec<QueryFilter>,
}

/// Builds the filter list for a query view.
///
/// Only fields registered as filterable can be added. Field names are
/// normalised to upper case, which is how the API names them.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    filterable: Vec<(String, String)>,
    filters: Vec<QueryFilter>,
}

impl SearchFilter {
    /// Creates a filter builder from `(field, display name)` pairs.
    ///
    /// Pairs with an empty field or name are ignored.
    pub fn new<I, F, D>(fields: I) -> Self
    where
        I: IntoIterator<Item = (F, D)>,
        F: Into<String>,
        D: Into<String>,
    {
        let filterable = fields
            .into_iter()
            .map(|(field, name)| (field.into().to_uppercase(), name.into()))
            .filter(|(field, name)| !field.is_empty() && !name.is_empty())
            .collect();
        Self {
            filterable,
            filters: Vec::new(),
        }
    }

    /// Filterable fields as `(field, display name)`.
    pub fn filterable_fields(&self) -> &[(String, String)] {
        &self.filterable
    }

    pub fn filters(&self) -> &[QueryFilter] {
        &self.filters
    }

    /// Adds an `=` filter on `field`.
    pub fn add_filter(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<&mut QueryFilter, ValidationError> {
        let field = field.to_uppercase();
        if !self.filterable.iter().any(|(known, _)| *known == field) {
            return Err(ValidationError::invalid_format(
                "field",
                format!("'{}' is not filterable", field),
            ));
        }
        self.filters.push(QueryFilter {
            field,
            operator: FilterOperator::default(),
            value: value.into(),
        });
        let last = self.filters.len() - 1;
        Ok(&mut self.filters[last])
    }

    /// Removes the filter at `index`; out-of-range indexes are ignored.
    pub fn remove_filter(&mut self, index: usize) {
        if index < self.filters.len() {
            self.filters.remove(index);
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Keeps only filters on the given fields.
    pub fn retain_fields(&mut self, fields: &[&str]) {
        let keep: Vec<String> = fields.iter().map(|f| f.to_uppercase()).collect();
        self.filters.retain(|filter| keep.contains(&filter.field));
    }

    /// Builds the query payload.
    pub fn to_query(&self) -> ConferenceQuery {
        ConferenceQuery {
            filters: self.filters.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conference_filter() -> SearchFilter {
        SearchFilter::new([
            ("city", "City"),
            ("topic", "Topic"),
            ("month", "Month"),
            ("", "Ignored"),
        ])
    }

    #[test]
    fn new_normalises_and_skips_empty_fields() {
        let filter = conference_filter();
        let fields: Vec<_> = filter
            .filterable_fields()
            .iter()
            .map(|(f, _)| f.as_str())
            .collect();
        assert_eq!(fields, ["CITY", "TOPIC", "MONTH"]);
    }

    #[test]
    fn add_filter_defaults_to_equals() {
        let mut filter = conference_filter();
        filter.add_filter("city", "London").unwrap();

        assert_eq!(filter.filters()[0].operator, FilterOperator::Eq);
        assert_eq!(filter.filters()[0].field, "CITY");
    }

    #[test]
    fn add_filter_rejects_unknown_field() {
        let mut filter = conference_filter();
        assert!(filter.add_filter("venue", "x").is_err());
        assert!(filter.filters().is_empty());
    }

    #[test]
    fn added_filter_operator_can_be_changed() {
        let mut filter = conference_filter();
        filter.add_filter("month", "6").unwrap().operator = FilterOperator::Gteq;
        assert_eq!(filter.filters()[0].operator.symbol(), ">=");
    }

    #[test]
    fn remove_filter_ignores_out_of_range() {
        let mut filter = conference_filter();
        filter.add_filter("city", "London").unwrap();
        filter.remove_filter(5);
        assert_eq!(filter.filters().len(), 1);
        filter.remove_filter(0);
        assert!(filter.filters().is_empty());
    }

    #[test]
    fn retain_fields_drops_other_filters() {
        let mut filter = conference_filter();
        filter.add_filter("city", "London").unwrap();
        filter.add_filter("topic", "Rust").unwrap();
        filter.retain_fields(&["topic"]);

        assert_eq!(filter.filters().len(), 1);
        assert_eq!(filter.filters()[0].field, "TOPIC");
    }

    #[test]
    fn query_serializes_operator_enum_values() {
        let mut filter = conference_filter();
        filter.add_filter("city", "London").unwrap().operator = FilterOperator::Ne;

        assert_eq!(
            serde_json::to_value(filter.to_query()).unwrap(),
            json!({"filters": [{"field": "CITY", "operator": "NE", "value": "London"}]})
        );
    }
}
