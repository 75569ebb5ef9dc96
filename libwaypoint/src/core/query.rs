//! utilities related to database queries
//!
use serde::{
    Deserialize, Serialize,
    de::{IntoDeserializer, value},
};
use std::{ops::Deref, str::FromStr, sync::Arc};
use strum_macros::EnumIter;

pub mod filter {
    /// A Trait implemented by anything that can be a filter on an SQL query
    pub trait FilterPart: Send {
        /// convert the given filter part to SQL syntax and add it to the given [sqlx::QueryBuilder] object
        fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>);
    }
}

pub use filter::FilterPart;

/// A type for specifying the sort order of an SQL query
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, EnumIter, PartialEq)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    #[default]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "Ascending"),
            SortOrder::Descending => write!(f, "Descending"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = value::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deserializer = s.into_deserializer();
        Deserialize::deserialize(deserializer)
    }
}

impl ToSql for SortOrder {
    fn to_sql(&self) -> String {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
        .into()
    }
}

/// a trait that generates an sql respresentation of the implementing type
pub trait ToSql {
    fn to_sql(&self) -> String;
}

/// A type for specifying how the results from an SQL query should be sorted
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortSpec<T: ToSql> {
    /// The field that the sql query should be sorted on. The type must be
    /// convertible to an SQL representation via [ToSql]
    pub field: T,
    /// The direction to sort results
    pub order: SortOrder,
}

impl<T: ToSql> ToSql for SortSpec<T> {
    fn to_sql(&self) -> String {
        format!("{} {}", self.field.to_sql(), self.order.to_sql())
    }
}

impl<T: ToSql> SortSpec<T> {
    pub fn new(field: T, order: SortOrder) -> Self {
        Self { field, order }
    }
}

#[derive(Clone)]
pub struct DynFilterPart(Arc<dyn filter::FilterPart + Sync>);

impl Deref for DynFilterPart {
    type Target = Arc<dyn filter::FilterPart + Sync>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F> From<F> for DynFilterPart
where
    F: filter::FilterPart + Send + Sync + 'static,
{
    fn from(value: F) -> Self {
        DynFilterPart(Arc::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct MockSortField(String);

    impl ToSql for MockSortField {
        fn to_sql(&self) -> String {
            self.0.clone()
        }
    }

    #[derive(Clone)]
    struct MockFilter {
        sql: String,
    }

    impl FilterPart for MockFilter {
        fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>) {
            builder.push(&self.sql);
        }
    }

    #[test]
    fn test_sort_order_default() {
        let order = SortOrder::default();
        assert_eq!(order, SortOrder::Ascending);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!(SortOrder::from_str("asc").unwrap(), SortOrder::Ascending);
        assert_eq!(SortOrder::from_str("desc").unwrap(), SortOrder::Descending);

        let invalid_result = SortOrder::from_str("invalid");
        assert!(invalid_result.is_err());
    }

    #[test]
    fn test_sort_order_to_sql() {
        assert_eq!(SortOrder::Ascending.to_sql(), "ASC");
        assert_eq!(SortOrder::Descending.to_sql(), "DESC");
    }

    #[test]
    fn test_sort_spec_to_sql() {
        let spec = SortSpec::new(MockSortField("name".to_string()), SortOrder::Ascending);
        assert_eq!(spec.to_sql(), "name ASC");

        let spec_desc = SortSpec::new(MockSortField("id".to_string()), SortOrder::Descending);
        assert_eq!(spec_desc.to_sql(), "id DESC");
    }

    #[test]
    fn test_dyn_filter_add_to_query() {
        let filter: DynFilterPart = MockFilter {
            sql: "name = 'test'".to_string(),
        }
        .into();
        let mut builder = sqlx::QueryBuilder::new("SELECT * FROM test WHERE ");
        filter.add_to_query(&mut builder);
        assert_eq!(builder.sql(), "SELECT * FROM test WHERE name = 'test'");
    }
}
