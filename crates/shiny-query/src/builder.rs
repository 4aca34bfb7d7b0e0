use bson::Bson;

use crate::aggregate::{Aggregate, AggregateOp};
use crate::filter::{Filter, FilterGroup, FilterNode, LogicalOp};
use crate::operator::Operator;
use crate::query::Query;
use crate::sort::{Sort, SortDirection};

/// Fluent construction of a [`Query`].
///
/// Repeated `filter` calls accumulate into one AND group, matching the text
/// language's `WHERE a AND b` form.
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub(crate) fn new(query: Query) -> Self {
        QueryBuilder { query }
    }

    pub fn filter(mut self, field: &str, operator: Operator, value: impl Into<Bson>) -> Self {
        let condition = FilterNode::Condition(Filter {
            field: field.to_string(),
            operator,
            value: value.into(),
        });
        match &mut self.query.filter {
            Some(group) => group.children.push(condition),
            None => {
                self.query.filter = Some(FilterGroup {
                    logical: LogicalOp::And,
                    children: vec![condition],
                });
            }
        }
        self
    }

    pub fn sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.query.sort.push(Sort {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn sort_asc(self, field: &str) -> Self {
        self.sort(field, SortDirection::Asc)
    }

    pub fn sort_desc(self, field: &str) -> Self {
        self.sort(field, SortDirection::Desc)
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.query.skip = Some(n);
        self
    }

    pub fn take(mut self, n: usize) -> Self {
        self.query.take = Some(n);
        self
    }

    pub fn group_by(mut self, field: &str) -> Self {
        self.query.group_by.push(field.to_string());
        self
    }

    pub fn aggregate(mut self, op: AggregateOp, field: Option<&str>, alias: &str) -> Self {
        self.query.aggregates.push(Aggregate {
            op,
            field: field.map(str::to_string),
            alias: alias.to_string(),
        });
        self
    }

    pub fn project(mut self, fields: &[&str]) -> Self {
        self.query.projection = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn count(mut self) -> Self {
        self.query.count_only = true;
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_accumulate_into_one_and_group() {
        let query = Query::from("sales", "orders")
            .filter("EmployeeID", Operator::Eq, 289_i64)
            .filter("CustomerID", Operator::Eq, 1045_i64)
            .build();

        let group = query.filter.unwrap();
        assert_eq!(group.logical, LogicalOp::And);
        assert_eq!(group.children.len(), 2);
        match &group.children[0] {
            FilterNode::Condition(f) => {
                assert_eq!(f.field, "EmployeeID");
                assert_eq!(f.value, Bson::Int64(289));
            }
            other => panic!("expected condition, got {other:?}"),
        }
    }

    #[test]
    fn full_shape() {
        let query = Query::from("sales", "products")
            .filter("ListPrice", Operator::Gt, 0_i64)
            .group_by("SubCategoryID")
            .aggregate(AggregateOp::Count, None, "n")
            .aggregate(AggregateOp::Avg, Some("ListPrice"), "avg_price")
            .sort_desc("ListPrice")
            .project(&["Name", "ListPrice"])
            .skip(10)
            .take(5)
            .build();

        assert_eq!(query.space, "sales");
        assert_eq!(query.store, "products");
        assert_eq!(query.group_by, vec!["SubCategoryID"]);
        assert_eq!(query.aggregates.len(), 2);
        assert_eq!(query.aggregates[1].field.as_deref(), Some("ListPrice"));
        assert_eq!(query.sort, vec![Sort::desc("ListPrice")]);
        assert_eq!(query.projection.as_deref(), Some(&["Name".to_string(), "ListPrice".to_string()][..]));
        assert_eq!(query.skip, Some(10));
        assert_eq!(query.take, Some(5));
        assert!(!query.count_only);
    }

    #[test]
    fn count_flag() {
        let query = Query::from("sales", "orders").count().build();
        assert!(query.count_only);
        assert!(query.filter.is_none());
    }
}
