use bson::Bson;

use crate::aggregate::{Aggregate, AggregateOp};
use crate::filter::{Filter, FilterGroup, FilterNode, LogicalOp};
use crate::operator::Operator;
use crate::query::Query;
use crate::sort::{Sort, SortDirection};

/// Parse error for text queries.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParseError(pub String);

impl std::fmt::Display for QueryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "query parse error: {}", self.0)
    }
}

impl std::error::Error for QueryParseError {}

/// Parse a text query into a [`Query`].
///
/// Grammar, clauses in any order after `FROM`:
///
/// ```text
/// FROM space.store
///   [WHERE field op value (AND field op value)*]
///   [GROUP BY field (, field)*]
///   [AGGREGATE spec (, spec)*]      spec: COUNT [(field)] AS alias
///                                         SUM|AVG|MIN|MAX (field) AS alias
///   [ORDER BY field [ASC|DESC] (, field [ASC|DESC])*]
///   [PROJECT field (, field)*]
///   [SKIP n] [LIMIT n] [COUNT]
/// ```
///
/// Operators: `=`, `!=`, `>`, `>=`, `<`, `<=`. Values: integers, floats,
/// single- or double-quoted strings. Keywords are case-insensitive; field
/// names are not. A parsed query is structurally identical to the same
/// query built through [`crate::QueryBuilder`].
pub fn parse_query(text: &str) -> Result<Query, QueryParseError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens, pos: 0 };

    parser.expect_keyword("FROM")?;
    let target = parser.expect_word("space.store target")?;
    let (space, store) = target
        .split_once('.')
        .ok_or_else(|| QueryParseError(format!("FROM target must be space.store, got: {target}")))?;
    let mut query = Query::new(space, store);

    while let Some(word) = parser.peek_word() {
        let keyword = word.to_ascii_uppercase();
        parser.pos += 1;
        match keyword.as_str() {
            "WHERE" => parser.parse_where(&mut query)?,
            "GROUP" => {
                parser.expect_keyword("BY")?;
                parser.parse_group_by(&mut query)?;
            }
            "AGGREGATE" => parser.parse_aggregates(&mut query)?,
            "ORDER" => {
                parser.expect_keyword("BY")?;
                parser.parse_order_by(&mut query)?;
            }
            "PROJECT" => parser.parse_projection(&mut query)?,
            "SKIP" => query.skip = Some(parser.expect_count("SKIP")?),
            "LIMIT" => query.take = Some(parser.expect_count("LIMIT")?),
            "COUNT" => query.count_only = true,
            other => {
                return Err(QueryParseError(format!("unknown clause: {other}")));
            }
        }
    }

    if !parser.at_end() {
        return Err(QueryParseError(format!(
            "unexpected trailing token: {}",
            parser.tokens[parser.pos]
        )));
    }

    Ok(query)
}

// ── Tokens ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Number(String),
    Str(String),
    Op(&'static str),
    Comma,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(w) => write!(f, "{w}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Str(s) => write!(f, "{s:?}"),
            Token::Op(op) => write!(f, "{op}"),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, QueryParseError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            b'=' => {
                tokens.push(Token::Op("="));
                i += 1;
            }
            b'!' if bytes.get(i + 1) == Some(&b'=') => {
                tokens.push(Token::Op("!="));
                i += 2;
            }
            b'>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Token::Op(">="));
                    i += 2;
                } else {
                    tokens.push(Token::Op(">"));
                    i += 1;
                }
            }
            b'<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Token::Op("<="));
                    i += 2;
                } else {
                    tokens.push(Token::Op("<"));
                    i += 1;
                }
            }
            b'\'' | b'"' => {
                let quote = c;
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end] != quote {
                    end += 1;
                }
                if end == bytes.len() {
                    return Err(QueryParseError("unterminated string literal".into()));
                }
                tokens.push(Token::Str(text[start..end].to_string()));
                i = end + 1;
            }
            b'-' | b'0'..=b'9' => {
                let start = i;
                i += 1;
                while i < bytes.len()
                    && (bytes[i].is_ascii_digit() || bytes[i] == b'.' || bytes[i] == b'e' || bytes[i] == b'E')
                {
                    i += 1;
                }
                tokens.push(Token::Number(text[start..i].to_string()));
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
                {
                    i += 1;
                }
                tokens.push(Token::Word(text[start..i].to_string()));
            }
            other => {
                return Err(QueryParseError(format!(
                    "unexpected character: {:?}",
                    other as char
                )));
            }
        }
    }

    Ok(tokens)
}

// ── Parser ──────────────────────────────────────────────────

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek_word(&self) -> Option<&str> {
        match self.tokens.get(self.pos) {
            Some(Token::Word(w)) => Some(w),
            _ => None,
        }
    }

    fn peek_is_keyword(&self, keyword: &str) -> bool {
        self.peek_word()
            .is_some_and(|w| w.eq_ignore_ascii_case(keyword))
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), QueryParseError> {
        if self.peek_is_keyword(keyword) {
            self.pos += 1;
            Ok(())
        } else {
            Err(QueryParseError(format!(
                "expected {keyword}, got: {}",
                self.describe_current()
            )))
        }
    }

    fn expect_word(&mut self, what: &str) -> Result<String, QueryParseError> {
        match self.tokens.get(self.pos) {
            Some(Token::Word(w)) => {
                let word = w.clone();
                self.pos += 1;
                Ok(word)
            }
            _ => Err(QueryParseError(format!(
                "expected {what}, got: {}",
                self.describe_current()
            ))),
        }
    }

    fn expect_count(&mut self, clause: &str) -> Result<usize, QueryParseError> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(n)) => {
                let value = n.parse::<usize>().map_err(|_| {
                    QueryParseError(format!("{clause} needs a non-negative integer, got: {n}"))
                })?;
                self.pos += 1;
                Ok(value)
            }
            _ => Err(QueryParseError(format!(
                "{clause} needs an integer, got: {}",
                self.describe_current()
            ))),
        }
    }

    fn describe_current(&self) -> String {
        match self.tokens.get(self.pos) {
            Some(token) => token.to_string(),
            None => "end of query".to_string(),
        }
    }

    fn parse_where(&mut self, query: &mut Query) -> Result<(), QueryParseError> {
        let mut conditions = Vec::new();
        loop {
            let field = self.expect_word("field name")?;
            let operator = match self.tokens.get(self.pos) {
                Some(Token::Op(op)) => {
                    let operator = match *op {
                        "=" => Operator::Eq,
                        "!=" => Operator::Ne,
                        ">" => Operator::Gt,
                        ">=" => Operator::Gte,
                        "<" => Operator::Lt,
                        "<=" => Operator::Lte,
                        other => {
                            return Err(QueryParseError(format!("unknown operator: {other}")));
                        }
                    };
                    self.pos += 1;
                    operator
                }
                _ => {
                    return Err(QueryParseError(format!(
                        "expected comparison operator after {field}, got: {}",
                        self.describe_current()
                    )));
                }
            };
            let value = self.parse_value()?;
            conditions.push(Filter {
                field,
                operator,
                value,
            });

            if self.peek_is_keyword("AND") {
                self.pos += 1;
            } else {
                break;
            }
        }

        query.filter = Some(FilterGroup {
            logical: LogicalOp::And,
            children: conditions.into_iter().map(FilterNode::Condition).collect(),
        });
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Bson, QueryParseError> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(n)) => {
                let value = if n.contains(['.', 'e', 'E']) {
                    let v = n
                        .parse::<f64>()
                        .map_err(|_| QueryParseError(format!("invalid number: {n}")))?;
                    Bson::Double(v)
                } else {
                    let v = n
                        .parse::<i64>()
                        .map_err(|_| QueryParseError(format!("invalid number: {n}")))?;
                    Bson::Int64(v)
                };
                self.pos += 1;
                Ok(value)
            }
            Some(Token::Str(s)) => {
                let value = Bson::String(s.clone());
                self.pos += 1;
                Ok(value)
            }
            _ => Err(QueryParseError(format!(
                "expected a literal value, got: {}",
                self.describe_current()
            ))),
        }
    }

    fn parse_group_by(&mut self, query: &mut Query) -> Result<(), QueryParseError> {
        loop {
            query.group_by.push(self.expect_word("group field")?);
            if !self.eat_comma() {
                break;
            }
        }
        Ok(())
    }

    fn parse_aggregates(&mut self, query: &mut Query) -> Result<(), QueryParseError> {
        loop {
            let op_word = self.expect_word("aggregate function")?;
            let op = match op_word.to_ascii_uppercase().as_str() {
                "COUNT" => AggregateOp::Count,
                "SUM" => AggregateOp::Sum,
                "AVG" => AggregateOp::Avg,
                "MIN" => AggregateOp::Min,
                "MAX" => AggregateOp::Max,
                other => {
                    return Err(QueryParseError(format!("unknown aggregate: {other}")));
                }
            };

            let field = if matches!(self.tokens.get(self.pos), Some(Token::LParen)) {
                self.pos += 1;
                let field = self.expect_word("aggregate field")?;
                match self.tokens.get(self.pos) {
                    Some(Token::RParen) => self.pos += 1,
                    _ => {
                        return Err(QueryParseError(format!(
                            "expected ), got: {}",
                            self.describe_current()
                        )));
                    }
                }
                Some(field)
            } else if op == AggregateOp::Count {
                // bare COUNT counts rows
                None
            } else {
                return Err(QueryParseError(format!("{op_word} needs a (field) argument")));
            };

            self.expect_keyword("AS")?;
            let alias = self.expect_word("aggregate alias")?;

            query.aggregates.push(Aggregate { op, field, alias });

            if !self.eat_comma() {
                break;
            }
        }
        Ok(())
    }

    fn parse_order_by(&mut self, query: &mut Query) -> Result<(), QueryParseError> {
        loop {
            let field = self.expect_word("sort field")?;
            let direction = if self.peek_is_keyword("DESC") {
                self.pos += 1;
                SortDirection::Desc
            } else if self.peek_is_keyword("ASC") {
                self.pos += 1;
                SortDirection::Asc
            } else {
                SortDirection::Asc
            };
            query.sort.push(Sort { field, direction });
            if !self.eat_comma() {
                break;
            }
        }
        Ok(())
    }

    fn parse_projection(&mut self, query: &mut Query) -> Result<(), QueryParseError> {
        let mut fields = Vec::new();
        loop {
            fields.push(self.expect_word("projection field")?);
            if !self.eat_comma() {
                break;
            }
        }
        query.projection = Some(fields);
        Ok(())
    }

    fn eat_comma(&mut self) -> bool {
        if matches!(self.tokens.get(self.pos), Some(Token::Comma)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_from() {
        let query = parse_query("FROM sales.orders").unwrap();
        assert_eq!(query.space, "sales");
        assert_eq!(query.store, "orders");
        assert!(query.filter.is_none());
        assert!(!query.count_only);
    }

    #[test]
    fn from_target_requires_dot() {
        let err = parse_query("FROM orders").unwrap_err();
        assert!(err.0.contains("space.store"), "{}", err.0);
    }

    #[test]
    fn where_single_condition() {
        let query = parse_query("FROM sales.orders WHERE EmployeeID = 289 COUNT").unwrap();
        let group = query.filter.unwrap();
        assert_eq!(group.logical, LogicalOp::And);
        assert_eq!(group.children.len(), 1);
        match &group.children[0] {
            FilterNode::Condition(f) => {
                assert_eq!(f.field, "EmployeeID");
                assert_eq!(f.operator, Operator::Eq);
                assert_eq!(f.value, Bson::Int64(289));
            }
            other => panic!("expected condition, got {other:?}"),
        }
        assert!(query.count_only);
    }

    #[test]
    fn where_and_chain() {
        let query =
            parse_query("FROM hr.employees WHERE Gender = 'M' AND MaritalStatus = 'S'").unwrap();
        let group = query.filter.unwrap();
        assert_eq!(group.children.len(), 2);
        match &group.children[1] {
            FilterNode::Condition(f) => {
                assert_eq!(f.field, "MaritalStatus");
                assert_eq!(f.value, Bson::String("S".into()));
            }
            other => panic!("expected condition, got {other:?}"),
        }
    }

    #[test]
    fn comparison_operators() {
        for (text, expected) in [
            ("=", Operator::Eq),
            ("!=", Operator::Ne),
            (">", Operator::Gt),
            (">=", Operator::Gte),
            ("<", Operator::Lt),
            ("<=", Operator::Lte),
        ] {
            let query =
                parse_query(&format!("FROM sales.orders WHERE TotalDue {text} 100 COUNT")).unwrap();
            let group = query.filter.unwrap();
            match &group.children[0] {
                FilterNode::Condition(f) => assert_eq!(f.operator, expected),
                other => panic!("expected condition, got {other:?}"),
            }
        }
    }

    #[test]
    fn float_and_negative_literals() {
        let query =
            parse_query("FROM sales.orders WHERE TotalDue > 0.01 AND Balance < -50").unwrap();
        let group = query.filter.unwrap();
        match &group.children[0] {
            FilterNode::Condition(f) => assert_eq!(f.value, Bson::Double(0.01)),
            other => panic!("expected condition, got {other:?}"),
        }
        match &group.children[1] {
            FilterNode::Condition(f) => assert_eq!(f.value, Bson::Int64(-50)),
            other => panic!("expected condition, got {other:?}"),
        }
    }

    #[test]
    fn order_by_directions() {
        let query =
            parse_query("FROM sales.products ORDER BY ListPrice DESC, Name LIMIT 5").unwrap();
        assert_eq!(
            query.sort,
            vec![Sort::desc("ListPrice"), Sort::asc("Name")]
        );
        assert_eq!(query.take, Some(5));
    }

    #[test]
    fn group_by_and_aggregates() {
        let query = parse_query(
            "FROM sales.orders GROUP BY EmployeeID AGGREGATE COUNT AS n, SUM(TotalDue) AS total",
        )
        .unwrap();
        assert_eq!(query.group_by, vec!["EmployeeID"]);
        assert_eq!(query.aggregates.len(), 2);
        assert_eq!(query.aggregates[0].op, AggregateOp::Count);
        assert_eq!(query.aggregates[0].field, None);
        assert_eq!(query.aggregates[0].alias, "n");
        assert_eq!(query.aggregates[1].op, AggregateOp::Sum);
        assert_eq!(query.aggregates[1].field.as_deref(), Some("TotalDue"));
        assert_eq!(query.aggregates[1].alias, "total");
    }

    #[test]
    fn count_with_field_argument() {
        let query =
            parse_query("FROM sales.products AGGREGATE COUNT(MakeFlag) AS n").unwrap();
        assert_eq!(query.aggregates[0].field.as_deref(), Some("MakeFlag"));
    }

    #[test]
    fn sum_without_field_errors() {
        let err = parse_query("FROM sales.orders AGGREGATE SUM AS total").unwrap_err();
        assert!(err.0.contains("needs a (field)"), "{}", err.0);
    }

    #[test]
    fn projection_and_paging() {
        let query =
            parse_query("FROM sales.products PROJECT Name, ListPrice SKIP 10 LIMIT 3").unwrap();
        assert_eq!(
            query.projection,
            Some(vec!["Name".to_string(), "ListPrice".to_string()])
        );
        assert_eq!(query.skip, Some(10));
        assert_eq!(query.take, Some(3));
    }

    #[test]
    fn dotted_paths_allowed() {
        let query =
            parse_query("FROM crm.customers WHERE Address.City = 'New York' PROJECT Address.City")
                .unwrap();
        let group = query.filter.unwrap();
        match &group.children[0] {
            FilterNode::Condition(f) => assert_eq!(f.field, "Address.City"),
            other => panic!("expected condition, got {other:?}"),
        }
        assert_eq!(query.projection, Some(vec!["Address.City".to_string()]));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let upper = parse_query("FROM sales.orders WHERE EmployeeID = 289 COUNT").unwrap();
        let lower = parse_query("from sales.orders where EmployeeID = 289 count").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn parsed_equals_built() {
        use crate::query::Query;

        let parsed = parse_query(
            "FROM sales.orders WHERE TotalDue > 10000 GROUP BY EmployeeID \
             AGGREGATE COUNT AS n ORDER BY EmployeeID ASC LIMIT 10",
        )
        .unwrap();
        let built = Query::from("sales", "orders")
            .filter("TotalDue", Operator::Gt, 10000_i64)
            .group_by("EmployeeID")
            .aggregate(AggregateOp::Count, None, "n")
            .sort_asc("EmployeeID")
            .take(10)
            .build();
        assert_eq!(parsed, built);
    }

    #[test]
    fn unknown_clause_errors() {
        let err = parse_query("FROM sales.orders HAVING n > 1").unwrap_err();
        assert!(err.0.contains("unknown clause"), "{}", err.0);
    }

    #[test]
    fn unterminated_string_errors() {
        let err = parse_query("FROM hr.employees WHERE Gender = 'M").unwrap_err();
        assert!(err.0.contains("unterminated"), "{}", err.0);
    }

    #[test]
    fn missing_from_errors() {
        let err = parse_query("WHERE EmployeeID = 1").unwrap_err();
        assert!(err.0.contains("expected FROM"), "{}", err.0);
    }
}
