//! The verification case table.
//!
//! Expected values are literals computed from the fixture JSON by an
//! independent scripting step; they are never derived from ShinyDB's own
//! output. Each entry carries both construction paths for the same logical
//! query — the runner executes and asserts them separately.

use shiny_query::{AggregateOp, Operator, Query, Sort};

use crate::case::{Case, Expectation, Expected};

fn case(
    id: &'static str,
    description: &'static str,
    query: Query,
    text: &'static str,
    expect: Expectation,
) -> Case {
    Case {
        id,
        description,
        query,
        text,
        expect,
    }
}

pub fn cases() -> Vec<Case> {
    let mut cases = Vec::new();

    // ── Category 1: count queries ───────────────────────────────
    cases.push(case(
        "1.1",
        "count all orders",
        Query::from("adventure", "orders").count().build(),
        "FROM adventure.orders COUNT",
        Expectation::Count(3806),
    ));
    cases.push(case(
        "1.2",
        "count all customers",
        Query::from("adventure", "customers").count().build(),
        "FROM adventure.customers COUNT",
        Expectation::Count(1143),
    ));
    cases.push(case(
        "1.3",
        "count all employees",
        Query::from("adventure", "employees").count().build(),
        "FROM adventure.employees COUNT",
        Expectation::Count(290),
    ));
    cases.push(case(
        "1.4",
        "count orders for employee 289",
        Query::from("adventure", "orders")
            .filter("EmployeeID", Operator::Eq, 289_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE EmployeeID = 289 COUNT",
        Expectation::Count(348),
    ));
    cases.push(case(
        "1.5",
        "count orders for employee 288",
        Query::from("adventure", "orders")
            .filter("EmployeeID", Operator::Eq, 288_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE EmployeeID = 288 COUNT",
        Expectation::Count(159),
    ));
    cases.push(case(
        "1.6",
        "count active vendors",
        Query::from("adventure", "vendors")
            .filter("ActiveFlag", Operator::Eq, 1_i64)
            .count()
            .build(),
        "FROM adventure.vendors WHERE ActiveFlag = 1 COUNT",
        Expectation::Count(100),
    ));
    cases.push(case(
        "1.7",
        "count manufactured products",
        Query::from("adventure", "products")
            .filter("MakeFlag", Operator::Eq, 1_i64)
            .count()
            .build(),
        "FROM adventure.products WHERE MakeFlag = 1 COUNT",
        Expectation::Count(239),
    ));
    cases.push(case(
        "1.8",
        "count orders for customer 1045",
        Query::from("adventure", "orders")
            .filter("CustomerID", Operator::Eq, 1045_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE CustomerID = 1045 COUNT",
        Expectation::Count(4),
    ));

    // ── Category 2: equality filters, returned documents ────────
    cases.push(case(
        "2.1",
        "male employees",
        Query::from("adventure", "employees")
            .filter("Gender", Operator::Eq, "M")
            .build(),
        "FROM adventure.employees WHERE Gender = 'M'",
        Expectation::DocCount(206),
    ));
    cases.push(case(
        "2.2",
        "female employees",
        Query::from("adventure", "employees")
            .filter("Gender", Operator::Eq, "F")
            .build(),
        "FROM adventure.employees WHERE Gender = 'F'",
        Expectation::DocCount(84),
    ));
    cases.push(case(
        "2.3",
        "employee 274 by id",
        Query::from("adventure", "employees")
            .filter("EmployeeID", Operator::Eq, 274_i64)
            .build(),
        "FROM adventure.employees WHERE EmployeeID = 274",
        Expectation::DocCount(1),
    ));
    cases.push(case(
        "2.4",
        "products in subcategory 14",
        Query::from("adventure", "products")
            .filter("SubCategoryID", Operator::Eq, 14_i64)
            .build(),
        "FROM adventure.products WHERE SubCategoryID = 14",
        Expectation::DocCount(32),
    ));
    cases.push(case(
        "2.5",
        "category named Bikes",
        Query::from("adventure", "productcategories")
            .filter("CategoryName", Operator::Eq, "Bikes")
            .build(),
        "FROM adventure.productcategories WHERE CategoryName = 'Bikes'",
        Expectation::DocCount(1),
    ));

    // ── Category 3: comparison filters ──────────────────────────
    cases.push(case(
        "3.1",
        "orders over 50000",
        Query::from("adventure", "orders")
            .filter("TotalDue", Operator::Gt, 50000_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE TotalDue > 50000 COUNT",
        Expectation::Count(272),
    ));
    cases.push(case(
        "3.2",
        "orders under 100",
        Query::from("adventure", "orders")
            .filter("TotalDue", Operator::Lt, 100_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE TotalDue < 100 COUNT",
        Expectation::Count(187),
    ));
    cases.push(case(
        "3.3",
        "orders at or above 100000",
        Query::from("adventure", "orders")
            .filter("TotalDue", Operator::Gte, 100000_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE TotalDue >= 100000 COUNT",
        Expectation::Count(39),
    ));
    cases.push(case(
        "3.4",
        "products listed over 1000",
        Query::from("adventure", "products")
            .filter("ListPrice", Operator::Gt, 1000_i64)
            .count()
            .build(),
        "FROM adventure.products WHERE ListPrice > 1000 COUNT",
        Expectation::Count(102),
    ));
    cases.push(case(
        "3.5",
        "unpriced products",
        Query::from("adventure", "products")
            .filter("ListPrice", Operator::Lte, 0_i64)
            .count()
            .build(),
        "FROM adventure.products WHERE ListPrice <= 0 COUNT",
        Expectation::Count(209),
    ));
    cases.push(case(
        "3.6",
        "vendors with credit rating above 3",
        Query::from("adventure", "vendors")
            .filter("CreditRating", Operator::Gt, 3_i64)
            .count()
            .build(),
        "FROM adventure.vendors WHERE CreditRating > 3 COUNT",
        Expectation::Count(11),
    ));
    cases.push(case(
        "3.7",
        "vendors not rated 1",
        Query::from("adventure", "vendors")
            .filter("CreditRating", Operator::Ne, 1_i64)
            .count()
            .build(),
        "FROM adventure.vendors WHERE CreditRating != 1 COUNT",
        Expectation::Count(17),
    ));
    cases.push(case(
        "3.8",
        "orders for employees 285 through 287",
        Query::from("adventure", "orders")
            .filter("EmployeeID", Operator::Gte, 285_i64)
            .filter("EmployeeID", Operator::Lte, 287_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE EmployeeID >= 285 AND EmployeeID <= 287 COUNT",
        Expectation::Count(641),
    ));

    // ── Category 4: compound filters ────────────────────────────
    cases.push(case(
        "4.1",
        "orders for employee 289 and customer 1045",
        Query::from("adventure", "orders")
            .filter("EmployeeID", Operator::Eq, 289_i64)
            .filter("CustomerID", Operator::Eq, 1045_i64)
            .count()
            .build(),
        "FROM adventure.orders WHERE EmployeeID = 289 AND CustomerID = 1045 COUNT",
        Expectation::Count(2),
    ));
    cases.push(case(
        "4.2",
        "married male employees",
        Query::from("adventure", "employees")
            .filter("Gender", Operator::Eq, "M")
            .filter("MaritalStatus", Operator::Eq, "M")
            .count()
            .build(),
        "FROM adventure.employees WHERE Gender = 'M' AND MaritalStatus = 'M' COUNT",
        Expectation::Count(97),
    ));
    cases.push(case(
        "4.3",
        "single male employees",
        Query::from("adventure", "employees")
            .filter("Gender", Operator::Eq, "M")
            .filter("MaritalStatus", Operator::Eq, "S")
            .count()
            .build(),
        "FROM adventure.employees WHERE Gender = 'M' AND MaritalStatus = 'S' COUNT",
        Expectation::Count(109),
    ));

    // ── Category 5: limit and skip ──────────────────────────────
    cases.push(case(
        "5.1",
        "first ten orders",
        Query::from("adventure", "orders").take(10).build(),
        "FROM adventure.orders LIMIT 10",
        Expectation::DocCount(10),
    ));
    cases.push(case(
        "5.2",
        "first five orders",
        Query::from("adventure", "orders").take(5).build(),
        "FROM adventure.orders LIMIT 5",
        Expectation::DocCount(5),
    ));
    cases.push(case(
        "5.3",
        "orders past 3800",
        Query::from("adventure", "orders").skip(3800).build(),
        "FROM adventure.orders SKIP 3800",
        Expectation::DocCount(6),
    ));
    cases.push(case(
        "5.4",
        "first hundred customers",
        Query::from("adventure", "customers").take(100).build(),
        "FROM adventure.customers LIMIT 100",
        Expectation::DocCount(100),
    ));

    // ── Category 6: ordering ────────────────────────────────────
    cases.push(case(
        "6.1",
        "most expensive products first",
        Query::from("adventure", "products")
            .sort_desc("ListPrice")
            .take(5)
            .build(),
        "FROM adventure.products ORDER BY ListPrice DESC LIMIT 5",
        Expectation::Order {
            path: "ListPrice",
            values: vec![
                Expected::Float(3578.27),
                Expected::Float(3578.27),
                Expected::Float(3578.27),
                Expected::Float(3578.27),
                Expected::Float(3578.27),
            ],
        },
    ));
    cases.push(case(
        "6.2",
        "cheapest products first",
        Query::from("adventure", "products")
            .sort_asc("ListPrice")
            .take(5)
            .build(),
        "FROM adventure.products ORDER BY ListPrice ASC LIMIT 5",
        Expectation::Order {
            path: "ListPrice",
            values: vec![
                Expected::Float(0.0),
                Expected::Float(0.0),
                Expected::Float(0.0),
                Expected::Float(0.0),
                Expected::Float(0.0),
            ],
        },
    ));
    cases.push(case(
        "6.3",
        "lowest employee ids first",
        Query::from("adventure", "employees")
            .sort_asc("EmployeeID")
            .take(3)
            .build(),
        "FROM adventure.employees ORDER BY EmployeeID ASC LIMIT 3",
        Expectation::Order {
            path: "EmployeeID",
            values: vec![Expected::Int(1), Expected::Int(2), Expected::Int(3)],
        },
    ));
    cases.push(case(
        "6.4",
        "highest employee ids first",
        Query::from("adventure", "employees")
            .sort_desc("EmployeeID")
            .take(3)
            .build(),
        "FROM adventure.employees ORDER BY EmployeeID DESC LIMIT 3",
        Expectation::Order {
            path: "EmployeeID",
            values: vec![Expected::Int(290), Expected::Int(289), Expected::Int(288)],
        },
    ));
    cases.push(case(
        "6.5",
        "products by subcategory, price breaking ties",
        Query::from("adventure", "products")
            .sort_asc("SubCategoryID")
            .sort_desc("ListPrice")
            .take(50)
            .build(),
        "FROM adventure.products ORDER BY SubCategoryID ASC, ListPrice DESC LIMIT 50",
        Expectation::SortedBy(vec![Sort::asc("SubCategoryID"), Sort::desc("ListPrice")]),
    ));
    cases.push(case(
        "6.6",
        "employees by gender, id breaking ties",
        Query::from("adventure", "employees")
            .sort_asc("Gender")
            .sort_desc("EmployeeID")
            .take(20)
            .build(),
        "FROM adventure.employees ORDER BY Gender ASC, EmployeeID DESC LIMIT 20",
        Expectation::SortedBy(vec![Sort::asc("Gender"), Sort::desc("EmployeeID")]),
    ));

    // ── Category 7: count aggregates ────────────────────────────
    cases.push(case(
        "7.1",
        "aggregate count of all orders",
        Query::from("adventure", "orders")
            .aggregate(AggregateOp::Count, None, "total")
            .build(),
        "FROM adventure.orders AGGREGATE COUNT AS total",
        Expectation::Aggregates(vec![("total", 3806.0)]),
    ));
    cases.push(case(
        "7.2",
        "aggregate count of employee 289 orders",
        Query::from("adventure", "orders")
            .filter("EmployeeID", Operator::Eq, 289_i64)
            .aggregate(AggregateOp::Count, None, "total")
            .build(),
        "FROM adventure.orders WHERE EmployeeID = 289 AGGREGATE COUNT AS total",
        Expectation::Aggregates(vec![("total", 348.0)]),
    ));
    cases.push(case(
        "7.3",
        "aggregate count of all customers",
        Query::from("adventure", "customers")
            .aggregate(AggregateOp::Count, None, "total")
            .build(),
        "FROM adventure.customers AGGREGATE COUNT AS total",
        Expectation::Aggregates(vec![("total", 1143.0)]),
    ));
    cases.push(case(
        "7.4",
        "aggregate count over a field",
        Query::from("adventure", "products")
            .filter("MakeFlag", Operator::Eq, 1_i64)
            .aggregate(AggregateOp::Count, Some("MakeFlag"), "n")
            .build(),
        "FROM adventure.products WHERE MakeFlag = 1 AGGREGATE COUNT(MakeFlag) AS n",
        Expectation::Aggregates(vec![("n", 239.0)]),
    ));

    // ── Category 8: sum, avg, min, max ──────────────────────────
    cases.push(case(
        "8.1",
        "revenue across all orders",
        Query::from("adventure", "orders")
            .aggregate(AggregateOp::Sum, Some("TotalDue"), "total")
            .build(),
        "FROM adventure.orders AGGREGATE SUM(TotalDue) AS total",
        Expectation::Aggregates(vec![("total", 92_260_572.9520)]),
    ));
    cases.push(case(
        "8.2",
        "average order value",
        Query::from("adventure", "orders")
            .aggregate(AggregateOp::Avg, Some("TotalDue"), "avg_total")
            .build(),
        "FROM adventure.orders AGGREGATE AVG(TotalDue) AS avg_total",
        Expectation::Aggregates(vec![("avg_total", 24_240.8231)]),
    ));
    cases.push(case(
        "8.3",
        "smallest order",
        Query::from("adventure", "orders")
            .aggregate(AggregateOp::Min, Some("TotalDue"), "min_total")
            .build(),
        "FROM adventure.orders AGGREGATE MIN(TotalDue) AS min_total",
        Expectation::Aggregates(vec![("min_total", 1.5183)]),
    ));
    cases.push(case(
        "8.4",
        "largest order",
        Query::from("adventure", "orders")
            .aggregate(AggregateOp::Max, Some("TotalDue"), "max_total")
            .build(),
        "FROM adventure.orders AGGREGATE MAX(TotalDue) AS max_total",
        Expectation::Aggregates(vec![("max_total", 187_487.825)]),
    ));
    cases.push(case(
        "8.5",
        "revenue attributed to employee 289",
        Query::from("adventure", "orders")
            .filter("EmployeeID", Operator::Eq, 289_i64)
            .aggregate(AggregateOp::Sum, Some("TotalDue"), "revenue")
            .build(),
        "FROM adventure.orders WHERE EmployeeID = 289 AGGREGATE SUM(TotalDue) AS revenue",
        Expectation::Aggregates(vec![("revenue", 9_585_124.9477)]),
    ));
    cases.push(case(
        "8.6",
        "list price spread",
        Query::from("adventure", "products")
            .aggregate(AggregateOp::Avg, Some("ListPrice"), "avg_price")
            .aggregate(AggregateOp::Max, Some("ListPrice"), "max_price")
            .aggregate(AggregateOp::Min, Some("ListPrice"), "min_price")
            .build(),
        "FROM adventure.products AGGREGATE AVG(ListPrice) AS avg_price, \
         MAX(ListPrice) AS max_price, MIN(ListPrice) AS min_price",
        Expectation::Aggregates(vec![
            ("avg_price", 438.6662),
            ("max_price", 3578.27),
            ("min_price", 0.0),
        ]),
    ));

    // ── Category 9: group by ────────────────────────────────────
    cases.push(case(
        "9.1",
        "orders grouped by employee",
        Query::from("adventure", "orders")
            .group_by("EmployeeID")
            .aggregate(AggregateOp::Count, None, "n")
            .build(),
        "FROM adventure.orders GROUP BY EmployeeID AGGREGATE COUNT AS n",
        Expectation::GroupCount(17),
    ));
    cases.push(case(
        "9.2",
        "employees grouped by gender",
        Query::from("adventure", "employees")
            .group_by("Gender")
            .aggregate(AggregateOp::Count, None, "n")
            .build(),
        "FROM adventure.employees GROUP BY Gender AGGREGATE COUNT AS n",
        Expectation::GroupCount(2),
    ));
    cases.push(case(
        "9.3",
        "employees grouped by gender and marital status",
        Query::from("adventure", "employees")
            .group_by("Gender")
            .group_by("MaritalStatus")
            .aggregate(AggregateOp::Count, None, "n")
            .build(),
        "FROM adventure.employees GROUP BY Gender, MaritalStatus AGGREGATE COUNT AS n",
        Expectation::GroupCount(4),
    ));
    cases.push(case(
        "9.4",
        "per-employee order count and revenue",
        Query::from("adventure", "orders")
            .group_by("EmployeeID")
            .aggregate(AggregateOp::Count, None, "n")
            .aggregate(AggregateOp::Sum, Some("TotalDue"), "total")
            .build(),
        "FROM adventure.orders GROUP BY EmployeeID AGGREGATE COUNT AS n, SUM(TotalDue) AS total",
        Expectation::GroupCount(17),
    ));
    cases.push(case(
        "9.5",
        "vendors grouped by credit rating",
        Query::from("adventure", "vendors")
            .group_by("CreditRating")
            .aggregate(AggregateOp::Count, None, "n")
            .build(),
        "FROM adventure.vendors GROUP BY CreditRating AGGREGATE COUNT AS n",
        Expectation::GroupCount(5),
    ));
    cases.push(case(
        "9.6",
        "employee 289's orders grouped by customer",
        Query::from("adventure", "orders")
            .filter("EmployeeID", Operator::Eq, 289_i64)
            .group_by("CustomerID")
            .aggregate(AggregateOp::Count, None, "n")
            .aggregate(AggregateOp::Sum, Some("TotalDue"), "total")
            .build(),
        "FROM adventure.orders WHERE EmployeeID = 289 GROUP BY CustomerID \
         AGGREGATE COUNT AS n, SUM(TotalDue) AS total",
        Expectation::GroupCount(76),
    ));

    // ── Category 10: filter plus group by ───────────────────────
    cases.push(case(
        "10.1",
        "large orders grouped by employee",
        Query::from("adventure", "orders")
            .filter("TotalDue", Operator::Gt, 10000_i64)
            .group_by("EmployeeID")
            .aggregate(AggregateOp::Count, None, "n")
            .build(),
        "FROM adventure.orders WHERE TotalDue > 10000 GROUP BY EmployeeID AGGREGATE COUNT AS n",
        Expectation::GroupCount(17),
    ));
    cases.push(case(
        "10.2",
        "priced products grouped by subcategory",
        Query::from("adventure", "products")
            .filter("ListPrice", Operator::Gt, 0_i64)
            .group_by("SubCategoryID")
            .aggregate(AggregateOp::Count, None, "n")
            .aggregate(AggregateOp::Avg, Some("ListPrice"), "avg_price")
            .build(),
        "FROM adventure.products WHERE ListPrice > 0 GROUP BY SubCategoryID \
         AGGREGATE COUNT AS n, AVG(ListPrice) AS avg_price",
        Expectation::GroupCount(37),
    ));

    // ── Category 11: projection ─────────────────────────────────
    cases.push(case(
        "11.1",
        "projected product fields",
        Query::from("adventure", "products")
            .project(&["Name", "ListPrice"])
            .take(1)
            .build(),
        "FROM adventure.products PROJECT Name, ListPrice LIMIT 1",
        Expectation::Projection {
            present: vec!["Name", "ListPrice"],
            absent: vec!["StandardCost", "MakeFlag"],
        },
    ));
    cases.push(case(
        "11.2",
        "projected employee fields",
        Query::from("adventure", "employees")
            .project(&["EmployeeID", "Gender"])
            .take(1)
            .build(),
        "FROM adventure.employees PROJECT EmployeeID, Gender LIMIT 1",
        Expectation::Projection {
            present: vec!["EmployeeID", "Gender"],
            absent: vec!["MaritalStatus", "BirthDate"],
        },
    ));
    cases.push(case(
        "11.3",
        "projected nested customer fields",
        Query::from("adventure", "customers")
            .project(&["Name", "Address.City"])
            .take(1)
            .build(),
        "FROM adventure.customers PROJECT Name, Address.City LIMIT 1",
        Expectation::Projection {
            present: vec!["Name", "Address.City"],
            absent: vec!["Phone"],
        },
    ));

    cases
}
