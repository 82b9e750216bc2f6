//! Destination schema.
//!
//! Tables are listed parent-first; that is the create and insert order, and
//! the reverse is the drop order.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: &'static str,
    pub sql_type: &'static str,
    /// Column constraint text, empty when unconstrained.
    pub constraints: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub table: &'static str,
    pub references: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSchema],
    pub foreign_keys: &'static [ForeignKey],
}

const fn column(
    name: &'static str,
    sql_type: &'static str,
    constraints: &'static str,
) -> ColumnSchema {
    ColumnSchema {
        name,
        sql_type,
        constraints,
    }
}

pub const CUSTOMERS: TableSchema = TableSchema {
    name: "customers",
    columns: &[
        column("customer_id", "INTEGER", "PRIMARY KEY"),
        column("first_name", "VARCHAR(50)", ""),
        column("last_name", "VARCHAR(50)", ""),
        column("email", "VARCHAR(100)", "UNIQUE NOT NULL"),
        column("phone", "VARCHAR(20)", ""),
        column("city", "VARCHAR(50)", ""),
        column("registration_date", "DATE", ""),
    ],
    foreign_keys: &[],
};

pub const PRODUCTS: TableSchema = TableSchema {
    name: "products",
    columns: &[
        column("product_id", "INTEGER", "PRIMARY KEY"),
        column("product_name", "VARCHAR(100)", ""),
        column("category", "VARCHAR(50)", ""),
        column("price", "DECIMAL(10,2)", "NOT NULL"),
        column("stock_quantity", "INTEGER", "DEFAULT 0"),
    ],
    foreign_keys: &[],
};

pub const ORDERS: TableSchema = TableSchema {
    name: "orders",
    columns: &[
        column("order_id", "INTEGER", "PRIMARY KEY"),
        column("customer_id", "INTEGER", "NOT NULL"),
        column("order_date", "DATE", "NOT NULL"),
        column("total_amount", "DECIMAL(10,2)", "NOT NULL"),
        column("status", "VARCHAR(20)", "DEFAULT 'Pending'"),
    ],
    foreign_keys: &[ForeignKey {
        column: "customer_id",
        table: "customers",
        references: "customer_id",
    }],
};

pub const ORDER_ITEMS: TableSchema = TableSchema {
    name: "order_items",
    columns: &[
        column("order_item_id", "INTEGER", "PRIMARY KEY AUTOINCREMENT"),
        column("order_id", "INTEGER", "NOT NULL"),
        column("product_id", "INTEGER", "NOT NULL"),
        column("quantity", "DECIMAL(10,2)", "NOT NULL"),
        column("unit_price", "DECIMAL(10,2)", "NOT NULL"),
        column("subtotal", "DECIMAL(10,2)", "NOT NULL"),
    ],
    foreign_keys: &[
        ForeignKey {
            column: "order_id",
            table: "orders",
            references: "order_id",
        },
        ForeignKey {
            column: "product_id",
            table: "products",
            references: "product_id",
        },
    ],
};

/// All destination tables, parents before children.
pub const SCHEMA_TABLES: &[TableSchema] = &[CUSTOMERS, PRODUCTS, ORDERS, ORDER_ITEMS];

impl TableSchema {
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|col| {
                let mut def = format!("{} {}", col.name, col.sql_type);
                if !col.constraints.is_empty() {
                    let _ = write!(def, " {}", col.constraints);
                }
                def
            })
            .collect();
        parts.extend(self.foreign_keys.iter().map(|fk| {
            format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                fk.column, fk.table, fk.references
            )
        }));
        format!("CREATE TABLE {} (\n    {}\n)", self.name, parts.join(",\n    "))
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }
}
