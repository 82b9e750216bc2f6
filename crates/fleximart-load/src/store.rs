//! Transactional SQLite sink.

use std::path::Path;

use rusqlite::{Connection, Transaction, params};
use tracing::{debug, info, info_span};

use fleximart_model::{Customer, Order, OrderItem, Product};

use crate::error::{LoadError, Result};
use crate::schema::{CUSTOMERS, ORDER_ITEMS, ORDERS, PRODUCTS, SCHEMA_TABLES};

/// The four record sets handed to a sink, borrowed from the transform output.
#[derive(Debug, Clone, Copy)]
pub struct LoadBatch<'a> {
    pub customers: &'a [Customer],
    pub products: &'a [Product],
    pub orders: &'a [Order],
    pub order_items: &'a [OrderItem],
}

/// Rows written per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
}

/// Destination for a transformed batch.
///
/// Implementations either persist the whole batch or nothing.
pub trait RecordSink {
    fn load(&mut self, batch: &LoadBatch<'_>) -> Result<LoadSummary>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        // Has no effect inside a transaction, so it is set once up front.
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Current row count of every table.
    pub fn table_counts(&self) -> Result<LoadSummary> {
        Ok(LoadSummary {
            customers: self.count(CUSTOMERS.name)?,
            products: self.count(PRODUCTS.name)?,
            orders: self.count(ORDERS.name)?,
            order_items: self.count(ORDER_ITEMS.name)?,
        })
    }

    fn count(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl RecordSink for SqliteStore {
    fn load(&mut self, batch: &LoadBatch<'_>) -> Result<LoadSummary> {
        let _span = info_span!("load").entered();
        let tx = self.conn.transaction()?;
        reset_schema(&tx)?;
        let summary = LoadSummary {
            customers: insert_customers(&tx, batch.customers)?,
            products: insert_products(&tx, batch.products)?,
            orders: insert_orders(&tx, batch.orders)?,
            order_items: insert_order_items(&tx, batch.order_items)?,
        };
        tx.commit()?;
        info!(
            customers = summary.customers,
            products = summary.products,
            orders = summary.orders,
            order_items = summary.order_items,
            "load committed"
        );
        Ok(summary)
    }
}

fn reset_schema(tx: &Transaction<'_>) -> Result<()> {
    for table in SCHEMA_TABLES.iter().rev() {
        tx.execute_batch(&table.drop_sql())
            .map_err(|source| LoadError::Schema {
                table: table.name,
                source,
            })?;
    }
    for table in SCHEMA_TABLES {
        tx.execute_batch(&table.create_sql())
            .map_err(|source| LoadError::Schema {
                table: table.name,
                source,
            })?;
    }
    debug!(tables = SCHEMA_TABLES.len(), "schema reset");
    Ok(())
}

fn insert_error(table: &'static str, key: i64) -> impl Fn(rusqlite::Error) -> LoadError {
    move |source| LoadError::Insert { table, key, source }
}

fn insert_customers(tx: &Transaction<'_>, rows: &[Customer]) -> Result<usize> {
    info!(rows = rows.len(), "inserting customers");
    let mut stmt = tx.prepare(
        "INSERT INTO customers \
         (customer_id, first_name, last_name, email, phone, city, registration_date) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.customer_id,
            row.first_name,
            row.last_name,
            row.email,
            row.phone,
            row.city,
            row.registration_date,
        ])
        .map_err(insert_error(CUSTOMERS.name, row.customer_id))?;
    }
    Ok(rows.len())
}

fn insert_products(tx: &Transaction<'_>, rows: &[Product]) -> Result<usize> {
    info!(rows = rows.len(), "inserting products");
    let mut stmt = tx.prepare(
        "INSERT INTO products (product_id, product_name, category, price, stock_quantity) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.product_id,
            row.product_name,
            row.category,
            row.price.to_string(),
            row.stock_quantity,
        ])
        .map_err(insert_error(PRODUCTS.name, row.product_id))?;
    }
    Ok(rows.len())
}

fn insert_orders(tx: &Transaction<'_>, rows: &[Order]) -> Result<usize> {
    info!(rows = rows.len(), "inserting orders");
    let mut stmt = tx.prepare(
        "INSERT INTO orders (order_id, customer_id, order_date, total_amount, status) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.order_id,
            row.customer_id,
            row.order_date,
            row.total_amount.to_string(),
            row.status.as_str(),
        ])
        .map_err(insert_error(ORDERS.name, row.order_id))?;
    }
    Ok(rows.len())
}

fn insert_order_items(tx: &Transaction<'_>, rows: &[OrderItem]) -> Result<usize> {
    info!(rows = rows.len(), "inserting order items");
    let mut stmt = tx.prepare(
        "INSERT INTO order_items (order_id, product_id, quantity, unit_price, subtotal) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.order_id,
            row.product_id,
            row.quantity.to_string(),
            row.unit_price.to_string(),
            row.subtotal.to_string(),
        ])
        .map_err(insert_error(ORDER_ITEMS.name, row.order_id))?;
    }
    Ok(rows.len())
}
