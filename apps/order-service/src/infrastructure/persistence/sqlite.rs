//! SQLite order repository.
//!
//! Orders and their items live in two tables linked by a foreign key.
//! Every write runs in a transaction that is rolled back when any statement
//! fails, so an order is never left half-written.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use super::error::PersistenceError;
use super::rows::{ItemRow, OrderRow, group_rows};
use crate::domain::order::{Order, OrderError, OrderItem, OrderRepository, ReconstitutedOrderParams};
use crate::domain::shared::{ItemId, Money, OrderId, Quantity};

/// Schema statements, applied in order by [`SqliteOrderRepository::migrate`].
const SCHEMA: [&str; 3] = [
    r"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client TEXT NOT NULL,
        order_date TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS order_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id INTEGER NOT NULL REFERENCES orders(id),
        product TEXT NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        unit_price TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id)",
];

const SELECT_JOINED: &str = r"
    SELECT o.id AS order_id, o.client, o.order_date,
           i.id AS item_id, i.product, i.quantity, i.unit_price
    FROM orders o
    LEFT JOIN order_items i ON i.order_id = o.id
";

/// SQLite implementation of [`OrderRepository`].
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    /// Connect to a database URL (e.g. `sqlite://orders.db`), creating the
    /// file if needed, and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| PersistenceError::Connection(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        info!(
            database_url = database_url,
            max_connections = max_connections,
            "SQLite connection pool initialized"
        );

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    /// Open a private in-memory database.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// each SQLite memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn in_memory() -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| PersistenceError::Connection(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| PersistenceError::Connection(e.to_string()))?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails.
    pub async fn migrate(&self) -> Result<(), PersistenceError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Order schema applied");
        Ok(())
    }

    /// Count item rows, for one order or across all orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_items(&self, order_id: Option<OrderId>) -> Result<i64, PersistenceError> {
        let count = match order_id {
            Some(id) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE order_id = ?")
                    .bind(id.value())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    /// Commit on success, roll back on failure, and hand back the result.
    async fn finish<T>(
        tx: Transaction<'static, Sqlite>,
        result: Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn insert_order(
        conn: &mut SqliteConnection,
        order: &Order,
    ) -> Result<Order, PersistenceError> {
        let result = sqlx::query("INSERT INTO orders (client, order_date) VALUES (?, ?)")
            .bind(order.client())
            .bind(order.order_date())
            .execute(&mut *conn)
            .await?;
        let id = OrderId::new(result.last_insert_rowid());

        let items = Self::insert_items(conn, id, order.items()).await?;

        Ok(Order::reconstitute(ReconstitutedOrderParams {
            id,
            client: order.client().to_string(),
            order_date: order.order_date(),
            items,
        }))
    }

    async fn insert_items(
        conn: &mut SqliteConnection,
        order_id: OrderId,
        items: &[OrderItem],
    ) -> Result<Vec<OrderItem>, PersistenceError> {
        let mut stored = Vec::with_capacity(items.len());
        for item in items {
            let result = sqlx::query(
                "INSERT INTO order_items (order_id, product, quantity, unit_price) VALUES (?, ?, ?, ?)",
            )
            .bind(order_id.value())
            .bind(item.product())
            .bind(i64::from(item.quantity()))
            .bind(item.unit_price().amount().to_string())
            .execute(&mut *conn)
            .await?;

            stored.push(OrderItem::reconstitute(
                ItemId::new(result.last_insert_rowid()),
                order_id,
                item.product().to_string(),
                item.quantity(),
                item.unit_price(),
            ));
        }
        Ok(stored)
    }

    async fn overwrite_order(
        conn: &mut SqliteConnection,
        id: OrderId,
        order: &Order,
    ) -> Result<Order, PersistenceError> {
        let updated = sqlx::query("UPDATE orders SET client = ?, order_date = ? WHERE id = ?")
            .bind(order.client())
            .bind(order.order_date())
            .bind(id.value())
            .execute(&mut *conn)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(PersistenceError::MissingOrder(id));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(id.value())
            .execute(&mut *conn)
            .await?;

        let items = Self::insert_items(conn, id, order.items()).await?;

        Ok(Order::reconstitute(ReconstitutedOrderParams {
            id,
            client: order.client().to_string(),
            order_date: order.order_date(),
            items,
        }))
    }

    async fn remove_order(conn: &mut SqliteConnection, id: OrderId) -> Result<u64, PersistenceError> {
        let items = sqlx::query("DELETE FROM order_items WHERE order_id = ?")
            .bind(id.value())
            .execute(&mut *conn)
            .await?;

        let orders = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.value())
            .execute(&mut *conn)
            .await?;
        if orders.rows_affected() == 0 {
            return Err(PersistenceError::MissingOrder(id));
        }

        Ok(items.rows_affected())
    }

    /// Decode one join row.
    fn decode_row(row: &SqliteRow) -> Result<OrderRow, PersistenceError> {
        let order_id: i64 = row
            .try_get("order_id")
            .map_err(|e| PersistenceError::Integrity(format!("order_id: {e}")))?;
        let client: String = row
            .try_get("client")
            .map_err(|e| PersistenceError::Integrity(format!("client: {e}")))?;
        let order_date: NaiveDate = row
            .try_get("order_date")
            .map_err(|e| PersistenceError::Integrity(format!("order_date: {e}")))?;
        let item_id: Option<i64> = row
            .try_get("item_id")
            .map_err(|e| PersistenceError::Integrity(format!("item_id: {e}")))?;

        let item = match item_id {
            Some(id) => Some(Self::decode_item(row, id)?),
            None => None,
        };

        Ok(OrderRow {
            order_id: OrderId::new(order_id),
            client,
            order_date,
            item,
        })
    }

    fn decode_item(row: &SqliteRow, id: i64) -> Result<ItemRow, PersistenceError> {
        let product: String = row
            .try_get("product")
            .map_err(|e| PersistenceError::Integrity(format!("product: {e}")))?;
        let quantity: i64 = row
            .try_get("quantity")
            .map_err(|e| PersistenceError::Integrity(format!("quantity: {e}")))?;
        let unit_price: String = row
            .try_get("unit_price")
            .map_err(|e| PersistenceError::Integrity(format!("unit_price: {e}")))?;

        let unit_price = Decimal::from_str(&unit_price)
            .map_err(|e| PersistenceError::Integrity(format!("unit_price '{unit_price}': {e}")))?;

        Ok(ItemRow {
            id: ItemId::new(id),
            product,
            quantity: Quantity::new(quantity)
                .map_err(|e| PersistenceError::Integrity(e.to_string()))?,
            unit_price: Money::price(unit_price)
                .map_err(|e| PersistenceError::Integrity(e.to_string()))?,
        })
    }

    fn decode_rows(rows: &[SqliteRow]) -> Result<Vec<Order>, PersistenceError> {
        let rows = rows
            .iter()
            .map(Self::decode_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(group_rows(rows))
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create(&self, order: &Order) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await.map_err(PersistenceError::from)?;
        let result = Self::insert_order(&mut tx, order).await;
        let stored = Self::finish(tx, result).await?;

        debug!(
            order_id = ?stored.id(),
            items = stored.items().len(),
            "Order inserted"
        );
        Ok(stored)
    }

    async fn update(&self, order: &Order) -> Result<Order, OrderError> {
        let id = order.require_id()?;

        let mut tx = self.pool.begin().await.map_err(PersistenceError::from)?;
        let result = Self::overwrite_order(&mut tx, id, order).await;
        let stored = Self::finish(tx, result).await?;

        debug!(order_id = %id, items = stored.items().len(), "Order overwritten");
        Ok(stored)
    }

    async fn delete(&self, id: OrderId) -> Result<(), OrderError> {
        let mut tx = self.pool.begin().await.map_err(PersistenceError::from)?;
        let result = Self::remove_order(&mut tx, id).await;
        let removed_items = Self::finish(tx, result).await?;

        debug!(order_id = %id, removed_items = removed_items, "Order deleted");
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        let query = format!("{SELECT_JOINED} WHERE o.id = ? ORDER BY i.id");
        let rows = sqlx::query(&query)
            .bind(id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(PersistenceError::from)?;

        Ok(Self::decode_rows(&rows)?.into_iter().next())
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        let query = format!("{SELECT_JOINED} ORDER BY o.id, i.id");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(PersistenceError::from)?;

        Ok(Self::decode_rows(&rows)?)
    }
}
