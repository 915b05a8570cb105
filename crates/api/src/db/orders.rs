//! Order repository for database operations.
//!
//! Checkout is a single transaction: the order row, its item snapshot, the
//! coupon consumption, and the cart cleanup either all land or none do.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cart_core::{CartItemId, MemberCouponId, MemberId, Money, OrderId};

use super::{MemberCouponRepository, RepositoryError, corrupt};
use crate::models::{NewOrder, Order, OrderItem, OrderItems, Quantity};

/// Internal row type for `orders` queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    member_id: i64,
    delivery_fee: i64,
    member_coupon_id: Option<i64>,
    created_at: DateTime<Utc>,
}

/// Internal row type for `order_item` queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    product_name: String,
    image_url: String,
    unit_price: i64,
    quantity: i32,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let unit_price = Money::new(row.unit_price)
            .map_err(|e| corrupt("invalid unit price in database", e))?;
        let quantity =
            Quantity::new(row.quantity).map_err(|e| corrupt("invalid quantity in database", e))?;

        Ok(Self {
            product_name: row.product_name,
            image_url: row.image_url,
            unit_price,
            quantity,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a checkout atomically.
    ///
    /// Inserts the order row and its item snapshot, marks the applied coupon
    /// used, and deletes the ordered cart rows, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the coupon was consumed by a
    /// concurrent checkout and `RepositoryError::Database` if any statement
    /// fails; nothing is committed in either case.
    pub async fn place(
        &self,
        order: &NewOrder,
        cart_item_ids: &[CartItemId],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO orders (member_id, delivery_fee, member_coupon_id) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(order.member_id.as_i64())
        .bind(order.delivery_fee.amount())
        .bind(order.coupon.as_ref().map(|c| c.id.as_i64()))
        .fetch_one(&mut *tx)
        .await?;

        for item in order.items.iter() {
            sqlx::query(
                "INSERT INTO order_item (order_id, product_name, image_url, unit_price, quantity) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(order_id)
            .bind(&item.product_name)
            .bind(&item.image_url)
            .bind(item.unit_price.amount())
            .bind(item.quantity.value())
            .execute(&mut *tx)
            .await?;
        }

        // The `AND NOT used` guard makes consumption atomic: a concurrent
        // checkout that won the race leaves zero rows to update here, and the
        // whole transaction rolls back.
        if let Some(coupon) = &order.coupon {
            let consumed =
                sqlx::query("UPDATE member_coupon SET used = TRUE WHERE id = $1 AND NOT used")
                    .bind(coupon.id.as_i64())
                    .execute(&mut *tx)
                    .await?;

            if consumed.rows_affected() != 1 {
                return Err(RepositoryError::Conflict(
                    "coupon has already been used".to_owned(),
                ));
            }
        }

        let raw_ids: Vec<i64> = cart_item_ids.iter().map(|id| id.as_i64()).collect();
        sqlx::query("DELETE FROM cart_item WHERE id = ANY($1)")
            .bind(&raw_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(OrderId::new(order_id))
    }

    /// List a member's orders with their items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_by_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, member_id, delivery_fee, member_coupon_id, created_at \
             FROM orders WHERE member_id = $1 ORDER BY id DESC",
        )
        .bind(member_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }
        Ok(orders)
    }

    /// Get an order with its items and applied coupon.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, member_id, delivery_fee, member_coupon_id, created_at \
             FROM orders WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Attach items and the applied coupon to an order row.
    async fn hydrate(&self, row: OrderRow) -> Result<Order, RepositoryError> {
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT product_name, image_url, unit_price, quantity \
             FROM order_item WHERE order_id = $1 ORDER BY id",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        let items: Vec<OrderItem> = item_rows
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<Result<_, _>>()?;
        let items = OrderItems::new(items)
            .map_err(|e| corrupt("order without items in database", e))?;

        let delivery_fee = Money::new(row.delivery_fee)
            .map_err(|e| corrupt("invalid delivery fee in database", e))?;

        let coupon = match row.member_coupon_id {
            Some(coupon_id) => {
                let coupon = MemberCouponRepository::new(self.pool)
                    .get(MemberCouponId::new(coupon_id))
                    .await?
                    .ok_or_else(|| {
                        corrupt("order references missing coupon", coupon_id)
                    })?;
                Some(coupon)
            }
            None => None,
        };

        Ok(Order {
            id: OrderId::new(row.id),
            member_id: MemberId::new(row.member_id),
            items,
            delivery_fee,
            coupon,
            created_at: row.created_at,
        })
    }
}
