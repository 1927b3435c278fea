//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::products::models::{NewProduct, Product, SortColumn};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sort: SortColumn,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let sql = format!("{LIST_PRODUCTS_SQL} {}", sort.order_by_sql());

        query_as::<Postgres, Product>(&sql)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pk: i64,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(pk)
            .fetch_one(&mut **tx)
            .await
    }

    /// Read a product and hold its row lock until the transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pk: i64,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LOCK_PRODUCT_SQL)
            .bind(pk)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(&product.title)
            .bind(&product.kind)
            .bind(product.price)
            .bind(product.quantity)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pk: i64,
        by: i64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(pk)
            .bind(by)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            pk: row.try_get("pk")?,
            title: row.try_get("title")?,
            kind: row.try_get("type")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
        })
    }
}
