//! Product repository. Products are retired with `active = 0`, never deleted.

use pulse_core::entities::Product;
use pulse_core::ids::PREFIX_PRODUCT;

use crate::SqlStore;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_datetime};
use crate::inputs::NewProduct;
use crate::updates::ProductUpdate;

const PRODUCT_COLUMNS: &str =
    "id, business_id, name, description, category, image_url, active, created_at, updated_at";

fn row_to_product(row: &libsql::Row) -> Result<Product, DatabaseError> {
    Ok(Product {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        category: get_opt_string(row, 4)?,
        image_url: get_opt_string(row, 5)?,
        active: row.get::<i64>(6)? != 0,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl SqlStore {
    pub async fn create_product(&self, input: NewProduct) -> Result<Product, DatabaseError> {
        if self.get_business(&input.business_id).await?.is_none() {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let id = self.generate_id(PREFIX_PRODUCT).await?;
        let ts = now();
        self.conn
            .execute(
                "INSERT INTO products
                   (id, business_id, name, description, category, image_url, active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)",
                libsql::params![
                    id.as_str(),
                    input.business_id.as_str(),
                    input.name.as_str(),
                    input.description.as_deref(),
                    input.category.as_deref(),
                    input.image_url.as_deref(),
                    format_datetime(ts)
                ],
            )
            .await?;

        Ok(Product {
            id,
            business_id: input.business_id,
            name: input.name,
            description: input.description,
            category: input.category,
            image_url: input.image_url,
            active: true,
            created_at: ts,
            updated_at: ts,
        })
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_product(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_products(
        &self,
        business_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<Product>, DatabaseError> {
        let filter = if include_inactive { "" } else { " AND active = 1" };
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE business_id = ?1{filter}
                     ORDER BY created_at, rowid"
                ),
                [business_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_product(&row)?);
        }
        Ok(results)
    }

    pub async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, DatabaseError> {
        let current = self
            .get_product(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("product", id))?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        let nullable = [
            ("description", &update.description),
            ("category", &update.category),
            ("image_url", &update.image_url),
        ];
        for (column, value) in nullable {
            if let Some(value) = value {
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.clone().map_or(libsql::Value::Null, Into::into));
                idx += 1;
            }
        }
        if let Some(active) = update.active {
            sets.push(format!("active = ?{idx}"));
            params.push(i64::from(active).into());
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_datetime(now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE products SET {} WHERE id = ?{idx}", sets.join(", "));
        self.conn.execute(&sql, libsql::params_from_iter(params)).await?;

        self.get_product(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("product", id))
    }
}
