//! Business repository: tenant accounts and their public profile.

use pulse_core::entities::Business;
use pulse_core::ids::PREFIX_BUSINESS;

use crate::SqlStore;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, map_unique_violation, now, parse_datetime};
use crate::inputs::NewBusiness;
use crate::updates::BusinessUpdate;

const BUSINESS_COLUMNS: &str = "id, name, email, password_hash, slug, description, logo_url, \
     brand_color, website, welcome_message, created_at, updated_at";

fn row_to_business(row: &libsql::Row) -> Result<Business, DatabaseError> {
    Ok(Business {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        password_hash: row.get::<String>(3)?,
        slug: row.get::<String>(4)?,
        description: get_opt_string(row, 5)?,
        logo_url: get_opt_string(row, 6)?,
        brand_color: get_opt_string(row, 7)?,
        website: get_opt_string(row, 8)?,
        welcome_message: get_opt_string(row, 9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl SqlStore {
    async fn query_business(
        &self,
        clause: &str,
        value: &str,
    ) -> Result<Option<Business>, DatabaseError> {
        let sql = format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE {clause} LIMIT 1");
        let mut rows = self.conn.query(&sql, [value]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_business(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn create_business(&self, input: NewBusiness) -> Result<Business, DatabaseError> {
        if self.find_business_by_email(&input.email).await?.is_some() {
            return Err(DatabaseError::Conflict("business email already exists".into()));
        }
        if self.find_business_by_slug(&input.slug).await?.is_some() {
            return Err(DatabaseError::Conflict("business slug already exists".into()));
        }

        let id = self.generate_id(PREFIX_BUSINESS).await?;
        let ts = now();
        self.conn
            .execute(
                "INSERT INTO businesses (id, name, email, password_hash, slug, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                libsql::params![
                    id.as_str(),
                    input.name.as_str(),
                    input.email.as_str(),
                    input.password_hash.as_str(),
                    input.slug.as_str(),
                    format_datetime(ts)
                ],
            )
            .await
            .map_err(|e| map_unique_violation(e, "business"))?;
        tracing::debug!(%id, slug = %input.slug, "sql: business created");

        Ok(Business {
            id,
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            slug: input.slug,
            description: None,
            logo_url: None,
            brand_color: None,
            website: None,
            welcome_message: None,
            created_at: ts,
            updated_at: ts,
        })
    }

    pub async fn get_business(&self, id: &str) -> Result<Option<Business>, DatabaseError> {
        self.query_business("id = ?1", id).await
    }

    pub async fn find_business_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Business>, DatabaseError> {
        self.query_business("email = ?1 COLLATE NOCASE", email).await
    }

    pub async fn find_business_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Business>, DatabaseError> {
        self.query_business("slug = ?1", slug).await
    }

    pub async fn update_business(
        &self,
        id: &str,
        update: BusinessUpdate,
    ) -> Result<Business, DatabaseError> {
        let current = self
            .get_business(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("business", id))?;

        if let Some(slug) = &update.slug {
            if let Some(other) = self.find_business_by_slug(slug).await? {
                if other.id != current.id {
                    return Err(DatabaseError::Conflict("business slug already exists".into()));
                }
            }
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref slug) = update.slug {
            sets.push(format!("slug = ?{idx}"));
            params.push(slug.clone().into());
            idx += 1;
        }
        let nullable = [
            ("description", &update.description),
            ("logo_url", &update.logo_url),
            ("brand_color", &update.brand_color),
            ("website", &update.website),
            ("welcome_message", &update.welcome_message),
        ];
        for (column, value) in nullable {
            if let Some(value) = value {
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.clone().map_or(libsql::Value::Null, Into::into));
                idx += 1;
            }
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_datetime(now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE businesses SET {} WHERE id = ?{idx}", sets.join(", "));
        self.conn
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(|e| map_unique_violation(e, "business slug"))?;

        self.get_business(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("business", id))
    }
}
