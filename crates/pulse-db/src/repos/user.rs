//! User repository: customer and staff accounts, and per-business access.

use pulse_core::entities::{User, UserBusinessAccess};
use pulse_core::enums::UserRole;
use pulse_core::ids::PREFIX_USER;

use crate::SqlStore;
use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, map_unique_violation, now, parse_datetime, parse_enum,
};
use crate::inputs::NewUser;

const USER_COLUMNS: &str = "id, email, name, password_hash, role, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        email: row.get::<String>(1)?,
        name: get_opt_string(row, 2)?,
        password_hash: row.get::<String>(3)?,
        role: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_access(row: &libsql::Row) -> Result<UserBusinessAccess, DatabaseError> {
    Ok(UserBusinessAccess {
        user_id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        role: parse_enum(&row.get::<String>(2)?)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl SqlStore {
    pub async fn create_user(&self, input: NewUser) -> Result<User, DatabaseError> {
        if self.find_user_by_email(&input.email).await?.is_some() {
            return Err(DatabaseError::Conflict("user email already exists".into()));
        }
        let id = self.generate_id(PREFIX_USER).await?;
        let ts = now();
        self.conn
            .execute(
                "INSERT INTO users (id, email, name, password_hash, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    input.email.as_str(),
                    input.name.as_deref(),
                    input.password_hash.as_str(),
                    input.role.as_str(),
                    format_datetime(ts)
                ],
            )
            .await
            .map_err(|e| map_unique_violation(e, "user email"))?;

        Ok(User {
            id,
            email: input.email,
            name: input.name,
            password_hash: input.password_hash,
            role: input.role,
            created_at: ts,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 COLLATE NOCASE"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn grant_access(
        &self,
        user_id: &str,
        business_id: &str,
        role: UserRole,
    ) -> Result<UserBusinessAccess, DatabaseError> {
        if self.get_user(user_id).await?.is_none() {
            return Err(DatabaseError::not_found("user", user_id));
        }
        if self.get_business(business_id).await?.is_none() {
            return Err(DatabaseError::not_found("business", business_id));
        }
        self.conn
            .execute(
                "INSERT INTO user_business_access (user_id, business_id, role, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, business_id) DO UPDATE SET role = ?3",
                libsql::params![user_id, business_id, role.as_str(), format_datetime(now())],
            )
            .await?;

        let mut rows = self
            .conn
            .query(
                "SELECT user_id, business_id, role, created_at FROM user_business_access
                 WHERE user_id = ?1 AND business_id = ?2",
                libsql::params![user_id, business_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_access(&row)
    }

    pub async fn list_user_access(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserBusinessAccess>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT user_id, business_id, role, created_at FROM user_business_access
                 WHERE user_id = ?1 ORDER BY created_at, rowid",
                [user_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_access(&row)?);
        }
        Ok(results)
    }
}
