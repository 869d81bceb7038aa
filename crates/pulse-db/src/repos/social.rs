//! Social link repository.

use pulse_core::entities::SocialLink;
use pulse_core::ids::PREFIX_SOCIAL_LINK;

use crate::SqlStore;
use crate::error::DatabaseError;
use crate::helpers::get_unsigned;
use crate::inputs::NewSocialLink;

fn row_to_link(row: &libsql::Row) -> Result<SocialLink, DatabaseError> {
    Ok(SocialLink {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        platform: row.get::<String>(2)?,
        url: row.get::<String>(3)?,
        display_order: get_unsigned(row, 4)?,
    })
}

impl SqlStore {
    pub async fn list_social_links(
        &self,
        business_id: &str,
    ) -> Result<Vec<SocialLink>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, business_id, platform, url, display_order FROM social_links
                 WHERE business_id = ?1 ORDER BY display_order, rowid",
                [business_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_link(&row)?);
        }
        Ok(results)
    }

    pub async fn replace_social_links(
        &self,
        business_id: &str,
        links: Vec<NewSocialLink>,
    ) -> Result<Vec<SocialLink>, DatabaseError> {
        if self.get_business(business_id).await?.is_none() {
            return Err(DatabaseError::not_found("business", business_id));
        }

        let mut created = Vec::with_capacity(links.len());
        for (position, link) in (0_u32..).zip(links) {
            created.push(SocialLink {
                id: self.generate_id(PREFIX_SOCIAL_LINK).await?,
                business_id: business_id.to_string(),
                platform: link.platform,
                url: link.url,
                display_order: position,
            });
        }

        let tx = self.conn.transaction().await?;
        tx.execute("DELETE FROM social_links WHERE business_id = ?1", [business_id])
            .await?;
        for link in &created {
            tx.execute(
                "INSERT INTO social_links (id, business_id, platform, url, display_order)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    link.id.as_str(),
                    business_id,
                    link.platform.as_str(),
                    link.url.as_str(),
                    i64::from(link.display_order)
                ],
            )
            .await?;
        }
        tx.commit().await?;
        Ok(created)
    }
}
