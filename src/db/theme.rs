use color_eyre::Result;

use super::models::Theme;
use super::Db;

impl Db {
    pub async fn create_theme(&self, name: &str) -> Result<Theme> {
        let theme = sqlx::query_as::<_, Theme>(
            "INSERT INTO themes (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new theme created: id={}, name={name}", theme.id);
        Ok(theme)
    }

    pub async fn themes(&self) -> Result<Vec<Theme>> {
        let themes = sqlx::query_as::<_, Theme>("SELECT id, name FROM themes ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(themes)
    }

    pub async fn rename_theme(&self, theme_id: i32, name: &str) -> Result<Option<Theme>> {
        let theme = sqlx::query_as::<_, Theme>(
            "UPDATE themes SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(theme_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(theme)
    }

    /// Returns whether a row was actually deleted.
    pub async fn delete_theme(&self, theme_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(theme_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn theme_exists(&self, theme_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM themes WHERE id = $1)")
            .bind(theme_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
