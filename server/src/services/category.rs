//! Category catalog. Rows are seeded by migration and read-only at runtime.

use companions::Category;
use sqlx::PgPool;
use uuid::Uuid;

/// List all categories alphabetically.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, String)>("SELECT id, name FROM categories ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| to_category(id, name)).collect())
}

fn to_category(id: Uuid, name: String) -> Category {
    Category { id: id.to_string(), name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_category_stringifies_id() {
        let c = to_category(Uuid::nil(), "Scientists".into());
        assert_eq!(c.id, "00000000-0000-0000-0000-000000000000");
        assert_eq!(c.name, "Scientists");
    }

    #[cfg(feature = "live-db-tests")]
    #[tokio::test]
    async fn seeded_categories_are_listed_in_order() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live tests");
        let pool = crate::db::init_pool(&url).await.expect("db init");
        let names: Vec<String> = list_categories(&pool).await.expect("list").into_iter().map(|c| c.name).collect();
        for seeded in ["Animals", "Famous People", "Games", "Movies & TV", "Musicians", "Philosophy", "Scientists"] {
            assert!(names.iter().any(|n| n == seeded), "missing {seeded}");
        }
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
