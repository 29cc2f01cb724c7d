//! News Post Storage
//! Mission: Persist news posts with SQLite

use crate::news::models::NewsPost;
use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

/// News post storage with SQLite backend
pub struct PostStore {
    db_path: String,
}

impl PostStore {
    /// Create a new post store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS news_posts (
                id TEXT PRIMARY KEY,
                post_title TEXT UNIQUE NOT NULL,
                category TEXT NOT NULL,
                news_content TEXT NOT NULL,
                user_id TEXT NOT NULL,
                published INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<NewsPost> {
        Ok(NewsPost {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            post_title: row.get(1)?,
            category: row.get(2)?,
            news_content: row.get(3)?,
            user_id: Uuid::parse_str(&row.get::<_, String>(4)?).unwrap(),
            published: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    /// Create a new unpublished post
    pub fn create_post(
        &self,
        post_title: &str,
        category: &str,
        news_content: &str,
        user_id: &Uuid,
    ) -> Result<NewsPost> {
        let post = NewsPost {
            id: Uuid::new_v4(),
            post_title: post_title.to_string(),
            category: category.to_string(),
            news_content: news_content.to_string(),
            user_id: *user_id,
            published: false,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO news_posts (id, post_title, category, news_content, user_id, published, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                post.id.to_string(),
                post.post_title,
                post.category,
                post.news_content,
                post.user_id.to_string(),
                post.published,
                post.created_at,
            ],
        )?;

        info!("📰 Created post: {}", post.post_title);

        Ok(post)
    }

    /// Get a post by id
    pub fn find_by_id(&self, post_id: &Uuid) -> Result<Option<NewsPost>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, post_title, category, news_content, user_id, published, created_at
             FROM news_posts WHERE id = ?1",
        )?;

        match stmt.query_row(params![post_id.to_string()], Self::row_to_post) {
            Ok(post) => Ok(Some(post)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a post by title
    pub fn find_by_title(&self, post_title: &str) -> Result<Option<NewsPost>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, post_title, category, news_content, user_id, published, created_at
             FROM news_posts WHERE post_title = ?1",
        )?;

        match stmt.query_row(params![post_title], Self::row_to_post) {
            Ok(post) => Ok(Some(post)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every post
    pub fn list_all(&self) -> Result<Vec<NewsPost>> {
        self.query_posts(
            "SELECT id, post_title, category, news_content, user_id, published, created_at
             FROM news_posts ORDER BY created_at DESC",
            [],
        )
    }

    /// List posts authored by one user
    pub fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<NewsPost>> {
        self.query_posts(
            "SELECT id, post_title, category, news_content, user_id, published, created_at
             FROM news_posts WHERE user_id = ?1 ORDER BY created_at DESC",
            params![user_id.to_string()],
        )
    }

    /// List published posts only
    pub fn list_published(&self) -> Result<Vec<NewsPost>> {
        self.query_posts(
            "SELECT id, post_title, category, news_content, user_id, published, created_at
             FROM news_posts WHERE published = 1 ORDER BY created_at DESC",
            [],
        )
    }

    fn query_posts<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<NewsPost>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(sql)?;

        let posts = stmt
            .query_map(params, Self::row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    /// Delete a post by id. Returns false when no such post exists.
    pub fn delete_post(&self, post_id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM news_posts WHERE id = ?1",
            params![post_id.to_string()],
        )?;

        Ok(rows_affected > 0)
    }

    /// Flip a post's published flag. Returns the new state, or None when the
    /// id is unknown.
    pub fn toggle_published(&self, post_id: &Uuid) -> Result<Option<bool>> {
        let Some(post) = self.find_by_id(post_id)? else {
            return Ok(None);
        };

        let next = !post.published;
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "UPDATE news_posts SET published = ?2 WHERE id = ?1",
            params![post_id.to_string(), next],
        )?;

        info!(
            "📣 Post {} is now {}",
            post_id,
            if next { "published" } else { "unpublished" }
        );

        Ok(Some(next))
    }

    /// Rewrite a post's content. The post is reowned to the given user and
    /// unpublished until an admin republishes it. Returns false when the id
    /// is unknown.
    pub fn update_post(
        &self,
        post_id: &Uuid,
        post_title: &str,
        category: &str,
        news_content: &str,
        user_id: &Uuid,
    ) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "UPDATE news_posts
             SET post_title = ?2, category = ?3, news_content = ?4, user_id = ?5, published = 0
             WHERE id = ?1",
            params![
                post_id.to_string(),
                post_title,
                category,
                news_content,
                user_id.to_string(),
            ],
        )?;

        Ok(rows_affected > 0)
    }
}
