use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{Article, ArticleRepository, CoreError, EntityKind, Journal, JournalRepository};

fn lock<'a, T>(
    inner: &'a Mutex<HashMap<String, T>>,
    operation: &'static str,
) -> Result<MutexGuard<'a, HashMap<String, T>>, CoreError> {
    inner
        .lock()
        .map_err(|_| CoreError::persistence(operation, "mutex poisoned"))
}

/// Volatile article store keyed by id.
///
/// `create` overwrites an existing id (last write wins). Title lookups scan
/// every stored article; with duplicate titles the match returned depends on
/// map iteration order.
pub struct InMemoryArticleRepo {
    inner: Mutex<HashMap<String, Article>>,
}

impl InMemoryArticleRepo {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(lock(&self.inner, "count articles")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryArticleRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepo {
    async fn create(&self, article: Article) -> Result<Article, CoreError> {
        let mut map = lock(&self.inner, "create article")?;
        map.insert(article.id.clone(), article.clone());
        Ok(article)
    }

    async fn get_by_id(&self, id: &str) -> Result<Article, CoreError> {
        let map = lock(&self.inner, "get article by id")?;
        map.get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(EntityKind::Article, "id", id))
    }

    async fn get_by_title(&self, title: &str) -> Result<Article, CoreError> {
        let map = lock(&self.inner, "get article by title")?;
        map.values()
            .find(|a| a.title == title)
            .cloned()
            .ok_or_else(|| CoreError::not_found(EntityKind::Article, "title", title))
    }
}

/// Volatile journal store keyed by id. Overwrites on duplicate id.
pub struct InMemoryJournalRepo {
    inner: Mutex<HashMap<String, Journal>>,
}

impl InMemoryJournalRepo {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(lock(&self.inner, "count journals")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryJournalRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JournalRepository for InMemoryJournalRepo {
    async fn create(&self, journal: Journal) -> Result<Journal, CoreError> {
        let mut map = lock(&self.inner, "create journal")?;
        map.insert(journal.id.clone(), journal.clone());
        Ok(journal)
    }

    async fn get_by_id(&self, id: &str) -> Result<Journal, CoreError> {
        let map = lock(&self.inner, "get journal by id")?;
        map.get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(EntityKind::Journal, "id", id))
    }
}
