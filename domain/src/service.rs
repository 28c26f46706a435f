use tracing::{debug, warn};

use crate::{Article, ArticleRepository, CoreError, Journal, JournalRepository};

/// Application service for articles.
///
/// Validates on create and otherwise hands every call to the repository it
/// owns. Errors from the repository are returned unchanged.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and store a new article.
    pub async fn create_article(&self, article: Article) -> Result<Article, CoreError> {
        if let Err(e) = article.validate() {
            warn!(article_id = %article.id, error = %e, "rejected article");
            return Err(e);
        }
        debug!(article_id = %article.id, "creating article");
        self.repo.create(article).await
    }

    pub async fn get_article_by_id(&self, id: &str) -> Result<Article, CoreError> {
        debug!(article_id = %id, "get article by id");
        self.repo.get_by_id(id).await
    }

    pub async fn get_article_by_title(&self, title: &str) -> Result<Article, CoreError> {
        debug!(%title, "get article by title");
        self.repo.get_by_title(title).await
    }

    /// Borrow the underlying repository (e.g. to close a pool on shutdown).
    pub fn repository(&self) -> &R {
        &self.repo
    }
}

/// Application service for journals. Same contract as [`ArticleService`].
pub struct JournalService<R: JournalRepository> {
    repo: R,
}

impl<R: JournalRepository> JournalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and store a new journal.
    pub async fn create_journal(&self, journal: Journal) -> Result<Journal, CoreError> {
        if let Err(e) = journal.validate() {
            warn!(journal_id = %journal.id, error = %e, "rejected journal");
            return Err(e);
        }
        debug!(journal_id = %journal.id, "creating journal");
        self.repo.create(journal).await
    }

    pub async fn get_journal(&self, id: &str) -> Result<Journal, CoreError> {
        debug!(journal_id = %id, "get journal");
        self.repo.get_by_id(id).await
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_repo::{InMemoryArticleRepo, InMemoryJournalRepo};
    use async_trait::async_trait;

    const TITLE: &str = "Advanced Machine Learning Techniques";

    fn sample_article() -> Article {
        Article::new("1", TITLE, "author_1", "journal_1").with_abstract(
            "This paper explores cutting-edge machine learning algorithms and their applications in modern data science.",
        )
    }

    /// Repository that must never be reached.
    struct UnreachableRepo;

    #[async_trait]
    impl JournalRepository for UnreachableRepo {
        async fn create(&self, _journal: Journal) -> Result<Journal, CoreError> {
            panic!("repository touched on the create path");
        }
        async fn get_by_id(&self, _id: &str) -> Result<Journal, CoreError> {
            panic!("repository touched on the read path");
        }
    }

    #[async_trait]
    impl ArticleRepository for UnreachableRepo {
        async fn create(&self, _article: Article) -> Result<Article, CoreError> {
            panic!("repository touched on the create path");
        }
        async fn get_by_id(&self, _id: &str) -> Result<Article, CoreError> {
            panic!("repository touched on the read path");
        }
        async fn get_by_title(&self, _title: &str) -> Result<Article, CoreError> {
            panic!("repository touched on the read path");
        }
    }

    /// Repository that always fails, to check errors pass through untouched.
    struct BrokenRepo;

    #[async_trait]
    impl JournalRepository for BrokenRepo {
        async fn create(&self, _journal: Journal) -> Result<Journal, CoreError> {
            Err(CoreError::persistence("create journal", "disk full"))
        }
        async fn get_by_id(&self, _id: &str) -> Result<Journal, CoreError> {
            Err(CoreError::persistence("get journal by id", "connection refused"))
        }
    }

    #[tokio::test]
    async fn article_round_trip_by_id_and_title() {
        let svc = ArticleService::new(InMemoryArticleRepo::new());
        let created = svc.create_article(sample_article()).await.unwrap();
        assert_eq!(created, sample_article());

        let by_id = svc.get_article_by_id("1").await.unwrap();
        assert_eq!(by_id, sample_article());

        let by_title = svc.get_article_by_title(TITLE).await.unwrap();
        assert_eq!(by_title, sample_article());
    }

    #[tokio::test]
    async fn article_lookups_on_absent_keys_are_not_found() {
        let svc = ArticleService::new(InMemoryArticleRepo::new());
        assert!(svc.get_article_by_id("nope").await.unwrap_err().is_not_found());
        assert!(svc
            .get_article_by_title("Unknown Title")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn invalid_article_never_reaches_repository() {
        let svc = ArticleService::new(UnreachableRepo);
        let mut article = sample_article();
        article.author_id = " ".into();
        let err = svc.create_article(article).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidEntity {
                field: "author_id",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn negative_impact_factor_never_reaches_repository() {
        let svc = JournalService::new(UnreachableRepo);
        let err = svc
            .create_journal(Journal::new("journal_1", "Nature", -1.0))
            .await
            .unwrap_err();
        assert!(err.is_invalid());
    }

    #[tokio::test]
    async fn journal_round_trip() {
        let svc = JournalService::new(InMemoryJournalRepo::new());
        let journal =
            Journal::new("journal_1", "Nature", 64.8).with_description("Leading scientific journal");
        svc.create_journal(journal.clone()).await.unwrap();
        assert_eq!(svc.get_journal("journal_1").await.unwrap(), journal);
        assert!(svc.get_journal("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn repository_errors_pass_through_unchanged() {
        let svc = JournalService::new(BrokenRepo);
        let err = svc
            .create_journal(Journal::new("j", "Nature", 1.0))
            .await
            .unwrap_err();
        match err {
            CoreError::PersistenceFailure { operation, source } => {
                assert_eq!(operation, "create journal");
                assert_eq!(source.to_string(), "disk full");
            }
            other => panic!("expected PersistenceFailure, got {other:?}"),
        }
        let err = svc.get_journal("j").await.unwrap_err();
        assert!(err.is_persistence());
    }
}
