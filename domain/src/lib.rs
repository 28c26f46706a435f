//! Domain library for the Article and Journal catalogue services.
//!
//! This crate holds the entity records, their validation rules, the
//! repository ports (traits) and the error taxonomy shared by every adapter.
//! Keep IO concerns out of this crate; the only stores living here are the
//! volatile in-memory ones under [`adapters`].

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boxed cause carried by [`CoreError::PersistenceFailure`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A published article.
///
/// `journal_id` is an opaque reference to a [`Journal`]; it is stored as-is
/// and never checked against the journal catalogue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub author_id: String,
    pub journal_id: String,
    /// Assigned by persistent backends on create; `None` in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author_id: impl Into<String>,
        journal_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: None,
            author_id: author_id.into(),
            journal_id: journal_id.into(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    /// Check the required fields. See [`validate::validate_article`].
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::validate_article(self)
    }
}

/// A scientific journal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub impact_factor: f64,
}

impl Journal {
    pub fn new(id: impl Into<String>, name: impl Into<String>, impact_factor: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            impact_factor,
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Check the required fields. See [`validate::validate_journal`].
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::validate_journal(self)
    }
}

/// Which entity an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Article,
    Journal,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Article => "article",
            EntityKind::Journal => "journal",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository port for articles.
///
/// Every method yields the entity or an error; an absent key is always
/// [`CoreError::NotFound`]. Whether `create` overwrites an existing id is
/// adapter-defined: the in-memory store overwrites, the relational store
/// rejects it with [`CoreError::PersistenceFailure`].
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn create(&self, article: Article) -> Result<Article, CoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Article, CoreError>;
    /// Exact title match. With duplicate titles the winner is adapter-defined.
    async fn get_by_title(&self, title: &str) -> Result<Article, CoreError>;
}

/// Repository port for journals. Same conventions as [`ArticleRepository`].
#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn create(&self, journal: Journal) -> Result<Journal, CoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Journal, CoreError>;
}

/// Core domain errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No record matches the lookup key.
    #[error("{entity} with {field} '{value}' not found")]
    NotFound {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },
    /// Validation rejected the entity before it reached storage.
    #[error("invalid {entity}: {field} {reason}")]
    InvalidEntity {
        entity: EntityKind,
        field: &'static str,
        reason: &'static str,
    },
    /// The storage adapter failed; `operation` names what was attempted.
    #[error("persistence failure during {operation}: {source}")]
    PersistenceFailure {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl CoreError {
    pub fn not_found(entity: EntityKind, field: &'static str, value: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn invalid(entity: EntityKind, field: &'static str, reason: &'static str) -> Self {
        CoreError::InvalidEntity {
            entity,
            field,
            reason,
        }
    }

    pub fn persistence(operation: &'static str, source: impl Into<BoxError>) -> Self {
        CoreError::PersistenceFailure {
            operation,
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CoreError::InvalidEntity { .. })
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, CoreError::PersistenceFailure { .. })
    }
}

/// Return a short about/version line for the binaries to print.
pub fn about() -> String {
    let pkg = env!("CARGO_PKG_NAME");
    let ver = env!("CARGO_PKG_VERSION");
    format!("{} v{} (article/journal catalogue)", pkg, ver)
}

pub mod adapters;
pub mod service;
pub mod validate;
