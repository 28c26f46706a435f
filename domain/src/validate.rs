//! Entity validation. Pure and deterministic; runs once on the create path.

use crate::{Article, CoreError, EntityKind, Journal};

fn require(entity: EntityKind, field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(entity, field, "cannot be empty"));
    }
    Ok(())
}

/// Reject an article whose id, title, author or journal reference is blank.
pub fn validate_article(article: &Article) -> Result<(), CoreError> {
    let kind = EntityKind::Article;
    require(kind, "id", &article.id)?;
    require(kind, "title", &article.title)?;
    require(kind, "author_id", &article.author_id)?;
    require(kind, "journal_id", &article.journal_id)?;
    Ok(())
}

/// Reject a journal with a blank id or name, or a negative (or NaN) impact factor.
pub fn validate_journal(journal: &Journal) -> Result<(), CoreError> {
    let kind = EntityKind::Journal;
    require(kind, "id", &journal.id)?;
    require(kind, "name", &journal.name)?;
    if journal.impact_factor.is_nan() || journal.impact_factor < 0.0 {
        return Err(CoreError::invalid(kind, "impact_factor", "cannot be negative"));
    }
    Ok(())
}
