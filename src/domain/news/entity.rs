//! News item entity: status state machine, visibility, and access control

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::UserId;

/// Errors raised by news item validation and state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NewsValidationError {
    #[error("News source cannot be empty")]
    EmptySource,

    #[error("News title cannot be empty")]
    EmptyTitle,

    #[error("News summary cannot be empty")]
    EmptySummary,

    #[error("News link cannot be empty")]
    EmptyLink,

    #[error("User ID cannot be empty")]
    EmptyUserId,

    #[error("Personal note cannot be empty")]
    EmptyNote,

    #[error("Invalid news status: {0}")]
    UnknownStatus(String),

    #[error("Invalid news category: {0}")]
    UnknownCategory(String),

    #[error("Cannot mark a read item as reading")]
    ReadToReading,
}

/// News item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsId(String);

impl NewsId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NewsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reading status of a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    #[default]
    Pending,
    Reading,
    Read,
}

impl NewsStatus {
    /// Lowercase wire/storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reading => "reading",
            Self::Read => "read",
        }
    }

    /// Parse the wire/storage form; unknown strings are errors, never defaults
    pub fn parse(s: &str) -> Result<Self, NewsValidationError> {
        match s {
            "pending" => Ok(Self::Pending),
            "reading" => Ok(Self::Reading),
            "read" => Ok(Self::Read),
            other => Err(NewsValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Category of a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    #[default]
    General,
    Research,
    Product,
    Company,
    Tutorial,
    Opinion,
}

impl NewsCategory {
    /// Lowercase wire/storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Research => "research",
            Self::Product => "product",
            Self::Company => "company",
            Self::Tutorial => "tutorial",
            Self::Opinion => "opinion",
        }
    }

    /// Parse the wire/storage form; unknown strings are errors, never defaults
    pub fn parse(s: &str) -> Result<Self, NewsValidationError> {
        match s {
            "general" => Ok(Self::General),
            "research" => Ok(Self::Research),
            "product" => Ok(Self::Product),
            "company" => Ok(Self::Company),
            "tutorial" => Ok(Self::Tutorial),
            "opinion" => Ok(Self::Opinion),
            other => Err(NewsValidationError::UnknownCategory(other.to_string())),
        }
    }
}

/// A tracked news item owned by a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    id: NewsId,
    source: String,
    title: String,
    summary: String,
    /// Dedupe key together with user_id
    link: String,
    /// Optional; empty string when absent
    image_url: String,
    category: NewsCategory,
    /// Owner; the sole actor permitted to mutate the item
    user_id: UserId,
    is_public: bool,
    status: NewsStatus,
    is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    personal_note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fields required to construct a new item; optional fields take defaults
#[derive(Debug, Clone)]
pub struct NewNewsItem {
    pub source: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub image_url: Option<String>,
    pub category: NewsCategory,
    pub user_id: UserId,
    pub is_public: Option<bool>,
}

impl NewsItem {
    /// Create a new news item, validating all required fields
    ///
    /// Defaults: status=pending, is_favorite=false, is_public=true.
    pub fn new(id: NewsId, fields: NewNewsItem) -> Result<Self, NewsValidationError> {
        if fields.source.trim().is_empty() {
            return Err(NewsValidationError::EmptySource);
        }
        if fields.title.trim().is_empty() {
            return Err(NewsValidationError::EmptyTitle);
        }
        if fields.summary.trim().is_empty() {
            return Err(NewsValidationError::EmptySummary);
        }
        if fields.link.trim().is_empty() {
            return Err(NewsValidationError::EmptyLink);
        }
        if fields.user_id.as_str().trim().is_empty() {
            return Err(NewsValidationError::EmptyUserId);
        }

        let now = Utc::now();

        Ok(Self {
            id,
            source: fields.source,
            title: fields.title,
            summary: fields.summary,
            link: fields.link,
            image_url: fields.image_url.unwrap_or_default(),
            category: fields.category,
            user_id: fields.user_id,
            is_public: fields.is_public.unwrap_or(true),
            status: NewsStatus::Pending,
            is_favorite: false,
            personal_note: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct an item from persisted state without re-stamping timestamps
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: NewsId,
        source: String,
        title: String,
        summary: String,
        link: String,
        image_url: String,
        category: NewsCategory,
        user_id: UserId,
        is_public: bool,
        status: NewsStatus,
        is_favorite: bool,
        personal_note: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source,
            title,
            summary,
            link,
            image_url,
            category,
            user_id,
            is_public,
            status,
            is_favorite,
            personal_note,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &NewsId {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn category(&self) -> NewsCategory {
        self.category
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn status(&self) -> NewsStatus {
        self.status
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn personal_note(&self) -> Option<&str> {
        self.personal_note.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Status transitions

    /// Move to Reading; fails if the item is already Read
    pub fn mark_as_reading(&mut self) -> Result<(), NewsValidationError> {
        if self.status == NewsStatus::Read {
            return Err(NewsValidationError::ReadToReading);
        }

        self.status = NewsStatus::Reading;
        self.touch();
        Ok(())
    }

    /// Move to Read, from any state
    pub fn mark_as_read(&mut self) {
        self.status = NewsStatus::Read;
        self.touch();
    }

    /// Reset to Pending, from any state
    pub fn mark_as_pending(&mut self) {
        self.status = NewsStatus::Pending;
        self.touch();
    }

    /// Unconditional status overwrite; the escape hatch that also permits
    /// Read -> Reading, unlike `mark_as_reading`
    pub fn update_status(&mut self, status: NewsStatus) {
        self.status = status;
        self.touch();
    }

    // Other mutators

    /// Flip the favorite flag; self-inverse
    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
        self.touch();
    }

    /// Overwrite the visibility flag
    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
        self.touch();
    }

    /// Overwrite the category
    pub fn update_category(&mut self, category: NewsCategory) {
        self.category = category;
        self.touch();
    }

    /// Set the personal note; fails on blank content
    pub fn update_personal_note(&mut self, note: &str) -> Result<(), NewsValidationError> {
        if note.trim().is_empty() {
            return Err(NewsValidationError::EmptyNote);
        }

        self.personal_note = Some(note.to_string());
        self.touch();
        Ok(())
    }

    /// Remove the personal note
    pub fn clear_personal_note(&mut self) {
        self.personal_note = None;
        self.touch();
    }

    /// Access predicate: public items are readable by anyone, private items
    /// only by their owner
    pub fn can_be_accessed_by(&self, user_id: &UserId) -> bool {
        self.is_public || &self.user_id == user_id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_fields() -> NewNewsItem {
        NewNewsItem {
            source: "TechCrunch".to_string(),
            title: "AI Breakthrough".to_string(),
            summary: "New AI technology announced".to_string(),
            link: "https://example.com/news".to_string(),
            image_url: Some("https://example.com/image.jpg".to_string()),
            category: NewsCategory::Research,
            user_id: UserId::new("user123"),
            is_public: Some(true),
        }
    }

    fn create_item() -> NewsItem {
        NewsItem::new(NewsId::new("news-1"), new_fields()).unwrap()
    }

    #[test]
    fn test_creation_with_valid_data() {
        let item = create_item();

        assert_eq!(item.source(), "TechCrunch");
        assert_eq!(item.title(), "AI Breakthrough");
        assert_eq!(item.summary(), "New AI technology announced");
        assert_eq!(item.link(), "https://example.com/news");
        assert_eq!(item.category(), NewsCategory::Research);
        assert_eq!(item.user_id().as_str(), "user123");
        assert_eq!(item.status(), NewsStatus::Pending);
        assert!(!item.is_favorite());
        assert!(item.personal_note().is_none());
    }

    #[test]
    fn test_creation_defaults() {
        let mut fields = new_fields();
        fields.image_url = None;
        fields.is_public = None;

        let item = NewsItem::new(NewsId::new("news-1"), fields).unwrap();

        assert_eq!(item.image_url(), "");
        assert!(item.is_public());
        assert_eq!(item.status(), NewsStatus::Pending);
        assert!(!item.is_favorite());
    }

    #[test]
    fn test_creation_rejects_blank_fields() {
        for blank in ["", "   "] {
            let mut fields = new_fields();
            fields.source = blank.to_string();
            assert_eq!(
                NewsItem::new(NewsId::new("n"), fields),
                Err(NewsValidationError::EmptySource)
            );

            let mut fields = new_fields();
            fields.title = blank.to_string();
            assert_eq!(
                NewsItem::new(NewsId::new("n"), fields),
                Err(NewsValidationError::EmptyTitle)
            );

            let mut fields = new_fields();
            fields.summary = blank.to_string();
            assert_eq!(
                NewsItem::new(NewsId::new("n"), fields),
                Err(NewsValidationError::EmptySummary)
            );

            let mut fields = new_fields();
            fields.link = blank.to_string();
            assert_eq!(
                NewsItem::new(NewsId::new("n"), fields),
                Err(NewsValidationError::EmptyLink)
            );

            let mut fields = new_fields();
            fields.user_id = UserId::new(blank);
            assert_eq!(
                NewsItem::new(NewsId::new("n"), fields),
                Err(NewsValidationError::EmptyUserId)
            );
        }
    }

    #[test]
    fn test_creation_keeps_unicode() {
        let mut fields = new_fields();
        fields.source = "TëchCrünch".to_string();
        fields.user_id = UserId::new("üsër123");

        let item = NewsItem::new(NewsId::new("n"), fields).unwrap();
        assert_eq!(item.source(), "TëchCrünch");
        assert_eq!(item.user_id().as_str(), "üsër123");
    }

    #[test]
    fn test_mark_as_reading_from_pending() {
        let mut item = create_item();

        item.mark_as_reading().unwrap();
        assert_eq!(item.status(), NewsStatus::Reading);

        // Reading -> Reading is allowed
        item.mark_as_reading().unwrap();
        assert_eq!(item.status(), NewsStatus::Reading);
    }

    #[test]
    fn test_mark_as_reading_fails_when_read() {
        let mut item = create_item();
        item.mark_as_read();

        assert_eq!(
            item.mark_as_reading(),
            Err(NewsValidationError::ReadToReading)
        );
        assert_eq!(item.status(), NewsStatus::Read);
    }

    #[test]
    fn test_mark_as_read_from_any_state() {
        let mut item = create_item();
        item.mark_as_read();
        assert_eq!(item.status(), NewsStatus::Read);
    }

    #[test]
    fn test_mark_as_pending_resets_from_any_state() {
        let mut item = create_item();
        item.mark_as_read();

        item.mark_as_pending();
        assert_eq!(item.status(), NewsStatus::Pending);
    }

    #[test]
    fn test_update_status_bypasses_reading_restriction() {
        let mut item = create_item();
        item.mark_as_read();

        item.update_status(NewsStatus::Reading);
        assert_eq!(item.status(), NewsStatus::Reading);
    }

    #[test]
    fn test_toggle_favorite_is_self_inverse() {
        let mut item = create_item();
        assert!(!item.is_favorite());

        item.toggle_favorite();
        assert!(item.is_favorite());

        item.toggle_favorite();
        assert!(!item.is_favorite());
    }

    #[test]
    fn test_set_public() {
        let mut item = create_item();

        item.set_public(false);
        assert!(!item.is_public());

        item.set_public(true);
        assert!(item.is_public());
    }

    #[test]
    fn test_update_category() {
        let mut item = create_item();

        item.update_category(NewsCategory::Product);
        assert_eq!(item.category(), NewsCategory::Product);
    }

    #[test]
    fn test_personal_note_update_and_clear() {
        let mut item = create_item();

        item.update_personal_note("worth a re-read").unwrap();
        assert_eq!(item.personal_note(), Some("worth a re-read"));

        item.clear_personal_note();
        assert!(item.personal_note().is_none());
    }

    #[test]
    fn test_personal_note_rejects_blank() {
        let mut item = create_item();

        assert_eq!(
            item.update_personal_note("   "),
            Err(NewsValidationError::EmptyNote)
        );
        assert!(item.personal_note().is_none());
    }

    #[test]
    fn test_can_be_accessed_by_owner() {
        let mut item = create_item();
        item.set_public(false);

        assert!(item.can_be_accessed_by(&UserId::new("user123")));
    }

    #[test]
    fn test_can_be_accessed_by_others_iff_public() {
        let mut item = create_item();
        let other = UserId::new("different_user");

        item.set_public(true);
        assert!(item.can_be_accessed_by(&other));

        item.set_public(false);
        assert!(!item.can_be_accessed_by(&other));
    }

    #[test]
    fn test_mutators_stamp_updated_at() {
        let mut item = create_item();
        let original = item.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));
        item.toggle_favorite();
        assert!(item.updated_at() > original);
    }

    #[test]
    fn test_business_methods_leave_other_fields_alone() {
        let mut item = create_item();
        let source = item.source().to_string();
        let title = item.title().to_string();
        let summary = item.summary().to_string();
        let link = item.link().to_string();
        let user_id = item.user_id().clone();
        let created_at = item.created_at();

        item.mark_as_reading().unwrap();
        item.toggle_favorite();
        item.set_public(false);
        item.update_category(NewsCategory::Product);

        assert_eq!(item.source(), source);
        assert_eq!(item.title(), title);
        assert_eq!(item.summary(), summary);
        assert_eq!(item.link(), link);
        assert_eq!(item.user_id(), &user_id);
        assert_eq!(item.created_at(), created_at);
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [NewsStatus::Pending, NewsStatus::Reading, NewsStatus::Read] {
            assert_eq!(NewsStatus::parse(status.as_str()).unwrap(), status);
        }

        assert_eq!(
            NewsStatus::parse("archived"),
            Err(NewsValidationError::UnknownStatus("archived".to_string()))
        );
    }

    #[test]
    fn test_category_string_round_trip() {
        for category in [
            NewsCategory::General,
            NewsCategory::Research,
            NewsCategory::Product,
            NewsCategory::Company,
            NewsCategory::Tutorial,
            NewsCategory::Opinion,
        ] {
            assert_eq!(NewsCategory::parse(category.as_str()).unwrap(), category);
        }

        assert_eq!(
            NewsCategory::parse("sports"),
            Err(NewsValidationError::UnknownCategory("sports".to_string()))
        );
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&NewsStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<NewsStatus>("\"read\"").unwrap(),
            NewsStatus::Read
        );
        assert!(serde_json::from_str::<NewsStatus>("\"bogus\"").is_err());
    }
}
