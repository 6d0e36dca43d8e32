//! Form input validation for posts and categories.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::DomainError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_TAGS_LEN: usize = 500;
pub const MAX_CATEGORY_NAME_LEN: usize = 100;
pub const MAX_THUMBNAIL_LEN: usize = 255;
pub const MAX_VIDEO_URL_LEN: usize = 200;

const REQUIRED: &str = "This field is required.";

/// Raw post form input, as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub video_url: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub tags: Option<String>,
    pub thumbnail: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
}

/// Post form input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub video_url: String,
    pub description: String,
    pub category_id: i64,
    pub tags: String,
    pub thumbnail: Option<String>,
    pub published_date: DateTime<Utc>,
}

/// Collects `field: message` errors.
#[derive(Default)]
struct FieldErrors(Vec<String>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: impl AsRef<str>) {
        self.0.push(format!("{field}: {}", message.as_ref()));
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, DomainError> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(DomainError::InvalidInput(self.0))
        }
    }
}

fn check_http_url(raw: &str) -> Result<(), &'static str> {
    let parsed = Url::parse(raw).map_err(|_| "Enter a valid URL.")?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err("Enter a valid URL.");
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PostForm {
    /// Validate every field, reporting all problems at once.
    pub fn validate(self) -> Result<PostDraft, DomainError> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.add("title", REQUIRED);
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                "title",
                format!("Ensure this value has at most {MAX_TITLE_LEN} characters."),
            );
        }

        let video_url = self.video_url.trim().to_string();
        if video_url.is_empty() {
            errors.add("video_url", REQUIRED);
        } else if video_url.len() > MAX_VIDEO_URL_LEN {
            errors.add(
                "video_url",
                format!("Ensure this value has at most {MAX_VIDEO_URL_LEN} characters."),
            );
        } else if let Err(message) = check_http_url(&video_url) {
            errors.add("video_url", message);
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            errors.add("description", REQUIRED);
        }

        if self.category_id.is_none() {
            errors.add("category", REQUIRED);
        }

        let tags = self.tags.unwrap_or_default().trim().to_string();
        if tags.chars().count() > MAX_TAGS_LEN {
            errors.add(
                "tags",
                format!("Tags field is too long (max {MAX_TAGS_LEN} characters)"),
            );
        }

        let thumbnail = non_blank(self.thumbnail);
        if let Some(path) = &thumbnail
            && (path.len() > MAX_THUMBNAIL_LEN || path.contains(".."))
        {
            errors.add("thumbnail", "Enter a valid image path.");
        }

        if self.published_date.is_none() {
            errors.add("published_date", REQUIRED);
        }

        errors.finish(|| PostDraft {
            title,
            video_url,
            description,
            category_id: self.category_id.unwrap_or_default(),
            tags,
            thumbnail,
            published_date: self.published_date.unwrap_or_default(),
        })
    }
}

/// Raw category form input.
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: Option<String>,
}

/// Category form input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryForm {
    pub fn validate(self) -> Result<CategoryDraft, DomainError> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.add("name", REQUIRED);
        } else if name.chars().count() > MAX_CATEGORY_NAME_LEN {
            errors.add(
                "name",
                format!("Ensure this value has at most {MAX_CATEGORY_NAME_LEN} characters."),
            );
        }

        let description = non_blank(self.description);
        errors.finish(|| CategoryDraft { name, description })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_form() -> PostForm {
        PostForm {
            title: "Getting Started with Django".to_string(),
            video_url: "https://www.youtube.com/watch?v=rHux0gMZ3Eg".to_string(),
            description: "Models, views and templates.".to_string(),
            category_id: Some(1),
            tags: Some("django, python".to_string()),
            thumbnail: None,
            published_date: Some(Utc::now()),
        }
    }

    #[test]
    fn test_valid_form_produces_draft() {
        let draft = valid_form().validate().unwrap();
        assert_eq!(draft.category_id, 1);
        assert_eq!(draft.tags, "django, python");
    }

    #[test]
    fn test_reports_every_missing_field() {
        let err = PostForm::default().validate().unwrap_err();
        let DomainError::InvalidInput(errors) = err else {
            panic!("expected InvalidInput");
        };
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.starts_with("title:")));
        assert!(errors.iter().any(|e| e.starts_with("published_date:")));
    }

    #[test]
    fn test_title_longer_than_limit() {
        let form = PostForm {
            title: "x".repeat(MAX_TITLE_LEN + 1),
            ..valid_form()
        };
        assert!(matches!(form.validate(), Err(DomainError::InvalidInput(_))));

        let form = PostForm {
            title: "x".repeat(MAX_TITLE_LEN),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://example.com/video")]
    #[case("youtube.com/watch?v=rHux0gMZ3Eg")]
    fn test_rejects_malformed_video_url(#[case] url: &str) {
        let form = PostForm {
            video_url: url.to_string(),
            ..valid_form()
        };
        let Err(DomainError::InvalidInput(errors)) = form.validate() else {
            panic!("expected InvalidInput");
        };
        assert_eq!(errors, vec!["video_url: Enter a valid URL.".to_string()]);
    }

    #[test]
    fn test_tags_too_long() {
        let form = PostForm {
            tags: Some("a,".repeat(MAX_TAGS_LEN)),
            ..valid_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_thumbnail_path_traversal_rejected() {
        let form = PostForm {
            thumbnail: Some("../etc/passwd".to_string()),
            ..valid_form()
        };
        assert!(form.validate().is_err());

        let form = PostForm {
            thumbnail: Some("  ".to_string()),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().thumbnail, None);
    }

    #[test]
    fn test_category_name_required() {
        let err = CategoryForm::default().validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let draft = CategoryForm {
            name: " Python Basics ".to_string(),
            description: Some(String::new()),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.name, "Python Basics");
        assert_eq!(draft.description, None);
    }
}
