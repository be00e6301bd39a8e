//! Submitted form data and its validation rules.
//!
//! Validation collects every violation per field instead of stopping at the
//! first one, so callers can show all messages at once.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("compile email regex")
});

const EMAIL_MAX: usize = 254;
const COMMENT_NAME_MAX: usize = 80;
const SHARE_NAME_MAX: usize = 25;
pub const TITLE_MAX: usize = 250;
pub const TAG_NAME_MAX: usize = 100;

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX && EMAIL_REGEX.is_match(email)
}

/// Mask an address for logging to avoid PII in logs: `alice@x.com` -> `a***@x.com`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

/// Field name -> messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// `Ok(value)` when no error was recorded.
    fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

fn required_text(errors: &mut FieldErrors, field: &str, value: &str, max: Option<usize>) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if let Some(max) = max {
        let len = value.chars().count();
        if len > max {
            errors.add(
                field,
                format!("Ensure this value has at most {max} characters (it has {len})."),
            );
        }
    }
    value.to_string()
}

fn required_email(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if !is_valid_email(value) {
        errors.add(field, "Enter a valid email address.");
    }
    value.to_string()
}

/// Comment form as submitted by a visitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl CommentForm {
    /// Validate and return the cleaned (trimmed) form.
    pub fn clean(&self) -> Result<CommentForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", &self.name, Some(COMMENT_NAME_MAX));
        let email = required_email(&mut errors, "email", &self.email);
        let body = required_text(&mut errors, "body", &self.body, None);
        errors.finish(CommentForm { name, email, body })
    }
}

/// "Recommend this post by e-mail" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharePostForm {
    pub name: String,
    pub email: String,
    pub to: String,
    #[serde(default)]
    pub comments: Option<String>,
}

impl SharePostForm {
    pub fn clean(&self) -> Result<SharePostForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", &self.name, Some(SHARE_NAME_MAX));
        let email = required_email(&mut errors, "email", &self.email);
        let to = required_email(&mut errors, "to", &self.to);
        let comments = self
            .comments
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        errors.finish(SharePostForm {
            name,
            email,
            to,
            comments,
        })
    }
}

/// Data for authoring a new post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: Option<crate::domain::PostStatus>,
    #[serde(default)]
    pub publish: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn clean(&self) -> Result<NewPost, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = required_text(&mut errors, "title", &self.title, Some(TITLE_MAX));
        let body = required_text(&mut errors, "body", &self.body, None);
        if !title.is_empty() && crate::domain::slugify(&title).is_empty() {
            errors.add("title", "Title must contain at least one letter or digit.");
        }
        let mut tags = Vec::new();
        for name in self.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            let slug = crate::domain::slugify(name);
            if slug.is_empty() {
                errors.add("tags", format!("Tag \"{name}\" must contain at least one letter or digit."));
            } else if name.chars().count() > TAG_NAME_MAX || slug.chars().count() > TAG_NAME_MAX {
                errors.add(
                    "tags",
                    format!("Ensure each tag has at most {TAG_NAME_MAX} characters."),
                );
            } else {
                tags.push(name.to_string());
            }
        }
        errors.finish(NewPost {
            title,
            body,
            status: self.status,
            publish: self.publish,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("nada_neutho"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@x.com"), "a***@x.com");
        assert_eq!(mask_email("a@x.com"), "***@x.com");
        assert_eq!(mask_email("garbage"), "***");
    }

    #[test]
    fn test_comment_form_trims_and_accepts() {
        let form = CommentForm {
            name: "  A ".to_string(),
            email: "a@x.com".to_string(),
            body: "hi".to_string(),
        };
        let cleaned = form.clean().unwrap();
        assert_eq!(cleaned.name, "A");
    }

    #[test]
    fn test_comment_form_collects_all_errors() {
        let form = CommentForm {
            name: "".to_string(),
            email: "not-an-email".to_string(),
            body: "   ".to_string(),
        };
        let errors = form.clean().unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("email"));
        assert!(errors.contains("body"));
        assert_eq!(
            errors.get("email").unwrap(),
            &["Enter a valid email address.".to_string()]
        );
    }

    #[test]
    fn test_comment_name_length_bound() {
        let form = CommentForm {
            name: "x".repeat(81),
            email: "a@x.com".to_string(),
            body: "hi".to_string(),
        };
        let errors = form.clean().unwrap_err();
        assert!(errors.contains("name"));
        assert!(!errors.contains("body"));
    }

    fn post_with_tags(tags: &[&str]) -> NewPost {
        NewPost {
            title: "Tagged".to_string(),
            body: "x".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..NewPost::default()
        }
    }

    #[test]
    fn test_new_post_tags_trimmed_and_blank_dropped() {
        let cleaned = post_with_tags(&[" Rust ", "  ", "web"]).clean().unwrap();
        assert_eq!(cleaned.tags, vec!["Rust".to_string(), "web".to_string()]);
    }

    #[test]
    fn test_new_post_rejects_tag_without_slug() {
        let errors = post_with_tags(&["rust", "!!!"]).clean().unwrap_err();
        assert!(errors.contains("tags"));
        assert!(!errors.contains("title"));
    }

    #[test]
    fn test_new_post_rejects_overlong_tag() {
        let long = "t".repeat(TAG_NAME_MAX + 1);
        let errors = post_with_tags(&[long.as_str()]).clean().unwrap_err();
        assert_eq!(
            errors.get("tags").unwrap(),
            &[format!("Ensure each tag has at most {TAG_NAME_MAX} characters.")]
        );

        let fits = "t".repeat(TAG_NAME_MAX);
        assert!(post_with_tags(&[fits.as_str()]).clean().is_ok());
    }

    #[test]
    fn test_share_form_comments_optional() {
        let form = SharePostForm {
            name: "C".to_string(),
            email: "c@x.com".to_string(),
            to: "b@x.com".to_string(),
            comments: Some("   ".to_string()),
        };
        let cleaned = form.clean().unwrap();
        assert_eq!(cleaned.comments, None);
    }

    #[test]
    fn test_share_form_rejects_bad_recipient() {
        let form = SharePostForm {
            name: "C".to_string(),
            email: "c@x.com".to_string(),
            to: "b-at-x.com".to_string(),
            comments: None,
        };
        let errors = form.clean().unwrap_err();
        assert!(errors.contains("to"));
        assert_eq!(errors.to_string(), "to: Enter a valid email address.");
    }
}
