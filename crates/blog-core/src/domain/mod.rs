//! Domain entities - the core business objects.

mod comment;
mod post;
mod tag;
mod user;

pub use comment::Comment;
pub use post::{Post, PostStatus};
pub use tag::Tag;
pub use user::User;

/// Convert a title string to a slug for identifying a post or tag.
///
/// E.g. `slugify("Doctests are the Bee's Knees") == "doctests-are-the-bees-knees"`
pub fn slugify(string: &str) -> String {
    const QUOTE_CHARS: &[char] = &['\'', '"'];

    string
        .split(|c: char| !(QUOTE_CHARS.contains(&c) || c.is_alphanumeric()))
        .filter(|s| !s.is_empty())
        .map(|s| s.replace(QUOTE_CHARS, "").to_lowercase())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn test_slugify() {
        assert_eq!(
            slugify("Segfaults and You: When Raw Pointers Go Wrong"),
            "segfaults-and-you-when-raw-pointers-go-wrong"
        );
        assert_eq!(
            slugify("Converting to Rust from C: It's as Easy as 1, 2, 3!"),
            "converting-to-rust-from-c-its-as-easy-as-1-2-3"
        );
        assert_eq!(slugify("  --Who's there?-- "), "whos-there");
        assert_eq!(slugify("!!!"), "");
    }
}
