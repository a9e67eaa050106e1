//! Badge components for tags, reply counts and ratings.

use maud::{html, Markup, Render};

/// A single tag badge.
#[derive(Debug, Clone, Copy)]
pub struct TagBadge<'a> {
    pub tag: &'a str,
}

impl<'a> TagBadge<'a> {
    #[must_use]
    pub const fn new(tag: &'a str) -> Self {
        Self { tag }
    }
}

impl Render for TagBadge<'_> {
    fn render(&self) -> Markup {
        html! {
            span class="mx-1 fs-6 badge bg-secondary tag-badge" { (self.tag) }
        }
    }
}

/// The "Tags:" line appended below a description.
///
/// A missing tag set renders nothing; an empty one still renders the label,
/// matching what the site shows for items whose tags loaded but are empty.
#[derive(Debug, Clone, Copy)]
pub struct TagList<'a> {
    pub tags: Option<&'a [String]>,
}

impl<'a> TagList<'a> {
    #[must_use]
    pub const fn new(tags: Option<&'a [String]>) -> Self {
        Self { tags }
    }
}

impl Render for TagList<'_> {
    fn render(&self) -> Markup {
        let Some(tags) = self.tags else {
            return html! {};
        };

        html! {
            br;
            br;
            "Tags: "
            @for tag in tags {
                (TagBadge::new(tag))
            }
        }
    }
}

/// A numeric count badge (reply counts).
#[derive(Debug, Clone, Copy)]
pub struct CountBadge {
    pub count: i64,
}

impl CountBadge {
    #[must_use]
    pub const fn new(count: i64) -> Self {
        Self { count }
    }
}

impl Render for CountBadge {
    fn render(&self) -> Markup {
        html! {
            span class="badge bg-secondary ms-1 count-badge" { (self.count) }
        }
    }
}

/// Upvote count shown beside the like control. Hidden until positive.
#[derive(Debug, Clone, Copy)]
pub struct RatingBadge {
    pub rating: i64,
}

impl RatingBadge {
    #[must_use]
    pub const fn new(rating: i64) -> Self {
        Self { rating }
    }
}

impl Render for RatingBadge {
    fn render(&self) -> Markup {
        if self.rating <= 0 {
            return html! {};
        }
        html! {
            span class="badge bg-primary ms-1 rating-badge" { (self.rating) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_badge_escapes() {
        let html = TagBadge::new("<b>rust</b>").render().into_string();
        assert!(html.contains("badge bg-secondary"));
        assert!(html.contains("&lt;b&gt;rust&lt;/b&gt;"));
    }

    #[test]
    fn test_tag_list() {
        let tags = vec!["rust".to_string(), "async".to_string()];
        let html = TagList::new(Some(&tags)).render().into_string();
        assert!(html.starts_with("<br><br>Tags: "));
        assert_eq!(html.matches("tag-badge").count(), 2);

        let empty: Vec<String> = vec![];
        assert_eq!(TagList::new(Some(&empty)).render().into_string(), "<br><br>Tags: ");
        assert_eq!(TagList::new(None).render().into_string(), "");
    }

    #[test]
    fn test_rating_badge_hidden_until_positive() {
        assert_eq!(RatingBadge::new(0).render().into_string(), "");
        assert_eq!(RatingBadge::new(-1).render().into_string(), "");
        assert!(RatingBadge::new(3).render().into_string().contains(">3<"));
    }

    #[test]
    fn test_count_badge() {
        assert!(CountBadge::new(0).render().into_string().contains(">0<"));
    }
}
