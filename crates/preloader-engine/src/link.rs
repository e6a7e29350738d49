//! Link click classification for navigation-intercept.

/// A clicked anchor, as seen by the click handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    /// Raw `href` attribute, if present.
    pub href: Option<String>,
    /// Whether the anchor carries the preload marker.
    pub preload: bool,
}

impl Link {
    /// A preload-marked link to `href`.
    pub fn preload(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            preload: true,
        }
    }

    /// An ordinary link to `href`.
    pub fn plain(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            preload: false,
        }
    }
}

/// What the click handler decides to do with a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Leave the click to the default behavior.
    PassThrough,
    /// Suppress default navigation and play the preloader before going to the target.
    Intercept(String),
}

/// What the host should do with the native click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Let the default action run.
    Default,
    /// Call `preventDefault`; the controller owns the navigation.
    PreventDefault,
}

/// Decide whether a click on `link` is intercepted.
///
/// Only marked links with a non-empty target that is not a same-page
/// fragment are intercepted.
pub fn classify(link: &Link) -> ClickAction {
    if !link.preload {
        return ClickAction::PassThrough;
    }
    match link.href.as_deref() {
        Some(href) if !href.is_empty() && !href.starts_with('#') => {
            ClickAction::Intercept(href.to_string())
        }
        _ => ClickAction::PassThrough,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_link_is_intercepted() {
        assert_eq!(
            classify(&Link::preload("/projects")),
            ClickAction::Intercept("/projects".to_string())
        );
    }

    #[test]
    fn test_fragment_passes_through() {
        assert_eq!(classify(&Link::preload("#section")), ClickAction::PassThrough);
    }

    #[test]
    fn test_unmarked_passes_through() {
        assert_eq!(classify(&Link::plain("/projects")), ClickAction::PassThrough);
    }

    #[test]
    fn test_missing_or_empty_href_passes_through() {
        let missing = Link {
            href: None,
            preload: true,
        };
        assert_eq!(classify(&missing), ClickAction::PassThrough);
        assert_eq!(classify(&Link::preload("")), ClickAction::PassThrough);
    }
}
