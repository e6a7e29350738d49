//! Pages of the demo site shown behind the preloader.

use serde::{Deserialize, Serialize};

/// One page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Address links use to reach this page, e.g. `/work`.
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

/// A titled block of text; `id` is the fragment that scrolls to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub heading: String,
    #[serde(default)]
    pub body: String,
}

/// An anchor on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Play the preloader before following the link.
    #[serde(default)]
    pub preload: bool,
}

impl LinkConfig {
    fn new(label: &str, href: Option<&str>, preload: bool) -> Self {
        Self {
            label: label.to_string(),
            href: href.map(str::to_string),
            preload,
        }
    }
}

fn section(id: &str, heading: &str, body: &str) -> SectionConfig {
    SectionConfig {
        id: id.to_string(),
        heading: heading.to_string(),
        body: body.to_string(),
    }
}

/// The built-in three page site.
pub fn default_pages() -> Vec<PageConfig> {
    vec![
        PageConfig {
            path: "/".to_string(),
            title: "sohmhos".to_string(),
            sections: vec![
                section(
                    "intro",
                    "Welcome",
                    "A small studio site. Every page load plays the matrix preloader, \
                     and marked links play it again before navigating.",
                ),
                section(
                    "services",
                    "Services",
                    "Identity, motion, interfaces. Scroll down or follow a fragment link \
                     to jump between sections without the preloader.",
                ),
                section(
                    "contact",
                    "Contact",
                    "hello@sohmhos.example, replies within two working days.",
                ),
            ],
            links: vec![
                LinkConfig::new("Work", Some("/work"), true),
                LinkConfig::new("About", Some("/about"), true),
                LinkConfig::new("Jump to contact", Some("#contact"), true),
                LinkConfig::new("About (plain link)", Some("/about"), false),
                LinkConfig::new("Journal (coming soon)", None, true),
            ],
        },
        PageConfig {
            path: "/work".to_string(),
            title: "Work".to_string(),
            sections: vec![
                section("alpha", "Project Alpha", "Brand system for a night market."),
                section("beta", "Project Beta", "Kinetic type for a music festival."),
            ],
            links: vec![
                LinkConfig::new("Home", Some("/"), true),
                LinkConfig::new("Project Beta", Some("#beta"), true),
                LinkConfig::new("Archive", Some("/archive"), true),
            ],
        },
        PageConfig {
            path: "/about".to_string(),
            title: "About".to_string(),
            sections: vec![section(
                "team",
                "Team",
                "Three designers and a developer who likes timers.",
            )],
            links: vec![
                LinkConfig::new("Home", Some("/"), true),
                LinkConfig::new("Work", Some("/work"), true),
            ],
        },
    ]
}
