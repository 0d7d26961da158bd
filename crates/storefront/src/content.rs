//! Content management for the journal and merchandising data.
//!
//! This module loads content from the configured content directory at startup:
//! markdown journal posts (with YAML frontmatter) from `blog/`, and JSON files
//! for announcement banners, customer testimonials, and marketplace links.
//! Markdown is rendered to HTML once at load time.

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Metadata for journal posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub published_at: NaiveDate,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

/// A rendered journal post with metadata and HTML content
#[derive(Debug, Clone)]
pub struct Post {
    pub slug: String,
    pub meta: PostMeta,
    pub content_html: String,
    pub reading_time_minutes: u32,
}

/// A site-wide announcement banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    /// Banner text shown at the top of every page.
    pub message: String,
    /// Optional destination when the banner is clicked.
    #[serde(default)]
    pub link: Option<String>,
}

/// A customer testimonial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    /// The quoted text.
    pub quote: String,
    /// Who said it.
    pub author: String,
    /// Where they are from, if they shared it.
    #[serde(default)]
    pub location: Option<String>,
}

/// A link to a marketplace that stocks our products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceLink {
    /// Marketplace name.
    pub name: String,
    /// Storefront URL on that marketplace.
    pub url: String,
    /// Short blurb about what is stocked there.
    #[serde(default)]
    pub tagline: Option<String>,
}

/// Content store that holds all loaded content in memory
#[derive(Debug, Clone)]
pub struct ContentStore {
    posts: Arc<Vec<Post>>,
    banners: Arc<Vec<Banner>>,
    testimonials: Arc<Vec<Testimonial>>,
    marketplace_links: Arc<Vec<MarketplaceLink>>,
}

impl ContentStore {
    /// Load all content from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read or a JSON
    /// content file is malformed.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let posts = Self::load_posts(&content_dir.join("blog"))?;
        let banners = load_json_list(&content_dir.join("banners.json"))?;
        let testimonials = load_json_list(&content_dir.join("testimonials.json"))?;
        let marketplace_links = load_json_list(&content_dir.join("marketplace.json"))?;

        Ok(Self {
            posts: Arc::new(posts),
            banners: Arc::new(banners),
            testimonials: Arc::new(testimonials),
            marketplace_links: Arc::new(marketplace_links),
        })
    }

    /// Load all journal posts from the blog directory
    fn load_posts(dir: &Path) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();

        if !dir.exists() {
            tracing::info!("Blog directory does not exist yet: {:?}", dir);
            return Ok(posts);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_post(&path) {
                    Ok(post) => {
                        tracing::info!("Loaded post: {}", post.slug);
                        posts.push(post);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort posts by published date (newest first)
        posts.sort_by(|a, b| b.meta.published_at.cmp(&a.meta.published_at));

        Ok(posts)
    }

    /// Load a single journal post from a markdown file
    fn load_post(path: &Path) -> Result<Post, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        // Extract slug from filename (e.g., "2026-01-15-my-post.md" -> "my-post")
        let filename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?;

        // Remove date prefix if present (YYYY-MM-DD-)
        let slug = if filename.len() > 11 && filename.chars().nth(4) == Some('-') {
            filename[11..].to_string()
        } else {
            filename.to_string()
        };

        let matter = Matter::<YAML>::new();
        let parsed: ParsedEntity<PostMeta> = matter
            .parse(&content)
            .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
        let meta = parsed
            .data
            .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;

        let content_html = render_markdown(&parsed.content);

        // Estimate reading time (average 200 words per minute)
        let word_count = parsed.content.split_whitespace().count();
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let reading_time_minutes = ((word_count as f32) / 200.0).ceil() as u32;

        Ok(Post {
            slug,
            meta,
            content_html,
            reading_time_minutes: reading_time_minutes.max(1),
        })
    }

    /// Get a journal post by slug
    #[must_use]
    pub fn get_post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Get all published journal posts (excludes drafts)
    pub fn published_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| !p.meta.draft)
    }

    /// Get the active announcement banners
    #[must_use]
    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Get the customer testimonials
    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    /// Get the marketplace links
    #[must_use]
    pub fn marketplace_links(&self) -> &[MarketplaceLink] {
        &self.marketplace_links
    }
}

/// Load a JSON content file holding a list of items.
///
/// A missing file is treated as an empty list so a fresh checkout can boot
/// without content.
fn load_json_list<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    if !path.exists() {
        tracing::warn!("Content file does not exist: {:?}", path);
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| ContentError::Parse(format!("Failed to parse {}: {e}", path.display())))
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    // Render options
    options.render.r#unsafe = true; // Allow raw HTML in markdown

    markdown_to_html(content, &options)
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::fs;

    fn write_post(dir: &Path, name: &str, frontmatter: &str, body: &str) {
        let content = format!("---\n{frontmatter}\n---\n\n{body}\n");
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_empty_content_dir() {
        let dir = tempfile::tempdir().unwrap();

        let store = ContentStore::load(dir.path()).unwrap();

        assert_eq!(store.published_posts().count(), 0);
        assert!(store.banners().is_empty());
        assert!(store.testimonials().is_empty());
        assert!(store.marketplace_links().is_empty());
    }

    #[test]
    fn test_load_posts_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("blog");
        fs::create_dir(&blog).unwrap();
        write_post(
            &blog,
            "2026-01-10-older.md",
            "title: Older\npublished_at: 2026-01-10",
            "First post.",
        );
        write_post(
            &blog,
            "2026-03-02-newer.md",
            "title: Newer\npublished_at: 2026-03-02",
            "Second post.",
        );

        let store = ContentStore::load(dir.path()).unwrap();
        let slugs: Vec<&str> = store.published_posts().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, ["newer", "older"]);
    }

    #[test]
    fn test_date_prefix_stripped_from_slug() {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("blog");
        fs::create_dir(&blog).unwrap();
        write_post(
            &blog,
            "2026-05-01-harvest-season.md",
            "title: Harvest Season\npublished_at: 2026-05-01",
            "Body.",
        );

        let store = ContentStore::load(dir.path()).unwrap();

        assert!(store.get_post("harvest-season").is_some());
        assert!(store.get_post("2026-05-01-harvest-season").is_none());
    }

    #[test]
    fn test_drafts_excluded_from_published() {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("blog");
        fs::create_dir(&blog).unwrap();
        write_post(
            &blog,
            "2026-02-01-live.md",
            "title: Live\npublished_at: 2026-02-01",
            "Published.",
        );
        write_post(
            &blog,
            "2026-02-02-wip.md",
            "title: WIP\npublished_at: 2026-02-02\ndraft: true",
            "Not yet.",
        );

        let store = ContentStore::load(dir.path()).unwrap();

        assert_eq!(store.published_posts().count(), 1);
        // Drafts stay addressable by direct slug for previewing
        assert!(store.get_post("wip").is_some());
    }

    #[test]
    fn test_markdown_rendered_to_html() {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("blog");
        fs::create_dir(&blog).unwrap();
        write_post(
            &blog,
            "2026-04-01-tides.md",
            "title: Tides\npublished_at: 2026-04-01",
            "## Spring tides\n\nSalt harvest ~~starts~~ peaks in May.",
        );

        let store = ContentStore::load(dir.path()).unwrap();
        let post = store.get_post("tides").unwrap();

        assert!(post.content_html.contains("<h2"));
        assert!(post.content_html.contains("<del>starts</del>"));
        assert_eq!(post.reading_time_minutes, 1);
    }

    #[test]
    fn test_post_without_frontmatter_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("blog");
        fs::create_dir(&blog).unwrap();
        fs::write(blog.join("2026-01-01-raw.md"), "No frontmatter here.").unwrap();
        write_post(
            &blog,
            "2026-01-02-good.md",
            "title: Good\npublished_at: 2026-01-02",
            "Body.",
        );

        let store = ContentStore::load(dir.path()).unwrap();

        assert!(store.get_post("raw").is_none());
        assert!(store.get_post("good").is_some());
    }

    #[test]
    fn test_load_json_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("banners.json"),
            r#"[{"message": "Free shipping over $40", "link": "/shipping"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("testimonials.json"),
            r#"[{"quote": "Best flake salt I've tried.", "author": "Mara"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("marketplace.json"),
            r#"[{"name": "Field Goods", "url": "https://fieldgoods.example"}]"#,
        )
        .unwrap();

        let store = ContentStore::load(dir.path()).unwrap();

        assert_eq!(store.banners().len(), 1);
        assert_eq!(store.banners()[0].message, "Free shipping over $40");
        assert_eq!(store.testimonials()[0].author, "Mara");
        assert!(store.testimonials()[0].location.is_none());
        assert_eq!(store.marketplace_links()[0].name, "Field Goods");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("banners.json"), "{not json").unwrap();

        let result = ContentStore::load(dir.path());

        assert!(matches!(result, Err(ContentError::Parse(_))));
    }
}
