//! Exports [`build_site`], which runs every step of a build in order and stops at the first failure.

use crate::{
    copy_file, discover_posts, post::post_path, read_post, split_frontmatter, Config,
    IndexPageData, Layout, LayoutTemplate, MarkdownConverter, PageRenderer, PostRecord,
    StaticPageData, SyntaxHighlighter, OUTPUT_ABOUT_FILE, OUTPUT_INDEX_FILE, OUTPUT_POSTS_DIR,
    OUTPUT_STYLESHEET_FILE,
};
use anyhow::{Context, Result};
use camino::Utf8Path;
use gtmpl::Value;
use std::{
    fs::{create_dir, create_dir_all, remove_dir_all},
    io::ErrorKind,
};
use tracing::{debug, info, warn};

/// Builds the site described by `config` from scratch.
///
/// The output directory is deleted and recreated, the stylesheet is copied, every post is loaded
/// and converted, and then the post pages, the index page, and the about page are rendered in that order.
/// A failure at any step aborts the build and may leave a partially written output directory behind.
///
/// # Errors
/// This function returns an error if any filesystem operation, frontmatter parse, Markdown conversion,
/// or template load or execution fails.
pub fn build_site(config: &Config) -> Result<()> {
    let output_posts_dir = config.output_dir.join(OUTPUT_POSTS_DIR);

    // Reset output directories
    info!(output = %config.output_dir, "cleaning output directory");
    clean(&config.output_dir)?;
    create_dir_all(&config.output_dir).context("failed to create output directory")?;
    create_dir(&output_posts_dir).context("failed to create output posts directory")?;

    // Copy site stylesheet
    copy_file(
        config.stylesheet_file.as_std_path(),
        config.output_dir.join(OUTPUT_STYLESHEET_FILE).as_std_path(),
    )
    .context("failed to copy site stylesheet")?;

    // Initialize syntax highlighter for post text
    let highlighter = SyntaxHighlighter::new(&config.code_theme)
        .context("failed to initialize syntax highlighter")?;
    let converter = MarkdownConverter::new(&highlighter);

    let mut posts = load_posts(&config.posts_dir, converter)?;

    // Newest first; `sort_by` is stable so posts with equal dates keep their path order
    posts.sort_by(|a, b| b.metadata.date.cmp(&a.metadata.date));

    let renderer = PageRenderer::new(&config.templates_dir);

    info!(count = posts.len(), "rendering post pages");
    let post_template = renderer
        .load(Layout::Post)
        .context("failed to load post layout")?;
    for post in &posts {
        write_post(&post_template, post, &output_posts_dir)?;
    }

    info!("rendering index page");
    renderer
        .load(Layout::Index)
        .context("failed to load index layout")?
        .render_to_file(
            Value::from(&IndexPageData {
                posts: &posts,
                page: Layout::Index.page(),
            }),
            &config.output_dir.join(OUTPUT_INDEX_FILE),
        )
        .context("failed to build index page")?;

    info!("rendering about page");
    renderer
        .load(Layout::About)
        .context("failed to load about layout")?
        .render_to_file(
            Value::from(&StaticPageData {
                page: Layout::About.page(),
                title: &config.about_title,
            }),
            &config.output_dir.join(OUTPUT_ABOUT_FILE),
        )
        .context("failed to build about page")?;

    info!(output = %config.output_dir, "site built");

    Ok(())
}

fn clean(dir: &Utf8Path) -> Result<()> {
    match remove_dir_all(dir) {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            Err(e).with_context(|| format!("failed to remove output directory at {dir:?}"))
        }
        _ => Ok(()),
    }
}

fn load_posts(posts_dir: &Utf8Path, converter: MarkdownConverter<'_>) -> Result<Vec<PostRecord>> {
    let slugs = discover_posts(posts_dir).context("failed to discover posts")?;
    info!(count = slugs.len(), dir = %posts_dir, "loading posts");

    slugs
        .into_iter()
        .map(|slug| {
            load_post(posts_dir, &slug, converter).with_context(|| {
                format!("failed to process post from {:?}", post_path(posts_dir, &slug))
            })
        })
        .collect()
}

fn load_post(
    posts_dir: &Utf8Path,
    slug: &str,
    converter: MarkdownConverter<'_>,
) -> Result<PostRecord> {
    debug!(slug, "loading post");

    let source = read_post(posts_dir, slug)?;

    let (mut metadata, body) =
        split_frontmatter(source).context("failed to read post frontmatter")?;

    let content = converter
        .convert(&body)
        .context("failed to convert post Markdown to HTML")?;

    if !metadata.slug.is_empty() && metadata.slug != slug {
        warn!(
            slug,
            frontmatter_slug = %metadata.slug,
            "ignoring frontmatter slug in favor of file name"
        );
    }
    metadata.slug = slug.to_owned();

    Ok(PostRecord::new(metadata, content))
}

fn write_post(
    template: &LayoutTemplate,
    post: &PostRecord,
    output_posts_dir: &Utf8Path,
) -> Result<()> {
    let output_path = output_posts_dir.join(format!("{}.html", post.metadata.slug));
    debug!(path = %output_path, "writing post page");

    template
        .render_to_file(Value::from(post), &output_path)
        .with_context(|| format!("failed to build page for post {:?}", post.metadata.slug))
}
