mod assets;
mod build;
mod config;
mod frontmatter;
mod highlight;
mod markdown;
mod page;
mod post;
mod render;

pub use assets::copy_file;
pub use build::build_site;
pub use config::Config;
pub use frontmatter::split as split_frontmatter;
pub use highlight::SyntaxHighlighter;
pub use markdown::MarkdownConverter;
pub use page::{IndexPageData, StaticPageData};
pub use post::{discover_posts, read_post, PostMetadata, PostRecord};
pub use render::{Layout, LayoutTemplate, PageRenderer};

/// Directory (relative to the output directory) holding one HTML file per post.
pub const OUTPUT_POSTS_DIR: &str = "posts";
pub const OUTPUT_STYLESHEET_FILE: &str = "style.css";
pub const OUTPUT_INDEX_FILE: &str = "index.html";
pub const OUTPUT_ABOUT_FILE: &str = "about.html";

/// File extension of post source files, without the leading dot.
pub const POST_EXTENSION: &str = "md";
