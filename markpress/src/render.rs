//! Code for loading page layouts and rendering data records through them.
//!
//! A layout is a body template followed by the shared header and footer fragments. The files are
//! joined and parsed as a single template, so the fragments are expected to `define` named
//! templates which the body then invokes, e.g. `{{template "header" .}}`.

use anyhow::{anyhow, Context as _, Result};
use camino::Utf8Path;
use gtmpl::{Context, Template, Value};
use std::fs::{read_to_string, write};

const HEADER_FILE: &str = "header.html";
const FOOTER_FILE: &str = "footer.html";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Post,
    Index,
    About,
}

impl Layout {
    /// Name of the body template file within the templates directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Post => "post.html",
            Self::Index => "index.html",
            Self::About => "about.html",
        }
    }

    /// Page identifier exposed to templates as `.page`.
    #[must_use]
    pub fn page(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Index => "index",
            Self::About => "about",
        }
    }
}

#[derive(Clone, Copy)]
pub struct PageRenderer<'a> {
    templates_dir: &'a Utf8Path,
}

pub struct LayoutTemplate {
    layout: Layout,
    template: Template,
}

impl<'a> PageRenderer<'a> {
    #[must_use]
    pub fn new(templates_dir: &'a Utf8Path) -> Self {
        Self { templates_dir }
    }

    /// Reads and parses the body template for `layout` along with the header and footer fragments.
    /// Files are read again on every call.
    ///
    /// # Errors
    /// This function returns an error if any of the three files cannot be read or the combined text is not a valid template.
    pub fn load(&self, layout: Layout) -> Result<LayoutTemplate> {
        let mut text = String::new();

        for file_name in [layout.file_name(), HEADER_FILE, FOOTER_FILE] {
            let path = self.templates_dir.join(file_name);
            let contents = read_to_string(&path)
                .with_context(|| format!("failed to read template file at {path:?}"))?;
            text.push_str(&contents);
            text.push('\n');
        }

        let mut template = Template::default();
        template
            .parse(text)
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("failed to parse {:?} layout", layout.page()))?;

        Ok(LayoutTemplate { layout, template })
    }
}

impl LayoutTemplate {
    /// Executes the layout against `data`, returning the complete HTML document.
    ///
    /// # Errors
    /// This function returns an error if the template cannot be executed against `data`,
    /// e.g. because it calls a template that was never defined.
    pub fn render(&self, data: Value) -> Result<String> {
        self.template
            .render(&Context::from(data))
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("failed to execute {:?} layout", self.layout.page()))
    }

    /// Renders the layout and creates or overwrites the file at `path` with the result.
    ///
    /// # Errors
    /// This function returns an error if rendering fails or the file cannot be written.
    pub fn render_to_file(&self, data: Value, path: &Utf8Path) -> Result<()> {
        let html = self
            .render(data)
            .with_context(|| format!("failed to render page for {path:?}"))?;

        write(path, html).with_context(|| format!("failed to write page to {path:?}"))
    }
}
