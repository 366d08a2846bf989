//! Code for converting the Markdown body of a post into an HTML fragment.

use crate::SyntaxHighlighter;
use anyhow::{Context, Result};
use pulldown_cmark::{html::push_html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Converts Markdown to HTML, replacing code blocks with highlighted markup.
/// A converter holds no per-document state and can be reused for every post in a build.
#[derive(Clone, Copy)]
pub struct MarkdownConverter<'a> {
    highlighter: &'a SyntaxHighlighter,
}

struct CodeBlock {
    language: Option<String>,
    text: String,
}

impl<'a> MarkdownConverter<'a> {
    #[must_use]
    pub fn new(highlighter: &'a SyntaxHighlighter) -> Self {
        Self { highlighter }
    }

    /// # Errors
    /// This function returns an error if a code block cannot be highlighted.
    /// Malformed Markdown does not cause an error.
    pub fn convert(&self, markdown: &str) -> Result<String> {
        let mut events = Vec::new();
        // Code block text can arrive in several events, so it is collected before highlighting
        let mut code_block: Option<CodeBlock> = None;

        for event in Parser::new_ext(markdown, options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(CodeBlock {
                        language: match kind {
                            CodeBlockKind::Indented => None,
                            CodeBlockKind::Fenced(info) => fence_language(&info),
                        },
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code_block.take() {
                        let html = self
                            .highlighter
                            .highlight(&block.text, block.language.as_deref())
                            .context("failed to highlight code block")?;
                        events.push(Event::Html(html.into()));
                    }
                }
                Event::Text(text) => match &mut code_block {
                    Some(block) => block.text.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                _ => events.push(event),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        push_html(&mut html, events.into_iter());

        Ok(html)
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

// "rust,ignore" and "rust {.numbered}" both name `rust`
fn fence_language(info: &str) -> Option<String> {
    info.split([' ', ',', '{'])
        .map(str::trim)
        .find(|token| !token.is_empty())
        .map(ToOwned::to_owned)
}
