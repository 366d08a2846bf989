//! Utility for highlighting code in posts by converting Markdown code blocks to styled HTML.

use anyhow::{anyhow, Result};
use syntect::{
    highlighting::{Theme, ThemeSet},
    html::highlighted_html_for_string,
    parsing::{SyntaxReference, SyntaxSet},
};
use tracing::warn;

pub struct SyntaxHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntaxHighlighter {
    /// Initializes a utility to add syntax highlighting to code.
    /// The current implementation uses the `syntect` crate.
    ///
    /// # Errors
    /// This function returns an error if the default theme set of `syntect` does not contain `theme_name`.
    pub fn new(theme_name: &str) -> Result<Self> {
        let syntaxes = SyntaxSet::load_defaults_newlines();

        // To obtain an owned `Theme`, we call `BTreeMap::remove()` instead of `BTreeMap::get()`.
        // This is fine because we don't care about the entire `ThemeSet`.
        let theme = ThemeSet::load_defaults()
            .themes
            .remove(theme_name)
            .ok_or_else(|| anyhow!("no code theme named \"{theme_name}\" could be found"))?;

        Ok(Self { syntaxes, theme })
    }

    /// Adds syntax highlighting to a string of code, outputting HTML with inline styles.
    /// If no language is specified or no syntax for the specified language is found,
    /// the input string is highlighted as plaintext.
    ///
    /// # Errors
    /// This function returns an error if `syntect` fails to highlight the provided text.
    pub fn highlight(&self, text: &str, language: Option<&str>) -> Result<String> {
        let syntax = language.map_or_else(
            || self.syntaxes.find_syntax_plain_text(),
            |lang| self.find_syntax(lang),
        );

        highlighted_html_for_string(text, &self.syntaxes, syntax, &self.theme).map_err(Into::into)
    }

    fn find_syntax(&self, lang: &str) -> &SyntaxReference {
        self.syntaxes.find_syntax_by_token(lang).unwrap_or_else(|| {
            warn!(language = lang, "no syntax found for code block; highlighting as plaintext");
            self.syntaxes.find_syntax_plain_text()
        })
    }
}
