//! Code for resolving the fixed project layout. The only input is an optional project root supplied via the command line.

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use same_file::is_same_file;
use std::env::args;

const POSTS_DIR: &str = "posts";
const TEMPLATES_DIR: &str = "template";
const STYLESHEET_FILE: &str = "static/style.css";
const OUTPUT_DIR: &str = "public";
const CODE_THEME: &str = "base16-mocha.dark";
const ABOUT_TITLE: &str = "About me";

#[derive(Clone, Debug)]
pub struct Config {
    // Directory of Markdown posts
    pub posts_dir: Utf8PathBuf,
    // Directory of page layouts and the shared header/footer fragments
    pub templates_dir: Utf8PathBuf,
    // Site-wide stylesheet, copied verbatim
    pub stylesheet_file: Utf8PathBuf,
    // Directory for generated site output; deleted and recreated on every build
    pub output_dir: Utf8PathBuf,
    // Name of a theme from `syntect`'s default theme set
    pub code_theme: Box<str>,
    pub about_title: Box<str>,
}

impl Config {
    /// Lays out the conventional project structure under `root`. No paths are checked.
    #[must_use]
    pub fn new(root: impl AsRef<Utf8Path>) -> Self {
        let root = root.as_ref();

        Self {
            posts_dir: root.join(POSTS_DIR),
            templates_dir: root.join(TEMPLATES_DIR),
            stylesheet_file: root.join(STYLESHEET_FILE),
            output_dir: root.join(OUTPUT_DIR),
            code_theme: CODE_THEME.into(),
            about_title: ABOUT_TITLE.into(),
        }
    }

    /// Builds the configuration from an optional project root provided by command-line arguments.
    /// The current directory is used when no root is given.
    ///
    /// # Errors
    /// This function returns an error if:
    /// - a flag or more than one argument is provided
    /// - the posts or templates path does not point to a directory
    /// - the output directory points to the project root, the posts directory, or the templates directory
    pub fn from_env() -> Result<Self> {
        Self::from_args(args().skip(1))
    }

    fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();

        let root = args.next().unwrap_or_else(|| ".".into());

        // The root is the only input; there are no flags
        if root.starts_with('-') {
            return Err(anyhow!("unexpected flag {root:?}; the only argument is the project root"));
        }
        if args.next().is_some() {
            return Err(anyhow!("too many input arguments were provided"));
        }

        let config = Self::new(&root);

        config
            .check_paths(Utf8Path::new(&root))
            .with_context(|| format!("project at {root:?} is invalid"))?;

        Ok(config)
    }

    fn check_paths(&self, root: &Utf8Path) -> Result<()> {
        if !self.posts_dir.is_dir() {
            return Err(anyhow!("{:?} does not point to a directory", self.posts_dir));
        }
        if !self.templates_dir.is_dir() {
            return Err(anyhow!(
                "{:?} does not point to a directory",
                self.templates_dir
            ));
        }

        // The output directory gets removed wholesale, so it must not alias any input
        if self.output_dir.exists() {
            for input in [root, &*self.posts_dir, &*self.templates_dir] {
                if is_same_file(&self.output_dir, input).context("failed to compare paths")? {
                    return Err(anyhow!(
                        "output directory {:?} and {input:?} point to the same location",
                        self.output_dir
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Config;
    use camino::{Utf8Path, Utf8PathBuf};
    use std::fs::create_dir;
    use tempfile::{tempdir, TempDir};

    fn project() -> (TempDir, Utf8PathBuf) {
        let dir = tempdir().expect("temporary directory creation should succeed");
        let root = Utf8Path::from_path(dir.path())
            .expect("temporary path should be UTF-8")
            .to_owned();

        create_dir(root.join("posts")).expect("creating posts directory should succeed");
        create_dir(root.join("template")).expect("creating template directory should succeed");

        (dir, root)
    }

    #[test]
    fn conventions() {
        let config = Config::new("site");

        assert_eq!(config.posts_dir, Utf8Path::new("site/posts"));
        assert_eq!(config.templates_dir, Utf8Path::new("site/template"));
        assert_eq!(config.stylesheet_file, Utf8Path::new("site/static/style.css"));
        assert_eq!(config.output_dir, Utf8Path::new("site/public"));
        assert_eq!(&*config.about_title, "About me");
    }

    #[test]
    fn missing_directories() {
        let config = Config::new("does/not/exist");

        assert!(
            config.check_paths(Utf8Path::new("does/not/exist")).is_err(),
            "validation should fail for a missing posts directory"
        );
    }

    #[test]
    fn separate_output_directory() {
        let (_dir, root) = project();
        create_dir(root.join("public")).expect("creating output directory should succeed");

        assert!(
            Config::new(&root).check_paths(&root).is_ok(),
            "an existing output directory of its own should be accepted"
        );
    }

    #[cfg(unix)]
    #[test]
    fn aliased_output_directory() {
        use std::{fs::remove_file, os::unix::fs::symlink};

        let (_dir, root) = project();
        let output = root.join("public");

        symlink(&root, &output).expect("linking output to root should succeed");
        assert!(
            Config::new(&root).check_paths(&root).is_err(),
            "an output directory resolving to the project root should be rejected"
        );

        remove_file(&output).expect("removing link should succeed");
        symlink(root.join("posts"), &output).expect("linking output to posts should succeed");
        assert!(
            Config::new(&root).check_paths(&root).is_err(),
            "an output directory resolving to the posts directory should be rejected"
        );

        remove_file(&output).expect("removing link should succeed");
        symlink(root.join("template"), &output).expect("linking output to templates should succeed");
        assert!(
            Config::new(&root).check_paths(&root).is_err(),
            "an output directory resolving to the templates directory should be rejected"
        );
    }

    #[test]
    fn arguments() {
        let (_dir, root) = project();

        let config = Config::from_args([root.to_string()]).expect("a single root should be accepted");
        assert_eq!(config.posts_dir, root.join("posts"));

        assert!(
            Config::from_args([root.to_string(), "extra".into()]).is_err(),
            "more than one argument should be rejected"
        );
        assert!(
            Config::from_args(["--output".to_owned()]).is_err(),
            "flags should be rejected"
        );
        assert!(
            Config::from_args([root.join("missing").to_string()]).is_err(),
            "a root without posts and templates should be rejected"
        );
    }
}
