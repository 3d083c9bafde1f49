//! Per-file compilation: text rewrites plus frontmatter injection.
//!
//! Stage 2 of the docpress pipeline. Each file is read fully into memory,
//! pushed through three ordered passes, and written fully to its mapped
//! output path:
//!
//! 1. **Highlight rewrite** — language-tagged code fences become Liquid
//!    highlight directives with the fence body untouched.
//! 2. **Link rewrite** — every `\S+.md` candidate (except `http://` and
//!    `https://` URLs) is globally replaced by its `.html` form, with
//!    `README.md` pointing at `index.md` first.
//! 3. **Title detection** — a `title` key is added from the first
//!    `===`-underlined heading, unless the caller already supplied one.
//!
//! The rendered frontmatter block is then prepended and the result written.
//! Passes run on the whole document with no Markdown parsing; a link string
//! repeated in prose is rewritten everywhere it appears, and that coarseness
//! is deliberate (see the crate docs). Files that are not valid UTF-8 are
//! assets, not documents, and are copied through byte-for-byte.

use crate::frontmatter::Frontmatter;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Candidate internal link: a run of non-whitespace ending in `.md`.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\S+\.md").unwrap());

/// Setext heading: a line underlined by three-or-more `=`. Trailing spaces
/// or tabs on the underline are tolerated.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(.+)\n={3,}[ \t]*$").unwrap());

/// Compiles documentation files for one highlight language.
///
/// Holds the fence-rewrite regex so it is built once per run rather than
/// once per file.
pub struct Compiler {
    highlight: Regex,
    replacement: String,
}

impl Compiler {
    /// Build a compiler whose highlight pass targets fences tagged `lang`.
    pub fn new(lang: &str) -> Result<Self, regex::Error> {
        // Lazy inner match, so adjacent fences rewrite independently instead
        // of merging into one span. Tag matching is case-insensitive.
        let highlight = Regex::new(&format!(r"(?is)```{}(.+?)```", regex::escape(lang)))?;
        // `$` is the one metacharacter in a replacement string; double it so
        // a literal `$` in the language tag survives group expansion.
        let replacement = format!(
            "{{% highlight {} startinline %}}${{1}}{{% endhighlight %}}",
            lang.replace('$', "$$")
        );
        Ok(Self {
            highlight,
            replacement,
        })
    }

    /// Read `input`, apply all passes, and write the result to `output`.
    ///
    /// Overwrites any existing output file. The destination directory must
    /// already exist; [`crate::filemap::build_filemap`] guarantees that for
    /// tree-driven calls, and the driver handles the standalone README.
    ///
    /// A file that is not valid UTF-8 is an asset sitting in the docs tree
    /// (an image, usually), not a document: its bytes are copied through
    /// verbatim, with no transforms and no frontmatter.
    ///
    /// Takes the frontmatter by value: title detection mutates it, and each
    /// file must get its own copy.
    pub fn compile_file(
        &self,
        input: &Path,
        output: &Path,
        frontmatter: Frontmatter,
    ) -> Result<(), CompileError> {
        let bytes = fs::read(input).map_err(|e| CompileError::Read(input.to_path_buf(), e))?;
        let compiled = match String::from_utf8(bytes) {
            Ok(contents) => self.transform(&contents, frontmatter).into_bytes(),
            Err(e) => e.into_bytes(),
        };
        fs::write(output, compiled).map_err(|e| CompileError::Write(output.to_path_buf(), e))
    }

    /// The pure part of compilation: all passes plus frontmatter injection.
    pub fn transform(&self, contents: &str, mut frontmatter: Frontmatter) -> String {
        let contents = self.rewrite_highlights(contents);
        let contents = rewrite_links(&contents);

        // Detection runs on the already-rewritten text, after the caller's
        // seed has had its say: an explicit title (even an empty one) wins.
        if !frontmatter.contains("title") {
            if let Some(title) = detect_title(&contents) {
                frontmatter.set("title", title);
            }
        }

        format!("{}{}", frontmatter.render(), contents)
    }

    /// Rewrite every tagged fence into a Liquid highlight directive.
    pub fn rewrite_highlights(&self, contents: &str) -> String {
        self.highlight
            .replace_all(contents, self.replacement.as_str())
            .into_owned()
    }
}

/// Rewrite internal `.md` links to their published `.html` form.
///
/// Candidates are collected up front, then each one is replaced globally —
/// every textual occurrence of the candidate in the document, not just the
/// matched span. `http(s)://` candidates are external links that happen to
/// end in `.md` and are left alone. The suffix replacements are
/// case-sensitive, so an uppercase `.MD` candidate passes through unchanged.
pub fn rewrite_links(contents: &str) -> String {
    let candidates: Vec<&str> = LINK_RE.find_iter(contents).map(|m| m.as_str()).collect();

    let mut rewritten = contents.to_string();
    for link in candidates {
        if link.starts_with("http://") || link.starts_with("https://") {
            continue;
        }
        let target = link.replace("README.md", "index.md").replace(".md", ".html");
        rewritten = rewritten.replace(link, &target);
    }
    rewritten
}

/// Text of the first `===`-underlined heading, trimmed, if any.
pub fn detect_title(contents: &str) -> Option<&str> {
    TITLE_RE
        .captures(contents)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}
