//! # Docpress
//!
//! A Markdown documentation compiler for GitHub Pages sites. It walks a docs
//! directory, rewrites each file for Jekyll (code fences become Liquid
//! highlight directives, internal `.md` links become `.html`, a frontmatter
//! header is prepended), and writes the results to an output tree mirroring
//! the input. The repository README is compiled separately into the site
//! homepage.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Filemap   docs/  →  BTreeMap<input, output>   (walk + mkdir)
//! 2. Compile   each pair  →  output file           (rewrite + frontmatter)
//! ```
//!
//! The filemap is computed once, up front, and is immutable afterwards. It
//! guarantees that every output directory exists before the compile stage
//! writes a single byte, so the compiler itself never creates directories.
//! Run `docpress map` to inspect the filemap as JSON; it writes nothing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`filemap`] | Stage 1 — walks the input tree, maps input paths to output paths, creates output directories |
//! | [`compile`] | Stage 2 — per-file text transformations and the final write |
//! | [`frontmatter`] | Insertion-ordered metadata mapping and its rendered block |
//!
//! # Design Decisions
//!
//! ## Blunt Link Rewriting
//!
//! Internal link rewriting is a global find-and-replace per `\S+.md`
//! candidate, not a Markdown-aware link rewrite. A link string that also
//! appears as plain prose is rewritten too. This mirrors how the published
//! docs have always been built; making it parse-aware would silently change
//! pages that currently render correctly.
//!
//! ## Fresh Frontmatter Per File
//!
//! Title auto-detection mutates the frontmatter it is given. The driver
//! therefore seeds every compile call with its own copy, so one file's
//! detected title can never bleed into the next file's header.

pub mod compile;
pub mod filemap;
pub mod frontmatter;

#[cfg(test)]
pub(crate) mod test_helpers;
