use clap::{Parser, Subcommand};
use docpress::compile::Compiler;
use docpress::filemap;
use docpress::frontmatter::Frontmatter;
use serde::Serialize;
use std::path::PathBuf;

/// One row of `docpress map` output.
#[derive(Serialize)]
struct MapEntry {
    input: PathBuf,
    output: PathBuf,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docpress")]
#[command(about = "Markdown documentation compiler for GitHub Pages sites")]
#[command(long_about = "\
Markdown documentation compiler for GitHub Pages sites

Walks the documentation source tree and writes a Jekyll-ready mirror of it
to the output directory, then compiles the repository README into the site
homepage. Per file, in order:

  1. ```LANG fences      →  {% highlight LANG startinline %} directives
  2. internal .md links  →  .html (README.md links → index.html)
  3. frontmatter         →  layout + title (auto-detected from the first
                            ===-underlined heading when not supplied)

On disk, README.md becomes index.md at every directory level; every other
filename is preserved verbatim. Defaults match running from a gh-pages
checkout next to the main repository:

  docpress build                     # ../docs → ./docs, ../README.md → ./index.md
  docpress map                       # print the input→output filemap as JSON
  docpress build --clean             # drop stale output from previous runs")]
#[command(version = version_string())]
struct Cli {
    /// Documentation source directory
    #[arg(long, default_value = "../docs", global = true)]
    source: PathBuf,

    /// Output directory for the compiled documentation tree
    #[arg(long, default_value = "./docs", global = true)]
    output: PathBuf,

    /// Source language of the code fences to rewrite
    #[arg(long, default_value = "php", global = true)]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the documentation tree and the homepage README
    Build {
        /// Repository README compiled into the site homepage
        #[arg(long, default_value = "../README.md")]
        readme: PathBuf,

        /// Output path for the compiled homepage
        #[arg(long, default_value = "./index.md")]
        readme_output: PathBuf,

        /// Remove the output directory before building
        #[arg(long)]
        clean: bool,
    },
    /// Print the input-to-output filemap as JSON; writes nothing
    Map,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            readme,
            readme_output,
            clean,
        } => {
            if clean {
                println!("==> Cleaning {}", cli.output.display());
                filemap::clean_output(&cli.output)?;
            }

            println!("==> Mapping {}", cli.source.display());
            let files = filemap::build_filemap(&cli.source, &cli.output)?;

            println!(
                "==> Compiling {} files into {}",
                files.len(),
                cli.output.display()
            );
            let compiler = Compiler::new(&cli.lang)?;
            for (input, output) in &files {
                let mut seed = Frontmatter::new();
                seed.set("layout", "documentation");
                compiler.compile_file(input, output, seed)?;
            }

            // The homepage lives outside the mapped tree, so its output
            // directory is on us, not the filemap.
            println!("==> Compiling homepage {}", readme.display());
            if let Some(parent) = readme_output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let mut seed = Frontmatter::new();
            seed.set("layout", "home");
            seed.set("title", "");
            compiler.compile_file(&readme, &readme_output, seed)?;

            println!("==> Build complete: {} pages", files.len() + 1);
        }
        Command::Map => {
            let files = filemap::map_tree(&cli.source, &cli.output)?;
            let entries: Vec<MapEntry> = files
                .into_iter()
                .map(|(input, output)| MapEntry { input, output })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}
