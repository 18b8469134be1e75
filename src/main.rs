use clap::{Parser, Subcommand};
use sitefix::{config, optimize, pictures, report, seo};
use std::path::PathBuf;

/// Shared flags for commands that run the optimizer.
#[derive(clap::Args, Clone)]
struct ForceArgs {
    /// Re-encode images even when their WebP sibling is up to date
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
#[command(name = "sitefix")]
#[command(version)]
#[command(about = "Maintenance passes for a small static site")]
#[command(long_about = "\
Maintenance passes for a small static site

The site root holds the HTML pages; images live in a subdirectory (default
images/). Each pass walks the tree, does its one job, and prints a summary:

  optimize   resize wide images in place, re-encode, and write .webp and
             -thumb derivatives next to each source
  pictures   wrap <img> tags in <picture> elements when the WebP derivative
             exists on disk
  seo        rebuild <head> blocks, inject JSON-LD, and fix up markup for
             every page listed in [seo.pages]

Configuration is read from <site-root>/config.toml when present; run
'sitefix gen-config' for a documented starting point.")]
struct Cli {
    /// Site root directory (HTML pages at the top level)
    #[arg(long, default_value = ".", global = true)]
    site_root: PathBuf,

    /// Config file (default: <site-root>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize, recompress, and derive WebP/thumbnail variants
    Optimize(ForceArgs),
    /// Wrap <img> tags in <picture> elements with WebP sources
    Pictures,
    /// Rebuild <head> blocks, inject JSON-LD, apply markup fixups
    Seo,
    /// Run the full sequence: optimize, pictures, seo
    All(ForceArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.site_root.join("config.toml"));
    let config = config::load_config(&config_path)?;

    match cli.command {
        Command::Optimize(force_args) => {
            println!("==> Optimizing images in {}", config.images.dir);
            let run = optimize::optimize(&cli.site_root, &config.images, force_args.force)?;
            report::print_summary("Optimization", &run);
        }
        Command::Pictures => {
            println!("==> Rewriting <img> tags to <picture> elements");
            let run = pictures::run(&cli.site_root, &config, true)?;
            report::print_summary("Picture rewrite", &run);
        }
        Command::Seo => {
            println!("==> Updating SEO metadata");
            let run = seo::run(&cli.site_root, &config, true)?;
            report::print_summary("SEO update", &run);
        }
        Command::All(force_args) => {
            println!("==> Pass 1: Optimizing images in {}", config.images.dir);
            let run = optimize::optimize(&cli.site_root, &config.images, force_args.force)?;
            report::print_summary("Optimization", &run);

            println!("\n==> Pass 2: Rewriting <img> tags to <picture> elements");
            let run = pictures::run(&cli.site_root, &config, true)?;
            report::print_summary("Picture rewrite", &run);

            println!("\n==> Pass 3: Updating SEO metadata");
            let run = seo::run(&cli.site_root, &config, true)?;
            report::print_summary("SEO update", &run);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
