//! cmsrender CLI - render CMS rich text and pages

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use cmsrender::render::{
    self, CompositeVisitor, HtmlRenderer, MaxHeadingDepthVisitor, SkipImagesVisitor,
};
use cmsrender::{
    detect_shape, normalize_value, read_json, rich_text_from_value, slug_from_path, CleanupPreset,
    JsonFormat, RenderOptions, UnifiedPageResponse,
};

#[derive(Parser)]
#[command(name = "cmsrender")]
#[command(version)]
#[command(about = "Render CMS rich text and pages to HTML, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by the HTML-producing commands.
#[derive(clap::Args)]
struct HtmlArgs {
    /// Base URL prepended to relative asset paths
    #[arg(long, env = "CMS_ASSET_BASE_URL", value_name = "URL")]
    asset_base: Option<String>,

    /// Render video links as plain anchors
    #[arg(long)]
    no_embeds: bool,

    /// Maximum heading level (1-6)
    #[arg(long, default_value = "6")]
    max_heading: u8,

    /// Leave images out
    #[arg(long)]
    skip_images: bool,

    /// Print render statistics to stderr
    #[arg(long)]
    stats: bool,
}

impl HtmlArgs {
    fn options(&self) -> RenderOptions {
        let mut options = RenderOptions::new()
            .with_embeds(!self.no_embeds)
            .with_stats(self.stats);
        if let Some(base) = &self.asset_base {
            options = options.with_asset_base(base.clone());
        }
        options
    }

    fn renderer(&self) -> HtmlRenderer {
        let mut visitor = CompositeVisitor::new().with_visitor(MaxHeadingDepthVisitor::new(self.max_heading));
        if self.skip_images {
            visitor = visitor.with_visitor(SkipImagesVisitor);
        }
        HtmlRenderer::new(self.options()).with_visitor(visitor)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a rich-text field (or a section holding one) to HTML
    Html {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        html: HtmlArgs,
    },

    /// Convert a rich-text field or a page to plain text
    Text {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Treat the input as a page response
        #[arg(long)]
        page: bool,

        /// Page slug (defaults to the file name)
        #[arg(long)]
        slug: Option<String>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Render a rich-text field to the element tree as JSON
    Json {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Base URL prepended to relative asset paths
        #[arg(long, env = "CMS_ASSET_BASE_URL", value_name = "URL")]
        asset_base: Option<String>,
    },

    /// Normalize and render a full page to HTML
    Page {
        /// Input JSON file (page response)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page slug (defaults to the file name)
        #[arg(long)]
        slug: Option<String>,

        #[command(flatten)]
        html: HtmlArgs,
    },

    /// Normalize a page response and print it as JSON
    Normalize {
        /// Input JSON file (page response)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page slug (defaults to the file name)
        #[arg(long)]
        slug: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show page information
    Info {
        /// Input JSON file (page response)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page slug (defaults to the file name)
        #[arg(long)]
        slug: Option<String>,
    },

    /// Render every page response in a directory to HTML, in parallel
    Batch {
        /// Directory of page JSON files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Base URL prepended to relative asset paths
        #[arg(long, env = "CMS_ASSET_BASE_URL", value_name = "URL")]
        asset_base: Option<String>,

        /// Render video links as plain anchors
        #[arg(long)]
        no_embeds: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (no blank lines)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            html,
        }) => cmd_html(&input, output.as_deref(), &html),
        Some(Commands::Text {
            input,
            output,
            page,
            slug,
            cleanup,
        }) => cmd_text(&input, output.as_deref(), page, slug.as_deref(), cleanup),
        Some(Commands::Json {
            input,
            output,
            compact,
            asset_base,
        }) => cmd_json(&input, output.as_deref(), compact, asset_base),
        Some(Commands::Page {
            input,
            output,
            slug,
            html,
        }) => cmd_page(&input, output.as_deref(), slug.as_deref(), &html),
        Some(Commands::Normalize {
            input,
            output,
            slug,
            compact,
        }) => cmd_normalize(&input, output.as_deref(), slug.as_deref(), compact),
        Some(Commands::Info { input, slug }) => cmd_info(&input, slug.as_deref()),
        Some(Commands::Batch {
            input,
            output,
            asset_base,
            no_embeds,
        }) => cmd_batch(&input, output.as_deref(), asset_base, no_embeds),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: cmsrender <COMMAND> <FILE>".yellow());
            println!("       cmsrender --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn load_page(input: &Path, slug: Option<&str>) -> Result<UnifiedPageResponse, cmsrender::Error> {
    let slug = slug.map(str::to_string).unwrap_or_else(|| slug_from_path(input));
    Ok(normalize_value(read_json(input)?, &slug))
}

fn print_stats(stats: &render::RenderStats) {
    eprintln!("{}", "Render Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    eprintln!("{}: {}", "Headings".bold(), stats.heading_count);
    eprintln!("{}: {}", "Lists".bold(), stats.list_count);
    eprintln!("{}: {}", "Links".bold(), stats.link_count);
    eprintln!("{}: {}", "Embeds".bold(), stats.embed_count);
    eprintln!("{}: {}", "Images".bold(), stats.image_count);
    eprintln!("{}: {}", "Tables".bold(), stats.table_count);
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
}

fn cmd_html(input: &Path, output: Option<&Path>, args: &HtmlArgs) -> CmdResult {
    let content = rich_text_from_value(&read_json(input)?);
    let result = args.renderer().render_with_stats(&content);

    if args.stats {
        print_stats(&result.stats);
    }
    write_output(output, &result.html)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    page: bool,
    slug: Option<&str>,
    cleanup: Option<CleanupLevel>,
) -> CmdResult {
    let mut options = RenderOptions::new();
    if let Some(level) = cleanup {
        options = options.with_cleanup_preset(level.into());
    }

    let text = if page {
        render::page_to_text(&load_page(input, slug)?, &options)
    } else {
        render::to_text(&rich_text_from_value(&read_json(input)?), &options)
    };
    write_output(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    asset_base: Option<String>,
) -> CmdResult {
    let mut options = RenderOptions::new();
    if let Some(base) = asset_base {
        options = options.with_asset_base(base);
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let content = rich_text_from_value(&read_json(input)?);
    let markup = render::render_rich_text(&content, &options);
    write_output(output, &render::to_json(&markup, format)?)
}

fn cmd_page(input: &Path, output: Option<&Path>, slug: Option<&str>, args: &HtmlArgs) -> CmdResult {
    let page = load_page(input, slug)?;

    let mut renderer = args.renderer();
    let markup = renderer.render_page(&page);
    if args.stats {
        print_stats(renderer.stats());
    }
    write_output(output, &markup.to_html())
}

fn cmd_normalize(
    input: &Path,
    output: Option<&Path>,
    slug: Option<&str>,
    compact: bool,
) -> CmdResult {
    let page = load_page(input, slug)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_output(output, &render::to_json(&page, format)?)
}

fn cmd_info(input: &Path, slug: Option<&str>) -> CmdResult {
    let value = read_json(input)?;
    let shape = detect_shape(&value);
    let slug = slug.map(str::to_string).unwrap_or_else(|| slug_from_path(input));
    let page = normalize_value(value, &slug);

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Response".bold(), shape);
    println!("{}: {:?}", "Type".bold(), page.page_type);
    println!("{}: {}", "Title".bold(), page.hero_title);
    if let Some(ref subtitle) = page.hero_subtitle {
        println!("{}: {}", "Subtitle".bold(), subtitle);
    }
    if let Some(ref category) = page.category {
        println!("{}: {}", "Category".bold(), category);
    }
    println!("{}: {}", "Priority".bold(), page.priority());
    if let Some(updated) = page.updated_at_datetime() {
        println!("{}: {}", "Updated".bold(), updated.format("%Y-%m-%d %H:%M UTC"));
    }

    let seo = page.seo_metadata();
    if let Some(ref description) = seo.description {
        println!("{}: {}", "Description".bold(), description);
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for section in &page.sections {
        let marker = if section.is_active {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!(
            "  {} [{}] {} ({:?})",
            marker, section.order, section.title, section.content_type
        );
    }

    let result = render::render_page_with_stats(&page, &RenderOptions::default());
    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Active sections".bold(), page.active_sections().len());
    println!("{}: {}", "Tables".bold(), result.stats.table_count);
    println!("{}: {}", "Embeds".bold(), result.stats.embed_count);
    println!("{}: {}", "Images".bold(), result.stats.image_count);
    println!("{}: {}", "Words".bold(), result.stats.word_count);
    println!("{}: {}", "HTML size".bold(), result.html_len());

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    asset_base: Option<String>,
    no_embeds: bool,
) -> CmdResult {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.join("html"));
    fs::create_dir_all(&output_dir)?;

    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut options = RenderOptions::new().with_embeds(!no_embeds);
    if let Some(base) = asset_base {
        options = options.with_asset_base(base);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let failed = AtomicUsize::new(0);
    files.par_iter().for_each(|path| {
        let slug = slug_from_path(path);
        let result = read_json(path).map_err(|e| e.to_string()).and_then(|value| {
            let page = normalize_value(value, &slug);
            let html = render::render_page(&page, &options).to_html();
            fs::write(output_dir.join(format!("{slug}.html")), html).map_err(|e| e.to_string())
        });

        if let Err(e) = result {
            failed.fetch_add(1, Ordering::Relaxed);
            pb.println(format!("{} {}: {}", "Failed".red(), path.display(), e));
        }
        pb.set_message(slug);
        pb.inc(1);
    });

    pb.finish_with_message("Done!");

    let failed = failed.into_inner();
    println!(
        "\n{} {} pages rendered to {}",
        "Done!".green().bold(),
        files.len() - failed,
        output_dir.display()
    );
    if failed > 0 {
        return Err(cmsrender::Error::Other(format!("{failed} pages failed")).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "cmsrender".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("CMS rich text and page renderer");
    println!();
    println!("License: MIT");
}
