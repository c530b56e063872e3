//! chatmark CLI - render chat replies to HTML, clean Markdown, text and speech

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use chatmark::{Chatmark, CleanupPreset, JsonFormat, RenderedMessage};

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render chat replies to HTML, clean Markdown, text and speech", long_about = None)]
struct Cli {
    /// Input Markdown file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every format (HTML, Markdown, text, speech, JSON) to a directory
    Convert {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render to HTML
    Html {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit target="_blank" on links
        #[arg(long)]
        no_link_target: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert to clean Markdown (clipboard format)
    #[command(alias = "md")]
    Markdown {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert to readable plain text
    Text {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert to text for a speech synthesizer
    Speech {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert to the document tree as JSON
    Json {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show message statistics
    Info {
        /// Input Markdown file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct RenderArgs {
    /// Keep single line breaks inside paragraphs
    #[arg(long)]
    line_breaks: bool,

    /// Columns of indentation per list level in the input
    #[arg(long, value_name = "N")]
    indent_width: Option<usize>,

    /// Spaces of indentation per list level in copied text
    #[arg(long, value_name = "N")]
    list_indent: Option<usize>,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,
}

impl RenderArgs {
    fn builder(&self) -> Chatmark {
        let mut builder = Chatmark::new();
        if self.line_breaks {
            builder = builder.with_line_breaks();
        }
        if let Some(width) = self.indent_width {
            builder = builder.with_indent_width(width);
        }
        if let Some(indent) = self.list_indent {
            builder = builder.with_list_indent(indent);
        }
        if let Some(level) = self.cleanup {
            builder = builder.with_cleanup(level.into());
        }
        builder
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Collapse blank lines only (default)
    Minimal,
    /// Also normalize Unicode and trim line ends
    Standard,
    /// Reply post-processing (strips a leading "Okay," and similar)
    Reply,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Reply => CleanupPreset::Reply,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            render,
        }) => cmd_convert(&input, output.as_deref(), &render),
        Some(Commands::Html {
            input,
            output,
            no_link_target,
            render,
        }) => cmd_html(&input, output.as_deref(), no_link_target, &render),
        Some(Commands::Markdown {
            input,
            output,
            render,
        }) => load(&input, &render)
            .and_then(|message| emit(output.as_deref(), &message.to_markdown())),
        Some(Commands::Text {
            input,
            output,
            render,
        }) => load(&input, &render)
            .and_then(|message| emit(output.as_deref(), &message.to_readable_text())),
        Some(Commands::Speech {
            input,
            output,
            render,
        }) => load(&input, &render)
            .and_then(|message| emit(output.as_deref(), &message.to_speech_text())),
        Some(Commands::Json {
            input,
            output,
            compact,
            render,
        }) => cmd_json(&input, output.as_deref(), compact, &render),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &RenderArgs::default())
            } else {
                println!("{}", "Usage: chatmark <FILE> [OUTPUT]".yellow());
                println!("       chatmark --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read the input file, or stdin for "-".
fn read_input(input: &Path) -> io::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input)
    }
}

fn load(input: &Path, render: &RenderArgs) -> Result<RenderedMessage, Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    log::debug!("Read {} bytes from {}", text.len(), input.display());
    Ok(render.builder().render(&text))
}

/// Write to a file, or print to stdout.
fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Default output directory: `<stem>_output` next to the working directory.
fn default_output_dir(input: &Path) -> PathBuf {
    let stem = if input.as_os_str() == "-" {
        Cow::Borrowed("stdin")
    } else {
        input.file_stem().unwrap_or_default().to_string_lossy()
    };
    PathBuf::from(format!("{}_output", stem))
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_dir(input));

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Rendering message...");
    let message = load(input, render)?;
    fs::write(output_dir.join("message.html"), message.html())?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    fs::write(output_dir.join("copy.md"), message.to_markdown())?;
    pb.inc(1);

    pb.set_message("Generating text...");
    fs::write(output_dir.join("copy.txt"), message.to_readable_text())?;
    fs::write(output_dir.join("speech.txt"), message.to_speech_text())?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    fs::write(
        output_dir.join("document.json"),
        message.to_json(JsonFormat::Pretty)?,
    )?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} message.html", "├─".dimmed());
    println!("  {} copy.md", "├─".dimmed());
    println!("  {} copy.txt", "├─".dimmed());
    println!("  {} speech.txt", "├─".dimmed());
    println!("  {} document.json", "└─".dimmed());

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    no_link_target: bool,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = render.builder();
    if no_link_target {
        builder = builder.without_link_target();
    }
    let message = builder.render(&read_input(input)?);
    emit(output, message.html())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let message = load(input, render)?;
    emit(output, &message.to_json(format)?)
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let message = load(input, &RenderArgs::default())?;
    let stats = message.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Message Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Source bytes".bold(), message.source().len());
    println!("{}: {}", "HTML bytes".bold(), message.html().len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Rules".bold(), stats.rule_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "chatmark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Chat reply rendering tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/chatmark".dimmed()
    );
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("notes/reply.md")),
            PathBuf::from("reply_output")
        );
        assert_eq!(default_output_dir(Path::new("-")), PathBuf::from("stdin_output"));
    }

    #[test]
    fn test_convert_writes_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reply.md");
        fs::write(&input, "# Plan\n\n1. a\n2. b").unwrap();
        let out = dir.path().join("out");

        cmd_convert(&input, Some(&out), &RenderArgs::default()).unwrap();

        let html = fs::read_to_string(out.join("message.html")).unwrap();
        assert_eq!(html, "<h1>Plan</h1><ol><li>a</li><li>b</li></ol>");
        let text = fs::read_to_string(out.join("copy.txt")).unwrap();
        assert_eq!(text, "Plan\n\n1. a\n2. b");
        assert!(out.join("document.json").exists());
        assert!(out.join("speech.txt").exists());
    }

    #[test]
    fn test_render_args_builder() {
        let args = RenderArgs {
            line_breaks: true,
            indent_width: Some(2),
            list_indent: Some(4),
            cleanup: Some(CleanupLevel::Standard),
        };
        let builder = args.builder();
        assert!(builder.parse_options().preserve_line_breaks);
        assert_eq!(builder.parse_options().indent_width, 2);
        assert_eq!(builder.render_options().list_indent, 4);
    }
}
