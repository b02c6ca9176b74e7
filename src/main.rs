//! # mdtree
//!
//! Split markdown documents into per-section files and put them back together.
//!
//! ## Usage
//!
//! Explode a document into `guide/`:
//! ```sh
//! mdtree explode guide.md guide/
//! ```
//!
//! Assemble it again:
//! ```sh
//! mdtree assemble guide/ guide.md
//! ```
//!
//! Inspect the heading structure:
//! ```sh
//! mdtree tree guide.md
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command, OutputFormat};
use color_eyre::Result;
use log::LevelFilter;
use mdtree::check::{self, LinkStatus};
use mdtree::parser::Heading;
use mdtree::sections::{self, ExtractedSection, fs as section_fs};
use mdtree::{Config, Document, parser};
use std::path::Path;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Handle dynamic shell completions
    #[cfg(feature = "unstable-dynamic")]
    clap_complete::CompleteEnv::with_factory(|| {
        use clap::CommandFactory;
        Cli::command()
    })
    .complete();

    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let config = Config::load();

    match args.command {
        Command::Explode { file, output_dir } => explode(&file, &output_dir),
        Command::Assemble {
            input_dir,
            output_file,
        } => assemble(&input_dir, &output_file),
        Command::List {
            file,
            format,
            level,
            filter,
        } => {
            let format = format
                .or_else(|| OutputFormat::from_config(&config.output.format))
                .unwrap_or(OutputFormat::Text);
            let doc = parser::parse_file(&file)?;
            let headings: Vec<&Heading> = match (level, filter.as_deref()) {
                (Some(level), _) => doc.headings_at_level(usize::from(level)),
                (None, Some(pattern)) => doc.filter_headings(pattern),
                (None, None) => doc.headings.iter().collect(),
            };
            print_headings(&headings, format)
        }
        Command::Tree { file } => {
            let tree = parser::parse_file(&file)?.build_tree();
            if tree.is_empty() {
                println!("No headings found in {}", file.display());
            } else {
                print!("{}", tree.render_box_tree());
            }
            Ok(())
        }
        Command::CheckLinks { file, recursive } => check_links(&file, recursive),
        Command::Config { init } => show_config(&config, init),
        Command::Extract {
            file,
            heading,
            output,
        } => extract(&parser::parse_file(&file)?, &heading, output.as_deref()),
        Command::ExtractAll {
            file,
            level,
            output,
        } => {
            let level = level.map_or(config.extract.level, usize::from);
            extract_all(&parser::parse_file(&file)?, level, output.as_deref())
        }
        Command::Toc { file, max_level } => {
            let max_level = max_level.map_or(config.toc.max_level, usize::from);
            let doc = parser::parse_file(&file)?;
            match sections::generate_toc(&doc, max_level) {
                Some(toc) => println!("{toc}"),
                None => println!("No headings up to level {max_level}"),
            }
            Ok(())
        }
    }
}

fn explode(file: &Path, output_dir: &Path) -> Result<()> {
    let content = section_fs::read_to_string(file)?;
    let exploded = sections::explode(&sections::source_name(file), &content)?;

    for section in &exploded.sections {
        println!("Processing {} → {}", section.heading_text, section.filename);
    }
    println!("Processing Table of Contents → {}", sections::INDEX_FILENAME);

    let written = sections::write_exploded(&exploded, output_dir)?;
    println!(
        "\n✨ Document exploded to {} ({} files)",
        output_dir.display(),
        written.len()
    );
    Ok(())
}

fn assemble(input_dir: &Path, output_file: &Path) -> Result<()> {
    println!("Reading {}", input_dir.join(sections::INDEX_FILENAME).display());

    let assembly = sections::assemble_to_file(input_dir, output_file)?;
    for section in &assembly.included {
        println!("Processing {} → {}", section.filename, section.title);
    }
    for skipped in &assembly.skipped {
        eprintln!("Warning: skipped {}: {}", skipped.section.filename, skipped.error);
    }

    println!(
        "\n✨ Document assembled to {} ({} sections)",
        output_file.display(),
        assembly.included.len()
    );
    Ok(())
}

fn print_headings(headings: &[&Heading], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for heading in headings {
                let prefix = "#".repeat(heading.level);
                println!("{} {}", prefix, heading.text);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(headings)?);
        }
    }
    Ok(())
}

fn extract(doc: &Document, heading: &str, output: Option<&Path>) -> Result<()> {
    let section = sections::extract_section(doc, heading)?;
    match output {
        Some(dir) => {
            let path = section.write_to(dir, &section.filename())?;
            println!("Written to {}", path.display());
        }
        None => println!("{}", section.markdown),
    }
    Ok(())
}

fn extract_all(doc: &Document, level: usize, output: Option<&Path>) -> Result<()> {
    let extracted: Vec<ExtractedSection> = sections::extract_all_sections(doc, level);
    if extracted.is_empty() {
        println!("No sections found at level {level}");
        return Ok(());
    }

    match output {
        Some(dir) => {
            for (i, section) in extracted.iter().enumerate() {
                let path = section.write_to(dir, &section.numbered_filename(i + 1))?;
                println!("Written to {}", path.display());
            }
            println!(
                "\n✨ Extracted {} sections to {}",
                extracted.len(),
                dir.display()
            );
        }
        None => {
            for (i, section) in extracted.iter().enumerate() {
                if i > 0 {
                    println!("\n{}\n", "-".repeat(40));
                }
                println!("{}", section.markdown);
            }
        }
    }
    Ok(())
}

fn check_links(file: &Path, recursive: bool) -> Result<()> {
    let reports = check::check_links(file, recursive)?;

    let mut broken = 0;
    for report in &reports {
        println!(
            "\n🔗 Checking {} unique URLs in {}:",
            report.total,
            sections::source_name(&report.path)
        );
        for link in &report.links {
            let url = link.target.as_str();
            match link.status {
                LinkStatus::Found => println!("✅ {url}"),
                LinkStatus::Missing => println!("❌ {url} (file not found)"),
                LinkStatus::Email => println!("⏭️  {url} (email - skipped)"),
                LinkStatus::External => println!("⏭️  {url} (external - not checked)"),
            }
        }
        broken += report.broken().count();
    }

    if broken > 0 {
        color_eyre::eyre::bail!("{broken} broken link(s)");
    }
    Ok(())
}

fn show_config(config: &Config, init: bool) -> Result<()> {
    if init {
        let path = config
            .save()
            .map_err(|e| color_eyre::eyre::eyre!("could not write config: {e}"))?;
        println!("Written to {}", path.display());
        return Ok(());
    }

    match Config::config_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory on this platform"),
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
