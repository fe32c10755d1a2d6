//! CLI tool for turning bilingual lyric text into ProPresenter 6 documents.

use anyhow::{Context, Result};
use clap::Parser;
use pro6_core::{
    decode_input, diagnostic_message, generate_report, parse_lines, sanitize_filename,
    GeneratedDocument, Pro6Generator, SeededEnvironment, SongInput, SystemEnvironment,
};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Convert lyric text into a ProPresenter 6 (.pro6) document.
///
/// Lines are paired into slides: the first line of each pair is stored as
/// slide notes and the second is shown on screen.
#[derive(Parser, Debug)]
#[command(name = "pro6-export")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Lyric text file, one line per lyric line ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Song title
    #[arg(short, long, default_value = "")]
    title: String,

    /// Artist name (used for the output filename)
    #[arg(short, long, default_value = "")]
    artist: String,

    /// Put every line on its own slide instead of pairing lines
    #[arg(short, long)]
    single_line: bool,

    /// Output directory (default: next to the input file, or the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(short, long)]
    print: bool,

    /// Only print diagnostics for the input, do not export
    #[arg(short, long)]
    check: bool,

    /// Print diagnostics as JSON (with --check)
    #[arg(long, requires = "check")]
    json: bool,

    /// Seed for reproducible identifiers instead of the OS random source
    #[arg(long)]
    seed: Option<u64>,

    /// Replace characters that are not allowed in filenames
    #[arg(long)]
    sanitize_filename: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let input = read_song_input(&args)?;
    let lines = parse_lines(&input.raw_text);

    if args.check {
        if args.json {
            let report = generate_report(&input.title, &input.artist, &lines);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        } else {
            println!("{}", diagnostic_message(&input.title, &input.artist, &lines));
        }
        return Ok(());
    }

    // Diagnostics are advisory; show them but always export.
    let report = generate_report(&input.title, &input.artist, &lines);
    if !report.is_clean() {
        eprintln!("{}", diagnostic_message(&input.title, &input.artist, &lines));
    }

    let document = export(&args, &input)?;

    if args.verbose {
        eprintln!("  Generated {} slides", document.slide_count);
    }

    if args.print {
        print!("{}", document.content);
    } else {
        let output_path = get_output_path(&args, &document.filename)?;
        write_output(&output_path, &document.content)?;
        if args.verbose {
            eprintln!("Written to: {}", output_path.display());
        }
    }

    Ok(())
}

/// Read the lyric text and build the export request.
fn read_song_input(args: &Args) -> Result<SongInput> {
    let bytes = match args.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            if args.verbose {
                eprintln!("Processing: {}", path.display());
            }
            let mut file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            bytes
        }
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read standard input")?;
            bytes
        }
    };

    let raw_text = decode_input(&bytes);
    log::debug!("Read {} bytes of lyric text", bytes.len());

    Ok(
        SongInput::new(args.title.trim(), args.artist.trim(), raw_text.trim())
            .with_single_line(args.single_line),
    )
}

/// Generate the document with the configured random source.
fn export(args: &Args, input: &SongInput) -> Result<GeneratedDocument> {
    let document = match args.seed {
        Some(seed) => {
            log::debug!("Using seeded identifiers (seed {})", seed);
            Pro6Generator::new(SeededEnvironment::new(seed)).export(input)
        }
        None => Pro6Generator::new(SystemEnvironment::new()).export(input),
    };

    document.context("Failed to generate ProPresenter document")
}

/// Determine where the generated document is written.
fn get_output_path(args: &Args, filename: &str) -> Result<PathBuf> {
    let filename = if args.sanitize_filename {
        sanitize_filename(filename)
    } else {
        filename.to_string()
    };

    let output_path = match (&args.output, args.input.as_deref()) {
        (Some(dir), _) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(filename)
        }
        (None, Some(path)) if path != Path::new("-") => match path.parent() {
            Some(parent) => parent.join(filename),
            None => PathBuf::from(filename),
        },
        _ => PathBuf::from(filename),
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
