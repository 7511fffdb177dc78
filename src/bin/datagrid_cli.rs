//! CLI tool for datagrid - lays out a grid described in JSON and prints the
//! frame a host would draw
//!
//! Usage:
//!   datagrid_cli <grid.json>                          # Frame JSON to stdout
//!   datagrid_cli <grid.json> --scroll-top 200 -o out.json
//!
//! Options:
//!   --scroll-top N       Vertical scroll offset in pixels
//!   --scroll-left N      Horizontal scroll offset in pixels
//!   --viewport-height N  Viewport height (default: rows-per-page rows)
//!   --viewport-width N   Viewport width (default: every column visible)
//!   -o FILE              Write to FILE instead of stdout
//!
//! Set `RUST_LOG=datagrid=debug` to trace window recomputation on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use datagrid::config::GridDocument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const USAGE: &str = "Usage: datagrid_cli <grid.json> [--scroll-top N] [--scroll-left N] \
[--viewport-height N] [--viewport-width N] [-o output.json]";

#[derive(Debug, Default)]
struct Args {
    input: String,
    output: Option<String>,
    scroll_top: f64,
    scroll_left: f64,
    viewport_height: Option<f64>,
    viewport_width: Option<f64>,
}

fn number<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<f64, String> {
    let raw = iter.next().ok_or(format!("{flag} needs a value"))?;
    raw.parse::<f64>()
        .map_err(|e| format!("{flag}: invalid number '{raw}': {e}"))
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut input = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scroll-top" => parsed.scroll_top = number(&mut iter, arg)?,
            "--scroll-left" => parsed.scroll_left = number(&mut iter, arg)?,
            "--viewport-height" => parsed.viewport_height = Some(number(&mut iter, arg)?),
            "--viewport-width" => parsed.viewport_width = Some(number(&mut iter, arg)?),
            "-o" => {
                parsed.output = Some(iter.next().ok_or("-o needs a file name")?.clone());
            }
            other if input.is_none() && !other.starts_with('-') => input = Some(other.to_string()),
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }
    parsed.input = input.ok_or("missing input file")?;
    Ok(parsed)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();
}

fn main() {
    init_tracing();

    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    // Read input file
    let text = match fs::read_to_string(&args.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    // Build the grid
    let mut grid = match GridDocument::from_json(&text).and_then(|doc| doc.into_grid()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error loading {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    if let Some(height) = args.viewport_height {
        grid.set_viewport_height(height);
    }
    if let Some(width) = args.viewport_width {
        grid.set_viewport_width(width);
    }
    grid.tick();
    grid.scroll_to(args.scroll_top, args.scroll_left);

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&grid.frame()) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
