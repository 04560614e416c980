//! meshkit CLI - inspect, combine and tetrahedralize mesh documents.
//!
//! Usage: meshkit [-v] <COMMAND> [OPTIONS] <INPUT> ...
//!
//! Meshes are addressed by their 1-based position as listed by `meshkit info`.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use meshkit::engine::StarEngine;
use meshkit::render::RenderMesh;
use meshkit::Document;

#[derive(Parser)]
#[command(name = "meshkit")]
#[command(author, version, about = "Mesh document CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display counts and mesh names
    Info {
        /// Input document
        input: PathBuf,

        /// Show the bounding box of all live triangles
        #[arg(long)]
        bounds: bool,
    },

    /// Merge other documents into one
    Merge {
        /// Base document
        input: PathBuf,

        /// Documents to import, in order
        #[arg(required = true)]
        others: Vec<PathBuf>,

        /// Output document
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write a single mesh to its own document
    Export {
        /// Input document
        input: PathBuf,

        /// Mesh number (1-based)
        #[arg(value_parser = parse_mesh_number)]
        mesh: usize,

        /// Output document
        output: PathBuf,
    },

    /// Delete a mesh
    Delete {
        /// Input document
        input: PathBuf,

        /// Mesh number (1-based)
        #[arg(value_parser = parse_mesh_number)]
        mesh: usize,

        /// Output document (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace a mesh with the surface of its tetrahedral mesh
    Tetrahedralize {
        /// Input document
        input: PathBuf,

        /// Mesh number (1-based)
        #[arg(value_parser = parse_mesh_number)]
        mesh: usize,

        /// Radius-edge ratio bound (greater than 1.0). The built-in engine
        /// does not refine, so the bound does not change its output.
        #[arg(short, long, default_value = "2.0", value_parser = parse_ratio)]
        ratio: f64,

        /// Output document (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Info { input, bounds } => cmd_info(&input, bounds),
        Commands::Merge {
            input,
            others,
            output,
        } => cmd_merge(&input, &others, &output),
        Commands::Export {
            input,
            mesh,
            output,
        } => cmd_export(&input, mesh, &output),
        Commands::Delete {
            input,
            mesh,
            output,
        } => cmd_delete(&input, mesh, output.as_deref()),
        Commands::Tetrahedralize {
            input,
            mesh,
            ratio,
            output,
        } => cmd_tetrahedralize(&input, mesh, ratio, output.as_deref()),
    }
}

/// Accepts a positive integer and converts it to a 0-based slot index.
fn parse_mesh_number(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{s}' is not a mesh number (1, 2, 3, ...)")),
    }
}

/// Accepts a finite float strictly greater than 1.0.
fn parse_ratio(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(r) if r.is_finite() && r > 1.0 => Ok(r),
        Ok(_) => Err(format!("radius-edge ratio must be greater than 1.0, got {s}")),
        Err(_) => Err(format!("'{s}' is not a number")),
    }
}

fn missing_mesh(doc: &Document, index: usize) -> Box<dyn std::error::Error> {
    format!(
        "no mesh {} (document has {})",
        index + 1,
        doc.store().mesh_count()
    )
    .into()
}

fn write_back(doc: &mut Document, output: Option<&Path>) -> meshkit::Result<()> {
    match output {
        Some(path) => doc.save_as(path),
        None => doc.save(),
    }
}

fn cmd_info(input: &Path, show_bounds: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Document::open(input)?;

    println!("File: {}", input.display());
    println!("{}", doc.store().summary());

    if show_bounds {
        match RenderMesh::build(doc.store()).bounds() {
            Some(b) => {
                println!(
                    "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
                    b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
                );
                println!("Diagonal: {:.3}", b.diagonal());
            }
            None => println!("Bounding box: (empty)"),
        }
    }
    Ok(())
}

fn cmd_merge(
    input: &Path,
    others: &[PathBuf],
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::open(input)?;
    for other in others {
        let added = doc.import(other)?;
        println!("Imported {added} mesh(es) from {}", other.display());
    }
    doc.save_as(output)?;
    println!("{}", doc.store().summary());
    Ok(())
}

fn cmd_export(input: &Path, mesh: usize, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Document::open(input)?;
    if !doc.export_mesh(mesh, output)? {
        return Err(missing_mesh(&doc, mesh));
    }
    println!("Exported mesh {} to {}", mesh + 1, output.display());
    Ok(())
}

fn cmd_delete(
    input: &Path,
    mesh: usize,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::open(input)?;
    let Some(removed) = doc.delete_mesh(mesh) else {
        return Err(missing_mesh(&doc, mesh));
    };
    write_back(&mut doc, output)?;
    println!("Deleted '{}'", removed.name);
    Ok(())
}

fn cmd_tetrahedralize(
    input: &Path,
    mesh: usize,
    ratio: f64,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::open(input)?;
    let Some(report) = doc.tetrahedralize(mesh, ratio, &StarEngine::new())? else {
        return Err(missing_mesh(&doc, mesh));
    };
    write_back(&mut doc, output)?;
    println!(
        "Added {} vertices; mesh {} now has {} faces",
        report.added_vertices,
        mesh + 1,
        report.faces
    );
    Ok(())
}
