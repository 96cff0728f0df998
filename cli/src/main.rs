use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

use ptrans_codegen::{
    parse_proto_schema, regenerate_file, CodeGenerator, CppGenerator, JavaGenerator, Outcome,
};

/// Generates packet dispatch code from packets.proto and splices it into
/// the hand-written Java and C++ packet transformer sources.
#[derive(Parser)]
#[command(name = "ptrans-codegen")]
#[command(about = "Generate packet (de)serialization dispatch code from a packets.proto schema", long_about = None)]
struct Cli {
    /// Path to the 'packets.proto' packet specification file
    #[arg(long)]
    proto: PathBuf,

    /// Path to the original Java source code file
    #[arg(long)]
    java_src: PathBuf,

    /// Path to the original C++ source code file
    #[arg(long)]
    cpp_src: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        error!("{err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    for path in [&cli.proto, &cli.java_src, &cli.cpp_src] {
        if !path.is_file() {
            bail!(
                "the specified file does not exist or is a directory: {}",
                path.display()
            );
        }
    }

    info!(proto = %cli.proto.display(), "analysing packet specification");

    let text = fs::read_to_string(&cli.proto)
        .with_context(|| format!("failed to read the proto file {}", cli.proto.display()))?;
    let schema = parse_proto_schema(&text)
        .context("failed to parse the packets.proto specification")?;

    info!(packets = schema.packet_types.len(), "packet specification parsed");

    // Managed runtime first, then the native one; the first failure aborts
    // the whole run, so a broken C++ target never sees a half-finished run
    // with only the Java file rewritten ahead of it.
    let targets: [(&dyn CodeGenerator, &Path); 2] = [
        (&JavaGenerator, &cli.java_src),
        (&CppGenerator, &cli.cpp_src),
    ];

    for (gen, src_path) in targets {
        info!(
            target_lang = gen.target_name(),
            packets = schema.packet_types.len(),
            path = %src_path.display(),
            "generating dispatch code"
        );

        let outcome = regenerate_file(gen, src_path, &schema.packet_types)
            .with_context(|| format!("code generation failed for {}", src_path.display()))?;

        match outcome {
            Outcome::Unchanged => {
                info!(path = %src_path.display(), "unchanged");
            }
            Outcome::Rewritten { backup } => {
                info!(path = %src_path.display(), backup = %backup.display(), "rewritten");
            }
        }
    }

    info!("complete");
    Ok(())
}
