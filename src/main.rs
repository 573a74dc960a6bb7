//! Photo Capture - CLI
//!
//! Command-line front end over the record store, gallery and editor.

use std::path::PathBuf;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use photo_capture::{AppConfig, LensFacing, PhotoCaptureApi, StillFileCamera, Transform};

#[derive(Parser)]
#[command(name = "photo-capture")]
#[command(version = photo_capture::VERSION)]
#[command(about = "Photo Capture - capture, browse and edit photos")]
struct Cli {
    /// Data root (documents/ and pictures/ live here)
    #[arg(short, long, default_value = "./photo_capture_data")]
    root: PathBuf,

    /// Config file (defaults to <root>/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a photo using a still image as the camera feed
    Capture {
        /// Image used as the camera frame
        #[arg(long)]
        from: PathBuf,

        /// Use the front lens
        #[arg(long)]
        front: bool,
    },

    /// List photos in gallery order
    List,

    /// Show the record of one photo
    Info {
        /// Photo uri
        uri: String,
    },

    /// Show the most recent capture
    Last,

    /// Delete a photo and its record
    Delete {
        /// Photo uri
        uri: String,
    },

    /// Edit a photo and save it over the original
    Edit {
        /// Photo uri
        uri: String,

        /// Comma separated edit steps
        #[arg(long, value_delimiter = ',', required = true)]
        ops: Vec<EditOp>,

        /// Apply the steps without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare records with the pictures directory
    Reconcile {
        /// Remove records whose file is missing
        #[arg(long)]
        prune: bool,
    },

    /// Write the effective configuration to the config file
    InitConfig,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EditOp {
    Rotate,
    Flip,
    Undo,
    Redo,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(|| cli.root.join("config.json"));
    let config = AppConfig::load(&config_path, &cli.root)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    if let Commands::InitConfig = cli.command {
        config.save(&config_path)?;
        println!("✅ Config written to: {}", config_path.display());
        return Ok(());
    }

    let api = PhotoCaptureApi::open(config).context("opening photo store")?;

    match cli.command {
        Commands::Capture { from, front } => {
            println!("📸 Capturing from: {}", from.display());
            let mut session = api.capture_session(StillFileCamera::new(&from));

            session.start(&())?;
            let wants = if front { LensFacing::Front } else { LensFacing::Back };
            if session.selector() != wants {
                session.switch(&())?;
            }

            let record = session.capture().await?;
            session.stop();

            println!("✅ Saved: {}", record.uri);
            println!("   Captured: {}", record.capture_date);
            println!("   Size:     {} bytes", record.size_bytes);
        }

        Commands::List => {
            let gallery = api.gallery();
            let uris = gallery.index();

            if uris.is_empty() {
                println!("📭 No photos yet");
            } else {
                println!("📷 Photos ({}):", uris.len());
                println!("{:-<60}", "");
                for uri in uris {
                    match gallery.details(&uri) {
                        Some(record) => println!(
                            "{}  {}  ({} bytes)",
                            record.capture_date, record.uri, record.size_bytes
                        ),
                        None => println!("{}", uri),
                    }
                }
            }
        }

        Commands::Info { uri } => match api.gallery().details(&uri) {
            Some(record) => {
                println!("URI:          {}", record.uri);
                println!("Capture Date: {}", record.capture_date);
                println!("Image Size:   {} bytes", record.size_bytes);
            }
            None => bail!("no record for {}", uri),
        },

        Commands::Last => match api.gallery().last_photo_uri() {
            Some(uri) => println!("{}", uri),
            None => println!("📭 No images captured yet"),
        },

        Commands::Delete { uri } => {
            println!("🗑️ Deleting photo: {}", uri);
            api.gallery().try_delete(&uri)?;
            println!("✅ Photo deleted!");
        }

        Commands::Edit { uri, ops, dry_run } => {
            let mut edit = api.edit(&uri)?;

            for op in ops {
                let image = match op {
                    EditOp::Rotate => Some(edit.apply(Transform::RotateRight)),
                    EditOp::Flip => Some(edit.apply(Transform::FlipHorizontal)),
                    EditOp::Undo => Some(edit.undo()),
                    EditOp::Redo => edit.redo(),
                };

                match image {
                    Some(image) => println!("   {:?} -> {}x{}", op, image.width(), image.height()),
                    None => println!("   {:?} -> nothing to redo", op),
                }
            }

            if dry_run {
                println!("🔍 Dry run, {} not modified", uri);
            } else if !edit.has_changes() {
                println!("ℹ️ No changes to save");
            } else {
                edit.try_commit()?;
                println!("✅ Saved: {}", uri);
            }
        }

        Commands::Reconcile { prune } => {
            let gallery = api.gallery();
            let report = gallery.reconcile()?;

            if report.is_clean() {
                println!("💚 Records and pictures are consistent");
            } else {
                for uri in &report.dangling_records {
                    println!("   missing file: {}", uri);
                }
                for file in &report.orphan_files {
                    println!("   unrecorded:   {}", file.display());
                }
            }

            if prune {
                let removed = gallery.prune_dangling()?;
                println!("✅ Pruned {} record(s)", removed);
            }
        }

        // Handled before the store is opened
        Commands::InitConfig => {}
    }

    api.close();
    Ok(())
}
