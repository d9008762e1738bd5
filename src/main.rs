//! BuildMap Floor Editor (CLI).
//!
//! Lädt Stockwerke über das Backend und bereitet Grundriss-Uploads vor,
//! ohne grafischen Host.

use std::path::{Path, PathBuf};

use anyhow::Context;
use buildmap_floor_editor::app::AppCommand;
use buildmap_floor_editor::core::ConnectionGroup;
use buildmap_floor_editor::{
    svg, AppController, AppIntent, AppState, EditorOptions, FileGridOffsetStore, HttpBackend,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "buildmap-floor-editor", version, about = "BuildMap Grundriss-Editor")]
struct Cli {
    /// Optionen-Datei (Standard: neben der Binary)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lädt ein Stockwerk und gibt Fulcrums und Verbindungen aus
    Inspect {
        #[arg(long)]
        floor: u64,
        /// Zeigt zusätzlich die Stockwerk-Verbindungen dieses Fulcrums
        #[arg(long)]
        fulcrum: Option<u64>,
    },
    /// Bettet ein Rasterbild als SVG-Grundriss ein
    WrapImage {
        path: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "BuildMap Floor Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(EditorOptions::config_path);
    let options = EditorOptions::load_from_file(&config_path);

    match cli.command {
        Command::Inspect { floor, fulcrum } => inspect(options, floor, fulcrum),
        Command::WrapImage { path, out } => wrap_image(&path, out.as_deref()),
    }
}

fn inspect(options: EditorOptions, floor_id: u64, fulcrum: Option<u64>) -> anyhow::Result<()> {
    let backend = HttpBackend::from_options(&options);
    let offsets = FileGridOffsetStore::new(options.grid_offset_dir());
    let mut controller = AppController::new(Box::new(backend), Box::new(offsets));
    controller.set_event_listener(|event| log::info!("{:?}", event));
    let mut state = AppState::with_options(options);

    controller.handle_intent(&mut state, AppIntent::FloorOpenRequested { floor_id })?;
    let floor = state
        .floor
        .as_ref()
        .with_context(|| format!("Stockwerk {floor_id} nicht geladen"))?;
    println!(
        "{} (Level {}): {} Fulcrums, {} Verbindungen",
        floor.display_name(),
        floor.level,
        state.fulcrum_count(),
        state.connection_count()
    );

    for f in state.graph.fulcrums() {
        println!(
            "  #{:<6} {:<10} ({:.3}, {:.3}) {}",
            f.id,
            f.kind.as_str(),
            f.position.x,
            f.position.y,
            f.name
        );
    }
    for group in state.graph.connection_groups() {
        match group {
            ConnectionGroup::Unidirectional { from, to, weight } => {
                println!("  {from} -> {to} [{weight}]")
            }
            ConnectionGroup::Bidirectional {
                a,
                b,
                weight_ab,
                weight_ba,
            } => println!("  {a} <-> {b} [{weight_ab} / {weight_ba}]"),
        }
    }

    if let Some(fulcrum_id) = fulcrum {
        controller.handle_command(&mut state, AppCommand::OpenFulcrumEdit { fulcrum_id })?;
        controller.handle_command(
            &mut state,
            AppCommand::LoadInterfloorRows {
                focal: Some(fulcrum_id),
            },
        )?;
        if let Some(message) = &state.ui.status_message {
            println!("{message}");
        }
        for row in &state.modals.fulcrum.form.interfloor {
            let forward = if row.forward_enabled {
                row.forward_weight.to_string()
            } else {
                "-".to_string()
            };
            let backward = if row.backward_enabled {
                row.backward_weight.to_string()
            } else {
                "-".to_string()
            };
            println!(
                "  {} / {} (#{}): hin {} zurück {}",
                row.floor_name, row.name, row.fulcrum_id, forward, backward
            );
        }
    }
    Ok(())
}

fn wrap_image(path: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
    let mime = mime_for(path)
        .with_context(|| format!("Dateityp nicht erkannt: {}", path.display()))?;
    let plan = svg::plan_from_upload(&bytes, mime)?;
    log::info!("Grundriss {}x{}", plan.size.x, plan.size.y);

    match out {
        Some(out) => {
            std::fs::write(out, &plan.svg)
                .with_context(|| format!("Schreiben fehlgeschlagen: {}", out.display()))?;
            log::info!("SVG geschrieben nach: {}", out.display());
        }
        None => println!("{}", plan.svg),
    }
    Ok(())
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
