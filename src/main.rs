use anyhow::Context;
use clap::Parser;
use paperwork_gen::assets::FilesystemAssets;
use paperwork_gen::config::PaperworkConfig;
use paperwork_gen::source::JsonDirSource;
use paperwork_gen::generate_event_paperwork;
use std::path::PathBuf;

/// Generate the paperwork PDF for an event
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Event code, e.g. AB2995
    eid: String,

    /// TOML configuration file
    #[arg(long, env = "PAPERWORK_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding one `<EID>.json` payload per event
    #[arg(long, env = "PAPERWORK_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Overrides `assets.templates_path`
    #[arg(long, env = "TEMPLATES_PATH")]
    templates_path: Option<PathBuf>,

    /// Overrides `assets.fonts_path`
    #[arg(long, env = "FONTS_PATH")]
    fonts_path: Option<PathBuf>,

    /// Overrides `assets.backgrounds_path`
    #[arg(long, env = "BACKGROUNDS_PATH")]
    backgrounds_path: Option<PathBuf>,

    /// Where to write the PDF; defaults to `artbattle_<EID>_paperwork.pdf`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PaperworkConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PaperworkConfig::default(),
    };
    if let Some(templates) = args.templates_path {
        config.assets.templates_path = templates;
    }
    if let Some(fonts) = args.fonts_path {
        config.assets.fonts_path = Some(fonts);
    }
    if let Some(backgrounds) = args.backgrounds_path {
        config.assets.backgrounds_path = Some(backgrounds);
    }

    let source = JsonDirSource::new(&args.data_dir);
    let assets = FilesystemAssets::new(config.assets.clone());

    let paperwork = generate_event_paperwork(&source, &assets, &config, &args.eid)
        .with_context(|| format!("failed to generate paperwork for {}", args.eid))?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&paperwork.filename));
    std::fs::write(&output, &paperwork.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    log::info!("wrote {} ({} bytes)", output.display(), paperwork.bytes.len());
    Ok(())
}
