use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use holoprism::{
    HologramStyle, Mask, PngFileSlot, SlotStore, SyncOpts, SyncSession, compose_hologram,
    decode_image,
};

#[derive(Parser, Debug)]
#[command(name = "holoprism", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the prism-net hologram from a processed image.
    Compose(ComposeArgs),
    /// Repair, matte, compose, and publish into a slot directory.
    Sync(SyncArgs),
    /// Print the slot manifest as JSON, or "empty".
    Peek(SlotArgs),
    /// Write the slot's current composite to a PNG.
    Extract(ExtractArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input image (any decodable raster format).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Honor the source alpha channel while pasting faces.
    #[arg(long, default_value_t = false)]
    preserve_alpha: bool,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Input photo (any decodable raster format).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Grayscale repair mask (resampled to the photo's size if needed).
    #[arg(long)]
    mask: PathBuf,

    /// Slot directory to publish into.
    #[arg(long)]
    slot: PathBuf,

    /// Rendering style.
    #[arg(long, value_enum, default_value = "matted")]
    style: StyleArg,
}

#[derive(Parser, Debug)]
struct SlotArgs {
    /// Slot directory.
    #[arg(long)]
    slot: PathBuf,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Slot directory.
    #[arg(long)]
    slot: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    /// Matte the background away, paste faces through their alpha.
    Matted,
    /// Keep the background, paste faces fully opaque.
    Flat,
}

impl From<StyleArg> for HologramStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Matted => HologramStyle::MattedArtifact,
            StyleArg::Flat => HologramStyle::FlatArtwork,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Sync(args) => cmd_sync(args),
        Command::Peek(args) => cmd_peek(args),
        Command::Extract(args) => cmd_extract(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read input '{}'", args.in_path.display()))?;
    let source = decode_image(&bytes)?;

    let composite = compose_hologram(&source, args.preserve_alpha);
    write_composite_png(&args.out, composite.image())?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sync(args: SyncArgs) -> anyhow::Result<()> {
    let photo_bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read input '{}'", args.in_path.display()))?;
    let photo = decode_image(&photo_bytes)?.to_rgb8();

    let mask_bytes = std::fs::read(&args.mask)
        .with_context(|| format!("read mask '{}'", args.mask.display()))?;
    let mask_gray = decode_image(&mask_bytes)?.to_luma8();
    let mask = Mask::from_grayscale(mask_gray, photo.width(), photo.height())?;

    let mut slot = PngFileSlot::open(&args.slot)?;
    let session = SyncSession::new(SyncOpts {
        style: args.style.into(),
        ..SyncOpts::default()
    });
    let outcome = session.sync(&photo, &mask, &mut slot)?;

    eprintln!(
        "published version {} (repair: {}{}) to {}",
        outcome.meta.version.0,
        outcome.repair_tier,
        outcome
            .matte_tier
            .map(|t| format!(", matte: {t}"))
            .unwrap_or_default(),
        args.slot.display()
    );
    Ok(())
}

fn cmd_peek(args: SlotArgs) -> anyhow::Result<()> {
    let slot = PngFileSlot::open(&args.slot)?;
    match slot.peek()? {
        Some(meta) => println!("{}", serde_json::to_string_pretty(&meta)?),
        None => println!("empty"),
    }
    Ok(())
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let slot = PngFileSlot::open(&args.slot)?;
    let Some(snapshot) = slot.get()? else {
        anyhow::bail!("slot '{}' is empty", args.slot.display());
    };

    write_composite_png(&args.out, snapshot.composite.image())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_composite_png(out: &Path, image: &image::RgbImage) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
