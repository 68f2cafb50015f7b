use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pikura", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose photos and stickers into a strip PNG.
    Strip(StripArgs),
    /// List themes and stock sticker emoji.
    Gallery,
}

#[derive(Parser, Debug)]
struct StripArgs {
    /// Photo to place in the strip, top to bottom. Repeat up to four times.
    #[arg(long = "frame", required = true)]
    frames: Vec<PathBuf>,

    /// Background theme id (`plain`, `pastel`, `midnight`). Unknown ids fall back to `pastel`.
    #[arg(long)]
    theme: Option<String>,

    /// JSON array of `{frameIndex, emoji, xPct, yPct}` sticker records.
    #[arg(long)]
    stickers: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the strip as a `data:image/png;base64,...` URI on stdout.
    #[arg(long)]
    data_uri: bool,

    /// Run every stage on the calling thread.
    #[arg(long)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Extra directory to load glyph fonts from. May be repeated.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Print diagnostics about the glyph font database.
    #[arg(long)]
    dump_fonts: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Strip(args) => cmd_strip(args),
        Command::Gallery => cmd_gallery(),
    }
}

fn cmd_strip(args: StripArgs) -> anyhow::Result<()> {
    if args.out.is_none() && !args.data_uri {
        anyhow::bail!("nothing to write: pass --out and/or --data-uri");
    }

    let frames = args
        .frames
        .iter()
        .map(|p| std::fs::read(p).with_context(|| format!("read frame '{}'", p.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let stickers_json = args
        .stickers
        .as_deref()
        .map(|p| {
            std::fs::read_to_string(p)
                .with_context(|| format!("read stickers '{}'", p.display()))
        })
        .transpose()?;

    let mut settings = pikura::StripSettings::from_env();
    if args.sequential {
        settings.parallel = false;
    }
    if args.threads.is_some() {
        settings.threads = args.threads;
    }
    settings.font_dirs.extend(args.font_dirs);

    let request = pikura::StripRequest::from_parts(
        frames,
        args.theme.as_deref(),
        stickers_json.as_deref(),
    )
    .map_err(with_kind)?;

    let glyphs = std::sync::Arc::new(pikura::SvgGlyphRasterizer::new(&settings));
    if args.dump_fonts {
        eprintln!("glyph font diagnostics:");
        eprintln!("    families:   {}", pikura::EMOJI_FONT_FAMILIES);
        eprintln!("    font_faces: {}", glyphs.face_count());
    }

    let engine = pikura::StripEngine::with_glyphs(&settings, glyphs).map_err(with_kind)?;
    let output = engine.generate(request).map_err(with_kind)?;

    for s in &output.skipped {
        eprintln!("skipped sticker {} (#{}): {}", s.id, s.position, s.reason);
    }

    if let Some(out) = &args.out {
        write_png(out, &output.png)?;
        eprintln!("wrote {} ({}x{})", out.display(), output.width, output.height);
    }
    if args.data_uri {
        println!("{}", output.data_uri());
    }
    Ok(())
}

fn cmd_gallery() -> anyhow::Result<()> {
    println!("themes:");
    for theme in pikura::Theme::ALL {
        let bg = theme.background();
        println!("  {:<9} rgb({}, {}, {})", theme.id(), bg.r, bg.g, bg.b);
    }
    println!("stickers: {}", pikura::STICKER_GALLERY.join(" "));
    Ok(())
}

fn write_png(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))
}

fn with_kind(err: pikura::PikuraError) -> anyhow::Error {
    let kind = err.kind();
    anyhow::Error::new(err).context(format!("strip generation failed [{kind}]"))
}
