use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dotwalk", version, about = "Render animated dot-grid random walks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence into a directory.
    Frames(FramesArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// List the built-in palettes.
    Palettes,
}

/// Show file plus command-line overrides.
#[derive(Args, Debug)]
struct ShowArgs {
    /// Show JSON (canvas, fps, duration, seed, palette, timed events).
    #[arg(long)]
    show: Option<PathBuf>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Initial palette, e.g. "Schema 2" or "3".
    #[arg(long)]
    palette: Option<dotwalk::PaletteName>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Run length in seconds.
    #[arg(long)]
    seconds: Option<f64>,

    /// Background color (#RRGGBB or #RRGGBBAA); transparent when omitted.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    show: ShowArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    show: ShowArgs,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// File name prefix for `<prefix>_<frame>.png`.
    #[arg(long, default_value = "frame")]
    prefix: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    show: ShowArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Palettes => cmd_palettes(),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_show(args: &ShowArgs, even_dims: bool) -> anyhow::Result<dotwalk::Show> {
    let mut show = match &args.show {
        Some(path) => dotwalk::Show::from_path(path)
            .with_context(|| format!("load show '{}'", path.display()))?,
        None => dotwalk::Show::default(),
    };

    if let Some(seed) = args.seed {
        show.seed = seed;
    }
    if let Some(palette) = args.palette {
        show.palette = palette;
    }
    if let Some(width) = args.width {
        show.canvas.width = width;
    }
    if let Some(height) = args.height {
        show.canvas.height = height;
    }
    if let Some(fps) = args.fps {
        show.fps = dotwalk::Fps::new(fps, 1)?;
    }
    if let Some(seconds) = args.seconds {
        show.duration_secs = seconds;
    }
    if let Some(bg) = &args.background {
        show.background = Some(bg.clone());
    }

    show.validate(even_dims).context("invalid show")?;
    Ok(show)
}

fn setup(show: &dotwalk::Show) -> anyhow::Result<(dotwalk::Controller, dotwalk::CpuRenderer)> {
    let controller = dotwalk::Controller::new(
        dotwalk::AnimationConfig::default(),
        show.canvas,
        show.palette,
        show.seed,
    )?;
    let settings = dotwalk::RenderSettings {
        clear_rgba: show.background_color()?.map(|c| c.to_array()),
        ..dotwalk::RenderSettings::default()
    };
    Ok((controller, dotwalk::CpuRenderer::new(settings)))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let show = load_show(&args.show, false)?;
    let (mut controller, mut renderer) = setup(&show)?;

    let frame = dotwalk::FrameLoop::new(show.fps).render_frame_at(
        dotwalk::FrameIndex(args.frame),
        &mut controller,
        &mut renderer,
        &show.events,
    )?;
    dotwalk::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let show = load_show(&args.show, false)?;
    let (mut controller, mut renderer) = setup(&show)?;

    let mut sink = dotwalk::PngSequenceSink::new(&args.out, args.prefix.as_str());
    let stats = dotwalk::FrameLoop::new(show.fps).run(
        show.frame_range(),
        &mut controller,
        &mut renderer,
        &mut sink,
        &show.events,
    )?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let show = load_show(&args.show, true)?;
    let (mut controller, mut renderer) = setup(&show)?;

    let bg = show
        .background_color()?
        .map(|c| c.to_array())
        .unwrap_or([255, 255, 255, 255]);
    let mut sink = dotwalk::FfmpegSink::new(dotwalk::Mp4Options::new(&args.out).background(bg));
    let stats = dotwalk::FrameLoop::new(show.fps).run(
        show.frame_range(),
        &mut controller,
        &mut renderer,
        &mut sink,
        &show.events,
    )?;

    eprintln!(
        "wrote {} ({} frames, {} restarts)",
        args.out.display(),
        stats.frames_rendered,
        stats.restarts
    );
    Ok(())
}

fn cmd_palettes() -> anyhow::Result<()> {
    for name in dotwalk::PaletteName::ALL {
        let palette = dotwalk::Palette::get(name);
        println!("{name}: {}", palette.hex_colors().join(" "));
    }
    Ok(())
}
