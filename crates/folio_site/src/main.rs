//! Folio simulator
//!
//! Mounts the hero headlessly and drives it with a synthetic frame loop:
//! a steady scroll and a pointer gliding toward a target point.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::{
    EventSource, InputEnvironment, Point, PointerEvent, Size, TouchCapability, ViewportEvent,
};
use folio_site::{HeroContent, HeroHost, HeroLayout, HeroScene, SiteConfig, TracingNavigator};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "folio-sim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless frame simulation of the Folio hero", long_about = None)]
struct Cli {
    /// Site configuration (defaults to the built-in hero)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "180")]
    frames: u64,

    /// Milliseconds between frames
    #[arg(long, default_value = "16.0")]
    frame_ms: f64,

    /// Pixels scrolled per frame
    #[arg(long, default_value = "0.0")]
    scroll_per_frame: f32,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x900", value_parser = parse_size)]
    viewport: Size,

    /// Pretend the user prefers reduced motion
    #[arg(long)]
    reduced_motion: bool,

    /// Pretend the device has touch input
    #[arg(long)]
    touch: bool,

    /// Where the simulated pointer ends up, as X,Y
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log filter directive (overrides RUST_LOG and --verbose)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match &cli.log {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if cli.verbose { "debug" } else { "info" })
        }),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => SiteConfig::builtin().context("Built-in hero configuration is invalid")?,
    };
    let content = HeroContent::from_config(&config.hero).context("Invalid hero content")?;

    let env = InputEnvironment {
        touch: if cli.touch {
            TouchCapability::Detected
        } else {
            TouchCapability::Absent
        },
        prefers_reduced_motion: cli.reduced_motion,
    };
    let policy = config.interaction.policy(env);
    let layout = HeroLayout::synthetic(cli.viewport, content.links.len());

    info!(
        frames = cli.frames,
        frame_ms = cli.frame_ms,
        reduced_motion = policy.reduced_motion(),
        pointer_tracking = policy.pointer_tracking(),
        "Simulating hero"
    );

    let viewport = EventSource::<ViewportEvent>::new();
    let pointer = EventSource::<PointerEvent>::new();
    let mut hero = HeroScene::mount(
        content,
        &config.interaction,
        policy,
        layout,
        HeroHost {
            viewport: &viewport,
            pointer: &pointer,
            navigator: Rc::new(TracingNavigator),
        },
    )
    .context("Failed to mount hero")?;

    // Pointer glides in from the left edge over the first half of the run
    let pointer_path = cli.pointer.map(|end| (Point::new(0.0, end.y), end));
    let glide_frames = (cli.frames / 2).max(1);

    for i in 0..cli.frames {
        let frame = i + 1;
        let timestamp = i as f64 * cli.frame_ms;
        let scroll_y = i as f32 * cli.scroll_per_frame;

        if let Some((start, end)) = pointer_path {
            let t = (i as f32 / glide_frames as f32).min(1.0);
            let position = Point::new(
                start.x + (end.x - start.x) * t,
                start.y + (end.y - start.y) * t,
            );
            let event = if i == 0 {
                PointerEvent::enter(position)
            } else {
                PointerEvent::moved(position)
            };
            pointer.emit(&event.at(timestamp));
        }

        viewport.emit(&ViewportEvent::frame(
            frame,
            timestamp,
            scroll_y,
            cli.viewport.height,
        ));
        let out = hero.on_frame(timestamp);

        let hovered = out
            .buttons
            .iter()
            .filter(|button| button.frame.hover.is_hovered())
            .map(|button| button.label.as_str())
            .collect::<Vec<_>>();
        let max_offset = out
            .buttons
            .iter()
            .map(|button| button.frame.offset.length())
            .fold(0.0f32, f32::max);

        println!(
            "frame {:>4}  t={:>8.1}ms  progress={:.3}  opacity={:.3}  scale={:.3}  y={:>6.1}  visible={:>2}/{:<2}  offset={:>5.1}  preview={}  hover=[{}]",
            out.tick.frame,
            out.tick.timestamp_ms,
            out.progress,
            out.scroll.opacity,
            out.scroll.scale,
            out.scroll.translate_y,
            out.visible_count(),
            out.nodes.len(),
            max_offset,
            if out.preview.is_some() { "on" } else { "off" },
            hovered.join(", "),
        );
    }

    let end = cli.frames.saturating_sub(1) as f64 * cli.frame_ms;
    info!(
        settled = hero.tree().is_settled(end),
        "Simulation finished"
    );
    hero.dispose();
    Ok(())
}

fn parse_point(input: &str) -> std::result::Result<Point, String> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{input}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_size(input: &str) -> std::result::Result<Size, String> {
    let (w, h) = input
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{input}'"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("viewport must be positive, got {w}x{h}"));
    }
    Ok(Size::new(w, h))
}
