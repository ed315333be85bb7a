//! Reference drawings for eyeballing the renderer.
//!
//! Each subcommand builds one drawing and opens it in a window.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use penndraw::{DrawingContext, HorizontalAnchor};
use penndraw_engine::logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(name = "penndraw-demos")]
#[command(about = "Reference drawings rendered with penndraw")]
struct Cli {
    /// Log filter, e.g. `debug` or `penndraw=trace` (overrides PENNDRAW_LOG)
    #[arg(short, long)]
    log: Option<String>,

    #[command(subcommand)]
    command: Demo,
}

#[derive(Subcommand)]
enum Demo {
    /// White circle touching the top and left edges of a black 500x500 canvas
    Circle,

    /// Three colored ellipses, then cleared to white; the window should be blank
    ClearToWhite,

    /// One of every shape kind
    Shapes {
        /// Canvas width and height in pixels
        #[arg(short, long, default_value_t = 600)]
        size: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(match cli.log {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    let pd = match cli.command {
        Demo::Circle => circle()?,
        Demo::ClearToWhite => clear_to_white()?,
        Demo::Shapes { size } => shapes(size)?,
    };
    log::info!("opening window with {} primitives", pd.registry().len());
    pd.run()
}

fn circle() -> Result<DrawingContext> {
    let mut pd = DrawingContext::new();
    pd.set_title("penndraw: circle");
    pd.set_canvas_size(500, 500)?;
    pd.circle(0.1, 0.9, 0.1)?;
    Ok(pd)
}

fn clear_to_white() -> Result<DrawingContext> {
    let mut pd = DrawingContext::new();
    pd.set_title("penndraw: clear to white");
    pd.set_canvas_size(500, 500)?;
    pd.set_pen_color((0, 255, 0))?;
    pd.ellipse(0.25, 0.25, 0.25, 0.25)?;
    pd.set_pen_color((255, 0, 0))?;
    pd.ellipse(0.5, 0.5, 0.15, 0.25)?;
    pd.set_pen_color((0, 0, 255, 100))?;
    pd.ellipse(0.75, 0.75, 0.25, 0.15)?;
    pd.clear()?;
    Ok(pd)
}

fn shapes(size: i64) -> Result<DrawingContext> {
    let mut pd = DrawingContext::new();
    pd.set_title("penndraw: shapes");
    pd.set_canvas_size(size, size)
        .with_context(|| format!("bad canvas size {size}"))?;
    pd.set_border(0.05)?;
    pd.set_scale(0.0, 4.0)?;
    pd.clear_with((20, 24, 32))?;
    pd.set_pen_radius(0.004)?;

    // Top row: outlines.
    pd.set_pen_color((230, 230, 230))?;
    pd.circle(0.5, 3.5, 0.4)?;
    pd.ellipse(1.5, 3.5, 0.45, 0.25)?;
    pd.rectangle(2.5, 3.5, 0.45, 0.3)?;
    pd.square(3.5, 3.5, 0.35)?;

    // Middle row: fills, one translucent on top of another.
    pd.set_pen_color((240, 90, 60))?;
    pd.filled_circle(0.5, 2.3, 0.4)?;
    pd.set_pen_color((60, 160, 240, 160))?;
    pd.filled_ellipse(0.9, 2.3, 0.45, 0.25)?;
    pd.set_pen_color((250, 200, 40))?;
    pd.filled_rectangle(2.5, 2.3, 0.45, 0.3)?;
    pd.filled_square(3.5, 2.3, 0.35)?;

    // Bottom row: polygons and lines.
    pd.set_pen_color((120, 220, 120))?;
    pd.filled_polygon(&[0.1, 0.8, 0.9, 0.8, 0.9, 1.6, 0.5, 1.1, 0.1, 1.6])?;
    pd.set_pen_color((230, 230, 230))?;
    pd.polygon(&[1.1, 0.8, 1.9, 0.8, 1.5, 1.6])?;
    for i in 0..5 {
        let y = 0.8 + 0.2 * i as f64;
        pd.line(2.1, y, 3.9, y + 0.1)?;
    }

    pd.set_font_size(20.0)?;
    pd.text(2.0, 0.3, "penndraw")?;
    pd.text_with(0.3, 0.3, "left", 0.0, HorizontalAnchor::Left)?;
    pd.text_with(3.7, 0.3, "right", 0.0, HorizontalAnchor::Right)?;
    pd.text_with(3.0, 0.3, "tilted", 30.0, HorizontalAnchor::Center)?;
    Ok(pd)
}
