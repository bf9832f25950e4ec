//! asciify CLI - Convert images to ASCII art

use asciify::settings::Settings;
use asciify::worker::{convert_batch, ConversionRequest};
use asciify::{AsciifyError, Converter, FixedRatio, FontMetrics, GlyphMetrics};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

#[derive(Parser)]
#[command(name = "asciify", about = "Convert images to ASCII art")]
struct Args {
    /// Input image files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Settings file (TOML); flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Characters ordered from lightest to darkest
    #[arg(long)]
    chars: Option<String>,
    /// Output width in characters
    #[arg(short, long)]
    width: Option<usize>,
    /// Font size in pixels for measuring the glyph aspect ratio
    #[arg(long)]
    font_size: Option<f32>,
    /// Monospace font file to measure the glyph aspect ratio from
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Glyph height/width ratio (overrides --font)
    #[arg(short, long)]
    ratio: Option<f64>,
    /// Lightness, 50 is neutral
    #[arg(short, long)]
    lightness: Option<u32>,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

impl Args {
    fn settings(&self) -> Result<Settings, AsciifyError> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(chars) = &self.chars {
            settings.chars = chars.clone();
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(font_size) = self.font_size {
            settings.font_size = font_size;
        }
        if let Some(font) = &self.font {
            settings.font = Some(font.clone());
        }
        if let Some(ratio) = self.ratio {
            settings.ratio = Some(ratio);
        }
        if let Some(lightness) = self.lightness {
            settings.lightness = lightness;
        }
        Ok(settings)
    }
}

fn glyph_ratio(settings: &Settings) -> Result<f64, AsciifyError> {
    match (settings.ratio, &settings.font) {
        (Some(ratio), _) => Ok(ratio),
        (None, Some(font)) => FontMetrics::from_file(font)?.glyph_aspect_ratio(settings.font_size),
        (None, None) => FixedRatio::default().glyph_aspect_ratio(settings.font_size),
    }
}

fn main() -> Result<(), AsciifyError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = args.settings()?;
    let ratio = glyph_ratio(&settings)?;
    log::info!(
        "width {} cols, glyph ratio {ratio:.3}, lightness gain {:.2}",
        settings.width,
        settings.lightness_gain()
    );

    let converter = Converter::new(settings.chars.clone())
        .with_width(settings.width)
        .with_glyph_aspect_ratio(ratio)
        .with_lightness_gain(settings.lightness_gain());

    let mut requests = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let image = image::open(input)?.to_rgba8();
        let (w, h) = (image.width() as usize, image.height() as usize);
        log::debug!("loaded {} ({w}x{h})", input.display());
        requests.push(ConversionRequest::new(image.into_raw(), converter.config_for(w, h)));
    }

    for result in convert_batch(&requests) {
        let grid = result?;
        match args.format {
            Format::Text => println!("{grid}"),
            Format::Html => println!("{}", grid.to_html()),
            Format::Json => println!("{}", serde_json::to_string(&grid)?),
        }
    }
    Ok(())
}
