// src/main.rs
use std::fs;
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use log::info;
use sirius_scope::{
    render_frame_png, AppMode, ModeState, PlotStyle, ScopeConfig, SpectrumPipeline,
    SyntheticSpectrumSource, ViewportHandle, ViewportUpdate,
};
use sirius_scope::types::SOURCE_PROGRAMMATIC;

const CLI_SOURCE: &str = "cli";

/// Render a decimated preview of the synthetic spectrum.
#[derive(Parser, Debug)]
#[command(name = "sirius-scope", version)]
struct Args {
    /// Settings file (JSON). Missing files fall back to defaults.
    #[arg(long, default_value = "sirius-scope.json")]
    config: PathBuf,
    /// Lower viewport bound in Hz.
    #[arg(long)]
    min_hz: Option<f64>,
    /// Upper viewport bound in Hz.
    #[arg(long)]
    max_hz: Option<f64>,
    /// Output width in pixel columns.
    #[arg(long)]
    width: Option<u32>,
    /// Write a PNG preview here.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Switch and persist the application mode (0 test, 1 combat, 2 control).
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=2))]
    mode: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = ScopeConfig::load(&args.config)?;

    let mut mode = ModeState::new(config.mode);
    if let Some(raw) = args.mode {
        if mode.set_mode(AppMode::from(raw)) {
            config.mode = mode.mode();
            config.save(&args.config)?;
        }
    }

    let viewport = ViewportHandle::default();
    viewport.set_viewport(config.viewport_min_hz, config.viewport_max_hz, SOURCE_PROGRAMMATIC);
    let min_hz = args.min_hz.unwrap_or(config.viewport_min_hz);
    let max_hz = args.max_hz.unwrap_or(config.viewport_max_hz);
    if viewport.set_viewport(min_hz, max_hz, CLI_SOURCE) == ViewportUpdate::Rejected {
        anyhow::bail!("viewport bounds must be numbers, got {min_hz} and {max_hz}");
    }

    let width = args.width.unwrap_or(config.plot_width);
    let mut pipeline =
        SpectrumPipeline::new(SyntheticSpectrumSource::new(), viewport, width as usize);
    // The first pump always renders.
    pipeline.pump_once()?;
    let frame = pipeline.latest_frame()?;
    info!(
        "mode {:?}: [{:.3}, {:.3}] GHz -> {} columns, envelope {:.1}..{:.1} dB",
        mode.mode(),
        frame.range.min_hz / 1e9,
        frame.range.max_hz / 1e9,
        frame.columns.len(),
        frame.min_db,
        frame.max_db
    );

    if let Some(output) = &args.output {
        let style = PlotStyle {
            width,
            height: config.plot_height,
            ..PlotStyle::default()
        };
        let png = render_frame_png(frame, style)?;
        fs::write(output, png).with_context(|| format!("writing {}", output.display()))?;
        info!("preview written to {}", output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn mode_outside_known_values_is_refused() {
        assert!(Args::try_parse_from(["sirius-scope", "--mode", "7"]).is_err());
        assert!(Args::try_parse_from(["sirius-scope", "--mode", "-1"]).is_err());
        let args = Args::try_parse_from(["sirius-scope", "--mode", "2"]).unwrap();
        assert_eq!(args.mode.map(AppMode::from), Some(AppMode::Control));
    }
}
