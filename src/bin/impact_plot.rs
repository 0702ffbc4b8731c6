use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render an impact sweep metric from CSV as a line chart"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/sweep.png")]
    output: PathBuf,
    #[arg(long, default_value = "crater_diameter_meters")]
    metric: String,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
    /// Plot log10 of the metric (useful for energies)
    #[arg(long, default_value_t = false)]
    log_y: bool,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f64,
    y: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let (mut samples, axis_column, metric_column) = read_samples(&cli.input, &cli.metric)?;

    if cli.log_y {
        samples.retain(|s| s.y > 0.0);
        for sample in &mut samples {
            sample.y = sample.y.log10();
        }
    }
    if samples.len() < 2 {
        return Err(anyhow::anyhow!(
            "Need at least two finite samples in the provided CSV"
        ));
    }
    samples.sort_by(|a, b| a.x.total_cmp(&b.x));

    let (x_min, x_max) = bounds(samples.iter().map(|s| s.x));
    let (y_min, y_max) = bounds(samples.iter().map(|s| s.y));
    let y_pad = ((y_max - y_min) * 0.05).max(f64::EPSILON);

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let y_desc = if cli.log_y {
        format!("log10 {}", metric_axis_label(&metric_column))
    } else {
        metric_axis_label(&metric_column)
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!("{} vs {}", metric_axis_label(&metric_column), axis_column),
            caption_font,
        )
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(x_min..x_max, (y_min - y_pad)..(y_max + y_pad))?;

    chart
        .configure_mesh()
        .x_desc(axis_column.as_str())
        .y_desc(y_desc)
        .label_style(label_font.clone())
        .x_labels(8)
        .y_labels(8)
        .y_label_formatter(&|v| format_tick(*v))
        .draw()?;

    let line_color = RGBColor(210, 100, 20);
    chart.draw_series(LineSeries::new(
        samples.iter().map(|s| (s.x, s.y)),
        ShapeStyle::from(&line_color).stroke_width(3),
    ))?;
    chart.draw_series(
        samples
            .iter()
            .map(|s| Circle::new((s.x, s.y), 3, line_color.filled())),
    )?;

    root.present()?;
    log::info!("rendered {} samples to {}", samples.len(), output_str);
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_samples(path: &str, metric_name: &str) -> anyhow::Result<(Vec<Sample>, String, String)> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let axis_column = headers
        .get(0)
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("CSV has no columns"))?;
    let metric_idx = resolve_metric_column(&headers, metric_name)
        .ok_or_else(|| anyhow::anyhow!("CSV missing metric column matching '{}'", metric_name))?;
    let metric_column = headers
        .get(metric_idx)
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Invalid metric column index"))?;

    let mut samples = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let x: f64 = r.get(0).unwrap_or("").parse().unwrap_or(f64::NAN);
        let y: f64 = r.get(metric_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if x.is_finite() && y.is_finite() {
            samples.push(Sample { x, y });
        }
    }
    Ok((samples, axis_column, metric_column))
}

fn resolve_metric_column(headers: &csv::StringRecord, metric_name: &str) -> Option<usize> {
    let direct = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(metric_name));
    if direct.is_some() {
        return direct;
    }
    let metric_lower = metric_name.to_lowercase();
    let fallback = match metric_lower.as_str() {
        "crater" => "crater_diameter_meters",
        "shockwave" => "shockwave_radius_meters",
        "energy" => "impact_energy_joules",
        "yield" | "kt" => "energy_equivalent_kt_tnt",
        "mass" => "mass_kg",
        other => other,
    };
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(fallback))
}

fn metric_axis_label(metric_column: &str) -> String {
    match metric_column.to_lowercase().as_str() {
        "crater_diameter_meters" => "Crater diameter (m)".to_string(),
        "shockwave_radius_meters" => "Shockwave radius (m)".to_string(),
        "impact_energy_joules" => "Impact energy (J)".to_string(),
        "kinetic_energy_joules" => "Kinetic energy (J)".to_string(),
        "energy_equivalent_kt_tnt" => "Yield (kt TNT)".to_string(),
        "mass_kg" => "Mass (kg)".to_string(),
        other => other.to_string(),
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

fn format_tick(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1.0e5 || v.abs() < 1.0e-2) {
        format!("{v:.2e}")
    } else {
        format!("{v:.2}")
    }
}
