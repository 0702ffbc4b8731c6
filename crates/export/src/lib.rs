//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

const RESULT_COLUMNS: &str = "mass_kg,kinetic_energy_joules,impact_energy_joules,energy_equivalent_kt_tnt,crater_diameter_meters,shockwave_radius_meters";

fn write_result_columns(
    writer: &mut dyn Write,
    result: &impact_physics::ImpactResult,
) -> io::Result<()> {
    write!(
        writer,
        "{:e},{:e},{:e},{:.6},{:.3},{:.3}",
        result.mass_kg,
        result.kinetic_energy_joules,
        result.impact_energy_joules,
        result.energy_equivalent_kt_tnt,
        result.crater_diameter_meters,
        result.shockwave_radius_meters,
    )
}

/// Tables of named results (one row per impactor).
pub mod results {
    use std::io::{self, Write};

    use impact_physics::{AsteroidParameters, ImpactResult};

    /// Header row for [`Record`].
    pub fn header() -> String {
        format!(
            "name,radius_m,density_kg_m3,speed_m_s,entry_angle_deg,{}",
            super::RESULT_COLUMNS
        )
    }

    /// CSV row emitted by the results exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub name: &'a str,
        pub params: &'a AsteroidParameters,
        pub result: &'a ImpactResult,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching [`header`] ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            write!(
                writer,
                "{},{},{},{},{},",
                csv_field(self.name),
                self.params.radius_m,
                self.params.density_kg_m3,
                self.params.speed_m_s,
                self.params.entry_angle_deg,
            )?;
            super::write_result_columns(writer, self.result)?;
            writeln!(writer)
        }
    }

    /// Write a header followed by every record.
    pub fn write_csv(writer: &mut dyn Write, records: &[Record<'_>]) -> io::Result<()> {
        writeln!(writer, "{}", header())?;
        for record in records {
            record.write_to(writer)?;
        }
        writer.flush()
    }

    fn csv_field(value: &str) -> String {
        if value.contains([',', '"', '\n']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

/// Sweep tables: the varied parameter followed by the result columns.
pub mod sweep {
    use std::io::{self, Write};

    use impact_physics::sweep::{SweepAxis, SweepPoint};

    /// Header row for a sweep over `axis`.
    pub fn header(axis: SweepAxis) -> String {
        format!("{},{}", axis.column(), super::RESULT_COLUMNS)
    }

    /// Write a sweep with its header.
    pub fn write_csv(
        writer: &mut dyn Write,
        axis: SweepAxis,
        points: &[SweepPoint],
    ) -> io::Result<()> {
        writeln!(writer, "{}", header(axis))?;
        for point in points {
            write!(writer, "{},", point.value)?;
            super::write_result_columns(writer, &point.result)?;
            writeln!(writer)?;
        }
        writer.flush()
    }
}

/// JSON sidecars describing a single simulation.
pub mod json {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use impact_physics::{AsteroidParameters, ImpactResult};

    #[derive(Serialize)]
    struct Sidecar<'a> {
        name: &'a str,
        parameters: &'a AsteroidParameters,
        result: &'a ImpactResult,
        energy_equivalent_mt_tnt: f64,
        damage_rings: Vec<Ring<'a>>,
    }

    #[derive(Serialize)]
    struct Ring<'a> {
        label: &'a str,
        radius_m: f64,
    }

    /// Write a pretty-printed JSON description of one simulation.
    pub fn write_result(
        path: &Path,
        name: &str,
        params: &AsteroidParameters,
        result: &ImpactResult,
    ) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rings = result.damage_rings();
        let sidecar = Sidecar {
            name,
            parameters: params,
            result,
            energy_equivalent_mt_tnt: result.energy_equivalent_mt_tnt(),
            damage_rings: rings
                .iter()
                .map(|ring| Ring {
                    label: ring.label,
                    radius_m: ring.radius_m,
                })
                .collect(),
        };
        to_writer_pretty(File::create(path)?, &sidecar)?;
        Ok(())
    }
}
