//! Synthesize command implementation
//!
//! Reads a color texture, runs the material pipeline, and writes the six maps
//! plus a report into the output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use texmat_backend::png::{self, PngConfig};
use texmat_backend::{synthesize, MapResult, MaterialMaps, TextureBuffer};
use texmat_spec::hash::params_hash;
use texmat_spec::{ReportBuilder, SynthesisParams, SynthesisReport};

use super::json_output::{JsonError, SynthesizeOutput};
use super::resample::resample_maps;
use crate::input::{load_texture, resolve_params, ParamOverrides};

/// Arguments for the synthesize command.
#[derive(Debug, Clone, Copy)]
pub struct SynthesizeArgs<'a> {
    /// Path to the input PNG texture
    pub input: &'a str,
    /// Output directory (default: current directory)
    pub out_dir: Option<&'a str>,
    /// Material name used as file prefix (default: input file stem)
    pub name: Option<&'a str>,
    /// Optional JSON params file
    pub params: Option<&'a str>,
    /// Per-parameter overrides
    pub overrides: &'a ParamOverrides,
    /// Resample every map to N x N before saving
    pub resolution: Option<u32>,
    /// Also write the diffuse map tiled N x N
    pub tile: Option<u32>,
}

/// What a successful run produced.
#[derive(Debug)]
struct Outcome {
    report: SynthesisReport,
    report_path: PathBuf,
    out_dir: PathBuf,
    tile_path: Option<PathBuf>,
}

/// Run the synthesize command
///
/// # Returns
/// Exit code: 0 on success, 1 on failure
pub fn run(args: &SynthesizeArgs<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Run synthesize with human-readable (colored) output
fn run_human(args: &SynthesizeArgs<'_>) -> Result<ExitCode> {
    println!("{} {}", "Synthesizing from:".cyan().bold(), args.input);
    if let Some(params) = args.params {
        println!("{} {}", "Params:".dimmed(), params);
    }

    let outcome = execute(args)?;
    let report = &outcome.report;

    println!(
        "{} {}x{} ({})",
        "Input:".dimmed(),
        report.input_width,
        report.input_height,
        &report.input_hash[..16]
    );

    for map in &report.maps {
        println!(
            "  {} {} ({}x{}, {})",
            "+".green(),
            outcome.out_dir.join(&map.file).display(),
            map.width,
            map.height,
            &map.hash[..16]
        );
    }
    if let Some(tile_path) = &outcome.tile_path {
        println!("  {} {}", "+".green(), tile_path.display());
    }

    println!(
        "\n{} Synthesized {} map(s) in {}ms",
        "SUCCESS".green().bold(),
        report.maps.len(),
        report.duration_ms
    );
    println!(
        "{} {}",
        "Report written to:".dimmed(),
        outcome.report_path.display()
    );

    Ok(ExitCode::SUCCESS)
}

/// Run synthesize with machine-readable JSON output
fn run_json(args: &SynthesizeArgs<'_>) -> Result<ExitCode> {
    let (output, code) = match execute(args) {
        Ok(outcome) => (
            SynthesizeOutput::success(
                outcome.report,
                outcome.report_path.to_string_lossy().to_string(),
            ),
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            SynthesizeOutput::failure(vec![JsonError::from_anyhow(&e).with_file(args.input)]),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

fn execute(args: &SynthesizeArgs<'_>) -> Result<Outcome> {
    let start = Instant::now();

    let params = resolve_params(args.params.map(Path::new), args.overrides)?;
    let input_path = Path::new(args.input);

    let name = material_name(args.name, input_path);
    let out_dir = PathBuf::from(args.out_dir.unwrap_or("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let report_path = out_dir.join(format!("{}.report.json", name));

    let backend_version = format!("texmat-cli v{}", env!("CARGO_PKG_VERSION"));
    let builder =
        ReportBuilder::new(params_hash(&params)?, backend_version).params(params.clone());

    let loaded = match load_texture(input_path) {
        Ok(loaded) => loaded,
        Err(e) => return Err(fail(builder.input_path(args.input), e, start, &report_path)),
    };
    let builder = builder.input(
        args.input,
        loaded.pixel_hash.clone(),
        loaded.texture.width,
        loaded.texture.height,
    );

    log::info!(
        "synthesizing {} ({}x{})",
        input_path.display(),
        loaded.texture.width,
        loaded.texture.height
    );

    let rendered = match render(args, &loaded.texture, &params, &out_dir, &name) {
        Ok(rendered) => rendered,
        Err(e) => return Err(fail(builder, e, start, &report_path)),
    };

    let report = rendered
        .results
        .iter()
        .fold(builder.timings(rendered.maps.timings.clone()), |b, r| {
            b.map(r.to_report(&name))
        })
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();
    write_report(&report, &report_path)?;

    Ok(Outcome {
        report,
        report_path,
        out_dir,
        tile_path: rendered.tile_path,
    })
}

/// Maps written by a successful run.
struct Rendered {
    maps: MaterialMaps,
    results: Vec<MapResult>,
    tile_path: Option<PathBuf>,
}

/// Synthesize, optionally resample, and write every output file.
fn render(
    args: &SynthesizeArgs<'_>,
    texture: &TextureBuffer,
    params: &SynthesisParams,
    out_dir: &Path,
    name: &str,
) -> Result<Rendered> {
    let maps = synthesize(texture, params).context("Synthesis failed")?;

    let maps = match args.resolution {
        Some(size) => resample_maps(&maps, size)
            .with_context(|| format!("Failed to resample maps to {}x{}", size, size))?,
        None => maps,
    };

    let config = PngConfig::default();
    let results = maps
        .save(out_dir, name, &config)
        .with_context(|| format!("Failed to write maps to {}", out_dir.display()))?;

    let tile_path = match args.tile {
        Some(count) => {
            let path = out_dir.join(format!("{}_preview_tiled.png", name));
            let tiled = maps.diffuse.tile(count, count)?;
            png::write_rgb(&tiled, &path, &config)
                .with_context(|| format!("Failed to write tiled preview: {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    Ok(Rendered {
        maps,
        results,
        tile_path,
    })
}

/// Record a failed run in the report file and hand the error back.
fn fail(
    builder: ReportBuilder,
    err: anyhow::Error,
    start: Instant,
    report_path: &Path,
) -> anyhow::Error {
    let code = JsonError::from_anyhow(&err).code;
    let report = builder
        .error(format!("{}: {:#}", code, err))
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();
    if let Err(write_err) = write_report(&report, report_path) {
        log::warn!("could not write failure report: {:#}", write_err);
    }
    err
}

/// Material name from the explicit flag or the input file stem.
fn material_name(explicit: Option<&str>, input: &Path) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "material".to_string())
}

fn write_report(report: &SynthesisReport, path: &Path) -> Result<()> {
    let json = report.to_json_pretty()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use texmat_backend::Color;
    use texmat_spec::{BitDepth, MapKind};

    fn write_input(dir: &Path) -> PathBuf {
        let texture = TextureBuffer::from_fn(24, 24, |x, y| {
            if (x / 6 + y / 6) % 2 == 0 {
                Color::rgb(0.8, 0.6, 0.4)
            } else {
                Color::rgb(0.2, 0.25, 0.3)
            }
        });
        let path = dir.join("tiles.png");
        png::write_rgb(&texture, &path, &PngConfig::default()).unwrap();
        path
    }

    #[test]
    fn test_material_name_defaults_to_stem() {
        assert_eq!(material_name(None, Path::new("a/brick_wall.png")), "brick_wall");
        assert_eq!(material_name(Some("x"), Path::new("a/brick_wall.png")), "x");
    }

    #[test]
    fn test_execute_writes_maps_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let out_dir = dir.path().join("out");
        let overrides = ParamOverrides {
            bit_depth: Some(BitDepth::Four),
            ..Default::default()
        };
        let args = SynthesizeArgs {
            input: input.to_str().unwrap(),
            out_dir: out_dir.to_str(),
            name: None,
            params: None,
            overrides: &overrides,
            resolution: Some(32),
            tile: Some(2),
        };

        let outcome = execute(&args).unwrap();
        assert!(outcome.report.ok);
        assert_eq!(outcome.report.maps.len(), 6);
        assert_eq!(outcome.report.params.bit_depth, BitDepth::Four);
        assert_eq!(outcome.report.input_width, 24);

        for kind in MapKind::ALL {
            let file = out_dir.join(kind.file_name("tiles"));
            assert!(file.exists(), "missing {}", file.display());
            let map = outcome.report.map(kind).unwrap();
            assert_eq!((map.width, map.height), (32, 32));
        }

        let written: SynthesisReport =
            serde_json::from_str(&std::fs::read_to_string(out_dir.join("tiles.report.json")).unwrap())
                .unwrap();
        assert_eq!(written.params_hash, outcome.report.params_hash);
        assert_eq!(written.maps.len(), 6);
        assert_eq!(written.timings.len(), 7);

        let tiled = png::read_texture(&out_dir.join("tiles_preview_tiled.png")).unwrap();
        assert_eq!((tiled.width, tiled.height), (64, 64));
    }

    #[test]
    fn test_execute_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = ParamOverrides::default();
        let missing = dir.path().join("nope.png");
        let args = SynthesizeArgs {
            input: missing.to_str().unwrap(),
            out_dir: dir.path().to_str(),
            name: None,
            params: None,
            overrides: &overrides,
            resolution: None,
            tile: None,
        };
        assert!(execute(&args).is_err());

        let written: SynthesisReport =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("nope.report.json")).unwrap())
                .unwrap();
        assert!(!written.ok);
        assert_eq!(written.input_path.as_deref(), missing.to_str());
        assert!(written.error.unwrap().starts_with("CLI_004"));
    }

    #[test]
    fn test_execute_reports_resample_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let out_dir = dir.path().join("out");
        let overrides = ParamOverrides::default();
        let args = SynthesizeArgs {
            input: input.to_str().unwrap(),
            out_dir: out_dir.to_str(),
            name: Some("bad"),
            params: None,
            overrides: &overrides,
            resolution: Some(0),
            tile: None,
        };

        let err = execute(&args).unwrap_err();
        assert_eq!(JsonError::from_anyhow(&err).code, "TEXMAT_V002");

        let written: SynthesisReport =
            serde_json::from_str(&std::fs::read_to_string(out_dir.join("bad.report.json")).unwrap())
                .unwrap();
        assert!(!written.ok);
        assert_eq!(written.input_width, 24);
        assert!(written.maps.is_empty());
        assert!(written.error.unwrap().starts_with("TEXMAT_V002"));
    }
}
