//! Command-line front end: parses parameters, runs one tool and writes its outputs

use crate::algorithm::executor::{EigenMapRequest, Tool, ToolOutput, execute};
use crate::analysis::distribution::{BinomialWeighting, DistributionKind, DistributionSeries};
use crate::io::configuration::{
    DECODED_SUFFIX, DEFAULT_MEAN, DEFAULT_POINT_COUNT, DEFAULT_PROBABILITY, DEFAULT_SEED,
    DEFAULT_SEGMENT_RADIUS, DEFAULT_STD_DEV, DEFAULT_STEP, DEFAULT_TRIALS, ENCODED_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter, require_finite};
use crate::io::image::{density_heatmap, load_rgb_image, save_image};
use crate::io::progress::ProgressSpinner;
use crate::io::report::render_report;
use crate::math::linear_map::LinearMap2D;
use crate::spatial::points::{PointCloud, PointGeneration, PointPattern, PointSampler};
use crate::spatial::viewport::Viewport;
use clap::{Parser, Subcommand};
use nalgebra::Point2;
use std::path::{Path, PathBuf};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "eigenscope")]
#[command(
    author,
    version,
    about = "Eigen maps, covariance axes, image PCA and density sweeps"
)]
/// Command-line arguments shared by every tool
pub struct Cli {
    /// Log intermediate values
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Tool to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// The four tools
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Eigen-decompose a 2x2 matrix and map the unit lattice
    Eigen {
        /// Matrix entries by (row, column); defaults to [[2, 3], [2, 1]]
        #[arg(
            short,
            long,
            num_args = 4,
            value_names = ["M00", "M10", "M01", "M11"],
            allow_negative_numbers = true
        )]
        matrix: Option<Vec<f64>>,

        /// Point whose image is reported
        #[arg(
            short,
            long,
            num_args = 2,
            value_names = ["X", "Y"],
            allow_negative_numbers = true
        )]
        probe: Option<Vec<f64>>,
    },
    /// Generate a point cloud and report its covariance
    Covariance {
        /// Points in the first batch
        #[arg(short, long, default_value_t = DEFAULT_POINT_COUNT)]
        count: usize,

        /// Scatter the first batch along this segment instead of the whole viewport
        #[arg(
            short,
            long,
            num_args = 4,
            value_names = ["X0", "Y0", "X1", "Y1"],
            allow_negative_numbers = true
        )]
        line: Option<Vec<f64>>,

        /// Maximum perpendicular jitter around the segment
        #[arg(short, long, default_value_t = DEFAULT_SEGMENT_RADIUS, allow_negative_numbers = true)]
        radius: f64,

        /// Uniform points appended after the first batch
        #[arg(short, long, default_value_t = 0)]
        append_uniform: usize,

        /// Random seed for reproducible clouds
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Compress an image onto its principal color axis
    Pca {
        /// Input image in any format the image crate reads
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Directory for the encoded and decoded PNGs; defaults to the input's directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Sweep a closed-form density
    Distribution {
        /// Density to sweep
        #[command(subcommand)]
        kind: DistributionCommands,
    },
}

/// Density sweeps
#[derive(Subcommand, Debug)]
pub enum DistributionCommands {
    /// Binomial terms p^i (1-p)^(n-i) for i = 0..=n
    Bernoulli {
        /// Success probability
        #[arg(short, long, default_value_t = DEFAULT_PROBABILITY)]
        probability: f64,

        /// Number of trials
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,

        /// Multiply by C(n, i) to get the binomial probability mass
        #[arg(short, long)]
        coefficient: bool,
    },
    /// Normal density over [-10, 10]
    Normal {
        /// Mean
        #[arg(short, long, default_value_t = DEFAULT_MEAN, allow_negative_numbers = true)]
        mean: f64,

        /// Standard deviation
        #[arg(short = 'd', long, default_value_t = DEFAULT_STD_DEV)]
        std_dev: f64,

        /// Sweep resolution
        #[arg(short, long, default_value_t = DEFAULT_STEP)]
        step: f64,
    },
    /// Isotropic bivariate normal density over [-10, 10]²
    Normal2d {
        /// Standard deviation on both axes
        #[arg(short = 'd', long, default_value_t = DEFAULT_STD_DEV)]
        std_dev: f64,

        /// Grid resolution
        #[arg(short, long, default_value_t = DEFAULT_STEP)]
        step: f64,

        /// Write the normalized field as a grayscale PNG
        #[arg(long)]
        heatmap: Option<PathBuf>,
    },
}

impl Commands {
    /// Build the tool request, loading the input image for PCA
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A matrix entry or probe coordinate is not finite
    /// - The point-generation parameters are invalid
    /// - The PCA input image cannot be loaded
    pub fn to_tool(&self) -> Result<Tool> {
        match self {
            Self::Eigen { matrix, probe } => Ok(Tool::EigenMap(EigenMapRequest {
                map: matrix
                    .as_deref()
                    .map_or_else(|| Ok(LinearMap2D::default()), map_from_entries)?,
                probe: probe.as_deref().map(point_from_values).transpose()?,
                viewport: Viewport::default(),
            })),
            Self::Covariance {
                count,
                line,
                radius,
                append_uniform,
                seed,
            } => {
                let pattern = match line.as_deref() {
                    Some(&[x0, y0, x1, y1]) => PointPattern::Segment {
                        start: Point2::new(x0, y0),
                        end: Point2::new(x1, y1),
                        radius: *radius,
                    },
                    Some(values) => {
                        return Err(invalid_parameter(
                            "line",
                            &format!("{values:?}"),
                            &"expected four coordinates",
                        ));
                    }
                    None => PointPattern::Uniform,
                };
                let batches = [
                    PointGeneration {
                        count: *count,
                        append: false,
                        pattern,
                    },
                    PointGeneration {
                        count: *append_uniform,
                        append: true,
                        pattern: PointPattern::Uniform,
                    },
                ];
                Ok(Tool::Covariance(generate_cloud(&batches, *seed)?))
            }
            Self::Pca { image, .. } => load_rgb_image(image).map(Tool::Pca),
            Self::Distribution { kind } => Ok(Tool::Distribution(kind.to_kind())),
        }
    }
}

impl DistributionCommands {
    /// Parameters of the selected density
    pub const fn to_kind(&self) -> DistributionKind {
        match *self {
            Self::Bernoulli {
                probability,
                trials,
                coefficient,
            } => DistributionKind::Bernoulli {
                probability,
                trials,
                weighting: if coefficient {
                    BinomialWeighting::Coefficient
                } else {
                    BinomialWeighting::SequenceLikelihood
                },
            },
            Self::Normal {
                mean,
                std_dev,
                step,
            } => DistributionKind::Normal {
                mean,
                std_dev,
                step,
            },
            Self::Normal2d { std_dev, step, .. } => DistributionKind::Normal2D { std_dev, step },
        }
    }
}

/// Run batches of point generation against one seeded sampler
///
/// # Errors
///
/// Returns an error if any batch has invalid segment parameters
pub fn generate_cloud(batches: &[PointGeneration], seed: u64) -> Result<PointCloud> {
    let viewport = Viewport::default();
    let mut sampler = PointSampler::new(seed);
    let mut cloud = PointCloud::new();
    for batch in batches {
        cloud.generate(batch, &mut sampler, &viewport)?;
    }
    Ok(cloud)
}

fn map_from_entries(entries: &[f64]) -> Result<LinearMap2D> {
    match *entries {
        [m00, m10, m01, m11] => Ok(LinearMap2D::from_entries(
            require_finite("matrix", m00)?,
            require_finite("matrix", m10)?,
            require_finite("matrix", m01)?,
            require_finite("matrix", m11)?,
        )),
        _ => Err(invalid_parameter(
            "matrix",
            &format!("{entries:?}"),
            &"expected four entries",
        )),
    }
}

fn point_from_values(values: &[f64]) -> Result<Point2<f64>> {
    match *values {
        [x, y] => Ok(Point2::new(
            require_finite("probe", x)?,
            require_finite("probe", y)?,
        )),
        _ => Err(invalid_parameter(
            "probe",
            &format!("{values:?}"),
            &"expected two coordinates",
        )),
    }
}

/// Install the stderr log subscriber: INFO by default, DEBUG when verbose
pub fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    // Keeps a subscriber installed earlier by an embedding caller
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        debug!("log subscriber already installed");
    }
}

/// Run the selected tool, write its image outputs and print the report
///
/// # Errors
///
/// Returns an error if the tool rejects its parameters or an output file
/// cannot be written
pub fn run(cli: &Cli) -> Result<()> {
    let tool = cli.command.to_tool()?;
    debug!(tool = tool.name(), "running");

    let spinner = ProgressSpinner::start(
        &format!("running {}", tool.name()),
        cli.should_show_progress() && matches!(tool, Tool::Pca(_)),
    );
    let result = execute(&tool).and_then(|output| {
        spinner.set_stage(&format!("writing {} outputs", tool.name()));
        write_outputs(&cli.command, &output).map(|()| output)
    });
    spinner.finish();
    let output = result?;

    // Allow print for the report, which is the command's primary output
    #[allow(clippy::print_stdout)]
    {
        println!("{}", render_report(&output));
    }
    Ok(())
}

fn write_outputs(command: &Commands, output: &ToolOutput) -> Result<()> {
    match (command, output) {
        (Commands::Pca { image, output_dir }, ToolOutput::Pca(round_trip)) => {
            let directory = output_dir.as_deref();
            save_image(
                &round_trip.encoding.grayscale,
                &output_path(image, directory, ENCODED_SUFFIX),
            )?;
            save_image(
                &round_trip.reconstruction,
                &output_path(image, directory, DECODED_SUFFIX),
            )
        }
        (
            Commands::Distribution {
                kind:
                    DistributionCommands::Normal2d {
                        heatmap: Some(path),
                        ..
                    },
            },
            ToolOutput::Distribution(DistributionSeries::Surface(surface)),
        ) => save_image(&density_heatmap(&surface.field)?, path),
        _ => Ok(()),
    }
}

/// `<stem><suffix>.png` next to the input, or inside `output_dir` when given
pub fn output_path(input_path: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{suffix}.png", stem.to_string_lossy());

    match output_dir.or_else(|| input_path.parent()) {
        Some(parent) => parent.join(output_name),
        None => PathBuf::from(output_name),
    }
}
