//! Application related stuff

use clap::{Parser, ValueEnum};

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// Sampler used for the integrator's sample dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SamplerType {
    /// Stratified sample tables shuffled per pixel.
    Stratified,

    /// Independent uniform random samples.
    Random,
}

/// Light transport algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IntegratorType {
    /// Path tracing with Russian roulette.
    Path,

    /// Emitted light plus direct lighting at the first hit only.
    Direct,
}

/// Reconstruction filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterType {
    /// Samples spread uniformly over the pixel.
    Box,

    /// Samples concentrated towards the pixel center.
    Triangle,
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for rendering."
    )]
    n_threads: usize,

    /// Automatically reduce a number of quality settings to render more quickly.
    #[arg(
        long = "quick",
        help = "Automatically reduce a number of quality settings to render more quickly."
    )]
    pub quick_render: bool,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "cornell_box.png",
        help = "Write the final image to the given filename (.png, .tga, .exr or .ppm)."
    )]
    pub image_file: String,

    /// Image width and height in pixels.
    #[arg(
        long = "resolution",
        short = 'r',
        value_name = "NUM",
        default_value_t = 256,
        help = "Width and height of the square image in pixels."
    )]
    pub resolution: usize,

    /// Number of strata in x.
    #[arg(
        long = "xsamples",
        value_name = "NUM",
        default_value_t = 8,
        help = "Number of pixel sample strata in x."
    )]
    pub x_samples: usize,

    /// Number of strata in y.
    #[arg(
        long = "ysamples",
        value_name = "NUM",
        default_value_t = 8,
        help = "Number of pixel sample strata in y."
    )]
    pub y_samples: usize,

    /// Maximum number of bounces.
    #[arg(
        long = "maxdepth",
        value_name = "NUM",
        default_value_t = 5,
        help = "Maximum number of bounces per path."
    )]
    pub max_depth: usize,

    /// Sampler type.
    #[arg(long, value_enum, default_value_t = SamplerType::Stratified)]
    pub sampler: SamplerType,

    /// Disable jittering of stratified samples.
    #[arg(long = "nojitter", help = "Place stratified samples at the stratum centers.")]
    pub no_jitter: bool,

    /// Integrator type.
    #[arg(long, value_enum, default_value_t = IntegratorType::Path)]
    pub integrator: IntegratorType,

    /// Filter type.
    #[arg(long, value_enum, default_value_t = FilterType::Box)]
    pub filter: FilterType,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Base random sequence.
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 0,
        help = "Base sequence for the samplers' random number generators."
    )]
    pub seed: u64,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the number of strata in x and y. Quick renders take a single
    /// sample per pixel.
    pub fn pixel_samples(&self) -> (usize, usize) {
        if self.quick_render {
            (1, 1)
        } else {
            (self.x_samples, self.y_samples)
        }
    }

    /// Checks the options that have no sensible fallback.
    pub fn validate(&self) -> Result<(), String> {
        if self.resolution == 0 {
            return Err("Resolution must be positive".to_string());
        }
        if self.x_samples == 0 || self.y_samples == 0 {
            return Err(format!(
                "Invalid number of pixel samples {}x{}",
                self.x_samples, self.y_samples
            ));
        }
        if self.max_depth == 0 {
            return Err("Maximum depth must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_cornell_box() {
        let options = Options::parse_from(["lux"]);
        assert_eq!(options.image_file, "cornell_box.png");
        assert_eq!(options.resolution, 256);
        assert_eq!(options.pixel_samples(), (8, 8));
        assert_eq!(options.max_depth, 5);
        assert_eq!(options.sampler, SamplerType::Stratified);
        assert_eq!(options.integrator, IntegratorType::Path);
        assert_eq!(options.filter, FilterType::Box);
        assert_eq!(options.threads(), 1);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn quick_render_takes_one_sample() {
        let options = Options::parse_from(["lux", "--quick", "--xsamples", "4"]);
        assert_eq!(options.pixel_samples(), (1, 1));
    }

    #[test]
    fn value_enums_parse() {
        let options = Options::parse_from([
            "lux",
            "--sampler",
            "random",
            "--integrator",
            "direct",
            "--filter",
            "triangle",
            "-t",
            "0",
        ]);
        assert_eq!(options.sampler, SamplerType::Random);
        assert_eq!(options.integrator, IntegratorType::Direct);
        assert_eq!(options.filter, FilterType::Triangle);
        assert_eq!(options.threads(), 1);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let options = Options::parse_from(["lux", "-r", "0"]);
        assert!(options.validate().is_err());
    }
}
