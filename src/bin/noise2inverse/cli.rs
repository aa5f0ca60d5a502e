/// Command line interface for `noise2inverse` executable
#[derive(clap::Parser, Debug, Clone)]
#[clap(
    name = "noise2inverse",
    about = "Ramp filtering and self-supervised training pairs for tomography",
)]
pub (super) struct Cli {
    /// Maximum number of rayon threads [default: from config, or 4]
    #[clap(short = 'j', long)]
    pub threads: Option<usize>,

    #[clap(subcommand)]
    pub (super) command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub (super) enum Command {

    /// Print the taps of the spatial Ram-Lak kernel of length N
    Kernel {
        n: usize,
    },

    /// Ramp-filter a raw f32 sinogram
    Filter {
        /// Sinogram dimensions: slices,angles,pixels
        #[clap(short, long, value_parser = parse_triplet::<usize>)]
        shape: (usize, usize, usize),

        /// Raw f32 sinogram
        input: PathBuf,

        /// Where to write the filtered sinogram
        output: PathBuf,
    },

    /// Partition the angles of a raw f32 sinogram into interleaved splits
    Split {
        /// Sinogram dimensions: slices,angles,pixels
        #[clap(short, long, value_parser = parse_triplet::<usize>)]
        shape: (usize, usize, usize),

        /// Number of splits
        #[clap(short, long, default_value = "4")]
        n: usize,

        /// Raw f32 sinogram
        input: PathBuf,

        /// Directory receiving `split_K.raw` files
        #[clap(short, long)]
        out: PathBuf,
    },

    /// Write every (input, target) training pair made from reconstructed splits
    Pairs {
        /// TOML file describing the splits and strategy
        #[clap(short, long)]
        config: PathBuf,

        /// Directory receiving `input_NNNNN.raw` and `target_NNNNN.raw` files
        #[clap(short, long)]
        out: PathBuf,
    },
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::PathBuf;
use noise2inverse::utils::parse_triplet;
