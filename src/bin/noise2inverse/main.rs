mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let mut progress = Progress::new();

    match args.command {
        Command::Kernel { n } => {
            for (j, tap) in build_kernel(n).iter().enumerate() {
                println!("{j:6} {tap:+.12e}");
            }
        }

        Command::Filter { shape, input, output } => {
            set_threads(args.threads.unwrap_or(4));
            progress.start(&format!("Reading sinogram {shape:?} from {}", input.display()));
            let sino = read_array3(&input, shape)?;
            progress.done();

            progress.start("Ramp filtering");
            let filtered = ramp::apply(&sino)?;
            progress.done();

            ensure_parent_exists(&output)?;
            progress.start(&format!("Writing {}", output.display()));
            write_array3(&output, &filtered)?;
            progress.done();
        }

        Command::Split { shape, n, input, out } => {
            progress.start(&format!("Reading sinogram {shape:?} from {}", input.display()));
            let sino = read_array3(&input, shape)?;
            progress.done();

            create_dir_all(&out)?;
            for (k, split) in split_angles(&sino, n)?.iter().enumerate() {
                let path = out.join(format!("split_{k}.raw"));
                progress.start(&format!("Writing {} angles to {}", split.dim().1, path.display()));
                write_array3(&path, split)?;
                progress.done();
            }
        }

        Command::Pairs { config, out } => {
            let config = read_config_file(&config)?;
            set_threads(args.threads.unwrap_or(config.threads));

            progress.start(&format!("Loading {} splits", config.splits.len()));
            let volumes = config.load_splits()?;
            progress.done();

            let pairs = SplitPairs::new(volumes, config.strategy)?;
            println!("Strategy {}: {} slices x {} splits = {} pairs",
                     pairs.strategy(), pairs.num_slices(), pairs.num_splits(), group_digits(pairs.len()));
            for (p, (i, t)) in pairs.input_idxs().iter().zip(pairs.target_idxs()).enumerate() {
                println!("    split position {p}: input {i:?} target {t:?}");
            }

            create_dir_all(&out)?;
            progress.startln(&format!("Writing pairs to {}", out.display()));
            write_pairs(&pairs, &out)?;
            progress.done_with_message("Wrote all pairs");
        }
    }
    Ok(())
}

fn write_pairs(pairs: &SplitPairs<Volume>, out: &Path) -> noise2inverse::Result<()> {
    let bar = ProgressBar::new(pairs.len() as u64);
    bar.set_style(ProgressStyle::default_bar()
                  .template("[{elapsed_precise}] {wide_bar} {pos}/{len} ({eta_precise})")
                  .unwrap_or_else(|_| ProgressStyle::default_bar()));

    (0..pairs.len()).into_par_iter().try_for_each(|i| -> noise2inverse::Result<()> {
        let (input, target) = pairs.get(i)?;
        raw::write(input .iter().copied(), &out.join(format!( "input_{i:05}.raw")))?;
        raw::write(target.iter().copied(), &out.join(format!("target_{i:05}.raw")))?;
        bar.inc(1);
        Ok(())
    })?;
    bar.finish();
    Ok(())
}

fn set_threads(n: usize) {
    // Set the maximum number of threads used by rayon for parallel iteration
    match rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
        Err(e) => println!("{}", e),
        Ok(_)  => println!("Using up to {} threads.", n),
    }
}

fn ensure_parent_exists(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => create_dir_all(dir),
        _ => Ok(()),
    }
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::{
    error::Error,
    fs::create_dir_all,
    path::Path,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use cli::{Cli, Command};
use noise2inverse::{
    SplitPairs, Volume,
    config::pairs::read_config_file,
    io::raw::{self, read_array3, write_array3},
    ramp::{self, build_kernel},
    sinogram::split_angles,
    utils::{group_digits, timing::Progress},
};
