//! Configuration file parser for training pair generation

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::io::raw::read_array3;
use crate::strategy::Strategy;
use crate::types::Volume;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// `"X:1"` / `"many-to-one"` or `"1:X"` / `"one-to-many"`
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,

    /// `(num_slices, rows, columns)` of every split volume
    pub shape: (usize, usize, usize),

    /// Raw `f32` volume files, one per split. Relative paths are taken
    /// relative to the directory containing the config file.
    pub splits: Vec<PathBuf>,

    /// Maximum number of rayon threads
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_strategy() -> Strategy { Strategy::ManyToOne }
fn default_threads () -> usize    { 4 }

impl Config {

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| Error::configuration(e.to_string()))?;
        if config.splits.len() < 2 {
            return Err(Error::configuration(format!(
                "at least 2 split files are required, got {}", config.splits.len())));
        }
        Ok(config)
    }

    /// Load every split volume, checking each against `shape`
    pub fn load_splits(&self) -> Result<Vec<Volume>> {
        self.splits.iter()
            .map(|path| read_array3(path, self.shape))
            .collect()
    }

    fn relative_to(mut self, dir: &Path) -> Self {
        for path in self.splits.iter_mut() {
            if path.is_relative() { *path = dir.join(&*path) }
        }
        self
    }
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::configuration(format!("couldn't read config file `{}`: {e}", path.display())))?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(Config::from_toml(&text)?.relative_to(dir))
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use tempfile::tempdir;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    // ----- Test the example on-disk config file -------------------------------------
    #[test]
    fn test_config_file() {
        let config = read_config_file(Path::new("pairs-config.toml")).unwrap();
        assert_eq!(config.strategy, Strategy::ManyToOne);
        assert_eq!(config.shape, (512, 256, 256));
        assert_eq!(config.threads, 8);
        assert_eq!(config.splits.len(), 4);
        assert_eq!(config.splits[0], PathBuf::from("data/splits/split_0.raw"));
    }

    //  ---  Macro for concise assertions about values of parsed fields ------------------
    macro_rules! check {
        ($text:expr => $($field:ident = $expected:expr);+$(;)?) => {
            let config = Config::from_toml($text).unwrap();
            println!("DESERIALIZED: {config:?}");
            $(assert_eq!(config.$field, $expected);)*
        }
    }

    const TWO_SPLITS: &str = r#"
        shape = [1, 2, 3]
        splits = ["a.raw", "b.raw"]
    "#;

    #[test]
    fn defaults() {
        check!{TWO_SPLITS =>
               strategy = Strategy::ManyToOne;
               threads  = 4;
               shape    = (1, 2, 3);
        }
    }

    #[test]
    fn strategy_literals() {
        check!{&format!("strategy = \"1:X\"\n{TWO_SPLITS}")         => strategy = Strategy::OneToMany}
        check!{&format!("strategy = \"one-to-many\"\n{TWO_SPLITS}") => strategy = Strategy::OneToMany}
        check!{&format!("strategy = \"X:1\"\n{TWO_SPLITS}")         => strategy = Strategy::ManyToOne}
    }

    #[test]
    fn reject_unknown_strategy() {
        let text = format!("strategy = \"2:2\"\n{TWO_SPLITS}");
        assert!(matches!(Config::from_toml(&text), Err(Error::Configuration(_))));
    }

    // ----- Make sure that unknown fields are not accepted -----------------------------
    #[test]
    fn reject_unknown_field() {
        let text = format!("unknown_field = 666\n{TWO_SPLITS}");
        assert!(matches!(Config::from_toml(&text), Err(Error::Configuration(_))));
    }

    #[test]
    fn reject_single_split() {
        let text = "shape = [1, 2, 3]\nsplits = [\"a.raw\"]";
        assert!(matches!(Config::from_toml(text), Err(Error::Configuration(_))));
    }

    #[test]
    fn missing_file() {
        let result = read_config_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    // ----- Loading the volumes named in a config file --------------------------------
    #[test]
    fn load_splits_relative_to_config() -> Result<()> {
        let dir = tempdir()?;
        for s in 0..3 {
            let volume = Array3::from_elem((2, 2, 2), s as f32);
            crate::io::raw::write_array3(&dir.path().join(format!("s{s}.raw")), &volume)?;
        }
        let config_path = dir.path().join("job.toml");
        fs::write(&config_path, r#"
            strategy = "1:X"
            shape = [2, 2, 2]
            splits = ["s0.raw", "s1.raw", "s2.raw"]
        "#)?;

        let config = read_config_file(&config_path)?;
        let volumes = config.load_splits()?;
        assert_eq!(volumes.len(), 3);
        assert!(volumes[2].iter().all(|&x| x == 2.0));
        Ok(())
    }
}
