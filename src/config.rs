use std::path::{Path, PathBuf};

pub const CRITERION_ROOT: &str = "target/criterion";

/// where tables are read from, where figures go, and how big they are
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub criterion_root: PathBuf,
    pub output_dir: PathBuf,
    pub grid: (usize, usize), // (rows, cols)
    pub compare_size: (u32, u32),
    pub overall_size: (u32, u32),
    pub kde_points: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            criterion_root: PathBuf::from(CRITERION_ROOT),
            output_dir: PathBuf::from(CRITERION_ROOT),
            grid: (3, 2),
            compare_size: (1200, 1600),
            overall_size: (1000, 800),
            kde_points: 100,
        }
    }
}

impl Config {
    /// both tables and figures live under `root`
    pub fn rooted_at<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();

        Self {
            criterion_root: root.to_path_buf(),
            output_dir: root.to_path_buf(),
            ..Self::default()
        }
    }

    /// `<root>/<folder>/<variant>/<index>/base/raw.csv`
    pub fn table_path(&self, folder: &str, variant: &str, index: usize) -> PathBuf {
        self.criterion_root
            .join(folder)
            .join(variant)
            .join(index.to_string())
            .join("base")
            .join("raw.csv")
    }

    pub fn figure_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{}.png", stem))
    }
}
