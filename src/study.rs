use std::{fs, path::PathBuf};

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{PlotError, Result},
    figure::{DistributionGrid, GridLayout, Panel, TrendChart},
    render::Renderer,
    sample::MeasurementTable,
    stat::{mean, MeanMatrix, Violin},
};

/// one comparison over a folder of criterion results
#[derive(Debug, Clone, PartialEq)]
pub struct Study {
    pub folder: String,
    pub sizes: Vec<u64>,
    pub variants: Vec<String>,
    pub overall_fig_name: String,
    pub compare_fig_name: String,
}

/// everything loaded and computed before anything is drawn
#[derive(Debug, Clone)]
pub struct Analysis {
    pub panels: Vec<Panel>,
    pub means: MeanMatrix,
}

#[derive(Debug, Clone)]
pub struct StudyOutcome {
    pub means: MeanMatrix,
    pub compare_path: PathBuf,
    pub overall_path: PathBuf,
}

impl Study {
    pub fn new(
        folder: &str,
        sizes: &[u64],
        variants: &[&str],
        overall_fig_name: &str,
        compare_fig_name: &str,
    ) -> Self {
        Self {
            folder: folder.to_string(),
            sizes: sizes.to_vec(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            overall_fig_name: overall_fig_name.to_string(),
            compare_fig_name: compare_fig_name.to_string(),
        }
    }

    /// load every (size, variant) table, normalize it and collect panels and means
    pub fn analyze(&self, config: &Config) -> Result<Analysis> {
        let mut panels = Vec::with_capacity(self.sizes.len());
        let mut means = MeanMatrix::new(self.variants.len());

        for (index, &size) in self.sizes.iter().enumerate() {
            let mut unit: Option<String> = None;
            let mut violins = Vec::with_capacity(self.variants.len());
            let mut row = Vec::with_capacity(self.variants.len());

            for variant in &self.variants {
                let table =
                    MeasurementTable::load(config.table_path(&self.folder, variant, index))?;

                // the axis unit comes from the first table loaded at this size
                if let Some(expected) = unit.as_deref() {
                    if let Some(found) = table.unit().filter(|found| *found != expected) {
                        warn!(
                            path = %table.path().display(),
                            expected,
                            found,
                            "unit differs from the first table at this size, keeping the first"
                        );
                    }
                } else {
                    let first = table.unit().ok_or_else(|| PlotError::EmptyTable {
                        path: table.path().to_path_buf(),
                    })?;
                    unit = Some(first.to_string());
                }

                let values = table.normalized();
                row.push(mean(&values));
                violins.push((variant.clone(), Violin::new(&values, config.kde_points)));
            }

            debug!(folder = %self.folder, size, means = ?row, "mean per-iteration time");
            means.push_row(&row);

            panels.push(Panel {
                size,
                unit: unit.unwrap_or_default(),
                violins,
            });
        }

        Ok(Analysis { panels, means })
    }

    /// Run the whole study: load, compute, then write the distribution grid
    /// followed by the trend chart.
    ///
    /// Fails on the first missing or malformed table, when the sizes do not
    /// fit the grid, or when the variants outnumber the marker shapes. The
    /// last check happens after the grid image is already written.
    pub fn run<R: Renderer>(&self, config: &Config, renderer: &mut R) -> Result<StudyOutcome> {
        let (rows, cols) = config.grid;
        let layout = GridLayout::new(rows, cols);

        // fail on an oversized grid before reading anything
        layout.slots(self.sizes.len())?;

        info!(
            folder = %self.folder,
            sizes = self.sizes.len(),
            variants = self.variants.len(),
            "running study"
        );

        let Analysis { panels, means } = self.analyze(config)?;

        fs::create_dir_all(&config.output_dir).map_err(|source| PlotError::Io {
            path: config.output_dir.clone(),
            source,
        })?;

        let compare_path = config.figure_path(&self.compare_fig_name);
        let grid = DistributionGrid::new(layout, panels)?;
        renderer.render_distributions(&grid, &compare_path)?;

        let overall_path = config.figure_path(&self.overall_fig_name);
        let trend = TrendChart::new(&self.sizes, &self.variants, &means)?;
        renderer.render_trend(&trend, &overall_path)?;

        Ok(StudyOutcome {
            means,
            compare_path,
            overall_path,
        })
    }
}
