use crate::{
    error::{PlotError, Result},
    stat::{MeanMatrix, Violin},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Star,
    Triangle,
}

/// shapes handed to trend lines, in variant order
pub static MARKERS: [Marker; 3] = [Marker::Circle, Marker::Star, Marker::Triangle];

/// five-pointed star around (0, 0) in pixel offsets, tips at `radius`, first tip pointing up
pub fn star_outline(radius: i32) -> Vec<(i32, i32)> {
    let inner = f64::from(radius) * 0.4;

    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { f64::from(radius) } else { inner };
            let angle = std::f64::consts::PI * (i as f64 / 5. - 0.5);
            ((r * angle.cos()).round() as i32, (r * angle.sin()).round() as i32)
        })
        .collect()
}

impl Marker {
    /// one marker per variant, failing when the variants outnumber the shapes
    pub fn assign(variants: usize) -> Result<&'static [Marker]> {
        MARKERS
            .get(..variants)
            .ok_or(PlotError::MarkerOverflow {
                variants,
                markers: MARKERS.len(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Populated(usize), // index into the panels
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// row-major slots for `panels` panels, the tail left hidden
    pub fn slots(&self, panels: usize) -> Result<Vec<Slot>> {
        if panels > self.capacity() {
            return Err(PlotError::GridOverflow {
                sizes: panels,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok((0..self.capacity())
            .map(|i| if i < panels { Slot::Populated(i) } else { Slot::Hidden })
            .collect())
    }
}

/// one violin per variant at a single tree size
#[derive(Debug, Clone)]
pub struct Panel {
    pub size: u64,
    pub unit: String,
    pub violins: Vec<(String, Violin)>,
}

impl Panel {
    pub fn title(&self) -> String {
        format!("Tree Size = {}", self.size)
    }

    pub fn y_label(&self) -> String {
        format!("time({})", self.unit)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.violins.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// (low, high) over every non-empty violin
    pub fn y_range(&self) -> Option<(f64, f64)> {
        bounds(
            self.violins
                .iter()
                .filter_map(|(_, violin)| violin.extent())
                .flat_map(|(low, high)| vec![low, high]),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DistributionGrid {
    pub layout: GridLayout,
    pub slots: Vec<Slot>,
    pub panels: Vec<Panel>,
}

impl DistributionGrid {
    pub fn new(layout: GridLayout, panels: Vec<Panel>) -> Result<Self> {
        let slots = layout.slots(panels.len())?;

        Ok(Self {
            layout,
            slots,
            panels,
        })
    }

    pub fn populated(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Populated(_)))
            .count()
    }

    pub fn hidden(&self) -> usize {
        self.slots.len() - self.populated()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub label: String,
    pub marker: Marker,
    pub means: Vec<f64>, // one per size, in size order
}

impl TrendLine {
    /// maximal runs of finite points as (size-index, mean); a non-finite mean breaks the line
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for (i, &mean) in self.means.iter().enumerate() {
            if mean.is_finite() {
                current.push((i as f64, mean));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// mean time per variant against evenly spaced size labels
#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub sizes: Vec<u64>,
    pub lines: Vec<TrendLine>,
}

impl TrendChart {
    pub const X_LABEL: &'static str = "Tree Size";
    pub const Y_LABEL: &'static str = "Time(ns)";

    pub fn new<S: AsRef<str>>(sizes: &[u64], variants: &[S], means: &MeanMatrix) -> Result<Self> {
        let markers = Marker::assign(variants.len())?;

        let lines = variants
            .iter()
            .zip(markers)
            .enumerate()
            .map(|(i, (label, &marker))| TrendLine {
                label: label.as_ref().to_string(),
                marker,
                means: means.column(i),
            })
            .collect();

        Ok(Self {
            sizes: sizes.to_vec(),
            lines,
        })
    }

    /// (low, high) over every finite mean
    pub fn y_range(&self) -> Option<(f64, f64)> {
        bounds(self.lines.iter().flat_map(|line| line.means.iter().copied()))
    }

    /// label for the tick at `x`, empty between sizes
    pub fn tick_label(&self, x: f64) -> String {
        tick_label(&self.sizes, x)
    }
}

/// the label of the slot nearest to `x`, empty when `x` sits between slots
pub fn tick_label<T: ToString>(labels: &[T], x: f64) -> String {
    let idx = x.round();
    if idx < 0. || (x - idx).abs() > 0.3 {
        return String::new();
    }

    labels
        .get(idx as usize)
        .map(|label| label.to_string())
        .unwrap_or_default()
}

fn bounds<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((low, high)) => Some((f64::min(low, v), f64::max(high, v))),
        })
}
