use std::f64::consts::PI;

/// arithmetic mean, NaN for an empty slice; non-finite values propagate
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }

    data.iter().sum::<f64>() / data.len() as f64
}

/// median of the finite values, NaN if there is none
pub fn median(data: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }

    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.
    } else {
        sorted[mid]
    }
}

/// sample standard deviation (ddof = 1)
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.;
    }

    let avg = mean(data);
    let var = data.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / (data.len() - 1) as f64;

    var.sqrt()
}

/// Gaussian kernel density estimate with Scott's bandwidth rule.
#[derive(Debug, Clone)]
pub struct GaussianKde<'a> {
    data: &'a [f64],
    bandwidth: f64,
}

impl<'a> GaussianKde<'a> {
    /// None when the data has no spread to estimate from
    pub fn new(data: &'a [f64]) -> Option<Self> {
        let factor = (data.len() as f64).powf(-1. / 5.);
        let bandwidth = std_dev(data) * factor;

        if bandwidth > 0. && bandwidth.is_finite() {
            Some(Self { data, bandwidth })
        } else {
            None
        }
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn density(&self, x: f64) -> f64 {
        let norm = self.data.len() as f64 * self.bandwidth * (2. * PI).sqrt();

        self.data
            .iter()
            .map(|xi| {
                let z = (x - xi) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            / norm
    }
}

/// outline of one violin: densities evaluated over [min, max] of the sample
#[derive(Debug, Clone, PartialEq)]
pub struct Violin {
    pub coords: Vec<f64>,
    pub densities: Vec<f64>,
    pub median: f64,
    pub mean: f64,
}

impl Violin {
    pub fn new(samples: &[f64], points: usize) -> Self {
        // the outline is drawn from finite values only, the mean still sees everything
        let finite: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        let median = median(&finite);
        let mean = mean(samples);

        if finite.is_empty() {
            return Self {
                coords: Vec::new(),
                densities: Vec::new(),
                median,
                mean,
            };
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let kde = match GaussianKde::new(&finite) {
            Some(kde) => kde,
            None => {
                // every sample is the same value: a flat bar
                return Self {
                    coords: vec![min],
                    densities: vec![1.],
                    median,
                    mean,
                };
            }
        };

        let coords = linspace(min, max, points.max(2));
        let densities = coords.iter().map(|&x| kde.density(x)).collect();

        Self {
            coords,
            densities,
            median,
            mean,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0., f64::max)
    }

    /// (low, high) of the outline, None for an empty violin
    pub fn extent(&self) -> Option<(f64, f64)> {
        Some((*self.coords.first()?, *self.coords.last()?))
    }
}

pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// means indexed by [size-index][variant-index], filled one size at a time
#[derive(Debug, Clone, PartialEq)]
pub struct MeanMatrix {
    sizes: usize,
    variants: usize,
    values: Vec<f64>,
}

impl MeanMatrix {
    pub fn new(variants: usize) -> Self {
        Self {
            sizes: 0,
            variants,
            values: Vec::new(),
        }
    }

    /// append the means of the next size, one per variant
    pub fn push_row(&mut self, row: &[f64]) {
        assert_eq!(
            row.len(),
            self.variants,
            "a mean row must hold one value per variant"
        );
        self.values.extend_from_slice(row);
        self.sizes += 1;
    }

    /// (sizes, variants)
    pub fn shape(&self) -> (usize, usize) {
        (self.sizes, self.variants)
    }

    pub fn get(&self, size: usize, variant: usize) -> Option<f64> {
        if variant >= self.variants {
            return None;
        }

        self.values.get(size * self.variants + variant).copied()
    }

    pub fn row(&self, size: usize) -> Option<&[f64]> {
        if size >= self.sizes {
            return None;
        }

        let start = size * self.variants;
        self.values.get(start..start + self.variants)
    }

    pub fn column(&self, variant: usize) -> Vec<f64> {
        if variant >= self.variants {
            return Vec::new();
        }

        self.values
            .iter()
            .skip(variant)
            .step_by(self.variants)
            .copied()
            .collect()
    }
}
