use bench_plot::stat::{linspace, mean, median, std_dev, GaussianKde, MeanMatrix, Violin};

use crate::util::assert_close;

#[test]
fn test_mean_median_std() {
    let data = [2., 4., 4., 4., 5., 5., 7., 9.];

    assert_eq!(mean(&data), 5.);
    assert_eq!(median(&data), 4.5);
    assert_close(std_dev(&data), (32f64 / 7.).sqrt());

    assert_eq!(median(&[3., 1., 2.]), 2.);
    assert!(mean(&[]).is_nan());
    assert!(median(&[]).is_nan());
    assert_eq!(std_dev(&[1.]), 0.);
}

#[test]
fn test_mean_propagates_non_finite() {
    assert_eq!(mean(&[1., f64::INFINITY, 3.]), f64::INFINITY);
    assert!(mean(&[1., f64::NAN]).is_nan());

    // the median ignores them
    assert_eq!(median(&[1., f64::NAN, 3.]), 2.);
}

#[test]
fn test_kde_bandwidth_and_area() {
    let data = [-1., 0., 1.];
    let kde = GaussianKde::new(&data).unwrap();

    assert_close(kde.bandwidth(), 3f64.powf(-0.2));

    // trapezoid over a range wide enough to hold all the mass
    let xs = linspace(-10., 10., 4001);
    let step = xs[1] - xs[0];
    let area: f64 = xs
        .windows(2)
        .map(|w| (kde.density(w[0]) + kde.density(w[1])) * step / 2.)
        .sum();
    assert!((area - 1.).abs() < 1e-6, "area {}", area);

    // symmetric data, symmetric density
    assert_close(kde.density(0.5), kde.density(-0.5));
    assert!(kde.density(0.) > kde.density(2.));
}

#[test]
fn test_kde_needs_spread() {
    assert!(GaussianKde::new(&[]).is_none());
    assert!(GaussianKde::new(&[4.]).is_none());
    assert!(GaussianKde::new(&[4., 4., 4.]).is_none());
}

#[test]
fn test_violin_outline() {
    let samples: Vec<f64> = (1..=50).map(|i| (i * i) as f64).collect();
    let violin = Violin::new(&samples, 100);

    assert_eq!(violin.coords.len(), 100);
    assert_eq!(violin.densities.len(), 100);
    assert_eq!(violin.extent(), Some((1., 2500.)));
    assert!(violin.densities.iter().all(|d| *d >= 0. && d.is_finite()));
    assert!(violin.max_density() > 0.);
    assert_eq!(violin.median, (625. + 676.) / 2.);
    assert_close(violin.mean, mean(&samples));
}

#[test]
fn test_violin_degenerate() {
    let flat = Violin::new(&[7., 7., 7.], 100);
    assert_eq!(flat.coords, vec![7.]);
    assert_eq!(flat.median, 7.);

    let empty = Violin::new(&[], 100);
    assert!(empty.is_empty());
    assert_eq!(empty.extent(), None);
    assert!(empty.mean.is_nan());
}

#[test]
fn test_violin_with_non_finite() {
    let violin = Violin::new(&[1., 2., f64::INFINITY, 3., 4.], 10);

    assert_eq!(violin.extent(), Some((1., 4.)));
    assert_eq!(violin.median, 2.5);
    assert_eq!(violin.mean, f64::INFINITY);
}

#[test]
fn test_linspace() {
    assert_eq!(linspace(0., 1., 5), vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(linspace(3., 9., 1), vec![3.]);
    assert!(linspace(0., 1., 0).is_empty());
}

#[test]
fn test_mean_matrix() {
    let mut means = MeanMatrix::new(3);
    assert_eq!(means.shape(), (0, 3));

    means.push_row(&[1., 2., 3.]);
    means.push_row(&[4., 5., 6.]);

    assert_eq!(means.shape(), (2, 3));
    assert_eq!(means.get(1, 0), Some(4.));
    assert_eq!(means.get(0, 2), Some(3.));
    assert_eq!(means.get(2, 0), None);
    assert_eq!(means.get(0, 3), None);
    assert_eq!(means.row(1), Some(&[4., 5., 6.][..]));
    assert_eq!(means.row(2), None);
    assert_eq!(means.column(1), vec![2., 5.]);
    assert!(means.column(3).is_empty());
}

#[test]
fn test_mean_matrix_without_variants() {
    let mut means = MeanMatrix::new(0);
    means.push_row(&[]);
    means.push_row(&[]);

    assert_eq!(means.shape(), (2, 0));
    assert_eq!(means.row(1), Some(&[][..]));
    assert_eq!(means.row(2), None);
    assert_eq!(means.get(0, 0), None);
}

#[test]
#[should_panic]
fn test_mean_matrix_row_width() {
    let mut means = MeanMatrix::new(2);
    means.push_row(&[1., 2., 3.]);
}
