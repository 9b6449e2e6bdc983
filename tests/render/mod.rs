use std::{error::Error, fs, path::Path};

use bench_plot::{figure::TrendChart, stat::MeanMatrix, Config, PlotError, PngRenderer, Renderer, Study};
use rand::thread_rng;
use tempfile::tempdir;

use crate::util::table::{random_rows, write_study};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC), "{} is not a png", path.display());
}

#[test]
fn test_png_overwrites_outputs() {
    let dir = tempdir().unwrap();
    let config = Config::rooted_at(dir.path());
    let study = Study::new("Png", &[100, 400, 700], &["BST", "AVL", "RBT"], "overall", "compare");

    let mut rng = thread_rng();
    write_study(dir.path(), &study, |index, _| random_rows(&mut rng, 10 * (index + 1)));

    fs::write(config.figure_path("compare"), b"stale").unwrap();
    fs::write(config.figure_path("overall"), b"stale").unwrap();

    let outcome = study.run(&config, &mut PngRenderer::new(&config)).unwrap();

    assert_eq!(outcome.compare_path, config.figure_path("compare"));
    assert_eq!(outcome.overall_path, config.figure_path("overall"));
    assert_png(&outcome.compare_path);
    assert_png(&outcome.overall_path);
}

#[test]
fn test_png_zero_iteration_count() {
    let dir = tempdir().unwrap();
    let config = Config::rooted_at(dir.path());
    let study = Study::new(
        "Compare_insert_delete",
        &[10_000, 40_000, 70_000],
        &["BST", "AVL", "RBT"],
        "overall_insert_delete",
        "compare_insert_delete",
    );

    write_study(dir.path(), &study, |index, variant| {
        let mut rows: Vec<(f64, f64)> = (1..=10).map(|i| (4. * i as f64, i as f64)).collect();
        match (index, variant) {
            (1, "BST") => rows[2].1 = 0.,
            (1, "RBT") => rows.iter_mut().for_each(|row| row.1 = 0.),
            _ => {}
        }
        rows
    });

    let outcome = study.run(&config, &mut PngRenderer::new(&config)).unwrap();

    assert_eq!(outcome.means.get(1, 0), Some(f64::INFINITY));
    assert_eq!(outcome.means.get(1, 1), Some(4.));
    assert_eq!(outcome.means.get(1, 2), Some(f64::INFINITY));
    assert_png(&outcome.compare_path);
    assert_png(&outcome.overall_path);
}

#[test]
fn test_png_draw_error_keeps_source() {
    let dir = tempdir().unwrap();
    let config = Config::rooted_at(dir.path());
    let path = dir.path().join("missing").join("overall.png");

    let mut means = MeanMatrix::new(2);
    means.push_row(&[1., 2.]);
    let trend = TrendChart::new(&[10], &["AVL", "RBT"], &means).unwrap();

    match PngRenderer::new(&config).render_trend(&trend, &path) {
        Err(err @ PlotError::Draw { .. }) => {
            assert!(err.source().is_some());
            assert!(err.to_string().contains("overall.png"));
        }
        other => panic!("expected a draw error, got {:?}", other),
    }
    assert!(!path.exists());
}
