use bench_plot::{Config, PngRenderer, Study};
use tracing_subscriber::EnvFilter;

const TREE_SIZES: [u64; 5] = [10_000, 40_000, 70_000, 100_000, 130_000];

fn studies() -> Vec<Study> {
    vec![
        Study::new(
            "Compare_10Sample",
            &TREE_SIZES,
            &["BST", "AVL", "RBT"],
            "overall_10_sample",
            "compare_10_sample",
        ),
        Study::new("Compare", &TREE_SIZES, &["AVL", "RBT"], "overall", "compare"),
        Study::new(
            "Compare_insert_delete",
            &TREE_SIZES,
            &["BST", "AVL", "RBT"],
            "overall_insert_delete",
            "compare_insert_delete",
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bench_plot=info".parse()?))
        .init();

    let config = Config::default();
    let mut renderer = PngRenderer::new(&config);

    for study in studies() {
        study.run(&config, &mut renderer)?;
    }

    Ok(())
}
