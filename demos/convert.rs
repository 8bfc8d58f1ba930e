use std::env::args;

use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use treelist::{
    Forest,
    io::{read_forest_from_file, write_forest_to_file},
};

fn main() {
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();

    let list_path = args()
        .nth(1)
        .expect("Please provide the path to the flat list file");
    let output_path = args()
        .nth(2)
        .expect("Please provide the output path for the forest");
    let root_parent_id: i64 = args()
        .nth(3)
        .map(|s| s.parse().expect("Root parent id must be an integer"))
        .unwrap_or(0);

    // build the forest from the flat list
    let forest: Forest<i64, Value> =
        read_forest_from_file(list_path, &root_parent_id).expect("Failed to build forest");
    tracing::info!(roots = forest.roots().len(), nodes = forest.len(), "built forest");

    write_forest_to_file(output_path, &forest).expect("Failed to write forest");
}
