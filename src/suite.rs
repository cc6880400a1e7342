use std::path::Path;

use crate::http_probe::prelude::*;

/// Run every probe in order: health, root, test, then predict.
/// The predict probe always runs; without an image it reports itself as skipped, which counts as
/// a failure.
pub async fn run_suite(prober: &Prober, image_path: Option<&Path>) -> Vec<ProbeResult> {
    let mut results = Vec::with_capacity(4);

    results.push(prober.health().await);
    results.push(prober.root().await);
    results.push(prober.test_endpoint().await);

    if image_path.is_none() {
        println!("\n{}", crate::summary::RULE);
        println!("To test the /predict endpoint, provide an image path:");
        println!("  inferprobe path/to/image.jpg");
        println!("{}", crate::summary::RULE);
    }
    results.push(prober.predict(image_path).await);

    results
}
