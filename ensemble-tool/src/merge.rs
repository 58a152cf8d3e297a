//! Batch merging of recorded model results.

use crate::{common::*, config::Config};

/// One image and the raw detections of every model on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInput {
    pub name: String,
    pub model_results: ModelResultSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOutput {
    pub name: String,
    pub detections: Vec<ConsensusDetection>,
    pub ensemble_info: EnsembleSummary,
}

/// Replay the recorded results of one image as a set of detection sources.
///
/// Only the models listed for this image take part, so each image is merged
/// independently of the rest of the batch.
pub fn image_sources(image: &ImageInput) -> DetectionSources {
    let mut sources = DetectionSources::new();
    for (model, detections) in image.model_results.iter() {
        let mut source = RecordedSource::new(model.clone());
        source.record(&image.name, detections.to_vec());
        sources.push(source);
    }
    sources
}

/// Detect and merge one image.
pub fn merge_image(detector: &EnsembleDetector, image: &ImageInput) -> Result<ImageOutput> {
    let sources = image_sources(image);
    let results = sources.detect(Path::new(&image.name));
    let detections = detector
        .merge(&results)
        .with_context(|| format!("failed to merge detections of '{}'", image.name))?;
    let ensemble_info = EnsembleSummary::new(&results, &detections);

    Ok(ImageOutput {
        name: image.name.clone(),
        detections,
        ensemble_info,
    })
}

/// Merge every image on the blocking pool. The output order follows the
/// input order.
pub async fn merge_images(
    detector: Arc<EnsembleDetector>,
    images: Vec<ImageInput>,
) -> Result<Vec<ImageOutput>> {
    info!("merging {} images", images.len());

    let outputs: Vec<_> = stream::iter(images)
        .map(|image| {
            let detector = detector.clone();
            tokio::task::spawn_blocking(move || merge_image(&detector, &image))
        })
        .buffered(num_cpus::get())
        .map(|result| Fallible::Ok(result??))
        .try_collect()
        .await?;

    let num_consensus: usize = outputs
        .iter()
        .map(|output| output.ensemble_info.consensus_detections)
        .sum();
    info!(
        "merged {} images, {} consensus detections",
        outputs.len(),
        num_consensus
    );

    Ok(outputs)
}

pub async fn merge_file(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let detector = Arc::new(config.ensemble.clone().build()?);

    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read '{}'", input.display()))?;
    let images: Vec<ImageInput> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse '{}'", input.display()))?;

    let outputs = merge_images(detector, images)
        .instrument(info_span!("merge"))
        .await?;
    let text = serde_json::to_string_pretty(&outputs)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, text)
                .await
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => println!("{}", text),
    }

    Ok(())
}
