use std::path::Path;
use std::time::Instant;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use super::prelude::*;

pub const PREDICT_PROBE: &str = "Predict Endpoint";

/// Used when the file extension does not name an image type.
const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

/// Body of a successful `/predict` call. Only the detection count is required; the rest of the
/// payload is kept as-is for printing.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub num_detections: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Prober {
    /// Upload an image to `/predict`.
    /// Without a path, or with a path that does not exist, the probe fails without touching the
    /// network.
    pub async fn predict(&self, image_path: Option<&Path>) -> ProbeResult {
        println!("\nTesting /predict endpoint...");

        let start = Instant::now();
        let outcome = self.upload_image(image_path).await;
        let elapsed = start.elapsed();

        match &outcome {
            Ok(_) => {}
            Err(ProbeError::NoImage) => {
                println!("No image provided. Skipping predict test.");
                println!("Usage: inferprobe path/to/image.jpg");
            }
            Err(e @ ProbeError::Timeout { .. }) => {
                log::warn!("{PREDICT_PROBE} timed out: {e}");
                println!("Error: {e}");
                println!("This might indicate the API is under heavy load or crashed");
            }
            Err(ProbeError::UnexpectedStatus { status, body }) => {
                log::warn!("{PREDICT_PROBE} returned status {status}");
                println!("Error Response: {body}");
            }
            Err(e) => {
                log::warn!("{PREDICT_PROBE} failed: {e}");
                println!("Error: {}", report(e));
            }
        }

        ProbeResult {
            name: PREDICT_PROBE,
            outcome,
            elapsed,
        }
    }

    async fn upload_image(&self, image_path: Option<&Path>) -> Result<ProbeSuccess, ProbeError> {
        let path = image_path.ok_or(ProbeError::NoImage)?;

        let read_error = |source| ProbeError::ImageRead {
            path: path.to_path_buf(),
            source,
        };
        if !tokio::fs::try_exists(path).await.map_err(read_error)? {
            return Err(ProbeError::ImageNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = tokio::fs::read(path).await.map_err(read_error)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let content_type = image_content_type(path);

        println!("Uploading image: {}", path.display());
        log::debug!(
            "POST {} bytes as {file_name} ({content_type}), timeout {:?}",
            bytes.len(),
            self.predict_timeout
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(ProbeError::Transport)?;
        let form = Form::new().part("file", part);

        let url = self.endpoint("/predict")?;
        let response = self
            .client
            .post(url)
            .multipart(form)
            .timeout(self.predict_timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, self.predict_timeout))?;

        let status = response.status().as_u16();
        println!("Status Code: {status}");

        let text = response
            .text()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, self.predict_timeout))?;

        if status != 200 {
            return Err(ProbeError::UnexpectedStatus { status, body: text });
        }

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) => return Err(ProbeError::InvalidJson { status, body: text }),
        };
        let prediction = match PredictResponse::deserialize(&body) {
            Ok(prediction) => prediction,
            Err(e) => {
                return Err(ProbeError::SchemaMismatch {
                    reason: e.to_string(),
                    body: text,
                });
            }
        };

        println!(
            "Success! Found {} detections",
            prediction.num_detections
        );
        println!("Response: {body}");

        Ok(ProbeSuccess {
            status,
            body,
            detections: Some(prediction.num_detections),
        })
    }
}

/// Content type for the upload, guessed from the extension. Anything that is not an image
/// type is sent as JPEG.
fn image_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .filter(|essence| essence.starts_with("image/"))
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}
