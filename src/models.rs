use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use serde::Serialize;

use crate::chart::CalorieChart;

/// An uploaded meal photo. Lives only for the request that carried it.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn base64(&self) -> String {
        BASE64_ENGINE.encode(&self.bytes)
    }

    /// `data:` URI used to preview the upload inline.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64())
    }
}

/// Result of one analysis: the model's text untouched, plus the
/// illustrative chart.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis: String,
    pub chart: CalorieChart,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponsePayload {
    pub analysis: String,
    pub chart: CalorieChart,
    pub image_mime_type: String,
    pub image_size: usize,
}

impl AnalyzeResponsePayload {
    pub fn new(report: AnalysisReport, image: &UploadedImage) -> Self {
        Self {
            analysis: report.analysis,
            chart: report.chart,
            image_mime_type: image.mime_type.clone(),
            image_size: image.size(),
        }
    }
}
