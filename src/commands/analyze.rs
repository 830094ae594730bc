use crate::chart::CalorieChart;
use crate::constants::{ANALYSIS_PROMPT, NO_RESPONSE_FALLBACK};
use crate::error::{AnalysisError, Result};
use crate::inference::VisionModel;
use crate::models::{AnalysisReport, UploadedImage};
use crate::upload::input_image_setup;

/// One click of "Analyze": validate the upload, ask the model, attach the
/// placeholder chart. The model's text is passed through untouched.
#[tracing::instrument(skip_all, fields(model = model.name()))]
pub async fn analyze_meal(
    model: &dyn VisionModel,
    upload: Option<UploadedImage>,
) -> Result<(UploadedImage, AnalysisReport)> {
    let image = input_image_setup(upload)?;
    tracing::info!(
        file_name = image.file_name.as_deref().unwrap_or("<unnamed>"),
        mime_type = %image.mime_type,
        size = image.size(),
        "analyzing meal photo"
    );

    let analysis = match model.describe(ANALYSIS_PROMPT, &image).await {
        Ok(text) => text,
        Err(AnalysisError::EmptyResponse) => {
            AnalysisError::EmptyResponse.log();
            NO_RESPONSE_FALLBACK.to_string()
        }
        Err(err) => return Err(err),
    };

    tracing::info!(chars = analysis.len(), "analysis complete");

    let report = AnalysisReport {
        analysis,
        chart: CalorieChart::placeholder(),
    };
    Ok((image, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Text(&'static str),
        Empty,
        Fail(&'static str),
    }

    struct ScriptedModel {
        reply: Reply,
        calls: AtomicUsize,
        last_instruction: Mutex<Option<String>>,
    }

    impl ScriptedModel {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last_instruction: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl VisionModel for ScriptedModel {
        async fn describe(&self, instruction: &str, _image: &UploadedImage) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_instruction.lock().unwrap() = Some(instruction.to_string());
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Empty => Err(AnalysisError::EmptyResponse),
                Reply::Fail(message) => Err(AnalysisError::RemoteCall(anyhow::anyhow!(message))),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn jpeg(bytes: &[u8]) -> Option<UploadedImage> {
        Some(UploadedImage {
            file_name: Some("meal.jpg".into()),
            mime_type: "image/jpeg".into(),
            bytes: bytes.to_vec(),
        })
    }

    #[tokio::test]
    async fn missing_image_never_reaches_the_model() {
        let model = ScriptedModel::new(Reply::Text("unused"));

        for upload in [None, jpeg(b"")] {
            let err = analyze_meal(&model, upload).await.unwrap_err();
            assert!(matches!(err, AnalysisError::Validation(ValidationError::NoImage)));
        }
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsupported_type_never_reaches_the_model() {
        let model = ScriptedModel::new(Reply::Text("unused"));
        let upload = Some(UploadedImage {
            file_name: None,
            mime_type: "image/webp".into(),
            bytes: vec![1, 2, 3],
        });

        let err = analyze_meal(&model, upload).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::UnsupportedType { .. })
        ));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn model_text_is_passed_through_verbatim() {
        let text = "Meal Name: Salad\n1. Lettuce - 10 kcal\n  <b>Total</b> estimated calories: 10  ";
        let model = ScriptedModel::new(Reply::Text(text));

        let (image, report) = analyze_meal(&model, jpeg(&[0xff, 0xd8])).await.unwrap();

        assert_eq!(report.analysis, text);
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            model.last_instruction.lock().unwrap().as_deref(),
            Some(ANALYSIS_PROMPT)
        );
    }

    #[tokio::test]
    async fn empty_model_reply_uses_fallback_text() {
        let model = ScriptedModel::new(Reply::Empty);

        let (_, report) = analyze_meal(&model, jpeg(&[0xff])).await.unwrap();

        assert_eq!(report.analysis, "No response generated.");
        assert_eq!(report.chart.total_kcal, 491.0);
    }

    #[tokio::test]
    async fn remote_failure_is_surfaced_with_its_message() {
        let model = ScriptedModel::new(Reply::Fail("quota exceeded"));

        let err = analyze_meal(&model, jpeg(&[0xff])).await.unwrap_err();

        assert_eq!(err.user_message(), "Error occurred: quota exceeded");
    }

    #[tokio::test]
    async fn chart_does_not_depend_on_the_reply() {
        let a = analyze_meal(&ScriptedModel::new(Reply::Text("pizza")), jpeg(&[1]))
            .await
            .unwrap()
            .1;
        let b = analyze_meal(&ScriptedModel::new(Reply::Text("salad")), jpeg(&[2]))
            .await
            .unwrap()
            .1;

        assert_eq!(
            serde_json::to_value(&a.chart).unwrap(),
            serde_json::to_value(&b.chart).unwrap()
        );
    }
}
