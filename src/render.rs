use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::chart::CalorieChart;
use crate::constants::{IMAGE_FIELD_NAME, PAGE_ICON, PAGE_TITLE};
use crate::error::AnalysisError;
use crate::models::AnalysisReport;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub icon: &'a str,
    pub field_name: &'a str,
    pub preview: Option<String>,
    pub report: Option<&'a AnalysisReport>,
    pub error: Option<String>,
    pub breakdown: Vec<String>,
}

impl<'a> IndexTemplate<'a> {
    pub fn new() -> Self {
        Self {
            title: PAGE_TITLE,
            icon: PAGE_ICON,
            field_name: IMAGE_FIELD_NAME,
            preview: None,
            report: None,
            error: None,
            breakdown: Vec::new(),
        }
    }

    pub fn with_preview(mut self, preview: Option<String>) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_report(mut self, report: &'a AnalysisReport) -> Self {
        self.report = Some(report);
        self.breakdown = nutrition_breakdown(&report.chart);
        self
    }

    pub fn with_error(mut self, error: &AnalysisError) -> Self {
        self.error = Some(error.user_message());
        self
    }
}

impl Default for IndexTemplate<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// `Name: 25g` lines listed under the chart.
pub fn nutrition_breakdown(chart: &CalorieChart) -> Vec<String> {
    chart
        .slices
        .iter()
        .map(|slice| format!("{}: {}g", slice.label, slice.grams))
        .collect()
}

pub fn render_page(status: StatusCode, template: &IndexTemplate<'_>) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            tracing::error!("Failed to render page: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}
