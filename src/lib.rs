pub mod chart;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod models;
pub mod render;
pub mod server;
pub mod telemetry;
pub mod upload;

pub use chart::{CalorieChart, ChartSlice, Macronutrient, NutrientTable};
pub use commands::analyze::analyze_meal;
pub use config::{Args, Config};
pub use constants::{
    ANALYSIS_PROMPT, DEFAULT_GEMINI_ENDPOINT, DEFAULT_VISION_MODEL, NO_RESPONSE_FALLBACK,
};
pub use error::{AnalysisError, ValidationError};
pub use inference::{GeminiVisionModel, VisionModel};
pub use models::{AnalysisReport, AnalyzeResponsePayload, UploadedImage};
pub use server::{AppState, build_router, serve};
