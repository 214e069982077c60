// Library exports for chartfuse

pub mod compose;
pub mod data;
pub mod domain;
pub mod plan;
pub mod render;
pub mod series;
pub mod value;

use serde::Deserialize;

use crate::series::ChartData;

#[derive(Debug, Clone, Deserialize, Default)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
}

/// Render configuration. Bounds such as a minimum height are the caller's
/// schema concern, not enforced here.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
    /// Opaque style overrides, passed through untouched.
    #[serde(default)]
    pub style: Option<serde_json::Value>,
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 400 }

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            format: OutputFormat::Png,
            style: None,
        }
    }
}

/// Top-level chart specification: the series list plus render options.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub data: ChartData,
    #[serde(flatten)]
    pub options: RenderOptions,
}
