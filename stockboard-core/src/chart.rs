//! Renderer-agnostic line chart encoding.
//!
//! x = date (temporal), y = closing price (quantitative, fixed display domain,
//! clipped), color = company (nominal). The terminal front-end reads the `ChartSpec`
//! directly; the CLI serializes it as a Vega-Lite document.

use serde::Serialize;
use serde_json::{json, Value};

use crate::pipeline::PriceRange;
use crate::table::{LongTable, DATE_COLUMN, NAME_COLUMN, PRICE_COLUMN};

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Encoding of the closing-price line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub x_field: &'static str,
    pub y_field: &'static str,
    pub color_field: &'static str,
    /// Y display domain; never used to filter data.
    pub y_domain: (f64, f64),
    /// Marks outside the domain are clipped rather than widening the axis.
    pub clip: bool,
    pub opacity: f64,
}

impl ChartSpec {
    pub fn new(price_range: PriceRange) -> Self {
        Self {
            x_field: DATE_COLUMN,
            y_field: PRICE_COLUMN,
            color_field: NAME_COLUMN,
            y_domain: (price_range.lo(), price_range.hi()),
            clip: true,
            opacity: 0.8,
        }
    }

    /// Vega-Lite document with `data` inlined.
    pub fn to_vega_lite(&self, data: &LongTable) -> Value {
        json!({
            "$schema": VEGA_LITE_SCHEMA,
            "data": { "values": data },
            "mark": { "type": "line", "opacity": self.opacity, "clip": self.clip },
            "encoding": {
                "x": { "field": self.x_field, "type": "temporal" },
                "y": {
                    "field": self.y_field,
                    "type": "quantitative",
                    "stack": null,
                    "scale": { "domain": [self.y_domain.0, self.y_domain.1] }
                },
                "color": { "field": self.color_field, "type": "nominal" }
            },
            "width": "container"
        })
    }
}
