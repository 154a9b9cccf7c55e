//! The built-in RailSaarthi AI architecture map.

use crate::builder::{Connection, DiagramBuilder};
use crate::color::Color;
use crate::error::Result;
use crate::model::Shape;

pub const RAILWAY_AI_MAP_NAME: &str = "RailSaarthiAI_Railway_Map";

const STATIONS: &[(&str, &str, &str, Shape)] = &[
    ("data", "Data Ingestion\n(Kafka, TimescaleDB)", "lightblue", Shape::Circle),
    ("rules", "Rules Engine\n(OR-Tools, Pyomo)", "lightgreen", Shape::Circle),
    ("ml", "Predictive Models\n(PyTorch, TensorFlow)", "lightyellow", Shape::Circle),
    ("opt", "Optimization Core\n(OR + RL/Heuristics)", "orange", Shape::Hexagon),
    ("fusion", "Decision Fusion\n(KPI Ranking)", "lightpink", Shape::Box),
    ("sim", "What-If Simulation\n(SimPy/AnyLogic)", "lightcoral", Shape::Circle),
    ("ui", "Controller UI\n(React, FastAPI)", "lightcyan", Shape::Circle),
    ("api", "Secure API Layer\n(REST/gRPC, TLS)", "lightgoldenrod", Shape::Circle),
    ("output", "Output Execution\n(TMS/Kavach)", "lightseagreen", Shape::DoubleCircle),
    ("feedback", "Feedback Loop\n(ML Retraining)", "violet", Shape::DoubleCircle),
];

/// Solid metro lines: (from, to, color).
const LINES: &[(&str, &str, &str)] = &[
    ("data", "rules", "blue"),
    ("rules", "ml", "blue"),
    ("ml", "opt", "red"),
    ("opt", "fusion", "red"),
    ("fusion", "sim", "green"),
    ("sim", "ui", "green"),
    ("ui", "api", "purple"),
    ("api", "output", "purple"),
    ("output", "feedback", "black"),
];

const LINE_WIDTH: f64 = 3.0;
const FEEDBACK_LINE_WIDTH: f64 = 2.0;

/// Stations, lines, the dashed feedback loop and the legend.
pub fn railway_ai_map() -> Result<DiagramBuilder> {
    let mut builder = DiagramBuilder::new(RAILWAY_AI_MAP_NAME);

    for &(id, label, color, shape) in STATIONS {
        builder.add_station(id, label, Color::parse(color)?, shape)?;
    }

    for &(from, to, color) in LINES {
        builder.connect(Connection::new(from, to, Color::parse(color)?, LINE_WIDTH))?;
    }
    builder.connect(
        Connection::new("feedback", "data", Color::black(), FEEDBACK_LINE_WIDTH)
            .label("Feedback Loop")
            .dashed(),
    )?;

    builder.build_legend()?;
    Ok(builder)
}
