//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::StationId;
use crate::network::NetworkGraph;
use crate::planner::{Instruction, Itinerary};

/// Route results fragment, swapped into the page by the client.
#[derive(Template)]
#[template(path = "route_results.html")]
pub struct RouteResultsTemplate {
    pub route: RouteView,
}

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub origin: String,
    pub destination: String,
    pub steps: Vec<InstructionView>,
    pub total_time: u32,
    pub changes: usize,
}

/// One rendered instruction and the kind used to style it.
#[derive(Debug, Clone)]
pub struct InstructionView {
    pub kind: &'static str,
    pub text: String,
}

impl RouteView {
    pub fn from_itinerary(graph: &NetworkGraph, itinerary: &Itinerary) -> Self {
        let name = |id: StationId| {
            graph
                .get(id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        let origin = itinerary.path.first().copied().map(name).unwrap_or_default();
        let destination = itinerary.path.last().copied().map(name).unwrap_or_default();

        let steps = itinerary
            .instructions
            .iter()
            .map(|i| InstructionView {
                kind: match i {
                    Instruction::Begin { .. } => "begin",
                    Instruction::Board { .. } => "board",
                    Instruction::Walk { .. } => "walk",
                    Instruction::Arrive { .. } => "arrive",
                },
                text: i.to_string(),
            })
            .collect();

        Self {
            origin,
            destination,
            steps,
            total_time: itinerary.total_time,
            changes: itinerary.changes(),
        }
    }

    /// Total time as minutes and seconds, e.g. "4 min 05 s".
    pub fn duration_display(&self) -> String {
        let (mins, secs) = (self.total_time / 60, self.total_time % 60);
        if mins == 0 {
            format!("{secs} s")
        } else {
            format!("{mins} min {secs:02} s")
        }
    }

    /// "direct", "1 change", "2 changes".
    pub fn changes_display(&self) -> String {
        match self.changes {
            0 => "direct".to_string(),
            1 => "1 change".to_string(),
            n => format!("{n} changes"),
        }
    }
}
