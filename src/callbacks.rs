use std::fmt;

use crate::data::filter::Selection;
use crate::data::model::LaunchDataset;
use crate::figure::{self, Figure};

// ---------------------------------------------------------------------------
// Named inputs and outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputId::SiteDropdown => "site-dropdown",
            InputId::PayloadSlider => "payload-slider",
        })
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputId::SuccessPieChart => "success-pie-chart",
            OutputId::SuccessPayloadScatterChart => "success-payload-scatter-chart",
        })
    }
}

// ---------------------------------------------------------------------------
// Callback registry
// ---------------------------------------------------------------------------

/// Pure function from the dataset and current selection to one figure.
pub type ComputeFn = fn(&LaunchDataset, &Selection) -> Figure;

pub struct Callback {
    pub output: OutputId,
    pub inputs: Vec<InputId>,
    compute: ComputeFn,
}

impl Callback {
    pub fn watches(&self, input: InputId) -> bool {
        self.inputs.contains(&input)
    }

    pub fn compute(&self, dataset: &LaunchDataset, selection: &Selection) -> Figure {
        (self.compute)(dataset, selection)
    }
}

/// Callbacks keyed by the inputs they watch. A change to any watched input
/// reruns the callback synchronously.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    /// Registry wired the way the dashboard needs it: the pie watches the
    /// dropdown, the scatter watches the dropdown and the slider.
    pub fn dashboard() -> Self {
        let mut registry = CallbackRegistry::default();
        registry.register(
            OutputId::SuccessPieChart,
            &[InputId::SiteDropdown],
            |ds, sel| Figure::Pie(figure::success_pie(ds, &sel.site)),
        );
        registry.register(
            OutputId::SuccessPayloadScatterChart,
            &[InputId::SiteDropdown, InputId::PayloadSlider],
            |ds, sel| {
                Figure::Scatter(figure::success_payload_scatter(ds, &sel.site, &sel.payload))
            },
        );
        registry
    }

    /// Register `compute` as the producer of `output`, replacing any
    /// previous producer of the same output.
    pub fn register(&mut self, output: OutputId, inputs: &[InputId], compute: ComputeFn) {
        self.callbacks.retain(|cb| cb.output != output);
        self.callbacks.push(Callback {
            output,
            inputs: inputs.to_vec(),
            compute,
        });
    }

    /// Callbacks to rerun after `input` changed, in registration order.
    pub fn triggered_by(&self, input: InputId) -> impl Iterator<Item = &Callback> {
        self.callbacks.iter().filter(move |cb| cb.watches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &Callback> {
        self.callbacks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(registry: &CallbackRegistry, input: InputId) -> Vec<OutputId> {
        registry.triggered_by(input).map(|cb| cb.output).collect()
    }

    #[test]
    fn dropdown_drives_both_charts_slider_only_scatter() {
        let registry = CallbackRegistry::dashboard();
        assert_eq!(
            outputs(&registry, InputId::SiteDropdown),
            vec![
                OutputId::SuccessPieChart,
                OutputId::SuccessPayloadScatterChart
            ]
        );
        assert_eq!(
            outputs(&registry, InputId::PayloadSlider),
            vec![OutputId::SuccessPayloadScatterChart]
        );
    }

    #[test]
    fn registering_an_output_twice_replaces_it() {
        let mut registry = CallbackRegistry::dashboard();
        registry.register(OutputId::SuccessPieChart, &[InputId::PayloadSlider], |ds, sel| {
            Figure::Pie(figure::success_pie(ds, &sel.site))
        });
        assert_eq!(registry.all().count(), 2);
        assert_eq!(
            outputs(&registry, InputId::SiteDropdown),
            vec![OutputId::SuccessPayloadScatterChart]
        );
    }

    #[test]
    fn names_match_the_page_ids() {
        assert_eq!(InputId::SiteDropdown.to_string(), "site-dropdown");
        assert_eq!(
            OutputId::SuccessPayloadScatterChart.to_string(),
            "success-payload-scatter-chart"
        );
    }
}
