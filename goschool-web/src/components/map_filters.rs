use shared::map::{EstablishmentStatus, PhaseFilter, PhaseOfEducation, StatusFilter};
use strum::IntoEnumIterator;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MapFiltersProps {
    pub status: StatusFilter,
    pub phases: PhaseFilter,
    pub on_status: Callback<EstablishmentStatus>,
    pub on_phase: Callback<PhaseOfEducation>,
}

/// The two checkbox groups controlling circle colours.
#[function_component(MapFilters)]
pub fn map_filters(props: &MapFiltersProps) -> Html {
    let statuses = EstablishmentStatus::iter().map(|status| {
        let onchange = props.on_status.reform(move |_: Event| status);
        html! {
            <label class="flex items-center gap-2">
                <input type="checkbox" checked={props.status.is_enabled(status)} {onchange} />
                { status.label() }
            </label>
        }
    });
    let phases = PhaseOfEducation::iter().map(|phase| {
        let onchange = props.on_phase.reform(move |_: Event| phase);
        html! {
            <label class="flex items-center gap-2">
                <input type="checkbox" checked={props.phases.is_enabled(phase)} {onchange} />
                <span class="inline-block h-3 w-3 rounded-full" style={format!("background-color: {}", phase.colour())}></span>
                { phase.label() }
            </label>
        }
    });

    html! {
        <div class="space-y-4">
            <fieldset>
                <legend class="mb-2 font-semibold">{"Establishment Status"}</legend>
                { for statuses }
            </fieldset>
            <fieldset>
                <legend class="mb-2 font-semibold">{"Phase of Education"}</legend>
                { for phases }
            </fieldset>
        </div>
    }
}
