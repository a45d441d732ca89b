use shared::models::School;
use yew::prelude::*;

const STATISTICS: &[(&str, &str)] = &[
    ("Girls", "number_of_girls"),
    ("Boys", "number_of_boys"),
    ("Pupils", "number_of_pupils"),
    ("Gender", "gender"),
    ("Capacity", "school_capacity"),
    ("High Age", "statutory_high_age"),
    ("Low Age", "statutory_low_age"),
];

const OFSTED: &[(&str, &str)] = &[
    ("Ofsted Rating", "ofsted_rating"),
    ("Last Inspected", "ofsted_last_insp"),
    ("Special Measures", "ofsted_special_measures"),
];

const LOCAL_CONTACT: &[(&str, &str)] = &[
    ("Locality", "locality"),
    ("Telephone", "telephone_number"),
    ("District", "district_administrative"),
    ("LA", "la_name"),
    ("LSOA", "lsoa"),
    ("MSOA", "msoa"),
];

const USEFUL: &[(&str, &str)] = &[
    ("Type", "establishment_type_group"),
    ("Administrative Ward", "administrative_ward"),
    ("Admissions Policy", "admissions_policy"),
    ("Boarders", "boarders"),
    ("Federations Flag", "federation_flag"),
    ("Federations", "federations"),
    ("Gor", "gor"),
    ("Nursery Provision", "nursery_provision"),
    ("Official Sixth Form", "official_sixth_form"),
    ("Parliamentary Constituency", "parliamentary_constituency"),
    ("FSM %", "percentage_fsm"),
    ("Religious Character", "religious_character"),
    ("Religious Ethos", "religious_ethos"),
    ("Resourced Provision Capacity", "resourced_provision_capacity"),
    ("Resourced Provision On Roll", "resourced_provision_on_roll"),
    ("School Sponsor Flag", "school_sponsor_flag"),
    ("Sen1", "sen1"),
    ("Sen2", "sen2"),
    ("Sen3", "sen3"),
    ("Sen4", "sen4"),
    ("Sen Unit Capacity", "sen_unit_capacity"),
    ("Sen Unit On Roll", "sen_unit_on_roll"),
    ("Special Classes", "special_classes"),
    ("Trust School Flag", "trust_school_flag"),
    ("Type of Resourced Provision", "type_of_resourced_provision"),
    ("Urban Rural", "urban_rural"),
    ("Vote Ratio", "vote_ratio"),
    ("Vote Total", "vote_total"),
];

const OTHER: &[(&str, &str)] = &[
    ("Est No.", "establishment_number"),
    ("UKPRN", "ukprn"),
    ("Census", "census_date"),
    ("ID", "id"),
    ("Last changed", "last_changed_date"),
];

fn rows(school: &School, fields: &[(&str, &str)]) -> Html {
    html! {
        { for fields.iter().map(|(label, name)| html! {
            <p>{ format!("{label}: ") }<span class="font-bold">{ school.text(name).unwrap_or_default().to_string() }</span></p>
        }) }
    }
}

fn section(title: &str, body: Html) -> Html {
    html! {
        <div class="mt-4 rounded bg-gray-50 p-3">
            <h4 class="mb-2 font-semibold">{ title.to_string() }</h4>
            <div class="grid grid-cols-1 gap-1 text-sm">{ body }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SchoolDetailProps {
    pub school: School,
    pub on_close: Callback<()>,
}

/// Left pane contents for the selected school.
#[function_component(SchoolDetail)]
pub fn school_detail(props: &SchoolDetailProps) -> Html {
    let school = &props.school;
    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let website = school
        .school_website
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .map(|url| {
            let href = if url.starts_with("http") { url.to_string() } else { format!("https://{url}") };
            html! { <a href={href} target="_blank" rel="noopener noreferrer" class="text-blue-500 hover:underline">{ url.to_string() }</a> }
        });
    let other = html! {
        <>
            <p>{"School ID: "}<span class="font-bold">{ school.school_id.map(|id| id.to_string()).unwrap_or_default() }</span></p>
            <p>{"UPRN: "}<span class="font-bold">{ school.uprn.map(|uprn| uprn.to_string()).unwrap_or_default() }</span></p>
            { rows(school, OTHER) }
        </>
    };

    html! {
        <div class="relative h-full overflow-y-auto p-4">
            <button class="absolute right-2 top-2 rounded bg-gray-200 px-2 py-1 hover:bg-gray-300" onclick={on_close} aria-label="Close">{"×"}</button>
            <h3 class="text-lg font-semibold">{ &school.establishment_name }</h3>
            <h4>{ school.phase_of_education.clone().unwrap_or_default() }</h4>
            if let Some(head) = school.head_teacher() {
                <p>{ head }</p>
            }
            if let Some(address) = school.full_address() {
                <h3 class="text-md mt-2 font-semibold">{ address }</h3>
            }
            if let Some(summary) = school.ofsted_summary() {
                <div class="mt-2 rounded bg-blue-600 pt-1 text-center">
                    <h3 class="text-md text-sm font-semibold text-white">{ summary }</h3>
                </div>
            }
            { section("Statistics", html! {
                <>
                    { rows(school, STATISTICS) }
                    { rows(school, OFSTED) }
                </>
            }) }
            { section("Local Contact Info", html! {
                <>
                    { for website }
                    { rows(school, LOCAL_CONTACT) }
                </>
            }) }
            { section("Useful Info", rows(school, USEFUL)) }
            { section("Other Info", other) }
            if let Some(image) = school.featured_image.clone().filter(|url| !url.trim().is_empty()) {
                { section("School Image", html! {
                    <img src={image} alt={school.establishment_name.clone()} class="w-full rounded" />
                }) }
            }
        </div>
    }
}
