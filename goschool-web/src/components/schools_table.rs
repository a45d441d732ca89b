use shared::models::School;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SchoolsTableProps {
    pub schools: Vec<School>,
    pub is_admin: bool,
    #[prop_or_default]
    pub on_edit: Callback<School>,
    #[prop_or_default]
    pub on_delete: Callback<School>,
}

const CELL: &str = "border border-gray-300 px-4 py-2";
const HEADING: &str = "border border-gray-300 px-4 py-2 text-left";

#[function_component(SchoolsTable)]
pub fn schools_table(props: &SchoolsTableProps) -> Html {
    let rows = props.schools.iter().enumerate().map(|(index, school)| {
        let actions = props.is_admin.then(|| {
            let on_edit = {
                let school = school.clone();
                props.on_edit.reform(move |_: MouseEvent| school.clone())
            };
            let on_delete = {
                let school = school.clone();
                props.on_delete.reform(move |_: MouseEvent| school.clone())
            };
            html! {
                <td class={CELL}>
                    <button class="mr-2 rounded bg-yellow-500 px-3 py-1 text-white hover:bg-yellow-600" onclick={on_edit}>{"Edit"}</button>
                    <button class="rounded bg-red-500 px-3 py-1 text-white hover:bg-red-600" onclick={on_delete}>{"Delete"}</button>
                </td>
            }
        });
        let key = school.id.clone().unwrap_or_else(|| index.to_string());

        html! {
            <tr {key}>
                <td class={CELL}>{ &school.establishment_name }</td>
                <td class={CELL}>{ school.address_line() }</td>
                <td class={CELL}>{ school.establishment_type_group.clone().unwrap_or_default() }</td>
                <td class={CELL}>{ school.phase_of_education.clone().unwrap_or_default() }</td>
                { for actions }
            </tr>
        }
    });

    html! {
        <table class="w-full border-collapse border border-gray-300 text-sm">
            <thead>
                <tr class="bg-gray-100">
                    <th class={HEADING}>{"Name"}</th>
                    <th class={HEADING}>{"Address"}</th>
                    <th class={HEADING}>{"Type"}</th>
                    <th class={HEADING}>{"Phase"}</th>
                    if props.is_admin {
                        <th class={HEADING}>{"Actions"}</th>
                    }
                </tr>
            </thead>
            <tbody>
                { for rows }
            </tbody>
        </table>
    }
}
