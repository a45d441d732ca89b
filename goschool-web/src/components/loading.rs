use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-screen">
            <div class="bg-white p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium">{"goSchool.uk"}</div>
                <div class="mt-3 flex items-center gap-2">
                    <span class="inline-block h-4 w-4 rounded-full border-2 border-blue-600 border-t-transparent animate-spin"></span>
                    <span>{"Loading"}</span>
                </div>
            </div>
        </div>
    }
}
