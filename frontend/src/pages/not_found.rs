use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct NotFoundProps {}

#[function_component(NotFound)]
pub fn not_found(_props: &NotFoundProps) -> Html {
    html! {
        <div class="not-found-page">
            <h1>{"404 - Page Not Found"}</h1>
            <p>{"There is nothing at this address."}</p>
            <Link<Route> to={Route::AdminSettings} classes="back-link">
                {"← Back to profile settings"}
            </Link<Route>>
        </div>
    }
}
