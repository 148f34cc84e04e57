use log::{error, info};
use shared::ProfileRecord;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::profile::{fetch_admin_profile, update_admin_profile};
use crate::components::admin::profile_form::AdminProfileForm;
use crate::components::admin::submit_handler::SubmitHandler;

#[derive(Properties, PartialEq, Clone, Debug)]
pub struct AdminSettingsPageProps {}

#[function_component(AdminSettingsPage)]
pub fn admin_settings_page(_props: &AdminSettingsPageProps) -> Html {
    let profile = use_state(|| None::<ProfileRecord>);
    let load_error = use_state(|| None::<String>);

    {
        let profile = profile.clone();
        let load_error = load_error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match fetch_admin_profile().await {
                    Ok(record) => {
                        profile.set(Some(record));
                        load_error.set(None);
                    }
                    Err(e) => {
                        error!("Failed to load admin profile: {}", e);
                        load_error.set(Some(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    // Built once so the form does not see a new handler on every render.
    let on_submit = {
        let set_profile = profile.setter();
        use_memo((), move |_| {
            SubmitHandler::new(move |payload| {
                let set_profile = set_profile.clone();
                async move {
                    let response = update_admin_profile(&payload).await?;
                    info!("{}", response.message);
                    set_profile.set(Some(response.profile));
                    Ok(())
                }
            })
        })
    };

    html! {
        <div class="admin-page">
            <div class="page-header">
                <h1>{"Profile Settings"}</h1>
            </div>
            if let Some(message) = (*load_error).as_ref() {
                <div class="alert alert-error">{ format!("Could not load your profile: {}", message) }</div>
            }
            {match (*profile).clone() {
                Some(record) => html! {
                    <AdminProfileForm profile={record} on_submit={Some((*on_submit).clone())} />
                },
                None if load_error.is_none() => html! {
                    <div class="loading">{"Loading profile..."}</div>
                },
                None => html! {},
            }}
        </div>
    }
}
