use log::debug;
use shared::ProfileRecord;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::events::SubmitEvent;
use yew::prelude::*;

use super::form_state::{ProfileField, ProfileForm, ProfileFormAction};
use super::messages;
use super::submit_handler::SubmitHandler;

#[derive(Properties, Clone, PartialEq, Default)]
pub struct AdminProfileFormProps {
    #[prop_or_default]
    pub profile: ProfileRecord,
    #[prop_or_default]
    pub on_submit: Option<SubmitHandler>,
}

#[derive(Properties, Clone, PartialEq)]
struct FieldInputProps {
    field: ProfileField,
    label: AttrValue,
    input_type: AttrValue,
    value: AttrValue,
    #[prop_or_default]
    placeholder: Option<AttrValue>,
    #[prop_or_default]
    required: bool,
    #[prop_or_default]
    error: Option<AttrValue>,
    oninput: Callback<(ProfileField, String)>,
}

#[function_component(FieldInput)]
fn field_input(props: &FieldInputProps) -> Html {
    let field = props.field;
    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            oninput.emit((field, input.value()));
        })
    };

    html! {
        <div class="form-group">
            <label for={field.as_str()}>{ props.label.clone() }</label>
            <input
                id={field.as_str()}
                type={props.input_type.clone()}
                name={field.as_str()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                required={props.required}
                {oninput}
            />
            if let Some(error) = props.error.clone() {
                <span class="error">{ error }</span>
            }
        </div>
    }
}

#[function_component(AdminProfileForm)]
pub fn admin_profile_form(props: &AdminProfileFormProps) -> Html {
    let form = {
        let profile = props.profile.clone();
        use_reducer_eq(move || ProfileForm::new(&profile))
    };
    // Hard single-flight guard; the rendered `submitting` flag lags one render.
    let in_flight = use_mut_ref(|| false);

    {
        let form = form.clone();
        use_effect_with(props.profile.clone(), move |profile| {
            debug!("Profile record changed, re-syncing name and email");
            form.dispatch(ProfileFormAction::ProfileChanged(profile.clone()));
            || ()
        });
    }

    let on_field_input = {
        let form = form.clone();
        Callback::from(move |(field, value): (ProfileField, String)| {
            form.dispatch(ProfileFormAction::UpdateField(field, value));
        })
    };

    let on_toggle_password = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.dispatch(ProfileFormAction::TogglePasswordSection);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let in_flight = in_flight.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *in_flight.borrow() {
                debug!("Submit ignored, a submission is already in flight");
                return;
            }

            let mut snapshot = (*form).clone();
            let pending = snapshot.begin_submit(on_submit.is_some());
            form.dispatch(ProfileFormAction::Validated(snapshot.errors().clone()));

            let (Ok(pending), Some(handler)) = (pending, on_submit.clone()) else {
                return;
            };

            *in_flight.borrow_mut() = true;
            form.dispatch(ProfileFormAction::SubmitStarted);

            let form = form.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                let result = handler.call(pending.payload).await;
                *in_flight.borrow_mut() = false;
                form.dispatch(ProfileFormAction::SubmitFinished {
                    changes_password: pending.changes_password,
                    result,
                });
            });
        })
    };

    let fields = form.fields();
    let errors = form.errors();
    let error_for = |field: ProfileField| errors.get(field).map(|msg| AttrValue::from(msg.to_string()));
    let value_of = |field: ProfileField| AttrValue::from(fields.get(field).to_string());
    let password_visible = form.is_password_section_visible();
    let submitting = form.is_submitting();

    html! {
        <div class="admin-form-container">
            <form {onsubmit} class="admin-form">
                <div class="form-section">
                    <h3 class="form-section-title">{ messages::BASIC_SECTION_TITLE }</h3>

                    <FieldInput
                        field={ProfileField::Name}
                        label="Name"
                        input_type="text"
                        value={value_of(ProfileField::Name)}
                        placeholder={Some(AttrValue::from("Enter your name"))}
                        required=true
                        error={error_for(ProfileField::Name)}
                        oninput={on_field_input.clone()}
                    />

                    <FieldInput
                        field={ProfileField::Email}
                        label="Email"
                        input_type="email"
                        value={value_of(ProfileField::Email)}
                        placeholder={Some(AttrValue::from("Enter your email address"))}
                        required=true
                        error={error_for(ProfileField::Email)}
                        oninput={on_field_input.clone()}
                    />

                    if let Some(role) = props.profile.role_label() {
                        <div class="form-group">
                            <label for="role">{ "Role" }</label>
                            <input
                                id="role"
                                type="text"
                                value={role.to_string()}
                                disabled=true
                                class="read-only"
                            />
                            <p class="form-help-text">{ messages::ROLE_HELP }</p>
                        </div>
                    }
                </div>

                <div class="form-section">
                    <div class="form-section-header">
                        <h3 class="form-section-title">{ messages::PASSWORD_SECTION_TITLE }</h3>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            onclick={on_toggle_password}
                        >
                            { if password_visible { messages::HIDE_PASSWORD_SECTION } else { messages::SHOW_PASSWORD_SECTION } }
                        </button>
                    </div>

                    if password_visible {
                        <>
                        <FieldInput
                            field={ProfileField::CurrentPassword}
                            label="Current password"
                            input_type="password"
                            value={value_of(ProfileField::CurrentPassword)}
                            placeholder={Some(AttrValue::from("Enter your current password"))}
                            error={error_for(ProfileField::CurrentPassword)}
                            oninput={on_field_input.clone()}
                        />
                        <FieldInput
                            field={ProfileField::NewPassword}
                            label="New password"
                            input_type="password"
                            value={value_of(ProfileField::NewPassword)}
                            placeholder={Some(AttrValue::from("Enter a new password (at least 8 characters)"))}
                            error={error_for(ProfileField::NewPassword)}
                            oninput={on_field_input.clone()}
                        />
                        <FieldInput
                            field={ProfileField::ConfirmPassword}
                            label="Confirm new password"
                            input_type="password"
                            value={value_of(ProfileField::ConfirmPassword)}
                            placeholder={Some(AttrValue::from("Enter the new password again"))}
                            error={error_for(ProfileField::ConfirmPassword)}
                            oninput={on_field_input.clone()}
                        />
                        </>
                    }
                </div>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={submitting}>
                        { if submitting { messages::SAVING } else { messages::SAVE } }
                    </button>
                </div>
            </form>
        </div>
    }
}
