use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use log::{debug, error, info};
use shared::validation::{is_valid_email, meets_password_length};
use shared::{ProfileRecord, ProfileUpdateRequest, SharedError};
use yew::Reducible;

use super::messages;
use super::submit_handler::SubmitHandler;

/// Editable inputs of the profile form. [`ProfileField::as_str`] is also the
/// input's `name`/`id` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    Name,
    Email,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
}

impl ProfileField {
    pub const PASSWORD_FIELDS: [ProfileField; 3] = [
        ProfileField::CurrentPassword,
        ProfileField::NewPassword,
        ProfileField::ConfirmPassword,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::CurrentPassword => "currentPassword",
            ProfileField::NewPassword => "newPassword",
            ProfileField::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn is_password(self) -> bool {
        Self::PASSWORD_FIELDS.contains(&self)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl FormFields {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::CurrentPassword => &self.current_password,
            ProfileField::NewPassword => &self.new_password,
            ProfileField::ConfirmPassword => &self.confirm_password,
        }
    }

    fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::CurrentPassword => &mut self.current_password,
            ProfileField::NewPassword => &mut self.new_password,
            ProfileField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    fn clear_passwords(&mut self) {
        self.current_password.clear();
        self.new_password.clear();
        self.confirm_password.clear();
    }
}

impl fmt::Debug for FormFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &str| if value.is_empty() { "" } else { "***" };
        f.debug_struct("FormFields")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("current_password", &redact(&self.current_password))
            .field("new_password", &redact(&self.new_password))
            .field("confirm_password", &redact(&self.confirm_password))
            .finish()
    }
}

/// Per-field validation messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ProfileField, String>);

impl FieldErrors {
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: ProfileField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    fn remove(&mut self, field: ProfileField) -> bool {
        self.0.remove(&field).is_some()
    }

    fn clear_passwords(&mut self) {
        for field in ProfileField::PASSWORD_FIELDS {
            self.0.remove(&field);
        }
    }
}

/// Reason a submit attempt never reached the save handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// At least one field failed validation; errors are on the form.
    Invalid,
    /// Validation passed but there is nothing to hand the payload to.
    NoHandler,
    /// A previous submission has not finished yet.
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(SubmitRejection),
    Succeeded,
    Failed(SharedError),
}

/// A submission that passed validation and is waiting on the save handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub payload: ProfileUpdateRequest,
    /// Whether the password section was open when the submit started.
    pub changes_password: bool,
}

/// Local state of the admin profile form.
///
/// Name and email are copied from the externally owned [`ProfileRecord`];
/// everything else only lives here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    fields: FormFields,
    errors: FieldErrors,
    submitting: bool,
    password_section_visible: bool,
}

impl ProfileForm {
    pub fn new(profile: &ProfileRecord) -> Self {
        let mut form = Self::default();
        form.on_profile_changed(profile);
        form
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn value(&self, field: ProfileField) -> &str {
        self.fields.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_password_section_visible(&self) -> bool {
        self.password_section_visible
    }

    /// Re-projects name and email from a new record. Password input and
    /// current errors are left alone.
    pub fn on_profile_changed(&mut self, profile: &ProfileRecord) {
        self.fields.name = profile.name.clone();
        self.fields.email = profile.email.clone();
    }

    /// Stores `value` and drops the field's error, if any, without
    /// re-validating.
    pub fn update_field(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
        if self.errors.remove(field) {
            debug!("Cleared validation error on {}", field);
        }
    }

    /// Closing the section discards whatever was typed into it.
    pub fn toggle_password_section(&mut self) {
        if self.password_section_visible {
            self.clear_password_section();
        } else {
            self.password_section_visible = true;
        }
        debug!("Password section visible: {}", self.password_section_visible);
    }

    fn clear_password_section(&mut self) {
        self.fields.clear_passwords();
        self.errors.clear_passwords();
        self.password_section_visible = false;
    }

    /// Computes the full error set for the current input without touching
    /// the form.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        let fields = &self.fields;

        if fields.name.trim().is_empty() {
            errors.insert(ProfileField::Name, messages::NAME_REQUIRED);
        }

        if fields.email.trim().is_empty() {
            errors.insert(ProfileField::Email, messages::EMAIL_REQUIRED);
        } else if !is_valid_email(&fields.email) {
            errors.insert(ProfileField::Email, messages::EMAIL_INVALID);
        }

        if self.password_section_visible {
            if fields.current_password.is_empty() {
                errors.insert(ProfileField::CurrentPassword, messages::CURRENT_PASSWORD_REQUIRED);
            }

            if fields.new_password.is_empty() {
                errors.insert(ProfileField::NewPassword, messages::NEW_PASSWORD_REQUIRED);
            } else if !meets_password_length(&fields.new_password) {
                errors.insert(ProfileField::NewPassword, messages::PASSWORD_TOO_SHORT);
            }

            if fields.new_password != fields.confirm_password {
                errors.insert(ProfileField::ConfirmPassword, messages::PASSWORDS_DO_NOT_MATCH);
            }
        }

        errors
    }

    /// Replaces the error set with a fresh validation pass and reports
    /// whether the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = self.check();
        self.errors.is_empty()
    }

    fn apply_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    fn payload(&self) -> ProfileUpdateRequest {
        let request = ProfileUpdateRequest::basic(self.fields.name.clone(), self.fields.email.clone());
        if self.password_section_visible {
            request.with_password_change(
                self.fields.current_password.clone(),
                self.fields.new_password.clone(),
            )
        } else {
            request
        }
    }

    /// Validates and, when the form may be sent, marks it as submitting and
    /// returns the payload for the save handler.
    pub fn begin_submit(&mut self, has_handler: bool) -> Result<PendingSubmit, SubmitRejection> {
        if self.submitting {
            debug!("Submit ignored, a submission is already in flight");
            return Err(SubmitRejection::InFlight);
        }
        if !self.validate() {
            debug!("Submit blocked by {} validation error(s)", self.errors.len());
            return Err(SubmitRejection::Invalid);
        }
        if !has_handler {
            debug!("Submit skipped, no save handler supplied");
            return Err(SubmitRejection::NoHandler);
        }

        self.submitting = true;
        Ok(PendingSubmit {
            payload: self.payload(),
            changes_password: self.password_section_visible,
        })
    }

    /// Settles a submission started by [`ProfileForm::begin_submit`].
    ///
    /// A failure is only logged; input is kept so the user can retry.
    pub fn finish_submit(&mut self, changes_password: bool, result: &Result<(), SharedError>) {
        match result {
            Ok(()) => {
                info!("Profile updated");
                if changes_password {
                    self.clear_password_section();
                }
            }
            Err(e) => {
                error!("Profile update failed: {}", e);
            }
        }
        self.submitting = false;
    }

    /// Runs a full submission against `handler`.
    pub async fn submit(&mut self, handler: Option<&SubmitHandler>) -> SubmitOutcome {
        let pending = match self.begin_submit(handler.is_some()) {
            Ok(pending) => pending,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };
        let Some(handler) = handler else {
            return SubmitOutcome::Rejected(SubmitRejection::NoHandler);
        };

        let result = handler.call(pending.payload).await;
        self.finish_submit(pending.changes_password, &result);
        match result {
            Ok(()) => SubmitOutcome::Succeeded,
            Err(e) => SubmitOutcome::Failed(e),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProfileFormAction {
    ProfileChanged(ProfileRecord),
    UpdateField(ProfileField, String),
    TogglePasswordSection,
    Validated(FieldErrors),
    SubmitStarted,
    SubmitFinished {
        changes_password: bool,
        result: Result<(), SharedError>,
    },
}

fn profile_form_reducer(state: &mut ProfileForm, action: ProfileFormAction) {
    match action {
        ProfileFormAction::ProfileChanged(profile) => state.on_profile_changed(&profile),
        ProfileFormAction::UpdateField(field, value) => state.update_field(field, value),
        ProfileFormAction::TogglePasswordSection => state.toggle_password_section(),
        ProfileFormAction::Validated(errors) => state.apply_errors(errors),
        ProfileFormAction::SubmitStarted => state.submitting = true,
        ProfileFormAction::SubmitFinished { changes_password, result } => {
            state.finish_submit(changes_password, &result)
        }
    }
}

impl Reducible for ProfileForm {
    type Action = ProfileFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        profile_form_reducer(&mut next, action);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::RefCell;

    fn profile() -> ProfileRecord {
        ProfileRecord::new("A", "a@a.com")
    }

    fn form_with_passwords(current: &str, new: &str, confirm: &str) -> ProfileForm {
        let mut form = ProfileForm::new(&profile());
        form.toggle_password_section();
        form.update_field(ProfileField::CurrentPassword, current);
        form.update_field(ProfileField::NewPassword, new);
        form.update_field(ProfileField::ConfirmPassword, confirm);
        form
    }

    /// Handler that records every payload and answers with `result`.
    fn recording_handler(
        result: Result<(), SharedError>,
    ) -> (SubmitHandler, Rc<RefCell<Vec<ProfileUpdateRequest>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let handler = SubmitHandler::new(move |payload| {
            sink.borrow_mut().push(payload);
            let result = result.clone();
            async move { result }
        });
        (handler, calls)
    }

    #[test]
    fn test_initialize_copies_name_and_email() {
        let form = ProfileForm::new(&ProfileRecord::new("Kim", "kim@example.com").with_role("admin"));
        assert_eq!(form.value(ProfileField::Name), "Kim");
        assert_eq!(form.value(ProfileField::Email), "kim@example.com");
        for field in ProfileField::PASSWORD_FIELDS {
            assert_eq!(form.value(field), "");
        }
        assert!(!form.is_password_section_visible());
        assert!(!form.is_submitting());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_initialize_from_empty_record() {
        let form = ProfileForm::new(&ProfileRecord::default());
        assert_eq!(form.fields(), &FormFields::default());
    }

    #[test]
    fn test_profile_change_keeps_password_input_and_errors() {
        let mut form = form_with_passwords("x", "password1", "password1");
        form.update_field(ProfileField::Name, "edited");
        form.update_field(ProfileField::Email, "");
        assert!(!form.validate());

        form.on_profile_changed(&ProfileRecord::new("B", "b@b.com"));

        assert_eq!(form.value(ProfileField::Name), "B");
        assert_eq!(form.value(ProfileField::Email), "b@b.com");
        assert_eq!(form.value(ProfileField::NewPassword), "password1");
        assert!(form.is_password_section_visible());
        // Errors are only recomputed on validation.
        assert!(form.errors().contains(ProfileField::Email));
    }

    #[test]
    fn test_update_field_clears_only_that_error() {
        let mut form = ProfileForm::new(&ProfileRecord::default());
        assert!(!form.validate());
        assert!(form.errors().contains(ProfileField::Name));
        assert!(form.errors().contains(ProfileField::Email));

        form.update_field(ProfileField::Name, " ");

        assert!(!form.errors().contains(ProfileField::Name));
        assert!(form.errors().contains(ProfileField::Email));
        assert_eq!(form.value(ProfileField::Name), " ");
    }

    #[test]
    fn test_empty_name_is_an_error() {
        let mut form = ProfileForm::new(&ProfileRecord::new("   ", "a@b.co"));
        assert!(!form.validate());
        assert_eq!(form.errors().get(ProfileField::Name), Some(messages::NAME_REQUIRED));
        assert_eq!(form.errors().len(), 1);
    }

    #[rstest]
    #[case("", messages::EMAIL_REQUIRED)]
    #[case("   ", messages::EMAIL_REQUIRED)]
    #[case("no-at-sign.com", messages::EMAIL_INVALID)]
    #[case("user@nodot", messages::EMAIL_INVALID)]
    #[case("user@example.", messages::EMAIL_INVALID)]
    fn test_bad_emails(#[case] email: &str, #[case] expected: &str) {
        let mut form = ProfileForm::new(&ProfileRecord::new("A", email));
        assert!(!form.validate());
        assert_eq!(form.errors().get(ProfileField::Email), Some(expected));
    }

    #[test]
    fn test_well_formed_email_passes() {
        let mut form = ProfileForm::new(&ProfileRecord::new("A", "a@b.co"));
        assert!(form.validate());
        assert!(!form.errors().contains(ProfileField::Email));
    }

    #[test]
    fn test_hidden_password_section_is_not_validated() {
        let mut form = ProfileForm::new(&profile());
        form.update_field(ProfileField::NewPassword, "short");
        assert!(form.validate());
    }

    #[test]
    fn test_password_length_boundary() {
        let mut seven = form_with_passwords("x", "1234567", "1234567");
        assert!(!seven.validate());
        assert_eq!(
            seven.errors().get(ProfileField::NewPassword),
            Some(messages::PASSWORD_TOO_SHORT)
        );

        let mut eight = form_with_passwords("x", "12345678", "12345678");
        assert!(eight.validate());
    }

    #[test]
    fn test_mismatch_attaches_to_confirm_only() {
        let mut form = form_with_passwords("x", "password1", "password2");
        assert!(!form.validate());
        assert_eq!(
            form.errors().iter().collect::<Vec<_>>(),
            vec![(ProfileField::ConfirmPassword, messages::PASSWORDS_DO_NOT_MATCH)]
        );
    }

    #[test]
    fn test_open_empty_password_section_requires_fields() {
        let mut form = form_with_passwords("", "", "");
        assert!(!form.validate());
        assert!(form.errors().contains(ProfileField::CurrentPassword));
        assert_eq!(
            form.errors().get(ProfileField::NewPassword),
            Some(messages::NEW_PASSWORD_REQUIRED)
        );
        // Both empty still match.
        assert!(!form.errors().contains(ProfileField::ConfirmPassword));
    }

    #[test]
    fn test_validation_recomputes_instead_of_merging() {
        let mut form = ProfileForm::new(&ProfileRecord::new("", "bad"));
        assert!(!form.validate());
        assert_eq!(form.errors().len(), 2);

        // Fix the name without going through update_field so the stale
        // error is still present until the next pass.
        form.on_profile_changed(&ProfileRecord::new("A", "bad"));
        assert!(!form.validate());
        assert!(!form.errors().contains(ProfileField::Name));
        assert!(form.errors().contains(ProfileField::Email));
    }

    #[test]
    fn test_toggle_off_discards_password_input() {
        let mut form = form_with_passwords("x", "short", "other");
        assert!(!form.validate());

        form.toggle_password_section();
        assert!(!form.is_password_section_visible());
        for field in ProfileField::PASSWORD_FIELDS {
            assert_eq!(form.value(field), "");
            assert!(!form.errors().contains(field));
        }

        form.toggle_password_section();
        assert!(form.is_password_section_visible());
        for field in ProfileField::PASSWORD_FIELDS {
            assert_eq!(form.value(field), "");
        }
    }

    #[test]
    fn test_toggle_off_keeps_non_password_errors() {
        let mut form = ProfileForm::new(&ProfileRecord::new("", "a@a.com"));
        form.toggle_password_section();
        assert!(!form.validate());
        form.toggle_password_section();
        assert!(form.errors().contains(ProfileField::Name));
    }

    #[test]
    fn test_submit_without_password_section_sends_basic_payload() {
        let (handler, calls) = recording_handler(Ok(()));
        let mut form = ProfileForm::new(&profile());

        let outcome = block_on(form.submit(Some(&handler)));

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(*calls.borrow(), vec![ProfileUpdateRequest::basic("A", "a@a.com")]);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_submit_with_password_change_then_clears_section() {
        let (handler, calls) = recording_handler(Ok(()));
        let mut form = form_with_passwords("x", "password1", "password1");

        let outcome = block_on(form.submit(Some(&handler)));

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(
            *calls.borrow(),
            vec![ProfileUpdateRequest::basic("A", "a@a.com").with_password_change("x", "password1")]
        );
        for field in ProfileField::PASSWORD_FIELDS {
            assert_eq!(form.value(field), "");
        }
        assert!(!form.is_password_section_visible());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_failed_submit_preserves_state() {
        let failure = SharedError::Submission("server unavailable".to_string());
        let (handler, calls) = recording_handler(Err(failure.clone()));
        let mut form = form_with_passwords("x", "password1", "password1");
        let before = form.clone();

        let outcome = block_on(form.submit(Some(&handler)));

        assert_eq!(outcome, SubmitOutcome::Failed(failure));
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(form, before);
        assert!(form.errors().is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_invalid_submit_never_calls_handler() {
        let (handler, calls) = recording_handler(Ok(()));
        let mut form = ProfileForm::new(&ProfileRecord::new("", "a@a.com"));

        let outcome = block_on(form.submit(Some(&handler)));

        assert_eq!(outcome, SubmitOutcome::Rejected(SubmitRejection::Invalid));
        assert!(calls.borrow().is_empty());
        assert!(form.errors().contains(ProfileField::Name));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_submit_without_handler_still_records_errors() {
        let mut invalid = ProfileForm::new(&ProfileRecord::default());
        assert_eq!(
            block_on(invalid.submit(None)),
            SubmitOutcome::Rejected(SubmitRejection::Invalid)
        );
        assert_eq!(invalid.errors().len(), 2);

        let mut valid = ProfileForm::new(&profile());
        assert_eq!(
            block_on(valid.submit(None)),
            SubmitOutcome::Rejected(SubmitRejection::NoHandler)
        );
        assert!(!valid.is_submitting());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut form = ProfileForm::new(&profile());
        let pending = form.begin_submit(true).unwrap();
        assert!(form.is_submitting());
        assert_eq!(pending.payload, ProfileUpdateRequest::basic("A", "a@a.com"));
        assert!(!pending.changes_password);

        assert_eq!(form.begin_submit(true), Err(SubmitRejection::InFlight));

        form.finish_submit(pending.changes_password, &Ok(()));
        assert!(!form.is_submitting());
        assert!(form.begin_submit(true).is_ok());
    }

    #[test]
    fn test_success_uses_section_state_from_submit_time() {
        let mut form = ProfileForm::new(&profile());
        let pending = form.begin_submit(true).unwrap();

        // Opened while the basic update was in flight.
        form.toggle_password_section();
        form.update_field(ProfileField::CurrentPassword, "typed meanwhile");
        form.finish_submit(pending.changes_password, &Ok(()));

        assert!(form.is_password_section_visible());
        assert_eq!(form.value(ProfileField::CurrentPassword), "typed meanwhile");
    }

    #[test]
    fn test_profile_refresh_after_edits_keeps_new_password() {
        let mut form = form_with_passwords("x", "password1", "");
        form.update_field(ProfileField::Name, "typed");
        form.on_profile_changed(&ProfileRecord::new("Fresh", "fresh@example.com"));
        assert_eq!(form.value(ProfileField::Name), "Fresh");
        assert_eq!(form.value(ProfileField::NewPassword), "password1");
    }

    #[test]
    fn test_reducer_follows_model_transitions() {
        let state = Rc::new(ProfileForm::new(&profile()));
        let state = state.reduce(ProfileFormAction::TogglePasswordSection);
        let state = state.reduce(ProfileFormAction::UpdateField(
            ProfileField::CurrentPassword,
            "x".to_string(),
        ));
        assert_eq!(state.value(ProfileField::CurrentPassword), "x");

        let mut snapshot = (*state).clone();
        assert_eq!(snapshot.begin_submit(true), Err(SubmitRejection::Invalid));
        let state = state.reduce(ProfileFormAction::Validated(snapshot.errors().clone()));
        assert!(state.errors().contains(ProfileField::NewPassword));

        let state = state.reduce(ProfileFormAction::SubmitStarted);
        assert!(state.is_submitting());
        let state = state.reduce(ProfileFormAction::SubmitFinished {
            changes_password: true,
            result: Ok(()),
        });
        assert!(!state.is_submitting());
        assert!(!state.is_password_section_visible());
        assert_eq!(state.value(ProfileField::CurrentPassword), "");
    }

    #[test]
    fn test_field_names_match_input_names() {
        assert_eq!(ProfileField::CurrentPassword.as_str(), "currentPassword");
        assert_eq!(ProfileField::ConfirmPassword.to_string(), "confirmPassword");
        assert!(ProfileField::NewPassword.is_password());
        assert!(!ProfileField::Email.is_password());
    }

    #[test]
    fn test_debug_output_hides_passwords() {
        let form = form_with_passwords("hunter22", "password1", "password1");
        let rendered = format!("{:?}", form);
        assert!(!rendered.contains("hunter22"));
        assert!(!rendered.contains("password1"));
    }
}
