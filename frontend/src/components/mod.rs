pub mod admin {
    pub mod form_state;
    pub mod messages;
    pub mod profile_form;
    pub mod submit_handler;
}
