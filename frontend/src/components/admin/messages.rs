// User facing copy for the admin profile form.

pub const NAME_REQUIRED: &str = "Please enter your name.";
pub const EMAIL_REQUIRED: &str = "Please enter your email address.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const CURRENT_PASSWORD_REQUIRED: &str = "Please enter your current password.";
pub const NEW_PASSWORD_REQUIRED: &str = "Please enter a new password.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";

pub const BASIC_SECTION_TITLE: &str = "Basic information";
pub const PASSWORD_SECTION_TITLE: &str = "Change password";
pub const SHOW_PASSWORD_SECTION: &str = "Change password";
pub const HIDE_PASSWORD_SECTION: &str = "Cancel";
pub const ROLE_HELP: &str = "Role cannot be changed.";
pub const SAVE: &str = "Save";
pub const SAVING: &str = "Saving...";
