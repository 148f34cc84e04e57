/// Role key carried by administrator accounts.
pub const ADMIN_ROLE: &str = "admin";

/// Label shown for a role key. Known keys are translated, anything else is
/// shown as-is.
pub fn role_display_label(role: &str) -> &str {
    match role {
        ADMIN_ROLE => "Administrator",
        other => other,
    }
}
