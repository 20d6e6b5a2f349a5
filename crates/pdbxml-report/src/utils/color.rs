/// Color is off when `NO_COLOR` is set to anything, including the empty string
pub fn color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Apply `NO_COLOR` to the `colored` crate before any styled output is printed
pub fn init_color() {
    if color_disabled() {
        colored::control::set_override(false);
    }
}
