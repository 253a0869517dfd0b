//! Output formatting utilities

/// Format a list of filter names for display
pub fn format_filter_list(names: &[&str]) -> String {
    if names.is_empty() {
        return "No filters registered".to_string();
    }

    let mut output = String::new();
    for name in names {
        output.push_str(&format!("{}\n", name));
    }
    output
}
