//! Minimal `{{name}}` template renderer for generated artifacts.

use crate::error::{AppError, ErrorKind};

/// Replace every `{{key}}` in `template` with its value.
///
/// Unknown or unterminated placeholders are an error, so a typo in a template
/// can never leak into a written artifact.
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, AppError> {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let close = after.find("}}").ok_or_else(|| {
            AppError::new(ErrorKind::Io, "Unterminated placeholder in artifact template.")
        })?;
        let key = after[..close].trim();
        let value = vars
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                AppError::new(
                    ErrorKind::Io,
                    format!("No value for placeholder '{key}' in artifact template."),
                )
            })?;
        out.push_str(value);
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Format `value` as a script float literal that parses back to the same `f64`.
pub fn float_literal(value: f64) -> Result<String, AppError> {
    if !value.is_finite() {
        return Err(AppError::new(
            ErrorKind::Fitting,
            format!("Cannot generate code for non-finite coefficient {value}"),
        ));
    }
    let mut text = format!("{value}");
    if !text.contains('.') {
        text.push_str(".0");
    }
    Ok(text)
}
