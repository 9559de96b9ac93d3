use crate::config::ValidationMode;
use crate::models::FormData;
use crate::models::submission::scalar_text;

/// Fields that identify a report in strict mode.
pub const REQUIRED_FIELDS: [&str; 2] = ["companyName", "selectionYear"];

/// Presence check only; values are not interpreted.
pub fn check_required(data: &FormData, mode: ValidationMode) -> Result<(), String> {
    if mode == ValidationMode::Lenient {
        return Ok(());
    }

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| data.get(*field).and_then(scalar_text).is_none())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}
