//! Abridged rendering of a single type

use super::latex::label;
use super::Renderer;
use crate::error::Result;
use crate::schema::DsdlType;

/// Sentence describing how many other versions exist
fn older_versions_note(version_count: usize) -> String {
    match version_count {
        0 | 1 => "(this is the only version)".to_string(),
        2 => "(there is one older version)".to_string(),
        n => format!("(there are {} older versions)", n - 1),
    }
}

/// Introduce and list the given version of a type
///
/// `version_count` counts all matching versions, deprecated ones included.
pub fn render_summary(renderer: &Renderer, t: &DsdlType, version_count: usize) -> Result<String> {
    let listing = renderer.listing(t)?;
    let kind = t.port_kind();

    let mut output = String::new();
    output.push_str(&format!("DSDL source text of \\verb|{}|\n", t.full_name));
    output.push_str(&format!("version {}\n", t.version));
    output.push_str(&older_versions_note(version_count));
    output.push('\n');
    match t.fixed_port_id {
        Some(port_id) => output.push_str(&format!("with fixed {} ID {}\n", kind, port_id)),
        None => output.push_str(&format!("without fixed {} ID\n", kind)),
    }
    output.push_str("is provided below.\n");
    output.push_str("More information is available in\n");
    output.push_str(&format!(
        "section \\ref{{{0}}} on page \\pageref{{{0}}}.\n",
        label(&t.full_name)
    ));
    output.push_str("\\pagebreak[2]{}\n");
    output.push_str(&listing);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_versions_note() {
        assert_eq!(older_versions_note(1), "(this is the only version)");
        assert_eq!(older_versions_note(2), "(there is one older version)");
        assert_eq!(older_versions_note(4), "(there are 3 older versions)");
    }
}
