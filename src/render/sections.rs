//! Per-namespace definition sections

use std::collections::HashSet;

use super::latex::{escape, label};
use super::length::render_length_table;
use super::Renderer;
use crate::error::Result;
use crate::schema::{DsdlType, NAME_COMPONENT_SEPARATOR};
use crate::select::NamespaceGroup;

/// "uavcan.node.port" -> ["uavcan", "uavcan.node", "uavcan.node.port"]
fn namespace_prefixes(namespace: &str) -> Vec<&str> {
    namespace
        .match_indices(NAME_COMPONENT_SEPARATOR)
        .map(|(index, _)| &namespace[..index])
        .chain(std::iter::once(namespace))
        .collect()
}

fn version_title(t: &DsdlType) -> String {
    let mut title = format!("Version {}", t.version);
    if let Some(port_id) = t.fixed_port_id {
        title.push_str(&format!(", fixed {} ID {}", t.port_kind(), port_id));
    }
    if t.deprecated {
        title.push_str(", DEPRECATED");
    }
    title
}

/// One section per namespace, one subsection per type, one subsubsection
/// per version with its length table and listing
pub fn render_sections(renderer: &Renderer, groups: &[NamespaceGroup<'_>]) -> Result<String> {
    let mut output = String::new();
    let mut labeled_namespaces: HashSet<&str> = HashSet::new();

    for group in groups {
        output.push_str(&format!("\\clearpage\\section{{{}}}\n", escape(group.namespace)));

        // Each namespace label points at its first appearance
        for namespace in namespace_prefixes(group.namespace) {
            if labeled_namespaces.insert(namespace) {
                output.push_str(&format!("\\label{{{}}}\n", label(namespace)));
            }
        }

        for type_group in &group.types {
            let short_name = type_group
                .full_name
                .rsplit(NAME_COMPONENT_SEPARATOR)
                .next()
                .unwrap_or(type_group.full_name);
            let kind = type_group.kind_name();

            output.push_str("\\pagebreak[3]{}\n");
            output.push_str(&format!("\\subsection{{{}}}\n", escape(short_name)));
            output.push_str(&format!("\\label{{{}}}\n", label(type_group.full_name)));
            output.push_str(&format!(
                "Full {} type name: {{\\bfseries\\texttt{{{}}}}}\n",
                kind,
                escape(type_group.full_name)
            ));

            for t in &type_group.versions {
                output.push_str(&format!("\\subsubsection{{{}}}\n", version_title(t)));
                output.push_str(&render_length_table(t));
                output.push_str("\\pagebreak[2]{}\n");
                output.push_str(&renderer.listing(t)?);
            }
        }
    }

    Ok(output)
}
