//! Namespace index table

use super::latex::{escape, indent, label, weak};
use crate::schema::{DsdlType, MaxBytes};
use crate::select::{NamespaceGroup, TypePattern};

fn max_bytes_cells(t: &DsdlType) -> String {
    match t.max_bytes() {
        MaxBytes::Message(bytes) => format!("{} &", bytes),
        MaxBytes::Service { request, response } => format!("{} & {}", request, response),
    }
}

fn type_rows(output: &mut String, t: &DsdlType, is_first: bool, depth: usize) {
    output.push_str("\\nopagebreak[4]{}\n");

    if is_first {
        output.push_str(&format!("{}\\texttt{{{}}} &\n", indent(depth), escape(t.short_name())));
    } else {
        output.push_str(&format!("{}{} &\n", indent(depth + 1), weak("older version")));
    }

    let fixed_port_id = t.fixed_port_id.map(|id| id.to_string()).unwrap_or_default();
    output.push_str(&format!(
        "{} & {} & {} &\n",
        t.version,
        fixed_port_id,
        max_bytes_cells(t)
    ));

    if is_first {
        let icon = if t.is_service() { "\\faExchange" } else { "\\faEnvelopeO" };
        output.push_str(&format!(
            "\\pageref{{{0}}} & \\ref{{{0}}} & {1} &\\texttt{{{2}}} \\\\\n",
            label(&t.full_name),
            icon,
            escape(&t.full_name)
        ));
    } else {
        let dots = weak("$\\cdots{}$");
        output.push_str(&format!("\\multicolumn{{2}}{{c|}}{{ {0} }} &&  {0}  \\\\\n", dots));
    }
}

/// Index table of all grouped types, with an indented namespace tree
pub fn render_index(pattern: &TypePattern, groups: &[NamespaceGroup<'_>]) -> String {
    let naked = pattern.naked();
    let nested = pattern.is_nested_namespace();
    // longtabu only when the index may span pages
    let environment = if nested { "tabu" } else { "longtabu" };

    let mut output = String::new();
    if nested {
        output.push_str("{\\parindent=-\\leftskip\\begin{minipage}{\\textwidth}\\centering\n");
    }
    output.push_str("\\begin{ThreePartTable}\n");
    output.push_str(&format!(
        "\\captionof{{table}}{{Index of the {} namespace ``{}''}}%\n",
        if nested { "nested" } else { "root" },
        naked
    ));
    output.push_str(&format!("\\label{{table:dsdl:{}}}%\n", naked));
    output.push_str(
        "\\footnotesize\\setlength\\tabcolsep{4pt}\\setlength{\\tabulinesep}{-2pt}\\setlength{\\extrarowsep}{-2pt}%\n",
    );
    output.push_str(&format!(
        "\\begin{{{}}}{{|l r r|r r|r l|c l|}}\\rowfont{{\\bfseries}}\\hline\n",
        environment
    ));
    output.push_str(
        "Namespace tree & Ver. & FPID & \\multicolumn{2}{c|}{Max bytes} & \\multicolumn{2}{c|}{Page sec.} &\
         \\multicolumn{2}{l|}{Full name and kind (message/service)} \\\\\\hline\n",
    );

    let mut path: Vec<&str> = Vec::new();
    let mut emitted_any = false;
    for group in groups {
        // Page breaks are allowed only between namespaces
        if emitted_any {
            output.push_str("\\pagebreak[2]{}\n");
        }

        let target: Vec<&str> = group.namespace.split('.').collect();
        while !target.starts_with(&path) {
            path.pop();
        }
        for &component in &target[path.len()..] {
            output.push_str(&format!(
                "{}\\texttt{{{}}}&&&&&&&&\\\\\n",
                indent(path.len()),
                escape(component)
            ));
            path.push(component);
        }

        for type_group in &group.types {
            for (index, t) in type_group.versions.iter().enumerate() {
                type_rows(&mut output, t, index == 0, path.len());
                emitted_any = true;
            }
        }
    }

    output.push_str(&format!("\\hline\\end{{{}}}\n", environment));
    output.push_str("\\end{ThreePartTable}\n");
    if nested {
        output.push_str("\\end{minipage}}\n");
    }
    output
}
