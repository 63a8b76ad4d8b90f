//! Serialized length table

use crate::schema::{DsdlType, TypeShape};
use crate::size::{BitLengthRange, LengthSummary};

/// Table cells of one row: bits, bytes, frames at MTU 8 and 64
fn length_cells(range: BitLengthRange) -> String {
    LengthSummary::from_bits(range)
        .columns()
        .iter()
        .map(|span| span.to_string())
        .collect::<Vec<_>>()
        .join("&")
}

/// Length table of one type version
pub fn render_length_table(t: &DsdlType) -> String {
    let rows = match t.shape {
        TypeShape::Message { bit_length_range } => {
            format!("Message length &{}\\\\", length_cells(bit_length_range))
        }
        TypeShape::Service { request, response } => format!(
            "Request length  &{}\\\\Response length &{}\\\\",
            length_cells(request),
            length_cells(response)
        ),
    };

    let mut output = String::new();
    output.push_str("{\\footnotesize\n");
    output.push_str("\\begin{tabu}{|r|c c c c|}\\hline\n");
    output.push_str("Length unit & Bit & Byte (octet) & CAN MTU 8 & CAN MTU 64 \\\\\\hline\n");
    output.push_str(&rows);
    output.push('\n');
    output.push_str("\\hline\\end{tabu}\n");
    output.push_str("}\n");
    output
}
