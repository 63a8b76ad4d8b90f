//! Catalogue of void and primitive types, ordered by bit length

const MAX_BIT_LENGTH: u32 = 64;
const FLOAT_BIT_LENGTHS: [u32; 3] = [16, 32, 64];

fn primitives_of_length(bits: u32) -> Vec<String> {
    let mut names = vec![format!("\\verb|void{:<3}|", bits)];
    if bits >= 2 {
        names.push(format!("\\verb|int{:<3}|", bits));
    }
    names.push(format!("\\verb|uint{:<3}|", bits));
    if FLOAT_BIT_LENGTHS.contains(&bits) {
        names.push(format!("\\verb|float{:<3}|", bits));
    }
    if bits == 1 {
        names.push("\\verb|bool|".to_string());
    }
    names
}

/// Enumerated list with one item per bit length
pub fn render_primitive_types() -> String {
    let mut output = String::from("\\begin{enumerate}\n");
    for bits in 1..=MAX_BIT_LENGTH {
        output.push_str(&format!(
            "    \\item {}\n",
            primitives_of_length(bits).join(" \\quad{} ")
        ));
    }
    output.push_str("\\end{enumerate}\n");
    output
}
