//! Source listings

use super::RenderOptions;

pub const DEFAULT_MINTED_OPTIONS: &str =
    "fontsize=\\scriptsize, numberblanklines=true, baselinestretch=0.9, autogobble=false";

pub const DEFAULT_LISTING_LANGUAGE: &str = "python";

/// Wrap definition source text in a minted environment, verbatim
pub fn render_listing(options: &RenderOptions, source: &str) -> String {
    format!(
        "\\begin{{minted}}[{}]{{{}}}\n{}\n\\end{{minted}}\n",
        options.minted_options, options.listing_language, source
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_keeps_source_verbatim() {
        let options = RenderOptions {
            minted_options: "fontsize=\\scriptsize".to_string(),
            ..RenderOptions::default()
        };
        let listing = render_listing(&options, "uint8 mode\n@sealed\n");
        assert_eq!(
            listing,
            "\\begin{minted}[fontsize=\\scriptsize]{python}\nuint8 mode\n@sealed\n\n\\end{minted}\n"
        );
    }
}
