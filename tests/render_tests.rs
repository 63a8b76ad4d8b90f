//! Rendering Tests
//!
//! Renders the fixture namespaces end to end: snapshot loading, selection,
//! index tables, sections and listings.

use std::path::{Path, PathBuf};

use dsdl_docs::{
    DocsError, DsdlType, MetadataProvider, RenderOptions, Renderer, SnapshotFileProvider,
    TypePattern,
};

fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_types() -> Vec<DsdlType> {
    SnapshotFileProvider::new(fixtures_path().join("snapshot.json"))
        .load()
        .unwrap()
}

fn renderer(index_only: bool) -> Renderer {
    Renderer::new(RenderOptions {
        index_only,
        source_root: Some(fixtures_path().join("dsdl")),
        ..RenderOptions::default()
    })
}

fn render(pattern: &str) -> Result<String, DocsError> {
    renderer(false).render(&TypePattern::new(pattern).unwrap(), &fixture_types())
}

// =============================================================================
// Abridged Output
// =============================================================================

#[test]
fn test_single_message_summary() {
    let output = render("uavcan.node.Heartbeat").unwrap();

    assert!(output.starts_with("DSDL source text of \\verb|uavcan.node.Heartbeat|\nversion 1.0\n"));
    assert!(output.contains("(this is the only version)\n"));
    assert!(output.contains("with fixed subject ID 7509\n"));
    assert!(output.contains("section \\ref{sec:dsdl:uavcan.node.Heartbeat} on page \\pageref{sec:dsdl:uavcan.node.Heartbeat}.\n"));
    assert!(output.contains("\\pagebreak[2]{}\n\\begin{minted}"));
    assert!(output.contains("uint32 uptime\n"));
    assert!(output.ends_with("\\end{minted}\n"));
}

#[test]
fn test_summary_skips_deprecated_versions() {
    let output = render("uavcan.node.GetInfo").unwrap();

    assert!(output.contains("version 1.0\n"));
    assert!(output.contains("(there is one older version)\n"));
    assert!(output.contains("with fixed service ID 430\n"));
    assert!(!output.contains("@deprecated"));
}

#[test]
fn test_summary_without_fixed_id() {
    let output = render("uavcan.node.Health").unwrap();
    assert!(output.contains("without fixed subject ID\n"));
}

#[test]
fn test_all_versions_deprecated() {
    match render("reg.udral.Legacy") {
        Err(DocsError::AllDeprecated { pattern }) => assert_eq!(pattern, "reg.udral.Legacy"),
        other => panic!("Expected AllDeprecated, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_no_match_suggests_similar_names() {
    match render("uavcan.node.Hartbeat") {
        Err(DocsError::NoMatch { suggestions, .. }) => {
            assert!(suggestions.contains(&"uavcan.node.Heartbeat".to_string()));
        }
        other => panic!("Expected NoMatch, got {:?}", other.map(|_| ())),
    }
}

// =============================================================================
// Index and Sections
// =============================================================================

#[test]
fn test_root_namespace_document() {
    let output = render("uavcan.*").unwrap();

    assert!(output.starts_with("\\begin{ThreePartTable}\n"));
    assert!(output.contains("\\captionof{table}{Index of the root namespace ``uavcan''}%\n"));
    assert!(output.contains("\\label{table:dsdl:uavcan}%\n"));
    assert!(output.contains("\\begin{longtabu}"));
    assert!(!output.contains("reg.udral"));

    // Namespace tree: root, then both nested namespaces once each
    assert_eq!(output.matches("\\texttt{uavcan}&&&&&&&&\\\\\n").count(), 1);
    assert_eq!(output.matches("\\texttt{node}&&&&&&&&\\\\\n").count(), 1);
    assert_eq!(output.matches("\\texttt{primitive}&&&&&&&&\\\\\n").count(), 1);

    // Sections follow the index
    let index_end = output.find("\\end{ThreePartTable}\n").unwrap();
    let node_section = output.find("\\clearpage\\section{uavcan.node}\n").unwrap();
    let primitive_section = output.find("\\clearpage\\section{uavcan.primitive}\n").unwrap();
    assert!(index_end < node_section);
    assert!(node_section < primitive_section);
}

#[test]
fn test_fixed_port_types_come_first() {
    let output = render("uavcan.node.*").unwrap();

    let heartbeat = output.find("\\subsection{Heartbeat}").unwrap();
    let get_info = output.find("\\subsection{GetInfo}").unwrap();
    let health = output.find("\\subsection{Health}").unwrap();
    let mode = output.find("\\subsection{Mode}").unwrap();
    assert!(get_info < heartbeat);
    assert!(heartbeat < health);
    assert!(health < mode);
}

#[test]
fn test_length_tables() {
    let output = render("uavcan.*").unwrap();

    assert!(output.contains("\nMessage length &56&7&1&1\\\\\n"));
    assert!(output.contains("\nMessage length &0&0&1&1\\\\\n"));
    assert!(output.contains(
        "\nRequest length  &0&0&1&1\\\\Response length &[8, 408]&[1, 51]&[1, 8]&1\\\\\n"
    ));
}

#[test]
fn test_deprecated_versions_listed_as_older() {
    let output = render("uavcan.node.*").unwrap();

    assert!(output.contains("\\subsubsection{Version 1.0, fixed service ID 430}\n"));
    assert!(output.contains("\\subsubsection{Version 0.1, fixed service ID 430, DEPRECATED}\n"));
    assert_eq!(output.matches("older version").count(), 1);
}

#[test]
fn test_nested_namespace_index() {
    let output = render("uavcan.node.*").unwrap();

    assert!(output.starts_with("{\\parindent=-\\leftskip\\begin{minipage}{\\textwidth}\\centering\n"));
    assert!(output.contains("Index of the nested namespace ``uavcan.node''"));
    assert!(output.contains("\\begin{tabu}{|l r r|r r|r l|c l|}"));
}

#[test]
fn test_index_only() {
    let output = renderer(true)
        .render(&TypePattern::new("uavcan.*").unwrap(), &fixture_types())
        .unwrap();

    assert!(output.ends_with("\\end{ThreePartTable}\n"));
    assert!(!output.contains("\\clearpage"));
    assert!(!output.contains("\\begin{minted}"));
}

#[test]
fn test_multiple_root_namespaces() {
    let output = render("*").unwrap();

    // Namespaces holding fixed-ID types lead, so the walk goes
    // uavcan.node -> reg.udral -> uavcan.primitive and re-enters uavcan
    assert_eq!(output.matches("\\texttt{reg}&&&&&&&&\\\\\n").count(), 1);
    assert_eq!(output.matches("\\texttt{uavcan}&&&&&&&&\\\\\n").count(), 2);
    assert_eq!(output.matches("\\texttt{udral}&&&&&&&&\\\\\n").count(), 1);

    let node = output.find("\\section{uavcan.node}").unwrap();
    let udral = output.find("\\section{reg.udral}").unwrap();
    let primitive = output.find("\\section{uavcan.primitive}").unwrap();
    assert!(node < udral);
    assert!(udral < primitive);
}
