//! Mermaid-text serialization of a derived flowchart.
//!
//! The diagramming collaborator owns actual drawing; this module produces
//! the `graph TD` source it consumes.

use super::{FlowGraph, NodeShape};

/// Render seam for the external diagramming collaborator. A failure here is
/// reported to the caller and never invalidates the transpilation result
/// that produced the graph.
pub trait FlowRenderer {
    fn render(&self, graph: &FlowGraph) -> Result<String, String>;
}

/// Serializes a `FlowGraph` to Mermaid `graph TD` source.
pub struct MermaidRenderer;

impl FlowRenderer for MermaidRenderer {
    fn render(&self, graph: &FlowGraph) -> Result<String, String> {
        let mut out = String::from("graph TD\n");
        for node in graph.nodes() {
            let label = escape(&node.label);
            match node.shape {
                NodeShape::Process => out.push_str(&format!("    {}[{}]\n", node.id, label)),
                NodeShape::Decision => out.push_str(&format!("    {}{{{}}}\n", node.id, label)),
                NodeShape::Io => out.push_str(&format!("    {}[/{}/]\n", node.id, label)),
            }
        }
        for edge in graph.edges() {
            match edge.label {
                Some(label) => out.push_str(&format!(
                    "    {} -->|{}| {}\n",
                    edge.from_id, label, edge.to_id
                )),
                None => out.push_str(&format!("    {} --> {}\n", edge.from_id, edge.to_id)),
            }
        }
        Ok(out)
    }
}

/// Escape characters Mermaid treats specially inside node labels.
fn escape(text: &str) -> String {
    text.replace('"', "#quot;")
        .replace('\'', "#apos;")
        .replace('<', "#lt;")
        .replace('>', "#gt;")
        .replace('&', "#amp;")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flowchart::derive_flowchart;
    use crate::syntax::types::SourceLang;

    #[test]
    fn test_render_straight_line() {
        let graph = derive_flowchart("x = 1", SourceLang::Python);
        let text = MermaidRenderer.render(&graph).unwrap();
        assert!(text.starts_with("graph TD\n"));
        assert!(text.contains("start[開始]"));
        assert!(text.contains("n1[x = 1]"));
        assert!(text.contains("end[終了]"));
        assert!(text.contains("start --> n1"));
        assert!(text.contains("n1 --> end"));
    }

    #[test]
    fn test_render_shapes() {
        let src = "x = int(input())\nif x > 0:\n    print(x)";
        let graph = derive_flowchart(src, SourceLang::Python);
        let text = MermaidRenderer.render(&graph).unwrap();
        assert!(text.contains("[/x = int(input())/]"));
        assert!(text.contains("{x #gt; 0}"));
    }

    #[test]
    fn test_render_edge_labels() {
        let src = "if a:\n    print(1)\nelse:\n    print(2)";
        let graph = derive_flowchart(src, SourceLang::Python);
        let text = MermaidRenderer.render(&graph).unwrap();
        assert!(text.contains("-->|Yes|"));
        assert!(text.contains("-->|No|"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < \"b\""), "a #lt; #quot;b#quot;");
        assert_eq!(escape("x & 'y'"), "x #amp; #apos;y#apos;");
    }
}
