use crate::document::{Document, Node};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render the page as indented pseudo-markup. Hidden nodes carry `style="display:none"`.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    render_node(document.root(), 0, &mut out);
    out
}

fn render_node(node: &Node, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    let _ = write!(out, "{}<{}{}>", indent, node.tag(), render_attributes(node));

    let children = node.children();
    let text = node.text();
    if children.is_empty() {
        if let Some(text) = text {
            out.push_str(&text);
        }
        let _ = writeln!(out, "</{}>", node.tag());
        return;
    }

    out.push('\n');
    if let Some(text) = text {
        let _ = writeln!(out, "{}{}{}", indent, INDENT, text);
    }
    for child in children.iter() {
        render_node(child, depth + 1, out);
    }
    let _ = writeln!(out, "{}</{}>", indent, node.tag());
}

fn render_attributes(node: &Node) -> String {
    let mut attributes = String::new();

    if let Some(id) = node.dom_id() {
        let _ = write!(attributes, " id=\"{}\"", id);
    }

    let classes = node.classes();
    if !classes.is_empty() {
        let _ = write!(attributes, " class=\"{}\"", classes.join(" "));
    }

    for (name, value) in node.attributes().iter() {
        let _ = write!(attributes, " {}=\"{}\"", name, value);
    }

    if !node.is_visible() {
        attributes.push_str(" style=\"display:none\"");
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::{new_div_with_id, new_document};

    #[test]
    fn test_render_empty_document() {
        let document = new_document();
        assert_eq!(render(&document), "<html>\n  <body></body>\n</html>\n");
    }

    #[test]
    fn test_render_attributes_and_hidden() {
        let document = new_document();
        let panel = new_div_with_id("panel");
        panel.add_class("a");
        panel.add_class("b");
        panel.set_attribute("role", "button");
        panel.set_text("Hello");
        panel.hide();
        document.body().append_child(panel);

        let expected = concat!(
            "<html>\n",
            "  <body>\n",
            "    <div id=\"panel\" class=\"a b\" role=\"button\" ",
            "style=\"display:none\">Hello</div>\n",
            "  </body>\n",
            "</html>\n",
        );
        assert_eq!(render(&document), expected);
    }
}
