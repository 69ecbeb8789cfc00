use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "li", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Renders an entry's HTML fragment as plain text.
///
/// Whitespace inside a block collapses to single spaces, block elements start
/// on their own line and list items get a `- ` bullet. A CDATA wrapper left in
/// the text by an upstream parser is removed first.
pub fn content_to_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .unwrap_or(trimmed);

    let fragment = Html::parse_fragment(inner);
    let mut out = TextBuilder::default();
    for child in fragment.root_element().children() {
        visit(child, &mut out);
    }
    out.finish()
}

fn visit(node: NodeRef<'_, Node>, out: &mut TextBuilder) {
    match node.value() {
        Node::Text(text) => out.push_text(text),
        Node::Element(element) => {
            let name = element.name();
            if name == "br" {
                out.break_line();
                return;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.break_line();
            }
            if name == "li" {
                out.push_word("-");
            }
            for child in node.children() {
                visit(child, out);
            }
            if block {
                out.break_line();
            }
        }
        _ => {}
    }
}

#[derive(Debug, Default)]
struct TextBuilder {
    lines: Vec<String>,
    current: String,
    pending_space: bool,
}

impl TextBuilder {
    fn push_text(&mut self, text: &str) {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        let mut words = text.split_whitespace().peekable();
        while let Some(word) = words.next() {
            self.push_word(word);
            if words.peek().is_some() {
                self.pending_space = true;
            }
        }
        if text.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    fn push_word(&mut self, word: &str) {
        if self.pending_space && !self.current.is_empty() {
            self.current.push(' ');
        }
        self.current.push_str(word);
        self.pending_space = word == "-";
    }

    fn break_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
        self.pending_space = false;
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}
