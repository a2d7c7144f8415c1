use crate::block::{Block, List, Span};
use crate::config::Config;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = preamble(config);

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_heading(block, &mut out);

                // Include the next block if it exists (to keep heading with first content)
                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, config, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn preamble(config: &Config) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "#set page(paper: {}, margin: {}, fill: rgb({})",
        string_literal(&config.page.paper),
        config.page.margin,
        string_literal(&config.page.fill)
    ));
    if config.page.numbers {
        out.push_str(", numbering: \"1\"");
    }
    out.push_str(")\n");

    out.push_str(&format!(
        "#set text(font: {}, size: {}, fill: rgb({}))\n",
        string_literal(&config.font.family),
        config.font.size,
        string_literal(&config.colors.text)
    ));
    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    out.push_str(&format!(
        "#show heading: set text(fill: rgb({}))\n",
        string_literal(&config.colors.heading)
    ));
    out.push_str(&format!(
        "#show link: set text(fill: rgb({}))\n",
        string_literal(&config.links.color)
    ));
    if config.links.underline {
        out.push_str("#show link: underline\n");
    }
    out.push('\n');

    out
}

fn emit_heading(block: &Block, out: &mut String) {
    if let Block::Heading { level, content } = block {
        for _ in 0..*level {
            out.push('=');
        }
        out.push(' ');
        spans_to_typst(content, out);
        out.push('\n');
        out.push('\n');
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { .. } => {
            emit_heading(block, out);
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push('\n');
            out.push('\n');
        }
        Block::List(list) => {
            // Wrap list to keep together when small, allow breaks when large
            if list.items.len() <= 5 {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
        Block::Rule => {
            out.push_str(&format!(
                "#line(length: 100%, stroke: 2pt + rgb({}))\n\n",
                string_literal(&config.colors.rule)
            ));
        }
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_typst(span, out);
    }
}

fn span_to_typst(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => escape_text(text, out),
        Span::Bold(inner) => {
            out.push('*');
            spans_to_typst(inner, out);
            out.push('*');
        }
        Span::Italic(inner) => {
            out.push('_');
            spans_to_typst(inner, out);
            out.push('_');
        }
        Span::Link { url, content } => {
            out.push_str("#link(");
            out.push_str(&string_literal(url));
            out.push_str(")[");
            spans_to_typst(content, out);
            out.push(']');
        }
        Span::LineBreak => {
            out.push_str(" \\\n");
        }
    }
}

/// Escape markup characters so résumé text is rendered literally.
fn escape_text(text: &str, out: &mut String) {
    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            out.push('\n');
        }
        escape_line(line, out);
    }
}

fn escape_line(line: &str, out: &mut String) {
    let content = line.trim_start();
    out.push_str(&line[..line.len() - content.len()]);

    // "2023. Foo" at the start of a line would become an enumeration
    let digits = content.chars().take_while(char::is_ascii_digit).count();
    let enum_dot = (digits > 0 && content[digits..].starts_with('.')).then_some(digits);

    for (i, ch) in content.chars().enumerate() {
        match ch {
            '.' if Some(i) == enum_dot => out.push_str("\\."),
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' | '=' => {
                out.push('\\');
                out.push(ch);
            }
            // List markers only matter at the start of a line
            '-' | '+' if i == 0 => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// A Typst string literal
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn list_to_typst(list: &List, out: &mut String) {
    for item in &list.items {
        out.push_str("- ");
        spans_to_typst(&item.content, out);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ListItem;

    fn body(blocks: &[Block]) -> String {
        let config = Config::compiled_default();
        let out = blocks_to_typst(blocks, &config);
        out[preamble(&config).len()..].to_string()
    }

    fn para(text: &str) -> Block {
        Block::Paragraph {
            content: vec![Span::text(text)],
        }
    }

    #[test]
    fn preamble_uses_config() {
        let mut config = Config::compiled_default();
        config.page.numbers = true;
        config.links.underline = false;
        let out = preamble(&config);

        assert!(out.starts_with(
            "#set page(paper: \"a4\", margin: 1.9cm, fill: rgb(\"#f0f0f0\"), numbering: \"1\")\n"
        ));
        assert!(out.contains("#set text(font: \"Libertinus Serif\", size: 10.5pt, fill: rgb(\"#000000\"))\n"));
        assert!(out.contains("#show link: set text(fill: rgb(\"#1a4f8b\"))\n"));
        assert!(!out.contains("#show link: underline"));
    }

    #[test]
    fn heading_with_following_content() {
        let blocks = [
            Block::Heading {
                level: 2,
                content: vec![Span::text("Skills")],
            },
            para("Some text."),
        ];
        assert_eq!(
            body(&blocks),
            "#block(breakable: false)[\n== Skills\n\nSome text.\n\n]\n\n"
        );
    }

    #[test]
    fn bold_italic_and_break() {
        let blocks = [Block::Paragraph {
            content: vec![
                Span::bold("Analyst"),
                Span::LineBreak,
                Span::text("Acme · "),
                Span::italic("2021"),
            ],
        }];
        assert_eq!(body(&blocks), "*Analyst* \\\nAcme · _2021_\n\n");
    }

    #[test]
    fn link() {
        let blocks = [Block::Paragraph {
            content: vec![Span::Link {
                url: "mailto:jane@example.com".to_string(),
                content: vec![Span::text("jane@example.com")],
            }],
        }];
        assert_eq!(
            body(&blocks),
            "#link(\"mailto:jane@example.com\")[jane\\@example.com]\n\n"
        );
    }

    #[test]
    fn small_list_kept_together() {
        let blocks = [Block::List(List::from_lines(&["one", "two"]))];
        assert_eq!(body(&blocks), "#block(breakable: false)[\n- one\n- two\n]\n\n");
    }

    #[test]
    fn long_list_may_break() {
        let lines = ["a", "b", "c", "d", "e", "f"];
        let blocks = [Block::List(List::from_lines(&lines))];
        assert_eq!(body(&blocks), "- a\n- b\n- c\n- d\n- e\n- f\n\n");
    }

    #[test]
    fn rule_uses_configured_color() {
        assert_eq!(
            body(&[Block::Rule]),
            "#line(length: 100%, stroke: 2pt + rgb(\"#00aa00\"))\n\n"
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(body(&[para("a * b")]), "a \\* b\n\n");
        assert_eq!(body(&[para("C# and F#")]), "C\\# and F\\#\n\n");
        assert_eq!(body(&[para("HTML/CSS")]), "HTML\\/CSS\n\n");
        assert_eq!(body(&[para("a_b")]), "a\\_b\n\n");
        assert_eq!(body(&[para("English - B2")]), "English - B2\n\n");
        assert_eq!(body(&[para("- leading")]), "\\- leading\n\n");
        assert_eq!(body(&[para("+48 600")]), "\\+48 600\n\n");
        assert_eq!(body(&[para("2023. Joined")]), "2023\\. Joined\n\n");
        assert_eq!(body(&[para("v1.2")]), "v1.2\n\n");
    }

    #[test]
    fn line_start_markers_escaped_after_newline() {
        assert_eq!(
            body(&[para("a\n- b\n12. c")]),
            "a\n\\- b\n12\\. c\n\n"
        );
        assert_eq!(body(&[para("a\n  + b")]), "a\n  \\+ b\n\n");
        assert_eq!(body(&[para("a - b\nc 1. d")]), "a - b\nc 1. d\n\n");
    }

    #[test]
    fn list_item_content_escaped() {
        let blocks = [Block::List(List {
            items: vec![ListItem {
                content: vec![Span::text("Reduced time by 70% [CRM]")],
            }],
        })];
        assert_eq!(
            body(&blocks),
            "#block(breakable: false)[\n- Reduced time by 70% \\[CRM\\]\n]\n\n"
        );
    }

    #[test]
    fn string_literal_escapes_quotes() {
        assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }
}
