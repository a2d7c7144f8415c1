/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Link { url: String, content: Vec<Span> },
    LineBreak,
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text(text.into())
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span::Bold(vec![Span::text(text)])
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Span::Italic(vec![Span::text(text)])
    }
}

/// A single bullet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<Span>,
}

/// A bulleted list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub items: Vec<ListItem>,
}

impl List {
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        List {
            items: lines
                .iter()
                .map(|line| ListItem {
                    content: vec![Span::text(line.as_ref())],
                })
                .collect(),
        }
    }
}

/// Block-level elements of an assembled document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Span> },
    Paragraph { content: Vec<Span> },
    List(List),
    Rule,
}
