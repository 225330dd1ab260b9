//! Text renderings of a finished tableau. Everything here only walks the
//! read-only [`NodeRef`] interface.

use crate::{
    formula::{Formula, Notation},
    tableau::{Mark, NodeRef, Strategy},
};
use std::fmt::{self, Write};

const TEX_INDENT: usize = 3;

/// Symbols printed under open and closed leaves
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Marks {
    pub open: &'static str,
    pub closed: &'static str,
}

impl Marks {
    pub const WORDS: Marks = Marks {
        open: "OPEN",
        closed: "CLOSE",
    };

    pub const CIRCLES: Marks = Marks {
        open: "○",
        closed: "●",
    };

    fn of<S: Strategy>(self, node: NodeRef<'_, S>) -> &'static str {
        if node.is_open() {
            self.open
        } else {
            self.closed
        }
    }
}

fn formulas<'a>(
    out: &mut impl Write,
    formulas: impl Iterator<Item = &'a Formula>,
    notation: Notation,
) -> fmt::Result {
    for (i, formula) in formulas.enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{}", formula.display(notation))?;
    }
    Ok(())
}

/// Brace-nested dump of the node values, children and leaf marks
pub fn nested<S: Strategy>(node: NodeRef<'_, S>) -> String {
    Nested(node).to_string()
}

/// [`Display`](fmt::Display) form of [`nested`]
pub struct Nested<'a, S: Strategy>(pub NodeRef<'a, S>);

impl<S: Strategy> fmt::Display for Nested<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        dump(f, self.0, "")
    }
}

fn dump<S: Strategy>(out: &mut impl Write, node: NodeRef<'_, S>, indent: &str) -> fmt::Result {
    write!(out, "{{\n{}  values: {{", indent)?;
    formulas(out, node.formulas(), Notation::Ascii)?;
    out.write_str("}\n")?;

    let inner = format!("{}  ", indent);
    for (name, child) in [("left", node.left()), ("right", node.right())].iter() {
        if let Some(child) = child {
            write!(out, "{}{}: ", inner, name)?;
            dump(out, *child, &inner)?;
            out.write_char('\n')?;
        }
    }
    if node.mark() != Mark::Unmarked {
        writeln!(out, "{}mark: {}", inner, node.mark())?;
    }
    write!(out, "{}}}", indent)
}

/// Indented tree with box-drawing connectors. Leaves are underlined and
/// followed by their mark.
pub fn ascii_tree<S: Strategy>(root: NodeRef<'_, S>, notation: Notation, marks: Marks) -> String {
    AsciiTree {
        root,
        notation,
        marks,
    }
    .to_string()
}

/// [`Display`](fmt::Display) form of [`ascii_tree`]
pub struct AsciiTree<'a, S: Strategy> {
    pub root: NodeRef<'a, S>,
    pub notation: Notation,
    pub marks: Marks,
}

impl<S: Strategy> fmt::Display for AsciiTree<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        draw(f, self.root, self.notation, self.marks, "", "")
    }
}

fn draw<S: Strategy>(
    out: &mut impl Write,
    node: NodeRef<'_, S>,
    notation: Notation,
    marks: Marks,
    first_prefix: &str,
    prefix: &str,
) -> fmt::Result {
    let mut value = String::from("{");
    formulas(&mut value, node.formulas(), notation)?;
    value.push('}');
    writeln!(out, "{}{}", first_prefix, value)?;

    if node.is_leaf() {
        let width = value.chars().count();
        let mark = marks.of(node);
        let offset = (width / 2 + 1).saturating_sub(mark.chars().count() / 2);
        writeln!(out, "{}{}", prefix, "-".repeat(width))?;
        return writeln!(out, "{}{}{}", prefix, " ".repeat(offset), mark);
    }

    let children = node.children().collect::<Vec<_>>();
    for (i, child) in children.iter().enumerate() {
        let (connector, continuation) = if i + 1 == children.len() {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        draw(
            out,
            *child,
            notation,
            marks,
            &format!("{}{}", prefix, connector),
            &format!("{}{}", prefix, continuation),
        )?;
    }
    Ok(())
}

/// The tree as a LaTeX `forest` environment
pub fn tex_forest<S: Strategy>(root: NodeRef<'_, S>) -> String {
    TexForest(root).to_string()
}

/// [`Display`](fmt::Display) form of [`tex_forest`]
pub struct TexForest<'a, S: Strategy>(pub NodeRef<'a, S>);

impl<S: Strategy> fmt::Display for TexForest<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\\begin{forest}\n    for tree={anchor=north}\n")?;
        forest(f, self.0, 0)?;
        f.write_str("\\end{forest}\n")
    }
}

fn forest<S: Strategy>(out: &mut impl Write, node: NodeRef<'_, S>, depth: usize) -> fmt::Result {
    let indent = " ".repeat(depth * TEX_INDENT);
    let mut value = String::from(r"{$\left\{");
    formulas(&mut value, node.formulas(), Notation::Latex)?;
    value.push_str(r"\right\}$}");

    if node.is_leaf() {
        let mark = if node.is_open() { r"\odot" } else { r"\times" };
        return writeln!(out, r"{}[\shortstack{{{}\\${}$}}]", indent, value, mark);
    }

    writeln!(out, "{}[{}", indent, value)?;
    for child in node.children() {
        forest(out, child, depth + 1)?;
    }
    writeln!(out, "{}]", indent)
}

#[cfg(test)]
use crate::{semantic_tableau, ParseError};

#[test]
fn ascii_tree_words() -> Result<(), ParseError> {
    let tableau = semantic_tableau("(p | !p)".parse()?);
    assert_eq!(
        ascii_tree(tableau.root(), Notation::Ascii, Marks::WORDS),
        concat!(
            "{(p | !p)}\n",
            "├── {p}\n",
            "│   ---\n",
            "│   OPEN\n",
            "└── {!p}\n",
            "    ----\n",
            "     OPEN\n",
        )
    );
    Ok(())
}

#[test]
fn ascii_tree_circles() -> Result<(), ParseError> {
    let tableau = semantic_tableau("(p & !p)".parse()?);
    assert_eq!(
        ascii_tree(tableau.root(), Notation::Unicode, Marks::CIRCLES),
        concat!(
            "{(p ∧ ¬p)}\n",
            "└── {p, ¬p}\n",
            "    -------\n",
            "        ●\n",
        )
    );
    Ok(())
}

#[test]
fn nested_dump() -> Result<(), ParseError> {
    let tableau = semantic_tableau("(p & !p)".parse()?);
    assert_eq!(
        nested(tableau.root()),
        "{\n  values: {(p & !p)}\n  left: {\n    values: {p, !p}\n    mark: Closed\n  }\n}"
    );
    Ok(())
}

#[test]
fn tex_forest_leaves() -> Result<(), ParseError> {
    let tableau = semantic_tableau("(p & !p)".parse()?);
    assert_eq!(
        tex_forest(tableau.root()),
        "\\begin{forest}\n    for tree={anchor=north}\n\
         [{$\\left\\{\\left(p \\land \\neg p\\right)\\right\\}$}\n   \
         [\\shortstack{{$\\left\\{p, \\neg p\\right\\}$}\\\\$\\times$}]\n\
         ]\n\
         \\end{forest}\n"
    );
    Ok(())
}

#[test]
fn write_errors_propagate() -> Result<(), ParseError> {
    /// Accepts `.0` more bytes, then fails
    struct Limited(usize);

    impl Write for Limited {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0 = self.0.checked_sub(s.len()).ok_or(fmt::Error)?;
            Ok(())
        }
    }

    let tableau = semantic_tableau("((p | q) & !p)".parse()?);
    let root = tableau.root();
    let tree = AsciiTree {
        root,
        notation: Notation::Unicode,
        marks: Marks::CIRCLES,
    };
    let full = tree.to_string().len();

    assert!(write!(Limited(full), "{}", tree).is_ok());
    assert!(write!(Limited(full - 1), "{}", tree).is_err());
    assert!(write!(Limited(10), "{}", Nested(root)).is_err());
    assert!(write!(Limited(10), "{}", TexForest(root)).is_err());
    assert_eq!(format!("{}", TexForest(root)), tex_forest(root));
    Ok(())
}
