use crate::formula::{Formula, Operator};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },
    #[error("expected {expected} at offset {offset}, found '{found}'")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("trailing input '{found}' at offset {offset}")]
    TrailingInput { found: String, offset: usize },
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Token<'a> {
    Open,
    Close,
    Not,
    Op(Operator),
    Variable(&'a str),
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Not => write!(f, "!"),
            Token::Op(op) => write!(f, "{}", op.ascii()),
            Token::Variable(name) => write!(f, "{}", name),
        }
    }
}

fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn tokenize(source: &str) -> Result<Vec<(usize, Token<'_>)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let rest = &source[offset..];
        let token = match c {
            ' ' | '\t' | '\r' | '\n' => continue,
            '(' => Token::Open,
            ')' => Token::Close,
            '&' => Token::Op(Operator::And),
            '|' => Token::Op(Operator::Or),
            '^' => Token::Op(Operator::Xor),
            '!' if rest.starts_with("!&") => {
                chars.next();
                Token::Op(Operator::Nand)
            }
            '!' if rest.starts_with("!|") => {
                chars.next();
                Token::Op(Operator::Nor)
            }
            '!' => Token::Not,
            '-' if rest.starts_with("->") => {
                chars.next();
                Token::Op(Operator::Implies)
            }
            '<' if rest.starts_with("<->") => {
                chars.next();
                chars.next();
                Token::Op(Operator::Biconditional)
            }
            c if is_variable_char(c) => {
                let len = rest.find(|c| !is_variable_char(c)).unwrap_or(rest.len());
                while chars.peek().map_or(false, |(idx, _)| *idx < offset + len) {
                    chars.next();
                }
                Token::Variable(&rest[..len])
            }
            character => return Err(ParseError::UnexpectedCharacter { character, offset }),
        };
        tokens.push((offset, token));
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<(usize, Token<'a>)>,
    position: usize,
}

impl<'a> Parser<'a> {
    fn next(&mut self, expected: &'static str) -> Result<(usize, Token<'a>), ParseError> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        self.position += 1;
        Ok(token)
    }

    /// Parses one formula with an explicit stack of unfinished connectives,
    /// so nesting depth is bounded by memory rather than the call stack
    fn formula(&mut self) -> Result<Formula, ParseError> {
        const EXPECTED: &str = "a letter, '!' or '('";
        let mut frames = Vec::new();

        loop {
            let mut formula = match self.next(EXPECTED)? {
                (_, Token::Variable(name)) => Formula::letter(name),
                (_, Token::Not) => {
                    frames.push(Frame::Not);
                    continue;
                }
                (_, Token::Open) => {
                    frames.push(Frame::Open);
                    continue;
                }
                (offset, found) => return Err(unexpected(EXPECTED, found, offset)),
            };

            loop {
                match frames.pop() {
                    None => return Ok(formula),
                    Some(Frame::Not) => formula = Formula::not(formula),
                    Some(Frame::Open) => {
                        let op = match self.next("a binary operator")? {
                            (_, Token::Op(op)) => op,
                            (offset, found) => {
                                return Err(unexpected("a binary operator", found, offset))
                            }
                        };
                        frames.push(Frame::Left(formula, op));
                        break;
                    }
                    Some(Frame::Left(left, op)) => match self.next("')'")? {
                        (_, Token::Close) => formula = Formula::binary(left, formula, op),
                        (offset, found) => return Err(unexpected("')'", found, offset)),
                    },
                }
            }
        }
    }
}

/// A connective whose operands are still being parsed
enum Frame {
    Not,
    Open,
    /// Left operand and operator, waiting for the right operand
    Left(Formula, Operator),
}

fn unexpected(expected: &'static str, found: Token, offset: usize) -> ParseError {
    ParseError::UnexpectedToken {
        expected,
        found: found.to_string(),
        offset,
    }
}

/// Parses a fully parenthesized formula such as `!((a !& !b) ^ (a <-> c))`
pub fn parse(source: &str) -> Result<Formula, ParseError> {
    let mut parser = Parser {
        tokens: tokenize(source)?,
        position: 0,
    };
    let formula = parser.formula()?;

    match parser.tokens.get(parser.position) {
        None => Ok(formula),
        Some((offset, token)) => Err(ParseError::TrailingInput {
            found: token.to_string(),
            offset: *offset,
        }),
    }
}

#[test]
fn parse_operators() -> Result<(), ParseError> {
    let (p, q) = (Formula::letter("p"), Formula::letter("q"));

    assert_eq!(parse("p")?, p);
    assert_eq!(parse("!p")?, Formula::not(p.clone()));
    assert_eq!(parse("(p & q)")?, Formula::and(p.clone(), q.clone()));
    assert_eq!(parse("(p | q)")?, Formula::or(p.clone(), q.clone()));
    assert_eq!(parse("(p -> q)")?, Formula::implies(p.clone(), q.clone()));
    assert_eq!(parse("(p <-> q)")?, Formula::biconditional(p.clone(), q.clone()));
    assert_eq!(parse("(p !& q)")?, Formula::nand(p.clone(), q.clone()));
    assert_eq!(parse("(p !| q)")?, Formula::nor(p.clone(), q.clone()));
    assert_eq!(parse("(p ^ q)")?, Formula::xor(p, q));

    Ok(())
}

#[test]
fn parse_nested() -> Result<(), ParseError> {
    let (a, b, c) = (
        Formula::letter("a"),
        Formula::letter("b"),
        Formula::letter("c"),
    );
    let expected = Formula::not(Formula::xor(
        Formula::nand(a.clone(), Formula::not(b.clone())),
        Formula::biconditional(a, Formula::not(Formula::or(b, c))),
    ));

    assert_eq!(parse("!((a !& !b) ^ (a <-> !(b | c)))")?, expected);
    assert_eq!(parse(" !( (a!&!b)\n^(a<->!(b|c)) ) ")?, expected);
    assert_eq!(parse(&expected.to_string())?, expected);

    Ok(())
}

#[test]
fn parse_long_names() -> Result<(), ParseError> {
    assert_eq!(
        parse("(P_1 -> q23)")?,
        Formula::implies(Formula::letter("P_1"), Formula::letter("q23"))
    );
    Ok(())
}

#[test]
fn parse_errors() {
    assert_eq!(
        parse("(p + q)"),
        Err(ParseError::UnexpectedCharacter {
            character: '+',
            offset: 3
        })
    );
    assert_eq!(
        parse("(p & q"),
        Err(ParseError::UnexpectedEnd { expected: "')'" })
    );
    assert_eq!(
        parse("p q"),
        Err(ParseError::TrailingInput {
            found: "q".to_string(),
            offset: 2
        })
    );
    assert!(matches!(
        parse("(p q)"),
        Err(ParseError::UnexpectedToken { offset: 3, .. })
    ));
    assert!(matches!(
        parse("p & q"),
        Err(ParseError::TrailingInput { offset: 2, .. })
    ));
    assert!(matches!(parse(""), Err(ParseError::UnexpectedEnd { .. })));
    assert!(matches!(parse("-p"), Err(ParseError::UnexpectedCharacter { .. })));
}

#[test]
fn parse_deep_nesting() -> Result<(), ParseError> {
    let depth = 200_000;
    let negated = parse(&format!("{}p", "!".repeat(depth)))?;
    assert_eq!(negated.size(), depth + 1);
    assert_eq!(negated.letters().len(), 1);

    let nested = parse(&format!("{}p{}", "(q & ".repeat(depth), ")".repeat(depth)))?;
    assert_eq!(nested.size(), 2 * depth + 1);
    assert_eq!(
        nested.classification(),
        crate::formula::Classification::Alpha
    );

    assert_eq!(
        parse(&format!("{}(p &", "!".repeat(depth))),
        Err(ParseError::UnexpectedEnd {
            expected: "a letter, '!' or '('"
        })
    );
    Ok(())
}
