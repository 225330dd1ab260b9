use crate::formula::Classification;

pub const OPERATORS_COUNT: usize = 7;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Operator {
    And,
    Or,
    Implies,
    Nand,
    Nor,
    Biconditional,
    Xor,
}

impl Operator {
    pub const ALL: [Operator; OPERATORS_COUNT] = [
        Operator::And,
        Operator::Or,
        Operator::Implies,
        Operator::Nand,
        Operator::Nor,
        Operator::Biconditional,
        Operator::Xor,
    ];

    /// Classification of an un-negated binary formula with this operator
    pub fn classification(self) -> Classification {
        match self {
            Operator::And | Operator::Nor | Operator::Biconditional => Classification::Alpha,
            Operator::Or | Operator::Implies | Operator::Nand | Operator::Xor => {
                Classification::Beta
            }
        }
    }

    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Operator::And => left && right,
            Operator::Or => left || right,
            Operator::Implies => !left || right,
            Operator::Nand => !(left && right),
            Operator::Nor => !(left || right),
            Operator::Biconditional => left == right,
            Operator::Xor => left != right,
        }
    }

    pub fn ascii(self) -> &'static str {
        match self {
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Implies => "->",
            Operator::Nand => "!&",
            Operator::Nor => "!|",
            Operator::Biconditional => "<->",
            Operator::Xor => "^",
        }
    }

    pub fn unicode(self) -> &'static str {
        match self {
            Operator::And => "∧",
            Operator::Or => "∨",
            Operator::Implies => "→",
            Operator::Nand => "↑",
            Operator::Nor => "↓",
            Operator::Biconditional => "↔",
            Operator::Xor => "⊕",
        }
    }

    pub fn latex(self) -> &'static str {
        match self {
            Operator::And => r"\land",
            Operator::Or => r"\lor",
            Operator::Implies => r"\to",
            Operator::Nand => r"\uparrow",
            Operator::Nor => r"\downarrow",
            Operator::Biconditional => r"\leftrightarrow",
            Operator::Xor => r"\oplus",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.ascii())
    }
}

#[test]
fn operator_truth_tables() {
    let rows = [(false, false), (false, true), (true, false), (true, true)];
    let table = |op: Operator| {
        rows.iter()
            .map(|(l, r)| op.apply(*l, *r))
            .collect::<Vec<_>>()
    };

    assert_eq!(table(Operator::And), vec![false, false, false, true]);
    assert_eq!(table(Operator::Or), vec![false, true, true, true]);
    assert_eq!(table(Operator::Implies), vec![true, true, false, true]);
    assert_eq!(table(Operator::Nand), vec![true, true, true, false]);
    assert_eq!(table(Operator::Nor), vec![true, false, false, false]);
    assert_eq!(table(Operator::Biconditional), vec![true, false, false, true]);
    assert_eq!(table(Operator::Xor), vec![false, true, true, false]);
}
