use num_bigint::BigInt;

/// SMT-LIB term (expression) representation.
///
/// All arithmetic is in the theory of unbounded integers; bounded machine
/// semantics are expressed by the encoder through explicit range checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Boolean literal
    BoolLit(bool),
    /// Integer literal (unbounded)
    IntLit(BigInt),
    /// Named constant/variable reference
    Const(String),

    // === Boolean operations ===
    /// Logical NOT
    Not(Box<Term>),
    /// Logical AND
    And(Box<Term>, Box<Term>),
    /// Logical OR
    Or(Box<Term>, Box<Term>),
    /// Logical implication: `(=> a b)`
    Implies(Box<Term>, Box<Term>),

    // === Core ===
    /// Equality: `(= a b)`
    Eq(Box<Term>, Box<Term>),
    /// Disequality: `(distinct a b)`
    Distinct(Box<Term>, Box<Term>),
    /// If-then-else: `(ite cond then else)`
    Ite(Box<Term>, Box<Term>, Box<Term>),

    // === Integer arithmetic ===
    /// `(+ a b)`
    Add(Box<Term>, Box<Term>),
    /// `(- a b)`
    Sub(Box<Term>, Box<Term>),
    /// `(* a b)`
    Mul(Box<Term>, Box<Term>),
    /// `(div a b)` — SMT-LIB integer division, rounds toward negative infinity
    Div(Box<Term>, Box<Term>),

    // === Integer comparison ===
    /// `(< a b)`
    Lt(Box<Term>, Box<Term>),
    /// `(<= a b)`
    Le(Box<Term>, Box<Term>),
    /// `(> a b)`
    Gt(Box<Term>, Box<Term>),
    /// `(>= a b)`
    Ge(Box<Term>, Box<Term>),

    // === Array operations ===
    /// `(select array index)`
    Select(Box<Term>, Box<Term>),
    /// `(store array index value)`
    Store(Box<Term>, Box<Term>, Box<Term>),

    // === Function application ===
    /// `(f arg1 arg2 ...)`
    App(String, Vec<Term>),
}

macro_rules! binary_ctor {
    ($(#[$doc:meta])* $name:ident, $variant:ident) => {
        $(#[$doc])*
        pub fn $name(lhs: Term, rhs: Term) -> Term {
            Term::$variant(Box::new(lhs), Box::new(rhs))
        }
    };
}

impl Term {
    /// Integer literal from any machine integer or `BigInt`.
    pub fn int(value: impl Into<BigInt>) -> Term {
        Term::IntLit(value.into())
    }

    /// The always-true term.
    pub fn top() -> Term {
        Term::BoolLit(true)
    }

    /// Boolean negation.
    pub fn not(inner: Term) -> Term {
        Term::Not(Box::new(inner))
    }

    binary_ctor!(and, And);
    binary_ctor!(or, Or);
    binary_ctor!(implies, Implies);
    binary_ctor!(eq, Eq);
    binary_ctor!(
        /// Disequality, encoded as `distinct`.
        distinct,
        Distinct
    );
    binary_ctor!(add, Add);
    binary_ctor!(sub, Sub);
    binary_ctor!(mul, Mul);
    binary_ctor!(div, Div);
    binary_ctor!(lt, Lt);
    binary_ctor!(le, Le);
    binary_ctor!(gt, Gt);
    binary_ctor!(ge, Ge);
    binary_ctor!(select, Select);

    /// If-then-else.
    pub fn ite(cond: Term, then: Term, els: Term) -> Term {
        Term::Ite(Box::new(cond), Box::new(then), Box::new(els))
    }

    /// Array store.
    pub fn store(array: Term, index: Term, value: Term) -> Term {
        Term::Store(Box::new(array), Box::new(index), Box::new(value))
    }

    /// Uninterpreted function application.
    pub fn app(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::App(name.into(), args)
    }

    /// The head symbol of the term: the constant or literal text for leaves,
    /// the operator name otherwise.
    ///
    /// Model rows whose value equals the head symbol carry no information
    /// and are suppressed when counter-examples are rendered.
    pub fn head_name(&self) -> String {
        match self {
            Term::BoolLit(b) => b.to_string(),
            Term::IntLit(n) => n.to_string(),
            Term::Const(name) => name.clone(),
            Term::Not(_) => "not".into(),
            Term::And(..) => "and".into(),
            Term::Or(..) => "or".into(),
            Term::Implies(..) => "=>".into(),
            Term::Eq(..) => "=".into(),
            Term::Distinct(..) => "distinct".into(),
            Term::Ite(..) => "ite".into(),
            Term::Add(..) => "+".into(),
            Term::Sub(..) => "-".into(),
            Term::Mul(..) => "*".into(),
            Term::Div(..) => "div".into(),
            Term::Lt(..) => "<".into(),
            Term::Le(..) => "<=".into(),
            Term::Gt(..) => ">".into(),
            Term::Ge(..) => ">=".into(),
            Term::Select(..) => "select".into(),
            Term::Store(..) => "store".into(),
            Term::App(name, _) => name.clone(),
        }
    }
}
