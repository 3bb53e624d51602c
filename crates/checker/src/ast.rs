//! Typed AST of the Source language, as handed over by the front-end.
//!
//! This mirrors the front-end's annotated syntax tree but is decoupled from
//! any parser, making the checker fully testable in isolation: test suites
//! build programs through [`builder::AstBuilder`].
//!
//! Node identity is a stable numeric [`NodeId`] assigned by the front-end;
//! the checker keys its symbol tables on it.

use num_bigint::BigInt;

/// Stable numeric identity of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub start: usize,
    pub end: usize,
}

impl Loc {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Lexical source cache, used only to render the text of index accesses and
/// uninterpreted calls in counter-examples.
#[derive(Debug, Clone, Default)]
pub struct SourceCache {
    text: String,
}

impl SourceCache {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The source slice at `loc`, or the empty string when out of range.
    pub fn text_at(&self, loc: Loc) -> &str {
        self.text.get(loc.start..loc.end).unwrap_or("")
    }
}

/// Source-level types, annotated on every declaration and expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Bool,
    /// Signed integer of the given bit width.
    Int(u32),
    /// Unsigned integer of the given bit width.
    Uint(u32),
    /// Account address; modelled uniformly as unsigned 160-bit.
    Address,
    /// `mapping(K => V)`
    Mapping(Box<Ty>, Box<Ty>),
    /// Function type with parameter and return types.
    Function { params: Vec<Ty>, returns: Vec<Ty> },
    /// Type of magic namespaces such as `msg` or `block`; only member
    /// accesses off these are meaningful.
    Magic,
    /// Any type outside the modelled subset; carries its source spelling.
    Other(String),
}

impl Ty {
    pub fn mapping(key: Ty, value: Ty) -> Self {
        Ty::Mapping(Box::new(key), Box::new(value))
    }

    /// Value types can be assigned, compared and evaluated in models.
    pub fn is_value_type(&self) -> bool {
        matches!(self, Ty::Bool | Ty::Int(_) | Ty::Uint(_) | Ty::Address)
    }

    /// Integer types proper; `address` is excluded from arithmetic.
    pub fn is_integer(&self) -> bool {
        matches!(self, Ty::Int(_) | Ty::Uint(_))
    }

    /// Types the checker models symbolically.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Ty::Bool | Ty::Int(_) | Ty::Uint(_) | Ty::Address | Ty::Mapping(..)
        )
    }

    /// Inclusive value bounds for integer-backed types.
    pub fn int_bounds(&self) -> Option<(BigInt, BigInt)> {
        match self {
            Ty::Int(bits) => {
                let half = BigInt::from(1) << (bits - 1);
                Some((-half.clone(), half - 1))
            }
            Ty::Uint(bits) => Some((BigInt::from(0), (BigInt::from(1) << bits) - 1)),
            Ty::Address => Some((BigInt::from(0), (BigInt::from(1) << 160u32) - 1)),
            _ => None,
        }
    }

    /// Stable identifier used to key uninterpreted functions by callee
    /// signature.
    pub fn rich_identifier(&self) -> String {
        match self {
            Ty::Function { params, returns } => {
                let fmt = |tys: &[Ty]| {
                    tys.iter()
                        .map(Ty::rich_identifier)
                        .collect::<Vec<_>>()
                        .join("$")
                };
                format!("t_function${}$returns${}", fmt(params), fmt(returns))
            }
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ty::Bool => write!(f, "bool"),
            Ty::Int(bits) => write!(f, "int{bits}"),
            Ty::Uint(bits) => write!(f, "uint{bits}"),
            Ty::Address => write!(f, "address"),
            Ty::Mapping(key, value) => write!(f, "mapping({key} => {value})"),
            Ty::Function { params, returns } => {
                write!(f, "function (")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")?;
                if !returns.is_empty() {
                    write!(f, " returns (")?;
                    for (i, r) in returns.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{r}")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            Ty::Magic => write!(f, "magic"),
            Ty::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Where a variable declaration lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Contract-level state variable; persists across functions.
    State,
    /// Function-local variable.
    Local,
    /// Function parameter.
    Param,
    /// Named return parameter.
    Return,
}

/// A variable declaration.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub id: NodeId,
    pub name: String,
    pub ty: Ty,
    pub kind: VarKind,
    pub loc: Loc,
}

impl VarDecl {
    pub fn is_state_variable(&self) -> bool {
        self.kind == VarKind::State
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// `!e`
    Not,
    /// `-e`
    Neg,
    /// `++e`
    PreInc,
    /// `e++`
    PostInc,
    /// `--e`
    PreDec,
    /// `e--`
    PostDec,
}

impl UnOp {
    pub fn is_increment_or_decrement(&self) -> bool {
        matches!(
            self,
            UnOp::PreInc | UnOp::PostInc | UnOp::PreDec | UnOp::PostDec
        )
    }

    pub fn is_increment(&self) -> bool {
        matches!(self, UnOp::PreInc | UnOp::PostInc)
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self, UnOp::PreInc | UnOp::PreDec | UnOp::Not | UnOp::Neg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }

    pub fn is_compare(&self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Neq | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

/// Assignment operators. Only plain `=` is modelled; compound forms produce
/// an unsupported warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

/// Callee classification annotated by the front-end's type checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKind {
    /// `assert(cond)`
    Assert,
    /// `require(cond)`
    Require,
    /// `gasleft()`
    GasLeft,
    /// Internal call to a user-defined function; inlined by the checker.
    /// `bound` marks member-style calls whose receiver becomes the first
    /// argument.
    Internal { function: NodeId, bound: bool },
    /// Opaque pure builtin (`keccak256`, `ecrecover`, ...); modelled as an
    /// uninterpreted function.
    Abstract,
    /// Type conversions, struct constructors and other non-call forms.
    TypeConversion,
    /// Everything else (external calls, events, ...).
    Other,
}

/// An expression node with its annotations.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub loc: Loc,
    /// Result type of the expression.
    pub ty: Ty,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    BoolLit(bool),
    NumberLit(BigInt),
    StringLit(String),
    /// Identifier with its resolved declaration, when it names a variable.
    Ident {
        name: String,
        decl: Option<NodeId>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        /// Common type both operands are converted to.
        common_ty: Ty,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Member {
        base: Box<Expr>,
        member: String,
        /// Referenced declaration for member-style function access.
        decl: Option<NodeId>,
    },
    Tuple {
        components: Vec<Expr>,
        is_inline_array: bool,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        kind: CallKind,
    },
}

/// A statement node.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub loc: Loc,
    pub kind: StmtKind,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
        is_do_while: bool,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Expr>,
        body: Box<Stmt>,
    },
    Return {
        expr: Option<Expr>,
    },
    /// Variable declaration statement. More than one declarator is outside
    /// the modelled subset.
    VarDecl {
        decls: Vec<VarDecl>,
        init: Option<Expr>,
    },
    Expression(Expr),
}

/// A function definition.
#[derive(Debug, Clone)]
pub struct Function {
    pub id: NodeId,
    pub name: String,
    pub params: Vec<VarDecl>,
    pub returns: Vec<VarDecl>,
    /// `None` for declarations without an implementation.
    pub body: Option<Stmt>,
    pub is_constructor: bool,
    pub has_modifiers: bool,
    pub loc: Loc,
}

impl Function {
    pub fn is_implemented(&self) -> bool {
        self.body.is_some()
    }

    /// Every local variable declared anywhere in the body, in AST order.
    pub fn local_variables(&self) -> Vec<&VarDecl> {
        let mut out = Vec::new();
        if let Some(body) = &self.body {
            collect_locals(body, &mut out);
        }
        out
    }
}

fn collect_locals<'a>(stmt: &'a Stmt, out: &mut Vec<&'a VarDecl>) {
    match &stmt.kind {
        StmtKind::Block(stmts) => {
            for s in stmts {
                collect_locals(s, out);
            }
        }
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            collect_locals(then_branch, out);
            if let Some(els) = else_branch {
                collect_locals(els, out);
            }
        }
        StmtKind::While { body, .. } => collect_locals(body, out),
        StmtKind::For { init, body, .. } => {
            if let Some(init) = init {
                collect_locals(init, out);
            }
            collect_locals(body, out);
        }
        StmtKind::VarDecl { decls, .. } => out.extend(decls.iter()),
        StmtKind::Return { .. } | StmtKind::Expression(_) => {}
    }
}

/// A contract: state variables plus member functions.
#[derive(Debug, Clone)]
pub struct Contract {
    pub name: String,
    pub state_vars: Vec<VarDecl>,
    pub functions: Vec<Function>,
}

/// A source unit, the `analyze` entry point's input.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub contracts: Vec<Contract>,
    /// Whether the assertion checker was requested for this unit.
    pub smt_checker_enabled: bool,
}

pub mod builder {
    //! Convenience construction of well-formed ASTs with fresh node ids.

    use super::*;

    /// Hands out fresh [`NodeId`]s and assembles annotated nodes the way the
    /// front-end would.
    #[derive(Debug, Default)]
    pub struct AstBuilder {
        next_id: u64,
    }

    impl AstBuilder {
        pub fn new() -> Self {
            Self { next_id: 0 }
        }

        fn fresh(&mut self) -> NodeId {
            self.next_id += 1;
            NodeId(self.next_id)
        }

        fn expr(&mut self, ty: Ty, kind: ExprKind) -> Expr {
            Expr {
                id: self.fresh(),
                loc: Loc::default(),
                ty,
                kind,
            }
        }

        fn stmt(&mut self, kind: StmtKind) -> Stmt {
            Stmt {
                id: self.fresh(),
                loc: Loc::default(),
                kind,
            }
        }

        // --- declarations ---

        pub fn var(&mut self, name: &str, ty: Ty, kind: VarKind) -> VarDecl {
            VarDecl {
                id: self.fresh(),
                name: name.to_string(),
                ty,
                kind,
                loc: Loc::default(),
            }
        }

        pub fn state_var(&mut self, name: &str, ty: Ty) -> VarDecl {
            self.var(name, ty, VarKind::State)
        }

        pub fn param(&mut self, name: &str, ty: Ty) -> VarDecl {
            self.var(name, ty, VarKind::Param)
        }

        pub fn local(&mut self, name: &str, ty: Ty) -> VarDecl {
            self.var(name, ty, VarKind::Local)
        }

        pub fn ret_param(&mut self, name: &str, ty: Ty) -> VarDecl {
            self.var(name, ty, VarKind::Return)
        }

        // --- expressions ---

        pub fn num(&mut self, value: impl Into<BigInt>, ty: Ty) -> Expr {
            self.expr(ty, ExprKind::NumberLit(value.into()))
        }

        pub fn bool_lit(&mut self, value: bool) -> Expr {
            self.expr(Ty::Bool, ExprKind::BoolLit(value))
        }

        pub fn string_lit(&mut self, value: &str) -> Expr {
            self.expr(
                Ty::Other("string".to_string()),
                ExprKind::StringLit(value.to_string()),
            )
        }

        /// Identifier referring to a declared variable.
        pub fn ident(&mut self, decl: &VarDecl) -> Expr {
            self.expr(
                decl.ty.clone(),
                ExprKind::Ident {
                    name: decl.name.clone(),
                    decl: Some(decl.id),
                },
            )
        }

        /// Identifier with no referenced declaration (`now`, magic bases,
        /// builtin callees).
        pub fn free_ident(&mut self, name: &str, ty: Ty) -> Expr {
            self.expr(
                ty,
                ExprKind::Ident {
                    name: name.to_string(),
                    decl: None,
                },
            )
        }

        pub fn unary(&mut self, op: UnOp, ty: Ty, operand: Expr) -> Expr {
            self.expr(
                ty,
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
            )
        }

        pub fn binary(&mut self, op: BinOp, common_ty: Ty, lhs: Expr, rhs: Expr) -> Expr {
            let ty = if op.is_arithmetic() {
                common_ty.clone()
            } else {
                Ty::Bool
            };
            self.expr(
                ty,
                ExprKind::Binary {
                    op,
                    common_ty,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            )
        }

        pub fn assign(&mut self, lhs: Expr, rhs: Expr) -> Expr {
            self.assign_op(AssignOp::Assign, lhs, rhs)
        }

        pub fn assign_op(&mut self, op: AssignOp, lhs: Expr, rhs: Expr) -> Expr {
            let ty = lhs.ty.clone();
            self.expr(
                ty,
                ExprKind::Assign {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            )
        }

        pub fn index(&mut self, base: Expr, index: Expr) -> Expr {
            let ty = match &base.ty {
                Ty::Mapping(_, value) => value.as_ref().clone(),
                other => other.clone(),
            };
            self.expr(
                ty,
                ExprKind::Index {
                    base: Box::new(base),
                    index: Box::new(index),
                },
            )
        }

        pub fn member(&mut self, base: Expr, member: &str, ty: Ty) -> Expr {
            self.expr(
                ty,
                ExprKind::Member {
                    base: Box::new(base),
                    member: member.to_string(),
                    decl: None,
                },
            )
        }

        pub fn tuple(&mut self, components: Vec<Expr>) -> Expr {
            let ty = match components.as_slice() {
                [single] => single.ty.clone(),
                _ => Ty::Other("tuple".to_string()),
            };
            self.expr(
                ty,
                ExprKind::Tuple {
                    components,
                    is_inline_array: false,
                },
            )
        }

        pub fn inline_array(&mut self, components: Vec<Expr>) -> Expr {
            self.expr(
                Ty::Other("array".to_string()),
                ExprKind::Tuple {
                    components,
                    is_inline_array: true,
                },
            )
        }

        pub fn call(&mut self, callee: Expr, args: Vec<Expr>, kind: CallKind, ty: Ty) -> Expr {
            self.expr(
                ty,
                ExprKind::Call {
                    callee: Box::new(callee),
                    args,
                    kind,
                },
            )
        }

        pub fn assert_call(&mut self, cond: Expr) -> Expr {
            let callee = self.free_ident(
                "assert",
                Ty::Function {
                    params: vec![Ty::Bool],
                    returns: vec![],
                },
            );
            self.call(
                callee,
                vec![cond],
                CallKind::Assert,
                Ty::Other("tuple".to_string()),
            )
        }

        pub fn require_call(&mut self, cond: Expr) -> Expr {
            let callee = self.free_ident(
                "require",
                Ty::Function {
                    params: vec![Ty::Bool],
                    returns: vec![],
                },
            );
            self.call(
                callee,
                vec![cond],
                CallKind::Require,
                Ty::Other("tuple".to_string()),
            )
        }

        pub fn gasleft_call(&mut self) -> Expr {
            let callee = self.free_ident(
                "gasleft",
                Ty::Function {
                    params: vec![],
                    returns: vec![Ty::Uint(256)],
                },
            );
            self.call(callee, vec![], CallKind::GasLeft, Ty::Uint(256))
        }

        /// Call to a user-defined function, to be inlined by the checker.
        pub fn internal_call(&mut self, function: &Function, args: Vec<Expr>) -> Expr {
            let fn_ty = Ty::Function {
                params: function.params.iter().map(|p| p.ty.clone()).collect(),
                returns: function.returns.iter().map(|r| r.ty.clone()).collect(),
            };
            let callee = self.free_ident(&function.name, fn_ty);
            let ty = match function.returns.as_slice() {
                [single] => single.ty.clone(),
                _ => Ty::Other("tuple".to_string()),
            };
            self.call(
                callee,
                args,
                CallKind::Internal {
                    function: function.id,
                    bound: false,
                },
                ty,
            )
        }

        /// Opaque builtin call such as `keccak256(...)`.
        pub fn abstract_call(&mut self, name: &str, args: Vec<Expr>, ty: Ty) -> Expr {
            let fn_ty = Ty::Function {
                params: args.iter().map(|a| a.ty.clone()).collect(),
                returns: vec![ty.clone()],
            };
            let callee = self.free_ident(name, fn_ty);
            self.call(callee, args, CallKind::Abstract, ty)
        }

        // --- statements ---

        pub fn expr_stmt(&mut self, expr: Expr) -> Stmt {
            self.stmt(StmtKind::Expression(expr))
        }

        pub fn block(&mut self, stmts: Vec<Stmt>) -> Stmt {
            self.stmt(StmtKind::Block(stmts))
        }

        pub fn if_stmt(&mut self, cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
            self.stmt(StmtKind::If {
                cond,
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
            })
        }

        pub fn while_stmt(&mut self, cond: Expr, body: Stmt) -> Stmt {
            self.stmt(StmtKind::While {
                cond,
                body: Box::new(body),
                is_do_while: false,
            })
        }

        pub fn do_while_stmt(&mut self, body: Stmt, cond: Expr) -> Stmt {
            self.stmt(StmtKind::While {
                cond,
                body: Box::new(body),
                is_do_while: true,
            })
        }

        pub fn for_stmt(
            &mut self,
            init: Option<Stmt>,
            cond: Option<Expr>,
            post: Option<Expr>,
            body: Stmt,
        ) -> Stmt {
            self.stmt(StmtKind::For {
                init: init.map(Box::new),
                cond,
                post,
                body: Box::new(body),
            })
        }

        pub fn ret(&mut self, expr: Option<Expr>) -> Stmt {
            self.stmt(StmtKind::Return { expr })
        }

        pub fn decl_stmt(&mut self, decl: VarDecl, init: Option<Expr>) -> Stmt {
            self.stmt(StmtKind::VarDecl {
                decls: vec![decl],
                init,
            })
        }

        pub fn multi_decl_stmt(&mut self, decls: Vec<VarDecl>, init: Option<Expr>) -> Stmt {
            self.stmt(StmtKind::VarDecl { decls, init })
        }

        // --- definitions ---

        pub fn function(
            &mut self,
            name: &str,
            params: Vec<VarDecl>,
            returns: Vec<VarDecl>,
            body: Stmt,
        ) -> Function {
            Function {
                id: self.fresh(),
                name: name.to_string(),
                params,
                returns,
                body: Some(body),
                is_constructor: false,
                has_modifiers: false,
                loc: Loc::default(),
            }
        }

        pub fn unimplemented_function(
            &mut self,
            name: &str,
            params: Vec<VarDecl>,
            returns: Vec<VarDecl>,
        ) -> Function {
            Function {
                id: self.fresh(),
                name: name.to_string(),
                params,
                returns,
                body: None,
                is_constructor: false,
                has_modifiers: false,
                loc: Loc::default(),
            }
        }

        pub fn contract(&mut self, name: &str, state_vars: Vec<VarDecl>, functions: Vec<Function>) -> Contract {
            Contract {
                name: name.to_string(),
                state_vars,
                functions,
            }
        }

        pub fn unit(&mut self, contracts: Vec<Contract>) -> SourceUnit {
            SourceUnit {
                contracts,
                smt_checker_enabled: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::builder::AstBuilder;
    use super::*;

    #[test]
    fn int_bounds() {
        let (min, max) = Ty::Int(8).int_bounds().unwrap();
        assert_eq!(min, BigInt::from(-128));
        assert_eq!(max, BigInt::from(127));

        let (min, max) = Ty::Uint(256).int_bounds().unwrap();
        assert_eq!(min, BigInt::from(0));
        assert_eq!(max, (BigInt::from(1) << 256u32) - 1);

        let (min, max) = Ty::Address.int_bounds().unwrap();
        assert_eq!(min, BigInt::from(0));
        assert_eq!(max, (BigInt::from(1) << 160u32) - 1);

        assert!(Ty::Bool.int_bounds().is_none());
        assert!(Ty::mapping(Ty::Uint(256), Ty::Uint(256)).int_bounds().is_none());
    }

    #[test]
    fn type_classification() {
        assert!(Ty::Bool.is_value_type());
        assert!(Ty::Address.is_value_type());
        assert!(!Ty::mapping(Ty::Uint(256), Ty::Bool).is_value_type());
        assert!(!Ty::Address.is_integer());
        assert!(Ty::Int(8).is_integer());
        assert!(Ty::mapping(Ty::Uint(256), Ty::Bool).is_supported());
        assert!(!Ty::Other("bytes".into()).is_supported());
        assert!(!Ty::Magic.is_supported());
    }

    #[test]
    fn type_display() {
        assert_eq!(Ty::Uint(256).to_string(), "uint256");
        assert_eq!(
            Ty::mapping(Ty::Uint(256), Ty::Bool).to_string(),
            "mapping(uint256 => bool)"
        );
        assert_eq!(
            Ty::Function {
                params: vec![Ty::Uint(256)],
                returns: vec![Ty::Bool],
            }
            .to_string(),
            "function (uint256) returns (bool)"
        );
    }

    #[test]
    fn rich_identifier_distinguishes_signatures() {
        let f1 = Ty::Function {
            params: vec![Ty::Uint(256)],
            returns: vec![Ty::Uint(256)],
        };
        let f2 = Ty::Function {
            params: vec![Ty::Uint(8)],
            returns: vec![Ty::Uint(256)],
        };
        assert_ne!(f1.rich_identifier(), f2.rich_identifier());
    }

    #[test]
    fn builder_assigns_unique_ids() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let y = b.param("y", Ty::Uint(256));
        assert_ne!(x.id, y.id);
        let e1 = b.ident(&x);
        let e2 = b.ident(&x);
        assert_ne!(e1.id, e2.id);
    }

    #[test]
    fn local_variables_collected_from_nested_statements() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let y = b.local("y", Ty::Uint(256));
        let z = b.local("z", Ty::Uint(256));

        let y_id = y.id;
        let z_id = z.id;
        let decl_y = b.decl_stmt(y, None);
        let cond = {
            let xi = b.ident(&x);
            let zero = b.num(0, Ty::Uint(256));
            b.binary(BinOp::Gt, Ty::Uint(256), xi, zero)
        };
        let decl_z = b.decl_stmt(z, None);
        let inner = b.block(vec![decl_z]);
        let if_s = b.if_stmt(cond, inner, None);
        let body = b.block(vec![decl_y, if_s]);
        let f = b.function("f", vec![x], vec![], body);

        let locals: Vec<NodeId> = f.local_variables().iter().map(|v| v.id).collect();
        assert_eq!(locals, vec![y_id, z_id]);
    }

    #[test]
    fn source_cache_renders_ranges() {
        let cache = SourceCache::new("m[k] = 1;");
        assert_eq!(cache.text_at(Loc::new(0, 4)), "m[k]");
        assert_eq!(cache.text_at(Loc::new(100, 104)), "");
    }
}
