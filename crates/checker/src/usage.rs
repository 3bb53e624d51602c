//! Variable-usage analysis: which declarations a statement subtree writes.
//!
//! A declaration is touched when it is assigned, incremented or
//! decremented, or is the base of an index write anywhere inside the
//! subtree. The result keeps AST order and may contain duplicates; callers
//! sort and deduplicate as needed.

use crate::ast::{Expr, ExprKind, NodeId, Stmt, StmtKind};

/// Declarations textually written inside a statement subtree.
pub fn touched_variables(stmt: &Stmt) -> Vec<NodeId> {
    let mut out = Vec::new();
    walk_stmt(stmt, &mut out);
    out
}

/// Declarations textually written inside an expression.
pub fn touched_in_expr(expr: &Expr) -> Vec<NodeId> {
    let mut out = Vec::new();
    walk_expr(expr, &mut out);
    out
}

fn walk_stmt(stmt: &Stmt, out: &mut Vec<NodeId>) {
    match &stmt.kind {
        StmtKind::Block(stmts) => {
            for s in stmts {
                walk_stmt(s, out);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            walk_expr(cond, out);
            walk_stmt(then_branch, out);
            if let Some(els) = else_branch {
                walk_stmt(els, out);
            }
        }
        StmtKind::While { cond, body, .. } => {
            walk_expr(cond, out);
            walk_stmt(body, out);
        }
        StmtKind::For {
            init,
            cond,
            post,
            body,
        } => {
            if let Some(init) = init {
                walk_stmt(init, out);
            }
            if let Some(cond) = cond {
                walk_expr(cond, out);
            }
            walk_stmt(body, out);
            if let Some(post) = post {
                walk_expr(post, out);
            }
        }
        StmtKind::Return { expr } => {
            if let Some(e) = expr {
                walk_expr(e, out);
            }
        }
        StmtKind::VarDecl { decls, init } => {
            // A declaration with an initializer writes the declared variable.
            if init.is_some() {
                out.extend(decls.iter().map(|d| d.id));
            }
            if let Some(init) = init {
                walk_expr(init, out);
            }
        }
        StmtKind::Expression(e) => walk_expr(e, out),
    }
}

fn walk_expr(expr: &Expr, out: &mut Vec<NodeId>) {
    match &expr.kind {
        ExprKind::Assign { lhs, rhs, .. } => {
            if let Some(decl) = lvalue_base(lhs) {
                out.push(decl);
            }
            walk_expr(lhs, out);
            walk_expr(rhs, out);
        }
        ExprKind::Unary { op, operand } if op.is_increment_or_decrement() => {
            if let Some(decl) = lvalue_base(operand) {
                out.push(decl);
            }
            walk_expr(operand, out);
        }
        ExprKind::Unary { operand, .. } => walk_expr(operand, out),
        ExprKind::Binary { lhs, rhs, .. } => {
            walk_expr(lhs, out);
            walk_expr(rhs, out);
        }
        ExprKind::Index { base, index } => {
            walk_expr(base, out);
            walk_expr(index, out);
        }
        ExprKind::Member { base, .. } => walk_expr(base, out),
        ExprKind::Tuple { components, .. } => {
            for c in components {
                walk_expr(c, out);
            }
        }
        ExprKind::Call { callee, args, .. } => {
            walk_expr(callee, out);
            for a in args {
                walk_expr(a, out);
            }
        }
        ExprKind::BoolLit(_)
        | ExprKind::NumberLit(_)
        | ExprKind::StringLit(_)
        | ExprKind::Ident { .. } => {}
    }
}

/// The declaration ultimately written through an l-value expression:
/// the identifier itself, or the base of a (possibly nested) index access.
fn lvalue_base(expr: &Expr) -> Option<NodeId> {
    match &expr.kind {
        ExprKind::Ident { decl, .. } => *decl,
        ExprKind::Index { base, .. } => lvalue_base(base),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::AstBuilder;
    use crate::ast::{BinOp, Ty, UnOp};

    #[test]
    fn assignment_touches_lhs() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let y = b.param("y", Ty::Uint(256));
        let lhs = b.ident(&x);
        let rhs = b.ident(&y);
        let assign = b.assign(lhs, rhs);
        let stmt = b.expr_stmt(assign);
        assert_eq!(touched_variables(&stmt), vec![x.id]);
    }

    #[test]
    fn increment_touches_operand() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let xi = b.ident(&x);
        let inc = b.unary(UnOp::PostInc, Ty::Uint(256), xi);
        let stmt = b.expr_stmt(inc);
        assert_eq!(touched_variables(&stmt), vec![x.id]);
    }

    #[test]
    fn index_write_touches_the_base() {
        let mut b = AstBuilder::new();
        let m = b.state_var("m", Ty::mapping(Ty::Uint(256), Ty::Uint(256)));
        let k = b.param("k", Ty::Uint(256));
        let base = b.ident(&m);
        let key = b.ident(&k);
        let lhs = b.index(base, key);
        let one = b.num(1, Ty::Uint(256));
        let assign = b.assign(lhs, one);
        let stmt = b.expr_stmt(assign);
        assert_eq!(touched_variables(&stmt), vec![m.id]);
    }

    #[test]
    fn reads_touch_nothing() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let lhs = b.ident(&x);
        let rhs = b.num(1, Ty::Uint(256));
        let cmp = b.binary(BinOp::Gt, Ty::Uint(256), lhs, rhs);
        let stmt = b.expr_stmt(cmp);
        assert!(touched_variables(&stmt).is_empty());
    }

    #[test]
    fn declaration_with_initializer_touches_declared() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let z = b.local("z", Ty::Uint(256));
        let z_id = z.id;
        let init = b.ident(&x);
        let stmt = b.decl_stmt(z, Some(init));
        assert_eq!(touched_variables(&stmt), vec![z_id]);
    }

    #[test]
    fn nested_statements_accumulate_in_order() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let y = b.param("y", Ty::Uint(256));

        let lhs = b.ident(&x);
        let rhs = b.num(1, Ty::Uint(256));
        let assign_x = b.assign(lhs, rhs);
        let s1 = b.expr_stmt(assign_x);

        let cond = {
            let yi = b.ident(&y);
            let zero = b.num(0, Ty::Uint(256));
            b.binary(BinOp::Gt, Ty::Uint(256), yi, zero)
        };
        let lhs = b.ident(&y);
        let rhs = b.num(2, Ty::Uint(256));
        let assign_y = b.assign(lhs, rhs);
        let inner = b.expr_stmt(assign_y);
        let if_s = b.if_stmt(cond, inner, None);

        let body = b.block(vec![s1, if_s]);
        assert_eq!(touched_variables(&body), vec![x.id, y.id]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut b = AstBuilder::new();
        let x = b.param("x", Ty::Uint(256));
        let lhs1 = b.ident(&x);
        let one = b.num(1, Ty::Uint(256));
        let a1 = b.assign(lhs1, one);
        let s1 = b.expr_stmt(a1);
        let lhs2 = b.ident(&x);
        let two = b.num(2, Ty::Uint(256));
        let a2 = b.assign(lhs2, two);
        let s2 = b.expr_stmt(a2);
        let body = b.block(vec![s1, s2]);
        assert_eq!(touched_variables(&body), vec![x.id, x.id]);
    }
}
