#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use super::*;
use naftah_diagnostic::ErrorKind;
use pretty_assertions::assert_eq;

use crate::value::Number;

#[test]
fn scope_declare_lookup() {
    let mut scope = Scope::new();
    scope
        .declare(
            "أ",
            DeclaredVariable::new(Value::int(42), Mutability::Immutable, None),
        )
        .unwrap();
    assert_eq!(scope.lookup("أ"), Some(Value::int(42)));
    assert_eq!(scope.lookup("ب"), None);
}

#[test]
fn scope_shadowing() {
    let parent = LocalScope::new(Scope::new());
    parent
        .borrow_mut()
        .declare(
            "س",
            DeclaredVariable::new(Value::int(1), Mutability::Immutable, None),
        )
        .unwrap();

    let mut child = Scope::with_parent(parent.clone());
    child
        .declare(
            "س",
            DeclaredVariable::new(Value::int(2), Mutability::Immutable, None),
        )
        .unwrap();

    assert_eq!(child.lookup("س"), Some(Value::int(2)));
    assert_eq!(parent.borrow().lookup("س"), Some(Value::int(1)));
}

#[test]
fn redeclaring_in_the_same_frame_fails() {
    let mut env = Environment::new();
    env.declare("س", Value::int(1), Mutability::Mutable, None)
        .unwrap();
    let err = env
        .declare("س", Value::int(2), Mutability::Mutable, None)
        .unwrap_err();
    assert!(err.is(ErrorKind::Redeclaration));
}

#[test]
fn push_pop_restores_outer_binding() {
    let mut env = Environment::new();
    env.declare("س", Value::int(1), Mutability::Immutable, None)
        .unwrap();

    env.push_scope();
    env.declare("س", Value::int(2), Mutability::Immutable, None)
        .unwrap();
    assert_eq!(env.lookup("س"), Some(Value::int(2)));

    env.pop_scope();
    assert_eq!(env.lookup("س"), Some(Value::int(1)));
}

#[test]
fn global_scope_is_never_popped() {
    let mut env = Environment::new();
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    env.declare("س", Value::None, Mutability::Mutable, None)
        .unwrap();
    assert_eq!(env.lookup("س"), Some(Value::None));
}

#[test]
fn assign_reaches_outer_frame() {
    let mut env = Environment::new();
    env.declare("عداد", Value::int(0), Mutability::Mutable, None)
        .unwrap();
    env.push_scope();
    env.assign("عداد", Value::int(5)).unwrap();
    env.pop_scope();
    assert_eq!(env.lookup("عداد"), Some(Value::int(5)));
}

#[test]
fn assign_to_constant_fails() {
    let mut env = Environment::new();
    env.declare("ثابت_ما", Value::int(1), Mutability::Immutable, None)
        .unwrap();
    let err = env.assign("ثابت_ما", Value::int(2)).unwrap_err();
    assert!(err.is(ErrorKind::ImmutableAssignment));
    assert_eq!(env.lookup("ثابت_ما"), Some(Value::int(1)));
}

#[test]
fn assign_to_undeclared_fails() {
    let mut env = Environment::new();
    let err = env.assign("مجهول", Value::int(2)).unwrap_err();
    assert!(err.is(ErrorKind::UnresolvedName));
}

#[test]
fn declared_type_converts_numbers() {
    let mut env = Environment::new();
    env.declare(
        "س",
        Value::int(3),
        Mutability::Mutable,
        Some(TypeName::Double),
    )
    .unwrap();
    assert!(matches!(
        env.lookup("س"),
        Some(Value::Number(Number::Double(n))) if n == 3.0
    ));

    env.assign("س", Value::int(7)).unwrap();
    assert!(matches!(
        env.lookup("س"),
        Some(Value::Number(Number::Double(n))) if n == 7.0
    ));
}

#[test]
fn declared_type_rejects_other_kinds() {
    let mut env = Environment::new();
    env.declare("س", Value::int(1), Mutability::Mutable, Some(TypeName::Int))
        .unwrap();
    let err = env.assign("س", Value::string("نص")).unwrap_err();
    assert!(err.is(ErrorKind::TypeCoercion));

    let err = env
        .declare("ب", Value::int(300), Mutability::Mutable, Some(TypeName::Byte))
        .unwrap_err();
    assert!(err.is(ErrorKind::TypeCoercion));
}

#[test]
fn every_declared_type_accepts_none() {
    for ty in [TypeName::Int, TypeName::Str, TypeName::List, TypeName::Void] {
        assert_eq!(coerce_declared("س", Some(ty), Value::None).unwrap(), Value::None);
    }
    assert!(coerce_declared("س", Some(TypeName::Void), Value::int(1)).is_err());
}

#[test]
fn child_sees_globals_but_not_locals() {
    let mut env = Environment::new();
    env.declare("عام", Value::int(1), Mutability::Immutable, None)
        .unwrap();
    env.push_scope();
    env.declare("محلي", Value::int(2), Mutability::Immutable, None)
        .unwrap();

    let child = env.child();
    assert_eq!(child.depth(), 1);
    assert_eq!(child.lookup("عام"), Some(Value::int(1)));
    assert_eq!(child.lookup("محلي"), None);
}

#[test]
fn functions_live_in_their_own_namespace() {
    use naftah_ir::{ExprArena, FunctionDecl, Position, SharedArena, Span, Stmt, StmtKind};

    let mut arena = ExprArena::new();
    let body = arena.alloc_stmt(Stmt::new(
        StmtKind::Block(Vec::new()),
        Span::default(),
        Position::default(),
    ));
    let function = Rc::new(FunctionValue {
        decl: FunctionDecl {
            name: "مربع".to_owned(),
            params: Vec::new(),
            return_type: None,
            body,
        },
        arena: SharedArena::new(arena),
    });

    let mut env = Environment::new();
    env.declare("مربع", Value::int(4), Mutability::Immutable, None)
        .unwrap();
    env.declare_function(Rc::clone(&function)).unwrap();

    assert_eq!(env.lookup("مربع"), Some(Value::int(4)));
    assert!(env.lookup_function("مربع").is_some());
    assert!(env.child().lookup_function("مربع").is_some());

    let err = env.declare_function(function).unwrap_err();
    assert!(err.is(ErrorKind::Redeclaration));
}

#[test]
fn resolve_path_walks_fields() {
    let mut env = Environment::new();
    let inner = Value::object(vec![(
        "اسم".to_owned(),
        DeclaredVariable::new(Value::string("نفطة"), Mutability::Immutable, None),
    )]);
    let outer = Value::object(vec![(
        "لغة".to_owned(),
        DeclaredVariable::new(inner, Mutability::Immutable, None),
    )]);
    env.declare("مشروع", outer, Mutability::Immutable, None)
        .unwrap();

    assert_eq!(
        env.resolve_path(&["مشروع", "لغة", "اسم"]),
        Some(Value::string("نفطة"))
    );
    assert_eq!(env.resolve_path(&["مشروع", "مفقود"]), None);
    assert_eq!(env.resolve_path(&[]), None);
}
