//! End-to-end seed scenarios for the RPL runtime, each one a command-line
//! session run start to finish against a fresh [`Interpreter`] — the same
//! role `tests/alu.rs` plays for this crate's teacher, driving whole
//! instruction sequences rather than one opcode at a time.

use db48x_container::ExprNode;
use db48x_numeric::{
    Fraction,
    Integer,
};
use db48x_object::{
    CommandId,
    ErrorKind,
};
use db48x_vm::{
    evaluator,
    interpreter::Interpreter,
    object::Object,
    units,
};
use rstest::rstest;

fn run(vm: &mut Interpreter, ids: &[CommandId]) {
    for id in ids {
        evaluator::dispatch(vm, *id).unwrap();
    }
}

fn push_int(vm: &mut Interpreter, value: i64) {
    vm.stack.push(Object::Integer(Integer::from_i64(value))).unwrap();
}

/// Scenario 1: push `1`, push `2`, `+` → stack top is `3`.
#[test]
fn stack_arithmetic_adds_the_top_two_integers() {
    let mut vm = Interpreter::new();
    push_int(&mut vm, 1);
    push_int(&mut vm, 2);
    run(&mut vm, &[CommandId::Add]);
    assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(3)));
}

/// Scenario 2: `1 3 /` stays an exact fraction; `→Num`/`→Q` round-trip.
#[test]
fn exact_division_stays_a_fraction_and_round_trips_through_decimal() {
    let mut vm = Interpreter::new();
    push_int(&mut vm, 1);
    push_int(&mut vm, 3);
    run(&mut vm, &[CommandId::Div]);
    assert_eq!(*vm.stack.peek(0).unwrap(), Object::Fraction(Fraction::checked_new(Integer::from_i64(1), Integer::from_i64(3)).unwrap()));

    run(&mut vm, &[CommandId::ToNum]);
    let approx = vm.stack.peek(0).unwrap().to_f64_approx().unwrap();
    assert!((approx - (1.0 / 3.0)).abs() < 1e-9);

    run(&mut vm, &[CommandId::ToFraction]);
    assert_eq!(*vm.stack.peek(0).unwrap(), Object::Fraction(Fraction::checked_new(Integer::from_i64(1), Integer::from_i64(3)).unwrap()));
}

/// Scenario 3: `1_in` converted to `_mm` is `25.4 mm`.
#[test]
fn unit_conversion_from_inches_to_millimeters() {
    let one_inch = units::with_label(Object::Integer(Integer::from_i64(1)), "in").unwrap();
    let in_mm = units::convert(&one_inch, "mm").unwrap();
    assert!((in_mm.unit.value() - 25.4).abs() < 1e-9);
}

/// Scenario 6: `(a + 0)` auto-simplifies away the identity term under
/// `EXPAND`, the best-effort stand-in this crate uses for both `EXPAND`
/// and `COLLECT` (see this crate's design ledger).
#[test]
fn expand_drops_an_additive_identity() {
    let mut vm = Interpreter::new();
    let expr = ExprNode::apply(
        "+".to_string(),
        db48x_container::Arity::Fixed(2),
        vec![ExprNode::Symbol("A".to_string()), ExprNode::Leaf(Object::Integer(Integer::from_i64(0)))],
    )
    .unwrap();
    vm.stack.push(Object::Expression(Box::new(expr))).unwrap();
    run(&mut vm, &[CommandId::Expand]);
    match vm.stack.peek(0).unwrap() {
        Object::Expression(simplified) => assert_eq!(**simplified, ExprNode::Symbol("A".to_string())),
        other => panic!("expected an expression, got {other:?}"),
    }
}

/// Scenario 8: resolving an unbound name against an attached physical
/// constant converts straight to its decimal value.
#[test]
fn resolving_a_library_constant_converts_to_its_decimal_value() {
    let mut vm = Interpreter::new();
    vm.library.define_constant("c", Object::Integer(Integer::from_i64(299_792_458)), None);
    vm.eval_object(Object::Symbol("c".to_string())).unwrap();
    run(&mut vm, &[CommandId::ToNum]);
    let approx = vm.stack.peek(0).unwrap().to_f64_approx().unwrap();
    assert!((approx - 299_792_458.0).abs() < 1.0);
}

/// §8.1 invariant 10: flag duality holds through both orderings.
#[rstest]
#[case(5)]
#[case(-12)]
#[case(127)]
fn flag_duality_holds_for_any_index(#[case] index: i32) {
    let mut vm = Interpreter::new();
    vm.flags.set(index);
    vm.flags.clear(index);
    assert!(!vm.flags.is_set(index));

    vm.flags.clear(index);
    vm.flags.set(index);
    assert!(vm.flags.is_set(index));
}

/// §8.2 boundary: dividing a non-zero exact value by zero is a reported
/// error, not a silent infinity, for exact integer division.
#[test]
fn dividing_by_zero_is_a_reported_error() {
    let mut vm = Interpreter::new();
    push_int(&mut vm, 1);
    push_int(&mut vm, 0);
    let error = evaluator::dispatch(&mut vm, CommandId::Div).unwrap_err();
    assert_eq!(db48x_object::ErrorKind::from(error), ErrorKind::DivideByZero);
}
