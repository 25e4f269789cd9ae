//! The built-in command dispatch table (spec.md §4.3-§4.9): one function
//! per [`CommandId`] category, all reached through [`dispatch`], the same
//! role a `fuel_asm::Opcode` match plays in an ALU loop — except here each
//! arm reads its operands off the data stack rather than register file
//! slots.

use alloc::{
    boxed::Box,
    string::{
        String,
        ToString,
    },
    vec::Vec,
};

use db48x_container::{
    Array,
    List,
    Path,
    Tag,
    Text,
};
use db48x_numeric::{
    HwFloat,
    Integer,
};
use db48x_object::{
    CommandId,
    ErrorKind,
};
use db48x_runtime::{
    settings::DisplayMode,
    Frame,
    RuntimeError,
};

#[cfg(feature = "random")]
use db48x_numeric::Prng;

use crate::{
    arithmetic::{
        self,
        BinaryOp,
        Transcendental,
    },
    interpreter::Interpreter,
    object::{
        Object,
        UnitValue,
    },
    rewrite,
    units,
};

/// Whether running `id` should be preceded by an undo snapshot. Nearly
/// every command touches the data stack in a way worth being able to
/// step back from, the same blanket policy the calculator's own `LAST
/// STACK` recall uses.
pub fn mutates_stack(_id: CommandId) -> bool {
    true
}

fn pop(vm: &mut Interpreter) -> Result<Object, RuntimeError> {
    Ok(vm.stack.pop()?)
}

fn pop2(vm: &mut Interpreter) -> Result<(Object, Object), RuntimeError> {
    let b = pop(vm)?;
    let a = pop(vm)?;
    Ok((a, b))
}

fn push(vm: &mut Interpreter, object: Object) -> Result<(), RuntimeError> {
    vm.stack.push(object)?;
    Ok(())
}

fn push_bool(vm: &mut Interpreter, value: bool) -> Result<(), RuntimeError> {
    push(vm, Object::Integer(Integer::from_i64(if value { 1 } else { 0 })))
}

fn is_truthy(object: &Object) -> bool {
    !object.is_numeric_zero()
}

fn as_name(object: &Object) -> Result<String, ErrorKind> {
    match object {
        Object::Symbol(name) | Object::Local(name) => Ok(name.clone()),
        Object::Text(text) => Ok(text.as_str().to_string()),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

fn as_index(object: &Object) -> Result<i64, ErrorKind> {
    match object {
        Object::Integer(n) => n.to_i64().ok_or(ErrorKind::BadArgumentValue),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

fn as_unit_value(object: &Object) -> Result<&UnitValue, ErrorKind> {
    match object {
        Object::Unit(unit) => Ok(unit),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

fn as_list(object: Object) -> Result<List<Object>, ErrorKind> {
    match object {
        Object::List(list) => Ok(*list),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

fn as_array(object: Object) -> Result<Array<Object>, ErrorKind> {
    match object {
        Object::Array(array) => Ok(*array),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// Run `callable` (a program or command) with `args` pushed onto the data
/// stack in order, returning the single value it leaves behind. This is
/// the glue every `MAP`/`REDUCE`/`FILTER`/`DOSUBS` handler uses to apply a
/// user-supplied callable without duplicating the evaluator's own
/// auto-eval rules.
fn apply(vm: &mut Interpreter, callable: &Object, args: &[Object]) -> Result<Object, ErrorKind> {
    for arg in args {
        vm.stack.push(arg.clone()).map_err(ErrorKind::from)?;
    }
    vm.eval_object(callable.clone()).map_err(ErrorKind::from)?;
    vm.stack.pop()
}

/// Dispatch one built-in command against the interpreter's current state.
pub fn dispatch(vm: &mut Interpreter, id: CommandId) -> Result<(), RuntimeError> {
    let precision = vm.settings.precision;
    match id {
        // --- Arithmetic ---
        CommandId::Add => binary_op(vm, BinaryOp::Add),
        CommandId::Sub => binary_op(vm, BinaryOp::Sub),
        CommandId::Mul => binary_op(vm, BinaryOp::Mul),
        CommandId::Div => binary_op(vm, BinaryOp::Div),
        CommandId::Neg => unary(vm, |a, _| arithmetic::neg(a)),
        CommandId::Inv => unary(vm, arithmetic::inv),
        CommandId::Abs => unary(vm, |a, _| arithmetic::abs(a)),
        CommandId::Sign => unary(vm, |a, _| arithmetic::sign(a)),
        CommandId::Mod => binary(vm, |a, b, _| arithmetic::modulo(a, b)),
        CommandId::Rem => binary(vm, |a, b, _| arithmetic::rem(a, b)),
        CommandId::Gcd => binary(vm, |a, b, _| arithmetic::gcd(a, b)),
        CommandId::Lcm => binary(vm, |a, b, _| arithmetic::lcm(a, b)),
        CommandId::Pow => binary(vm, arithmetic::pow),
        CommandId::XRoot => binary(vm, |a, b, _| arithmetic::xroot(a, b)),
        CommandId::Sqrt => unary(vm, |a, _| arithmetic::sqrt(a)),
        CommandId::Cbrt => unary(vm, |a, _| arithmetic::cbrt(a)),
        CommandId::Sq => unary(vm, arithmetic::square),
        CommandId::Cubed => unary(vm, arithmetic::cubed),
        CommandId::Factorial => unary(vm, |a, _| arithmetic::factorial(a)),
        CommandId::Percent => binary(vm, arithmetic::percent),
        CommandId::PercentChange => binary(vm, arithmetic::percent_change),

        // --- Transcendental ---
        CommandId::Sin => transcendental(vm, Transcendental::Sin),
        CommandId::Cos => transcendental(vm, Transcendental::Cos),
        CommandId::Tan => transcendental(vm, Transcendental::Tan),
        CommandId::Asin => transcendental(vm, Transcendental::Asin),
        CommandId::Acos => transcendental(vm, Transcendental::Acos),
        CommandId::Atan => transcendental(vm, Transcendental::Atan),
        CommandId::Atan2 => binary(vm, |a, b, _| arithmetic::atan2(a, b)),
        CommandId::Sinh => transcendental(vm, Transcendental::Sinh),
        CommandId::Cosh => transcendental(vm, Transcendental::Cosh),
        CommandId::Tanh => transcendental(vm, Transcendental::Tanh),
        CommandId::Asinh => transcendental(vm, Transcendental::Asinh),
        CommandId::Acosh => transcendental(vm, Transcendental::Acosh),
        CommandId::Atanh => transcendental(vm, Transcendental::Atanh),
        CommandId::Ln => transcendental(vm, Transcendental::Ln),
        CommandId::Exp => transcendental(vm, Transcendental::Exp),
        CommandId::Log10 => transcendental(vm, Transcendental::Log10),
        CommandId::Exp10 => transcendental(vm, Transcendental::Exp10),
        CommandId::Log2 => transcendental(vm, Transcendental::Log2),
        CommandId::Exp2 => transcendental(vm, Transcendental::Exp2),
        CommandId::Ln1p => transcendental(vm, Transcendental::Ln1p),
        CommandId::Expm1 => transcendental(vm, Transcendental::Expm1),

        // --- Complex ---
        CommandId::Arg => unary(vm, |a, _| arithmetic::arg(a, vm_angle_unit(vm))),
        CommandId::Re => unary(vm, |a, _| arithmetic::re(a)),
        CommandId::Im => unary(vm, |a, _| arithmetic::im(a)),
        CommandId::Conj => unary(vm, |a, _| arithmetic::conj(a)),

        // --- Units ---
        CommandId::Convert => {
            let (value, label) = pop2(vm)?;
            let label = as_name(&label)?;
            let converted = units::convert(as_unit_value(&value)?, &label)?;
            push(vm, Object::Unit(Box::new(converted)))
        }
        CommandId::UBase => {
            let value = pop(vm)?;
            let based = units::ubase(as_unit_value(&value)?)?;
            push(vm, Object::Unit(Box::new(based)))
        }
        CommandId::UVal => {
            let value = pop(vm)?;
            push(vm, units::uval(as_unit_value(&value)?))
        }

        // --- Date ---
        CommandId::DDays => binary(vm, |a, b, _| arithmetic::ddays(a, b)),
        CommandId::DateAdd => binary(vm, |a, b, _| arithmetic::date_add(a, b)),

        // --- Randomness ---
        CommandId::Rdz => rdz(vm),
        CommandId::Rand => rand(vm),
        CommandId::Random => random(vm),

        // --- Stack ---
        CommandId::Dup => Ok(vm.stack.dup()?),
        CommandId::Dup2 => {
            let (a, b) = (vm.stack.peek(1)?.clone(), vm.stack.peek(0)?.clone());
            push(vm, a)?;
            push(vm, b)
        }
        CommandId::DupN => {
            let count = as_index(&pop(vm)?)? as usize;
            let mut items = Vec::with_capacity(count);
            for level in (0..count).rev() {
                items.push(vm.stack.peek(level)?.clone());
            }
            for item in items {
                push(vm, item)?;
            }
            Ok(())
        }
        CommandId::Drop => {
            pop(vm)?;
            Ok(())
        }
        CommandId::Drop2 => {
            pop(vm)?;
            pop(vm)?;
            Ok(())
        }
        CommandId::DropN => {
            let count = as_index(&pop(vm)?)? as usize;
            for _ in 0..count {
                pop(vm)?;
            }
            Ok(())
        }
        CommandId::Swap => Ok(vm.stack.swap()?),
        CommandId::Rot => Ok(vm.stack.roll(3)?),
        CommandId::Over => {
            let value = vm.stack.peek(1)?.clone();
            push(vm, value)
        }
        CommandId::Pick => {
            let count = as_index(&pop(vm)?)? as usize;
            Ok(vm.stack.pick(count)?)
        }
        CommandId::Roll => {
            let count = as_index(&pop(vm)?)? as usize;
            Ok(vm.stack.roll(count)?)
        }
        CommandId::RollDown => {
            let count = as_index(&pop(vm)?)? as usize;
            Ok(vm.stack.roll_down(count)?)
        }
        CommandId::Depth => push(vm, Object::Integer(Integer::from_i64(vm.stack.depth() as i64))),
        CommandId::ClearStack => {
            while vm.stack.depth() > 0 {
                vm.stack.pop()?;
            }
            Ok(())
        }

        // --- Directory store ---
        CommandId::Sto => {
            let (value, name) = pop2(vm)?;
            let name = as_name(&name)?;
            Ok(vm.current_directory_mut()?.store(&name, value)?)
        }
        CommandId::Rcl => {
            let name = as_name(&pop(vm)?)?;
            let value = vm.current_directory()?.recall(&name)?.clone();
            push(vm, value)
        }
        CommandId::Purge => {
            let name = as_name(&pop(vm)?)?;
            Ok(vm.current_directory_mut()?.purge(&name)?)
        }
        CommandId::PgAll => {
            vm.current_directory_mut()?.purge_all();
            Ok(())
        }
        CommandId::StoAdd => store_combine(vm, BinaryOp::Add),
        CommandId::StoSub => store_combine(vm, BinaryOp::Sub),
        CommandId::StoMul => store_combine(vm, BinaryOp::Mul),
        CommandId::StoDiv => store_combine(vm, BinaryOp::Div),
        CommandId::Incr => increment(vm, BinaryOp::Add),
        CommandId::Decr => increment(vm, BinaryOp::Sub),
        CommandId::Clone => Ok(vm.stack.dup()?),
        CommandId::CrDir => {
            let name = as_name(&pop(vm)?)?;
            Ok(vm.current_directory_mut()?.create_subdirectory(&name)?)
        }
        CommandId::UpDir => Ok(vm.path.updir()?),
        CommandId::Home => {
            vm.path = Path::home();
            Ok(())
        }
        CommandId::Path => {
            let segments = vm.path.segments().iter().map(|s| Object::Symbol(s.clone())).collect();
            push(vm, Object::List(Box::new(List::from_vec(segments))))
        }
        CommandId::Vars => {
            let names = vm.current_directory()?.vars().into_iter().map(|n| Object::Symbol(n.to_string())).collect();
            push(vm, Object::List(Box::new(List::from_vec(names))))
        }
        CommandId::TVars => {
            let type_name = as_name(&pop(vm)?)?;
            let names = vm
                .current_directory()?
                .tvars(|value| value.type_name() == type_name)
                .into_iter()
                .map(|n| Object::Symbol(n.to_string()))
                .collect();
            push(vm, Object::List(Box::new(List::from_vec(names))))
        }

        // --- Flags ---
        CommandId::SetFlag => {
            let index = as_index(&pop(vm)?)? as i32;
            vm.flags.set(index);
            Ok(())
        }
        CommandId::ClearFlag => {
            let index = as_index(&pop(vm)?)? as i32;
            vm.flags.clear(index);
            Ok(())
        }
        CommandId::FlagSetTest => {
            let index = as_index(&pop(vm)?)? as i32;
            push_bool(vm, vm.flags.is_set(index))
        }
        CommandId::FlagClearTest => {
            let index = as_index(&pop(vm)?)? as i32;
            push_bool(vm, vm.flags.is_clear(index))
        }
        CommandId::FlagSetTestClear => {
            let index = as_index(&pop(vm)?)? as i32;
            let was_set = vm.flags.test_and_clear_if_set(index);
            push_bool(vm, was_set)
        }
        CommandId::FlagClearTestClear => {
            let index = as_index(&pop(vm)?)? as i32;
            let was_clear = vm.flags.test_and_clear_if_clear(index);
            push_bool(vm, was_clear)
        }

        // --- Containers ---
        CommandId::Get => {
            let (container, index) = pop2(vm)?;
            push(vm, container_get(&container, &index)?)
        }
        CommandId::GetI => {
            let (container, index) = pop2(vm)?;
            let list = as_list(container)?;
            let i = as_index(&index)?;
            let (value, next) = list.get_i(i)?;
            let value = value.clone();
            push(vm, value)?;
            push(vm, Object::Integer(Integer::from_i64(next as i64)))
        }
        CommandId::Put => {
            let index = pop(vm)?;
            let value = pop(vm)?;
            let container = pop(vm)?;
            push(vm, container_put(container, &index, value)?)
        }
        CommandId::PutI => {
            let index = pop(vm)?;
            let value = pop(vm)?;
            let container = pop(vm)?;
            let mut list = as_list(container)?;
            let i = as_index(&index)?;
            let next = list.put_i(i, value)?;
            push(vm, Object::List(Box::new(list)))?;
            push(vm, Object::Integer(Integer::from_i64(next as i64)))
        }
        CommandId::Head => {
            let container = pop(vm)?;
            let value = match &container {
                Object::List(list) => list.head()?.clone(),
                Object::Text(text) => Object::Text(Text::new(text.head()?.to_string())),
                _ => return Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
            };
            push(vm, value)
        }
        CommandId::Tail => {
            let container = pop(vm)?;
            let value = match container {
                Object::List(list) => Object::List(Box::new(list.tail()?)),
                Object::Text(text) => Object::Text(text.tail()?),
                _ => return Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
            };
            push(vm, value)
        }
        CommandId::Size => {
            let container = pop(vm)?;
            let size = match &container {
                Object::List(list) => list.len(),
                Object::Array(array) => {
                    let (rows, cols) = array.shape();
                    rows * cols
                }
                Object::Text(text) => text.size(),
                _ => return Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
            };
            push(vm, Object::Integer(Integer::from_i64(size as i64)))
        }
        CommandId::Extract => {
            let last = as_index(&pop(vm)?)? as usize;
            let first = as_index(&pop(vm)?)? as usize;
            let container = pop(vm)?;
            let value = match container {
                Object::List(list) => Object::List(Box::new(list.extract(first, last)?)),
                Object::Text(text) => Object::Text(text.extract(first, last)?),
                _ => return Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
            };
            push(vm, value)
        }
        CommandId::Sort => sort(vm, false),
        CommandId::QuickSort => sort(vm, false),
        CommandId::ReverseSort => sort(vm, true),
        CommandId::Map => map(vm),
        CommandId::Reduce => reduce(vm),
        CommandId::Filter => filter(vm),
        CommandId::DoList => map(vm),
        CommandId::DoSubs => do_subs(vm),
        CommandId::Contains => {
            let (container, needle) = pop2(vm)?;
            let list = match container {
                Object::List(list) => *list,
                _ => return Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
            };
            push_bool(vm, list.as_slice().contains(&needle))
        }

        // --- Matrix/vector ---
        CommandId::Det => {
            let array = as_array(pop(vm)?)?;
            let value = array.det(&Object::zero(), &Object::one(), is_negligible)?;
            push(vm, value)
        }
        CommandId::Norm => {
            let array = as_array(pop(vm)?)?;
            push(vm, Object::HwFloat(HwFloat::Double(array.norm())))
        }
        CommandId::Dot => {
            let (a, b) = pop2(vm)?;
            let value = as_array(a)?.dot(&as_array(b)?, &Object::zero())?;
            push(vm, value)
        }
        CommandId::Cross => {
            let (a, b) = pop2(vm)?;
            let result = as_array(a)?.cross(&as_array(b)?)?;
            push(vm, Object::Array(Box::new(result)))
        }
        CommandId::Transpose => {
            let array = as_array(pop(vm)?)?;
            push(vm, Object::Array(Box::new(array.transpose())))
        }
        CommandId::ConjTranspose => {
            let array = as_array(pop(vm)?)?;
            let transposed = array.conjugate_transpose(|v| arithmetic::conj(v).unwrap_or_else(|_| v.clone()));
            push(vm, Object::Array(Box::new(transposed)))
        }
        CommandId::Con => {
            let value = pop(vm)?;
            let cols = as_index(&pop(vm)?)? as usize;
            let rows = as_index(&pop(vm)?)? as usize;
            push(vm, Object::Array(Box::new(Array::con(rows, cols, value))))
        }
        CommandId::Idn => {
            let n = as_index(&pop(vm)?)? as usize;
            push(vm, Object::Array(Box::new(Array::idn(n, Object::zero(), Object::one()))))
        }
        CommandId::Ranm => {
            let cols = as_index(&pop(vm)?)? as usize;
            let rows = as_index(&pop(vm)?)? as usize;
            let array = Array::ranm(rows, cols, || random_entry(vm));
            push(vm, Object::Array(Box::new(array)))
        }
        CommandId::RowInsert => {
            let row = as_list(pop(vm)?)?;
            let at = as_index(&pop(vm)?)? as usize;
            let array = as_array(pop(vm)?)?;
            let result = array.row_insert(at, row.as_slice())?;
            push(vm, Object::Array(Box::new(result)))
        }
        CommandId::ColInsert => {
            let col = as_list(pop(vm)?)?;
            let at = as_index(&pop(vm)?)? as usize;
            let array = as_array(pop(vm)?)?;
            let result = array.col_insert(at, col.as_slice())?;
            push(vm, Object::Array(Box::new(result)))
        }
        CommandId::ToVector => {
            let array = as_array(pop(vm)?)?;
            push(vm, Object::List(Box::new(List::from_vec(array.to_vector()))))
        }

        // --- Control flow / evaluation ---
        CommandId::Eval => {
            let object = pop(vm)?;
            vm.eval_object(object)
        }
        CommandId::IfThen => {
            let then_branch = pop(vm)?;
            let condition = pop(vm)?;
            if is_truthy(&condition) {
                vm.eval_object(then_branch)
            } else {
                Ok(())
            }
        }
        CommandId::IfThenElse => {
            let else_branch = pop(vm)?;
            let then_branch = pop(vm)?;
            let condition = pop(vm)?;
            vm.eval_object(if is_truthy(&condition) { then_branch } else { else_branch })
        }
        CommandId::LocalBind => local_bind(vm),

        // --- Error handling ---
        CommandId::DoErr => {
            let code = pop(vm)?;
            let index = as_index(&code)? as usize;
            let kind = nth_error_kind(index).ok_or(RuntimeError::Kind(ErrorKind::BadArgumentValue))?;
            vm.handlers.raise(kind);
            Err(RuntimeError::Kind(kind))
        }
        CommandId::Errn => {
            let index = vm.handlers.last_error().and_then(error_kind_index).unwrap_or(0);
            push(vm, Object::Integer(Integer::from_i64(index as i64)))
        }
        CommandId::Errm => {
            let message = match vm.handlers.last_error() {
                Some(kind) => kind.to_string(),
                None => String::new(),
            };
            push(vm, Object::Text(Text::new(message)))
        }
        CommandId::Err0 => {
            vm.handlers.clear_last_error();
            Ok(())
        }

        // --- Rewrite / algebra ---
        CommandId::Expand => unary_expression(vm, rewrite::auto_simplify),
        CommandId::Collect => unary_expression(vm, rewrite::auto_simplify),
        CommandId::Isolate => isolate(vm),
        CommandId::Differentiate => differentiate(vm),
        CommandId::Primitive => primitive(vm),
        CommandId::Subst => subst(vm),
        CommandId::Solve => solve(vm),
        CommandId::ToNum => {
            let object = pop(vm)?;
            push(vm, arithmetic::to_decimal(&object, precision)?)
        }
        CommandId::ToFraction => {
            let object = pop(vm)?;
            push(vm, arithmetic::to_fraction(&object, precision)?)
        }
        CommandId::ToPoly => to_poly(vm),

        // --- Library tables ---
        CommandId::Attach => {
            let name = as_name(&pop(vm)?)?;
            Ok(vm.library.attach(&name)?)
        }
        CommandId::Detach => {
            let name = as_name(&pop(vm)?)?;
            Ok(vm.library.detach(&name)?)
        }
        CommandId::StdRnd => {
            vm.settings.significant_digits = None;
            Ok(())
        }
        CommandId::RelRnd => {
            let digits = as_index(&pop(vm)?)? as u32;
            vm.settings.significant_digits = Some(digits);
            Ok(())
        }
        CommandId::PrcRnd => {
            let digits = as_index(&pop(vm)?)? as u32;
            vm.settings.significant_digits = Some(digits);
            Ok(())
        }

        // --- Modes ---
        CommandId::Modes => {
            let tokens = vm.settings.modes_program().join(" ");
            let artifact = Tag::new("Modes".to_string(), Object::Text(Text::new(tokens)));
            push(vm, Object::SettingsArtifact(Box::new(artifact)))
        }
        CommandId::Cycle => {
            vm.settings.display_mode = match vm.settings.display_mode {
                DisplayMode::Standard => DisplayMode::Fixed(precision.min(9)),
                DisplayMode::Fixed(_) => DisplayMode::Scientific(precision.min(9)),
                DisplayMode::Scientific(_) => DisplayMode::Engineering(precision.min(9)),
                DisplayMode::Engineering(_) => DisplayMode::Standard,
            };
            Ok(())
        }
    }
}

fn vm_angle_unit(vm: &Interpreter) -> db48x_numeric::AngleUnit {
    vm.settings.angle_units
}

fn binary_op(vm: &mut Interpreter, op: BinaryOp) -> Result<(), RuntimeError> {
    let precision = vm.settings.precision;
    let (a, b) = pop2(vm)?;
    let result = arithmetic::binary_numeric(op, &a, &b, precision)?;
    push(vm, result)
}

fn binary(
    vm: &mut Interpreter,
    f: impl FnOnce(&Object, &Object, u32) -> Result<Object, ErrorKind>,
) -> Result<(), RuntimeError> {
    let precision = vm.settings.precision;
    let (a, b) = pop2(vm)?;
    let result = f(&a, &b, precision)?;
    push(vm, result)
}

fn unary(vm: &mut Interpreter, f: impl FnOnce(&Object, u32) -> Result<Object, ErrorKind>) -> Result<(), RuntimeError> {
    let precision = vm.settings.precision;
    let a = pop(vm)?;
    let result = f(&a, precision)?;
    push(vm, result)
}

fn transcendental(vm: &mut Interpreter, f: Transcendental) -> Result<(), RuntimeError> {
    let a = pop(vm)?;
    let result = arithmetic::transcendental(f, &a)?;
    push(vm, result)
}

fn store_combine(vm: &mut Interpreter, op: BinaryOp) -> Result<(), RuntimeError> {
    let precision = vm.settings.precision;
    let operand = pop(vm)?;
    let name = as_name(&pop(vm)?)?;
    vm.current_directory_mut()?
        .store_combine(&name, &operand, |current, operand| arithmetic::binary_numeric(op, current, operand, precision))
        .map_err(|error| match error {
            db48x_container::StoreCombineError::Directory(e) => RuntimeError::from(e),
            db48x_container::StoreCombineError::Combine(kind) => RuntimeError::Kind(kind),
        })
}

fn increment(vm: &mut Interpreter, op: BinaryOp) -> Result<(), RuntimeError> {
    let precision = vm.settings.precision;
    let name = as_name(&pop(vm)?)?;
    let one = Object::one();
    vm.current_directory_mut()?
        .store_combine(&name, &one, |current, one| arithmetic::binary_numeric(op, current, one, precision))
        .map_err(|error| match error {
            db48x_container::StoreCombineError::Directory(e) => RuntimeError::from(e),
            db48x_container::StoreCombineError::Combine(kind) => RuntimeError::Kind(kind),
        })
}

fn container_get(container: &Object, index: &Object) -> Result<Object, ErrorKind> {
    match container {
        Object::List(list) => {
            let i = as_index(index)?;
            Ok(list.get_i(i)?.0.clone())
        }
        Object::Array(array) => {
            let (row, col) = array_index_pair(index)?;
            Ok(array.get(row, col)?.clone())
        }
        _ => Err(ErrorKind::BadArgumentType),
    }
}

fn container_put(container: Object, index: &Object, value: Object) -> Result<Object, ErrorKind> {
    match container {
        Object::List(mut list) => {
            let i = as_index(index)?;
            list.put_i(i, value)?;
            Ok(Object::List(list))
        }
        Object::Array(mut array) => {
            let (row, col) = array_index_pair(index)?;
            array.set(row, col, value)?;
            Ok(Object::Array(array))
        }
        _ => Err(ErrorKind::BadArgumentType),
    }
}

fn array_index_pair(index: &Object) -> Result<(usize, usize), ErrorKind> {
    match index {
        Object::List(list) if list.len() == 2 => {
            let row = as_index(list.get(1)?)? as usize;
            let col = as_index(list.get(2)?)? as usize;
            Ok((row.saturating_sub(1), col.saturating_sub(1)))
        }
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// Orders numeric objects for `SORT`/`QUICKSORT`/`REVLIST`: `Object` has no
/// total order of its own (it carries `f64`-backed families), so sorting
/// goes through this rank key instead of [`List::sort`]'s `Ord` bound.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SortKey(f64);

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn sort_key(object: &Object) -> SortKey {
    SortKey(object.to_f64_approx().unwrap_or(f64::NAN))
}

fn sort(vm: &mut Interpreter, reverse: bool) -> Result<(), RuntimeError> {
    let list = as_list(pop(vm)?)?;
    let sorted = list.quick_sort_by_key(sort_key);
    let sorted = if reverse {
        List::from_vec(sorted.as_slice().iter().rev().cloned().collect())
    } else {
        sorted
    };
    push(vm, Object::List(Box::new(sorted)))
}

fn map(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let callable = pop(vm)?;
    let list = as_list(pop(vm)?)?;
    let mapped = list.map(|item| apply(vm, &callable, core::slice::from_ref(item)))?;
    push(vm, Object::List(Box::new(mapped)))
}

fn reduce(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let callable = pop(vm)?;
    let list = as_list(pop(vm)?)?;
    let result = list.reduce(|a, b| apply(vm, &callable, &[a.clone(), b.clone()]))?;
    push(vm, result)
}

fn filter(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let callable = pop(vm)?;
    let list = as_list(pop(vm)?)?;
    let filtered = list.filter(|item| apply(vm, &callable, core::slice::from_ref(item)).map(|r| is_truthy(&r)).unwrap_or(false));
    push(vm, Object::List(Box::new(filtered)))
}

fn do_subs(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let callable = pop(vm)?;
    let window_size = as_index(&pop(vm)?)? as usize;
    let list = as_list(pop(vm)?)?;
    let result = list.do_subs(window_size, |window| apply(vm, &callable, window))?;
    push(vm, Object::List(Box::new(result)))
}

fn is_negligible(object: &Object) -> bool {
    object.to_f64_approx().map(|v| libm::fabs(v) < 1e-12).unwrap_or(false)
}

#[cfg(feature = "random")]
fn random_entry(vm: &mut Interpreter) -> Object {
    let precision = vm.settings.precision;
    Object::Decimal(vm.prng.uniform_unit(precision))
}

#[cfg(not(feature = "random"))]
fn random_entry(_vm: &mut Interpreter) -> Object {
    Object::zero()
}

#[cfg(feature = "random")]
fn rdz(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let seed = as_index(&pop(vm)?)?;
    vm.prng = Prng::seeded(seed as u64);
    Ok(())
}

#[cfg(not(feature = "random"))]
fn rdz(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    pop(vm)?;
    Err(RuntimeError::Kind(ErrorKind::UndefinedOperation))
}

#[cfg(feature = "random")]
fn rand(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let precision = vm.settings.precision;
    let value = vm.prng.uniform_unit(precision);
    push(vm, Object::Decimal(value))
}

#[cfg(not(feature = "random"))]
fn rand(_vm: &mut Interpreter) -> Result<(), RuntimeError> {
    Err(RuntimeError::Kind(ErrorKind::UndefinedOperation))
}

#[cfg(feature = "random")]
fn random(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let (low, high) = pop2(vm)?;
    let low = match low {
        Object::Integer(n) => n,
        _ => return Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
    };
    let high = match high {
        Object::Integer(n) => n,
        _ => return Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
    };
    let value = vm.prng.uniform_integer(&low, &high)?;
    push(vm, Object::Integer(value))
}

#[cfg(not(feature = "random"))]
fn random(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    pop2(vm)?;
    Err(RuntimeError::Kind(ErrorKind::UndefinedOperation))
}

fn local_bind(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let program = pop(vm)?;
    let names = as_list(pop(vm)?)?;
    let mut frame = Frame::new(0);
    for name in names.as_slice().iter().rev() {
        let name = as_name(name)?;
        let value = pop(vm)?;
        frame.bind(name, value);
    }
    vm.returns.enter(frame)?;
    let result = vm.eval_object(program);
    vm.returns.leave()?;
    result
}

fn unary_expression(vm: &mut Interpreter, f: impl FnOnce(&db48x_container::ExprNode<Object>) -> db48x_container::ExprNode<Object>) -> Result<(), RuntimeError> {
    let expr = expect_expression(pop(vm)?)?;
    push(vm, Object::Expression(Box::new(f(&expr))))
}

fn isolate(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let name = as_name(&pop(vm)?)?;
    let expr = expect_expression(pop(vm)?)?;
    let isolated = rewrite::isolate(&expr, &name)?;
    push(vm, Object::Expression(Box::new(isolated)))
}

fn differentiate(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let name = as_name(&pop(vm)?)?;
    let expr = expect_expression(pop(vm)?)?;
    let derivative = rewrite::differentiate(&expr, &name)?;
    push(vm, Object::Expression(Box::new(derivative)))
}

fn primitive(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let name = as_name(&pop(vm)?)?;
    let expr = expect_expression(pop(vm)?)?;
    let antiderivative = rewrite::primitive(&expr, &name)?;
    push(vm, Object::Expression(Box::new(antiderivative)))
}

fn subst(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let value = pop(vm)?;
    let name = as_name(&pop(vm)?)?;
    let expr = expect_expression(pop(vm)?)?;
    let substituted = rewrite::substitute(&expr, &name, &value);
    push(vm, Object::Expression(Box::new(substituted)))
}

fn solve(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let name = as_name(&pop(vm)?)?;
    let expr = expect_expression(pop(vm)?)?;
    let isolated = rewrite::isolate(&expr, &name)?;
    let precision = vm.settings.precision;
    let mut resolve = |n: &str| vm.current_directory().ok()?.recall(n).ok().cloned();
    match rewrite::evaluate(&isolated, &mut resolve, precision) {
        Ok(value) => push(vm, value),
        Err(ErrorKind::UndefinedName) => push(vm, Object::Expression(Box::new(isolated))),
        Err(kind) => Err(RuntimeError::Kind(kind)),
    }
}

fn to_poly(vm: &mut Interpreter) -> Result<(), RuntimeError> {
    let expr = expect_expression(pop(vm)?)?;
    // Only a bare symbol or numeric literal converts without loss here; a
    // fuller monomial-sum reduction is tracked as a follow-on.
    let polynomial = match &expr {
        db48x_container::ExprNode::Leaf(value) => {
            db48x_container::Polynomial::from_terms(alloc::vec![(0u32, value.clone())], &Object::zero())
        }
        db48x_container::ExprNode::Symbol(_) => {
            db48x_container::Polynomial::from_terms(alloc::vec![(1u32, Object::one())], &Object::zero())
        }
        _ => return Err(RuntimeError::Kind(ErrorKind::UndefinedOperation)),
    };
    push(vm, Object::Polynomial(Box::new(polynomial)))
}

fn expect_expression(object: Object) -> Result<db48x_container::ExprNode<Object>, RuntimeError> {
    match object {
        Object::Expression(expr) => Ok(*expr),
        _ => Err(RuntimeError::Kind(ErrorKind::BadArgumentType)),
    }
}

fn nth_error_kind(index: usize) -> Option<ErrorKind> {
    use strum::IntoEnumIterator;
    ErrorKind::iter().nth(index)
}

fn error_kind_index(kind: ErrorKind) -> Option<usize> {
    use strum::IntoEnumIterator;
    ErrorKind::iter().position(|k| k == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;

    fn push_int(vm: &mut Interpreter, n: i64) {
        vm.stack.push(Object::Integer(Integer::from_i64(n))).unwrap();
    }

    #[test]
    fn add_pops_two_and_pushes_their_sum() {
        let mut vm = Interpreter::new();
        push_int(&mut vm, 2);
        push_int(&mut vm, 3);
        dispatch(&mut vm, CommandId::Add).unwrap();
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(5)));
    }

    #[test]
    fn roll_down_and_roll_are_inverses() {
        let mut vm = Interpreter::new();
        push_int(&mut vm, 1);
        push_int(&mut vm, 2);
        push_int(&mut vm, 3);
        push_int(&mut vm, 3);
        dispatch(&mut vm, CommandId::RollDown).unwrap();
        push_int(&mut vm, 3);
        dispatch(&mut vm, CommandId::Roll).unwrap();
        assert_eq!(vm.stack.snapshot(), alloc::vec![Object::Integer(Integer::from_i64(1)), Object::Integer(Integer::from_i64(2)), Object::Integer(Integer::from_i64(3))]);
    }

    #[test]
    fn sto_and_rcl_round_trip_through_the_working_directory() {
        let mut vm = Interpreter::new();
        push_int(&mut vm, 42);
        vm.stack.push(Object::Symbol("X".to_string())).unwrap();
        dispatch(&mut vm, CommandId::Sto).unwrap();
        vm.stack.push(Object::Symbol("X".to_string())).unwrap();
        dispatch(&mut vm, CommandId::Rcl).unwrap();
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(42)));
    }

    #[test]
    fn depth_reports_the_current_stack_size() {
        let mut vm = Interpreter::new();
        push_int(&mut vm, 1);
        push_int(&mut vm, 2);
        dispatch(&mut vm, CommandId::Depth).unwrap();
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(2)));
    }

    #[test]
    fn if_then_else_takes_the_matching_branch() {
        let mut vm = Interpreter::new();
        push_int(&mut vm, 0);
        vm.stack.push(Object::Integer(Integer::from_i64(10))).unwrap();
        vm.stack.push(Object::Integer(Integer::from_i64(20))).unwrap();
        dispatch(&mut vm, CommandId::IfThenElse).unwrap();
        assert_eq!(*vm.stack.peek(0).unwrap(), Object::Integer(Integer::from_i64(20)));
    }
}
