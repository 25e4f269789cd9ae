//! `CommandId`: the built-in operators and functions an `ObjectTag::Command`
//! names (spec.md §3.1, §4.5, §4.7, §4.9).
//!
//! A command carries no payload of its own — evaluating it means looking up
//! its handler in a dispatch table keyed by this enum. `strum`'s `Display`
//! gives each variant the exact token the parser/renderer use, the same
//! role `fuel_asm::Opcode`'s mnemonic plays for its assembly syntax.

use strum_macros::{
    Display,
    EnumIter,
};

/// One built-in RPL operator, function, or stack/store/control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandId {
    // --- Arithmetic (spec.md §4.3.1..§4.3.6) ---
    /// `+`.
    #[strum(to_string = "+")]
    Add,
    /// `−`.
    #[strum(to_string = "-")]
    Sub,
    /// `×`.
    #[strum(to_string = "*")]
    Mul,
    /// `÷`; exact if divisible, else a reduced fraction.
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "NEG")]
    Neg,
    #[strum(to_string = "INV")]
    Inv,
    #[strum(to_string = "ABS")]
    Abs,
    #[strum(to_string = "SIGN")]
    Sign,
    /// Result takes the sign of the divisor.
    #[strum(to_string = "MOD")]
    Mod,
    /// Result takes the sign of the dividend.
    #[strum(to_string = "REM")]
    Rem,
    #[strum(to_string = "GCD")]
    Gcd,
    #[strum(to_string = "LCM")]
    Lcm,
    #[strum(to_string = "^")]
    Pow,
    #[strum(to_string = "XROOT")]
    XRoot,
    #[strum(to_string = "SQRT")]
    Sqrt,
    #[strum(to_string = "CBRT")]
    Cbrt,
    #[strum(to_string = "SQ")]
    Sq,
    #[strum(to_string = "CUBED")]
    Cubed,
    #[strum(to_string = "FACT")]
    Factorial,
    #[strum(to_string = "PERCENT")]
    Percent,
    #[strum(to_string = "%CH")]
    PercentChange,

    // --- Transcendental ---
    #[strum(to_string = "SIN")]
    Sin,
    #[strum(to_string = "COS")]
    Cos,
    #[strum(to_string = "TAN")]
    Tan,
    #[strum(to_string = "ASIN")]
    Asin,
    #[strum(to_string = "ACOS")]
    Acos,
    #[strum(to_string = "ATAN")]
    Atan,
    #[strum(to_string = "ATAN2")]
    Atan2,
    #[strum(to_string = "SINH")]
    Sinh,
    #[strum(to_string = "COSH")]
    Cosh,
    #[strum(to_string = "TANH")]
    Tanh,
    #[strum(to_string = "ASINH")]
    Asinh,
    #[strum(to_string = "ACOSH")]
    Acosh,
    #[strum(to_string = "ATANH")]
    Atanh,
    #[strum(to_string = "LN")]
    Ln,
    #[strum(to_string = "EXP")]
    Exp,
    #[strum(to_string = "LOG")]
    Log10,
    #[strum(to_string = "ALOG")]
    Exp10,
    #[strum(to_string = "LOG2")]
    Log2,
    #[strum(to_string = "EXP2")]
    Exp2,
    #[strum(to_string = "LNP1")]
    Ln1p,
    #[strum(to_string = "EXPM")]
    Expm1,

    // --- Complex (spec.md §4.3.6) ---
    #[strum(to_string = "ARG")]
    Arg,
    #[strum(to_string = "RE")]
    Re,
    #[strum(to_string = "IM")]
    Im,
    #[strum(to_string = "CONJ")]
    Conj,

    // --- Units (spec.md §4.3.8) ---
    /// `1_in` `CONVERT` `_mm`.
    #[strum(to_string = "CONVERT")]
    Convert,
    #[strum(to_string = "UBASE")]
    UBase,
    #[strum(to_string = "UVAL")]
    UVal,

    // --- Date (spec.md §4.3.9) ---
    #[strum(to_string = "DDAYS")]
    DDays,
    #[strum(to_string = "DATEADD")]
    DateAdd,

    // --- Randomness (spec.md §4.3.11) ---
    #[strum(to_string = "RDZ")]
    Rdz,
    #[strum(to_string = "RAND")]
    Rand,
    #[strum(to_string = "RANDOM")]
    Random,

    // --- Stack (spec.md §4.5) ---
    #[strum(to_string = "DUP")]
    Dup,
    #[strum(to_string = "DUP2")]
    Dup2,
    #[strum(to_string = "DUPN")]
    DupN,
    #[strum(to_string = "DROP")]
    Drop,
    #[strum(to_string = "DROP2")]
    Drop2,
    #[strum(to_string = "DROPN")]
    DropN,
    #[strum(to_string = "SWAP")]
    Swap,
    #[strum(to_string = "ROT")]
    Rot,
    #[strum(to_string = "OVER")]
    Over,
    #[strum(to_string = "PICK")]
    Pick,
    #[strum(to_string = "ROLL")]
    Roll,
    #[strum(to_string = "ROLLD")]
    RollDown,
    #[strum(to_string = "DEPTH")]
    Depth,
    #[strum(to_string = "CLEAR")]
    ClearStack,

    // --- Directory store (spec.md §4.6) ---
    #[strum(to_string = "STO")]
    Sto,
    #[strum(to_string = "RCL")]
    Rcl,
    #[strum(to_string = "PURGE")]
    Purge,
    #[strum(to_string = "PGALL")]
    PgAll,
    #[strum(to_string = "STO+")]
    StoAdd,
    #[strum(to_string = "STO-")]
    StoSub,
    #[strum(to_string = "STO*")]
    StoMul,
    #[strum(to_string = "STO/")]
    StoDiv,
    #[strum(to_string = "INCR")]
    Incr,
    #[strum(to_string = "DECR")]
    Decr,
    #[strum(to_string = "CLONE")]
    Clone,
    #[strum(to_string = "CRDIR")]
    CrDir,
    #[strum(to_string = "UPDIR")]
    UpDir,
    #[strum(to_string = "HOME")]
    Home,
    #[strum(to_string = "PATH")]
    Path,
    #[strum(to_string = "VARS")]
    Vars,
    #[strum(to_string = "TVARS")]
    TVars,

    // --- Flags (spec.md §3.4) ---
    #[strum(to_string = "SF")]
    SetFlag,
    #[strum(to_string = "CF")]
    ClearFlag,
    #[strum(to_string = "FS?")]
    FlagSetTest,
    #[strum(to_string = "FC?")]
    FlagClearTest,
    #[strum(to_string = "FS?C")]
    FlagSetTestClear,
    #[strum(to_string = "FC?C")]
    FlagClearTestClear,

    // --- Containers (spec.md §4.4) ---
    #[strum(to_string = "GET")]
    Get,
    #[strum(to_string = "GETI")]
    GetI,
    #[strum(to_string = "PUT")]
    Put,
    #[strum(to_string = "PUTI")]
    PutI,
    #[strum(to_string = "HEAD")]
    Head,
    #[strum(to_string = "TAIL")]
    Tail,
    #[strum(to_string = "SIZE")]
    Size,
    #[strum(to_string = "EXTRACT")]
    Extract,
    #[strum(to_string = "SORT")]
    Sort,
    #[strum(to_string = "QUICKSORT")]
    QuickSort,
    #[strum(to_string = "REVLIST")]
    ReverseSort,
    #[strum(to_string = "MAP")]
    Map,
    #[strum(to_string = "REDUCE")]
    Reduce,
    #[strum(to_string = "FILTER")]
    Filter,
    #[strum(to_string = "DOLIST")]
    DoList,
    #[strum(to_string = "DOSUBS")]
    DoSubs,
    #[strum(to_string = "CONTAINS")]
    Contains,

    // --- Matrix/vector (spec.md §4.3.10) ---
    #[strum(to_string = "DET")]
    Det,
    #[strum(to_string = "NORM")]
    Norm,
    #[strum(to_string = "DOT")]
    Dot,
    #[strum(to_string = "CROSS")]
    Cross,
    #[strum(to_string = "TRN")]
    Transpose,
    #[strum(to_string = "TRAN")]
    ConjTranspose,
    #[strum(to_string = "CON")]
    Con,
    #[strum(to_string = "IDN")]
    Idn,
    #[strum(to_string = "RANM")]
    Ranm,
    #[strum(to_string = "ROW+")]
    RowInsert,
    #[strum(to_string = "COL+")]
    ColInsert,
    #[strum(to_string = "→V")]
    ToVector,

    // --- Control flow / evaluation (spec.md §4.5) ---
    #[strum(to_string = "EVAL")]
    Eval,
    #[strum(to_string = "IFT")]
    IfThen,
    #[strum(to_string = "IFTE")]
    IfThenElse,
    #[strum(to_string = "→")]
    LocalBind,

    // --- Error handling (spec.md §4.5, §4.8) ---
    #[strum(to_string = "DOERR")]
    DoErr,
    #[strum(to_string = "ERRN")]
    Errn,
    #[strum(to_string = "ERRM")]
    Errm,
    #[strum(to_string = "ERR0")]
    Err0,

    // --- Rewrite / algebra (spec.md §4.7) ---
    #[strum(to_string = "EXPAND")]
    Expand,
    #[strum(to_string = "COLLECT")]
    Collect,
    #[strum(to_string = "ISOL")]
    Isolate,
    #[strum(to_string = "∂")]
    Differentiate,
    #[strum(to_string = "∫")]
    Primitive,
    #[strum(to_string = "SUBST")]
    Subst,
    #[strum(to_string = "ROOT")]
    Solve,
    #[strum(to_string = "→NUM")]
    ToNum,
    #[strum(to_string = "→Q")]
    ToFraction,
    #[strum(to_string = "→POLY")]
    ToPoly,

    // --- Library tables (spec.md §4.9) ---
    #[strum(to_string = "ATTACH")]
    Attach,
    #[strum(to_string = "DETACH")]
    Detach,
    #[strum(to_string = "STDRND")]
    StdRnd,
    #[strum(to_string = "RELRND")]
    RelRnd,
    #[strum(to_string = "PRCRND")]
    PrcRnd,

    // --- Modes (spec.md §9) ---
    #[strum(to_string = "MODES")]
    Modes,
    #[strum(to_string = "CYCLE")]
    Cycle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_command_renders_a_nonempty_token() {
        for cmd in CommandId::iter() {
            assert!(!cmd.to_string().is_empty());
        }
    }

    #[test]
    fn tokens_are_unique() {
        let mut seen = Vec::new();
        for cmd in CommandId::iter() {
            let token = cmd.to_string();
            assert!(!seen.contains(&token), "duplicate command token: {token}");
            seen.push(token);
        }
    }
}
