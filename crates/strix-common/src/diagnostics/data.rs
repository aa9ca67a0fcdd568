//! Diagnostic message data for the strix compiler frontend.

use super::DiagnosticCategory;
use super::DiagnosticMessage;

/// Diagnostics raised around generic method calls and their collaborators.
pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: 121,
        category: DiagnosticCategory::Error,
        message: "The call is ambiguous between the following methods: '{0}' and '{1}'.",
    },
    DiagnosticMessage {
        code: 123,
        category: DiagnosticCategory::Error,
        message: "No overload for '{0}' matches delegate '{1}'.",
    },
    DiagnosticMessage {
        code: 407,
        category: DiagnosticCategory::Error,
        message: "'{0}' has the wrong return type.",
    },
    DiagnosticMessage {
        code: 411,
        category: DiagnosticCategory::Error,
        message: "The type arguments for method '{0}' cannot be inferred from the usage. Try specifying the type arguments explicitly.",
    },
    DiagnosticMessage {
        code: 1503,
        category: DiagnosticCategory::Error,
        message: "Argument {0}: cannot convert from '{1}' to '{2}'.",
    },
    DiagnosticMessage {
        code: 1660,
        category: DiagnosticCategory::Error,
        message: "Cannot convert lambda expression to type '{0}' because it is not a delegate type.",
    },
    DiagnosticMessage {
        code: 8135,
        category: DiagnosticCategory::Error,
        message: "Tuple with {0} elements cannot be converted to type '{1}'.",
    },
];

pub mod diagnostic_messages {
    pub const AMBIGUOUS_CALL: &str =
        "The call is ambiguous between the following methods: '{0}' and '{1}'.";
    pub const NO_OVERLOAD_MATCHES_DELEGATE: &str = "No overload for '{0}' matches delegate '{1}'.";
    pub const WRONG_RETURN_TYPE: &str = "'{0}' has the wrong return type.";
    pub const TYPE_ARGUMENTS_CANNOT_BE_INFERRED: &str =
        "The type arguments for method '{0}' cannot be inferred from the usage. Try specifying the type arguments explicitly.";
    pub const ARGUMENT_CANNOT_CONVERT: &str = "Argument {0}: cannot convert from '{1}' to '{2}'.";
    pub const LAMBDA_NOT_A_DELEGATE_TYPE: &str =
        "Cannot convert lambda expression to type '{0}' because it is not a delegate type.";
    pub const TUPLE_CANNOT_CONVERT: &str =
        "Tuple with {0} elements cannot be converted to type '{1}'.";
}

pub mod diagnostic_codes {
    pub const AMBIGUOUS_CALL: u32 = 121;
    pub const NO_OVERLOAD_MATCHES_DELEGATE: u32 = 123;
    pub const WRONG_RETURN_TYPE: u32 = 407;
    pub const TYPE_ARGUMENTS_CANNOT_BE_INFERRED: u32 = 411;
    pub const ARGUMENT_CANNOT_CONVERT: u32 = 1503;
    pub const LAMBDA_NOT_A_DELEGATE_TYPE: u32 = 1660;
    pub const TUPLE_CANNOT_CONVERT: u32 = 8135;
}
