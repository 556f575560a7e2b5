//! Diagnostic message table for the JSX core.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const CANNOT_FIND_NAME: u32 = 2304;
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: u32 = 2322;
    pub const PROPERTY_DOES_NOT_EXIST_ON_TYPE: u32 = 2339;
    pub const JSX_ELEMENT_TYPE_DOES_NOT_HAVE_ANY_CONSTRUCT_OR_CALL_SIGNATURES: u32 = 2604;
    pub const JSX_ELEMENT_CLASS_DOES_NOT_SUPPORT_ATTRIBUTES_BECAUSE_IT_DOES_NOT_HAVE_A_PROPERTY:
        u32 = 2607;
    pub const THE_GLOBAL_TYPE_JSX_MAY_NOT_HAVE_MORE_THAN_ONE_PROPERTY: u32 = 2608;
    pub const ARE_SPECIFIED_TWICE_THE_ATTRIBUTE_NAMED_WILL_BE_OVERWRITTEN: u32 = 2710;
    pub const PROPERTY_IS_MISSING_IN_TYPE_BUT_REQUIRED_IN_TYPE: u32 = 2741;
    pub const THIS_JSX_TAGS_PROP_EXPECTS_TYPE_WHICH_REQUIRES_MULTIPLE_CHILDREN_BUT_ONLY_A_SINGLE_CHILD_WAS_PROVIDED: u32 = 2745;
    pub const THIS_JSX_TAGS_PROP_EXPECTS_A_SINGLE_CHILD_OF_TYPE_BUT_MULTIPLE_CHILDREN_WERE_PROVIDED:
        u32 = 2746;
    pub const CANNOT_BE_USED_AS_A_JSX_COMPONENT: u32 = 2786;
    pub const JSX_ELEMENT_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_NO_INTERFACE_JSX_EXISTS: u32 = 7026;
    pub const CANNOT_USE_JSX_UNLESS_THE_JSX_FLAG_IS_PROVIDED: u32 = 17004;
    pub const INVALID_FACTORY_IN_JSX_INTRINSIC_FACTORY_PRAGMA: u32 = 17100;
    pub const INVALID_JSX_INTRINSIC_FACTORY: u32 = 17101;
    pub const NO_JSX_INTRINSIC_FACTORY_DEFINED: u32 = 17102;
    pub const INTRINSIC_JSX_ELEMENT_DOES_NOT_EXIST_IN_FACTORY: u32 = 17103;
    pub const INVALID_FACTORY_IN_JSX_PRAGMA: u32 = 17104;
}

pub mod diagnostic_messages {
    pub const CANNOT_FIND_NAME: &str = "Cannot find name '{0}'.";
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: &str = "Type '{0}' is not assignable to type '{1}'.";
    pub const PROPERTY_DOES_NOT_EXIST_ON_TYPE: &str = "Property '{0}' does not exist on type '{1}'.";
    pub const JSX_ELEMENT_TYPE_DOES_NOT_HAVE_ANY_CONSTRUCT_OR_CALL_SIGNATURES: &str =
        "JSX element type '{0}' does not have any construct or call signatures.";
    pub const JSX_ELEMENT_CLASS_DOES_NOT_SUPPORT_ATTRIBUTES_BECAUSE_IT_DOES_NOT_HAVE_A_PROPERTY:
        &str = "JSX element class does not support attributes because it does not have a '{0}' property.";
    pub const THE_GLOBAL_TYPE_JSX_MAY_NOT_HAVE_MORE_THAN_ONE_PROPERTY: &str =
        "The global type 'JSX.{0}' may not have more than one property.";
    pub const ARE_SPECIFIED_TWICE_THE_ATTRIBUTE_NAMED_WILL_BE_OVERWRITTEN: &str =
        "'{0}' are specified twice. The attribute named '{0}' will be overwritten.";
    pub const PROPERTY_IS_MISSING_IN_TYPE_BUT_REQUIRED_IN_TYPE: &str =
        "Property '{0}' is missing in type '{1}' but required in type '{2}'.";
    pub const THIS_JSX_TAGS_PROP_EXPECTS_TYPE_WHICH_REQUIRES_MULTIPLE_CHILDREN_BUT_ONLY_A_SINGLE_CHILD_WAS_PROVIDED: &str =
        "This JSX tag's '{0}' prop expects type '{1}' which requires multiple children, but only a single child was provided.";
    pub const THIS_JSX_TAGS_PROP_EXPECTS_A_SINGLE_CHILD_OF_TYPE_BUT_MULTIPLE_CHILDREN_WERE_PROVIDED:
        &str = "This JSX tag's '{0}' prop expects a single child of type '{1}', but multiple children were provided.";
    pub const CANNOT_BE_USED_AS_A_JSX_COMPONENT: &str = "'{0}' cannot be used as a JSX component.";
    pub const JSX_ELEMENT_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_NO_INTERFACE_JSX_EXISTS: &str =
        "JSX element implicitly has type 'any' because no interface 'JSX.{0}' exists.";
    pub const CANNOT_USE_JSX_UNLESS_THE_JSX_FLAG_IS_PROVIDED: &str =
        "Cannot use JSX unless the '--jsx' flag is provided.";
    pub const INVALID_FACTORY_IN_JSX_INTRINSIC_FACTORY_PRAGMA: &str =
        "Invalid factory in jsx-intrinsic-factory pragma";
    pub const INVALID_JSX_INTRINSIC_FACTORY: &str = "Invalid JSX intrinsic factory";
    pub const NO_JSX_INTRINSIC_FACTORY_DEFINED: &str = "No JSX intrinsic factory defined";
    pub const INTRINSIC_JSX_ELEMENT_DOES_NOT_EXIST_IN_FACTORY: &str =
        "Intrinsic JSX element '{0}' does not exist in factory '{1}'";
    pub const INVALID_FACTORY_IN_JSX_PRAGMA: &str = "Invalid factory in @jsx pragma";
}

macro_rules! message {
    ($name:ident, $category:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::$category,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(CANNOT_FIND_NAME, Error),
    message!(TYPE_IS_NOT_ASSIGNABLE_TO_TYPE, Error),
    message!(PROPERTY_DOES_NOT_EXIST_ON_TYPE, Error),
    message!(JSX_ELEMENT_TYPE_DOES_NOT_HAVE_ANY_CONSTRUCT_OR_CALL_SIGNATURES, Error),
    message!(JSX_ELEMENT_CLASS_DOES_NOT_SUPPORT_ATTRIBUTES_BECAUSE_IT_DOES_NOT_HAVE_A_PROPERTY, Error),
    message!(THE_GLOBAL_TYPE_JSX_MAY_NOT_HAVE_MORE_THAN_ONE_PROPERTY, Error),
    message!(ARE_SPECIFIED_TWICE_THE_ATTRIBUTE_NAMED_WILL_BE_OVERWRITTEN, Warning),
    message!(PROPERTY_IS_MISSING_IN_TYPE_BUT_REQUIRED_IN_TYPE, Error),
    message!(
        THIS_JSX_TAGS_PROP_EXPECTS_TYPE_WHICH_REQUIRES_MULTIPLE_CHILDREN_BUT_ONLY_A_SINGLE_CHILD_WAS_PROVIDED,
        Error
    ),
    message!(THIS_JSX_TAGS_PROP_EXPECTS_A_SINGLE_CHILD_OF_TYPE_BUT_MULTIPLE_CHILDREN_WERE_PROVIDED, Error),
    message!(CANNOT_BE_USED_AS_A_JSX_COMPONENT, Error),
    message!(JSX_ELEMENT_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_NO_INTERFACE_JSX_EXISTS, Error),
    message!(CANNOT_USE_JSX_UNLESS_THE_JSX_FLAG_IS_PROVIDED, Error),
    message!(INVALID_FACTORY_IN_JSX_INTRINSIC_FACTORY_PRAGMA, Error),
    message!(INVALID_JSX_INTRINSIC_FACTORY, Error),
    message!(NO_JSX_INTRINSIC_FACTORY_DEFINED, Error),
    message!(INTRINSIC_JSX_ELEMENT_DOES_NOT_EXIST_IN_FACTORY, Error),
    message!(INVALID_FACTORY_IN_JSX_PRAGMA, Error),
];
