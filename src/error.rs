//! Errors raised while validating user input, before any cluster call is made.

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unexpected verb \"{verb}\", valid verbs are: {valid}")]
    InvalidVerb { verb: String, valid: String },

    #[error("no verbs given, valid verbs are: {valid}")]
    NoVerbs { valid: String },

    #[error("unexpected output format \"{format}\", valid formats are: {valid}")]
    InvalidOutputFormat { format: String, valid: String },
}
