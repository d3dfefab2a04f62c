//! Client-side filtering of listings.
//!
//! A filter string is a comma-separated list of `attribute<op>value`
//! clauses. Each clause becomes a [`Predicate`]; predicates are applied in
//! order and every one must hold for a record to be kept.
//!
//! | Attribute | Operators | Value |
//! |-----------|-----------|-------|
//! | `id`, `replacementid` | `=` | any |
//! | `ip` | `=` | dotted quad |
//! | `name`, `replacementname`, `type` | `~` `!` `%` | any |
//! | `publishedon`, `deprecatedon`, `deletedon` | `<` `=` `>` | digits |

mod parser;
pub(crate) mod predicate;

pub use parser::{parse_filter, parse_phrase};
pub use predicate::{apply, Operator, Predicate};
