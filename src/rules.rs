//! Ordered decision tables.
//!
//! Every tiered classification in the pipeline (domain trust, emotional tone,
//! sensationalism, evidence quality, recency, fact-check verdict, status) is a
//! slice of `Rule { name, when, then }` evaluated top to bottom. The first rule
//! whose `when` predicate holds wins; adding a row never reorders existing ones.

/// One row of a decision table.
#[derive(Debug, Clone, Copy)]
pub struct Rule<I: ?Sized, O> {
    pub name: &'static str,
    pub when: fn(&I) -> bool,
    pub then: O,
}

/// Evaluate `table` in order and return the first matching row.
pub fn first_match<'t, I: ?Sized, O>(table: &'t [Rule<I, O>], input: &I) -> Option<&'t Rule<I, O>> {
    table.iter().find(|rule| (rule.when)(input))
}

/// Always-true predicate for catch-all rows at the bottom of a table.
pub fn otherwise<I: ?Sized>(_: &I) -> bool {
    true
}
