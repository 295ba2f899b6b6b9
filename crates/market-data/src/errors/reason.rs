use serde::{Deserialize, Serialize};

/// Classification of a resolution failure.
///
/// Every error held in a result's failure maps classifies into exactly one
/// reason, so callers can branch on failure category without matching the
/// full error enum.
///
/// # Behavior Summary
///
/// | Reason | Produced when |
/// |--------|---------------|
/// | `MissingBuilder` | A derived identifier's kind has no registered builder |
/// | `MissingMapping` | The original key never mapped to a real identifier |
/// | `NoMatchingRule` | The upstream rule set had no rule for the request |
/// | `MissingData` | A source had no value or no series for the identifier |
/// | `MissingDependency` | A prerequisite of a derived identifier failed |
/// | `Unresolved` | Assembly stopped making progress with work remaining |
/// | `SourceFailure` | A builder or source failed outside its error channel |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    /// No builder is registered for the identifier's kind.
    /// The identifier can never resolve with this engine configuration.
    MissingBuilder,

    /// The identifier is the missing-mapping sentinel: upstream could not
    /// map the original key to an identifier.
    MissingMapping,

    /// The identifier is the no-rule sentinel, or its feed is the no-rule
    /// feed: upstream found no market data rule for the calculation.
    NoMatchingRule,

    /// A source was asked and had nothing for this identifier.
    MissingData,

    /// The identifier's builder could not run because a prerequisite
    /// failed. The error names the first failed prerequisite.
    MissingDependency,

    /// The identifier was still pending when a round completed without
    /// resolving or failing anything, typically a dependency cycle.
    Unresolved,

    /// A builder or source panicked or otherwise failed out of band. The
    /// fault is confined to this identifier.
    SourceFailure,
}
