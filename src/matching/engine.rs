use serde::Serialize;
use tracing::{debug, info};

use crate::core::form_set::FormSequence;
use crate::core::lexicon::{check_singletons, Lexicon};
use crate::core::types::{MatchList, Other, OverlapKind, Pila};
use crate::matching::assignment::{self, Assignment};
use crate::matching::enrichment::{self, Decliner, EnrichmentReport};
use crate::matching::error::OverlapError;
use crate::matching::metrics::OverlapResult;
use crate::matching::residual;
use crate::matching::scoring::ScoreMatrix;
use crate::utils::validation::MAX_ITEMS;

/// Stages of one overlap computation, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    DirectMatch,
    Reduce,
    Enrich,
    IndirectMatch,
    Aggregate,
}

impl Phase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DirectMatch => "direct matching",
            Self::Reduce => "residual reduction",
            Self::Enrich => "enrichment",
            Self::IndirectMatch => "indirect matching",
            Self::Aggregate => "aggregation",
        }
    }
}

/// Configuration for the overlap engine
#[derive(Debug, Clone)]
pub struct OverlapConfig {
    /// Ask the decliner for inflected PILA forms before indirect matching
    pub decline_pila: bool,
    /// Largest accepted side. Matrix memory is quadratic and solver time cubic in it
    pub max_items: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            decline_pila: true,
            max_items: MAX_ITEMS,
        }
    }
}

/// Everything one computation produces
#[derive(Debug, Clone)]
pub struct OverlapOutcome {
    pub result: OverlapResult,
    pub direct_matches: MatchList,
    pub indirect_matches: MatchList,
    pub pila_enrichment: EnrichmentReport,
    pub other_enrichment: EnrichmentReport,
}

/// A match resolved to the caller's record identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMatch {
    pub kind: OverlapKind,
    pub pila_id: String,
    pub other_id: String,
}

/// Two-phase overlap engine.
///
/// Direct matching pairs items by exact variant overlap. The matched items are
/// then emptied, the survivors enriched with macron-stripped and declined
/// variants, and a second matching recovers indirect correspondences.
pub struct OverlapEngine<'a> {
    decliner: &'a dyn Decliner,
    config: OverlapConfig,
}

impl<'a> OverlapEngine<'a> {
    /// Create an engine with default configuration
    pub fn new(decliner: &'a dyn Decliner) -> Self {
        Self {
            decliner,
            config: OverlapConfig::default(),
        }
    }

    /// Create an engine with custom configuration
    pub fn with_config(decliner: &'a dyn Decliner, config: OverlapConfig) -> Self {
        Self { decliner, config }
    }

    /// Measure the overlap between two sequences.
    ///
    /// The inputs are borrowed and left untouched; every phase works on its own copy.
    ///
    /// # Errors
    ///
    /// Returns `OverlapError::TooManyItems` if a side exceeds the configured
    /// limit, `OverlapError::InputContract` if an item holds more than one
    /// form, `OverlapError::InvariantViolation` if the phases desynchronize,
    /// or `OverlapError::Decliner` if the decliner fails unrecoverably.
    pub fn compute_overlap(
        &self,
        pila: &FormSequence<Pila>,
        other: &FormSequence<Other>,
    ) -> Result<OverlapOutcome, OverlapError> {
        self.check_size("pila", pila.len())?;
        self.check_size("other", other.len())?;
        check_singletons(pila)?;
        check_singletons(other)?;

        info!(
            pila = pila.len(),
            other = other.len(),
            "Computing dataset overlap"
        );

        let direct = run_matching(Phase::DirectMatch, pila, other)?;
        debug!(matches = direct.best_score, "Direct matching done");

        let (mut pila_left, mut other_left) = residual::remove_matched(pila, other, &direct.matches);
        ensure(
            Phase::Reduce,
            pila_left.len() == pila.len() && other_left.len() == other.len(),
            || "residual sequences changed length".to_string(),
        )?;
        ensure(
            Phase::Reduce,
            pila_left.non_empty_count() + direct.best_score == pila.non_empty_count(),
            || "matched PILA items were not all emptied".to_string(),
        )?;

        let pila_enrichment = if self.config.decline_pila {
            enrichment::enrich_pila(&mut pila_left, self.decliner)?
        } else {
            enrichment::add_stripped_forms(&mut pila_left)?
        };
        let other_enrichment = enrichment::enrich_other(&mut other_left)?;
        debug!(
            declined = pila_enrichment.declined,
            skipped = pila_enrichment.skipped,
            added = pila_enrichment.variants_added + other_enrichment.variants_added,
            "Enrichment done"
        );

        let indirect = run_matching(Phase::IndirectMatch, &pila_left, &other_left)?;
        debug!(matches = indirect.best_score, "Indirect matching done");

        let result = OverlapResult::aggregate(
            pila.len(),
            other.len(),
            direct.best_score,
            indirect.best_score,
        );
        check_aggregate(&result, &direct.matches, &indirect.matches)?;

        info!(
            direct = result.direct_overlap,
            indirect = result.indirect_overlap,
            total = result.total_overlap,
            "Overlap computed"
        );

        Ok(OverlapOutcome {
            result,
            direct_matches: direct.matches,
            indirect_matches: indirect.matches,
            pila_enrichment,
            other_enrichment,
        })
    }

    /// Measure the overlap between two lexicons and resolve matches to their ids.
    ///
    /// # Errors
    ///
    /// Same as [`compute_overlap`](Self::compute_overlap).
    pub fn compare(
        &self,
        pila: &Lexicon<Pila>,
        other: &Lexicon<Other>,
    ) -> Result<(OverlapOutcome, Vec<ResolvedMatch>), OverlapError> {
        let outcome = self.compute_overlap(pila.forms(), other.forms())?;

        let phases = [
            (OverlapKind::Direct, &outcome.direct_matches),
            (OverlapKind::Indirect, &outcome.indirect_matches),
        ];

        let mut resolved = Vec::with_capacity(outcome.result.total_overlap);
        for (kind, matches) in phases {
            for m in matches {
                let (Some(pila_id), Some(other_id)) = (pila.id(m.pila), other.id(m.other)) else {
                    return Err(OverlapError::invariant(
                        Phase::Aggregate.name(),
                        format!("match {m:?} points outside the lexicons"),
                    ));
                };
                resolved.push(ResolvedMatch {
                    kind,
                    pila_id: pila_id.to_string(),
                    other_id: other_id.to_string(),
                });
            }
        }

        Ok((outcome, resolved))
    }

    fn check_size(&self, side: &'static str, count: usize) -> Result<(), OverlapError> {
        if count > self.config.max_items {
            return Err(OverlapError::TooManyItems {
                side,
                count,
                max: self.config.max_items,
            });
        }
        Ok(())
    }
}

fn run_matching(
    phase: Phase,
    pila: &FormSequence<Pila>,
    other: &FormSequence<Other>,
) -> Result<Assignment, OverlapError> {
    let matrix = ScoreMatrix::build(pila, other);
    let assignment = assignment::solve(&matrix);

    ensure(phase, assignment.best_score == assignment.matches.len(), || {
        format!(
            "best score {} disagrees with {} matches",
            assignment.best_score,
            assignment.matches.len()
        )
    })?;
    ensure(
        phase,
        assignment.best_score <= pila.len().min(other.len()),
        || format!("{} matches exceed the smaller side", assignment.best_score),
    )?;
    for m in &assignment.matches {
        let overlapping = match (pila.get(m.pila), other.get(m.other)) {
            (Some(p), Some(o)) => p.intersects(o),
            _ => false,
        };
        ensure(phase, overlapping, || {
            format!("match {m:?} has no shared variant")
        })?;
    }

    Ok(assignment)
}

fn check_aggregate(
    result: &OverlapResult,
    direct: &MatchList,
    indirect: &MatchList,
) -> Result<(), OverlapError> {
    ensure(
        Phase::Aggregate,
        direct.len() == result.direct_overlap,
        || format!("{} direct matches, {} reported", direct.len(), result.direct_overlap),
    )?;
    ensure(
        Phase::Aggregate,
        indirect.len() == result.indirect_overlap,
        || {
            format!(
                "{} indirect matches, {} reported",
                indirect.len(),
                result.indirect_overlap
            )
        },
    )?;
    ensure(
        Phase::Aggregate,
        result.total_overlap == result.direct_overlap + result.indirect_overlap
            && direct.len() + indirect.len() == result.total_overlap,
        || "total overlap is not the sum of both phases".to_string(),
    )
}

fn ensure(
    phase: Phase,
    holds: bool,
    detail: impl FnOnce() -> String,
) -> Result<(), OverlapError> {
    if holds {
        Ok(())
    } else {
        Err(OverlapError::invariant(phase.name(), detail()))
    }
}
