use super::context::EventContext;
use crate::error::{Result, TallyError};
use crate::types::scoring::{ContestantId, CriterionId, JudgeId, Score};
use crate::types::snapshot::{ScoreEntry, ScoreRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// A judge's batch, checked against the event and ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub judge_id: JudgeId,
    pub judge_number: u32,
    pub scores: Vec<ScoreRecord>,
    pub auto_assigned: usize,
}

pub fn prepare_submission(
    ctx: &EventContext,
    judge_number: u32,
    entries: &[ScoreEntry],
) -> Result<Submission> {
    let judge = ctx
        .judge_by_number(judge_number)
        .ok_or(TallyError::JudgeNotFound(judge_number))?;
    if judge.locked {
        return Err(TallyError::JudgeLocked(judge_number));
    }

    let mut values = BTreeMap::<(ContestantId, CriterionId), Score>::new();
    for entry in entries {
        validate_entry(ctx, entry)?;
        values.insert((entry.contestant_id, entry.sub_criteria_id), entry.value);
    }

    let mut auto_assigned = 0;
    for sub in ctx
        .criteria
        .categories()
        .iter()
        .flat_map(|category| category.subs.iter())
        .filter(|sub| sub.auto_assign)
    {
        let Some(weight) = sub.weight else {
            continue;
        };
        for contestant in &ctx.contestants {
            values.entry((contestant.id, sub.id)).or_insert_with(|| {
                auto_assigned += 1;
                weight
            });
        }
    }

    let scores = values
        .into_iter()
        .map(|((contestant_id, criteria_id), value)| ScoreRecord {
            contestant_id,
            judge_id: judge.id,
            criteria_id,
            event_id: ctx.event.id,
            value,
        })
        .collect::<Vec<_>>();

    debug!(
        judge_number,
        scores = scores.len(),
        auto_assigned,
        "prepared submission"
    );

    Ok(Submission {
        judge_id: judge.id,
        judge_number,
        scores,
        auto_assigned,
    })
}

fn validate_entry(ctx: &EventContext, entry: &ScoreEntry) -> Result<()> {
    if ctx.contestant(entry.contestant_id).is_none() {
        return Err(TallyError::InvalidScore(format!(
            "contestant {} is not part of event {}",
            entry.contestant_id, ctx.event.id
        )));
    }

    let Some(sub) = ctx.criteria.sub(entry.sub_criteria_id) else {
        let reason = if ctx.criteria.category(entry.sub_criteria_id).is_some() {
            "is a main criterion; score its sub-criteria instead"
        } else {
            "is not a sub-criterion of this event"
        };
        return Err(TallyError::InvalidScore(format!(
            "criterion {} {reason}",
            entry.sub_criteria_id
        )));
    };

    if !entry.value.is_finite() || entry.value < 0.0 {
        return Err(TallyError::InvalidScore(format!(
            "value {} for '{}' must be a non-negative number",
            entry.value, sub.name
        )));
    }
    if let Some(weight) = sub.weight {
        if entry.value > weight {
            return Err(TallyError::InvalidScore(format!(
                "value {} for '{}' exceeds its weight of {}",
                entry.value, sub.name, weight
            )));
        }
    }

    Ok(())
}
