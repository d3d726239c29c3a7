use super::ranking::TIE_EPSILON;
use crate::store::EventContext;
use crate::types::report::Finding;
use crate::types::snapshot::{EventStatus, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

const EXPECTED_WEIGHT_TOTAL: f64 = 100.0;

fn finding(id: &str, title: &str, body: String, blocking: bool, subject: &str) -> Finding {
    Finding {
        id: id.to_string(),
        title: title.to_string(),
        body,
        blocking,
        subject: Some(subject.to_string()),
    }
}

/// Data-shape checks over the snapshot and the resolved event. Nothing here
/// stops ranking; callers decide what a blocking finding means.
pub fn lint_findings(snapshot: &Snapshot, ctx: &EventContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    let active = snapshot
        .events
        .iter()
        .filter(|event| event.status == EventStatus::Active)
        .map(|event| event.id.to_string())
        .collect::<Vec<_>>();
    if active.len() > 1 {
        findings.push(finding(
            "events.multiple_active",
            "More than one active event",
            format!(
                "Only one event should be ACTIVE; found events {}.",
                active.join(", ")
            ),
            true,
            "events",
        ));
    }

    criteria_findings(ctx, &mut findings);
    score_findings(ctx, &mut findings);

    let mut numbers = BTreeMap::<u32, usize>::new();
    for contestant in &ctx.contestants {
        *numbers.entry(contestant.number).or_default() += 1;
    }
    let duplicated = numbers
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(number, _)| format!("#{number}"))
        .collect::<Vec<_>>();
    if !duplicated.is_empty() {
        findings.push(finding(
            "contestants.duplicate_number",
            "Contestant numbers are not unique",
            format!("Numbers shared by several contestants: {}.", duplicated.join(", ")),
            true,
            "contestants",
        ));
    }

    let unlocked = ctx
        .judges
        .iter()
        .filter(|judge| !judge.locked)
        .map(|judge| format!("#{} {}", judge.number, judge.name))
        .collect::<Vec<_>>();
    if !unlocked.is_empty() {
        findings.push(finding(
            "judges.unlocked",
            "Judge sheets still open",
            format!(
                "Scores from these judges can still change: {}.",
                unlocked.join(", ")
            ),
            false,
            "judges",
        ));
    }

    findings
}

fn criteria_findings(ctx: &EventContext, findings: &mut Vec<Finding>) {
    for category in ctx.criteria.categories() {
        if category.subs.is_empty() {
            findings.push(finding(
                "criteria.empty_category",
                "Category without sub-criteria",
                format!(
                    "'{}' has no sub-criteria; every contestant totals 0 in it.",
                    category.name
                ),
                false,
                "criteria",
            ));
            continue;
        }

        let total = category.total_weight();
        if (total - EXPECTED_WEIGHT_TOTAL).abs() > TIE_EPSILON {
            findings.push(finding(
                "criteria.weight_total",
                "Sub-criteria weights do not total 100",
                format!("'{}' weights total {total}.", category.name),
                false,
                "criteria",
            ));
        }

        let unweighted = category
            .subs
            .iter()
            .filter(|sub| sub.weight.is_none())
            .map(|sub| format!("'{}'", sub.name))
            .collect::<Vec<_>>();
        if !unweighted.is_empty() {
            findings.push(finding(
                "criteria.missing_weight",
                "Sub-criteria without a weight",
                format!(
                    "'{}' has sub-criteria with no weight: {}.",
                    category.name,
                    unweighted.join(", ")
                ),
                false,
                "criteria",
            ));
        }
    }

    if !ctx.criteria.orphans().is_empty() {
        let orphans = ctx
            .criteria
            .orphans()
            .iter()
            .map(|sub| format!("{} '{}'", sub.id, sub.name))
            .collect::<Vec<_>>();
        findings.push(finding(
            "criteria.orphan_sub",
            "Sub-criteria without a category",
            format!(
                "Parents are missing or are sub-criteria themselves; these never count: {}.",
                orphans.join(", ")
            ),
            true,
            "criteria",
        ));
    }

    let mut identifiers = BTreeMap::<&str, usize>::new();
    for identifier in ctx
        .criteria
        .categories()
        .iter()
        .filter_map(|category| category.identifier.as_deref())
    {
        *identifiers.entry(identifier).or_default() += 1;
    }
    let shared = identifiers
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(identifier, _)| format!("'{identifier}'"))
        .collect::<Vec<_>>();
    if !shared.is_empty() {
        findings.push(finding(
            "criteria.duplicate_identifier",
            "Category identifiers are not unique",
            format!(
                "Lookups resolve to the lowest id for: {}.",
                shared.join(", ")
            ),
            true,
            "criteria",
        ));
    }
}

fn score_findings(ctx: &EventContext, findings: &mut Vec<Finding>) {
    let contestants = ctx.contestant_ids().into_iter().collect::<BTreeSet<_>>();
    let judges = ctx.judge_ids().into_iter().collect::<BTreeSet<_>>();

    let mut on_category = 0;
    let mut unknown = 0;
    let mut over_weight = Vec::new();
    let mut keys = BTreeMap::new();
    for row in &ctx.scores {
        *keys
            .entry((row.contestant_id, row.judge_id, row.criteria_id))
            .or_insert(0usize) += 1;

        let orphan = ctx
            .criteria
            .orphans()
            .iter()
            .any(|sub| sub.id == row.criteria_id);
        let sub = ctx.criteria.sub(row.criteria_id);
        let is_category = ctx.criteria.category(row.criteria_id).is_some();

        if !contestants.contains(&row.contestant_id)
            || !judges.contains(&row.judge_id)
            || (sub.is_none() && !is_category && !orphan)
        {
            unknown += 1;
        }
        if is_category {
            on_category += 1;
        }
        if let Some(weight) = sub.and_then(|sub| sub.weight) {
            if row.value > weight + TIE_EPSILON {
                over_weight.push(format!(
                    "contestant {} judge {} criterion {} ({} > {})",
                    row.contestant_id, row.judge_id, row.criteria_id, row.value, weight
                ));
            }
        }
    }

    if on_category > 0 {
        findings.push(finding(
            "scores.on_category",
            "Scores recorded on main criteria",
            format!(
                "{on_category} row(s) target a category directly; they count toward the category winner only and are left out of ranked totals."
            ),
            false,
            "scores",
        ));
    }
    if !over_weight.is_empty() {
        findings.push(finding(
            "scores.exceeds_weight",
            "Scores above their weight",
            format!("Values exceed the sub-criterion cap: {}.", over_weight.join("; ")),
            false,
            "scores",
        ));
    }
    let duplicates = keys.values().filter(|count| **count > 1).count();
    if duplicates > 0 {
        findings.push(finding(
            "scores.duplicate_key",
            "Duplicate score rows",
            format!("{duplicates} key(s) have more than one row; the last row is used."),
            false,
            "scores",
        ));
    }
    if unknown > 0 {
        findings.push(finding(
            "scores.unknown_reference",
            "Scores reference unknown records",
            format!(
                "{unknown} row(s) name a contestant, judge or criterion outside event {}.",
                ctx.event.id
            ),
            true,
            "scores",
        ));
    }
}
