use crate::types::scoring::{total, CriterionId, Score};
use crate::types::snapshot::CriterionRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Category(Category),
    Sub(SubCriterion),
}

impl From<&CriterionRecord> for Criterion {
    fn from(record: &CriterionRecord) -> Self {
        match record.parent_id {
            None => Criterion::Category(Category {
                id: record.id,
                name: record.name.clone(),
                identifier: record.identifier.clone(),
                subs: Vec::new(),
            }),
            Some(parent_id) => Criterion::Sub(SubCriterion {
                id: record.id,
                parent_id,
                name: record.name.clone(),
                weight: record.weight,
                auto_assign: record.auto_assign,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CriterionId,
    pub name: String,
    pub identifier: Option<String>,
    pub subs: Vec<SubCriterion>,
}

impl Category {
    pub fn sub_ids(&self) -> impl Iterator<Item = CriterionId> + '_ {
        self.subs.iter().map(|sub| sub.id)
    }

    /// Missing weights count as 0; nothing checks that the total is 100.
    pub fn total_weight(&self) -> Score {
        total(self.subs.iter().filter_map(|sub| sub.weight))
    }

    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            name: self.name.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub id: CriterionId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubCriterion {
    pub id: CriterionId,
    pub parent_id: CriterionId,
    pub name: String,
    pub weight: Option<Score>,
    pub auto_assign: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaTree {
    categories: Vec<Category>,
    orphans: Vec<SubCriterion>,
}

impl CriteriaTree {
    /// Builds the tree from one event's flat criteria list. Categories and
    /// their subs come out in ascending id order.
    pub fn build(records: &[CriterionRecord]) -> Self {
        let mut sorted = records.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|record| record.id);

        let mut categories = Vec::new();
        let mut subs = Vec::new();
        for record in sorted {
            match Criterion::from(record) {
                Criterion::Category(category) => categories.push(category),
                Criterion::Sub(sub) => subs.push(sub),
            }
        }

        let mut orphans = Vec::new();
        for sub in subs {
            match categories
                .iter_mut()
                .find(|category| category.id == sub.parent_id)
            {
                Some(category) => category.subs.push(sub),
                None => orphans.push(sub),
            }
        }

        Self {
            categories,
            orphans,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Sub-criteria whose parent is missing or is itself a sub-criterion.
    pub fn orphans(&self) -> &[SubCriterion] {
        &self.orphans
    }

    pub fn find(&self, identifier: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.identifier.as_deref() == Some(identifier))
    }

    pub fn category(&self, id: CriterionId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn sub(&self, id: CriterionId) -> Option<&SubCriterion> {
        self.categories
            .iter()
            .flat_map(|category| category.subs.iter())
            .find(|sub| sub.id == id)
    }

    pub fn sub_ids(&self) -> impl Iterator<Item = CriterionId> + '_ {
        self.categories.iter().flat_map(Category::sub_ids)
    }
}
