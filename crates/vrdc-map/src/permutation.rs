//! Enumeration of single-field-per-level extraction plans.
//!
//! For each present level the claim and line alternatives are pooled into
//! one list; the plans are the Cartesian product of those lists in canonical
//! level order, last level varying fastest. Absent levels are left out of
//! the product entirely, so they never appear as a key and never zero the
//! count. A setting with no present levels has exactly one plan, the empty
//! record.

use tracing::debug;

use vrdc_catalog::SettingCatalog;
use vrdc_model::{FieldDefinition, IdentifierLevel, PermutationRecord, SettingDefinition};

use crate::error::Result;
use crate::resolver::FieldResolver;

/// Lazy lexicographic product over the pooled alternatives of a setting.
#[derive(Debug, Clone)]
pub struct Permutations<'a> {
    lists: Vec<Vec<&'a FieldDefinition>>,
    indices: Vec<usize>,
    remaining: usize,
}

impl<'a> Permutations<'a> {
    pub fn new(definition: &'a SettingDefinition) -> Self {
        let lists: Vec<Vec<&'a FieldDefinition>> = IdentifierLevel::ALL
            .into_iter()
            .map(|level| definition.alternatives(level))
            .filter(|alternatives| !alternatives.is_empty())
            .collect();
        let remaining = lists.iter().map(Vec::len).product();
        Self {
            indices: vec![0; lists.len()],
            lists,
            remaining,
        }
    }

    fn advance(&mut self) {
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.lists[position].len() {
                return;
            }
            self.indices[position] = 0;
        }
    }
}

impl Iterator for Permutations<'_> {
    type Item = PermutationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let record: PermutationRecord = self
            .lists
            .iter()
            .zip(&self.indices)
            .map(|(alternatives, &index)| alternatives[index].clone())
            .collect();
        self.remaining -= 1;
        self.advance();
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Permutations<'_> {}

/// Product of pooled alternative counts over present levels.
pub fn permutation_count(definition: &SettingDefinition) -> usize {
    IdentifierLevel::ALL
        .into_iter()
        .map(|level| definition.alternatives(level).len())
        .filter(|count| *count > 0)
        .product()
}

#[derive(Debug, Clone, Copy)]
pub struct PermutationEngine<'a> {
    resolver: FieldResolver<'a>,
}

impl<'a> PermutationEngine<'a> {
    pub fn new(catalog: &'a SettingCatalog) -> Self {
        Self {
            resolver: FieldResolver::new(catalog),
        }
    }

    pub fn iter(&self, setting: &str) -> Result<Permutations<'a>> {
        Ok(Permutations::new(self.resolver.definition(setting)?))
    }

    pub fn enumerate(&self, setting: &str) -> Result<Vec<PermutationRecord>> {
        let records: Vec<PermutationRecord> = self.iter(setting)?.collect();
        debug!(setting, permutations = records.len(), "enumerated permutations");
        Ok(records)
    }

    pub fn count(&self, setting: &str) -> Result<usize> {
        Ok(permutation_count(self.resolver.definition(setting)?))
    }
}

#[cfg(test)]
mod tests {
    use vrdc_model::{AliasRule, BenefitSetting, TableRole};

    use super::*;

    fn field(level: IdentifierLevel, table: TableRole, column: &str) -> FieldDefinition {
        FieldDefinition::new(level, table, column, AliasRule::Source)
    }

    #[test]
    fn last_level_varies_fastest() {
        let definition = SettingDefinition::new(
            BenefitSetting::Dme,
            vec![
                field(IdentifierLevel::OrgNpi, TableRole::Claim, "O1"),
                field(IdentifierLevel::OrgNpi, TableRole::Line, "O2"),
                field(IdentifierLevel::PersonalNpi, TableRole::Claim, "P1"),
                field(IdentifierLevel::PersonalNpi, TableRole::Claim, "P2"),
            ],
        );
        let order: Vec<(String, String)> = Permutations::new(&definition)
            .map(|record| {
                (
                    record.get(IdentifierLevel::OrgNpi).unwrap().source_column.clone(),
                    record
                        .get(IdentifierLevel::PersonalNpi)
                        .unwrap()
                        .source_column
                        .clone(),
                )
            })
            .collect();
        let expected: Vec<(String, String)> = [("O1", "P1"), ("O1", "P2"), ("O2", "P1"), ("O2", "P2")]
            .into_iter()
            .map(|(o, p)| (o.to_string(), p.to_string()))
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn no_present_levels_yields_one_empty_record() {
        let definition = SettingDefinition::new(BenefitSetting::Snf, Vec::new());
        let records: Vec<PermutationRecord> = Permutations::new(&definition).collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_empty());
        assert_eq!(permutation_count(&definition), 1);
    }

    #[test]
    fn size_hint_counts_down() {
        let definition = SettingDefinition::new(
            BenefitSetting::Dme,
            vec![
                field(IdentifierLevel::TaxId, TableRole::Claim, "T1"),
                field(IdentifierLevel::TaxId, TableRole::Claim, "T2"),
            ],
        );
        let mut permutations = Permutations::new(&definition);
        assert_eq!(permutations.len(), 2);
        permutations.next();
        assert_eq!(permutations.len(), 1);
        permutations.next();
        assert_eq!(permutations.len(), 0);
        assert!(permutations.next().is_none());
    }
}
