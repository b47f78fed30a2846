//! Grouping by calendar month
//!
//! The one grouping primitive behind the statement views: records go into a
//! year → month bucket holding the bucket total and the records themselves in
//! input order. Months are zero-based (January is 0).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::{Money, Transaction};

/// A record that carries a date and an amount
pub trait Dated {
    /// Calendar date, or `None` if the record has no usable date
    fn record_date(&self) -> Option<NaiveDate>;

    fn record_amount(&self) -> Money;
}

impl Dated for Transaction {
    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn record_amount(&self) -> Money {
        self.amount
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn record_date(&self) -> Option<NaiveDate> {
        (**self).record_date()
    }

    fn record_amount(&self) -> Money {
        (**self).record_amount()
    }
}

/// One month's records and their total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket<T> {
    /// Sum of the amounts of `items`
    pub total: Money,
    /// Records dated in this month, in input order
    pub items: Vec<T>,
}

impl<T> Default for MonthBucket<T> {
    fn default() -> Self {
        Self {
            total: Money::zero(),
            items: Vec::new(),
        }
    }
}

/// Records grouped by year, then by zero-based month
///
/// Keys iterate in ascending order; `newest_first` walks them backwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearMonthGroup<T> {
    years: BTreeMap<i32, BTreeMap<u32, MonthBucket<T>>>,
    #[serde(skip)]
    skipped: Vec<usize>,
}

impl<T> Default for YearMonthGroup<T> {
    fn default() -> Self {
        Self {
            years: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> YearMonthGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, date: NaiveDate, amount: Money, item: T) {
        let bucket = self
            .years
            .entry(date.year())
            .or_default()
            .entry(date.month0())
            .or_default();
        bucket.total = bucket.total.saturating_add(amount);
        bucket.items.push(item);
    }

    /// The year → month → bucket mapping
    pub fn years(&self) -> &BTreeMap<i32, BTreeMap<u32, MonthBucket<T>>> {
        &self.years
    }

    /// Bucket for a year and zero-based month
    pub fn get(&self, year: i32, month0: u32) -> Option<&MonthBucket<T>> {
        self.years.get(&year)?.get(&month0)
    }

    /// Input positions of records that had no usable date
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }

    /// Number of grouped records
    pub fn len(&self) -> usize {
        self.buckets().map(|(_, _, b)| b.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Sum of every bucket total
    pub fn grand_total(&self) -> Money {
        self.buckets()
            .fold(Money::zero(), |acc, (_, _, b)| acc.saturating_add(b.total))
    }

    /// Buckets oldest first as `(year, month0, bucket)`
    pub fn buckets(&self) -> impl Iterator<Item = (i32, u32, &MonthBucket<T>)> {
        self.years.iter().flat_map(|(year, months)| {
            months
                .iter()
                .map(move |(month0, bucket)| (*year, *month0, bucket))
        })
    }

    /// Buckets newest first as `(year, month0, bucket)`
    pub fn newest_first(&self) -> impl Iterator<Item = (i32, u32, &MonthBucket<T>)> {
        self.years.iter().rev().flat_map(|(year, months)| {
            months
                .iter()
                .rev()
                .map(move |(month0, bucket)| (*year, *month0, bucket))
        })
    }
}

/// Group records by year and month using accessor closures
///
/// A record whose `date_of` returns `None` is left out, logged, and its
/// position recorded in `skipped()`.
pub fn group_by_year_month_with<'a, T, I, D, A>(
    items: I,
    date_of: D,
    amount_of: A,
) -> YearMonthGroup<&'a T>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    D: Fn(&T) -> Option<NaiveDate>,
    A: Fn(&T) -> Money,
{
    let mut group = YearMonthGroup::new();

    for (index, item) in items.into_iter().enumerate() {
        match date_of(item) {
            Some(date) => group.insert(date, amount_of(item), item),
            None => {
                warn!(index, "record has no usable date; left out of grouping");
                group.skipped.push(index);
            }
        }
    }

    group
}

/// Group `Dated` records by year and month
pub fn group_by_year_month<'a, T, I>(items: I) -> YearMonthGroup<&'a T>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    group_by_year_month_with(items, T::record_date, T::record_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parse_record_date;
    use crate::models::TransactionId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(id: i64, cents: i64, on: NaiveDate) -> Transaction {
        Transaction::income(TransactionId::new(id), on, Money::from_cents(cents))
    }

    struct RawRow {
        when: &'static str,
        value: i64,
    }

    #[test]
    fn test_groups_by_year_and_month() {
        let txns = vec![
            income(1, 10000, date(2024, 1, 5)),
            income(2, 5000, date(2024, 1, 20)),
            income(3, 3000, date(2024, 2, 1)),
        ];

        let group = group_by_year_month(&txns);

        let january = group.get(2024, 0).unwrap();
        assert_eq!(january.total, Money::from_cents(15000));
        assert_eq!(
            january.items.iter().map(|t| t.id.get()).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let february = group.get(2024, 1).unwrap();
        assert_eq!(february.total, Money::from_cents(3000));
        assert_eq!(february.items.len(), 1);

        assert_eq!(group.years().len(), 1);
        assert_eq!(group.years()[&2024].len(), 2);
    }

    #[test]
    fn test_empty_input_is_empty_mapping() {
        let txns: Vec<Transaction> = Vec::new();
        let group = group_by_year_month(&txns);

        assert!(group.is_empty());
        assert_eq!(group.len(), 0);
        assert_eq!(group.grand_total(), Money::zero());
        assert!(group.skipped().is_empty());
    }

    #[test]
    fn test_totals_match_input_sum() {
        let txns: Vec<_> = (0..40)
            .map(|i| {
                income(
                    i,
                    (i * 137 % 9000) + 1,
                    date(2022 + (i % 3) as i32, (i % 12) as u32 + 1, (i % 28) as u32 + 1),
                )
            })
            .collect();
        let input_sum: Money = txns.iter().map(|t| t.amount).sum();

        let group = group_by_year_month(&txns);

        assert_eq!(group.grand_total(), input_sum);
        assert_eq!(group.len(), txns.len());
        for (year, month0, bucket) in group.buckets() {
            let items_sum: Money = bucket.items.iter().map(|t| t.amount).sum();
            assert_eq!(bucket.total, items_sum);
            for txn in &bucket.items {
                assert_eq!(txn.date.year(), year);
                assert_eq!(txn.date.month0(), month0);
            }
        }
    }

    #[test]
    fn test_preserves_relative_order() {
        let txns = vec![
            income(3, 100, date(2024, 5, 30)),
            income(1, 100, date(2024, 5, 2)),
            income(2, 100, date(2024, 5, 15)),
        ];
        let group = group_by_year_month(&txns);
        let ids: Vec<_> = group.get(2024, 4).unwrap().items.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_newest_first_order() {
        let txns = vec![
            income(1, 100, date(2023, 12, 1)),
            income(2, 100, date(2024, 2, 1)),
            income(3, 100, date(2024, 1, 1)),
        ];
        let group = group_by_year_month(&txns);

        let keys: Vec<_> = group.newest_first().map(|(y, m, _)| (y, m)).collect();
        assert_eq!(keys, vec![(2024, 1), (2024, 0), (2023, 11)]);

        let keys: Vec<_> = group.buckets().map(|(y, m, _)| (y, m)).collect();
        assert_eq!(keys, vec![(2023, 11), (2024, 0), (2024, 1)]);
    }

    #[test]
    fn test_unparseable_dates_are_skipped() {
        let rows = vec![
            RawRow { when: "2024-03-10", value: 700 },
            RawRow { when: "sometime", value: 900 },
            RawRow { when: "2024-03-11T10:00:00Z", value: 300 },
        ];

        let group = group_by_year_month_with(
            &rows,
            |r: &RawRow| parse_record_date(r.when),
            |r: &RawRow| Money::from_cents(r.value),
        );

        assert_eq!(group.skipped(), &[1]);
        assert_eq!(group.len(), 2);
        assert_eq!(group.get(2024, 2).unwrap().total, Money::from_cents(1000));
    }

    #[test]
    fn test_huge_totals_saturate() {
        let huge = i64::MAX / 2 + 1;
        let txns = vec![
            income(1, huge, date(2024, 1, 1)),
            income(2, huge, date(2024, 1, 2)),
            income(3, huge, date(2024, 2, 1)),
        ];

        let group = group_by_year_month(&txns);
        assert_eq!(group.get(2024, 0).unwrap().total.cents(), i64::MAX);
        assert_eq!(group.get(2024, 0).unwrap().items.len(), 2);
        assert_eq!(group.grand_total().cents(), i64::MAX);
    }

    #[test]
    fn test_idempotent() {
        let txns = vec![income(1, 100, date(2024, 1, 1)), income(2, 250, date(2024, 6, 9))];
        assert_eq!(group_by_year_month(&txns), group_by_year_month(&txns));
    }
}
