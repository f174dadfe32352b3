use std::collections::BTreeMap;
use std::fmt;

use crate::csv_reader::Record;

/// Fixed age buckets assigned from the boundaries 0-18, 19-30, 31-45,
/// 46-60 and 61-100. Ages above 100 fall outside every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeBucket {
    Child,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Child,
        AgeBucket::YoungAdult,
        AgeBucket::Adult,
        AgeBucket::MiddleAged,
        AgeBucket::Senior,
    ];

    pub fn from_age(age: u8) -> Option<AgeBucket> {
        match age {
            0..=18 => Some(AgeBucket::Child),
            19..=30 => Some(AgeBucket::YoungAdult),
            31..=45 => Some(AgeBucket::Adult),
            46..=60 => Some(AgeBucket::MiddleAged),
            61..=100 => Some(AgeBucket::Senior),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::Child => "0-18",
            AgeBucket::YoungAdult => "19-30",
            AgeBucket::Adult => "31-45",
            AgeBucket::MiddleAged => "46-60",
            AgeBucket::Senior => "61+",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Bucket×gender count table. Rows follow bucket order, columns follow
/// `genders`; combinations absent from the data are filled with zero.
pub struct Crosstab {
    pub genders: Vec<String>,
    pub rows: Vec<(AgeBucket, Vec<u64>)>,
}

/// The loaded record table plus the one derived column. The age bucket of
/// every row is computed once here and reused by every consumer.
pub struct Dataset {
    records: Vec<Record>,
    age_buckets: Vec<Option<AgeBucket>>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Dataset {
        let age_buckets = records.iter().map(|r| AgeBucket::from_age(r.age)).collect();
        Dataset {
            records,
            age_buckets,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of people per gender, most frequent first.
    pub fn gender_counts(&self) -> Vec<(String, u64)> {
        value_counts(self.records.iter().map(|r| r.gender.as_str()))
    }

    /// Number of people per employment status, most frequent first.
    pub fn employment_counts(&self) -> Vec<(String, u64)> {
        value_counts(self.records.iter().map(|r| r.employment_status.as_str()))
    }

    /// Number of people per generation, most frequent first.
    pub fn generation_counts(&self) -> Vec<(String, u64)> {
        value_counts(self.records.iter().map(|r| r.generation.as_str()))
    }

    /// Mean years of education per gender, in gender order.
    pub fn mean_education_by_gender(&self) -> Vec<(String, f64)> {
        let mut sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
        for record in &self.records {
            let entry = sums.entry(record.gender.as_str()).or_insert((0.0, 0));
            entry.0 += record.years_of_education;
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(gender, (sum, n))| (gender.to_string(), sum / n as f64))
            .collect()
    }

    /// Number of people per age bucket, in bucket order. Every bucket is
    /// present, zero-filled; rows with an out-of-range age are skipped.
    pub fn age_distribution(&self) -> Vec<(AgeBucket, u64)> {
        if self.records.is_empty() {
            return Vec::new();
        }
        let mut counts: BTreeMap<AgeBucket, u64> = BTreeMap::new();
        for bucket in self.age_buckets.iter().flatten() {
            *counts.entry(*bucket).or_insert(0) += 1;
        }
        AgeBucket::ALL
            .iter()
            .map(|b| (*b, counts.get(b).copied().unwrap_or(0)))
            .collect()
    }

    /// Age bucket × gender cross-tab, zero-filled for combinations with no
    /// rows. Gender columns are in ascending label order.
    pub fn age_gender_crosstab(&self) -> Crosstab {
        if self.records.is_empty() {
            return Crosstab {
                genders: Vec::new(),
                rows: Vec::new(),
            };
        }
        let mut counts: BTreeMap<(AgeBucket, &str), u64> = BTreeMap::new();
        let mut genders: Vec<&str> = Vec::new();
        for (record, bucket) in self.records.iter().zip(&self.age_buckets) {
            let gender = record.gender.as_str();
            if !genders.contains(&gender) {
                genders.push(gender);
            }
            if let Some(bucket) = bucket {
                *counts.entry((*bucket, gender)).or_insert(0) += 1;
            }
        }
        genders.sort_unstable();
        let rows = AgeBucket::ALL
            .iter()
            .map(|bucket| {
                let row = genders
                    .iter()
                    .map(|g| counts.get(&(*bucket, *g)).copied().unwrap_or(0))
                    .collect();
                (*bucket, row)
            })
            .collect();
        Crosstab {
            genders: genders.into_iter().map(String::from).collect(),
            rows,
        }
    }
}

fn value_counts<'a, I>(values: I) -> Vec<(String, u64)>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut out: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gender: &str, educ: f64, employment: &str, age: u8, generation: &str) -> Record {
        Record {
            gender: gender.to_string(),
            years_of_education: educ,
            employment_status: employment.to_string(),
            age,
            generation: generation.to_string(),
        }
    }

    #[test]
    fn every_age_up_to_100_gets_exactly_one_bucket() {
        for age in 0..=100u8 {
            let bucket = AgeBucket::from_age(age);
            assert!(bucket.is_some(), "age {} has no bucket", age);
            let matching = AgeBucket::ALL
                .iter()
                .filter(|b| Some(**b) == bucket)
                .count();
            assert_eq!(matching, 1);
        }
    }

    #[test]
    fn ages_above_100_get_no_bucket() {
        for age in 101..=u8::MAX {
            assert_eq!(AgeBucket::from_age(age), None, "age {}", age);
        }
    }

    #[test]
    fn bucket_boundaries_match_the_labels() {
        assert_eq!(AgeBucket::from_age(18), Some(AgeBucket::Child));
        assert_eq!(AgeBucket::from_age(19), Some(AgeBucket::YoungAdult));
        assert_eq!(AgeBucket::from_age(30), Some(AgeBucket::YoungAdult));
        assert_eq!(AgeBucket::from_age(31), Some(AgeBucket::Adult));
        assert_eq!(AgeBucket::from_age(45), Some(AgeBucket::Adult));
        assert_eq!(AgeBucket::from_age(46), Some(AgeBucket::MiddleAged));
        assert_eq!(AgeBucket::from_age(60), Some(AgeBucket::MiddleAged));
        assert_eq!(AgeBucket::from_age(61), Some(AgeBucket::Senior));
        assert_eq!(AgeBucket::from_age(100), Some(AgeBucket::Senior));
    }

    #[test]
    fn gender_counts_count_each_value() {
        let ds = Dataset::from_records(vec![
            record("F", 12.0, "Employed", 30, "Millennial"),
            record("M", 12.0, "Employed", 40, "Gen X"),
            record("F", 12.0, "Employed", 50, "Gen X"),
        ]);
        assert_eq!(
            ds.gender_counts(),
            vec![("F".to_string(), 2), ("M".to_string(), 1)]
        );
    }

    #[test]
    fn mean_education_is_grouped_by_gender() {
        let ds = Dataset::from_records(vec![
            record("F", 10.0, "Employed", 30, "Millennial"),
            record("F", 20.0, "Employed", 40, "Gen X"),
            record("M", 5.0, "Employed", 50, "Gen X"),
        ]);
        assert_eq!(
            ds.mean_education_by_gender(),
            vec![("F".to_string(), 15.0), ("M".to_string(), 5.0)]
        );
    }

    #[test]
    fn employment_proportions_sum_to_one_hundred_percent() {
        let ds = Dataset::from_records(vec![
            record("F", 12.0, "Employed", 30, "Millennial"),
            record("M", 12.0, "Unemployed", 40, "Gen X"),
            record("F", 12.0, "Employed", 50, "Gen X"),
            record("M", 12.0, "Student", 21, "Gen Z"),
        ]);
        let counts = ds.employment_counts();
        let total: u64 = counts.iter().map(|(_, n)| n).sum();
        let percent_sum: f64 = counts
            .iter()
            .map(|(_, n)| 100.0 * *n as f64 / total as f64)
            .sum();
        assert!((percent_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn age_distribution_follows_bucket_order_and_zero_fills() {
        let ds = Dataset::from_records(vec![
            record("F", 12.0, "Employed", 25, "Millennial"),
            record("M", 12.0, "Employed", 70, "Boomer"),
            record("F", 12.0, "Employed", 27, "Millennial"),
        ]);
        let labels: Vec<&str> = ds.age_distribution().iter().map(|(b, _)| b.label()).collect();
        assert_eq!(labels, vec!["0-18", "19-30", "31-45", "46-60", "61+"]);
        let counts: Vec<u64> = ds.age_distribution().iter().map(|(_, n)| *n).collect();
        assert_eq!(counts, vec![0, 2, 0, 0, 1]);
    }

    #[test]
    fn out_of_range_ages_are_left_out_of_the_distribution() {
        let ds = Dataset::from_records(vec![
            record("F", 12.0, "Employed", 120, "Boomer"),
            record("M", 12.0, "Employed", 25, "Millennial"),
        ]);
        let total: u64 = ds.age_distribution().iter().map(|(_, n)| n).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn crosstab_fills_missing_combinations_with_zero() {
        let ds = Dataset::from_records(vec![
            record("F", 12.0, "Employed", 25, "Millennial"),
            record("M", 12.0, "Employed", 70, "Boomer"),
        ]);
        let crosstab = ds.age_gender_crosstab();
        assert_eq!(crosstab.genders, vec!["F".to_string(), "M".to_string()]);
        assert_eq!(crosstab.rows.len(), AgeBucket::ALL.len());
        for (bucket, row) in &crosstab.rows {
            assert_eq!(row.len(), 2, "bucket {} misses a gender column", bucket);
        }
        let young = &crosstab.rows[1];
        assert_eq!(young.0, AgeBucket::YoungAdult);
        assert_eq!(young.1, vec![1, 0]);
        let senior = &crosstab.rows[4];
        assert_eq!(senior.1, vec![0, 1]);
    }

    #[test]
    fn empty_table_yields_empty_aggregations() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.gender_counts().is_empty());
        assert!(ds.employment_counts().is_empty());
        assert!(ds.generation_counts().is_empty());
        assert!(ds.mean_education_by_gender().is_empty());
        assert!(ds.age_distribution().is_empty());
        let crosstab = ds.age_gender_crosstab();
        assert!(crosstab.genders.is_empty());
        assert!(crosstab.rows.is_empty());
    }

    #[test]
    fn counts_are_ordered_by_frequency_then_label() {
        let ds = Dataset::from_records(vec![
            record("F", 12.0, "Student", 21, "Gen Z"),
            record("M", 12.0, "Retired", 70, "Boomer"),
            record("F", 12.0, "Student", 22, "Gen Z"),
            record("M", 12.0, "Employed", 40, "Gen X"),
        ]);
        assert_eq!(
            ds.employment_counts(),
            vec![
                ("Student".to_string(), 2),
                ("Employed".to_string(), 1),
                ("Retired".to_string(), 1),
            ]
        );
    }
}
