//! Heart-disease patient records
//!
//! This module loads a small tabular heart-disease dataset from CSV and
//! derives the per-axis samples and group summaries used in the exploratory
//! analysis.
//!
//! # Data Structure
//!
//! The CSV file has a header row; columns are looked up by name, so extra
//! columns and any column order are accepted. The analyses read:
//!
//! ```text
//! Sex                          male | female
//! Disease                      boolean
//! Age                          number
//! Serum cholesterol in mg/dl   number
//! Maximum heart rate achieved  number
//! Exercise induced angina      category (kept verbatim)
//! ```
//!
//! Boolean cells accept `true`/`false`, `yes`/`no` and `1`/`0`, ignoring case.
//!
//! # Examples
//!
//! ```
//! use statlab_data::heart::{HeartDiseaseDataset, Sex};
//!
//! let csv = "\
//! Age,Sex,Disease,Serum cholesterol in mg/dl,Maximum heart rate achieved,Exercise induced angina
//! 63,male,True,233,150,no
//! 41,female,False,204,172,no
//! 57,male,True,286,108,yes
//! ";
//! let dataset = HeartDiseaseDataset::from_reader(csv.as_bytes()).unwrap();
//!
//! let by_sex = dataset.disease_by_sex().unwrap();
//! assert_eq!(by_sex.more_affected, Sex::Male);
//! assert_eq!(by_sex.percentage_difference, 100.0);
//!
//! assert_eq!(dataset.ages_with_disease().unwrap(), vec![63.0, 57.0]);
//! ```

use std::{collections::BTreeMap, fmt, fs::File, io, path::Path};

use serde::Serialize;

use crate::DataError;

/// Column names read by the analyses.
pub mod columns {
    pub const SEX: &str = "Sex";
    pub const DISEASE: &str = "Disease";
    pub const AGE: &str = "Age";
    pub const SERUM_CHOLESTEROL: &str = "Serum cholesterol in mg/dl";
    pub const MAX_HEART_RATE: &str = "Maximum heart rate achieved";
    pub const EXERCISE_ANGINA: &str = "Exercise induced angina";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Some(Self::Female),
            "male" | "m" => Some(Self::Male),
            _ => None,
        }
    }

    /// Plural label used in reports ("men" / "women").
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Female => "women",
            Self::Male => "men",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Female => "female",
            Self::Male => "male",
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Which sex has more diseased patients, and by how much.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseBySex {
    pub men_with_disease: usize,
    pub women_with_disease: usize,
    /// Ties are attributed to women.
    pub more_affected: Sex,
    /// `(higher - lower) / higher * 100`
    pub percentage_difference: f64,
}

/// Mean of a numeric column within one (sex, disease) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub sex: Sex,
    pub disease: bool,
    pub count: usize,
    pub mean: f64,
}

/// Observations of one numeric column split by disease presence.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DiseaseSplit {
    pub without_disease: Vec<f64>,
    pub with_disease: Vec<f64>,
}

/// Patient counts for one category value, by disease presence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FrequencyRow {
    pub category: String,
    pub without_disease: u64,
    pub with_disease: u64,
}

/// A loaded heart-disease dataset.
#[derive(Debug, Clone)]
pub struct HeartDiseaseDataset {
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl HeartDiseaseDataset {
    /// Reads the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, is not valid CSV, or has no data rows.
    pub fn load<P>(path: P) -> Result<Self, DataError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_owned(),
            source,
        })?;
        let dataset = Self::from_reader(io::BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.headers.len(),
            "loaded heart disease dataset"
        );
        Ok(dataset)
    }

    /// Reads the dataset from any CSV source with a header row.
    ///
    /// # Errors
    ///
    /// Fails if the input is not valid CSV or has no data rows.
    pub fn from_reader<R>(reader: R) -> Result<Self, DataError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers()?.iter().map(str::to_owned).collect();
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        Ok(Self { headers, records })
    }

    /// Number of patient rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn column_index(&self, column: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(column))
            })
            .ok_or_else(|| DataError::MissingColumn {
                column: column.to_owned(),
            })
    }

    /// Parses every cell of `column` with `parse`, reporting the first failure.
    fn parse_column<T>(
        &self,
        column: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<T>, DataError> {
        let idx = self.column_index(column)?;
        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let cell = record.get(idx).unwrap_or_default();
                parse(cell).ok_or_else(|| DataError::InvalidValue {
                    column: column.to_owned(),
                    row: row + 1,
                    value: cell.to_owned(),
                })
            })
            .collect()
    }

    /// Returns a numeric column as a sample.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing or a cell is not a number.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>, DataError> {
        self.parse_column(column, |cell| cell.parse::<f64>().ok())
    }

    fn bool_column(&self, column: &str) -> Result<Vec<bool>, DataError> {
        self.parse_column(column, parse_bool)
    }

    fn sex_column(&self) -> Result<Vec<Sex>, DataError> {
        self.parse_column(columns::SEX, Sex::parse)
    }

    fn text_column(&self, column: &str) -> Result<Vec<String>, DataError> {
        self.parse_column(column, |cell| Some(cell.to_owned()))
    }

    /// Compares the number of diseased men and women.
    ///
    /// # Errors
    ///
    /// Fails if the `Sex` or `Disease` column is missing or malformed, or if
    /// nobody in either group has the disease.
    #[expect(clippy::cast_precision_loss)]
    pub fn disease_by_sex(&self) -> Result<DiseaseBySex, DataError> {
        let sexes = self.sex_column()?;
        let disease = self.bool_column(columns::DISEASE)?;

        let count_diseased = |target: Sex| {
            sexes
                .iter()
                .zip(&disease)
                .filter(|&(&sex, &diseased)| sex == target && diseased)
                .count()
        };
        let men_with_disease = count_diseased(Sex::Male);
        let women_with_disease = count_diseased(Sex::Female);

        let higher = men_with_disease.max(women_with_disease);
        let lower = men_with_disease.min(women_with_disease);
        if higher == 0 {
            return Err(DataError::NoCases);
        }
        let more_affected = if men_with_disease > women_with_disease {
            Sex::Male
        } else {
            Sex::Female
        };

        Ok(DiseaseBySex {
            men_with_disease,
            women_with_disease,
            more_affected,
            percentage_difference: (higher - lower) as f64 / higher as f64 * 100.0,
        })
    }

    /// Mean serum cholesterol for every (sex, disease) group present in the data.
    ///
    /// Groups are ordered by sex, then by disease presence.
    ///
    /// # Errors
    ///
    /// Fails if a required column is missing or malformed.
    pub fn mean_cholesterol_by_group(&self) -> Result<Vec<GroupMean>, DataError> {
        self.mean_by_group(columns::SERUM_CHOLESTEROL)
    }

    /// Mean of `column` for every (sex, disease) group present in the data.
    ///
    /// # Errors
    ///
    /// Fails if a required column is missing or malformed.
    pub fn mean_by_group(&self, column: &str) -> Result<Vec<GroupMean>, DataError> {
        let sexes = self.sex_column()?;
        let disease = self.bool_column(columns::DISEASE)?;
        let values = self.numeric_column(column)?;

        let mut groups = BTreeMap::<(Sex, bool), Vec<f64>>::new();
        for ((sex, diseased), value) in sexes.into_iter().zip(disease).zip(values) {
            groups.entry((sex, diseased)).or_default().push(value);
        }

        groups
            .into_iter()
            .map(|((sex, disease), values)| -> Result<GroupMean, DataError> {
                let stats = statlab_stats::describe(&values)?;
                Ok(GroupMean {
                    sex,
                    disease,
                    count: stats.count,
                    mean: stats.mean,
                })
            })
            .collect()
    }

    /// Ages of the patients with heart disease.
    ///
    /// # Errors
    ///
    /// Fails if the `Age` or `Disease` column is missing or malformed.
    pub fn ages_with_disease(&self) -> Result<Vec<f64>, DataError> {
        Ok(self.split_by_disease(columns::AGE)?.with_disease)
    }

    /// Maximum heart rate achieved, split by disease presence.
    ///
    /// # Errors
    ///
    /// Fails if a required column is missing or malformed.
    pub fn max_heart_rate_by_disease(&self) -> Result<DiseaseSplit, DataError> {
        self.split_by_disease(columns::MAX_HEART_RATE)
    }

    /// Splits a numeric column by disease presence, preserving row order.
    ///
    /// # Errors
    ///
    /// Fails if `column` or `Disease` is missing or malformed.
    pub fn split_by_disease(&self, column: &str) -> Result<DiseaseSplit, DataError> {
        let disease = self.bool_column(columns::DISEASE)?;
        let values = self.numeric_column(column)?;

        let mut split = DiseaseSplit::default();
        for (diseased, value) in disease.into_iter().zip(values) {
            if diseased {
                split.with_disease.push(value);
            } else {
                split.without_disease.push(value);
            }
        }
        Ok(split)
    }

    /// Frequency of exercise-induced angina by disease presence.
    ///
    /// # Errors
    ///
    /// Fails if a required column is missing or malformed.
    pub fn angina_frequency(&self) -> Result<Vec<FrequencyRow>, DataError> {
        self.frequency_by_disease(columns::EXERCISE_ANGINA)
    }

    /// Cross-tabulates a categorical column against disease presence.
    ///
    /// Rows are ordered by category; absent combinations count as zero.
    ///
    /// # Errors
    ///
    /// Fails if `column` or `Disease` is missing or malformed.
    pub fn frequency_by_disease(&self, column: &str) -> Result<Vec<FrequencyRow>, DataError> {
        let disease = self.bool_column(columns::DISEASE)?;
        let categories = self.text_column(column)?;

        let mut table = BTreeMap::<String, FrequencyRow>::new();
        for (category, diseased) in categories.into_iter().zip(disease) {
            let row = table
                .entry(category.clone())
                .or_insert_with(|| FrequencyRow {
                    category,
                    ..FrequencyRow::default()
                });
            if diseased {
                row.with_disease += 1;
            } else {
                row.without_disease += 1;
            }
        }
        Ok(table.into_values().collect())
    }
}
