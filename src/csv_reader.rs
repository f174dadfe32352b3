use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, serde::Deserialize, Clone, PartialEq)]
pub struct Record {
    pub gender: String,
    pub years_of_education: f64,
    pub employment_status: String,
    pub age: u8,
    pub generation: String,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not open {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not parse CSV record")]
    Parse(#[from] csv::Error),
}

pub fn read_data(path: &Path) -> Result<Vec<Record>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.display().to_string(),
        source,
    })?;
    parse_records(file)
}

fn parse_records<R: io::Read>(reader: R) -> Result<Vec<Record>, DataError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::<Record>::new();
    for result in rdr.deserialize() {
        // Notice that we need to provide a type hint for automatic
        // deserialization.
        let record: Record = result?;
        records.push(record);
    }
    Ok(records)
}
