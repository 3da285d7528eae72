use thiserror::Error;

use crate::repository::models::crop::NewCrop;

#[derive(Debug, Error, PartialEq)]
pub enum BulkError {
    #[error("no crops found in input")]
    Empty,
    #[error("line {line}: yield '{value}' is not a number")]
    InvalidYield { line: usize, value: String },
}

/// Parses one crop per line as `name, season, yield`.
///
/// Blank lines and lines without exactly three fields are skipped. A yield that does not
/// parse rejects the whole input, so callers never insert a partial batch.
pub fn parse(input: &str, added_by: i32) -> Result<Vec<NewCrop>, BulkError> {
    let mut crops = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (name, season, yield_per_acre) = match fields.as_slice() {
            [name, season, yield_per_acre] => (*name, *season, *yield_per_acre),
            _ => continue,
        };

        let yield_per_acre = match yield_per_acre.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                return Err(BulkError::InvalidYield {
                    line: index + 1,
                    value: yield_per_acre.to_string(),
                })
            }
        };

        crops.push(NewCrop {
            name: name.to_string(),
            season: season.to_string(),
            yield_per_acre,
            added_by,
        });
    }

    if crops.is_empty() {
        return Err(BulkError::Empty);
    }

    Ok(crops)
}
