use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The default name of the column that holds the team name.
pub const TEAMS: &str = "TEAMS";

/// The default name of the column that holds the stored total for a row.
pub const TOTAL: &str = "TOTAL";

#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MappingError(String);

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl StdError for MappingError {}

/// The names of the two identifier columns. Every other column in a sheet is a date column.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct IdColumns {
    pub team: String,
    pub total: String,
}

impl Default for IdColumns {
    fn default() -> Self {
        Self {
            team: TEAMS.to_string(),
            total: TOTAL.to_string(),
        }
    }
}

/// Classifies the header row of a revenue sheet into the team column, the total column, and the
/// date columns, which are whatever is left over, in sheet order.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Mapping {
    headers: Vec<Header>,
    team: usize,
    total: usize,
    dates: Vec<usize>,
}

impl Mapping {
    /// Create a new `Mapping` from the header row. Fails if a header appears twice or if either
    /// identifier column is missing.
    pub fn new<S, I>(headers: I, id_columns: &IdColumns) -> Result<Self, MappingError>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let headers: Vec<Header> = headers.into_iter().map(|s| Header(s.into())).collect();

        let header_map: HashMap<Header, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, key)| (key.to_owned(), idx))
            .collect();

        if header_map.len() != headers.len() {
            let mut seen = HashSet::new();
            let duplicate = headers
                .iter()
                .find(|h| !seen.insert(*h))
                .map(|h| h.as_ref().to_string())
                .unwrap_or_default();
            return Err(MappingError(format!(
                "Encountered a duplicate header '{duplicate}'"
            )));
        }

        let find = |name: &str| -> Result<usize, MappingError> {
            header_map
                .get(&Header::from(name))
                .copied()
                .ok_or_else(|| MappingError(format!("The required column '{name}' is missing")))
        };
        let team = find(&id_columns.team)?;
        let total = find(&id_columns.total)?;

        let dates = (0..headers.len())
            .filter(|&ix| ix != team && ix != total)
            .collect();

        Ok(Self {
            headers,
            team,
            total,
            dates,
        })
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn team_index(&self) -> usize {
        self.team
    }

    pub fn total_index(&self) -> usize {
        self.total
    }

    /// The positions of the date columns, in sheet order.
    pub fn date_indices(&self) -> &[usize] {
        &self.dates
    }

    /// The date column headers, in sheet order.
    pub fn dates(&self) -> impl Iterator<Item = &Header> + '_ {
        self.dates.iter().map(|&ix| &self.headers[ix])
    }
}

impl Serialize for Mapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.headers.len()))?;
        for header in &self.headers {
            seq.serialize_element(header.as_ref())?;
        }
        seq.end()
    }
}

/// Represents a header in the revenue sheet, for example `TEAMS` or `27/05/2024`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(String);

impl AsRef<str> for Header {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<S: Into<String>> From<S> for Header {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl FromStr for Header {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}
