use crate::{
    domain::{Club, Competition},
    ports::store::{Error, StorePort},
};
use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Store backed by two JSON documents, one per collection
///
/// ```json
/// { "clubs": [{ "name": "Simply Lift", "email": "john@simplylift.co", "points": "13" }] }
/// { "competitions": [{ "name": "Spring Festival", "date": "2020-03-27 10:00:00", "numberOfPlaces": "25" }] }
/// ```
///
/// Counts are read from either numbers or numeric strings and always written back as strings.
/// Each save goes to a temporary sibling file first, which is then renamed over the document.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    clubs_path: PathBuf,
    competitions_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(clubs_path: impl Into<PathBuf>, competitions_path: impl Into<PathBuf>) -> Self {
        Self {
            clubs_path: clubs_path.into(),
            competitions_path: competitions_path.into(),
        }
    }

    pub fn clubs_path(&self) -> &Path {
        &self.clubs_path
    }

    pub fn competitions_path(&self) -> &Path {
        &self.competitions_path
    }
}

#[async_trait::async_trait]
impl StorePort for JsonFileStore {
    async fn load_clubs(&self) -> Result<Vec<Club>, Error> {
        let document: ClubsDocument = read_document(&self.clubs_path).await?;
        debug!(path = %self.clubs_path.display(), count = document.clubs.len(), "loaded clubs");
        Ok(document.clubs.into_iter().map(Into::into).collect())
    }

    async fn load_competitions(&self) -> Result<Vec<Competition>, Error> {
        let document: CompetitionsDocument = read_document(&self.competitions_path).await?;
        debug!(
            path = %self.competitions_path.display(),
            count = document.competitions.len(),
            "loaded competitions"
        );
        Ok(document.competitions.into_iter().map(Into::into).collect())
    }

    async fn save_clubs(&self, clubs: &[Club]) -> Result<(), Error> {
        let document = ClubsDocument {
            clubs: clubs.iter().map(Into::into).collect(),
        };
        write_document(&self.clubs_path, &document).await?;
        debug!(path = %self.clubs_path.display(), count = clubs.len(), "saved clubs");
        Ok(())
    }

    async fn save_competitions(&self, competitions: &[Competition]) -> Result<(), Error> {
        let document = CompetitionsDocument {
            competitions: competitions.iter().map(Into::into).collect(),
        };
        write_document(&self.competitions_path, &document).await?;
        debug!(
            path = %self.competitions_path.display(),
            count = competitions.len(),
            "saved competitions"
        );
        Ok(())
    }
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_slice(&bytes).map_err(|source| {
        if source.is_data() {
            // Well-formed JSON holding values we cannot use
            Error::InvalidRecord {
                collection: path.display().to_string(),
                reason: source.to_string(),
            }
        } else {
            FileError::Json {
                path: path.to_path_buf(),
                source,
            }
            .into()
        }
    })
}

async fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), Error> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|source| FileError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    tokio::fs::write(&tmp_path, &bytes)
        .await
        .map_err(|source| FileError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

#[derive(Debug, Deserialize, Serialize)]
struct ClubsDocument {
    clubs: Vec<ClubRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
struct CompetitionsDocument {
    competitions: Vec<CompetitionRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ClubRecord {
    name: String,
    email: String,
    points: Count,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompetitionRecord {
    name: String,
    #[serde(with = "date_format")]
    date: NaiveDateTime,
    number_of_places: Count,
}

impl From<ClubRecord> for Club {
    fn from(record: ClubRecord) -> Self {
        Self {
            name: record.name,
            email: record.email,
            points: record.points.0,
        }
    }
}

impl From<&Club> for ClubRecord {
    fn from(club: &Club) -> Self {
        Self {
            name: club.name.clone(),
            email: club.email.clone(),
            points: Count(club.points),
        }
    }
}

impl From<CompetitionRecord> for Competition {
    fn from(record: CompetitionRecord) -> Self {
        Self {
            name: record.name,
            date: record.date,
            number_of_places: record.number_of_places.0,
        }
    }
}

impl From<&Competition> for CompetitionRecord {
    fn from(competition: &Competition) -> Self {
        Self {
            name: competition.name.clone(),
            date: competition.date,
            number_of_places: Count(competition.number_of_places),
        }
    }
}

/// Non-negative count stored either as a JSON number or as a numeric string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Count(u32);

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => u32::try_from(value)
                .map(Count)
                .map_err(|_| D::Error::custom(format!("count out of range: {value}"))),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(Count)
                .map_err(|_| D::Error::custom(format!("invalid count: {text:?}"))),
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, DATE_FORMAT)
            .map_err(|err| D::Error::custom(format!("invalid date {text:?}: {err}")))
    }
}

/// Errors specific to the file adapter, erased into [`Error::Adapter`]
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed document {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<FileError> for Error {
    fn from(err: FileError) -> Self {
        Self::Adapter(Box::new(err))
    }
}
